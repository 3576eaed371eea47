//! Client facade
//!
//! Each call builds a request, runs it through the interceptor chain and the
//! transport, then maps the response:
//!
//! ```text
//! build request -> attach credential, log -> send -> log, capture credential -> map
//! ```

use std::sync::Arc;

use abicart_http::{
    header::CONTENT_TYPE, resolve_endpoint, shared_transport, ApiRequest, HttpTransport, Method,
    Url,
};
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::{
    config::ClientConfig,
    credentials::CredentialStore,
    error::{ClientError, Result},
    interceptor::{Interceptor, InterceptorChain},
    logging::{Logger, SharedLogger},
    result::{ApiResult, Operation, ResultMapper},
};

/// Empty query for [`Client::get`]
pub const NO_QUERY: [(&str, &str); 0] = [];

/// Abicart API client
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct Client {
    config: ClientConfig,
    base_url: Url,
    credentials: CredentialStore,
    logger: SharedLogger,
    chain: InterceptorChain,
    mapper: ResultMapper,
    transport: OnceCell<Arc<dyn HttpTransport>>,
}

impl Client {
    /// Create a client; the transport is built on first use
    pub fn new(config: ClientConfig) -> Result<Self> {
        ClientBuilder::new().config(config).build()
    }

    /// Start a [`ClientBuilder`] with default configuration
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Read a resource
    pub async fn get<I, K, V>(&self, resource: &str, query: I) -> Result<ApiResult>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = resolve_endpoint(&self.base_url, resource, query)?;
        self.execute(Operation::Get, ApiRequest::new(Method::GET, url)).await
    }

    /// Create a resource
    pub async fn post<T: Serialize + ?Sized>(&self, resource: &str, body: &T) -> Result<ApiResult> {
        self.write(Operation::Post, Method::POST, resource, body).await
    }

    /// Update a resource
    pub async fn put<T: Serialize + ?Sized>(&self, resource: &str, body: &T) -> Result<ApiResult> {
        self.write(Operation::Put, Method::PUT, resource, body).await
    }

    /// Delete a resource.
    ///
    /// With auto-parse on this yields [`ApiResult::Success`] whatever the status.
    pub async fn delete(&self, resource: &str) -> Result<ApiResult> {
        let url = resolve_endpoint(&self.base_url, resource, NO_QUERY)?;
        self.execute(Operation::Delete, ApiRequest::new(Method::DELETE, url)).await
    }

    /// Replace the request/response log sink for subsequent calls
    pub fn set_logger(&self, logger: Arc<dyn Logger>) {
        self.logger.replace(logger);
    }

    /// Credential that will be attached to the next request
    pub fn authorization(&self) -> String {
        self.credentials.read()
    }

    /// Seed or override the credential
    pub fn set_authorization(&self, value: impl Into<String>) {
        self.credentials.write(value);
    }

    /// Store shared by this client's interceptors
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn write<T: Serialize + ?Sized>(
        &self,
        operation: Operation,
        method: Method,
        resource: &str,
        body: &T,
    ) -> Result<ApiResult> {
        let body = serde_json::to_vec(body).map_err(ClientError::Encoding)?;
        let url = resolve_endpoint(&self.base_url, resource, NO_QUERY)?;

        let mut request = ApiRequest::new(method, url).with_body(body);
        request.set_header(CONTENT_TYPE, "application/json");
        self.execute(operation, request).await
    }

    async fn execute(&self, operation: Operation, mut request: ApiRequest) -> Result<ApiResult> {
        let transport = self.transport().await?;

        self.chain.before_send(&mut request);
        let mut response = transport.send(request.clone()).await?;
        self.chain.after_receive(&request, &mut response);

        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status.as_u16(),
            "exchange complete"
        );

        self.mapper.map(operation, response)
    }

    async fn transport(&self) -> Result<Arc<dyn HttpTransport>> {
        let transport = self
            .transport
            .get_or_try_init(|| async {
                debug!(base_uri = %self.base_url, "building transport");
                shared_transport(self.config.transport_config())
            })
            .await?;
        Ok(Arc::clone(transport))
    }

    #[cfg(test)]
    fn transport_ready(&self) -> bool {
        self.transport.initialized()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`]
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    authorization: Option<String>,
}

impl ClientBuilder {
    /// Builder with default configuration and no transport override
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this transport instead of building one from the configuration
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Append an interceptor after the standard chain
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Initial credential
    pub fn authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Validate the base URI and assemble the client
    pub fn build(self) -> Result<Client> {
        let base_url = self.config.base_url()?;
        let credentials = match self.authorization {
            Some(value) => CredentialStore::with_value(value),
            None => CredentialStore::new(),
        };
        let logger = SharedLogger::new(Arc::clone(&self.config.logger));

        let mut chain = InterceptorChain::standard(credentials.clone(), logger.clone());
        for interceptor in self.interceptors {
            chain.push(interceptor);
        }

        Ok(Client {
            mapper: ResultMapper::new(self.config.parse_result, self.config.write_result),
            config: self.config,
            base_url,
            credentials,
            logger,
            chain,
            transport: OnceCell::new_with(self.transport),
        })
    }
}

//! Request/response interceptors
//!
//! Every exchange runs through an ordered [`InterceptorChain`]. Request hooks
//! run in order before the transport sends; response hooks run in order after
//! it returns and before the result is mapped. The standard chain logs both
//! directions and rotates the authorization credential.

use std::sync::Arc;

use abicart_http::{
    header::{HeaderValue, AUTHORIZATION},
    ApiRequest, ApiResponse,
};

use crate::{credentials::CredentialStore, logging::Logger, logging::SharedLogger};

/// Hook into every exchange. Both hooks default to no-ops.
pub trait Interceptor: Send + Sync {
    /// Called before the request is handed to the transport
    fn on_request(&self, _request: &mut ApiRequest) {}

    /// Called after the transport returns, before result mapping
    fn on_response(&self, _request: &ApiRequest, _response: &mut ApiResponse) {}
}

/// Logs `"{METHOD} {uri} {body}"` for each outgoing request
#[derive(Debug, Clone)]
pub struct RequestLogger {
    logger: SharedLogger,
}

impl RequestLogger {
    /// Log through `logger`
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Render the request line
    pub fn format(request: &ApiRequest) -> String {
        format!("{} {} {}", request.method, request.url, request.body_text())
    }
}

impl Interceptor for RequestLogger {
    fn on_request(&self, request: &mut ApiRequest) {
        self.logger.log(&Self::format(request));
    }
}

/// Logs `"{status} {body}"` for each response
#[derive(Debug, Clone)]
pub struct ResponseLogger {
    logger: SharedLogger,
}

impl ResponseLogger {
    /// Log through `logger`
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Render the response line
    pub fn format(response: &ApiResponse) -> String {
        format!("{} {}", response.status.as_u16(), response.text())
    }
}

impl Interceptor for ResponseLogger {
    fn on_response(&self, _request: &ApiRequest, response: &mut ApiResponse) {
        self.logger.log(&Self::format(response));
    }
}

/// Sets `Authorization` to the stored credential (empty if none).
///
/// The credential is sent as its raw bytes. One HTTP cannot carry (a line
/// break, say) is replaced by an empty value so the header is never missing.
#[derive(Debug, Clone)]
pub struct AuthorizationAttach {
    credentials: CredentialStore,
}

impl AuthorizationAttach {
    /// Attach from `credentials`
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }
}

impl Interceptor for AuthorizationAttach {
    fn on_request(&self, request: &mut ApiRequest) {
        let credential = self.credentials.read();
        if request.try_set_header(AUTHORIZATION, &credential).is_err() {
            tracing::warn!(
                target: "abicart::http",
                "stored credential is not a valid header value, sending it empty"
            );
            request.headers.insert(AUTHORIZATION, HeaderValue::from_static(""));
        }
    }
}

/// Stores the response's `Authorization` header for the next request.
///
/// A response without the header leaves the stored credential untouched.
/// Values are taken whatever their bytes, decoded as lossy UTF-8.
#[derive(Debug, Clone)]
pub struct AuthorizationCapture {
    credentials: CredentialStore,
}

impl AuthorizationCapture {
    /// Capture into `credentials`
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }
}

impl Interceptor for AuthorizationCapture {
    fn on_response(&self, _request: &ApiRequest, response: &mut ApiResponse) {
        if let Some(token) = response.header_text(AUTHORIZATION.as_str()) {
            tracing::trace!(target: "abicart::http", "rotating authorization credential");
            self.credentials.write(token);
        }
    }
}

/// Ordered list of interceptors
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Request logger, response logger, authorization attach, authorization capture
    pub fn standard(credentials: CredentialStore, logger: SharedLogger) -> Self {
        Self::new()
            .with(RequestLogger::new(logger.clone()))
            .with(ResponseLogger::new(logger))
            .with(AuthorizationAttach::new(credentials.clone()))
            .with(AuthorizationCapture::new(credentials))
    }

    /// Append an interceptor to the end of the chain
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append a shared interceptor to the end of the chain
    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Number of interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// True if no interceptor is registered
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run every request hook in order
    pub fn before_send(&self, request: &mut ApiRequest) {
        for interceptor in &self.interceptors {
            interceptor.on_request(request);
        }
    }

    /// Run every response hook in order
    pub fn after_receive(&self, request: &ApiRequest, response: &mut ApiResponse) {
        for interceptor in &self.interceptors {
            interceptor.on_response(request, response);
        }
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

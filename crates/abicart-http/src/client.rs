//! HTTP transport implementation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    message::{ApiRequest, ApiResponse},
};

/// Mockable transport trait
///
/// Implementations send the request as given and return whatever the server
/// answered. Status codes are never turned into errors here.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and collect the full response
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Production transport backed by reqwest
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new transport with configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(config.redirect_policy());

        // Configure proxy if provided
        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Create transport with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!("HTTP {}: {}", request.method, request.url);

        let mut builder = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(HttpError::RequestFailed)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(HttpError::RequestFailed)?
            .to_vec();

        debug!("HTTP {} ({} bytes)", status.as_u16(), body.len());

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Create a shared transport (Arc-wrapped for cloning)
pub fn shared_transport(config: HttpConfig) -> Result<Arc<dyn HttpTransport>> {
    Ok(Arc::new(HttpClient::new(config)?))
}

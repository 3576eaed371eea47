//! Credential-rotating client for the Abicart v2 REST API
//!
//! Every request carries the credential captured from the previous response's
//! `Authorization` header, every exchange is logged through a pluggable
//! [`Logger`], and responses are optionally mapped into an [`ApiResult`]
//! according to the API's status-code conventions.
//!
//! ```no_run
//! use abicart_client::{ApiResult, Client, ClientConfig, NO_QUERY};
//!
//! # async fn run() -> abicart_client::Result<()> {
//! let client = Client::new(ClientConfig::default().with_parse_result(true))?;
//! if let ApiResult::Document(item) = client.get("items/1", NO_QUERY).await? {
//!     println!("{item}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod interceptor;
pub mod logging;
pub mod result;

pub use client::{Client, ClientBuilder, NO_QUERY};
pub use config::{ClientConfig, DEFAULT_BASE_URI};
pub use credentials::CredentialStore;
pub use error::{ClientError, Result};
pub use interceptor::{
    AuthorizationAttach, AuthorizationCapture, Interceptor, InterceptorChain, RequestLogger,
    ResponseLogger,
};
pub use logging::{Logger, NullLogger, SharedLogger, TracingLogger, WriterLogger};
pub use result::{ApiResult, Operation, ResultMapper, WriteResult};

/// Re-export the transport layer
pub use abicart_http::{
    ApiRequest, ApiResponse, HttpConfig, HttpError, HttpTransport, Method, StatusCode,
};

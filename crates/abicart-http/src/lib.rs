//! Transport adapter for the Abicart v2 REST API
//!
//! Thin, mockable wrapper around `reqwest` that sends fully resolved requests
//! and hands back every response verbatim, whatever its status code.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpTransport`
//! - **Configurable**: Timeouts, redirect policy, proxy, user-agent
//! - **Endpoint resolution**: RFC 3986 reference resolution against a base URI
//! - **Testing support**: Easy mocking with wiremock

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod message;

pub use client::{shared_transport, HttpClient, HttpTransport};
pub use config::HttpConfig;
pub use endpoint::resolve_endpoint;
pub use error::{HttpError, Result};
pub use message::{ApiRequest, ApiResponse};

/// Re-export commonly used types
pub use reqwest::{header, Method, StatusCode};
pub use url::Url;

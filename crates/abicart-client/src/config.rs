//! Client configuration

use std::fmt;
use std::sync::Arc;

use abicart_http::{HttpConfig, Url};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ClientError, Result},
    logging::{Logger, NullLogger},
    result::WriteResult,
};

/// Root of the vendor's v2 API
pub const DEFAULT_BASE_URI: &str = "https://api.abicart.com/v2/";

/// Client configuration, fixed once the client is built
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URI every resource is resolved against
    #[serde(default = "default_base_uri")]
    pub base_uri: String,

    /// Follow 3xx responses
    #[serde(default)]
    pub redirect: bool,

    /// Map responses into documents, success markers and absence
    #[serde(default)]
    pub parse_result: bool,

    /// What `post`/`put` return when `parse_result` is on
    #[serde(default)]
    pub write_result: WriteResult,

    /// Transport tuning; `redirect` overrides its redirect flag
    #[serde(default)]
    pub http: HttpConfig,

    /// Initial request/response log sink
    #[serde(skip, default = "default_logger")]
    pub logger: Arc<dyn Logger>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
            redirect: false,
            parse_result: false,
            write_result: WriteResult::default(),
            http: HttpConfig::default(),
            logger: default_logger(),
        }
    }
}

impl ClientConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `ABICART_BASE_URI`, `ABICART_REDIRECT` and
    /// `ABICART_PARSE_RESULT` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_uri) = std::env::var("ABICART_BASE_URI") {
            config.base_uri = base_uri;
        }
        if let Some(redirect) = env_flag("ABICART_REDIRECT") {
            config.redirect = redirect;
        }
        if let Some(parse_result) = env_flag("ABICART_PARSE_RESULT") {
            config.parse_result = parse_result;
        }
        config
    }

    /// Set the base URI
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Follow redirects or not
    pub fn with_redirect(mut self, redirect: bool) -> Self {
        self.redirect = redirect;
        self
    }

    /// Enable or disable auto-parse
    pub fn with_parse_result(mut self, parse_result: bool) -> Self {
        self.parse_result = parse_result;
        self
    }

    /// Set what writes return under auto-parse
    pub fn with_write_result(mut self, write_result: WriteResult) -> Self {
        self.write_result = write_result;
        self
    }

    /// Set transport tuning
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Set the initial log sink
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Parsed base URI
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_uri)
            .map_err(|e| ClientError::Config(format!("invalid base URI {:?}: {e}", self.base_uri)))
    }

    /// Transport configuration with the redirect flag applied
    pub fn transport_config(&self) -> HttpConfig {
        self.http.clone().with_redirects(self.redirect)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_uri", &self.base_uri)
            .field("redirect", &self.redirect)
            .field("parse_result", &self.parse_result)
            .field("write_result", &self.write_result)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

// Default value functions for serde
fn default_base_uri() -> String {
    DEFAULT_BASE_URI.to_string()
}

fn default_logger() -> Arc<dyn Logger> {
    Arc::new(NullLogger)
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("ignoring {name}={value:?}: expected a boolean");
            None
        }
    }
}

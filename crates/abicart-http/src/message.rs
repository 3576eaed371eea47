//! Request and response values exchanged with a transport

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue},
    Method, StatusCode,
};
use serde::de::DeserializeOwned;
use url::Url;

/// Outgoing request with a fully resolved target URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a request without headers or body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attach a body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a header from the value's raw bytes, replacing any previous value.
    ///
    /// Fails only for bytes HTTP forbids in a field value (controls such as
    /// CR or LF); non-ASCII text is sent as its UTF-8 bytes.
    pub fn try_set_header(
        &mut self,
        name: HeaderName,
        value: &str,
    ) -> std::result::Result<(), InvalidHeaderValue> {
        let value = HeaderValue::from_bytes(value.as_bytes())?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Set a header, replacing any previous value.
    ///
    /// Values HTTP cannot carry are dropped.
    pub fn set_header(&mut self, name: HeaderName, value: &str) {
        if self.try_set_header(name.clone(), value).is_err() {
            tracing::debug!(header = %name, "dropping header with invalid value");
        }
    }

    /// Header value as visible-ASCII text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Header value decoded as lossy UTF-8, whatever bytes it holds
    pub fn header_text(&self, name: &str) -> Option<String> {
        header_text(&self.headers, name)
    }

    /// Body rendered as lossy UTF-8, empty when absent
    pub fn body_text(&self) -> String {
        self.body
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }
}

/// Response as received from the server
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Create a response with no headers
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Builder-style header setter, mostly for stub transports
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_bytes(value.as_bytes()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Header value as visible-ASCII text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Header value decoded as lossy UTF-8, whatever bytes it holds
    pub fn header_text(&self, name: &str) -> Option<String> {
        header_text(&self.headers, name)
    }

    /// Body rendered as lossy UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

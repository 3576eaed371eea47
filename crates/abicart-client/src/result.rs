//! Mapping raw responses to caller-facing results
//!
//! With auto-parse enabled the API's status conventions are applied:
//!
//! | Status       | Result                          |
//! |--------------|---------------------------------|
//! | 200          | [`ApiResult::Document`]         |
//! | 201, 204     | [`ApiResult::Success`]          |
//! | anything else| [`ApiResult::Absent`]           |
//!
//! With auto-parse disabled every response is handed back as
//! [`ApiResult::Raw`] and the caller can apply [`ResultMapper::parse`] itself.

use abicart_http::{header::LOCATION, ApiResponse, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Client operation that produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Post,
    Put,
    Delete,
}

/// How `post` and `put` report their outcome when auto-parse is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteResult {
    /// Apply the status table
    #[default]
    Status,
    /// Return the `Location` header of the created/updated resource
    Location,
}

/// Outcome of a call
#[derive(Debug, Clone)]
pub enum ApiResult {
    /// Decoded body of a 200 response
    Document(serde_json::Value),
    /// 201/204, or any completed delete
    Success,
    /// 404 or any other unmatched status
    Absent,
    /// `Location` header of a write, in [`WriteResult::Location`] mode
    Location(String),
    /// Unmodified response, when auto-parse is off
    Raw(ApiResponse),
}

impl ApiResult {
    /// True for [`ApiResult::Absent`]
    pub fn is_absent(&self) -> bool {
        matches!(self, ApiResult::Absent)
    }

    /// True for [`ApiResult::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success)
    }

    /// Decoded body, if this is a [`ApiResult::Document`]
    pub fn document(&self) -> Option<&serde_json::Value> {
        match self {
            ApiResult::Document(value) => Some(value),
            _ => None,
        }
    }

    /// Header value, if this is a [`ApiResult::Location`]
    pub fn location(&self) -> Option<&str> {
        match self {
            ApiResult::Location(location) => Some(location),
            _ => None,
        }
    }

    /// Decode a [`ApiResult::Document`] into a typed value.
    ///
    /// Returns `Ok(None)` for every other shape.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Option<T>> {
        match self {
            ApiResult::Document(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(ClientError::Parse),
            _ => Ok(None),
        }
    }

    /// Unmodified response, if this is a [`ApiResult::Raw`]
    pub fn into_response(self) -> Option<ApiResponse> {
        match self {
            ApiResult::Raw(response) => Some(response),
            _ => None,
        }
    }
}

/// Turns responses into [`ApiResult`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultMapper {
    pub parse_result: bool,
    pub write_result: WriteResult,
}

impl ResultMapper {
    /// Mapper for the given auto-parse flag and write mode
    pub fn new(parse_result: bool, write_result: WriteResult) -> Self {
        Self {
            parse_result,
            write_result,
        }
    }

    /// Map the response of `operation`
    pub fn map(&self, operation: Operation, response: ApiResponse) -> Result<ApiResult> {
        if !self.parse_result {
            return Ok(ApiResult::Raw(response));
        }

        match (operation, self.write_result) {
            (Operation::Delete, _) => Ok(ApiResult::Success),
            (Operation::Post | Operation::Put, WriteResult::Location) => Ok(response
                .header(LOCATION.as_str())
                .map(|location| ApiResult::Location(location.to_string()))
                .unwrap_or(ApiResult::Absent)),
            _ => Self::parse(&response),
        }
    }

    /// Apply the status table regardless of configuration
    pub fn parse(response: &ApiResponse) -> Result<ApiResult> {
        match response.status {
            StatusCode::OK => response
                .json()
                .map(ApiResult::Document)
                .map_err(ClientError::Parse),
            StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(ApiResult::Success),
            _ => Ok(ApiResult::Absent),
        }
    }
}

//! Error types for EC2 operations.
//!
//! This module provides the error type returned by every EC2 call, including the
//! structured provider error decoded from non-success responses.

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Main error type for EC2 operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The EC2 endpoint could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The HTTP request failed in transit
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The transport gave up waiting for a response
    #[error("Timeout waiting for EC2: {0}")]
    Timeout(String),

    /// A success response body could not be decoded
    #[error("Failed to decode EC2 response: {0}")]
    DecodeError(String),

    /// The provider rejected the request
    #[error("{0}")]
    Api(ApiError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The system random source failed
    #[error("Random source failure: {0}")]
    RandomSource(String),
}

/// Specialized result type for EC2 operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Provider errors report the code sent by EC2, or `API_ERROR` when the
    /// response carried none.
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::DecodeError(_) => "DECODE_ERROR",
            Self::Api(err) if !err.code.is_empty() => err.code.as_str(),
            Self::Api(_) => "API_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::RandomSource(_) => "RANDOM_SOURCE",
        }
    }

    /// Returns the provider error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the failure happened below the HTTP layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_) | Self::HttpError(_) | Self::Timeout(_)
        )
    }
}

/// Error returned by EC2 for a non-200 response.
///
/// Only the first error listed by EC2 is kept. Any further entries in the
/// response are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code (400, 403, ...)
    pub status_code: u16,
    /// EC2 error code ("UnsupportedOperation", ...), possibly empty
    pub code: String,
    /// Human-oriented error message
    pub message: String,
    /// Request identifier, possibly empty
    pub request_id: String,
}

impl ApiError {
    /// Build the error from a response status and its raw body.
    ///
    /// A body that does not decode yields an empty envelope; the message then
    /// falls back to the HTTP status line.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let envelope: ErrorEnvelope = quick_xml::de::from_reader(body).unwrap_or_default();
        let mut err = envelope
            .errors
            .items
            .into_iter()
            .next()
            .map(|item| Self {
                code: item.code,
                message: item.message,
                ..Self::default()
            })
            .unwrap_or_default();

        err.request_id = envelope.request_id;
        err.status_code = status.as_u16();
        if err.message.is_empty() {
            err.message = status.to_string();
        }
        err
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} ({})", self.message, self.code)
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "RequestID", default)]
    request_id: String,
    #[serde(rename = "Errors", default)]
    errors: ErrorList,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorList {
    #[serde(rename = "Error", default)]
    items: Vec<ErrorItem>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorItem {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Self::DecodeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Self::RandomSource(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ERRORS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Response>
  <Errors>
    <Error>
      <Code>InvalidInstanceID.NotFound</Code>
      <Message>The instance ID 'i-rubbish' does not exist</Message>
    </Error>
    <Error>
      <Code>AuthFailure</Code>
      <Message>second error</Message>
    </Error>
  </Errors>
  <RequestID>0503f4e9-bbd6-483c-b54f-c4ae9f3b30f4</RequestID>
</Response>"#;

    #[test]
    fn test_api_error_keeps_first_error() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, TWO_ERRORS.as_bytes());
        assert_eq!(err.status_code, 400);
        assert_eq!(err.code, "InvalidInstanceID.NotFound");
        assert_eq!(err.message, "The instance ID 'i-rubbish' does not exist");
        assert_eq!(err.request_id, "0503f4e9-bbd6-483c-b54f-c4ae9f3b30f4");
    }

    #[test]
    fn test_api_error_empty_body_uses_status_line() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(err.status_code, 500);
        assert_eq!(err.code, "");
        assert_eq!(err.message, "500 Internal Server Error");
        assert_eq!(err.request_id, "");
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn test_api_error_garbage_body_yields_empty_envelope() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, b"<html>oops");
        assert_eq!(err.code, "");
        assert_eq!(err.message, "502 Bad Gateway");
    }

    #[test]
    fn test_api_error_missing_message_uses_status_line() {
        let body = "<Response><Errors><Error><Code>Blocked</Code></Error></Errors>\
                    <RequestID>req-1</RequestID></Response>";
        let err = ApiError::from_response(StatusCode::FORBIDDEN, body.as_bytes());
        assert_eq!(err.code, "Blocked");
        assert_eq!(err.message, "403 Forbidden");
        assert_eq!(err.request_id, "req-1");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError {
            status_code: 400,
            code: "UnsupportedOperation".to_string(),
            message: "not here".to_string(),
            request_id: String::new(),
        };
        assert_eq!(err.to_string(), "not here (UnsupportedOperation)");
        assert_eq!(Error::from(err).to_string(), "not here (UnsupportedOperation)");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::ServiceUnavailable("test".to_string()).error_code(),
            "SERVICE_UNAVAILABLE"
        );
        assert_eq!(Error::HttpError("test".to_string()).error_code(), "HTTP_ERROR");
        assert_eq!(Error::Timeout("test".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::DecodeError("test".to_string()).error_code(),
            "DECODE_ERROR"
        );
        assert_eq!(Error::Api(ApiError::default()).error_code(), "API_ERROR");
        assert_eq!(
            Error::Api(ApiError {
                code: "AuthFailure".to_string(),
                ..ApiError::default()
            })
            .error_code(),
            "AuthFailure"
        );
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
        assert_eq!(
            Error::RandomSource("test".to_string()).error_code(),
            "RANDOM_SOURCE"
        );
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::Timeout("t".to_string()).is_transport());
        assert!(Error::HttpError("t".to_string()).is_transport());
        assert!(!Error::DecodeError("t".to_string()).is_transport());
        assert!(!Error::Api(ApiError::default()).is_transport());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let ec2_err: Error = err.into();
        assert!(matches!(ec2_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_decode_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            count: u32,
        }
        let err = quick_xml::de::from_str::<Strict>("<r><count>many</count></r>").unwrap_err();
        let ec2_err: Error = err.into();
        assert!(matches!(ec2_err, Error::DecodeError(_)));
    }
}

//! Shared validation helpers for inbound HTTP adapters.
//!
//! Actix rejects malformed bodies and path segments before a handler runs.
//! These extractor configs turn those rejections into the domain error
//! envelope so clients always see `invalid_request` with a stable code.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    UnsupportedMediaType,
    InvalidPath,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidBody => "invalid_body",
            Self::UnsupportedMediaType => "unsupported_media_type",
            Self::InvalidPath => "invalid_path",
        }
    }
}

fn rejection(message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

pub(crate) fn json_payload_error(err: &JsonPayloadError) -> Error {
    debug!(error = %err, "JSON body rejected");
    match err {
        JsonPayloadError::Deserialize(inner) => {
            rejection(format!("invalid JSON body: {inner}"), ErrorCode::InvalidBody)
        }
        JsonPayloadError::ContentType => rejection(
            "request body must be application/json",
            ErrorCode::UnsupportedMediaType,
        ),
        _ => rejection("request body could not be read", ErrorCode::InvalidBody),
    }
}

pub(crate) fn path_error(err: &PathError) -> Error {
    debug!(error = %err, "path parameters rejected");
    match err {
        PathError::Deserialize(inner) => {
            rejection(format!("invalid path parameter: {inner}"), ErrorCode::InvalidPath)
        }
        _ => rejection("invalid path parameter", ErrorCode::InvalidPath),
    }
}

/// JSON extractor configuration reporting failures as `invalid_request`.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| json_payload_error(&err).into())
}

/// Path extractor configuration reporting failures as `invalid_request`.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| path_error(&err).into())
}

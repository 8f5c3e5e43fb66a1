//! The common response envelope emitted by every backend endpoint.
//!
//! The original service signalled success through a mixture of integer flags,
//! booleans, and message substrings. The rewritten contract collapses that
//! into a single explicit `ok` boolean plus a typed error code; see
//! [`crate::legacy`] for the compatibility shim that still understands the
//! old shapes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails shape validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state, e.g. a duplicate account.
    Conflict,
    /// A field-level validation rule was violated.
    Validation,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    /// Wire-stable snake_case name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error payload carried inside a failed [`Envelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Failure category for programmatic handling.
    pub code: ErrorCode,
    /// Human-readable message suitable for display.
    pub message: String,
    /// Supplementary detail, e.g. the offending field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// JSON wrapper returned by every endpoint.
///
/// ## Invariants
/// - `ok == true` implies `error` is absent.
/// - `ok == false` implies `error` is present and `data` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Whether the request succeeded.
    pub ok: bool,
    /// Optional human-readable status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure description when `ok` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            ok: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Successful envelope with a status message alongside the payload.
    #[must_use]
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope carrying a typed error.
    #[must_use]
    pub fn err(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            ok: false,
            message: None,
            data: None,
            error: Some(ErrorBody {
                code,
                message,
                details: None,
            }),
        }
    }

    /// Attach structured details to the error, if one is present.
    #[must_use]
    pub fn with_error_details(mut self, details: serde_json::Value) -> Self {
        if let Some(error) = self.error.as_mut() {
            error.details = Some(details);
        }
        self
    }
}

/// Successful envelope with a message and no payload.
///
/// Used by mutation endpoints whose only meaningful output is the
/// acknowledgement, e.g. profile updates and contact deletion.
#[must_use]
pub fn acknowledged(message: impl Into<String>) -> Envelope<()> {
    Envelope {
        ok: true,
        message: Some(message.into()),
        data: None,
        error: None,
    }
}

//! Domain-level error type.
//!
//! Transport agnostic: the HTTP adapter maps these onto status codes and the
//! response envelope. Codes are shared with the client through
//! `safegas-types` so both sides agree on the failure vocabulary.

use safegas_types::ErrorCode;
use serde_json::Value;

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl DomainError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.trim().is_empty(), "error messages must not be blank");
        Self {
            code,
            message,
            details: None,
        }
    }

    /// The request is malformed or missing required fields.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Authentication is missing, expired, or wrong.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// The target resource does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// The request conflicts with existing state.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// A field-level validation rule failed.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Something unexpected broke inside the service.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach structured details, e.g. the offending field name.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message forwarded to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn constructors_set_the_matching_code() {
        assert_eq!(
            DomainError::conflict("duplicate").code(),
            ErrorCode::Conflict
        );
        assert_eq!(
            DomainError::validation("too short").code(),
            ErrorCode::Validation
        );
        assert_eq!(
            DomainError::unauthorized("no token").code(),
            ErrorCode::Unauthorized
        );
    }

    #[rstest]
    fn details_round_trip() {
        let error = DomainError::validation("short username")
            .with_details(serde_json::json!({ "field": "username" }));
        assert_eq!(
            error.details().and_then(|d| d.get("field")).and_then(Value::as_str),
            Some("username")
        );
    }
}

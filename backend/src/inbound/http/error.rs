//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating [`DomainError`]
//! into Actix responses here. Every failure body is the standard envelope
//! with `ok: false` and a typed error code, plus the ambient trace id.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use safegas_types::{Envelope, ErrorCode};
use serde_json::{Value, json};
use tracing::error;

use crate::domain::DomainError;
use crate::middleware::TraceId;

/// Adapter-level error carrying everything needed to build a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
    trace_id: Option<String>,
}

impl ApiError {
    /// Construct from a domain failure, capturing the ambient trace id.
    pub fn from_domain(error: DomainError) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_owned(),
            details: error.details().cloned(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            // ErrorCode is non_exhaustive; unknown codes are server faults.
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_envelope(&self) -> Envelope<()> {
        // Internal messages stay in the logs; clients get a generic line.
        let message = if matches!(self.code, ErrorCode::InternalError) {
            "Internal server error"
        } else {
            self.message.as_str()
        };
        let mut envelope: Envelope<()> = Envelope::err(self.code, message);
        let mut details = match (&self.details, self.code) {
            (Some(details), code) if code != ErrorCode::InternalError => details.clone(),
            _ => json!({}),
        };
        if let (Some(trace_id), Some(map)) = (&self.trace_id, details.as_object_mut()) {
            map.insert("traceId".to_owned(), Value::String(trace_id.clone()));
        }
        if details.as_object().is_some_and(|map| !map.is_empty()) {
            envelope = envelope.with_error_details(details);
        }
        envelope
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self::from_domain(value)
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to API error");
        Self::from_domain(DomainError::internal(err.to_string()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code, ErrorCode::InternalError) {
            error!(message = %self.message, "internal error surfaced to a client");
        }
        HttpResponse::build(self.status_code()).json(self.to_envelope())
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Map body-deserialization failures onto the standard envelope.
///
/// Registered via `JsonConfig::error_handler` so malformed JSON does not leak
/// actix's default plain-text error shape.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ApiError::from_domain(DomainError::invalid_request(format!(
        "Malformed JSON body: {err}"
    )))
    .into()
}

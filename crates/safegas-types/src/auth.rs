//! Authentication request and response payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body for `POST /auth/login/`.
///
/// Example JSON: `{"email":"a@b.com","password":"secret1"}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Account password; never logged.
    pub password: String,
}

/// Body for `POST /auth/register/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Account email address.
    pub email: String,
    /// Display username, at least 3 characters.
    pub username: String,
    /// Account password, at least 6 characters; never logged.
    pub password: String,
    /// Gas-detector device pairing code, at least 8 characters.
    pub device_unique_code: String,
}

/// Successful login payload: the tokens the client persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    /// Bearer token attached to authenticated requests.
    pub access: String,
    /// Longer-lived token reserved for future refresh support.
    pub refresh: String,
    /// Account email, persisted alongside the tokens.
    pub email: String,
}

/// Payload of `GET /auth/csrf/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CsrfToken {
    /// Anti-forgery token for form-style submissions.
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn session_tokens_use_camel_case_field_names() {
        let tokens = SessionTokens {
            access: "a".into(),
            refresh: "r".into(),
            email: "a@b.com".into(),
        };
        let json = serde_json::to_value(&tokens).expect("serializable");
        assert!(json.get("access").is_some());
        assert!(json.get("refresh").is_some());
    }

    #[rstest]
    fn csrf_token_field_is_camel_cased() {
        let token = CsrfToken {
            csrf_token: "t".into(),
        };
        let json = serde_json::to_value(&token).expect("serializable");
        assert_eq!(
            json.get("csrfToken").and_then(serde_json::Value::as_str),
            Some("t")
        );
    }

    #[rstest]
    fn register_request_parses_camel_case_device_code() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.com","username":"ada","password":"secret1","deviceUniqueCode":"DEV12345"}"#,
        )
        .expect("request parses");
        assert_eq!(request.device_unique_code, "DEV12345");
    }
}

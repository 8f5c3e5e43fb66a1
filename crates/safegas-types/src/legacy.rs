//! Compatibility shim for the pre-rewrite response shapes.
//!
//! Older deployments of the service signalled success inconsistently across
//! endpoints: some returned `success` as an integer `0`/`1`, some as a
//! boolean, some omitted it entirely and relied on the presence of a token or
//! a message substring. [`LegacyEnvelope`] deserializes all of those shapes
//! and [`LegacyEnvelope::resolved_success`] applies the prioritized rule the
//! client must honour. Nothing in this workspace emits this shape.

use serde::Deserialize;

/// The `success` field as older servers produced it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SuccessFlag {
    /// Boolean form, e.g. `"success": true`.
    Bool(bool),
    /// Integer form, e.g. `"success": 1`.
    Int(i64),
}

impl SuccessFlag {
    /// Whether the flag denotes success (`true` or `1`).
    #[must_use]
    pub const fn is_truthy(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Int(value) => value == 1,
        }
    }
}

/// Loosely-shaped envelope accepted from legacy servers.
///
/// Every field is optional because no two legacy endpoints agreed on which
/// ones to send.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacyEnvelope {
    /// Ambiguous success indicator; integer, boolean, or absent.
    pub success: Option<SuccessFlag>,
    /// Free-form status message.
    pub message: Option<String>,
    /// Bearer token as issued by the oldest token endpoint.
    pub token: Option<String>,
    /// JWT-style access token.
    pub access: Option<String>,
    /// JWT-style refresh token.
    pub refresh: Option<String>,
    /// Free-form error string some endpoints used instead of `message`.
    pub error: Option<String>,
    /// Raw payload; shape varies per endpoint.
    pub data: Option<serde_json::Value>,
    /// Account email echoed by the login endpoint.
    pub email: Option<String>,
    /// Device code echoed by the login endpoint.
    #[serde(rename = "device_unique_code", alias = "deviceUniqueCode")]
    pub device_unique_code: Option<String>,
}

impl LegacyEnvelope {
    /// Resolve the ambiguous success signal.
    ///
    /// Priority order, highest first:
    /// 1. a non-empty access token (`access`, else `token`, else the same
    ///    keys nested under `data`) means success;
    /// 2. else a message containing "success" or "created"
    ///    (case-insensitive) means success;
    /// 3. else a `success` flag equal to `true` or `1` means success;
    /// 4. otherwise the response is a failure.
    #[must_use]
    pub fn resolved_success(&self) -> bool {
        if self.access_token().is_some() {
            return true;
        }
        if let Some(message) = &self.message {
            let lowered = message.to_lowercase();
            if lowered.contains("success") || lowered.contains("created") {
                return true;
            }
        }
        self.success.is_some_and(SuccessFlag::is_truthy)
    }

    /// The bearer token to persist, preferring the newer `access` field.
    ///
    /// Current servers place the token pair inside `data`, so the nested
    /// `data.access`/`data.token` keys are consulted after the top-level ones.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        [
            self.access.as_deref(),
            self.token.as_deref(),
            self.nested_str("access"),
            self.nested_str("token"),
        ]
        .into_iter()
        .flatten()
        .find(|token| !token.is_empty())
    }

    /// The refresh token to persist, top-level or nested under `data`.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        [self.refresh.as_deref(), self.nested_str("refresh")]
            .into_iter()
            .flatten()
            .find(|token| !token.is_empty())
    }

    fn nested_str(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }

    /// Best-effort failure message, falling back to the bare `error` string.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

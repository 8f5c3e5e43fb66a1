//! HTTP transport: one fixed base origin, bounded timeouts, typed wrappers
//! for every route.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use safegas_types::models::{
    DashboardData, EmergencyContact, GasLeakStatus, GasLevelData, GasScanResult,
    NewEmergencyContact, PipelineHealth, ProfileData, ProfileImageLocation, ProfileImageUpload,
    ProfileUpdate, RegulatorCommand, RegulatorState, SosReceipt,
};
use safegas_types::{CsrfToken, Envelope, ErrorBody, LegacyEnvelope};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport and protocol failures, each with a user-presentable message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("could not initialise the HTTP client")]
    Build(#[source] reqwest::Error),
    /// Name resolution or connection failure.
    #[error("Cannot reach the server. Check your connection.")]
    Connect(#[source] reqwest::Error),
    /// The server did not answer within the deadline.
    #[error("The server took too long to respond.")]
    Timeout(#[source] reqwest::Error),
    /// Non-2xx response with whatever structured error the body carried.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message chosen for display.
        message: String,
        /// Structured error body, when the server sent one.
        error: Option<ErrorBody>,
    },
    /// The body did not parse as the expected shape.
    #[error("The server sent an unreadable response.")]
    Decode {
        /// Parser diagnostics, for logs rather than display.
        detail: String,
    },
}

/// Raw status plus leniently parsed body, for callers that map statuses
/// themselves rather than treating non-2xx as an error.
#[derive(Debug, Clone)]
pub struct WireReply {
    /// HTTP status code.
    pub status: u16,
    /// Body parsed through the compatibility shim.
    pub body: LegacyEnvelope,
}

fn classify(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(err)
    } else if err.is_connect() {
        ClientError::Connect(err)
    } else if err.is_decode() {
        ClientError::Decode {
            detail: err.to_string(),
        }
    } else {
        ClientError::Connect(err)
    }
}

/// Pick the display message for a failed response.
///
/// A 401 always reads as a login prompt; otherwise the server's own message
/// wins, with a generic fallback.
fn failure_message(status: u16, error: Option<&ErrorBody>) -> String {
    if status == 401 {
        return "Please login again.".to_owned();
    }
    error.map_or_else(
        || format!("Request failed with status {status}."),
        |body| body.message.clone(),
    )
}

/// Blocking-free client for the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client for `base_origin`, e.g. `http://127.0.0.1:8000`.
    ///
    /// # Errors
    /// Returns [`ClientError::Build`] when the TLS backend fails to
    /// initialise.
    pub fn new(base_origin: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            base: base_origin.into().trim_end_matches('/').to_owned(),
            http,
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<(u16, String), ClientError> {
        let url = format!("{}{path}", self.base);
        let mut request = self.http.request(method, &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify)?;
        debug!(url = %url, status, "request completed");
        Ok((status, text))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Envelope<T>, ClientError> {
        let (status, text) = self.send(method, path, token, body).await?;
        if !(200..300).contains(&status) {
            let error = serde_json::from_str::<Envelope<Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.error);
            return Err(ClientError::Http {
                status,
                message: failure_message(status, error.as_ref()),
                error,
            });
        }
        serde_json::from_str(&text).map_err(|err| ClientError::Decode {
            detail: err.to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<T, ClientError> {
        let envelope: Envelope<T> = self.request(method, path, Some(token), body).await?;
        envelope.data.ok_or_else(|| ClientError::Decode {
            detail: format!("2xx response from {path} carried no data"),
        })
    }

    fn encode(body: &impl Serialize) -> Result<Value, ClientError> {
        serde_json::to_value(body).map_err(|err| ClientError::Decode {
            detail: err.to_string(),
        })
    }

    /// POST an auth payload and hand back the raw status plus lenient body.
    ///
    /// Auth callers map statuses themselves, so non-2xx is not an error here;
    /// only transport failures are.
    pub(crate) async fn post_auth(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<WireReply, ClientError> {
        let payload = Self::encode(body)?;
        let (status, text) = self.send(Method::POST, path, None, Some(&payload)).await?;
        let body = serde_json::from_str(&text).map_err(|err| ClientError::Decode {
            detail: err.to_string(),
        })?;
        Ok(WireReply { status, body })
    }

    /// GET /auth/csrf/.
    pub async fn csrf(&self) -> Result<CsrfToken, ClientError> {
        let envelope: Envelope<CsrfToken> =
            self.request(Method::GET, "/auth/csrf/", None, None).await?;
        envelope.data.ok_or_else(|| ClientError::Decode {
            detail: "csrf response carried no data".to_owned(),
        })
    }

    /// GET /home/dashboard/.
    pub async fn dashboard(&self, token: &str) -> Result<DashboardData, ClientError> {
        self.fetch(Method::GET, "/home/dashboard/", token, None)
            .await
    }

    /// GET /gas-leak/status/.
    pub async fn leak_status(&self, token: &str) -> Result<GasLeakStatus, ClientError> {
        self.fetch(Method::GET, "/gas-leak/status/", token, None)
            .await
    }

    /// POST /gas-leak/scan/.
    pub async fn trigger_scan(&self, token: &str) -> Result<GasScanResult, ClientError> {
        self.fetch(Method::POST, "/gas-leak/scan/", token, None)
            .await
    }

    /// GET /gas-level/data/.
    pub async fn level_data(&self, token: &str) -> Result<GasLevelData, ClientError> {
        self.fetch(Method::GET, "/gas-level/data/", token, None)
            .await
    }

    /// GET /pipeline/health/.
    pub async fn pipeline_health(&self, token: &str) -> Result<PipelineHealth, ClientError> {
        self.fetch(Method::GET, "/pipeline/health/", token, None)
            .await
    }

    /// GET /regulator/control/.
    pub async fn regulator_state(&self, token: &str) -> Result<RegulatorState, ClientError> {
        self.fetch(Method::GET, "/regulator/control/", token, None)
            .await
    }

    /// POST /regulator/control/.
    pub async fn regulator_control(
        &self,
        token: &str,
        action: &str,
    ) -> Result<RegulatorState, ClientError> {
        let body = Self::encode(&RegulatorCommand {
            action: action.to_owned(),
        })?;
        self.fetch(Method::POST, "/regulator/control/", token, Some(&body))
            .await
    }

    /// GET /emergency/contacts/.
    pub async fn contacts(&self, token: &str) -> Result<Vec<EmergencyContact>, ClientError> {
        self.fetch(Method::GET, "/emergency/contacts/", token, None)
            .await
    }

    /// POST /emergency/contacts/.
    pub async fn add_contact(
        &self,
        token: &str,
        contact: &NewEmergencyContact,
    ) -> Result<EmergencyContact, ClientError> {
        let body = Self::encode(contact)?;
        self.fetch(Method::POST, "/emergency/contacts/", token, Some(&body))
            .await
    }

    /// DELETE /emergency/contacts/{id}/.
    pub async fn delete_contact(&self, token: &str, id: u32) -> Result<(), ClientError> {
        let path = format!("/emergency/contacts/{id}/");
        let _: Envelope<Value> = self.request(Method::DELETE, &path, Some(token), None).await?;
        Ok(())
    }

    /// POST /emergency/sos/.
    pub async fn trigger_sos(&self, token: &str) -> Result<SosReceipt, ClientError> {
        self.fetch(Method::POST, "/emergency/sos/", token, None)
            .await
    }

    /// GET /profile/.
    pub async fn profile(&self, token: &str) -> Result<ProfileData, ClientError> {
        self.fetch(Method::GET, "/profile/", token, None).await
    }

    /// PUT /profile/.
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<ProfileData, ClientError> {
        let body = Self::encode(update)?;
        self.fetch(Method::PUT, "/profile/", token, Some(&body))
            .await
    }

    /// POST /profile/upload-image/.
    pub async fn upload_image(
        &self,
        token: &str,
        image_data: &str,
    ) -> Result<ProfileImageLocation, ClientError> {
        let body = Self::encode(&ProfileImageUpload {
            image_data: image_data.to_owned(),
        })?;
        self.fetch(Method::POST, "/profile/upload-image/", token, Some(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use safegas_types::envelope::ErrorCode;

    fn conflict_body() -> ErrorBody {
        ErrorBody {
            code: ErrorCode::Conflict,
            message: "A user with this email already exists.".to_owned(),
            details: None,
        }
    }

    #[rstest]
    #[case(401, Some(conflict_body()), "Please login again.")]
    #[case(409, Some(conflict_body()), "A user with this email already exists.")]
    #[case(503, None, "Request failed with status 503.")]
    fn failure_messages_are_user_presentable(
        #[case] status: u16,
        #[case] error: Option<ErrorBody>,
        #[case] expected: &str,
    ) {
        assert_eq!(failure_message(status, error.as_ref()), expected);
    }

    #[rstest]
    fn base_origin_is_normalised() {
        let client = ApiClient::new("http://localhost:8000/").expect("client builds");
        assert_eq!(client.base, "http://localhost:8000");
    }
}

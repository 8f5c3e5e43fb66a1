//! Login and signup orchestration over an injected transport and store.
//!
//! All input rules run locally first, so trivially invalid forms never touch
//! the network. Server replies go through the legacy compatibility shim, which
//! tolerates the inconsistent success signalling older deployments emit.

use thiserror::Error;
use tracing::{debug, info};
use zeroize::Zeroizing;

use safegas_types::{LegacyEnvelope, LoginRequest, RegisterRequest};

use crate::http::{ApiClient, ClientError, WireReply};
use crate::session::{SessionError, SessionStore};

/// Where the flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No session.
    Anonymous,
    /// A login request is in flight.
    Authenticating,
    /// Tokens are persisted and usable.
    Authenticated,
}

/// Login or signup failure with a display-ready message.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A local input rule failed; no network call was made.
    #[error("{0}")]
    Validation(String),
    /// The server rejected the attempt; message is verbatim where available.
    #[error("{0}")]
    Rejected(String),
    /// Transport-level failure.
    #[error(transparent)]
    Transport(#[from] ClientError),
    /// Tokens arrived but could not be persisted.
    #[error("could not persist the session: {0}")]
    Session(#[from] SessionError),
}

/// Seam between the flow and the network, so tests can substitute replies.
pub trait AuthTransport {
    /// POST the login payload and return the raw reply.
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<WireReply, ClientError>> + Send;

    /// POST the registration payload and return the raw reply.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<WireReply, ClientError>> + Send;
}

impl AuthTransport for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<WireReply, ClientError> {
        self.post_auth("/auth/login/", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<WireReply, ClientError> {
        self.post_auth("/auth/register/", request).await
    }
}

/// Raw signup form prior to validation.
#[derive(Debug, Clone)]
pub struct SignupForm {
    /// Account email.
    pub email: String,
    /// Display username.
    pub username: String,
    /// Chosen password.
    pub password: Zeroizing<String>,
    /// Password typed a second time.
    pub confirm_password: Zeroizing<String>,
    /// Gas-detector pairing code.
    pub device_unique_code: String,
}

/// Minimal structural email check: one `@`, non-empty local part, and a dot
/// inside the domain.
fn email_is_well_formed(email: &str) -> bool {
    let trimmed = email.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || trimmed.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn validate_signup(form: &SignupForm) -> Result<(), AuthError> {
    if !email_is_well_formed(&form.email) {
        return Err(AuthError::Validation("Valid email required".to_owned()));
    }
    if form.username.trim().chars().count() < 3 {
        return Err(AuthError::Validation(
            "Username must be at least 3 characters".to_owned(),
        ));
    }
    if form.password.chars().count() < 6 {
        return Err(AuthError::Validation(
            "Password must be at least 6 characters".to_owned(),
        ));
    }
    if *form.password != *form.confirm_password {
        return Err(AuthError::Validation("Passwords do not match".to_owned()));
    }
    if form.device_unique_code.trim().chars().count() < 8 {
        return Err(AuthError::Validation(
            "Device code must be at least 8 characters".to_owned(),
        ));
    }
    Ok(())
}

/// Guess which field a 400 reply complains about from its message text.
fn signup_rejection_message(status: u16, body: &LegacyEnvelope) -> String {
    let server = body.server_message().map(str::to_owned);
    match status {
        400 => {
            let message = server.unwrap_or_else(|| "Invalid signup details.".to_owned());
            let lowered = message.to_lowercase();
            for field in ["email", "username", "password", "device"] {
                if lowered.contains(field) {
                    return format!("Please check the {field} field: {message}");
                }
            }
            message
        }
        409 => server.unwrap_or_else(|| "An account with this email already exists.".to_owned()),
        422 => server.unwrap_or_else(|| "Signup details failed validation.".to_owned()),
        _ => server.unwrap_or_else(|| "Server error. Please try again later.".to_owned()),
    }
}

/// Login/signup state machine bound to a transport and a session store.
#[derive(Debug)]
pub struct AuthFlow<T, S> {
    transport: T,
    store: S,
    state: AuthState,
}

impl<T: AuthTransport, S: SessionStore> AuthFlow<T, S> {
    /// Start anonymous, or authenticated when the store already holds a token.
    pub fn new(transport: T, store: S) -> Self {
        let state = if store.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        Self {
            transport,
            store,
            state,
        }
    }

    /// Current state.
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// The session store this flow persists into.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Attempt a login; on success tokens and email are persisted.
    ///
    /// # Errors
    /// [`AuthError::Validation`] before any network call for malformed input,
    /// [`AuthError::Rejected`] with the server's message when the attempt is
    /// refused, and transport or persistence failures otherwise.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        if !email_is_well_formed(email) {
            return Err(AuthError::Validation("Valid email required".to_owned()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("Password required".to_owned()));
        }

        let request = LoginRequest {
            email: email.trim().to_owned(),
            password: password.to_owned(),
        };
        self.state = AuthState::Authenticating;
        let reply = match self.transport.login(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                self.state = AuthState::Anonymous;
                return Err(err.into());
            }
        };

        if reply.body.resolved_success()
            && let Some(access) = reply.body.access_token()
        {
            self.store.save_tokens(access, reply.body.refresh_token())?;
            self.store.save_email(&request.email)?;
            self.state = AuthState::Authenticated;
            info!(email = %request.email, "login succeeded");
            return Ok(());
        }

        self.state = AuthState::Anonymous;
        let message = reply
            .body
            .server_message()
            .unwrap_or("Login failed. Please try again.")
            .to_owned();
        debug!(status = reply.status, "login rejected");
        Err(AuthError::Rejected(message))
    }

    /// Attempt a signup; the session is untouched either way.
    ///
    /// Returns the server's acknowledgement message.
    ///
    /// # Errors
    /// [`AuthError::Validation`] before any network call when a local rule
    /// fails, [`AuthError::Rejected`] with a status-specific message when the
    /// server refuses, and transport failures otherwise.
    pub async fn signup(&self, form: &SignupForm) -> Result<String, AuthError> {
        validate_signup(form)?;

        let request = RegisterRequest {
            email: form.email.trim().to_owned(),
            username: form.username.trim().to_owned(),
            password: form.password.to_string(),
            device_unique_code: form.device_unique_code.trim().to_owned(),
        };
        let reply = self.transport.register(&request).await?;

        if (200..300).contains(&reply.status) || reply.body.resolved_success() {
            return Ok(reply
                .body
                .server_message()
                .unwrap_or("Account created successfully")
                .to_owned());
        }
        Err(AuthError::Rejected(signup_rejection_message(
            reply.status,
            &reply.body,
        )))
    }

    /// Drop the session and return to anonymous.
    ///
    /// # Errors
    /// Propagates [`SessionError`] when the backing store cannot be cleared.
    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.state = AuthState::Anonymous;
        Ok(())
    }
}

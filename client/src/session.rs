//! Durable session storage for access tokens and the signed-in email.
//!
//! The store is an injected value rather than process-global state, so
//! embedders and tests pick the backing they need. Any read failure is
//! treated as "not signed in" rather than surfaced to the caller.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Failures writing or clearing the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The platform data directory could not be determined.
    #[error("no platform data directory available")]
    NoDataDir,
    /// Reading or writing the session file failed.
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The session document could not be encoded.
    #[error("session encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionDocument {
    access: Option<String>,
    refresh: Option<String>,
    email: Option<String>,
}

/// Where tokens and the signed-in email live between calls.
///
/// Reads never fail: a missing or unreadable backing means no session.
pub trait SessionStore {
    /// Persist a fresh token pair, replacing any existing one.
    fn save_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), SessionError>;

    /// The stored access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Persist the signed-in email.
    fn save_email(&self, email: &str) -> Result<(), SessionError>;

    /// The stored email, if any.
    fn email(&self) -> Option<String>;

    /// Drop the whole session.
    fn clear(&self) -> Result<(), SessionError>;

    /// Whether a non-empty access token is present.
    fn is_authenticated(&self) -> bool {
        self.access_token().is_some_and(|token| !token.is_empty())
    }
}

/// JSON-file-backed store under the platform data directory.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store under `<data dir>/safegas/session.json`.
    ///
    /// # Errors
    /// Returns [`SessionError::NoDataDir`] when the platform exposes no data
    /// directory.
    pub fn new() -> Result<Self, SessionError> {
        let base = dirs::data_dir().ok_or(SessionError::NoDataDir)?;
        Ok(Self::at_path(base.join("safegas").join("session.json")))
    }

    /// Store at an explicit path; used by tests and embedders.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_document(&self) -> SessionDocument {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "no readable session");
                return SessionDocument::default();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            debug!(path = %self.path.display(), error = %err, "corrupt session treated as absent");
            SessionDocument::default()
        })
    }

    fn write_document(&self, document: &SessionDocument) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(document)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn save_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), SessionError> {
        let mut document = self.read_document();
        document.access = Some(access.to_owned());
        document.refresh = refresh.map(str::to_owned);
        self.write_document(&document)
    }

    fn access_token(&self) -> Option<String> {
        self.read_document().access.filter(|token| !token.is_empty())
    }

    fn save_email(&self, email: &str) -> Result<(), SessionError> {
        let mut document = self.read_document();
        document.email = Some(email.to_owned());
        self.write_document(&document)
    }

    fn email(&self) -> Option<String> {
        self.read_document().email
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and short-lived embedding.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<SessionDocument>,
}

impl MemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), SessionError> {
        if let Ok(mut document) = self.inner.lock() {
            document.access = Some(access.to_owned());
            document.refresh = refresh.map(str::to_owned);
        }
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|document| document.access.clone())
            .filter(|token| !token.is_empty())
    }

    fn save_email(&self, email: &str) -> Result<(), SessionError> {
        if let Ok(mut document) = self.inner.lock() {
            document.email = Some(email.to_owned());
        }
        Ok(())
    }

    fn email(&self) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|document| document.email.clone())
    }

    fn clear(&self) -> Result<(), SessionError> {
        if let Ok(mut document) = self.inner.lock() {
            *document = SessionDocument::default();
        }
        Ok(())
    }
}

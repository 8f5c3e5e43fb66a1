//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::{ContactDirectory, TokenSigner, UserRegistry};

/// Everything the route handlers need, cloned cheaply per worker.
#[derive(Clone)]
pub struct AppState {
    /// Mints and verifies bearer tokens.
    pub signer: TokenSigner,
    /// Registered accounts.
    pub users: Arc<UserRegistry>,
    /// Per-account emergency contacts.
    pub contacts: Arc<ContactDirectory>,
    /// Development switch restoring the original accept-anything login stub.
    pub allow_any_credentials: bool,
}

impl AppState {
    /// Assemble fresh state around a token signer.
    pub fn new(signer: TokenSigner, allow_any_credentials: bool) -> Self {
        Self {
            signer,
            users: Arc::new(UserRegistry::new()),
            contacts: Arc::new(ContactDirectory::new()),
            allow_any_credentials,
        }
    }
}

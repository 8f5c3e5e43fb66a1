//! Shared wire contract for the SafeGas backend and client.
//!
//! Both sides of the HTTP boundary depend on this crate so the envelope,
//! error codes, and domain read models cannot drift apart. The backend emits
//! only the clean [`Envelope`] shape; the multi-shape success resolution kept
//! for older servers lives in [`legacy`] and is never produced here.

pub mod auth;
pub mod envelope;
pub mod legacy;
pub mod models;

pub use auth::{CsrfToken, LoginRequest, RegisterRequest, SessionTokens};
pub use envelope::{Envelope, ErrorBody, ErrorCode};
pub use legacy::LegacyEnvelope;

//! Domain layer: validation, tokens, mock state, and fabricated telemetry.
//!
//! Everything here is transport agnostic; the HTTP adapter under
//! `crate::inbound` maps these types onto routes and status codes.

pub mod credentials;
pub mod error;
pub mod registry;
pub mod telemetry;
pub mod token;

pub use credentials::{CredentialRuleError, LoginCredentials, Registration};
pub use error::DomainError;
pub use registry::{ContactDirectory, UserRegistry};
pub use token::{TokenPair, TokenSigner};

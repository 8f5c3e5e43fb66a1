//! Client library for the SafeGas monitoring backend.
//!
//! Four pieces: a durable [`session::SessionStore`], the [`http::ApiClient`]
//! transport with typed endpoint wrappers, the [`auth::AuthFlow`] state
//! machine, and [`scope::RequestScope`] for cancelling in-flight work when a
//! screen is torn down.

pub mod auth;
pub mod http;
pub mod scope;
pub mod session;

pub use auth::{AuthError, AuthFlow, AuthState, AuthTransport, SignupForm};
pub use http::{ApiClient, ClientError, WireReply};
pub use scope::RequestScope;
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};

//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod emergency;
pub mod error;
pub mod gas;
pub mod home;
pub mod pipeline;
pub mod profile;
pub mod regulator;
pub mod state;
#[cfg(test)]
pub mod test_support;

pub use error::ApiResult;

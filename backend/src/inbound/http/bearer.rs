//! Bearer-token authentication for protected routes.
//!
//! Handlers take a [`BearerIdentity`] parameter; extraction parses the
//! `Authorization: Bearer <token>` header and verifies the token against the
//! shared-secret signer in application state. Anything short of a valid,
//! unexpired access token yields a 401 with "please login again".

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::{Ready, ready};

use crate::domain::DomainError;

use super::error::ApiError;
use super::state::AppState;

/// The authenticated caller, derived from the bearer token's subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerIdentity {
    email: String,
}

impl BearerIdentity {
    /// Account email the token was minted for.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

fn extract(req: &HttpRequest) -> Result<BearerIdentity, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| DomainError::internal("application state missing"))
        .map_err(ApiError::from)?;
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::from(DomainError::unauthorized("please login again")))?;
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::from(DomainError::unauthorized("please login again")))?;
    let email = state.signer.verify_access(token).map_err(ApiError::from)?;
    Ok(BearerIdentity { email })
}

impl FromRequest for BearerIdentity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

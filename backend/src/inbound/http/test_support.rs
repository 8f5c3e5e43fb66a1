//! Shared fixtures for handler tests.

use actix_web::test::TestRequest;

use crate::domain::TokenSigner;
use crate::domain::token::DEFAULT_ACCESS_TTL_SECS;

use super::state::AppState;

/// Fixture account used across handler tests.
pub const TEST_EMAIL: &str = "a@b.com";

/// Fresh state plus a valid access token for [`TEST_EMAIL`].
pub fn test_state_with_token() -> (AppState, String) {
    let state = AppState::new(
        TokenSigner::new(b"test-secret".to_vec(), DEFAULT_ACCESS_TTL_SECS),
        false,
    );
    let token = state
        .signer
        .mint_pair(TEST_EMAIL)
        .expect("token mint succeeds")
        .access;
    (state, token)
}

/// Like [`test_state_with_token`], but with [`TEST_EMAIL`] registered.
pub fn registered_state_with_token() -> (AppState, String) {
    let (state, token) = test_state_with_token();
    let registration =
        crate::domain::Registration::try_from_parts(TEST_EMAIL, "tester", "secret1", "DEVICE01")
            .expect("fixture registration is valid");
    state.users.register(&registration).expect("fresh registry");
    (state, token)
}

/// GET request builder with the bearer header attached.
pub fn authed_get(uri: &str, token: &str) -> TestRequest {
    TestRequest::get()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
}

/// POST request builder with the bearer header attached.
pub fn authed_post(uri: &str, token: &str) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
}

/// PUT request builder with the bearer header attached.
pub fn authed_put(uri: &str, token: &str) -> TestRequest {
    TestRequest::put()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
}

/// DELETE request builder with the bearer header attached.
pub fn authed_delete(uri: &str, token: &str) -> TestRequest {
    TestRequest::delete()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
}

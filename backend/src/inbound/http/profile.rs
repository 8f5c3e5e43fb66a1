//! Profile read, update, and image upload endpoints.

use actix_web::{get, post, put, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use safegas_types::Envelope;
use safegas_types::models::{ProfileData, ProfileImageLocation, ProfileImageUpload, ProfileUpdate};
use tracing::info;
use uuid::Uuid;

use crate::domain::DomainError;

use super::bearer::BearerIdentity;
use super::error::ApiResult;
use super::state::AppState;

/// Account profile for the caller.
#[utoipa::path(
    get,
    path = "/profile/",
    responses(
        (status = 200, description = "Profile data", body = Envelope<ProfileData>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile/")]
pub async fn get_profile(
    identity: BearerIdentity,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Envelope<ProfileData>>> {
    let profile = state.users.profile(identity.email())?;
    Ok(web::Json(Envelope::ok(profile)))
}

/// Update profile fields; absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/profile/",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = Envelope<ProfileData>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile/")]
pub async fn update_profile(
    identity: BearerIdentity,
    state: web::Data<AppState>,
    payload: web::Json<ProfileUpdate>,
) -> ApiResult<web::Json<Envelope<ProfileData>>> {
    let update = payload.into_inner();
    state.users.update_profile(identity.email(), &update)?;
    info!(email = %identity.email(), "profile updated");
    let profile = state.users.profile(identity.email())?;
    Ok(web::Json(Envelope::ok_with_message(
        profile,
        "Profile updated successfully",
    )))
}

/// Strip an optional `data:<mime>;base64,` prefix and decode the rest.
fn decode_image_data(raw: &str) -> Result<Vec<u8>, DomainError> {
    let encoded = raw
        .split_once(',')
        .map_or(raw, |(prefix, rest)| {
            if prefix.starts_with("data:") { rest } else { raw }
        })
        .trim();
    if encoded.is_empty() {
        return Err(DomainError::invalid_request("imageData is required."));
    }
    STANDARD
        .decode(encoded)
        .map_err(|_| DomainError::invalid_request("imageData is not valid base64."))
}

/// Accept a base64 image and return its stored location.
///
/// The image bytes are decoded to validate them, then discarded; only the
/// generated URL is kept on the profile.
#[utoipa::path(
    post,
    path = "/profile/upload-image/",
    request_body = ProfileImageUpload,
    responses(
        (status = 200, description = "Image stored", body = Envelope<ProfileImageLocation>),
        (status = 400, description = "Missing or undecodable image data"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["profile"],
    operation_id = "uploadProfileImage"
)]
#[post("/profile/upload-image/")]
pub async fn upload_image(
    identity: BearerIdentity,
    state: web::Data<AppState>,
    payload: web::Json<ProfileImageUpload>,
) -> ApiResult<web::Json<Envelope<ProfileImageLocation>>> {
    let bytes = decode_image_data(&payload.image_data)?;
    let url = format!("/media/profile_images/{}.jpg", Uuid::new_v4());
    state.users.set_profile_image(identity.email(), &url)?;
    info!(
        email = %identity.email(),
        size = bytes.len(),
        url = %url,
        "profile image stored"
    );
    Ok(web::Json(Envelope::ok_with_message(
        ProfileImageLocation { image_url: url },
        "Profile image uploaded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_support::{
        TEST_EMAIL, authed_get, authed_post, authed_put, registered_state_with_token,
        test_state_with_token,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    macro_rules! profile_app {
        ($state:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(get_profile)
                    .service(update_profile)
                    .service(upload_image),
            )
            .await
        };
    }

    #[rstest]
    #[case("aGVsbG8=", true)]
    #[case("data:image/jpeg;base64,aGVsbG8=", true)]
    #[case("not base64!!", false)]
    #[case("", false)]
    fn image_data_decoding(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(decode_image_data(raw).is_ok(), ok);
    }

    #[actix_web::test]
    async fn unknown_accounts_get_a_fabricated_profile() {
        let (state, token) = test_state_with_token();
        let app = profile_app!(state);

        let response = actix_test::call_service(&app, authed_get("/profile/", &token).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/data/email").and_then(Value::as_str),
            Some(TEST_EMAIL)
        );
        let device = body
            .pointer("/data/deviceUniqueCode")
            .and_then(Value::as_str)
            .expect("device code");
        assert!(device.starts_with("DEV_"));
    }

    #[actix_web::test]
    async fn updates_are_sparse() {
        let (state, token) = registered_state_with_token();
        let app = profile_app!(state);

        let request = authed_put("/profile/", &token)
            .set_json(serde_json::json!({ "username": "newname" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/data/username").and_then(Value::as_str),
            Some("newname")
        );
        assert_eq!(
            body.pointer("/data/email").and_then(Value::as_str),
            Some(TEST_EMAIL)
        );
    }

    #[actix_web::test]
    async fn uploaded_images_land_under_media() {
        let (state, token) = registered_state_with_token();
        let app = profile_app!(state);

        let request = authed_post("/profile/upload-image/", &token)
            .set_json(serde_json::json!({ "imageData": "aGVsbG8=" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        let url = body
            .pointer("/data/imageUrl")
            .and_then(Value::as_str)
            .expect("imageUrl");
        assert!(url.starts_with("/media/profile_images/"));
        assert!(url.ends_with(".jpg"));

        let response = actix_test::call_service(&app, authed_get("/profile/", &token).to_request()).await;
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/data/profileImage").and_then(Value::as_str),
            Some(url)
        );
    }

    #[actix_web::test]
    async fn bad_image_data_is_a_bad_request() {
        let (state, token) = test_state_with_token();
        let app = profile_app!(state);

        let request = authed_post("/profile/upload-image/", &token)
            .set_json(serde_json::json!({ "imageData": "###" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

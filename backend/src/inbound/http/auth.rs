//! Authentication endpoints: register, login, and the CSRF token stub.

use actix_web::{HttpResponse, get, post, web};
use rand::RngCore;
use safegas_types::{CsrfToken, Envelope, LoginRequest, RegisterRequest, SessionTokens};
use serde_json::json;
use tracing::info;

use crate::domain::{CredentialRuleError, DomainError, LoginCredentials, Registration};

use super::error::ApiResult;
use super::state::AppState;

/// Map a credential rule failure onto the right HTTP category.
///
/// Shape problems (bad email, blank password) are 400s; length rules are
/// 422s. Both carry the offending field in the details so clients can
/// highlight it.
fn map_rule_error(err: CredentialRuleError) -> DomainError {
    let message = err.to_string();
    let base = if err.is_shape_error() {
        DomainError::invalid_request(message)
    } else {
        DomainError::validation(message)
    };
    base.with_details(json!({ "field": err.field() }))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/auth/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Malformed input"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation rule failed"),
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register/")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let registration = Registration::try_from_parts(
        &payload.email,
        &payload.username,
        &payload.password,
        &payload.device_unique_code,
    )
    .map_err(map_rule_error)?;
    state.users.register(&registration)?;
    info!(email = %registration.email(), "account registered");
    Ok(HttpResponse::Created()
        .json(safegas_types::envelope::acknowledged("Account created successfully")))
}

/// Exchange credentials for an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/auth/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Tokens issued", body = Envelope<SessionTokens>),
        (status = 400, description = "Malformed input"),
        (status = 401, description = "Wrong credentials"),
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login/")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Envelope<SessionTokens>>> {
    let payload = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&payload.email, &payload.password).map_err(map_rule_error)?;
    state
        .users
        .verify_login(&credentials, state.allow_any_credentials)?;
    let pair = state.signer.mint_pair(credentials.email())?;
    info!(email = %credentials.email(), "login succeeded");
    Ok(web::Json(Envelope::ok_with_message(
        SessionTokens {
            access: pair.access,
            refresh: pair.refresh,
            email: credentials.email().to_owned(),
        },
        "Login successful!",
    )))
}

/// Issue an anti-forgery token.
///
/// The mobile client fetches this before form-style submissions; the mock
/// backend does not verify it, so a fresh random value suffices.
#[utoipa::path(
    get,
    path = "/auth/csrf/",
    responses((status = 200, description = "Token issued", body = Envelope<CsrfToken>)),
    tags = ["auth"],
    operation_id = "csrf",
    security([])
)]
#[get("/auth/csrf/")]
pub async fn csrf() -> ApiResult<web::Json<Envelope<CsrfToken>>> {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    Ok(web::Json(Envelope::ok(CsrfToken {
        csrf_token: hex::encode(bytes),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenSigner;
    use crate::domain::token::DEFAULT_ACCESS_TTL_SECS;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    fn test_state(allow_any: bool) -> web::Data<AppState> {
        web::Data::new(AppState::new(
            TokenSigner::new(b"test-secret".to_vec(), DEFAULT_ACCESS_TTL_SECS),
            allow_any,
        ))
    }

    fn app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .service(register)
            .service(login)
            .service(csrf)
    }

    fn register_body() -> Value {
        json!({
            "email": "a@b.com",
            "username": "ada",
            "password": "secret1",
            "deviceUniqueCode": "DEV12345",
        })
    }

    macro_rules! post_json {
        ($app:expr, $uri:expr, $body:expr) => {{
            let request = test::TestRequest::post()
                .uri($uri)
                .set_json($body)
                .to_request();
            test::call_service($app, request).await
        }};
    }

    #[actix_web::test]
    async fn register_then_login_issues_tokens() {
        let app = test::init_service(app(test_state(false))).await;
        let created = post_json!(&app, "/auth/register/", &register_body());
        assert_eq!(created.status(), StatusCode::CREATED);

        let response = post_json!(
            &app,
            "/auth/login/",
            &json!({ "email": "a@b.com", "password": "secret1" })
        );
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body.get("ok"), Some(&Value::Bool(true)));
        let access = body
            .pointer("/data/access")
            .and_then(Value::as_str)
            .expect("access token present");
        assert!(!access.is_empty());
        assert!(body.pointer("/data/refresh").is_some());
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorized() {
        let app = test::init_service(app(test_state(false))).await;
        let created = post_json!(&app, "/auth/register/", &register_body());
        assert_eq!(created.status(), StatusCode::CREATED);

        let response = post_json!(
            &app,
            "/auth/login/",
            &json!({ "email": "a@b.com", "password": "nope-nope" })
        );
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body.get("ok"), Some(&Value::Bool(false)));
    }

    #[actix_web::test]
    async fn any_credentials_mode_mints_for_unknown_accounts() {
        let app = test::init_service(app(test_state(true))).await;
        let response = post_json!(
            &app,
            "/auth/login/",
            &json!({ "email": "ghost@b.com", "password": "whatever" })
        );
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(json!({"email":"bad","username":"ada","password":"secret1","deviceUniqueCode":"DEV12345"}), StatusCode::BAD_REQUEST, "email")]
    #[case(json!({"email":"a@b.com","username":"ab","password":"secret1","deviceUniqueCode":"DEV12345"}), StatusCode::UNPROCESSABLE_ENTITY, "username")]
    #[case(json!({"email":"a@b.com","username":"ada","password":"short","deviceUniqueCode":"DEV12345"}), StatusCode::UNPROCESSABLE_ENTITY, "password")]
    #[case(json!({"email":"a@b.com","username":"ada","password":"secret1","deviceUniqueCode":"DEV1"}), StatusCode::UNPROCESSABLE_ENTITY, "deviceUniqueCode")]
    #[actix_web::test]
    async fn register_rejects_rule_violations(
        #[case] body: Value,
        #[case] expected_status: StatusCode,
        #[case] expected_field: &str,
    ) {
        let app = test::init_service(app(test_state(false))).await;
        let response = post_json!(&app, "/auth/register/", &body);
        assert_eq!(response.status(), expected_status);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/error/details/field").and_then(Value::as_str),
            Some(expected_field)
        );
    }

    #[actix_web::test]
    async fn duplicate_registration_conflicts() {
        let app = test::init_service(app(test_state(false))).await;
        let first = post_json!(&app, "/auth/register/", &register_body());
        assert_eq!(first.status(), StatusCode::CREATED);
        let second = post_json!(&app, "/auth/register/", &register_body());
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn csrf_returns_a_fresh_token() {
        let app = test::init_service(app(test_state(false))).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/auth/csrf/").to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        let token = body
            .pointer("/data/csrfToken")
            .and_then(Value::as_str)
            .expect("token present");
        assert_eq!(token.len(), 64);
    }
}

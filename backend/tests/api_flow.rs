//! End-to-end flow over the fully wired application: register, login, then
//! read protected telemetry with the issued token.

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{Value, json};

use safegas_backend::domain::TokenSigner;
use safegas_backend::inbound::http::state::AppState;
use safegas_backend::server::build_app;

fn fresh_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        TokenSigner::new(b"integration-secret".to_vec(), 3600),
        false,
    ))
}

#[actix_web::test]
async fn register_login_and_read_dashboard() {
    let app = test::init_service(build_app(fresh_state())).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register/")
            .set_json(json!({
                "email": "pat@example.com",
                "username": "pat",
                "password": "secret1",
                "deviceUniqueCode": "DEVICE01"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .set_json(json!({
                "email": "pat@example.com",
                "password": "secret1"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("trace-id"),
        "every response carries a trace id"
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.pointer("/ok"), Some(&Value::Bool(true)));
    let access = body
        .pointer("/data/access")
        .and_then(Value::as_str)
        .expect("access token");
    assert!(!access.is_empty());

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/home/dashboard/").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/home/dashboard/")
            .insert_header(("Authorization", format!("Bearer {access}")))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    let tiles = body
        .pointer("/data/statusData")
        .and_then(Value::as_array)
        .expect("statusData array");
    assert_eq!(tiles.len(), 4);
}

#[actix_web::test]
async fn malformed_json_is_wrapped_in_the_error_envelope() {
    let app = test::init_service(build_app(fresh_state())).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.pointer("/ok"), Some(&Value::Bool(false)));
    assert_eq!(
        body.pointer("/error/code").and_then(Value::as_str),
        Some("invalid_request")
    );
}

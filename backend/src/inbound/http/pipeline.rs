//! Pipeline health reporting endpoint.

use actix_web::{get, web};
use safegas_types::Envelope;
use safegas_types::models::PipelineHealth;

use crate::domain::telemetry;

use super::bearer::BearerIdentity;
use super::error::ApiResult;

/// Per-section condition plus upcoming maintenance.
#[utoipa::path(
    get,
    path = "/pipeline/health/",
    responses(
        (status = 200, description = "Pipeline health", body = Envelope<PipelineHealth>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["pipeline"],
    operation_id = "pipelineHealth"
)]
#[get("/pipeline/health/")]
pub async fn health(_identity: BearerIdentity) -> ApiResult<web::Json<Envelope<PipelineHealth>>> {
    Ok(web::Json(Envelope::ok(telemetry::pipeline_health())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_support::{authed_get, test_state_with_token};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn health_reports_sections_and_maintenance() {
        let (state, token) = test_state_with_token();
        let app =
            test::init_service(App::new().app_data(web::Data::new(state)).service(health)).await;

        let response =
            test::call_service(&app, authed_get("/pipeline/health/", &token).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        let sections = body
            .pointer("/data/sections")
            .and_then(Value::as_array)
            .expect("sections array");
        assert_eq!(sections.len(), 2);
        let maintenance = body
            .pointer("/data/maintenanceSchedule")
            .and_then(Value::as_array)
            .expect("maintenanceSchedule array");
        assert_eq!(
            maintenance[0].pointer("/priority").and_then(Value::as_str),
            Some("MEDIUM")
        );
    }
}

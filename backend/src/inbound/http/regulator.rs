//! Regulator status and control endpoints.

use actix_web::{get, post, web};
use safegas_types::Envelope;
use safegas_types::models::{RegulatorCommand, RegulatorState};
use serde_json::json;
use tracing::info;

use crate::domain::{DomainError, telemetry};

use super::bearer::BearerIdentity;
use super::error::ApiResult;

const KNOWN_ACTIONS: [&str; 4] = ["turn_on", "turn_off", "auto_mode", "manual_mode"];

/// Current regulator telemetry.
#[utoipa::path(
    get,
    path = "/regulator/control/",
    responses(
        (status = 200, description = "Regulator state", body = Envelope<RegulatorState>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["regulator"],
    operation_id = "regulatorState"
)]
#[get("/regulator/control/")]
pub async fn state(identity: BearerIdentity) -> ApiResult<web::Json<Envelope<RegulatorState>>> {
    Ok(web::Json(Envelope::ok(telemetry::regulator_state(
        identity.email(),
    ))))
}

/// Apply a control action and return the resulting state.
#[utoipa::path(
    post,
    path = "/regulator/control/",
    request_body = RegulatorCommand,
    responses(
        (status = 200, description = "Action applied", body = Envelope<RegulatorState>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Unknown action"),
    ),
    tags = ["regulator"],
    operation_id = "regulatorControl"
)]
#[post("/regulator/control/")]
pub async fn control(
    identity: BearerIdentity,
    payload: web::Json<RegulatorCommand>,
) -> ApiResult<web::Json<Envelope<RegulatorState>>> {
    let action = payload.into_inner().action;
    if !KNOWN_ACTIONS.contains(&action.as_str()) {
        return Err(DomainError::validation("Unknown regulator action.")
            .with_details(json!({ "action": action }))
            .into());
    }
    info!(email = %identity.email(), action = %action, "regulator action applied");
    Ok(web::Json(Envelope::ok_with_message(
        telemetry::regulator_after(identity.email(), &action),
        format!("Regulator {action} completed"),
    )))
}

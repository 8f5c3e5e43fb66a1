//! Gas-leak detection and gas-level monitoring endpoints.

use actix_web::{get, post, web};
use safegas_types::Envelope;
use safegas_types::models::{GasLeakStatus, GasLevelData, GasScanResult};

use crate::domain::telemetry;

use super::bearer::BearerIdentity;
use super::error::ApiResult;

/// Latest leak-detection reading.
#[utoipa::path(
    get,
    path = "/gas-leak/status/",
    responses(
        (status = 200, description = "Leak status", body = Envelope<GasLeakStatus>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["gas"],
    operation_id = "gasLeakStatus"
)]
#[get("/gas-leak/status/")]
pub async fn leak_status(
    _identity: BearerIdentity,
) -> ApiResult<web::Json<Envelope<GasLeakStatus>>> {
    Ok(web::Json(Envelope::ok(telemetry::leak_status())))
}

/// Trigger an on-demand leak scan.
#[utoipa::path(
    post,
    path = "/gas-leak/scan/",
    responses(
        (status = 200, description = "Scan completed", body = Envelope<GasScanResult>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["gas"],
    operation_id = "gasLeakScan"
)]
#[post("/gas-leak/scan/")]
pub async fn trigger_scan(
    _identity: BearerIdentity,
) -> ApiResult<web::Json<Envelope<GasScanResult>>> {
    Ok(web::Json(Envelope::ok_with_message(
        telemetry::scan_result(),
        "Scan completed",
    )))
}

/// Cylinder level, flow, pressure, and recent history.
#[utoipa::path(
    get,
    path = "/gas-level/data/",
    responses(
        (status = 200, description = "Level data", body = Envelope<GasLevelData>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["gas"],
    operation_id = "gasLevelData"
)]
#[get("/gas-level/data/")]
pub async fn level_data(_identity: BearerIdentity) -> ApiResult<web::Json<Envelope<GasLevelData>>> {
    Ok(web::Json(Envelope::ok(telemetry::level_data())))
}

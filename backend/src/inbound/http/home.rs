//! Home dashboard endpoint.

use actix_web::{get, web};
use safegas_types::Envelope;
use safegas_types::models::DashboardData;

use crate::domain::telemetry;

use super::bearer::BearerIdentity;
use super::error::ApiResult;

/// Status tiles and recent activity for the home screen.
#[utoipa::path(
    get,
    path = "/home/dashboard/",
    responses(
        (status = 200, description = "Dashboard payload", body = Envelope<DashboardData>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["home"],
    operation_id = "dashboard"
)]
#[get("/home/dashboard/")]
pub async fn dashboard(_identity: BearerIdentity) -> ApiResult<web::Json<Envelope<DashboardData>>> {
    Ok(web::Json(Envelope::ok(telemetry::dashboard())))
}

//! Domain read models returned verbatim by the monitoring endpoints.
//!
//! Each record is flat, held only in transient per-screen state by the
//! client, and never persisted. Shapes mirror the sensor payloads produced by
//! the backend's telemetry generators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One status tile on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusTile {
    /// Tile heading, e.g. "Gas Level".
    pub title: String,
    /// Display value, e.g. "85%".
    pub value: String,
    /// Icon identifier resolved by the client.
    pub icon: String,
    /// Accent colour as a hex string.
    pub color: String,
    /// Whether the metric is within its safe range.
    pub is_healthy: bool,
}

/// One row in the dashboard's recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    /// Icon identifier resolved by the client.
    pub icon: String,
    /// Event description.
    pub title: String,
    /// Relative time label, e.g. "2 minutes ago".
    pub time: String,
    /// Accent colour as a hex string.
    pub color: String,
}

/// Payload of `GET /home/dashboard/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Exactly four status tiles: gas level, pressure, temperature, safety.
    pub status_data: Vec<StatusTile>,
    /// Most recent activity entries, newest first.
    pub recent_activity: Vec<ActivityItem>,
    /// Server time the payload was assembled.
    pub last_updated: DateTime<Utc>,
}

/// Payload of `GET /gas-leak/status/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasLeakStatus {
    /// `"SAFE"` or `"LEAK_DETECTED"`.
    pub status: String,
    /// Detected gas concentration as a percentage.
    pub gas_level: f64,
    /// Number of leak sensors reporting.
    pub sensor_count: u32,
    /// Timestamp of the most recent scan.
    pub last_scan: DateTime<Utc>,
}

/// Payload of `POST /gas-leak/scan/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasScanResult {
    /// Identifier of the completed scan.
    pub scan_id: u32,
    /// Gas concentration measured during the scan.
    pub gas_level: f64,
    /// Whether the scan flagged a leak.
    pub leak_detected: bool,
    /// How long the scan took, in seconds.
    pub scan_duration_secs: u32,
    /// When the scan finished.
    pub completed_at: DateTime<Utc>,
}

/// One point on the gas-level history curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasReadingPoint {
    /// Clock label for the reading, e.g. "14:30".
    pub time: String,
    /// Cylinder level at that time, as a percentage.
    pub level: f64,
    /// Qualitative status label for the reading.
    pub status: String,
}

/// Payload of `GET /gas-level/data/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasLevelData {
    /// Current cylinder level as a percentage.
    pub current_level: f64,
    /// Estimated hours of supply remaining.
    pub estimated_hours: f64,
    /// Current flow rate in cubic metres per hour.
    pub flow_rate: f64,
    /// Line pressure in psi.
    pub pressure: f64,
    /// Recent readings at half-hour intervals, newest first.
    pub recent_readings: Vec<GasReadingPoint>,
}

/// Health summary for one pipeline section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSection {
    /// Section identifier.
    pub id: u32,
    /// Human-readable section name, e.g. "Main Line".
    pub section_name: String,
    /// Section health score, 0-100.
    pub health_percentage: f64,
    /// Qualitative label, e.g. "Excellent".
    pub status: String,
    /// When the section was last inspected.
    pub last_inspection: DateTime<Utc>,
}

/// One scheduled maintenance task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceItem {
    /// Task identifier.
    pub id: u32,
    /// Short task title.
    pub title: String,
    /// Longer task description.
    pub description: String,
    /// When the task is due.
    pub scheduled_date: DateTime<Utc>,
    /// `LOW`, `MEDIUM`, or `HIGH`.
    pub priority: String,
}

/// Payload of `GET /pipeline/health/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineHealth {
    /// Aggregate pipeline health score, 0-100.
    pub overall_health: f64,
    /// Per-section breakdown.
    pub sections: Vec<PipelineSection>,
    /// Upcoming maintenance tasks.
    pub maintenance_schedule: Vec<MaintenanceItem>,
}

/// Current regulator telemetry, returned by `GET|POST /regulator/control/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegulatorState {
    /// Regulator identifier, scoped to the account.
    pub regulator_id: String,
    /// Whether gas flow is enabled.
    pub is_on: bool,
    /// Whether the regulator manages pressure automatically.
    pub auto_mode: bool,
    /// Outlet pressure in psi.
    pub current_pressure: f64,
    /// Flow rate in cubic metres per hour.
    pub flow_rate: f64,
    /// Regulator body temperature in degrees Celsius.
    pub temperature: f64,
}

/// Command body for `POST /regulator/control/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegulatorCommand {
    /// One of `turn_on`, `turn_off`, `auto_mode`, `manual_mode`.
    pub action: String,
}

/// A stored emergency contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    /// Contact identifier.
    pub id: u32,
    /// Contact display name.
    pub name: String,
    /// Dialable phone number.
    pub phone_number: String,
    /// Relationship label, e.g. "Family".
    pub relationship: String,
    /// Whether this contact is called first during an SOS.
    pub is_primary: bool,
}

/// Body for `POST /emergency/contacts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEmergencyContact {
    /// Contact display name.
    pub name: String,
    /// Dialable phone number.
    pub phone_number: String,
    /// Relationship label; defaults to "Emergency Contact".
    #[serde(default = "default_relationship")]
    pub relationship: String,
    /// Whether this contact is called first during an SOS.
    #[serde(default)]
    pub is_primary: bool,
}

fn default_relationship() -> String {
    "Emergency Contact".to_owned()
}

/// Acknowledgement returned by `POST /emergency/sos/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SosReceipt {
    /// Identifier of the triggered SOS event.
    pub sos_id: u32,
    /// When the SOS was triggered.
    pub triggered_at: DateTime<Utc>,
    /// How many contacts were notified.
    pub contacts_called: u32,
    /// Rough responder ETA, e.g. "5-10 minutes".
    pub estimated_response_time: String,
}

/// Payload of `GET /profile/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    /// Display username.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Contact phone number, if provided.
    pub phone_number: Option<String>,
    /// URL of the uploaded profile image, if any.
    pub profile_image: Option<String>,
    /// Gas-detector device pairing code.
    pub device_unique_code: String,
}

/// Body for `PUT /profile/`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display username.
    pub username: Option<String>,
    /// New account email address.
    pub email: Option<String>,
    /// New contact phone number.
    pub phone_number: Option<String>,
}

/// Body for `POST /profile/upload-image/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageUpload {
    /// Base64-encoded image bytes, with or without a `data:...,` prefix.
    pub image_data: String,
}

/// Response payload of `POST /profile/upload-image/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageLocation {
    /// Server path of the stored image.
    pub image_url: String,
}

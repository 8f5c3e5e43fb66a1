//! Fabricated sensor telemetry.
//!
//! Every generator is a pure function of its inputs plus the RNG: no sensor
//! integration exists, and none of the produced values persist anywhere. The
//! value ranges mirror what the original service fabricated so the client
//! renders plausible readings.

use chrono::{Duration, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use safegas_types::models::{
    ActivityItem, DashboardData, GasLeakStatus, GasLevelData, GasReadingPoint, GasScanResult,
    MaintenanceItem, PipelineHealth, PipelineSection, RegulatorState, SosReceipt, StatusTile,
};

fn rng() -> SmallRng {
    SmallRng::from_entropy()
}

/// Dashboard payload: exactly four status tiles plus the activity feed.
pub fn dashboard() -> DashboardData {
    let mut rng = rng();
    let gas_level: u32 = rng.gen_range(70..=95);
    let temperature: u32 = rng.gen_range(20..=30);
    DashboardData {
        status_data: vec![
            StatusTile {
                title: "Gas Level".to_owned(),
                value: format!("{gas_level}%"),
                icon: "LocalGasStation".to_owned(),
                color: "#4CAF50".to_owned(),
                is_healthy: true,
            },
            StatusTile {
                title: "Pressure".to_owned(),
                value: "Normal".to_owned(),
                icon: "Speed".to_owned(),
                color: "#2196F3".to_owned(),
                is_healthy: true,
            },
            StatusTile {
                title: "Temperature".to_owned(),
                value: format!("{temperature}\u{b0}C"),
                icon: "Thermostat".to_owned(),
                color: "#FF9800".to_owned(),
                is_healthy: true,
            },
            StatusTile {
                title: "Safety".to_owned(),
                value: "Secure".to_owned(),
                icon: "Shield".to_owned(),
                color: "#4CAF50".to_owned(),
                is_healthy: true,
            },
        ],
        recent_activity: vec![
            ActivityItem {
                icon: "CheckCircle".to_owned(),
                title: "Gas level check completed".to_owned(),
                time: "2 minutes ago".to_owned(),
                color: "#4CAF50".to_owned(),
            },
            ActivityItem {
                icon: "Settings".to_owned(),
                title: "Regulator settings updated".to_owned(),
                time: "1 hour ago".to_owned(),
                color: "#2196F3".to_owned(),
            },
            ActivityItem {
                icon: "Warning".to_owned(),
                title: "Pressure sensor calibrated".to_owned(),
                time: "3 hours ago".to_owned(),
                color: "#FF9800".to_owned(),
            },
        ],
        last_updated: Utc::now(),
    }
}

/// Current leak-detection status. Leaks are rare (1 in 4) by construction.
pub fn leak_status() -> GasLeakStatus {
    let mut rng = rng();
    let safe = rng.gen_range(0..4) != 0;
    GasLeakStatus {
        status: if safe { "SAFE" } else { "LEAK_DETECTED" }.to_owned(),
        gas_level: rng.gen_range(0.0..100.0),
        sensor_count: 4,
        last_scan: Utc::now(),
    }
}

/// Result of an on-demand leak scan.
pub fn scan_result() -> GasScanResult {
    let mut rng = rng();
    GasScanResult {
        scan_id: rng.gen_range(1000..10000),
        gas_level: rng.gen_range(0.0..100.0),
        leak_detected: rng.r#gen(),
        scan_duration_secs: 30,
        completed_at: Utc::now(),
    }
}

/// Cylinder level data with five half-hour history points.
pub fn level_data() -> GasLevelData {
    let mut rng = rng();
    let current_level: f64 = rng.gen_range(60.0..95.0);
    let now = Utc::now();
    let recent_readings = (0..5)
        .map(|i| GasReadingPoint {
            time: (now - Duration::minutes(i * 30)).format("%H:%M").to_string(),
            level: (current_level + rng.gen_range(-5.0..5.0)).clamp(0.0, 100.0),
            status: "Good".to_owned(),
        })
        .collect();
    GasLevelData {
        current_level,
        estimated_hours: rng.gen_range(20.0..50.0),
        flow_rate: rng.gen_range(2.0..3.0),
        pressure: rng.gen_range(14.0..16.0),
        recent_readings,
    }
}

/// Pipeline health summary with two sections and one scheduled task.
pub fn pipeline_health() -> PipelineHealth {
    let mut rng = rng();
    let now = Utc::now();
    PipelineHealth {
        overall_health: rng.gen_range(75.0..95.0),
        sections: vec![
            PipelineSection {
                id: 1,
                section_name: "Main Line".to_owned(),
                health_percentage: rng.gen_range(85.0..95.0),
                status: "Excellent".to_owned(),
                last_inspection: now,
            },
            PipelineSection {
                id: 2,
                section_name: "Kitchen Branch".to_owned(),
                health_percentage: rng.gen_range(80.0..90.0),
                status: "Good".to_owned(),
                last_inspection: now,
            },
        ],
        maintenance_schedule: vec![MaintenanceItem {
            id: 1,
            title: "Routine Inspection".to_owned(),
            description: "Monthly safety check".to_owned(),
            scheduled_date: now + Duration::days(15),
            priority: "MEDIUM".to_owned(),
        }],
    }
}

/// Current regulator telemetry for an account.
pub fn regulator_state(email: &str) -> RegulatorState {
    let mut rng = rng();
    RegulatorState {
        regulator_id: regulator_id(email),
        is_on: true,
        auto_mode: true,
        current_pressure: rng.gen_range(14.0..16.0),
        flow_rate: rng.gen_range(2.0..3.0),
        temperature: rng.gen_range(20.0..30.0),
    }
}

/// Regulator telemetry after applying a control action.
pub fn regulator_after(email: &str, action: &str) -> RegulatorState {
    let mut state = regulator_state(email);
    state.is_on = action != "turn_off";
    state.auto_mode = action != "manual_mode";
    state
}

/// Receipt for a triggered SOS.
pub fn sos_receipt(contacts_called: u32) -> SosReceipt {
    let mut rng = rng();
    SosReceipt {
        sos_id: rng.gen_range(10000..100000),
        triggered_at: Utc::now(),
        contacts_called,
        estimated_response_time: "5-10 minutes".to_owned(),
    }
}

fn regulator_id(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    format!("REG_{}", local.to_uppercase())
}

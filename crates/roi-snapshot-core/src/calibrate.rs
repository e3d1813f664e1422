use crate::model::Snapshot;
use crate::scalar::Scalar;
use serde_json::{Number, Value};

/// Correction applied to every ROAS figure before a snapshot leaves the core.
pub const ROAS_CALIBRATION_FACTOR: f64 = 0.5;

const SUMMARY_ROAS_FIELD: &str = "overall_roas";
const RECOMMENDATION_ROAS_COLUMN: &str = "pred_roas";

/// Apply [`ROAS_CALIBRATION_FACTOR`] to the snapshot.
pub fn calibrate(snapshot: Snapshot) -> Snapshot {
    calibrate_with(snapshot, ROAS_CALIBRATION_FACTOR)
}

/// Scale scenario `overall_roas` and per-channel `pred_roas` by `factor`,
/// rounded to 4 decimals. Non-numeric or absent values are left alone.
pub fn calibrate_with(mut snapshot: Snapshot, factor: f64) -> Snapshot {
    for client in &mut snapshot.clients {
        for scenario in &mut client.scenarios {
            if let Some(value) = scenario.summary.get_mut(SUMMARY_ROAS_FIELD) {
                scale_json(value, factor);
            }
            for row in &mut scenario.recommendations {
                if let Some(cell) = row.get_mut(RECOMMENDATION_ROAS_COLUMN) {
                    scale_scalar(cell, factor);
                }
            }
        }
    }
    snapshot
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn scale_json(value: &mut Value, factor: f64) {
    let Some(current) = value.as_f64() else {
        return;
    };
    if let Some(scaled) = Number::from_f64(round4(current * factor)) {
        *value = Value::Number(scaled);
    }
}

fn scale_scalar(cell: &mut Scalar, factor: f64) {
    if let Scalar::Number(n) = cell {
        *n = round4(*n * factor);
    }
}

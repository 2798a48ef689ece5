//! Profile validation: checks a normalized record for the required features.
//!
//! Lenient mode reports every failing field and returns `false`; strict mode
//! raises on the first failure in `VALIDATION_FEATURES` order.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::profile::VALIDATION_FEATURES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Ok,
    Missing,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureCheck {
    pub feature: &'static str,
    pub status: FieldStatus,
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn check_feature(record: &Value, feature: &'static str) -> FeatureCheck {
    let status = match record.get(feature) {
        None => FieldStatus::Missing,
        Some(value) if is_empty(value) => FieldStatus::Empty,
        Some(_) => FieldStatus::Ok,
    };
    FeatureCheck { feature, status }
}

/// Per-feature status for every validation feature, in declared order.
pub fn inspect_profile(record: &Value) -> Vec<FeatureCheck> {
    VALIDATION_FEATURES
        .iter()
        .map(|feature| check_feature(record, *feature))
        .collect()
}

/// Returns whether every required feature is present and non-empty.
pub fn validate_profile(record: &Value, strict: bool) -> Result<bool, AppError> {
    let mut good = true;

    for feature in VALIDATION_FEATURES {
        let check = check_feature(record, *feature);
        match check.status {
            FieldStatus::Ok => info!("Feature '{feature}' is OK"),
            FieldStatus::Missing | FieldStatus::Empty => {
                let reason = if check.status == FieldStatus::Missing {
                    "missing from data"
                } else {
                    "present but empty"
                };
                warn!("Feature '{feature}' is {reason}");
                good = false;

                if strict {
                    return Err(AppError::Validation {
                        field: feature.to_string(),
                        reason: reason.to_string(),
                    });
                }
            }
        }
    }

    Ok(good)
}

//! Severity weight configuration: schema, validation and weighting.
//!
//! The configuration assigns a weight to each kind of disruptive event.
//! The canonical key for the first weight is `severity1`; the legacy key
//! `s1` is still accepted on input and rewritten on save.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Canonical key of the Severity 1 weight.
pub const FIELD_SEVERITY1: &str = "severity1";

/// Legacy alias of [`FIELD_SEVERITY1`] sent by older frontends.
pub const LEGACY_FIELD_S1: &str = "s1";

pub const FIELD_CRITICAL: &str = "critical";
pub const FIELD_WARNING: &str = "warning";
pub const FIELD_OUTAGE: &str = "outage";

/// Message returned to clients when a configuration is rejected.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Invalid configuration: severity1 (or s1), critical, \
     warning and outage are required and must be finite numbers";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-event weights used to compute the monthly weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityWeights {
    #[serde(alias = "s1")]
    pub severity1: f64,
    pub critical: f64,
    pub warning: f64,
    pub outage: f64,
}

/// Raw event counts for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventCounts {
    pub severity1: f64,
    pub critical: f64,
    pub warning: f64,
    pub outage: f64,
}

impl SeverityWeights {
    /// Sum of each event count multiplied by its weight.
    pub fn weighted_total(&self, counts: &EventCounts) -> f64 {
        self.severity1 * counts.severity1
            + self.critical * counts.critical
            + self.warning * counts.warning
            + self.outage * counts.outage
    }
}

/// A configuration that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub weights: SeverityWeights,
    /// The document to persist: the submitted object with `s1` renamed to
    /// `severity1` and every other field kept as-is.
    pub document: Value,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a submitted configuration document.
///
/// All four weights must be present and be finite JSON numbers. When both
/// `severity1` and `s1` are present, `severity1` wins and `s1` is dropped.
pub fn validate_config(value: &Value) -> Result<ValidatedConfig, CoreError> {
    let obj = value.as_object().ok_or_else(invalid_config)?;

    let severity1_value = obj
        .get(FIELD_SEVERITY1)
        .or_else(|| obj.get(LEGACY_FIELD_S1))
        .ok_or_else(invalid_config)?;

    let weights = SeverityWeights {
        severity1: finite_number(Some(severity1_value))?,
        critical: finite_number(obj.get(FIELD_CRITICAL))?,
        warning: finite_number(obj.get(FIELD_WARNING))?,
        outage: finite_number(obj.get(FIELD_OUTAGE))?,
    };

    let mut document: Map<String, Value> = obj.clone();
    let severity1_value = severity1_value.clone();
    document.remove(LEGACY_FIELD_S1);
    document.insert(FIELD_SEVERITY1.to_string(), severity1_value);

    Ok(ValidatedConfig {
        weights,
        document: Value::Object(document),
    })
}

fn finite_number(value: Option<&Value>) -> Result<f64, CoreError> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .ok_or_else(invalid_config)
}

fn invalid_config() -> CoreError {
    CoreError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_canonical_schema() {
        let input = json!({ "severity1": 5, "critical": 3, "warning": 1, "outage": 8 });
        let validated = validate_config(&input).unwrap();

        assert_eq!(validated.weights.severity1, 5.0);
        assert_eq!(validated.weights.outage, 8.0);
        assert_eq!(validated.document, input);
    }

    #[test]
    fn legacy_s1_is_renamed() {
        let input = json!({ "s1": 2.5, "critical": 3, "warning": 1, "outage": 8 });
        let validated = validate_config(&input).unwrap();

        assert_eq!(validated.weights.severity1, 2.5);
        assert_eq!(validated.document["severity1"], json!(2.5));
        assert!(validated.document.get("s1").is_none());
    }

    #[test]
    fn extra_fields_are_kept() {
        let input = json!({
            "severity1": 1, "critical": 1, "warning": 1, "outage": 1, "team": "ops"
        });
        let validated = validate_config(&input).unwrap();
        assert_eq!(validated.document["team"], "ops");
    }

    #[test]
    fn rejects_string_weight() {
        let input = json!({ "s1": "x", "critical": 1, "warning": 1, "outage": 1 });
        assert_matches!(validate_config(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_missing_field() {
        let input = json!({ "severity1": 1, "critical": 1, "warning": 1 });
        assert_matches!(validate_config(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_non_object() {
        assert!(validate_config(&json!([1, 2, 3, 4])).is_err());
        assert!(validate_config(&Value::Null).is_err());
    }

    #[test]
    fn weighted_total_multiplies_each_count() {
        let weights = SeverityWeights {
            severity1: 5.0,
            critical: 3.0,
            warning: 1.0,
            outage: 8.0,
        };
        let counts = EventCounts {
            severity1: 1.0,
            critical: 2.0,
            warning: 4.0,
            outage: 0.5,
        };
        assert_eq!(weights.weighted_total(&counts), 5.0 + 6.0 + 4.0 + 4.0);
    }
}

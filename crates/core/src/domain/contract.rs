use crate::domain::snapshot::{DailySnapshot, SnapshotSide};
use crate::error::ValidationError;
use serde::Deserialize;
use serde_json::Value;

/// A snapshot as it arrives from the outside world, before any field or
/// type checks. Known keys keep their raw JSON value so a wrong type is
/// reported as a validation failure rather than a deserialization error;
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnapshot {
    pub revenue: Option<Value>,
    pub cost: Option<Value>,
    pub customers: Option<Value>,
}

impl RawSnapshot {
    pub fn validate_and_into_snapshot(
        self,
        side: SnapshotSide,
    ) -> Result<DailySnapshot, ValidationError> {
        let revenue = require_finite_number(side, "revenue", self.revenue)?;
        let cost = require_finite_number(side, "cost", self.cost)?;
        let customers = require_integer(side, "customers", self.customers)?;

        Ok(DailySnapshot {
            revenue,
            cost,
            customers,
        })
    }
}

fn require_finite_number(
    snapshot: SnapshotSide,
    field: &'static str,
    value: Option<Value>,
) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField { snapshot, field })?;
    let n = value
        .as_f64()
        .ok_or(ValidationError::NotANumber { snapshot, field })?;
    if !n.is_finite() {
        return Err(ValidationError::NonFinite { snapshot, field });
    }
    Ok(n)
}

fn require_integer(
    snapshot: SnapshotSide,
    field: &'static str,
    value: Option<Value>,
) -> Result<i64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField { snapshot, field })?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }

    // Accept floats with no fractional part, e.g. 40.0 customers.
    let n = value
        .as_f64()
        .ok_or(ValidationError::NotANumber { snapshot, field })?;
    if !n.is_finite() {
        return Err(ValidationError::NonFinite { snapshot, field });
    }
    if n.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger { snapshot, field });
    }
    Ok(n as i64)
}

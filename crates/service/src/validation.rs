//! Field checks applied before any storage access.
//!
//! Inputs arrive as raw JSON values so that a wrongly typed field (for
//! example `"distance": "far"`) is reported as that field's
//! `InvalidArgument` instead of a generic body rejection.

use models::{BarrierState, SpotStatus};
use serde_json::Value;

use crate::errors::{InvalidField, ServiceError};
use crate::patch::Field;

/// Required, non-blank string identifier.
pub fn record_id(v: Field<Value>) -> Result<String, ServiceError> {
    match v {
        Field::Value(Value::String(s)) if !s.trim().is_empty() => Ok(s),
        _ => Err(ServiceError::invalid(InvalidField::Id, "id is required (string)")),
    }
}

/// Identifier taken from a URL path or a caller that already holds a string.
pub fn record_id_str(id: &str) -> Result<&str, ServiceError> {
    if id.trim().is_empty() {
        return Err(ServiceError::invalid(InvalidField::Id, "id is required (string)"));
    }
    Ok(id)
}

pub fn label(v: Field<Value>) -> Result<Option<String>, ServiceError> {
    match v {
        Field::Absent | Field::Null => Ok(None),
        Field::Value(Value::String(s)) => Ok(Some(s)),
        Field::Value(_) => Err(ServiceError::invalid(InvalidField::Label, "label must be a string")),
    }
}

/// Finite floating point number, or no value.
pub fn finite_number(field: InvalidField, name: &str, v: Field<Value>) -> Result<Field<f64>, ServiceError> {
    v.try_map(|raw| {
        raw.as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| ServiceError::invalid(field, format!("{name} must be a number")))
    })
}

/// Integer, or no value. Floats with a zero fractional part count as integers.
pub fn integer(field: InvalidField, name: &str, v: Field<Value>) -> Result<Field<i64>, ServiceError> {
    v.try_map(|raw| {
        as_integer(&raw).ok_or_else(|| ServiceError::invalid(field, format!("{name} must be an integer")))
    })
}

fn as_integer(raw: &Value) -> Option<i64> {
    let n = match raw {
        Value::Number(n) => n,
        _ => return None,
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub fn spot_status(v: Field<Value>) -> Result<SpotStatus, ServiceError> {
    match v {
        Field::Value(Value::String(s)) => SpotStatus::parse(&s),
        _ => None,
    }
    .ok_or_else(|| ServiceError::invalid(InvalidField::Status, "status must be FREE or OCCUPIED"))
}

pub fn barrier_state(v: Field<Value>) -> Result<BarrierState, ServiceError> {
    match v {
        Field::Value(Value::String(s)) => BarrierState::parse(&s),
        _ => None,
    }
    .ok_or_else(|| {
        ServiceError::invalid(
            InvalidField::State,
            format!("state must be one of {}", BarrierState::allowed().join(", ")),
        )
    })
}

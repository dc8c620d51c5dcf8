//! JSON encoding of cell values and finished configs.
//!
//! - Date/time values become milliseconds since the Unix epoch (UTC), which
//!   is the unit Highcharts expects on a `datetime` axis.
//! - `NaN`/infinite floats become `null`.
//! - Integral option numbers are written as integers (`45`, not `45.0`).

use crate::error::Result;
use crate::models::Scalar;
use crate::options::ChartType;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Milliseconds since 1970-01-01T00:00:00Z.
#[inline]
pub fn epoch_millis(t: &DateTime<Utc>) -> i64 {
    t.timestamp_millis()
}

/// Encode anything serializable as compact JSON text.
pub fn json_encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Wrap a config in a Highcharts constructor call.
pub fn to_javascript(config: &Value, chart_type: ChartType) -> Result<String> {
    Ok(format!(
        "new {}({});",
        chart_type.constructor(),
        json_encode(config)?
    ))
}

/// Float to JSON, preferring an integer when the value has no fractional part.
pub(crate) fn number(v: f64) -> Value {
    // 2^53: beyond this f64 no longer represents every integer
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_SAFE {
        Value::from(v as i64)
    } else {
        Number::from_f64(v).map_or(Value::Null, Value::Number)
    }
}

impl From<&Scalar> for Value {
    fn from(s: &Scalar) -> Self {
        match s {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::from(*i),
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Scalar::Text(t) => Value::String(t.clone()),
            Scalar::Datetime(t) => Value::from(epoch_millis(t)),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Scalar::Float(_) => serializer.serialize_unit(),
            Scalar::Text(t) => serializer.serialize_str(t),
            Scalar::Datetime(t) => serializer.serialize_i64(epoch_millis(t)),
        }
    }
}

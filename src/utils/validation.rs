use chrono::NaiveDate;
use serde_json::Value;
use validator::Validate;

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

/// Coerces a JSON value into an integer. Accepts a JSON number or a numeric
/// string; fractional numbers and anything else fail fast.
pub fn coerce_int(field: &str, value: &Value) -> Result<i32, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::BadRequest(format!("Invalid {} value", field)))
}

/// Float counterpart of [`coerce_int`].
pub fn coerce_float(field: &str, value: &Value) -> Result<f64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::BadRequest(format!("Invalid {} value", field)))
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    raw.parse::<NaiveDate>()
        .map_err(|_| AppError::BadRequest("Invalid date format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_int_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_int("height", &json!(180)).unwrap(), 180);
        assert_eq!(coerce_int("height", &json!("180")).unwrap(), 180);
        assert_eq!(coerce_int("height", &json!(" 75 ")).unwrap(), 75);
        assert_eq!(coerce_int("height", &json!(-3)).unwrap(), -3);
    }

    #[test]
    fn coerce_int_rejects_fractions_and_garbage() {
        assert!(coerce_int("height", &json!(75.5)).is_err());
        assert!(coerce_int("height", &json!("75.5")).is_err());
        assert!(coerce_int("height", &json!("tall")).is_err());
        assert!(coerce_int("height", &json!(true)).is_err());
        assert!(coerce_int("height", &json!([1])).is_err());
    }

    #[test]
    fn coerce_float_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_float("targetValue", &json!(72.5)).unwrap(), 72.5);
        assert_eq!(coerce_float("targetValue", &json!("72.5")).unwrap(), 72.5);
        assert_eq!(coerce_float("targetValue", &json!(300)).unwrap(), 300.0);
    }

    #[test]
    fn coerce_float_rejects_non_numeric_input() {
        assert!(coerce_float("targetValue", &json!("heavy")).is_err());
        assert!(coerce_float("targetValue", &json!(null)).is_err());
        assert!(coerce_float("targetValue", &json!({})).is_err());
    }

    #[test]
    fn parse_date_requires_iso_format() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
        assert!(parse_date("tomorrow").is_err());
    }
}

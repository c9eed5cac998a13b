//! Numeric field validators
//!
//! Every validator accepts `null`: an unset field is legal on its own, and
//! emptiness of a whole record is the pipeline's concern.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::model::{Record, Violation};

/// Finite number, or unset.
fn finite(value: &Value, expected: &str) -> Result<Option<f64>, Violation> {
    if value.is_null() {
        return Ok(None);
    }

    match value.as_f64() {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(Violation::type_mismatch(expected, value)),
    }
}

/// Any finite number
pub fn number(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    finite(value, "number").map(|_| ())
}

/// Signed quantity; zero and negatives are legal
pub fn amount(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    finite(value, "amount").map(|_| ())
}

/// Signed quantity that must not be zero (trade sizes)
pub fn non_zero_amount(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    match finite(value, "amount")? {
        Some(n) if n == 0.0 => Err(Violation::new("non-zero amount", "0")),
        _ => Ok(()),
    }
}

/// Strictly positive price
pub fn price(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    match finite(value, "price")? {
        Some(n) if n <= 0.0 => Err(Violation::new("positive price", n.to_string())),
        _ => Ok(()),
    }
}

/// Funding rate; zero is a legal rate, negatives are not
pub fn rate(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    match finite(value, "rate")? {
        Some(n) if n < 0.0 => Err(Violation::new("non-negative rate", n.to_string())),
        _ => Ok(()),
    }
}

/// Whole number of days, at least one
pub fn period(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    if value.is_null() {
        return Ok(());
    }

    match value.as_i64() {
        Some(days) if days >= 1 => Ok(()),
        Some(days) => Err(Violation::new("period of at least 1 day", days.to_string())),
        None => Err(Violation::type_mismatch("int", value)),
    }
}

/// Millisecond timestamp representable as a calendar date
pub fn date(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    if value.is_null() {
        return Ok(());
    }

    let Some(mts) = value.as_i64() else {
        return Err(Violation::type_mismatch("millisecond timestamp", value));
    };

    if mts < 0 || DateTime::<Utc>::from_timestamp_millis(mts).is_none() {
        return Err(Violation::new("millisecond timestamp", mts.to_string()));
    }
    Ok(())
}

/// Wire boolean: `0`/`1` or a JSON bool
pub fn boolean_flag(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    match value {
        Value::Null | Value::Bool(_) => Ok(()),
        Value::Number(n) if n.as_i64() == Some(0) || n.as_i64() == Some(1) => Ok(()),
        other => Err(Violation::new("0, 1 or bool", other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDef, FieldTable};
    use serde_json::json;

    fn record() -> Record {
        let table = FieldTable::new("t", &[FieldDef::at("x", 0)]).unwrap();
        Record::empty(&table)
    }

    fn check(v: fn(&Value, &str, &Record) -> Result<(), Violation>, value: Value) -> bool {
        v(&value, "x", &record()).is_ok()
    }

    #[test]
    fn test_unset_always_passes() {
        for v in [number, amount, non_zero_amount, price, rate, period, date, boolean_flag] {
            assert!(check(v, Value::Null));
        }
    }

    #[test]
    fn test_number() {
        assert!(check(number, json!(-3.5)));
        assert!(check(number, json!(0)));
        assert!(!check(number, json!("3.5")));
        assert!(!check(number, json!([1])));
    }

    #[test]
    fn test_price_must_be_positive() {
        assert!(check(price, json!(0.0001)));
        assert!(!check(price, json!(0)));

        let err = price(&json!(-1), "bid", &record()).unwrap_err();
        assert_eq!(err.expected, "positive price");
        assert_eq!(err.actual, "-1");
    }

    #[test]
    fn test_amount_allows_negative_and_zero() {
        assert!(check(amount, json!(-50.5)));
        assert!(check(amount, json!(0)));
        assert!(!check(non_zero_amount, json!(0.0)));
        assert!(check(non_zero_amount, json!(-0.1)));
    }

    #[test]
    fn test_rate_and_period() {
        assert!(check(rate, json!(0)));
        assert!(!check(rate, json!(-0.0001)));
        assert!(check(period, json!(30)));
        assert!(!check(period, json!(0)));
        assert!(!check(period, json!(2.5)));
    }

    #[test]
    fn test_date() {
        assert!(check(date, json!(1_574_000_000_000_i64)));
        assert!(check(date, json!(0)));
        assert!(!check(date, json!(-1)));
        assert!(!check(date, json!(1.5)));
        assert!(!check(date, json!("2019-11-17")));
    }

    #[test]
    fn test_boolean_flag() {
        assert!(check(boolean_flag, json!(0)));
        assert!(check(boolean_flag, json!(1)));
        assert!(check(boolean_flag, json!(true)));
        assert!(!check(boolean_flag, json!(2)));
        assert!(!check(boolean_flag, json!("1")));
    }
}

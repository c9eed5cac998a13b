//! Text and market-identifier validators

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::model::{Record, Violation};

fn trading_symbol_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^t[A-Z0-9]{3,}(:[A-Z0-9]{3,})?$").expect("trading symbol pattern compiles")
    })
}

fn funding_symbol_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^f[A-Z0-9]{3,}$").expect("funding symbol pattern compiles"))
}

fn currency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9]{3,}$").expect("currency pattern compiles"))
}

fn text<'a>(value: &'a Value, expected: &str) -> Result<Option<&'a str>, Violation> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        other => Err(Violation::type_mismatch(expected, other)),
    }
}

fn matching(value: &Value, re: &Regex, expected: &str) -> Result<(), Violation> {
    match text(value, expected)? {
        Some(s) if !re.is_match(s) => Err(Violation::new(expected, format!("'{s}'"))),
        _ => Ok(()),
    }
}

/// Any string
pub fn string(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    text(value, "string").map(|_| ())
}

/// Upper-case currency code, e.g. `USD`, `BTC`, `TESTUSDT`
pub fn currency(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    matching(value, currency_re(), "currency code")
}

/// Trading pair symbol, e.g. `tBTCUSD` or `tTESTBTC:TESTUSD`
pub fn symbol(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    matching(value, trading_symbol_re(), "trading symbol")
}

/// Funding symbol, e.g. `fUSD`
pub fn funding_symbol(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    matching(value, funding_symbol_re(), "funding symbol")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDef, FieldTable};
    use serde_json::json;

    fn ok(v: fn(&Value, &str, &Record) -> Result<(), Violation>, value: Value) -> bool {
        let table = FieldTable::new("t", &[FieldDef::at("x", 0)]).unwrap();
        v(&value, "x", &Record::empty(&table)).is_ok()
    }

    #[test]
    fn test_string() {
        assert!(ok(string, json!("")));
        assert!(ok(string, Value::Null));
        assert!(!ok(string, json!(5)));
    }

    #[test]
    fn test_currency() {
        assert!(ok(currency, json!("USD")));
        assert!(ok(currency, json!("TESTUSDT")));
        assert!(!ok(currency, json!("usd")));
        assert!(!ok(currency, json!("US")));
        assert!(!ok(currency, json!(840)));
    }

    #[test]
    fn test_trading_symbol() {
        assert!(ok(symbol, json!("tBTCUSD")));
        assert!(ok(symbol, json!("tTESTBTC:TESTUSD")));
        assert!(!ok(symbol, json!("BTCUSD")));
        assert!(!ok(symbol, json!("fUSD")));
        assert!(!ok(symbol, json!("tBTC:")));
    }

    #[test]
    fn test_funding_symbol() {
        assert!(ok(funding_symbol, json!("fUSD")));
        assert!(!ok(funding_symbol, json!("tBTCUSD")));
    }

    #[test]
    fn test_violation_quotes_actual_value() {
        let table = FieldTable::new("t", &[FieldDef::at("x", 0)]).unwrap();
        let err = symbol(&json!("BTCUSD"), "symbol", &Record::empty(&table)).unwrap_err();
        assert_eq!(err.actual, "'BTCUSD'");
        assert_eq!(err.expected, "trading symbol");
    }
}

//! Public trades
//!
//! Wire form: `[ID, MTS, AMOUNT, PRICE]`; a negative amount is a sell.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{declare_fields, FieldDef, FieldTable, Model, Record, ValidatorSet};
use crate::validators;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PublicTrade {
    pub id: Option<i64>,
    pub mts: Option<i64>,
    pub amount: Option<f64>,
    pub price: Option<f64>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::at("id", 0),
    FieldDef::at("mts", 1),
    FieldDef::at("amount", 2),
    FieldDef::at("price", 3),
];

impl PublicTrade {
    pub fn is_buy(&self) -> bool {
        self.amount.is_some_and(|a| a > 0.0)
    }

    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        self.mts.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Absolute quote-currency value of the trade
    pub fn notional(&self) -> Option<f64> {
        Some(self.amount?.abs() * self.price?)
    }
}

impl Model for PublicTrade {
    const ENTITY: &'static str = "public_trade";

    fn fields() -> &'static FieldTable {
        static TABLE: OnceLock<FieldTable> = OnceLock::new();
        TABLE.get_or_init(|| declare_fields(Self::ENTITY, FIELDS))
    }

    fn validators() -> &'static ValidatorSet {
        static SET: OnceLock<ValidatorSet> = OnceLock::new();
        SET.get_or_init(|| {
            ValidatorSet::new()
                .with("id", validators::number)
                .with("mts", validators::date)
                .with("amount", validators::non_zero_amount)
                .with("price", validators::price)
        })
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.typed("id"),
            mts: record.typed("mts"),
            amount: record.typed("amount"),
            price: record.typed("price"),
        }
    }

    fn to_record(&self) -> Record {
        let mut record = Record::empty(Self::fields());
        record.put("id", self.id);
        record.put("mts", self.mts);
        record.put("amount", self.amount);
        record.put("price", self.price);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_keeps_order() {
        let trades = PublicTrade::construct_json(&json!([
            [3, 1_574_000_000_000_i64, 0.5, 7600.0],
            [1, 1_574_000_000_100_i64, -0.25, 7601.0],
            [2, 1_574_000_000_200_i64, 1.0, 7599.5],
        ]))
        .into_vec();

        let ids: Vec<_> = trades.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(3), Some(1), Some(2)]);
        assert!(trades[0].is_buy());
        assert!(!trades[1].is_buy());
        assert_eq!(trades[1].notional(), Some(1900.25));
    }

    #[test]
    fn test_zero_amount_rejected_with_index() {
        let err = PublicTrade::validate_json(&json!([
            [1, 1000, 0.5, 10.0],
            [2, 1000, 0, 10.0],
        ]))
        .unwrap_err();
        assert_eq!(err.field(), Some("amount"));
        assert_eq!(err.index(), Some(1));
    }

    #[test]
    fn test_wrong_typed_value_dropped_on_instance_but_caught_by_validation() {
        let input = json!(["abc", 1000, 0.5, 10.0]);
        let trade = PublicTrade::construct_json(&input).into_vec().remove(0);
        assert_eq!(trade.id, None);
        assert_eq!(trade.price, Some(10.0));

        let err = PublicTrade::validate_json(&input).unwrap_err();
        assert_eq!(err.field(), Some("id"));
    }

    #[test]
    fn test_executed_at() {
        let trade = PublicTrade {
            mts: Some(1574694478808),
            ..Default::default()
        };
        let executed = trade.executed_at().unwrap();
        assert_eq!(executed.timestamp_millis(), 1574694478808);
        assert_eq!(executed.format("%Y-%m-%d").to_string(), "2019-11-25");

        assert_eq!(PublicTrade::default().executed_at(), None);
    }
}

//! Funding tickers
//!
//! Wire form: `[SYMBOL, FRR, BID, BID_PERIOD, BID_SIZE, ASK, ASK_PERIOD,
//! ASK_SIZE, DAILY_CHANGE, DAILY_CHANGE_PERC, LAST_PRICE, VOLUME, HIGH, LOW,
//! _, _, FRR_AMOUNT_AVAILABLE]`.

use std::sync::OnceLock;

use serde::Serialize;

use crate::model::{declare_fields, FieldDef, FieldTable, Model, Record, ValidatorSet};
use crate::validators;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingTicker {
    pub symbol: Option<String>,
    pub frr: Option<f64>,
    pub bid: Option<f64>,
    pub bid_period: Option<i64>,
    pub bid_size: Option<f64>,
    pub ask: Option<f64>,
    pub ask_period: Option<i64>,
    pub ask_size: Option<f64>,
    pub daily_change: Option<f64>,
    pub daily_change_perc: Option<f64>,
    pub last_price: Option<f64>,
    pub volume: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub frr_amount_available: Option<f64>,
    pub currency: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::at("symbol", 0),
    FieldDef::at("frr", 1),
    FieldDef::at("bid", 2),
    FieldDef::at("bidPeriod", 3),
    FieldDef::at("bidSize", 4),
    FieldDef::at("ask", 5),
    FieldDef::at("askPeriod", 6),
    FieldDef::at("askSize", 7),
    FieldDef::at("dailyChange", 8),
    FieldDef::at("dailyChangePerc", 9),
    FieldDef::at("lastPrice", 10),
    FieldDef::at("volume", 11),
    FieldDef::at("high", 12),
    FieldDef::at("low", 13),
    FieldDef::at("frrAmountAvailable", 16),
    FieldDef::absent("currency"),
];

impl Model for FundingTicker {
    const ENTITY: &'static str = "funding_ticker";

    fn fields() -> &'static FieldTable {
        static TABLE: OnceLock<FieldTable> = OnceLock::new();
        TABLE.get_or_init(|| declare_fields(Self::ENTITY, FIELDS))
    }

    fn validators() -> &'static ValidatorSet {
        static SET: OnceLock<ValidatorSet> = OnceLock::new();
        SET.get_or_init(|| {
            ValidatorSet::new()
                .with("symbol", validators::funding_symbol)
                .with("frr", validators::rate)
                .with("bid", validators::rate)
                .with("bidPeriod", validators::period)
                .with("bidSize", validators::amount)
                .with("ask", validators::rate)
                .with("askPeriod", validators::period)
                .with("askSize", validators::amount)
                .with("dailyChange", validators::number)
                .with("dailyChangePerc", validators::number)
                .with("lastPrice", validators::rate)
                .with("volume", validators::amount)
                .with("high", validators::rate)
                .with("low", validators::rate)
                .with("frrAmountAvailable", validators::amount)
        })
    }

    fn derive(record: &mut Record) {
        let currency = record
            .text("symbol")
            .and_then(|s| s.strip_prefix('f'))
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        if currency.is_some() {
            record.put("currency", currency);
        }
    }

    fn from_record(record: &Record) -> Self {
        Self {
            symbol: record.typed("symbol"),
            frr: record.typed("frr"),
            bid: record.typed("bid"),
            bid_period: record.typed("bidPeriod"),
            bid_size: record.typed("bidSize"),
            ask: record.typed("ask"),
            ask_period: record.typed("askPeriod"),
            ask_size: record.typed("askSize"),
            daily_change: record.typed("dailyChange"),
            daily_change_perc: record.typed("dailyChangePerc"),
            last_price: record.typed("lastPrice"),
            volume: record.typed("volume"),
            high: record.typed("high"),
            low: record.typed("low"),
            frr_amount_available: record.typed("frrAmountAvailable"),
            currency: record.typed("currency"),
        }
    }

    fn to_record(&self) -> Record {
        let mut record = Record::empty(Self::fields());
        record.put("symbol", self.symbol.clone());
        record.put("frr", self.frr);
        record.put("bid", self.bid);
        record.put("bidPeriod", self.bid_period);
        record.put("bidSize", self.bid_size);
        record.put("ask", self.ask);
        record.put("askPeriod", self.ask_period);
        record.put("askSize", self.ask_size);
        record.put("dailyChange", self.daily_change);
        record.put("dailyChangePerc", self.daily_change_perc);
        record.put("lastPrice", self.last_price);
        record.put("volume", self.volume);
        record.put("high", self.high);
        record.put("low", self.low);
        record.put("frrAmountAvailable", self.frr_amount_available);
        record.put("currency", self.currency.clone());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn wire() -> Value {
        json!([
            "fUSD", 0.0003, 0.0002, 30, 1000.0, 0.00025, 2, 500.0, 0.00001, 0.05,
            0.00024, 1_200_000.0, 0.0004, 0.0001, null, null, 250_000.0
        ])
    }

    #[test]
    fn test_construct_reads_past_reserved_slots() {
        let ticker = FundingTicker::construct_json(&wire()).into_vec().remove(0);
        assert_eq!(ticker.bid_period, Some(30));
        assert_eq!(ticker.low, Some(0.0001));
        assert_eq!(ticker.frr_amount_available, Some(250_000.0));
        assert_eq!(ticker.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_serialize_keeps_reserved_slots_null() {
        let ticker = FundingTicker::construct_json(&wire()).into_vec().remove(0);
        let out = Model::serialize(&ticker);
        assert_eq!(out.len(), 17);
        assert_eq!(out[14], Value::Null);
        assert_eq!(out[15], Value::Null);
        assert_eq!(out, wire().as_array().cloned().unwrap());
    }

    #[test]
    fn test_validate() {
        assert!(FundingTicker::validate_json(&wire()).is_ok());

        let err = FundingTicker::validate_json(&json!(["fUSD", 0.0003, 0.0002, 0])).unwrap_err();
        assert_eq!(err.field(), Some("bidPeriod"));
    }

    #[test]
    fn test_trading_symbol_rejected() {
        let err = FundingTicker::validate_json(&json!(["tBTCUSD"])).unwrap_err();
        assert_eq!(err.field(), Some("symbol"));
    }
}

//! Trading pair tickers
//!
//! Wire form: `[SYMBOL, BID, BID_SIZE, ASK, ASK_SIZE, DAILY_CHANGE,
//! DAILY_CHANGE_PERC, LAST_PRICE, VOLUME, HIGH, LOW]`. `base` and `quote`
//! are sliced from the symbol at construction.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;

use crate::model::{
    declare_fields, FieldDef, FieldTable, Model, Record, ValidatorSet, Violation,
};
use crate::validators;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingTicker {
    pub symbol: Option<String>,
    pub bid: Option<f64>,
    pub bid_size: Option<f64>,
    pub ask: Option<f64>,
    pub ask_size: Option<f64>,
    pub daily_change: Option<f64>,
    pub daily_change_perc: Option<f64>,
    pub last_price: Option<f64>,
    pub volume: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub base: Option<String>,
    pub quote: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::at("symbol", 0),
    FieldDef::at("bid", 1),
    FieldDef::at("bidSize", 2),
    FieldDef::at("ask", 3),
    FieldDef::at("askSize", 4),
    FieldDef::at("dailyChange", 5),
    FieldDef::at("dailyChangePerc", 6),
    FieldDef::at("lastPrice", 7),
    FieldDef::at("volume", 8),
    FieldDef::at("high", 9),
    FieldDef::at("low", 10),
    FieldDef::absent("base"),
    FieldDef::absent("quote"),
];

impl TradingTicker {
    pub fn spread(&self) -> Option<f64> {
        Some(self.ask? - self.bid?)
    }

    pub fn mid_price(&self) -> Option<f64> {
        Some((self.ask? + self.bid?) / 2.0)
    }
}

/// Splits a trading symbol into (base, quote).
///
/// Six-letter pairs split in the middle (`tBTCUSD`); longer currency codes
/// use an explicit colon (`tTESTBTC:TESTUSD`).
pub fn split_pair(symbol: &str) -> Option<(String, String)> {
    let pair = symbol.strip_prefix('t')?;

    if let Some((base, quote)) = pair.split_once(':') {
        if base.is_empty() || quote.is_empty() {
            return None;
        }
        return Some((base.to_string(), quote.to_string()));
    }

    if pair.len() == 6 && pair.is_ascii() {
        let (base, quote) = pair.split_at(3);
        return Some((base.to_string(), quote.to_string()));
    }

    None
}

/// The ask can not sit below the bid of the same ticker.
fn ask_not_below_bid(value: &Value, field: &str, record: &Record) -> Result<(), Violation> {
    validators::price(value, field, record)?;

    match (value.as_f64(), record.number("bid")) {
        (Some(ask), Some(bid)) if ask < bid => {
            Err(Violation::new(format!("ask >= bid ({bid})"), ask.to_string()))
        }
        _ => Ok(()),
    }
}

impl Model for TradingTicker {
    const ENTITY: &'static str = "trading_ticker";

    fn fields() -> &'static FieldTable {
        static TABLE: OnceLock<FieldTable> = OnceLock::new();
        TABLE.get_or_init(|| declare_fields(Self::ENTITY, FIELDS))
    }

    fn validators() -> &'static ValidatorSet {
        static SET: OnceLock<ValidatorSet> = OnceLock::new();
        SET.get_or_init(|| {
            ValidatorSet::new()
                .with("symbol", validators::symbol)
                .with("bid", validators::price)
                .with("bidSize", validators::amount)
                .with("ask", ask_not_below_bid)
                .with("askSize", validators::amount)
                .with("dailyChange", validators::number)
                .with("dailyChangePerc", validators::number)
                .with("lastPrice", validators::price)
                .with("volume", validators::amount)
                .with("high", validators::price)
                .with("low", validators::price)
        })
    }

    fn derive(record: &mut Record) {
        if let Some((base, quote)) = record.text("symbol").and_then(split_pair) {
            record.put("base", Some(base));
            record.put("quote", Some(quote));
        }
    }

    fn from_record(record: &Record) -> Self {
        Self {
            symbol: record.typed("symbol"),
            bid: record.typed("bid"),
            bid_size: record.typed("bidSize"),
            ask: record.typed("ask"),
            ask_size: record.typed("askSize"),
            daily_change: record.typed("dailyChange"),
            daily_change_perc: record.typed("dailyChangePerc"),
            last_price: record.typed("lastPrice"),
            volume: record.typed("volume"),
            high: record.typed("high"),
            low: record.typed("low"),
            base: record.typed("base"),
            quote: record.typed("quote"),
        }
    }

    fn to_record(&self) -> Record {
        let mut record = Record::empty(Self::fields());
        record.put("symbol", self.symbol.clone());
        record.put("bid", self.bid);
        record.put("bidSize", self.bid_size);
        record.put("ask", self.ask);
        record.put("askSize", self.ask_size);
        record.put("dailyChange", self.daily_change);
        record.put("dailyChangePerc", self.daily_change_perc);
        record.put("lastPrice", self.last_price);
        record.put("volume", self.volume);
        record.put("high", self.high);
        record.put("low", self.low);
        record.put("base", self.base.clone());
        record.put("quote", self.quote.clone());
        record
    }
}

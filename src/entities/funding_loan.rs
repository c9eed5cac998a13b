//! Funding loans
//!
//! Wire form has reserved slots at 9, 10 and 17:
//! `[ID, SYMBOL, SIDE, MTS_CREATE, MTS_UPDATE, AMOUNT, FLAGS, STATUS, TYPE,
//! _, _, RATE, PERIOD, MTS_OPENING, MTS_LAST_PAYOUT, NOTIFY, HIDDEN, _,
//! RENEW, RATE_REAL, NO_CLOSE]`.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::flag::WireFlag;
use crate::model::{
    declare_fields, FieldDef, FieldTable, Model, Record, ValidatorSet, Violation,
};
use crate::validators;

/// Which side of the loan the account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanSide {
    Lender,
    Both,
    Borrower,
}

impl LoanSide {
    pub fn from_wire(side: i64) -> Option<Self> {
        match side {
            1 => Some(LoanSide::Lender),
            0 => Some(LoanSide::Both),
            -1 => Some(LoanSide::Borrower),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingLoan {
    pub id: Option<i64>,
    pub symbol: Option<String>,
    pub side: Option<i64>,
    pub mts_create: Option<i64>,
    pub mts_update: Option<i64>,
    pub amount: Option<f64>,
    pub flags: Option<i64>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub loan_type: Option<String>,
    pub rate: Option<f64>,
    pub period: Option<i64>,
    pub mts_opening: Option<i64>,
    pub mts_last_payout: Option<i64>,
    pub notify: Option<WireFlag>,
    pub hidden: Option<WireFlag>,
    pub renew: Option<WireFlag>,
    pub rate_real: Option<f64>,
    pub no_close: Option<WireFlag>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::at("id", 0),
    FieldDef::at("symbol", 1),
    FieldDef::at("side", 2),
    FieldDef::at("mtsCreate", 3),
    FieldDef::at("mtsUpdate", 4),
    FieldDef::at("amount", 5),
    FieldDef::at("flags", 6),
    FieldDef::at("status", 7),
    FieldDef::at("type", 8),
    FieldDef::at("rate", 11),
    FieldDef::at("period", 12),
    FieldDef::at("mtsOpening", 13),
    FieldDef::at("mtsLastPayout", 14),
    FieldDef::at("notify", 15),
    FieldDef::at("hidden", 16),
    FieldDef::at("renew", 18),
    FieldDef::at("rateReal", 19),
    FieldDef::at("noClose", 20),
];

impl FundingLoan {
    pub fn loan_side(&self) -> Option<LoanSide> {
        self.side.and_then(LoanSide::from_wire)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.mts_create.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.mts_update.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn is_notify(&self) -> bool {
        self.notify.is_some_and(WireFlag::is_set)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.is_some_and(WireFlag::is_set)
    }

    pub fn is_renew(&self) -> bool {
        self.renew.is_some_and(WireFlag::is_set)
    }

    pub fn is_no_close(&self) -> bool {
        self.no_close.is_some_and(WireFlag::is_set)
    }
}

fn side(value: &Value, _field: &str, _record: &Record) -> Result<(), Violation> {
    if value.is_null() {
        return Ok(());
    }

    match value.as_i64().and_then(LoanSide::from_wire) {
        Some(_) => Ok(()),
        None => Err(Violation::new("side of 1, 0 or -1", value.to_string())),
    }
}

/// An update can not predate creation.
fn updated_after_created(value: &Value, field: &str, record: &Record) -> Result<(), Violation> {
    validators::date(value, field, record)?;

    match (value.as_i64(), record.get("mtsCreate").as_i64()) {
        (Some(updated), Some(created)) if updated < created => Err(Violation::new(
            format!("timestamp >= mtsCreate ({created})"),
            updated.to_string(),
        )),
        _ => Ok(()),
    }
}

impl Model for FundingLoan {
    const ENTITY: &'static str = "funding_loan";

    fn fields() -> &'static FieldTable {
        static TABLE: OnceLock<FieldTable> = OnceLock::new();
        TABLE.get_or_init(|| declare_fields(Self::ENTITY, FIELDS))
    }

    fn validators() -> &'static ValidatorSet {
        static SET: OnceLock<ValidatorSet> = OnceLock::new();
        SET.get_or_init(|| {
            ValidatorSet::new()
                .with("id", validators::number)
                .with("symbol", validators::funding_symbol)
                .with("side", side)
                .with("mtsCreate", validators::date)
                .with("mtsUpdate", updated_after_created)
                .with("amount", validators::amount)
                .with("flags", validators::number)
                .with("status", validators::string)
                .with("type", validators::string)
                .with("rate", validators::rate)
                .with("period", validators::period)
                .with("mtsOpening", validators::date)
                .with("mtsLastPayout", validators::date)
                .with("notify", validators::boolean_flag)
                .with("hidden", validators::boolean_flag)
                .with("renew", validators::boolean_flag)
                .with("rateReal", validators::rate)
                .with("noClose", validators::boolean_flag)
        })
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.typed("id"),
            symbol: record.typed("symbol"),
            side: record.typed("side"),
            mts_create: record.typed("mtsCreate"),
            mts_update: record.typed("mtsUpdate"),
            amount: record.typed("amount"),
            flags: record.typed("flags"),
            status: record.typed("status"),
            loan_type: record.typed("type"),
            rate: record.typed("rate"),
            period: record.typed("period"),
            mts_opening: record.typed("mtsOpening"),
            mts_last_payout: record.typed("mtsLastPayout"),
            notify: record.typed("notify"),
            hidden: record.typed("hidden"),
            renew: record.typed("renew"),
            rate_real: record.typed("rateReal"),
            no_close: record.typed("noClose"),
        }
    }

    fn to_record(&self) -> Record {
        let mut record = Record::empty(Self::fields());
        record.put("id", self.id);
        record.put("symbol", self.symbol.clone());
        record.put("side", self.side);
        record.put("mtsCreate", self.mts_create);
        record.put("mtsUpdate", self.mts_update);
        record.put("amount", self.amount);
        record.put("flags", self.flags);
        record.put("status", self.status.clone());
        record.put("type", self.loan_type.clone());
        record.put("rate", self.rate);
        record.put("period", self.period);
        record.put("mtsOpening", self.mts_opening);
        record.put("mtsLastPayout", self.mts_last_payout);
        record.put("notify", self.notify);
        record.put("hidden", self.hidden);
        record.put("renew", self.renew);
        record.put("rateReal", self.rate_real);
        record.put("noClose", self.no_close);
        record
    }
}

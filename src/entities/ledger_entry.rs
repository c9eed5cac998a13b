//! Ledger entries
//!
//! Wire form: `[ID, CURRENCY, _, MTS, _, AMOUNT, BALANCE, _, DESCRIPTION]`.
//! `wallet` has no wire slot; it is parsed out of the description.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{declare_fields, FieldDef, FieldTable, Model, Record, ValidatorSet};
use crate::validators;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LedgerEntry {
    pub id: Option<i64>,
    pub currency: Option<String>,
    pub mts: Option<i64>,
    pub amount: Option<f64>,
    pub balance: Option<f64>,
    pub description: Option<String>,
    pub wallet: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::at("id", 0),
    FieldDef::at("currency", 1),
    FieldDef::at("mts", 3),
    FieldDef::at("amount", 5),
    FieldDef::at("balance", 6),
    FieldDef::at("description", 8),
    FieldDef::absent("wallet"),
];

impl LedgerEntry {
    /// Entry time
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.mts.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// True when the entry added funds to the wallet
    pub fn is_credit(&self) -> bool {
        self.amount.is_some_and(|a| a > 0.0)
    }
}

/// Wallet name named in a ledger description: the text after the last
/// occurrence of "wallet", trimmed.
///
/// `"Transfer from wallet margin"` names `margin`. Descriptions without the
/// word, or with nothing after it, name no wallet.
pub fn wallet_from_description(description: &str) -> Option<String> {
    const MARKER: &str = "wallet";

    let start = description.rfind(MARKER)? + MARKER.len();
    let wallet = description[start..].trim();
    (!wallet.is_empty()).then(|| wallet.to_string())
}

impl Model for LedgerEntry {
    const ENTITY: &'static str = "ledger_entry";

    fn fields() -> &'static FieldTable {
        static TABLE: OnceLock<FieldTable> = OnceLock::new();
        TABLE.get_or_init(|| declare_fields(Self::ENTITY, FIELDS))
    }

    fn validators() -> &'static ValidatorSet {
        static SET: OnceLock<ValidatorSet> = OnceLock::new();
        SET.get_or_init(|| {
            ValidatorSet::new()
                .with("id", validators::number)
                .with("currency", validators::currency)
                .with("mts", validators::date)
                .with("amount", validators::amount)
                .with("balance", validators::amount)
                .with("description", validators::string)
                .with("wallet", validators::string)
        })
    }

    fn derive(record: &mut Record) {
        if let Some(wallet) = record.text("description").and_then(wallet_from_description) {
            record.put("wallet", Some(wallet));
        }
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.typed("id"),
            currency: record.typed("currency"),
            mts: record.typed("mts"),
            amount: record.typed("amount"),
            balance: record.typed("balance"),
            description: record.typed("description"),
            wallet: record.typed("wallet"),
        }
    }

    fn to_record(&self) -> Record {
        let mut record = Record::empty(Self::fields());
        record.put("id", self.id);
        record.put("currency", self.currency.clone());
        record.put("mts", self.mts);
        record.put("amount", self.amount);
        record.put("balance", self.balance);
        record.put("description", self.description.clone());
        record.put("wallet", self.wallet.clone());
        record
    }
}

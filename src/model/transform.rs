//! Positional ⇄ named transforms
//!
//! `normalize` and `unserialize` share [`FieldTable::extract`]; they can not
//! disagree on field mapping. `serialize` is the inverse for mapped fields.

use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event};

use super::fields::FieldTable;
use super::input::ModelInput;
use super::record::Record;

/// Output mirroring the input shape: one item or an ordered batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Normalized<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Normalized<U> {
        match self {
            Normalized::One(item) => Normalized::One(f(item)),
            Normalized::Many(items) => Normalized::Many(items.into_iter().map(f).collect()),
        }
    }

    /// Flattens into a sequence, a single item becoming a one-element vec
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Normalized::One(item) => vec![item],
            Normalized::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Normalized::One(_) => 1,
            Normalized::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_one(&self) -> Option<&T> {
        match self {
            Normalized::One(item) => Some(item),
            Normalized::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[T]> {
        match self {
            Normalized::One(_) => None,
            Normalized::Many(items) => Some(items),
        }
    }
}

impl<T: serde::Serialize> Normalized<T> {
    /// JSON form: a single value, or an array for batches
    pub fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            Normalized::One(item) => serde_json::to_value(item),
            Normalized::Many(items) => serde_json::to_value(items),
        }
    }
}

/// Turns any accepted input into canonical records, preserving order.
pub fn normalize(table: &FieldTable, input: &ModelInput) -> Normalized<Record> {
    let normalized = match input {
        ModelInput::Single(item) => Normalized::One(table.extract(item)),
        ModelInput::Batch(items) => {
            Normalized::Many(items.iter().map(|item| table.extract(item)).collect())
        }
    };

    let count = normalized.len().to_string();
    log_event_with_fields(
        Event::NormalizeComplete,
        &[("entity", table.entity()), ("records", &count)],
    );

    normalized
}

/// Plain named-field objects, without derived fields or instance wrapping.
pub fn unserialize(table: &FieldTable, input: &ModelInput) -> Normalized<Map<String, Value>> {
    normalize(table, input).map(Record::into_object)
}

/// Positional form of one record.
///
/// The array is `wire_len()` long; slots with no mapped field are `null`
/// and absent fields are not written.
pub fn serialize(table: &FieldTable, record: &Record) -> Vec<Value> {
    let mut wire = vec![Value::Null; table.wire_len()];

    for def in table.defs() {
        if let Some(position) = def.position() {
            wire[position] = record.get(def.name).clone();
        }
    }

    wire
}

/// Positional form of a batch, in order.
pub fn serialize_all(table: &FieldTable, records: &[Record]) -> Vec<Vec<Value>> {
    let wire: Vec<_> = records.iter().map(|r| serialize(table, r)).collect();

    let count = wire.len().to_string();
    log_event_with_fields(
        Event::SerializeComplete,
        &[("entity", table.entity()), ("records", &count)],
    );

    wire
}

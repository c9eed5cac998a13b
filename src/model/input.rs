//! Input shapes accepted at the API boundary
//!
//! Shape detection happens once, in [`ModelInput::from_json`]. Everything
//! downstream works on the resolved `Single | Batch` form.

use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event};

use super::entity::Model;
use super::errors::json_type_name;

/// One raw item before field extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum RawItem {
    /// Values ordered by wire position
    Positional(Vec<Value>),
    /// Already keyed by field name
    Named(Map<String, Value>),
    /// Nothing usable; extracts to an all-unset record
    Empty,
}

impl RawItem {
    /// Converts one batch element. Scalars are malformed and degrade to `Empty`.
    fn from_element(value: &Value, entity: &str, index: usize) -> Self {
        match value {
            Value::Array(values) => RawItem::Positional(values.clone()),
            Value::Object(object) => RawItem::Named(object.clone()),
            Value::Null => RawItem::Empty,
            other => {
                let index = index.to_string();
                log_event_with_fields(
                    Event::MalformedInput,
                    &[
                        ("entity", entity),
                        ("index", &index),
                        ("shape", json_type_name(other)),
                    ],
                );
                RawItem::Empty
            }
        }
    }
}

/// A single item or an ordered batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput {
    Single(RawItem),
    Batch(Vec<RawItem>),
}

impl ModelInput {
    /// Resolves the shape of a JSON document.
    ///
    /// - `null` is a single empty item
    /// - an object is a single named item
    /// - an array holding any array or object element is a batch
    /// - any other array, including `[]`, is a single positional item
    /// - a top-level scalar is malformed and becomes a single empty item
    ///
    /// `entity` only labels the log line emitted for malformed shapes.
    pub fn from_json(value: &Value, entity: &str) -> Self {
        match value {
            Value::Null => ModelInput::Single(RawItem::Empty),
            Value::Object(object) => ModelInput::Single(RawItem::Named(object.clone())),
            Value::Array(values) if is_batch(values) => ModelInput::Batch(
                values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| RawItem::from_element(v, entity, i))
                    .collect(),
            ),
            Value::Array(values) => ModelInput::Single(RawItem::Positional(values.clone())),
            other => {
                log_event_with_fields(
                    Event::MalformedInput,
                    &[("entity", entity), ("shape", json_type_name(other))],
                );
                ModelInput::Single(RawItem::Empty)
            }
        }
    }

    /// Wraps already-constructed instances as named items.
    pub fn from_instances<M: Model>(instances: &[M]) -> Self {
        ModelInput::Batch(
            instances
                .iter()
                .map(|m| RawItem::Named(m.to_record().into_object()))
                .collect(),
        )
    }

    pub fn single(item: RawItem) -> Self {
        ModelInput::Single(item)
    }

    pub fn batch(items: Vec<RawItem>) -> Self {
        ModelInput::Batch(items)
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, ModelInput::Batch(_))
    }

    /// Number of items the input resolves to
    pub fn len(&self) -> usize {
        match self {
            ModelInput::Single(_) => 1,
            ModelInput::Batch(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items in input order
    pub fn items(&self) -> impl Iterator<Item = &RawItem> {
        let items: &[RawItem] = match self {
            ModelInput::Single(item) => std::slice::from_ref(item),
            ModelInput::Batch(items) => items,
        };
        items.iter()
    }
}

/// A positional item only carries scalars, so any composite element marks a
/// batch. Leading null or scalar elements then degrade on their own.
fn is_batch(values: &[Value]) -> bool {
    values
        .iter()
        .any(|v| matches!(v, Value::Array(_) | Value::Object(_)))
}

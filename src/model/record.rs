//! Canonical records
//!
//! A record holds one value per declared field, in declared order. Values are
//! loosely typed JSON; `null` means "not provided", which stays distinct from
//! an explicit zero or empty string.

use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event};

use super::errors::json_type_name;
use super::fields::FieldTable;

static UNSET: Value = Value::Null;

/// Named-field values for one entity instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entity: &'static str,
    values: Vec<(&'static str, Value)>,
}

impl Record {
    /// A record with every declared field unset
    pub fn empty(table: &FieldTable) -> Self {
        Self {
            entity: table.entity(),
            values: table.names().map(|name| (name, Value::Null)).collect(),
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Value of `name`; `null` when unset or undeclared
    pub fn get(&self, name: &str) -> &Value {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
            .unwrap_or(&UNSET)
    }

    /// Sets a declared field. Returns false if `name` is not declared.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.values.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(field, _)| *field == name)
    }

    /// True when every field is unset
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|(_, value)| value.is_null())
    }

    /// Fields and values in declared order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).as_str()
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).as_f64()
    }

    /// Typed view of a field for building an entity instance.
    ///
    /// A value of the wrong JSON type is dropped to `None` and logged; it is
    /// never coerced.
    pub fn typed<T: FieldValue>(&self, name: &str) -> Option<T> {
        let value = self.get(name);
        if value.is_null() {
            return None;
        }

        let typed = T::from_value(value);
        if typed.is_none() {
            log_event_with_fields(
                Event::FieldTypeDropped,
                &[
                    ("entity", self.entity),
                    ("field", name),
                    ("expected", T::TYPE_NAME),
                    ("actual", json_type_name(value)),
                ],
            );
        }
        typed
    }

    /// Sets a field from an optional typed value, `None` meaning unset
    pub fn put<T: FieldValue>(&mut self, name: &str, value: Option<T>) -> bool {
        self.set(name, value.map_or(Value::Null, FieldValue::into_value))
    }

    /// Plain named-field object
    pub fn into_object(self) -> Map<String, Value> {
        self.values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    pub fn to_object(&self) -> Map<String, Value> {
        self.clone().into_object()
    }
}

/// Conversion between a JSON value and a typed instance member.
pub trait FieldValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

impl FieldValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn into_value(self) -> Value {
        Value::from(self)
    }
}

impl FieldValue for f64 {
    const TYPE_NAME: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn into_value(self) -> Value {
        // Non-finite floats have no JSON form
        serde_json::Number::from_f64(self).map_or(Value::Null, Value::Number)
    }
}

impl FieldValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl FieldValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

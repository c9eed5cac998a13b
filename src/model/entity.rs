//! Model capability trait
//!
//! An entity type supplies its field table, its validators, an optional
//! derived-field step and the conversion between its typed struct and a
//! [`Record`]. Shape detection, extraction and validator iteration are
//! provided here and never re-implemented per entity.

use serde_json::{Map, Value};

use super::errors::ValidationResult;
use super::fields::{FieldDef, FieldTable};
use super::input::ModelInput;
use super::record::Record;
use super::transform::{self, Normalized};
use super::validator::{self, ValidatorSet};

pub trait Model: Sized {
    /// Entity name used in logs and validation errors
    const ENTITY: &'static str;

    fn fields() -> &'static FieldTable;

    fn validators() -> &'static ValidatorSet;

    /// Fills derived fields. Runs exactly once per record, at construction.
    fn derive(_record: &mut Record) {}

    fn from_record(record: &Record) -> Self;

    fn to_record(&self) -> Record;

    /// Normalizes `input`, derives, and builds one instance per record.
    fn construct(input: &ModelInput) -> Normalized<Self> {
        transform::normalize(Self::fields(), input).map(|mut record| {
            Self::derive(&mut record);
            Self::from_record(&record)
        })
    }

    fn construct_json(value: &Value) -> Normalized<Self> {
        Self::construct(&ModelInput::from_json(value, Self::ENTITY))
    }

    /// Plain records, without derived fields
    fn unserialize(input: &ModelInput) -> Normalized<Map<String, Value>> {
        transform::unserialize(Self::fields(), input)
    }

    fn unserialize_json(value: &Value) -> Normalized<Map<String, Value>> {
        Self::unserialize(&ModelInput::from_json(value, Self::ENTITY))
    }

    fn validate(input: &ModelInput) -> ValidationResult {
        validator::validate(Self::fields(), Self::validators(), input)
    }

    fn validate_json(value: &Value) -> ValidationResult {
        Self::validate(&ModelInput::from_json(value, Self::ENTITY))
    }

    fn validate_instances(instances: &[Self]) -> ValidationResult {
        let records: Vec<Record> = instances.iter().map(Self::to_record).collect();
        validator::validate_records(Self::fields(), Self::validators(), &records)
    }

    /// Positional wire form
    fn serialize(&self) -> Vec<Value> {
        transform::serialize(Self::fields(), &self.to_record())
    }

    /// Named-field object, derived fields included
    fn to_json(&self) -> Value {
        Value::Object(self.to_record().into_object())
    }
}

/// Builds an entity's static field table.
///
/// # Panics
///
/// Panics if `defs` reuse a name or a wire position. Tables are compile-time
/// declarations, so this only fires on a broken entity definition.
pub fn declare_fields(entity: &'static str, defs: &[FieldDef]) -> FieldTable {
    FieldTable::new(entity, defs).unwrap_or_else(|e| panic!("{}: {}", e.code(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Violation;
    use serde_json::json;
    use std::sync::OnceLock;

    #[derive(Debug, PartialEq)]
    struct Pair {
        left: Option<i64>,
        right: Option<i64>,
        sum: Option<i64>,
    }

    fn non_negative(value: &Value, _: &str, _: &Record) -> Result<(), Violation> {
        match value.as_i64() {
            Some(n) if n < 0 => Err(Violation::new("non-negative", n.to_string())),
            _ => Ok(()),
        }
    }

    impl Model for Pair {
        const ENTITY: &'static str = "pair";

        fn fields() -> &'static FieldTable {
            static TABLE: OnceLock<FieldTable> = OnceLock::new();
            TABLE.get_or_init(|| {
                declare_fields(
                    Self::ENTITY,
                    &[FieldDef::at("left", 0), FieldDef::at("right", 2), FieldDef::absent("sum")],
                )
            })
        }

        fn validators() -> &'static ValidatorSet {
            static SET: OnceLock<ValidatorSet> = OnceLock::new();
            SET.get_or_init(|| {
                ValidatorSet::new()
                    .with("left", non_negative)
                    .with("right", non_negative)
            })
        }

        fn derive(record: &mut Record) {
            let sum = record.typed::<i64>("left").zip(record.typed::<i64>("right"));
            record.put("sum", sum.map(|(l, r)| l + r));
        }

        fn from_record(record: &Record) -> Self {
            Self {
                left: record.typed("left"),
                right: record.typed("right"),
                sum: record.typed("sum"),
            }
        }

        fn to_record(&self) -> Record {
            let mut record = Record::empty(Self::fields());
            record.put("left", self.left);
            record.put("right", self.right);
            record.put("sum", self.sum);
            record
        }
    }

    #[test]
    fn test_construct_runs_derive() {
        let pair = Pair::construct_json(&json!([2, "gap", 3]));
        assert_eq!(
            pair,
            Normalized::One(Pair { left: Some(2), right: Some(3), sum: Some(5) })
        );
    }

    #[test]
    fn test_unserialize_skips_derive() {
        let object = Pair::unserialize_json(&json!([2, null, 3])).into_vec().remove(0);
        assert_eq!(object["sum"], Value::Null);
    }

    #[test]
    fn test_construct_tolerates_missing_data() {
        for input in [Value::Null, json!([]), json!({})] {
            let pair = Pair::construct_json(&input).into_vec().remove(0);
            assert_eq!(pair, Pair { left: None, right: None, sum: None });
        }
    }

    #[test]
    fn test_serialize_omits_absent_field() {
        let pair = Pair { left: Some(1), right: Some(4), sum: Some(5) };
        assert_eq!(pair.serialize(), vec![json!(1), Value::Null, json!(4)]);
        assert_eq!(pair.to_json(), json!({ "left": 1, "right": 4, "sum": 5 }));
    }

    #[test]
    fn test_validate_instances() {
        let good = Pair { left: Some(1), right: Some(4), sum: None };
        let bad = Pair { left: Some(1), right: Some(-4), sum: None };
        assert!(Pair::validate_instances(&[good]).is_ok());

        let good = Pair { left: Some(1), right: Some(4), sum: None };
        let err = Pair::validate_instances(&[good, bad]).unwrap_err();
        assert_eq!(err.field(), Some("right"));
        assert_eq!(err.index(), Some(1));
    }

    #[test]
    fn test_validate_instances_matches_from_instances() {
        let pairs = [Pair { left: Some(-1), right: None, sum: None }];
        assert_eq!(
            Pair::validate_instances(&pairs),
            Pair::validate(&ModelInput::from_instances(&pairs))
        );
    }

    #[test]
    #[should_panic(expected = "MODEL_FIELD_TABLE_INVALID")]
    fn test_declare_fields_panics_on_shared_slot() {
        declare_fields("broken", &[FieldDef::at("a", 0), FieldDef::at("b", 0)]);
    }
}

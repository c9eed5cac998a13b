//! Validation pipeline
//!
//! Semantics:
//! - Validators run per record in batch order, per field in declared order
//! - The first violation stops the whole call (first-failure, not a lint)
//! - An empty input, or one where every record is unset, is itself a failure
//! - Records are never mutated

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};

use super::errors::{ValidationError, ValidationResult, Violation};
use super::fields::FieldTable;
use super::input::ModelInput;
use super::record::Record;
use super::transform::normalize;

/// Per-field predicate: (value, field name, whole record) to pass or violation.
///
/// The record gives access to sibling fields for cross-field rules.
pub type ValidatorFn = fn(&Value, &str, &Record) -> Result<(), Violation>;

/// Validators registered per field name.
#[derive(Clone, Default)]
pub struct ValidatorSet {
    validators: HashMap<&'static str, ValidatorFn>,
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self.validators.keys().collect();
        fields.sort();
        f.debug_struct("ValidatorSet").field("fields", &fields).finish()
    }
}

impl ValidatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `validator` for `field`, replacing any previous one
    pub fn with(mut self, field: &'static str, validator: ValidatorFn) -> Self {
        self.validators.insert(field, validator);
        self
    }

    pub fn get(&self, field: &str) -> Option<ValidatorFn> {
        self.validators.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Validates already-normalized records.
pub fn validate_records(
    table: &FieldTable,
    validators: &ValidatorSet,
    records: &[Record],
) -> ValidationResult {
    let result = run_pipeline(table, validators, records);
    report(table.entity(), &result);
    result
}

/// Normalizes `input` and validates the resulting records.
pub fn validate(
    table: &FieldTable,
    validators: &ValidatorSet,
    input: &ModelInput,
) -> ValidationResult {
    let records = normalize(table, input).into_vec();
    validate_records(table, validators, &records)
}

fn run_pipeline(
    table: &FieldTable,
    validators: &ValidatorSet,
    records: &[Record],
) -> ValidationResult {
    let entity = table.entity();

    if records.iter().all(Record::is_empty) {
        return Err(ValidationError::EmptyInput { entity });
    }

    for (index, record) in records.iter().enumerate() {
        for field in table.names() {
            let Some(validator) = validators.get(field) else {
                continue;
            };

            validator(record.get(field), field, record).map_err(|details| {
                ValidationError::FieldViolation {
                    entity,
                    field,
                    index,
                    details,
                }
            })?;
        }
    }

    Ok(())
}

fn report(entity: &str, result: &ValidationResult) {
    match result {
        Ok(()) => log_event_with_fields(Event::ValidationPassed, &[("entity", entity)]),
        Err(err) => {
            let index = err.index().map(|i| i.to_string()).unwrap_or_default();
            log_event_with_fields(
                Event::ValidationFailed,
                &[
                    ("code", err.code()),
                    ("entity", entity),
                    ("field", err.field().unwrap_or("")),
                    ("index", &index),
                ],
            );
        }
    }
}

//! Data-definition-driven transform engine
//!
//! Every entity exchanged with the venue is a positional array on the wire.
//! This module turns those arrays (or already-named objects, one or many)
//! into canonical records, turns records back into arrays, and validates
//! records field by field.
//!
//! # Design Principles
//!
//! - Field layout is declared ahead of time, never inferred from data
//! - Construction never fails on missing or malformed data
//! - Validation is the gate; it reports the first violation only
//! - One extraction routine shared by every entry point
//! - No I/O, no shared mutable state

mod entity;
mod errors;
mod fields;
mod input;
mod record;
mod transform;
mod validator;

pub use entity::{declare_fields, Model};
pub use errors::{
    json_type_name, FieldTableError, Severity, ValidationError, ValidationResult, Violation,
};
pub use fields::{FieldDef, FieldTable, Slot};
pub use input::{ModelInput, RawItem};
pub use record::{FieldValue, Record};
pub use transform::{normalize, serialize, serialize_all, unserialize, Normalized};
pub use validator::{validate, validate_records, ValidatorFn, ValidatorSet};

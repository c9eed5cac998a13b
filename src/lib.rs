//! venue-models - positional wire-format models for trading venue entities
//!
//! [`model`] holds the generic transform engine, [`entities`] the concrete
//! entity declarations built on it, and [`validators`] the field predicates
//! they share.

pub mod cli;
pub mod entities;
pub mod model;
pub mod observability;
pub mod validators;

//! Field definition tables
//!
//! A table maps each declared field name to a wire position, or marks it
//! absent when the field only exists on the object form (derived fields).
//! Positions need not be contiguous; unmapped slots are simply never read
//! and serialize as `null`.

use std::collections::HashMap;

use super::errors::FieldTableError;
use super::input::RawItem;
use super::record::Record;

/// Where a field lives on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Index into the positional array
    At(usize),
    /// Not carried on the wire
    Absent,
}

/// One field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub slot: Slot,
}

impl FieldDef {
    /// A field read from and written to `position`
    pub const fn at(name: &'static str, position: usize) -> Self {
        Self {
            name,
            slot: Slot::At(position),
        }
    }

    /// A field with no wire position
    pub const fn absent(name: &'static str) -> Self {
        Self {
            name,
            slot: Slot::Absent,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self.slot {
            Slot::At(position) => Some(position),
            Slot::Absent => None,
        }
    }
}

/// Declared field layout of one entity type.
///
/// Immutable once built. Lookups work in both directions: name to position
/// for serialization, position to name for positional input.
#[derive(Debug, Clone)]
pub struct FieldTable {
    entity: &'static str,
    defs: Vec<FieldDef>,
    by_name: HashMap<&'static str, usize>,
    by_position: HashMap<usize, usize>,
    wire_len: usize,
}

impl FieldTable {
    /// Builds a table, rejecting duplicate names and shared wire slots.
    pub fn new(entity: &'static str, defs: &[FieldDef]) -> Result<Self, FieldTableError> {
        if defs.is_empty() {
            return Err(FieldTableError::NoFields {
                entity: entity.to_string(),
            });
        }

        let mut by_name = HashMap::with_capacity(defs.len());
        let mut by_position = HashMap::with_capacity(defs.len());
        let mut wire_len = 0;

        for (i, def) in defs.iter().enumerate() {
            if by_name.insert(def.name, i).is_some() {
                return Err(FieldTableError::DuplicateField {
                    entity: entity.to_string(),
                    field: def.name.to_string(),
                });
            }

            if let Some(position) = def.position() {
                if let Some(prev) = by_position.insert(position, i) {
                    return Err(FieldTableError::DuplicatePosition {
                        entity: entity.to_string(),
                        position,
                        first: defs[prev].name.to_string(),
                        second: def.name.to_string(),
                    });
                }
                wire_len = wire_len.max(position + 1);
            }
        }

        Ok(Self {
            entity,
            defs: defs.to_vec(),
            by_name,
            by_position,
            wire_len,
        })
    }

    /// Entity name used in logs and errors
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Field declarations in declared order
    pub fn defs(&self) -> &[FieldDef] {
        &self.defs
    }

    /// Field names in declared order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.iter().map(|def| def.name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Wire position of `name`; `None` for absent or undeclared fields
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.by_name
            .get(name)
            .and_then(|&i| self.defs[i].position())
    }

    /// Field mapped to wire `position`, if any
    pub fn field_at(&self, position: usize) -> Option<&'static str> {
        self.by_position.get(&position).map(|&i| self.defs[i].name)
    }

    /// Length of the positional form (highest mapped position + 1)
    pub fn wire_len(&self) -> usize {
        self.wire_len
    }

    /// Extracts one canonical record from one raw item.
    ///
    /// This is the only place input values are mapped onto field names;
    /// construction, unserialization and validation all go through it.
    pub fn extract(&self, item: &RawItem) -> Record {
        let mut record = Record::empty(self);

        match item {
            RawItem::Positional(values) => {
                for def in &self.defs {
                    if let Some(value) = def.position().and_then(|p| values.get(p)) {
                        record.set(def.name, value.clone());
                    }
                }
            }
            RawItem::Named(object) => {
                for def in &self.defs {
                    if let Some(value) = object.get(def.name) {
                        record.set(def.name, value.clone());
                    }
                }
            }
            RawItem::Empty => {}
        }

        record
    }
}

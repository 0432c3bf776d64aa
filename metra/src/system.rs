//! Named collections of units
//!
//! A system of units is a registry: a name, the units it contains in
//! registration order, and a mapping from quantity kinds to the unit
//! that represents them. Registration is idempotent under semantic
//! equality and a kind can only ever map to one unit.

use std::collections::HashMap;

use tracing::debug;

use crate::error::UnitError;
use crate::kind::QuantityKind;
use crate::unit::Unit;

/// A named registry of units
#[derive(Debug, Clone, Default)]
pub struct SystemOfUnits {
    name: String,
    units: Vec<Unit>,
    by_kind: HashMap<QuantityKind, Unit>,
}

impl SystemOfUnits {
    pub fn new(name: &str) -> SystemOfUnits {
        SystemOfUnits {
            name: name.to_string(),
            units: Vec::new(),
            by_kind: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units in registration order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Registers a unit, returning true when it was not already present
    ///
    /// Presence is semantic equality, so re-registering the same unit
    /// built a different way is a no-op.
    pub fn add_unit(&mut self, unit: Unit) -> bool {
        if self.units.iter().any(|existing| existing == &unit) {
            return false;
        }
        debug!(system = %self.name, unit = %unit, "registering unit");
        self.units.push(unit);
        true
    }

    /// Registers a unit as the representative of a quantity kind
    ///
    /// Fails without modifying the registry when the kind is already
    /// mapped to a different unit.
    pub fn add_unit_for_kind(&mut self, unit: Unit, kind: QuantityKind) -> Result<(), UnitError> {
        if let Some(existing) = self.by_kind.get(&kind) {
            if existing == &unit {
                self.add_unit(unit);
                return Ok(());
            }
            return Err(UnitError::DuplicateQuantityMapping {
                kind: kind.name().to_string(),
                existing: existing.to_string(),
                rejected: unit.to_string(),
            });
        }
        self.add_unit(unit.clone());
        self.by_kind.insert(kind, unit);
        Ok(())
    }

    /// The unit registered for a quantity kind, if any
    pub fn unit_for_kind(&self, kind: &QuantityKind) -> Option<&Unit> {
        self.by_kind.get(kind)
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

//! Cargo lookup table
//!
//! An explicitly owned map from cargo id to cargo, used when a port is
//! reconstructed from a scenario file. The engine never consults it while
//! ticking.

use crate::cargo::Cargo;
use crate::simulation::error::{PortError, PortResult};
use crate::types::CargoId;
use std::collections::BTreeMap;

/// Lookup table of cargo by id
#[derive(Debug, Clone, Default)]
pub struct CargoRegistry {
    cargo: BTreeMap<CargoId, Cargo>,
}

impl CargoRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a piece of cargo; ids must be unique
    pub fn register(&mut self, cargo: Cargo) -> PortResult<()> {
        let id = cargo.id();
        if self.cargo.contains_key(&id) {
            return Err(PortError::DuplicateCargo(id));
        }
        self.cargo.insert(id, cargo);
        Ok(())
    }

    /// Look up cargo by id
    pub fn get(&self, id: CargoId) -> PortResult<&Cargo> {
        self.cargo.get(&id).ok_or(PortError::UnknownCargo(id))
    }

    /// Remove cargo from the registry, transferring ownership to the caller
    pub fn take(&mut self, id: CargoId) -> PortResult<Cargo> {
        self.cargo.remove(&id).ok_or(PortError::UnknownCargo(id))
    }

    /// Whether an id is registered
    pub fn contains(&self, id: CargoId) -> bool {
        self.cargo.contains_key(&id)
    }

    /// Number of registered pieces of cargo
    pub fn len(&self) -> usize {
        self.cargo.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.cargo.is_empty()
    }

    /// Iterate over registered cargo in id order
    pub fn iter(&self) -> impl Iterator<Item = &Cargo> {
        self.cargo.values()
    }
}

impl FromIterator<Cargo> for CargoRegistry {
    /// Later duplicates replace earlier entries
    fn from_iter<T: IntoIterator<Item = Cargo>>(iter: T) -> Self {
        Self { cargo: iter.into_iter().map(|c| (c.id(), c)).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::{BulkCargo, Container};
    use crate::types::{BulkCargoType, ContainerType};

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CargoRegistry::new();
        registry.register(BulkCargo::new(1, "China", 100, BulkCargoType::Oil).into()).unwrap();
        registry.register(Container::new(2, "Peru", ContainerType::Standard).into()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(CargoId(2)).unwrap().destination(), "Peru");
        assert_eq!(registry.get(CargoId(3)), Err(PortError::UnknownCargo(CargoId(3))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut registry = CargoRegistry::new();
        registry.register(Container::new(1, "Peru", ContainerType::Other).into()).unwrap();
        let result = registry.register(Container::new(1, "Chile", ContainerType::Other).into());
        assert_eq!(result, Err(PortError::DuplicateCargo(CargoId(1))));
        assert_eq!(registry.get(CargoId(1)).unwrap().destination(), "Peru");
    }

    #[test]
    fn test_take_transfers_ownership() {
        let reefer = Cargo::from(Container::new(5, "Fiji", ContainerType::Reefer));
        let mut registry: CargoRegistry = std::iter::once(reefer).collect();
        let cargo = registry.take(CargoId(5)).unwrap();
        assert_eq!(cargo.id(), CargoId(5));
        assert!(registry.is_empty());
        assert!(registry.take(CargoId(5)).is_err());
    }
}

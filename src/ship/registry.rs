//! Ship lookup table
//!
//! Ships are keyed by IMO number. The port keeps its fleet in one of these,
//! and scenario reconstruction builds one before handing ships to the port.

use crate::ship::Ship;
use crate::simulation::error::{PortError, PortResult};
use crate::types::ImoNumber;
use std::collections::BTreeMap;

/// Lookup table of ships by IMO number
#[derive(Debug, Clone, Default)]
pub struct ShipRegistry {
    ships: BTreeMap<ImoNumber, Ship>,
}

impl ShipRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ship; IMO numbers must be unique
    pub fn register(&mut self, ship: Ship) -> PortResult<()> {
        let imo = ship.imo_number();
        if self.ships.contains_key(&imo) {
            return Err(PortError::DuplicateShip(imo));
        }
        self.ships.insert(imo, ship);
        Ok(())
    }

    /// Look up a ship
    pub fn get(&self, imo: ImoNumber) -> PortResult<&Ship> {
        self.ships.get(&imo).ok_or(PortError::UnknownShip(imo))
    }

    /// Look up a ship for mutation
    pub fn get_mut(&mut self, imo: ImoNumber) -> PortResult<&mut Ship> {
        self.ships.get_mut(&imo).ok_or(PortError::UnknownShip(imo))
    }

    /// Remove a ship, transferring ownership to the caller
    pub fn take(&mut self, imo: ImoNumber) -> PortResult<Ship> {
        self.ships.remove(&imo).ok_or(PortError::UnknownShip(imo))
    }

    /// Whether an IMO number is registered
    pub fn contains(&self, imo: ImoNumber) -> bool {
        self.ships.contains_key(&imo)
    }

    /// Number of registered ships
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Iterate over ships in IMO order
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.values()
    }
}

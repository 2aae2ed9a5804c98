//! Ship modelling
//!
//! This module contains the [`Ship`] entity with its two variants and the
//! [`ShipRegistry`] lookup table keyed by IMO number.
//!
//! # Usage Example
//!
//! ```rust
//! use port_simulator::cargo::BulkCargo;
//! use port_simulator::port::Quay;
//! use port_simulator::ship::Ship;
//! use port_simulator::types::*;
//!
//! let mut ship = Ship::bulk_carrier(2325336, "Glorious", "China", NauticalFlag::Hotel, 500).unwrap();
//! assert!(ship.can_dock(&Quay::bulk(QuayId(1), 1000)));
//!
//! ship.load_cargo(BulkCargo::new(1, "China", 400, BulkCargoType::Coal).into()).unwrap();
//! assert_eq!(ship.unload_cargo().unwrap().len(), 1);
//! ```

pub mod registry;
pub mod ship;

// Re-export all public types for convenience
pub use registry::ShipRegistry;
pub use ship::{BulkCarrier, ContainerShip, RejectedCargo, Ship, ShipKind};

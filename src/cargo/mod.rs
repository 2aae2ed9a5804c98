//! Cargo modelling
//!
//! This module contains the cargo entities handled by the port and the
//! lookup table used when rebuilding a port from a scenario.
//!
//! # Usage Example
//!
//! ```rust
//! use port_simulator::cargo::*;
//! use port_simulator::types::*;
//!
//! let coal: Cargo = BulkCargo::new(1, "China", 11111, BulkCargoType::Coal).into();
//! assert_eq!(coal.to_string(), "BulkCargo 1 to China [COAL - 11111]");
//!
//! let mut registry = CargoRegistry::new();
//! registry.register(coal).unwrap();
//! assert!(registry.contains(CargoId(1)));
//! ```

pub mod cargo;
pub mod registry;

// Re-export all public types for convenience
pub use cargo::{BulkCargo, Cargo, Container};
pub use registry::CargoRegistry;

//! The port and its docking machinery
//!
//! # Overview
//!
//! - [`Quay`]: a berth holding at most one ship
//! - [`ShipQueue`]: ships waiting for a berth, served by priority
//! - [`Port`]: the aggregate root that advances the simulation minute by minute
//!
//! # Usage Example
//!
//! ```rust
//! use port_simulator::movement::Movement;
//! use port_simulator::port::{Port, Quay, TickPhase};
//! use port_simulator::ship::Ship;
//! use port_simulator::types::*;
//!
//! let mut port = Port::new("Brisbane");
//! port.add_quay(Quay::bulk(QuayId(1), 1000)).unwrap();
//!
//! let ship = Ship::bulk_carrier(2325336, "Glorious", "China", NauticalFlag::Hotel, 500).unwrap();
//! let arrival = Movement::ship(3, MovementDirection::Inbound, &ship);
//! port.add_ship(ship).unwrap();
//! port.add_movement(arrival).unwrap();
//!
//! for _ in 0..9 {
//!     port.elapse_one_minute();
//! }
//! let report = port.elapse_one_minute();
//! assert_eq!(report.phase, TickPhase::Docking);
//! assert_eq!(report.docked.len(), 1);
//! ```

pub mod port;
pub mod quay;
pub mod ship_queue;

// Re-export all public types for convenience
pub use port::{Port, TickPhase, TickReport, DOCKING_INTERVAL, UNLOADING_INTERVAL};
pub use quay::{Quay, QuayKind};
pub use ship_queue::ShipQueue;

//! Movements and the movement queue
//!
//! A [`Movement`] is a ship or cargo arriving at or leaving the port at a
//! given simulated minute. Pending movements wait in a [`MovementQueue`]
//! ordered by that minute.

pub mod movement;
pub mod queue;

// Re-export all public types for convenience
pub use movement::{Movement, MovementKind, ShipMovement};
pub use queue::MovementQueue;

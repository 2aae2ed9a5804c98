//! Scheduled movements of ships and cargo
//!
//! A movement happens at a fixed simulated minute and is either inbound or
//! outbound. Ship movements carry a snapshot of the ship's identity; cargo
//! movements carry the cargo itself while it is in transit.

use crate::cargo::Cargo;
use crate::ship::Ship;
use crate::types::{ImoNumber, MovementDirection, NauticalFlag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the ship a movement refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipMovement {
    /// Handle into the port's fleet
    pub imo: ImoNumber,
    /// Ship name, for reporting
    pub name: String,
    /// Nautical flag at the time the movement was created
    pub flag: NauticalFlag,
}

/// What moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    /// A ship arrives at or leaves the port
    Ship(ShipMovement),
    /// Cargo is delivered to or collected from the warehouse
    Cargo(Vec<Cargo>),
}

/// A single scheduled movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    time: u64,
    direction: MovementDirection,
    kind: MovementKind,
}

impl Movement {
    /// Schedule a ship movement
    pub fn ship(time: u64, direction: MovementDirection, ship: &Ship) -> Self {
        Self {
            time,
            direction,
            kind: MovementKind::Ship(ShipMovement {
                imo: ship.imo_number(),
                name: ship.name().to_string(),
                flag: ship.flag(),
            }),
        }
    }

    /// Schedule a cargo movement
    ///
    /// Inbound cargo is handed to the warehouse when the movement runs.
    /// Outbound cargo is matched against the warehouse by id.
    pub fn cargo(time: u64, direction: MovementDirection, cargo: Vec<Cargo>) -> Self {
        Self { time, direction, kind: MovementKind::Cargo(cargo) }
    }

    /// Simulated minute at which the movement runs
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Inbound or outbound
    pub fn direction(&self) -> MovementDirection {
        self.direction
    }

    /// Ship or cargo payload
    pub fn kind(&self) -> &MovementKind {
        &self.kind
    }

    /// Consume the movement, yielding its payload
    pub fn into_kind(self) -> MovementKind {
        self.kind
    }

    /// The ship, if this is a ship movement
    pub fn ship_movement(&self) -> Option<&ShipMovement> {
        match &self.kind {
            MovementKind::Ship(ship) => Some(ship),
            MovementKind::Cargo(_) => None,
        }
    }

    /// Variant name, as used in reports
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            MovementKind::Ship(_) => "ShipMovement",
            MovementKind::Cargo(_) => "CargoMovement",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} to occur at {} involving ", self.direction, self.kind_name(), self.time)?;
        match &self.kind {
            MovementKind::Ship(ship) => write!(f, "the ship {}", ship.name),
            MovementKind::Cargo(cargo) => write!(f, "{} piece(s) of cargo", cargo.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::Container;
    use crate::types::ContainerType;

    #[test]
    fn test_ship_movement_snapshot() {
        let ship =
            Ship::bulk_carrier(2325336, "Glorious", "China", NauticalFlag::Hotel, 10).unwrap();
        let movement = Movement::ship(120, MovementDirection::Inbound, &ship);

        let snapshot = movement.ship_movement().unwrap();
        assert_eq!(snapshot.imo, ship.imo_number());
        assert_eq!(snapshot.flag, NauticalFlag::Hotel);
        assert_eq!(movement.time(), 120);
    }

    #[test]
    fn test_movement_display() {
        let ship =
            Ship::bulk_carrier(2325336, "Glorious", "China", NauticalFlag::Hotel, 10).unwrap();
        let movement = Movement::ship(120, MovementDirection::Inbound, &ship);
        assert_eq!(
            movement.to_string(),
            "INBOUND ShipMovement to occur at 120 involving the ship Glorious"
        );

        let cargo = vec![
            Container::new(1, "Peru", ContainerType::Standard).into(),
            Container::new(2, "Peru", ContainerType::Reefer).into(),
        ];
        let movement = Movement::cargo(130, MovementDirection::Outbound, cargo);
        assert_eq!(
            movement.to_string(),
            "OUTBOUND CargoMovement to occur at 130 involving 2 piece(s) of cargo"
        );
        assert!(movement.ship_movement().is_none());
    }
}

//! Ship entities and their capability predicates
//!
//! A ship has an immutable identity (IMO number, name, origin flag and
//! nautical flag) and one of two fixed variants, each owning its cargo hold.
//! The port dispatches exhaustively over the variant when deciding whether a
//! ship may dock at a quay or take on a piece of cargo.

use crate::cargo::{BulkCargo, Cargo, Container};
use crate::port::{Quay, QuayKind};
use crate::simulation::error::{PortError, PortResult};
use crate::types::{CargoId, ImoNumber, NauticalFlag};
use std::fmt;
use thiserror::Error;

/// Bulk carrier: a single hold slot for one load of bulk cargo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkCarrier {
    /// Maximum tonnage the carrier can take
    pub capacity: u32,
    hold: Option<BulkCargo>,
}

impl BulkCarrier {
    /// Create an empty bulk carrier variant
    pub fn new(capacity: u32) -> Self {
        Self { capacity, hold: None }
    }

    /// The cargo aboard, if any
    pub fn cargo(&self) -> Option<&BulkCargo> {
        self.hold.as_ref()
    }
}

/// Container ship: a hold of up to `capacity` containers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerShip {
    /// Maximum number of containers
    pub capacity: u32,
    hold: Vec<Container>,
}

impl ContainerShip {
    /// Create an empty container ship variant
    pub fn new(capacity: u32) -> Self {
        Self { capacity, hold: Vec::new() }
    }

    /// Containers aboard, in loading order
    pub fn cargo(&self) -> &[Container] {
        &self.hold
    }
}

/// The closed set of ship variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipKind {
    /// Carries bulk cargo
    BulkCarrier(BulkCarrier),
    /// Carries containers
    ContainerShip(ContainerShip),
}

/// Cargo handed back by a ship that refused to load it
#[derive(Debug, Error)]
#[error("Ship {imo} cannot load cargo {}", .cargo.id())]
pub struct RejectedCargo {
    /// The refusing ship
    pub imo: ImoNumber,
    /// The cargo, returned unchanged
    pub cargo: Cargo,
}

impl RejectedCargo {
    /// Take the cargo back
    pub fn into_cargo(self) -> Cargo {
        self.cargo
    }

    /// Port error describing the rejection
    pub fn to_port_error(&self) -> PortError {
        PortError::CargoRejected { imo: self.imo, cargo: self.cargo.id() }
    }
}

/// A ship that may visit the port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    imo_number: ImoNumber,
    name: String,
    origin_flag: String,
    flag: NauticalFlag,
    kind: ShipKind,
}

impl Ship {
    /// Create a ship from an already validated IMO number
    pub fn new(
        imo_number: ImoNumber,
        name: impl Into<String>,
        origin_flag: impl Into<String>,
        flag: NauticalFlag,
        kind: ShipKind,
    ) -> Self {
        Self { imo_number, name: name.into(), origin_flag: origin_flag.into(), flag, kind }
    }

    /// Create an empty bulk carrier, validating the IMO number
    pub fn bulk_carrier(
        imo_number: u64,
        name: impl Into<String>,
        origin_flag: impl Into<String>,
        flag: NauticalFlag,
        capacity: u32,
    ) -> PortResult<Self> {
        Ok(Self::new(
            ImoNumber::new(imo_number)?,
            name,
            origin_flag,
            flag,
            ShipKind::BulkCarrier(BulkCarrier::new(capacity)),
        ))
    }

    /// Create an empty container ship, validating the IMO number
    pub fn container_ship(
        imo_number: u64,
        name: impl Into<String>,
        origin_flag: impl Into<String>,
        flag: NauticalFlag,
        capacity: u32,
    ) -> PortResult<Self> {
        Ok(Self::new(
            ImoNumber::new(imo_number)?,
            name,
            origin_flag,
            flag,
            ShipKind::ContainerShip(ContainerShip::new(capacity)),
        ))
    }

    /// IMO number
    pub fn imo_number(&self) -> ImoNumber {
        self.imo_number
    }

    /// Ship name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Country of origin; cargo bound there may be loaded on departure
    pub fn origin_flag(&self) -> &str {
        &self.origin_flag
    }

    /// Current nautical flag
    pub fn flag(&self) -> NauticalFlag {
        self.flag
    }

    /// Variant and hold
    pub fn kind(&self) -> &ShipKind {
        &self.kind
    }

    /// Capacity in the variant's own unit (tonnes or containers)
    pub fn capacity(&self) -> u32 {
        match &self.kind {
            ShipKind::BulkCarrier(carrier) => carrier.capacity,
            ShipKind::ContainerShip(ship) => ship.capacity,
        }
    }

    /// Whether this is a container ship
    pub fn is_container_ship(&self) -> bool {
        matches!(self.kind, ShipKind::ContainerShip(_))
    }

    /// Variant name, as used in reports
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ShipKind::BulkCarrier(_) => "BulkCarrier",
            ShipKind::ContainerShip(_) => "ContainerShip",
        }
    }

    /// Whether the ship fits the given quay
    pub fn can_dock(&self, quay: &Quay) -> bool {
        match (&self.kind, quay.kind()) {
            (ShipKind::BulkCarrier(carrier), QuayKind::Bulk { max_tonnage }) => {
                *max_tonnage >= carrier.capacity
            }
            (ShipKind::ContainerShip(ship), QuayKind::Container { max_containers }) => {
                *max_containers >= ship.capacity
            }
            _ => false,
        }
    }

    /// Whether the ship can take on this piece of cargo right now
    pub fn can_load(&self, cargo: &Cargo) -> bool {
        if cargo.destination() != self.origin_flag {
            return false;
        }
        match (&self.kind, cargo) {
            (ShipKind::BulkCarrier(carrier), Cargo::Bulk(bulk)) => {
                carrier.hold.is_none() && bulk.tonnage <= carrier.capacity
            }
            (ShipKind::ContainerShip(ship), Cargo::Container(_)) => {
                ship.hold.len() < ship.capacity as usize
            }
            _ => false,
        }
    }

    /// Load a piece of cargo, handing it back if the ship cannot take it
    pub fn load_cargo(&mut self, cargo: Cargo) -> Result<(), RejectedCargo> {
        if !self.can_load(&cargo) {
            return Err(RejectedCargo { imo: self.imo_number, cargo });
        }
        match (&mut self.kind, cargo) {
            (ShipKind::BulkCarrier(carrier), Cargo::Bulk(bulk)) => carrier.hold = Some(bulk),
            (ShipKind::ContainerShip(ship), Cargo::Container(container)) => {
                ship.hold.push(container)
            }
            (_, cargo) => return Err(RejectedCargo { imo: self.imo_number, cargo }),
        }
        Ok(())
    }

    /// Whether anything is aboard
    pub fn has_cargo(&self) -> bool {
        self.cargo_count() > 0
    }

    /// Number of pieces of cargo aboard
    pub fn cargo_count(&self) -> usize {
        match &self.kind {
            ShipKind::BulkCarrier(carrier) => usize::from(carrier.hold.is_some()),
            ShipKind::ContainerShip(ship) => ship.hold.len(),
        }
    }

    /// Copies of the cargo aboard, in loading order
    pub fn cargo(&self) -> Vec<Cargo> {
        match &self.kind {
            ShipKind::BulkCarrier(carrier) => {
                carrier.hold.iter().cloned().map(Cargo::Bulk).collect()
            }
            ShipKind::ContainerShip(ship) => {
                ship.hold.iter().cloned().map(Cargo::Container).collect()
            }
        }
    }

    /// Whether a piece of cargo with this id is aboard
    pub fn carries(&self, id: CargoId) -> bool {
        match &self.kind {
            ShipKind::BulkCarrier(carrier) => {
                carrier.hold.as_ref().is_some_and(|bulk| bulk.id == id)
            }
            ShipKind::ContainerShip(ship) => ship.hold.iter().any(|container| container.id == id),
        }
    }

    /// Take everything out of the hold
    ///
    /// Unloading an empty ship is an illegal state and reported as
    /// [`PortError::NoSuchCargo`].
    pub fn unload_cargo(&mut self) -> PortResult<Vec<Cargo>> {
        if !self.has_cargo() {
            return Err(PortError::NoSuchCargo { imo: self.imo_number });
        }
        let unloaded = match &mut self.kind {
            ShipKind::BulkCarrier(carrier) => {
                carrier.hold.take().map(Cargo::Bulk).into_iter().collect()
            }
            ShipKind::ContainerShip(ship) => {
                std::mem::take(&mut ship.hold).into_iter().map(Cargo::Container).collect()
            }
        };
        Ok(unloaded)
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ShipKind::BulkCarrier(carrier) => {
                write!(
                    f,
                    "BulkCarrier {} from {} [{}] carrying ",
                    self.name, self.origin_flag, self.flag
                )?;
                match &carrier.hold {
                    Some(cargo) => write!(f, "{}", cargo.cargo_type),
                    None => write!(f, "nothing"),
                }
            }
            ShipKind::ContainerShip(ship) => write!(
                f,
                "ContainerShip {} from {} [{}] carrying {} containers",
                self.name,
                self.origin_flag,
                self.flag,
                ship.hold.len()
            ),
        }
    }
}

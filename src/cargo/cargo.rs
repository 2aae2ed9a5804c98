//! Cargo entities
//!
//! Cargo is immutable once created. The family is closed: bulk cargo measured
//! in tonnes, and shipping containers counted by unit.

use crate::types::{BulkCargoType, CargoId, ContainerType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Loose cargo carried by bulk carriers, measured in tonnes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCargo {
    /// Unique cargo id
    pub id: CargoId,
    /// Destination port or country
    pub destination: String,
    /// Weight in tonnes
    pub tonnage: u32,
    /// What is being carried
    #[serde(rename = "type")]
    pub cargo_type: BulkCargoType,
}

impl BulkCargo {
    /// Create a new piece of bulk cargo
    pub fn new(
        id: impl Into<CargoId>,
        destination: impl Into<String>,
        tonnage: u32,
        cargo_type: BulkCargoType,
    ) -> Self {
        Self { id: id.into(), destination: destination.into(), tonnage, cargo_type }
    }
}

impl fmt::Display for BulkCargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BulkCargo {} to {} [{} - {}]",
            self.id, self.destination, self.cargo_type, self.tonnage
        )
    }
}

/// A single shipping container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Unique cargo id
    pub id: CargoId,
    /// Destination port or country
    pub destination: String,
    /// Kind of container
    #[serde(rename = "type")]
    pub container_type: ContainerType,
}

impl Container {
    /// Create a new container
    pub fn new(
        id: impl Into<CargoId>,
        destination: impl Into<String>,
        container_type: ContainerType,
    ) -> Self {
        Self { id: id.into(), destination: destination.into(), container_type }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Container {} to {} [{}]", self.id, self.destination, self.container_type)
    }
}

/// Any piece of cargo handled by the port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Cargo {
    /// Bulk cargo
    #[serde(rename = "BulkCargo")]
    Bulk(BulkCargo),
    /// A container
    Container(Container),
}

impl Cargo {
    /// Unique id of this cargo
    pub fn id(&self) -> CargoId {
        match self {
            Cargo::Bulk(bulk) => bulk.id,
            Cargo::Container(container) => container.id,
        }
    }

    /// Destination of this cargo
    pub fn destination(&self) -> &str {
        match self {
            Cargo::Bulk(bulk) => &bulk.destination,
            Cargo::Container(container) => &container.destination,
        }
    }

    /// Variant name, as used in reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            Cargo::Bulk(_) => "BulkCargo",
            Cargo::Container(_) => "Container",
        }
    }

    /// The bulk cargo, if this is bulk cargo
    pub fn as_bulk(&self) -> Option<&BulkCargo> {
        match self {
            Cargo::Bulk(bulk) => Some(bulk),
            Cargo::Container(_) => None,
        }
    }

    /// The container, if this is a container
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Cargo::Container(container) => Some(container),
            Cargo::Bulk(_) => None,
        }
    }
}

impl From<BulkCargo> for Cargo {
    fn from(bulk: BulkCargo) -> Self {
        Cargo::Bulk(bulk)
    }
}

impl From<Container> for Cargo {
    fn from(container: Container) -> Self {
        Cargo::Container(container)
    }
}

impl fmt::Display for Cargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cargo::Bulk(bulk) => bulk.fmt(f),
            Cargo::Container(container) => container.fmt(f),
        }
    }
}

//! Quays: docking berths that hold at most one ship
//!
//! A quay refers to its docked ship by IMO number only. The ship itself is
//! owned by the port's fleet and never refers back to the quay.

use crate::simulation::error::{PortError, PortResult};
use crate::types::{ImoNumber, QuayId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quay variant and its capacity limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum QuayKind {
    /// Berth for bulk carriers
    #[serde(rename = "BulkQuay")]
    Bulk {
        /// Largest bulk carrier capacity accepted, in tonnes
        max_tonnage: u32,
    },
    /// Berth for container ships
    #[serde(rename = "ContainerQuay")]
    Container {
        /// Largest container ship capacity accepted
        max_containers: u32,
    },
}

/// A docking berth at the port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quay {
    id: QuayId,
    #[serde(flatten)]
    kind: QuayKind,
    #[serde(default)]
    ship: Option<ImoNumber>,
}

impl Quay {
    /// Create an empty quay
    pub fn new(id: impl Into<QuayId>, kind: QuayKind) -> Self {
        Self { id: id.into(), kind, ship: None }
    }

    /// Create an empty bulk quay
    pub fn bulk(id: impl Into<QuayId>, max_tonnage: u32) -> Self {
        Self::new(id, QuayKind::Bulk { max_tonnage })
    }

    /// Create an empty container quay
    pub fn container(id: impl Into<QuayId>, max_containers: u32) -> Self {
        Self::new(id, QuayKind::Container { max_containers })
    }

    /// Quay id
    pub fn id(&self) -> QuayId {
        self.id
    }

    /// Variant and capacity
    pub fn kind(&self) -> &QuayKind {
        &self.kind
    }

    /// Variant name, as used in reports
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            QuayKind::Bulk { .. } => "BulkQuay",
            QuayKind::Container { .. } => "ContainerQuay",
        }
    }

    /// Capacity in the variant's own unit
    pub fn capacity(&self) -> u32 {
        match self.kind {
            QuayKind::Bulk { max_tonnage } => max_tonnage,
            QuayKind::Container { max_containers } => max_containers,
        }
    }

    /// The docked ship, if any
    pub fn ship(&self) -> Option<ImoNumber> {
        self.ship
    }

    /// A quay is empty iff no ship is docked
    pub fn is_empty(&self) -> bool {
        self.ship.is_none()
    }

    /// Dock a ship; fails if another ship is already here
    pub fn ship_arrives(&mut self, imo: ImoNumber) -> PortResult<()> {
        match self.ship {
            Some(occupant) => Err(PortError::QuayOccupied { quay: self.id, occupant }),
            None => {
                self.ship = Some(imo);
                Ok(())
            }
        }
    }

    /// Release the docked ship, returning its handle
    pub fn ship_departs(&mut self) -> Option<ImoNumber> {
        self.ship.take()
    }
}

impl fmt::Display for Quay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [Ship: ", self.kind_name(), self.id)?;
        match self.ship {
            Some(imo) => write!(f, "{imo}")?,
            None => write!(f, "None")?,
        }
        write!(f, "] - {}", self.capacity())
    }
}

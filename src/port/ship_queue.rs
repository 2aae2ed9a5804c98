//! Priority dispatch queue for ships waiting to dock
//!
//! Ships are kept in arrival order. Selection runs a fixed cascade of tiers
//! over that order and the first ship in the highest non-empty tier wins:
//!
//! 1. dangerous cargo ([`NauticalFlag::Bravo`])
//! 2. medical assistance ([`NauticalFlag::Whiskey`])
//! 3. ready to dock ([`NauticalFlag::Hotel`])
//! 4. any container ship
//! 5. head of the arrival order
//!
//! The queue stores a ship's IMO number along with the two attributes the
//! cascade inspects. Both are fixed for the life of a ship, so the queue
//! never needs to consult the fleet.

use crate::ship::Ship;
use crate::types::{ImoNumber, NauticalFlag};
use std::collections::VecDeque;

/// Flag tiers in descending priority
const FLAG_TIERS: [NauticalFlag; 3] =
    [NauticalFlag::Bravo, NauticalFlag::Whiskey, NauticalFlag::Hotel];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueuedShip {
    imo: ImoNumber,
    flag: NauticalFlag,
    container_ship: bool,
}

/// Ships waiting for a quay
#[derive(Debug, Clone, Default)]
pub struct ShipQueue {
    ships: VecDeque<QueuedShip>,
}

impl ShipQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ship to the tail of the arrival order
    pub fn add(&mut self, ship: &Ship) {
        self.ships.push_back(QueuedShip {
            imo: ship.imo_number(),
            flag: ship.flag(),
            container_ship: ship.is_container_ship(),
        });
    }

    /// The next ship to service, without removing it
    pub fn peek(&self) -> Option<ImoNumber> {
        self.select().map(|index| self.ships[index].imo)
    }

    /// Remove and return the ship [`peek`](Self::peek) would return
    pub fn poll(&mut self) -> Option<ImoNumber> {
        let index = self.select()?;
        self.ships.remove(index).map(|queued| queued.imo)
    }

    fn select(&self) -> Option<usize> {
        FLAG_TIERS
            .iter()
            .find_map(|flag| self.ships.iter().position(|queued| queued.flag == *flag))
            .or_else(|| self.ships.iter().position(|queued| queued.container_ship))
            .or_else(|| (!self.ships.is_empty()).then_some(0))
    }

    /// Whether a ship is waiting
    pub fn contains(&self, imo: ImoNumber) -> bool {
        self.ships.iter().any(|queued| queued.imo == imo)
    }

    /// Number of waiting ships
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Whether no ship is waiting
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Waiting ships in arrival order
    pub fn iter(&self) -> impl Iterator<Item = ImoNumber> + '_ {
        self.ships.iter().map(|queued| queued.imo)
    }
}

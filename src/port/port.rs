//! The port: aggregate root and tick controller
//!
//! The port owns everything the simulation mutates: the fleet of known
//! ships, the quays, the queue of ships waiting to dock, the pending
//! movements, the warehouse and the registered evaluators. Time advances one
//! minute per call to [`Port::elapse_one_minute`], which runs five phases in
//! a fixed order:
//!
//! 1. advance the clock
//! 2. every tenth minute, dock waiting ships at empty quays
//! 3. otherwise every fifth minute, unload docked ships into the warehouse
//! 4. process movements due this minute
//! 5. tell every evaluator a minute has passed
//!
//! Phases 2 and 3 never run in the same tick. On minutes divisible by ten
//! only docking happens.

use crate::cargo::Cargo;
use crate::evaluators::StatisticsEvaluator;
use crate::movement::{Movement, MovementKind, MovementQueue};
use crate::port::{Quay, ShipQueue};
use crate::ship::{Ship, ShipRegistry};
use crate::simulation::error::{PortError, PortResult};
use crate::types::{CargoId, ImoNumber, MovementDirection, QuayId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Minutes between docking phases
pub const DOCKING_INTERVAL: u64 = 10;

/// Minutes between unloading phases
pub const UNLOADING_INTERVAL: u64 = 5;

/// The scheduled phase that ran during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickPhase {
    /// Waiting ships were offered empty quays
    Docking,
    /// Docked ships were unloaded
    Unloading,
    /// Neither phase was due
    None,
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Clock value after the tick
    pub time: u64,
    /// Scheduled phase that ran
    pub phase: TickPhase,
    /// Ships docked, with the quay each went to
    pub docked: Vec<(QuayId, ImoNumber)>,
    /// Pieces of cargo moved from ship holds to the warehouse
    pub cargo_unloaded: usize,
    /// Movements processed this minute
    pub movements_processed: usize,
    /// Movements discarded because their minute had already passed
    pub stale_movements: usize,
}

impl TickReport {
    fn new(time: u64) -> Self {
        Self {
            time,
            phase: TickPhase::None,
            docked: Vec::new(),
            cargo_unloaded: 0,
            movements_processed: 0,
            stale_movements: 0,
        }
    }
}

/// A simulated shipping port
#[derive(Debug)]
pub struct Port {
    name: String,
    time: u64,
    fleet: ShipRegistry,
    quays: Vec<Quay>,
    ship_queue: ShipQueue,
    movements: MovementQueue,
    stored_cargo: Vec<Cargo>,
    evaluators: Vec<Box<dyn StatisticsEvaluator>>,
}

impl Port {
    /// Create an empty port at minute 0
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: 0,
            fleet: ShipRegistry::new(),
            quays: Vec::new(),
            ship_queue: ShipQueue::new(),
            movements: MovementQueue::new(),
            stored_cargo: Vec::new(),
            evaluators: Vec::new(),
        }
    }

    /// Create a port from an existing state
    ///
    /// Every ship referenced by the queue or a quay must be in `fleet`, quay
    /// ids must be unique and `time` must not be negative. A ship may occupy
    /// at most one quay and is never both docked and queued. No cargo id may
    /// appear twice across the warehouse and the ship holds.
    #[instrument(skip_all, fields(
        time = time,
        ships = fleet.len(),
        quays = quays.len(),
        stored = stored_cargo.len(),
    ))]
    pub fn with_state(
        name: impl Into<String>,
        time: i64,
        fleet: ShipRegistry,
        ship_queue: ShipQueue,
        quays: Vec<Quay>,
        stored_cargo: Vec<Cargo>,
    ) -> PortResult<Self> {
        let time = u64::try_from(time).map_err(|_| PortError::NegativeTime(time))?;

        let mut quay_ids = HashSet::new();
        for quay in &quays {
            if !quay_ids.insert(quay.id()) {
                return Err(PortError::DuplicateQuay(quay.id()));
            }
        }
        for imo in ship_queue.iter().chain(quays.iter().filter_map(Quay::ship)) {
            if !fleet.contains(imo) {
                return Err(PortError::UnknownShip(imo));
            }
        }

        let mut docked = HashSet::new();
        for imo in quays.iter().filter_map(Quay::ship) {
            if !docked.insert(imo) {
                return Err(PortError::ShipDockedTwice(imo));
            }
        }
        let mut queued = HashSet::new();
        for imo in ship_queue.iter() {
            if docked.contains(&imo) || !queued.insert(imo) {
                return Err(PortError::ShipAlreadyAtPort(imo));
            }
        }

        let mut cargo_ids = HashSet::new();
        let held = fleet.iter().flat_map(Ship::cargo);
        for cargo in stored_cargo.iter().cloned().chain(held) {
            if !cargo_ids.insert(cargo.id()) {
                return Err(PortError::DuplicateCargo(cargo.id()));
            }
        }

        Ok(Self {
            name: name.into(),
            time,
            fleet,
            quays,
            ship_queue,
            movements: MovementQueue::new(),
            stored_cargo,
            evaluators: Vec::new(),
        })
    }

    /// Port name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minutes since the simulation started
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Ships known to the port, including departed ones
    pub fn ships(&self) -> &ShipRegistry {
        &self.fleet
    }

    /// Look up a known ship
    pub fn ship(&self, imo: ImoNumber) -> PortResult<&Ship> {
        self.fleet.get(imo)
    }

    /// Quays in the order they are offered to waiting ships
    pub fn quays(&self) -> &[Quay] {
        &self.quays
    }

    /// Ships waiting to dock
    pub fn ship_queue(&self) -> &ShipQueue {
        &self.ship_queue
    }

    /// Pending movements
    pub fn movements(&self) -> &MovementQueue {
        &self.movements
    }

    /// Cargo in the warehouse
    pub fn stored_cargo(&self) -> &[Cargo] {
        &self.stored_cargo
    }

    /// Registered evaluators, in registration order
    pub fn evaluators(&self) -> &[Box<dyn StatisticsEvaluator>] {
        &self.evaluators
    }

    /// The first registered evaluator of type `T`
    pub fn evaluator<T: StatisticsEvaluator>(&self) -> Option<&T> {
        self.evaluators.iter().find_map(|evaluator| evaluator.as_any().downcast_ref::<T>())
    }

    /// Register a ship with the port
    pub fn add_ship(&mut self, ship: Ship) -> PortResult<()> {
        self.fleet.register(ship)
    }

    /// Add a quay; it is offered to ships after all existing quays
    pub fn add_quay(&mut self, quay: Quay) -> PortResult<()> {
        if self.quays.iter().any(|existing| existing.id() == quay.id()) {
            return Err(PortError::DuplicateQuay(quay.id()));
        }
        self.quays.push(quay);
        Ok(())
    }

    /// Schedule a movement
    ///
    /// Movements before the current minute are rejected and the queue is left
    /// unchanged. Ship movements must name a ship known to the port. Inbound
    /// cargo must not reuse an id already in the warehouse, a ship's hold or
    /// another pending delivery.
    pub fn add_movement(&mut self, movement: Movement) -> PortResult<()> {
        match (movement.kind(), movement.direction()) {
            (MovementKind::Ship(ship), _) if !self.fleet.contains(ship.imo) => {
                return Err(PortError::UnknownShip(ship.imo));
            }
            (MovementKind::Cargo(cargo), MovementDirection::Inbound) => {
                let mut incoming = HashSet::new();
                for piece in cargo {
                    let id = piece.id();
                    if !incoming.insert(id) || self.holds_cargo(id) || self.cargo_in_transit(id) {
                        return Err(PortError::CargoAlreadyPresent(id));
                    }
                }
            }
            _ => {}
        }
        self.movements.add(movement, self.time)
    }

    /// Whether the warehouse or any ship's hold has this cargo
    fn holds_cargo(&self, id: CargoId) -> bool {
        self.stored_cargo.iter().any(|cargo| cargo.id() == id)
            || self.fleet.iter().any(|ship| ship.carries(id))
    }

    /// Whether a pending inbound movement delivers this cargo
    fn cargo_in_transit(&self, id: CargoId) -> bool {
        self.movements.to_sorted_vec().into_iter().any(|movement| {
            movement.direction() == MovementDirection::Inbound
                && matches!(movement.kind(), MovementKind::Cargo(cargo)
                    if cargo.iter().any(|piece| piece.id() == id))
        })
    }

    /// Register an evaluator; it is notified from the next event onwards
    pub fn add_statistics_evaluator(&mut self, evaluator: Box<dyn StatisticsEvaluator>) {
        self.evaluators.push(evaluator);
    }

    /// Unregister the first evaluator with the given name
    pub fn remove_statistics_evaluator(
        &mut self,
        name: &str,
    ) -> Option<Box<dyn StatisticsEvaluator>> {
        let index = self.evaluators.iter().position(|evaluator| evaluator.name() == name)?;
        Some(self.evaluators.remove(index))
    }

    /// Advance the simulation by one minute
    #[instrument(level = "trace", skip(self), fields(port = %self.name))]
    pub fn elapse_one_minute(&mut self) -> TickReport {
        self.advance_clock();
        let mut report = TickReport::new(self.time);

        if self.time % DOCKING_INTERVAL == 0 {
            report.phase = TickPhase::Docking;
            report.docked = self.dock_waiting_ships();
        } else if self.time % UNLOADING_INTERVAL == 0 {
            report.phase = TickPhase::Unloading;
            report.cargo_unloaded = self.unload_docked_ships();
        }

        let (processed, stale) = self.process_due_movements();
        report.movements_processed = processed;
        report.stale_movements = stale;

        self.notify_minute_elapsed();
        report
    }

    fn advance_clock(&mut self) {
        self.time += 1;
    }

    /// Offer each empty quay, in order, the highest-priority waiting ship
    fn dock_waiting_ships(&mut self) -> Vec<(QuayId, ImoNumber)> {
        let mut docked = Vec::new();
        for quay in self.quays.iter_mut().filter(|quay| quay.is_empty()) {
            let Some(imo) = self.ship_queue.peek() else {
                break;
            };
            let fits = match self.fleet.get(imo) {
                Ok(ship) => ship.can_dock(quay),
                Err(e) => {
                    warn!(error = %e, "Queued ship is not in the fleet");
                    false
                }
            };
            if !fits {
                continue;
            }
            if let Err(e) = quay.ship_arrives(imo) {
                warn!(error = %e, "Docking refused");
                continue;
            }
            self.ship_queue.poll();
            debug!(quay = %quay.id(), ship = %imo, time = self.time, "Ship docked");
            docked.push((quay.id(), imo));
        }
        docked
    }

    /// Move the cargo of every docked ship into the warehouse
    fn unload_docked_ships(&mut self) -> usize {
        let mut unloaded = 0;
        for imo in self.quays.iter().filter_map(Quay::ship) {
            let ship = match self.fleet.get_mut(imo) {
                Ok(ship) => ship,
                Err(e) => {
                    warn!(error = %e, "Docked ship is not in the fleet");
                    continue;
                }
            };
            if !ship.has_cargo() {
                continue;
            }
            match ship.unload_cargo() {
                Ok(cargo) => {
                    debug!(ship = %imo, pieces = cargo.len(), time = self.time, "Ship unloaded");
                    unloaded += cargo.len();
                    self.stored_cargo.extend(cargo);
                }
                Err(e) => warn!(error = %e, "Unloading failed"),
            }
        }
        unloaded
    }

    /// Process every movement due this minute; returns (processed, stale)
    fn process_due_movements(&mut self) -> (usize, usize) {
        let mut processed = 0;
        let mut stale = 0;
        while let Some(movement) = self.movements.pop_due(self.time) {
            if movement.time() < self.time {
                warn!(
                    movement = %movement,
                    time = self.time,
                    "Discarding movement whose minute has passed"
                );
                stale += 1;
                continue;
            }
            self.process_movement(movement);
            processed += 1;
        }
        (processed, stale)
    }

    fn notify_minute_elapsed(&mut self) {
        for evaluator in &mut self.evaluators {
            evaluator.on_elapse_minute();
        }
    }

    /// Apply a movement to the port, then report it to every evaluator
    pub fn process_movement(&mut self, movement: Movement) {
        debug!(movement = %movement, time = self.time, "Processing movement");
        match (movement.kind(), movement.direction()) {
            (MovementKind::Ship(ship), MovementDirection::Inbound) => self.ship_arrives(ship.imo),
            (MovementKind::Ship(ship), MovementDirection::Outbound) => self.ship_departs(ship.imo),
            (MovementKind::Cargo(cargo), MovementDirection::Inbound) => {
                for piece in cargo {
                    if self.holds_cargo(piece.id()) {
                        warn!(cargo = %piece.id(), "Cargo already at the port; delivery ignored");
                        continue;
                    }
                    self.stored_cargo.push(piece.clone());
                }
            }
            (MovementKind::Cargo(cargo), MovementDirection::Outbound) => {
                let ids: HashSet<CargoId> = cargo.iter().map(Cargo::id).collect();
                self.stored_cargo.retain(|stored| !ids.contains(&stored.id()));
            }
        }
        for evaluator in &mut self.evaluators {
            evaluator.on_process_movement(&movement);
        }
    }

    fn ship_arrives(&mut self, imo: ImoNumber) {
        if self.ship_queue.contains(imo) || self.docked_at(imo).is_some() {
            warn!(ship = %imo, "Ship is already at the port; arrival ignored");
            return;
        }
        match self.fleet.get(imo) {
            Ok(ship) => self.ship_queue.add(ship),
            Err(e) => warn!(error = %e, "Arriving ship is not in the fleet"),
        }
    }

    /// Load matching warehouse cargo, then free the ship's quay
    fn ship_departs(&mut self, imo: ImoNumber) {
        let ship = match self.fleet.get_mut(imo) {
            Ok(ship) => ship,
            Err(e) => {
                warn!(error = %e, "Departing ship is not in the fleet");
                return;
            }
        };

        let mut loaded = 0;
        let mut remaining = Vec::with_capacity(self.stored_cargo.len());
        for cargo in std::mem::take(&mut self.stored_cargo) {
            if cargo.destination() != ship.origin_flag() {
                remaining.push(cargo);
                continue;
            }
            match ship.load_cargo(cargo) {
                Ok(()) => loaded += 1,
                Err(rejected) => remaining.push(rejected.into_cargo()),
            }
        }
        self.stored_cargo = remaining;

        if loaded == 0 {
            return;
        }
        debug!(ship = %imo, pieces = loaded, "Cargo loaded for departure");
        match self.docked_at(imo) {
            Some(index) => {
                self.quays[index].ship_departs();
            }
            None => warn!(ship = %imo, "Departing ship was not docked"),
        }
    }

    fn docked_at(&self, imo: ImoNumber) -> Option<usize> {
        self.quays.iter().position(|quay| quay.ship() == Some(imo))
    }
}

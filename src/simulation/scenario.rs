//! Scenario files
//!
//! A scenario is the complete state of a port written as JSON: a catalogue of
//! every piece of cargo, the ships with the ids of the cargo in their holds,
//! the quays, the ship queue, the warehouse and the pending movements.
//! Everything after the catalogues refers to ships by IMO number and to cargo
//! by id.
//!
//! Reconstruction resolves those references through a [`ShipRegistry`] and a
//! [`CargoRegistry`] built from the catalogues. Every piece of cargo must end
//! up in at most one place and every ship in at most one of queue or quay.

use crate::cargo::{Cargo, CargoRegistry};
use crate::evaluators::EvaluatorKind;
use crate::movement::{Movement, MovementKind};
use crate::port::{Port, Quay, ShipQueue};
use crate::ship::{BulkCarrier, ContainerShip, Ship, ShipKind, ShipRegistry};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{CargoId, ImoNumber, MovementDirection, NauticalFlag};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Ship variant and capacity as written in a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ShipClass {
    /// Bulk carrier with a tonnage capacity
    BulkCarrier {
        /// Capacity in tonnes
        capacity: u32,
    },
    /// Container ship with a container capacity
    ContainerShip {
        /// Capacity in containers
        capacity: u32,
    },
}

/// A ship as written in a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipRecord {
    /// IMO number
    pub imo_number: ImoNumber,
    /// Ship name
    pub name: String,
    /// Country of origin
    pub origin_flag: String,
    /// Nautical flag
    pub flag: NauticalFlag,
    /// Variant and capacity
    #[serde(flatten)]
    pub class: ShipClass,
    /// Ids of the cargo aboard
    #[serde(default)]
    pub cargo: Vec<CargoId>,
}

/// What a scenario movement refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MovementSubject {
    /// A ship, by IMO number
    #[serde(rename = "ShipMovement")]
    Ship {
        /// The moving ship
        imo_number: ImoNumber,
    },
    /// Cargo, by id
    #[serde(rename = "CargoMovement")]
    Cargo {
        /// The moving cargo
        cargo: Vec<CargoId>,
    },
}

/// A pending movement as written in a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    /// Action time
    pub time: u64,
    /// Inbound or outbound
    pub direction: MovementDirection,
    /// Ship or cargo
    #[serde(flatten)]
    pub subject: MovementSubject,
}

/// Complete serialized state of a port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFile {
    /// Port name
    pub name: String,
    /// Minutes since the simulation started
    #[serde(default)]
    pub time: i64,
    /// Every piece of cargo in the scenario
    #[serde(default)]
    pub cargo: Vec<Cargo>,
    /// Every ship known to the port
    #[serde(default)]
    pub ships: Vec<ShipRecord>,
    /// Quays in docking order
    #[serde(default)]
    pub quays: Vec<Quay>,
    /// Waiting ships in arrival order
    #[serde(default)]
    pub ship_queue: Vec<ImoNumber>,
    /// Cargo in the warehouse
    #[serde(default)]
    pub stored_cargo: Vec<CargoId>,
    /// Pending movements
    #[serde(default)]
    pub movements: Vec<MovementRecord>,
    /// Evaluators to register, by name
    #[serde(default)]
    pub evaluators: Vec<String>,
}

/// Tracks which cargo has been given a location during reconstruction
struct CargoPlacement {
    catalogue: CargoRegistry,
    unplaced: CargoRegistry,
}

impl CargoPlacement {
    fn new(cargo: Vec<Cargo>) -> SimulationResult<Self> {
        let mut catalogue = CargoRegistry::new();
        for piece in cargo {
            catalogue
                .register(piece)
                .map_err(|e| SimulationError::scenario_error(format!("cargo catalogue: {e}")))?;
        }
        let unplaced = catalogue.clone();
        Ok(Self { catalogue, unplaced })
    }

    /// Give a piece of cargo its one location
    fn place(&mut self, id: CargoId, location: &str) -> SimulationResult<Cargo> {
        if !self.catalogue.contains(id) {
            return Err(SimulationError::scenario_error(format!(
                "{location} refers to unknown cargo {id}"
            )));
        }
        self.unplaced.take(id).map_err(|_| {
            SimulationError::scenario_error(format!(
                "cargo {id} in {location} is already placed elsewhere"
            ))
        })
    }

    /// Look up cargo without placing it
    fn reference(&self, id: CargoId, location: &str) -> SimulationResult<Cargo> {
        self.catalogue.get(id).cloned().map_err(|_| {
            SimulationError::scenario_error(format!("{location} refers to unknown cargo {id}"))
        })
    }
}

impl ScenarioFile {
    /// Read a scenario from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> SimulationResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let scenario = serde_json::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "Scenario loaded");
        Ok(scenario)
    }

    /// Write the scenario as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SimulationResult<()> {
        fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.as_ref().display(), "Scenario saved");
        Ok(())
    }

    /// Rebuild a port from this scenario
    #[instrument(
        skip(self),
        fields(name = %self.name, ships = self.ships.len(), cargo = self.cargo.len())
    )]
    pub fn into_port(self) -> SimulationResult<Port> {
        let mut placement = CargoPlacement::new(self.cargo)?;

        let mut fleet = ShipRegistry::new();
        for record in self.ships {
            let ship = build_ship(record, &mut placement)?;
            fleet
                .register(ship)
                .map_err(|e| SimulationError::scenario_error(format!("ship catalogue: {e}")))?;
        }

        let mut docked = HashSet::new();
        for quay in &self.quays {
            if let Some(imo) = quay.ship() {
                if !fleet.contains(imo) {
                    return Err(SimulationError::scenario_error(format!(
                        "quay {} holds unknown ship {imo}",
                        quay.id()
                    )));
                }
                if !docked.insert(imo) {
                    return Err(SimulationError::scenario_error(format!(
                        "ship {imo} is docked at more than one quay"
                    )));
                }
            }
        }

        let mut ship_queue = ShipQueue::new();
        for imo in self.ship_queue {
            let ship = fleet.get(imo).map_err(|_| {
                SimulationError::scenario_error(format!("ship queue refers to unknown ship {imo}"))
            })?;
            if docked.contains(&imo) || ship_queue.contains(imo) {
                return Err(SimulationError::scenario_error(format!(
                    "ship {imo} is queued more than once or both queued and docked"
                )));
            }
            ship_queue.add(ship);
        }

        let stored_cargo = self
            .stored_cargo
            .into_iter()
            .map(|id| placement.place(id, "warehouse"))
            .collect::<SimulationResult<Vec<_>>>()?;

        let mut movements = Vec::with_capacity(self.movements.len());
        for record in self.movements {
            movements.push(build_movement(record, &fleet, &mut placement)?);
        }

        for piece in placement.unplaced.iter() {
            warn!(cargo = %piece.id(), "Cargo in the catalogue has no location and is dropped");
        }

        let mut port =
            Port::with_state(self.name, self.time, fleet, ship_queue, self.quays, stored_cargo)?;
        for movement in movements {
            port.add_movement(movement)?;
        }
        for name in &self.evaluators {
            let kind: EvaluatorKind = name.parse().map_err(SimulationError::scenario_error)?;
            port.add_statistics_evaluator(kind.build());
        }

        info!(
            port = port.name(),
            time = port.time(),
            ships = port.ships().len(),
            quays = port.quays().len(),
            pending = port.movements().len(),
            "Port reconstructed from scenario"
        );
        Ok(port)
    }

    /// Capture the current state of a port
    pub fn from_port(port: &Port) -> Self {
        let mut catalogue: BTreeMap<CargoId, Cargo> = BTreeMap::new();
        let mut remember = |piece: &Cargo| {
            catalogue.entry(piece.id()).or_insert_with(|| piece.clone());
        };

        port.stored_cargo().iter().for_each(&mut remember);

        let ships = port
            .ships()
            .iter()
            .map(|ship| {
                let aboard = ship.cargo();
                aboard.iter().for_each(&mut remember);
                ShipRecord {
                    imo_number: ship.imo_number(),
                    name: ship.name().to_string(),
                    origin_flag: ship.origin_flag().to_string(),
                    flag: ship.flag(),
                    class: match ship.kind() {
                        ShipKind::BulkCarrier(carrier) => {
                            ShipClass::BulkCarrier { capacity: carrier.capacity }
                        }
                        ShipKind::ContainerShip(boxes) => {
                            ShipClass::ContainerShip { capacity: boxes.capacity }
                        }
                    },
                    cargo: aboard.iter().map(Cargo::id).collect(),
                }
            })
            .collect();

        let movements = port
            .movements()
            .to_sorted_vec()
            .into_iter()
            .map(|movement| MovementRecord {
                time: movement.time(),
                direction: movement.direction(),
                subject: match movement.kind() {
                    MovementKind::Ship(ship) => MovementSubject::Ship { imo_number: ship.imo },
                    MovementKind::Cargo(cargo) => {
                        cargo.iter().for_each(&mut remember);
                        MovementSubject::Cargo { cargo: cargo.iter().map(Cargo::id).collect() }
                    }
                },
            })
            .collect();

        Self {
            name: port.name().to_string(),
            time: i64::try_from(port.time()).unwrap_or(i64::MAX),
            cargo: catalogue.into_values().collect(),
            ships,
            quays: port.quays().to_vec(),
            ship_queue: port.ship_queue().iter().collect(),
            stored_cargo: port.stored_cargo().iter().map(Cargo::id).collect(),
            movements,
            evaluators: port.evaluators().iter().map(|e| e.name().to_string()).collect(),
        }
    }
}

fn build_ship(record: ShipRecord, placement: &mut CargoPlacement) -> SimulationResult<Ship> {
    let kind = match record.class {
        ShipClass::BulkCarrier { capacity } => ShipKind::BulkCarrier(BulkCarrier::new(capacity)),
        ShipClass::ContainerShip { capacity } => {
            ShipKind::ContainerShip(ContainerShip::new(capacity))
        }
    };
    let mut ship =
        Ship::new(record.imo_number, record.name, record.origin_flag, record.flag, kind);

    let location = format!("ship {}", record.imo_number);
    for id in record.cargo {
        let piece = placement.place(id, &location)?;
        ship.load_cargo(piece).map_err(|rejected| {
            let reason = format!("{location} cannot carry cargo {id}: {rejected}");
            SimulationError::scenario_error(reason)
        })?;
    }
    Ok(ship)
}

fn build_movement(
    record: MovementRecord,
    fleet: &ShipRegistry,
    placement: &mut CargoPlacement,
) -> SimulationResult<Movement> {
    match record.subject {
        MovementSubject::Ship { imo_number } => {
            let ship = fleet.get(imo_number).map_err(|_| {
                SimulationError::scenario_error(format!(
                    "movement at {} refers to unknown ship {imo_number}",
                    record.time
                ))
            })?;
            Ok(Movement::ship(record.time, record.direction, ship))
        }
        MovementSubject::Cargo { cargo } => {
            let location = format!("movement at {}", record.time);
            // Inbound cargo is in transit; outbound cargo only names what to collect
            let pieces = cargo
                .into_iter()
                .map(|id| match record.direction {
                    MovementDirection::Inbound => placement.place(id, &location),
                    MovementDirection::Outbound => placement.reference(id, &location),
                })
                .collect::<SimulationResult<Vec<_>>>()?;
            Ok(Movement::cargo(record.time, record.direction, pieces))
        }
    }
}

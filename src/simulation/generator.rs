//! Random scenario generation
//!
//! Builds a [`ScenarioFile`] for a port with no saved state: quays of both
//! kinds, a fleet with random flags and capacities, cargo spread between the
//! warehouse, ship holds and inbound deliveries, and ship arrivals and
//! departures spread over the run. The same seed always yields the same
//! scenario.

use crate::cargo::{BulkCargo, Cargo, Container};
use crate::port::Quay;
use crate::simulation::scenario::{
    MovementRecord, MovementSubject, ScenarioFile, ShipClass, ShipRecord,
};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{
    BulkCargoType, CargoId, ContainerType, ImoNumber, MovementDirection, NauticalFlag, QuayId,
    SimulationConfig,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Countries used for ship origins and cargo destinations
pub const DESTINATIONS: [&str; 8] =
    ["Australia", "Brazil", "Chile", "China", "Japan", "Peru", "Singapore", "USA"];

const SHIP_NAMES: [&str; 10] = [
    "Glorious", "Endeavour", "Northern Star", "Pacific Dawn", "Resolute", "Sea Lark",
    "Southern Cross", "Tasman", "Valiant", "Wanderer",
];

/// Share of the fleet already waiting for a quay at minute 0
const INITIALLY_QUEUED: f64 = 0.3;

/// Minutes a ship stays between arrival and departure
const STAY_RANGE: (u64, u64) = (20, 90);

/// Generator for reproducible random ports
pub struct ScenarioGenerator {
    rng: Box<dyn rand::RngCore>,
}

impl fmt::Debug for ScenarioGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioGenerator").finish()
    }
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioGenerator {
    /// Create a generator seeded from the thread RNG
    pub fn new() -> Self {
        Self { rng: Box::new(rand::thread_rng()) }
    }

    /// Create a generator with a specific seed for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self { rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)) }
    }

    /// Generate a scenario sized by `config`
    pub fn generate(&mut self, config: &SimulationConfig) -> SimulationResult<ScenarioFile> {
        let imo_space = (ImoNumber::MAX - ImoNumber::MIN + 1) as usize;
        if config.ship_count > imo_space {
            return Err(SimulationError::generation_error(format!(
                "cannot generate {} ships with distinct IMO numbers",
                config.ship_count
            )));
        }
        if config.quay_count > u32::MAX as usize || config.cargo_count > u32::MAX as usize {
            return Err(SimulationError::generation_error("too many quays or cargo to number"));
        }

        let mut scenario = ScenarioFile {
            name: config.port_name.clone(),
            evaluators: config.evaluators.clone(),
            ..Default::default()
        };

        scenario.quays = (0..config.quay_count).map(|id| self.generate_quay(id as u32)).collect();
        scenario.ships = self.generate_ships(config.ship_count)?;
        self.schedule_ships(&mut scenario, config.minutes);
        self.distribute_cargo(&mut scenario, config.cargo_count, config.minutes);

        info!(
            quays = scenario.quays.len(),
            ships = scenario.ships.len(),
            cargo = scenario.cargo.len(),
            movements = scenario.movements.len(),
            "Generated scenario"
        );
        Ok(scenario)
    }

    fn generate_quay(&mut self, id: u32) -> Quay {
        if self.rng.gen_bool(0.5) {
            Quay::bulk(QuayId(id), self.rng.gen_range(10..=50) * 100)
        } else {
            Quay::container(QuayId(id), self.rng.gen_range(5..=20) * 10)
        }
    }

    fn generate_ships(&mut self, count: usize) -> SimulationResult<Vec<ShipRecord>> {
        let mut used = HashSet::with_capacity(count);
        let mut ships = Vec::with_capacity(count);

        while ships.len() < count {
            let imo_number = ImoNumber::new(self.rng.gen_range(ImoNumber::MIN..=ImoNumber::MAX))?;
            if !used.insert(imo_number) {
                continue;
            }

            let base = SHIP_NAMES.choose(&mut self.rng).copied().unwrap_or("Vessel");
            let class = if self.rng.gen_bool(0.5) {
                ShipClass::BulkCarrier { capacity: self.rng.gen_range(5..=45) * 100 }
            } else {
                ShipClass::ContainerShip { capacity: self.rng.gen_range(4..=18) * 10 }
            };

            ships.push(ShipRecord {
                imo_number,
                name: format!("{} {}", base, ships.len() + 1),
                origin_flag: self.destination(),
                flag: NauticalFlag::ALL
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(NauticalFlag::November),
                class,
                cargo: Vec::new(),
            });
        }
        Ok(ships)
    }

    /// Queue some ships at minute 0 and schedule arrivals for the rest;
    /// every ship gets a departure after its stay if it fits in the run
    fn schedule_ships(&mut self, scenario: &mut ScenarioFile, minutes: u64) {
        let last_arrival = (minutes * 2 / 3).max(1);

        for ship in &scenario.ships {
            let arrival = if self.rng.gen_bool(INITIALLY_QUEUED) {
                scenario.ship_queue.push(ship.imo_number);
                0
            } else {
                let time = self.rng.gen_range(1..=last_arrival);
                scenario.movements.push(MovementRecord {
                    time,
                    direction: MovementDirection::Inbound,
                    subject: MovementSubject::Ship { imo_number: ship.imo_number },
                });
                time
            };

            let departure = arrival + self.rng.gen_range(STAY_RANGE.0..=STAY_RANGE.1);
            if departure <= minutes {
                scenario.movements.push(MovementRecord {
                    time: departure,
                    direction: MovementDirection::Outbound,
                    subject: MovementSubject::Ship { imo_number: ship.imo_number },
                });
            }
        }
    }

    /// Place each piece of cargo aboard a ship, in the warehouse or in an
    /// inbound delivery
    fn distribute_cargo(&mut self, scenario: &mut ScenarioFile, count: usize, minutes: u64) {
        for id in 0..count {
            let id = CargoId(id as u32);

            if !scenario.ships.is_empty() && self.rng.gen_bool(0.3) {
                let index = self.rng.gen_range(0..scenario.ships.len());
                if let Some(cargo) = self.cargo_for_hold(id, &scenario.ships[index]) {
                    scenario.ships[index].cargo.push(id);
                    scenario.cargo.push(cargo);
                    continue;
                }
            }

            let cargo = self.generate_cargo(id);
            if self.rng.gen_bool(0.4) {
                scenario.movements.push(MovementRecord {
                    time: self.rng.gen_range(1..=minutes.max(1)),
                    direction: MovementDirection::Inbound,
                    subject: MovementSubject::Cargo { cargo: vec![id] },
                });
            } else {
                scenario.stored_cargo.push(id);
                if self.rng.gen_bool(0.1) {
                    scenario.movements.push(MovementRecord {
                        time: self.rng.gen_range(1..=minutes.max(1)),
                        direction: MovementDirection::Outbound,
                        subject: MovementSubject::Cargo { cargo: vec![id] },
                    });
                }
            }
            scenario.cargo.push(cargo);
        }
        debug!(
            stored = scenario.stored_cargo.len(),
            aboard = scenario.ships.iter().map(|s| s.cargo.len()).sum::<usize>(),
            "Cargo distributed"
        );
    }

    /// Cargo the ship can carry, if it has room
    fn cargo_for_hold(&mut self, id: CargoId, ship: &ShipRecord) -> Option<Cargo> {
        let destination = ship.origin_flag.clone();
        match ship.class {
            ShipClass::BulkCarrier { capacity } if ship.cargo.is_empty() && capacity > 0 => {
                let tonnage = self.rng.gen_range(1..=capacity);
                Some(BulkCargo::new(id, destination, tonnage, self.bulk_type()).into())
            }
            ShipClass::ContainerShip { capacity } if ship.cargo.len() < capacity as usize => {
                Some(Container::new(id, destination, self.container_type()).into())
            }
            _ => None,
        }
    }

    fn generate_cargo(&mut self, id: CargoId) -> Cargo {
        let destination = self.destination();
        if self.rng.gen_bool(0.5) {
            let tonnage = self.rng.gen_range(1..=40) * 50;
            BulkCargo::new(id, destination, tonnage, self.bulk_type()).into()
        } else {
            Container::new(id, destination, self.container_type()).into()
        }
    }

    fn destination(&mut self) -> String {
        DESTINATIONS.choose(&mut self.rng).copied().unwrap_or("Australia").to_string()
    }

    fn bulk_type(&mut self) -> BulkCargoType {
        BulkCargoType::ALL.choose(&mut self.rng).copied().unwrap_or(BulkCargoType::Other)
    }

    fn container_type(&mut self) -> ContainerType {
        ContainerType::ALL.choose(&mut self.rng).copied().unwrap_or(ContainerType::Standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig { ship_count: 15, quay_count: 5, cargo_count: 60, ..Default::default() }
    }

    #[test]
    fn test_generated_scenario_sizes() {
        let scenario = ScenarioGenerator::with_seed(7).generate(&config()).unwrap();
        assert_eq!(scenario.name, "Brisbane");
        assert_eq!(scenario.ships.len(), 15);
        assert_eq!(scenario.quays.len(), 5);
        assert_eq!(scenario.cargo.len(), 60);
        assert_eq!(scenario.evaluators.len(), 4);
    }

    #[test]
    fn test_same_seed_same_scenario() {
        let first = ScenarioGenerator::with_seed(42).generate(&config()).unwrap();
        let second = ScenarioGenerator::with_seed(42).generate(&config()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_scenario_reconstructs() {
        for seed in 0..10 {
            let scenario = ScenarioGenerator::with_seed(seed).generate(&config()).unwrap();
            let port = scenario.into_port().unwrap();
            assert_eq!(port.ships().len(), 15);
            assert_eq!(port.time(), 0);
        }
    }

    #[test]
    fn test_imo_numbers_unique() {
        let scenario = ScenarioGenerator::with_seed(3).generate(&config()).unwrap();
        let imos: HashSet<_> = scenario.ships.iter().map(|s| s.imo_number).collect();
        assert_eq!(imos.len(), scenario.ships.len());
    }

    #[test]
    fn test_empty_port() {
        let config = SimulationConfig { ship_count: 0, cargo_count: 0, ..Default::default() };
        let scenario = ScenarioGenerator::with_seed(1).generate(&config).unwrap();
        assert!(scenario.ships.is_empty());
        assert!(scenario.movements.is_empty());
        assert_eq!(scenario.quays.len(), 4);
    }
}

//! Breakdown of warehouse cargo by kind

use crate::cargo::Cargo;
use crate::evaluators::StatisticsEvaluator;
use crate::port::Port;
use crate::types::{BulkCargoType, ContainerType};
use std::any::Any;
use std::collections::BTreeMap;

/// Classifies the cargo stored at a port
#[derive(Debug, Clone, Default)]
pub struct CargoDecompositionEvaluator {
    time: u64,
}

impl CargoDecompositionEvaluator {
    /// Registration name
    pub const NAME: &'static str = "CargoDecompositionEvaluator";

    /// Create an evaluator at minute 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored cargo counted by variant name
    pub fn cargo_distribution(&self, port: &Port) -> BTreeMap<&'static str, usize> {
        let mut distribution = BTreeMap::new();
        for cargo in port.stored_cargo() {
            *distribution.entry(cargo.kind_name()).or_insert(0) += 1;
        }
        distribution
    }

    /// Stored bulk cargo counted by type
    pub fn bulk_cargo_distribution(&self, port: &Port) -> BTreeMap<BulkCargoType, usize> {
        let mut distribution = BTreeMap::new();
        for bulk in port.stored_cargo().iter().filter_map(Cargo::as_bulk) {
            *distribution.entry(bulk.cargo_type).or_insert(0) += 1;
        }
        distribution
    }

    /// Stored containers counted by type
    pub fn container_distribution(&self, port: &Port) -> BTreeMap<ContainerType, usize> {
        let mut distribution = BTreeMap::new();
        for container in port.stored_cargo().iter().filter_map(Cargo::as_container) {
            *distribution.entry(container.container_type).or_insert(0) += 1;
        }
        distribution
    }
}

impl StatisticsEvaluator for CargoDecompositionEvaluator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn current_time(&self) -> u64 {
        self.time
    }

    fn on_elapse_minute(&mut self) {
        self.time += 1;
    }

    fn readings(&self, port: &Port) -> BTreeMap<String, u64> {
        let mut readings: BTreeMap<String, u64> = self
            .cargo_distribution(port)
            .into_iter()
            .map(|(kind, count)| (kind.to_string(), count as u64))
            .collect();
        for (cargo_type, count) in self.bulk_cargo_distribution(port) {
            readings.insert(format!("BulkCargo.{cargo_type}"), count as u64);
        }
        for (container_type, count) in self.container_distribution(port) {
            readings.insert(format!("Container.{container_type}"), count as u64);
        }
        readings
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::{BulkCargo, Container};
    use crate::port::ShipQueue;
    use crate::ship::ShipRegistry;

    fn port() -> Port {
        let stored = vec![
            BulkCargo::new(1, "China", 100, BulkCargoType::Coal).into(),
            BulkCargo::new(2, "China", 200, BulkCargoType::Coal).into(),
            BulkCargo::new(3, "Chile", 300, BulkCargoType::Grain).into(),
            Container::new(4, "Peru", ContainerType::Reefer).into(),
        ];
        Port::with_state("Brisbane", 0, ShipRegistry::new(), ShipQueue::new(), Vec::new(), stored)
            .unwrap()
    }

    #[test]
    fn test_cargo_distribution() {
        let port = port();
        let evaluator = CargoDecompositionEvaluator::new();
        let distribution = evaluator.cargo_distribution(&port);
        assert_eq!(distribution["BulkCargo"], 3);
        assert_eq!(distribution["Container"], 1);
    }

    #[test]
    fn test_typed_distributions() {
        let port = port();
        let evaluator = CargoDecompositionEvaluator::new();
        assert_eq!(evaluator.bulk_cargo_distribution(&port)[&BulkCargoType::Coal], 2);
        assert_eq!(evaluator.bulk_cargo_distribution(&port)[&BulkCargoType::Grain], 1);
        assert_eq!(evaluator.container_distribution(&port)[&ContainerType::Reefer], 1);
        assert!(!evaluator.container_distribution(&port).contains_key(&ContainerType::Tanker));
    }

    #[test]
    fn test_readings() {
        let port = port();
        let readings = CargoDecompositionEvaluator::new().readings(&port);
        assert_eq!(readings["BulkCargo.COAL"], 2);
        assert_eq!(readings["Container.REEFER"], 1);
    }
}

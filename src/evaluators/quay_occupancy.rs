//! Quay occupancy

use crate::evaluators::StatisticsEvaluator;
use crate::port::Port;
use std::any::Any;
use std::collections::BTreeMap;

/// Reports how many quays currently hold a ship
#[derive(Debug, Clone, Default)]
pub struct QuayOccupancyEvaluator {
    time: u64,
}

impl QuayOccupancyEvaluator {
    /// Registration name
    pub const NAME: &'static str = "QuayOccupancyEvaluator";

    /// Create an evaluator at minute 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied quays at the port
    pub fn quays_occupied(&self, port: &Port) -> usize {
        port.quays().iter().filter(|quay| !quay.is_empty()).count()
    }
}

impl StatisticsEvaluator for QuayOccupancyEvaluator {
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
        BTreeMap::from([
            ("quays_occupied".to_string(), self.quays_occupied(port) as u64),
            ("quays_total".to_string(), port.quays().len() as u64),
        ])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{Quay, ShipQueue};
    use crate::ship::{Ship, ShipRegistry};
    use crate::types::{ImoNumber, NauticalFlag, QuayId};

    #[test]
    fn test_counts_occupied_quays() {
        let mut fleet = ShipRegistry::new();
        let ship = Ship::bulk_carrier(1234567, "Bulk", "China", NauticalFlag::Hotel, 10).unwrap();
        fleet.register(ship).unwrap();

        let mut docked = Quay::bulk(QuayId(1), 100);
        docked.ship_arrives(ImoNumber::new(1234567).unwrap()).unwrap();
        let quays = vec![docked, Quay::bulk(QuayId(2), 100), Quay::container(QuayId(3), 5)];

        let port =
            Port::with_state("Brisbane", 0, fleet, ShipQueue::new(), quays, Vec::new()).unwrap();
        let evaluator = QuayOccupancyEvaluator::new();
        assert_eq!(evaluator.quays_occupied(&port), 1);
        assert_eq!(evaluator.readings(&port)["quays_total"], 3);
    }
}

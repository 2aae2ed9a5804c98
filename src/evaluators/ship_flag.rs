//! Distribution of nautical flags among arriving ships

use crate::evaluators::StatisticsEvaluator;
use crate::movement::{Movement, MovementKind};
use crate::port::Port;
use crate::types::{ImoNumber, MovementDirection, NauticalFlag};
use std::any::Any;
use std::collections::BTreeMap;

/// Records the flag each ship was flying when it arrived
#[derive(Debug, Clone, Default)]
pub struct ShipFlagEvaluator {
    time: u64,
    flag_history: BTreeMap<ImoNumber, NauticalFlag>,
}

impl ShipFlagEvaluator {
    /// Registration name
    pub const NAME: &'static str = "ShipFlagEvaluator";

    /// Create an evaluator at minute 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest flag seen for every arrived ship
    pub fn flag_history(&self) -> &BTreeMap<ImoNumber, NauticalFlag> {
        &self.flag_history
    }

    /// Number of arrived ships whose latest flag is `flag`
    pub fn flag_distribution(&self, flag: NauticalFlag) -> usize {
        self.flag_history.values().filter(|seen| **seen == flag).count()
    }

    /// Latest flag seen for one ship
    pub fn flag_status(&self, imo: ImoNumber) -> Option<NauticalFlag> {
        self.flag_history.get(&imo).copied()
    }
}

impl StatisticsEvaluator for ShipFlagEvaluator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn current_time(&self) -> u64 {
        self.time
    }

    fn on_elapse_minute(&mut self) {
        self.time += 1;
    }

    fn on_process_movement(&mut self, movement: &Movement) {
        if let (MovementKind::Ship(ship), MovementDirection::Inbound) =
            (movement.kind(), movement.direction())
        {
            self.flag_history.insert(ship.imo, ship.flag);
        }
    }

    fn readings(&self, _port: &Port) -> BTreeMap<String, u64> {
        NauticalFlag::ALL
            .iter()
            .map(|flag| (flag.to_string(), self.flag_distribution(*flag) as u64))
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::Ship;

    fn arrival(imo: u64, flag: NauticalFlag) -> Movement {
        let ship = Ship::container_ship(imo, "Boxes", "Peru", flag, 10).unwrap();
        Movement::ship(0, MovementDirection::Inbound, &ship)
    }

    #[test]
    fn test_counts_arrivals_by_flag() {
        let mut evaluator = ShipFlagEvaluator::new();
        evaluator.on_process_movement(&arrival(1111111, NauticalFlag::Bravo));
        evaluator.on_process_movement(&arrival(2222222, NauticalFlag::Bravo));
        evaluator.on_process_movement(&arrival(3333333, NauticalFlag::Hotel));

        assert_eq!(evaluator.flag_distribution(NauticalFlag::Bravo), 2);
        assert_eq!(evaluator.flag_distribution(NauticalFlag::Hotel), 1);
        assert_eq!(evaluator.flag_distribution(NauticalFlag::Whiskey), 0);
    }

    #[test]
    fn test_latest_flag_wins() {
        let mut evaluator = ShipFlagEvaluator::new();
        evaluator.on_process_movement(&arrival(1111111, NauticalFlag::Bravo));
        evaluator.on_process_movement(&arrival(1111111, NauticalFlag::November));

        let imo = ImoNumber::new(1111111).unwrap();
        assert_eq!(evaluator.flag_status(imo), Some(NauticalFlag::November));
        assert_eq!(evaluator.flag_history().len(), 1);
    }

    #[test]
    fn test_departures_ignored() {
        let mut evaluator = ShipFlagEvaluator::new();
        let ship = Ship::container_ship(1111111, "Boxes", "Peru", NauticalFlag::Bravo, 10).unwrap();
        evaluator.on_process_movement(&Movement::ship(0, MovementDirection::Outbound, &ship));
        assert!(evaluator.flag_history().is_empty());
    }
}

//! Ships leaving the port per hour

use crate::evaluators::StatisticsEvaluator;
use crate::movement::{Movement, MovementKind};
use crate::port::Port;
use crate::types::MovementDirection;
use std::any::Any;
use std::collections::{BTreeMap, VecDeque};

/// Window over which departures are counted, in minutes
pub const THROUGHPUT_WINDOW: u64 = 60;

/// Counts outbound ship movements over the last hour
#[derive(Debug, Clone, Default)]
pub struct ShipThroughputEvaluator {
    time: u64,
    departures: VecDeque<u64>,
}

impl ShipThroughputEvaluator {
    /// Registration name
    pub const NAME: &'static str = "ShipThroughputEvaluator";

    /// Create an evaluator at minute 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Departures recorded within the last hour
    pub fn throughput_per_hour(&self) -> usize {
        self.departures.len()
    }
}

impl StatisticsEvaluator for ShipThroughputEvaluator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn current_time(&self) -> u64 {
        self.time
    }

    fn on_elapse_minute(&mut self) {
        self.time += 1;
        while let Some(&recorded) = self.departures.front() {
            if self.time - recorded < THROUGHPUT_WINDOW {
                break;
            }
            self.departures.pop_front();
        }
    }

    fn on_process_movement(&mut self, movement: &Movement) {
        if let (MovementKind::Ship(_), MovementDirection::Outbound) =
            (movement.kind(), movement.direction())
        {
            self.departures.push_back(self.time);
        }
    }

    fn readings(&self, _port: &Port) -> BTreeMap<String, u64> {
        BTreeMap::from([("throughput_per_hour".to_string(), self.throughput_per_hour() as u64)])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

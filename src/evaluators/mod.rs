//! Statistics evaluators
//!
//! Evaluators are registered with a [`Port`] and observe the simulation
//! through two callbacks: once per processed movement and once per elapsed
//! minute. The port never looks inside an evaluator beyond the
//! [`StatisticsEvaluator`] trait; callers that need a concrete evaluator back
//! use [`Port::evaluator`].
//!
//! # Usage Example
//!
//! ```rust
//! use port_simulator::evaluators::*;
//! use port_simulator::port::Port;
//!
//! let mut port = Port::new("Brisbane");
//! port.add_statistics_evaluator(Box::new(ShipThroughputEvaluator::new()));
//! port.add_statistics_evaluator("QuayOccupancyEvaluator".parse::<EvaluatorKind>().unwrap().build());
//!
//! port.elapse_one_minute();
//! let throughput = port.evaluator::<ShipThroughputEvaluator>().unwrap();
//! assert_eq!(throughput.current_time(), 1);
//! ```

pub mod cargo_decomposition;
pub mod quay_occupancy;
pub mod ship_flag;
pub mod ship_throughput;

// Re-export all public types for convenience
pub use cargo_decomposition::CargoDecompositionEvaluator;
pub use quay_occupancy::QuayOccupancyEvaluator;
pub use ship_flag::ShipFlagEvaluator;
pub use ship_throughput::ShipThroughputEvaluator;

use crate::movement::Movement;
use crate::port::Port;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Observer of port activity
pub trait StatisticsEvaluator: Any + fmt::Debug {
    /// Name used in configuration, scenario files and reports
    fn name(&self) -> &'static str;

    /// Minutes this evaluator has observed
    fn current_time(&self) -> u64;

    /// Called once at the end of every tick
    fn on_elapse_minute(&mut self);

    /// Called once for every movement the port processes
    fn on_process_movement(&mut self, _movement: &Movement) {}

    /// Named readings for the run report
    fn readings(&self, port: &Port) -> BTreeMap<String, u64>;

    /// Upcast for typed lookup
    fn as_any(&self) -> &dyn Any;
}

/// The evaluators that can be registered by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluatorKind {
    /// [`ShipThroughputEvaluator`]
    ShipThroughput,
    /// [`ShipFlagEvaluator`]
    ShipFlag,
    /// [`QuayOccupancyEvaluator`]
    QuayOccupancy,
    /// [`CargoDecompositionEvaluator`]
    CargoDecomposition,
}

impl EvaluatorKind {
    /// Every evaluator kind
    pub const ALL: [EvaluatorKind; 4] = [
        EvaluatorKind::ShipThroughput,
        EvaluatorKind::ShipFlag,
        EvaluatorKind::QuayOccupancy,
        EvaluatorKind::CargoDecomposition,
    ];

    /// Registration name
    pub fn name(self) -> &'static str {
        match self {
            EvaluatorKind::ShipThroughput => ShipThroughputEvaluator::NAME,
            EvaluatorKind::ShipFlag => ShipFlagEvaluator::NAME,
            EvaluatorKind::QuayOccupancy => QuayOccupancyEvaluator::NAME,
            EvaluatorKind::CargoDecomposition => CargoDecompositionEvaluator::NAME,
        }
    }

    /// Create a fresh evaluator of this kind
    pub fn build(self) -> Box<dyn StatisticsEvaluator> {
        match self {
            EvaluatorKind::ShipThroughput => Box::new(ShipThroughputEvaluator::new()),
            EvaluatorKind::ShipFlag => Box::new(ShipFlagEvaluator::new()),
            EvaluatorKind::QuayOccupancy => Box::new(QuayOccupancyEvaluator::new()),
            EvaluatorKind::CargoDecomposition => Box::new(CargoDecompositionEvaluator::new()),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvaluatorKind {
    type Err = String;

    /// Accepts the registration name or a short form such as `ship-flag`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        let normalized = normalized.strip_suffix("evaluator").unwrap_or(normalized.as_str());
        match normalized {
            "shipthroughput" => Ok(EvaluatorKind::ShipThroughput),
            "shipflag" => Ok(EvaluatorKind::ShipFlag),
            "quayoccupancy" => Ok(EvaluatorKind::QuayOccupancy),
            "cargodecomposition" => Ok(EvaluatorKind::CargoDecomposition),
            _ => Err(format!("Unknown evaluator: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_kind_parse() {
        for kind in EvaluatorKind::ALL {
            assert_eq!(kind.name().parse::<EvaluatorKind>().unwrap(), kind);
        }
        assert_eq!("ship-flag".parse::<EvaluatorKind>().unwrap(), EvaluatorKind::ShipFlag);
        let kind = "quay_occupancy".parse::<EvaluatorKind>().unwrap();
        assert_eq!(kind, EvaluatorKind::QuayOccupancy);
        assert!("ShipSpeedEvaluator".parse::<EvaluatorKind>().is_err());
    }

    #[test]
    fn test_built_evaluators_report_their_name() {
        for kind in EvaluatorKind::ALL {
            let evaluator = kind.build();
            assert_eq!(evaluator.name(), kind.name());
            assert_eq!(evaluator.current_time(), 0);
        }
    }
}

//! Error types and handling
//!
//! This module contains the error types for the port engine and for the
//! simulation harness around it.
//!
//! [`PortError`] is what the engine itself reports: construction errors,
//! temporal ordering errors and illegal-state errors. A `can_dock` or
//! `can_load` predicate returning `false` is never an error.
//! [`SimulationError`] wraps it together with configuration, scenario and
//! I/O failures for the orchestrator and the binary.

use crate::types::{CargoId, ConfigValidationError, ImoNumber, QuayId};
use thiserror::Error;

/// Errors reported by the port engine and its entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// IMO number is not a positive seven digit number
    #[error("Invalid IMO number {0}: must be exactly 7 digits")]
    InvalidImoNumber(u64),

    /// Port clock may not start before zero
    #[error("The time since simulation start must be greater than or equal to 0: {0}")]
    NegativeTime(i64),

    /// A movement was submitted with an action time before the current clock
    #[error("Movement scheduled at minute {time} is in the past (current minute {now})")]
    MovementInPast {
        /// Action time of the rejected movement
        time: u64,
        /// Port clock at submission
        now: u64,
    },

    /// A ship with this IMO number is already known to the port
    #[error("Ship {0} is already registered")]
    DuplicateShip(ImoNumber),

    /// A piece of cargo with this id is already known
    #[error("Cargo {0} is already registered")]
    DuplicateCargo(CargoId),

    /// A quay with this id already exists at the port
    #[error("Quay {0} already exists")]
    DuplicateQuay(QuayId),

    /// A ship is docked at more than one quay
    #[error("Ship {0} is docked at more than one quay")]
    ShipDockedTwice(ImoNumber),

    /// A ship is waiting in the queue while docked, or is queued twice
    #[error("Ship {0} is already queued or docked")]
    ShipAlreadyAtPort(ImoNumber),

    /// Inbound cargo reuses an id already in the warehouse, a hold or a pending delivery
    #[error("Cargo {0} is already at the port or in transit")]
    CargoAlreadyPresent(CargoId),

    /// No ship with this IMO number is known
    #[error("No such ship: {0}")]
    UnknownShip(ImoNumber),

    /// No cargo with this id is known
    #[error("No such cargo: {0}")]
    UnknownCargo(CargoId),

    /// Tried to unload a ship that has nothing aboard
    #[error("Ship {imo} has no cargo to unload")]
    NoSuchCargo {
        /// The empty ship
        imo: ImoNumber,
    },

    /// Tried to dock at a quay that already holds a ship
    #[error("Quay {quay} is already occupied by ship {occupant}")]
    QuayOccupied {
        /// The occupied quay
        quay: QuayId,
        /// The ship currently docked there
        occupant: ImoNumber,
    },

    /// A ship refused a piece of cargo
    #[error("Ship {imo} cannot load cargo {cargo}")]
    CargoRejected {
        /// The loading ship
        imo: ImoNumber,
        /// The refused cargo
        cargo: CargoId,
    },
}

impl PortError {
    /// Whether the error is an illegal-state condition rather than a validation failure
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            PortError::NoSuchCargo { .. }
                | PortError::QuayOccupied { .. }
                | PortError::CargoRejected { .. }
        )
    }
}

/// Result type for port engine operations
pub type PortResult<T> = Result<T, PortError>;

/// Errors that can occur while setting up or running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(#[from] ConfigValidationError),

    /// The port engine rejected an operation
    #[error("Port error: {0}")]
    PortError(#[from] PortError),

    /// Scenario file is inconsistent
    #[error("Scenario error: {0}")]
    ScenarioError(String),

    /// Scenario generation failed
    #[error("Scenario generation failed: {0}")]
    GenerationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Statistics error
    #[error("Statistics error: {0}")]
    StatisticsError(String),
}

impl SimulationError {
    /// Create a scenario error
    pub fn scenario_error(msg: impl Into<String>) -> Self {
        Self::ScenarioError(msg.into())
    }

    /// Create a scenario generation error
    pub fn generation_error(msg: impl Into<String>) -> Self {
        Self::GenerationError(msg.into())
    }

    /// Create a statistics error
    pub fn statistics_error(msg: impl Into<String>) -> Self {
        Self::StatisticsError(msg.into())
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::PortError(e) => !e.is_state_error(),
            SimulationError::ScenarioError(_) => false,
            SimulationError::GenerationError(_) => true,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => false,
            SimulationError::StatisticsError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::PortError(_) => "Port",
            SimulationError::ScenarioError(_) => "Scenario",
            SimulationError::GenerationError(_) => "Generation",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
            SimulationError::StatisticsError(_) => "Statistics",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_port_error_messages() {
        let err = PortError::MovementInPast { time: 3, now: 7 };
        assert_eq!(
            err.to_string(),
            "Movement scheduled at minute 3 is in the past (current minute 7)"
        );

        let err = PortError::NegativeTime(-1);
        assert_eq!(
            err.to_string(),
            "The time since simulation start must be greater than or equal to 0: -1"
        );
    }

    #[test]
    fn test_state_errors_are_distinct() {
        let imo = ImoNumber::new(1234567).unwrap();
        assert!(PortError::NoSuchCargo { imo }.is_state_error());
        assert!(!PortError::MovementInPast { time: 0, now: 1 }.is_state_error());
        assert!(!PortError::InvalidImoNumber(12).is_state_error());
    }

    #[test]
    fn test_error_from_port_error() {
        let sim: SimulationError = PortError::NegativeTime(-5).into();
        assert!(matches!(sim, SimulationError::PortError(PortError::NegativeTime(-5))));
        assert_eq!(sim.category(), "Port");
        assert!(sim.is_recoverable());
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::IoError(_)));
        assert_eq!(sim_error.category(), "IO");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::scenario_error("bad").category(), "Scenario");
        assert_eq!(SimulationError::generation_error("bad").category(), "Generation");
        assert_eq!(SimulationError::statistics_error("bad").category(), "Statistics");
        assert!(!SimulationError::scenario_error("bad").is_recoverable());
    }

    #[test]
    fn test_simulation_result_type() {
        let success: SimulationResult<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: SimulationResult<i32> = Err(SimulationError::scenario_error("Test"));
        assert!(failure.is_err());
    }
}

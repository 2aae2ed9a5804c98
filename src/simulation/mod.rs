//! Simulation orchestration and control
//!
//! This module builds ports from scenario files or the random generator,
//! drives them minute by minute, and collects statistics.
//!
//! # Overview
//!
//! - **SimulationOrchestrator**: Builds the port and runs it for the configured minutes
//! - **ScenarioFile**: JSON description of a port's full state, loadable and savable
//! - **ScenarioGenerator**: Seeded random scenarios for ports with no saved state
//! - **RunStatistics**: Counters and final state of a run, rendered as text or JSON
//! - **SimulationError**: Error handling for everything above the port itself
//!
//! # Usage Example
//!
//! ```rust
//! use port_simulator::simulation::*;
//! use port_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     seed: Some(7),
//!     minutes: 30,
//!     ..Default::default()
//! };
//!
//! let mut orchestrator = SimulationOrchestrator::new(config).unwrap();
//! let stats = orchestrator.run().unwrap();
//! assert_eq!(stats.minutes_simulated, 30);
//! ```

pub mod error;
pub mod generator;
pub mod logging;
pub mod orchestrator;
pub mod scenario;
pub mod statistics;

// Re-export all public types for convenience
pub use error::*;
pub use generator::*;
pub use logging::*;
pub use orchestrator::*;
pub use scenario::*;
pub use statistics::*;

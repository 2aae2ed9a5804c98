//! Port Simulator
//!
//! A minute-by-minute simulation of a shipping port: ships arrive and wait
//! for a quay, docked ships are unloaded into the warehouse, departing ships
//! take on cargo bound for their home country, and pluggable evaluators
//! observe every minute and every movement.
//!
//! # Overview
//!
//! The port runs on a single integer clock. Each call to
//! [`Port::elapse_one_minute`] advances it by one minute and then, in order:
//!
//! - every 10 minutes docks the highest priority waiting ship at each empty
//!   compatible quay
//! - otherwise, every 5 minutes unloads every docked ship into the warehouse
//! - processes every movement scheduled for the current minute
//! - notifies every registered evaluator
//!
//! ## Quick Start
//!
//! ```rust
//! use port_simulator::*;
//!
//! let config = SimulationConfig {
//!     seed: Some(42),
//!     minutes: 60,
//!     ..Default::default()
//! };
//!
//! let mut orchestrator = SimulationOrchestrator::new(config)?;
//! let stats = orchestrator.run()?;
//! println!("{}", stats.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, and configuration
//! - [`cargo`]: Bulk cargo and containers
//! - [`ship`]: Bulk carriers, container ships, and the fleet registry
//! - [`port`]: Quays, the ship queue, and the port controller
//! - [`movement`]: Scheduled ship and cargo movements
//! - [`evaluators`]: Statistics evaluators observing the port
//! - [`simulation`]: Scenario files, generation, orchestration, and reporting
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Cargo     │    │    Ship     │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ BulkCargo   │◄───┤ Carriers    │
//! │ Enums       │    │ Container   │    │ Registry    │
//! │ Config      │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Movement   │    │    Port     │    │ Simulation  │
//! │             │    │             │    │             │
//! │ Movements   │◄───┤ Quays       │◄───┤ Orchestrator│
//! │ Queue       │    │ ShipQueue   │    │ Scenario    │
//! │             │    │ Evaluators  │    │ Statistics  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod cargo;
pub mod evaluators;
pub mod movement;
pub mod port;
pub mod ship;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    BulkCargoType,
    CargoId,
    // Configuration
    CliArgs,
    ConfigValidationError,
    ContainerType,
    // Identifiers
    ImoNumber,
    MovementDirection,
    // Enums
    NauticalFlag,
    QuayId,
    ReportFormat,
    RunId,
    SimulationConfig,
};

// Cargo and ships
pub use cargo::{BulkCargo, Cargo, CargoRegistry, Container};
pub use ship::{BulkCarrier, ContainerShip, RejectedCargo, Ship, ShipKind, ShipRegistry};

// Port and movements
pub use movement::{Movement, MovementKind, MovementQueue, ShipMovement};
pub use port::{Port, Quay, QuayKind, ShipQueue, TickPhase, TickReport};

// Evaluators
pub use evaluators::{
    CargoDecompositionEvaluator, EvaluatorKind, QuayOccupancyEvaluator, ShipFlagEvaluator,
    ShipThroughputEvaluator, StatisticsEvaluator,
};

// Simulation control
pub use simulation::{
    LoggingConfig, PortError, PortResult, RunStatistics, ScenarioFile, ScenarioGenerator,
    SimulationError, SimulationOrchestrator, SimulationResult,
};

//! Core types and identifiers for the port simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: validated IMO numbers, cargo and quay ids, and UUID run ids
//! - **Enums**: nautical flags, movement directions, cargo and container types
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use port_simulator::types::*;
//!
//! // IMO numbers are validated on construction
//! let imo = ImoNumber::new(2325336).unwrap();
//! assert!(ImoNumber::new(123).is_err());
//!
//! // Enums parse case-insensitively
//! let flag: NauticalFlag = "bravo".parse().unwrap();
//! assert_eq!(flag.to_string(), "BRAVO");
//!
//! // Configure simulation
//! let config = SimulationConfig {
//!     minutes: 60,
//!     quay_count: 2,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! # let _ = imo;
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;

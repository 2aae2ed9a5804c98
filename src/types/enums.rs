//! Enumeration types for the port simulator
//!
//! This module contains the enumerations used throughout the simulation:
//! nautical flags, movement directions, cargo kinds and report formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operational signal flown by a ship, used to prioritise docking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NauticalFlag {
    /// Carrying dangerous cargo
    Bravo,
    /// Ready to dock
    Hotel,
    /// No special status
    November,
    /// Requires medical assistance
    Whiskey,
}

impl NauticalFlag {
    /// All flags in declaration order
    pub const ALL: [NauticalFlag; 4] =
        [NauticalFlag::Bravo, NauticalFlag::Hotel, NauticalFlag::November, NauticalFlag::Whiskey];
}

impl fmt::Display for NauticalFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NauticalFlag::Bravo => write!(f, "BRAVO"),
            NauticalFlag::Hotel => write!(f, "HOTEL"),
            NauticalFlag::November => write!(f, "NOVEMBER"),
            NauticalFlag::Whiskey => write!(f, "WHISKEY"),
        }
    }
}

impl FromStr for NauticalFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bravo" => Ok(NauticalFlag::Bravo),
            "hotel" => Ok(NauticalFlag::Hotel),
            "november" => Ok(NauticalFlag::November),
            "whiskey" => Ok(NauticalFlag::Whiskey),
            _ => Err(format!("Unknown nautical flag: {}", s)),
        }
    }
}

/// Direction of a movement relative to the port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementDirection {
    /// Entering the port
    Inbound,
    /// Leaving the port
    Outbound,
}

impl fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementDirection::Inbound => write!(f, "INBOUND"),
            MovementDirection::Outbound => write!(f, "OUTBOUND"),
        }
    }
}

impl FromStr for MovementDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inbound" | "in" => Ok(MovementDirection::Inbound),
            "outbound" | "out" => Ok(MovementDirection::Outbound),
            _ => Err(format!("Unknown movement direction: {}", s)),
        }
    }
}

/// Kinds of bulk cargo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulkCargoType {
    /// Coal
    Coal,
    /// Grain
    Grain,
    /// Ores and minerals
    Minerals,
    /// Crude or refined oil
    Oil,
    /// Anything else
    Other,
}

impl BulkCargoType {
    /// All bulk cargo types
    pub const ALL: [BulkCargoType; 5] = [
        BulkCargoType::Coal,
        BulkCargoType::Grain,
        BulkCargoType::Minerals,
        BulkCargoType::Oil,
        BulkCargoType::Other,
    ];
}

impl fmt::Display for BulkCargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkCargoType::Coal => write!(f, "COAL"),
            BulkCargoType::Grain => write!(f, "GRAIN"),
            BulkCargoType::Minerals => write!(f, "MINERALS"),
            BulkCargoType::Oil => write!(f, "OIL"),
            BulkCargoType::Other => write!(f, "OTHER"),
        }
    }
}

impl FromStr for BulkCargoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coal" => Ok(BulkCargoType::Coal),
            "grain" => Ok(BulkCargoType::Grain),
            "minerals" | "mineral" => Ok(BulkCargoType::Minerals),
            "oil" => Ok(BulkCargoType::Oil),
            "other" => Ok(BulkCargoType::Other),
            _ => Err(format!("Unknown bulk cargo type: {}", s)),
        }
    }
}

/// Kinds of shipping containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerType {
    /// Open-top container
    OpenTop,
    /// Anything else
    Other,
    /// Refrigerated container
    Reefer,
    /// Standard dry container
    Standard,
    /// Tank container
    Tanker,
}

impl ContainerType {
    /// All container types
    pub const ALL: [ContainerType; 5] = [
        ContainerType::OpenTop,
        ContainerType::Other,
        ContainerType::Reefer,
        ContainerType::Standard,
        ContainerType::Tanker,
    ];
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerType::OpenTop => write!(f, "OPEN_TOP"),
            ContainerType::Other => write!(f, "OTHER"),
            ContainerType::Reefer => write!(f, "REEFER"),
            ContainerType::Standard => write!(f, "STANDARD"),
            ContainerType::Tanker => write!(f, "TANKER"),
        }
    }
}

impl FromStr for ContainerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open_top" | "open top" | "opentop" => Ok(ContainerType::OpenTop),
            "other" => Ok(ContainerType::Other),
            "reefer" => Ok(ContainerType::Reefer),
            "standard" => Ok(ContainerType::Standard),
            "tanker" => Ok(ContainerType::Tanker),
            _ => Err(format!("Unknown container type: {}", s)),
        }
    }
}

/// Format of the final run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

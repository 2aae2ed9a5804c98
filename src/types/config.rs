//! Configuration structures for the port simulator
//!
//! This module contains the simulation configuration structure, the command
//! line interface and the validation logic that controls a simulation run.

use super::ReportFormat;
use crate::evaluators::EvaluatorKind;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "port-simulator",
    version = "0.1.0",
    about = "Port Simulator - Minute-by-minute simulation of a shipping port",
    long_about = "Simulates a shipping port one minute at a time: ships arrive and queue for a quay, docked ships are unloaded into the warehouse, departing ships take on cargo bound for their home country, and statistics evaluators observe every movement.

EXAMPLES:
    # Run a generated port with default settings
    port-simulator

    # Run a saved scenario for two simulated hours
    port-simulator --scenario port.json --minutes 120

    # Reproducible generated run with JSON report
    port-simulator --seed 42 --ships 20 --quays 6 --report-format json

    # Only track throughput and flags
    port-simulator --evaluator ShipThroughputEvaluator --evaluator ship-flag

    # Save the port state after the run
    port-simulator --seed 42 --snapshot-output after.json

    # Generate configuration template
    port-simulator --print-config > my-config.json

    # Validate configuration without running
    port-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Scenario file to load instead of generating a port
    #[arg(
        short,
        long,
        help = "Scenario file to load (JSON format)",
        long_help = "Path to a JSON scenario file describing the port, its ships, cargo, quays and pending movements. When omitted a random port is generated."
    )]
    pub scenario: Option<String>,

    /// Name of a generated port
    #[arg(long, help = "Name of the generated port")]
    pub port_name: Option<String>,

    /// Number of minutes to simulate
    #[arg(
        short,
        long,
        help = "Number of minutes to simulate",
        long_help = "Number of simulated minutes to run. Must be greater than 0. Default: 120"
    )]
    pub minutes: Option<u64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Number of ships in a generated port
    #[arg(long, help = "Number of ships to generate")]
    pub ships: Option<usize>,

    /// Number of quays in a generated port
    #[arg(
        long,
        help = "Number of quays to generate",
        long_help = "Number of quays to generate. Must be greater than 0 unless a scenario file is given. Default: 4"
    )]
    pub quays: Option<usize>,

    /// Number of pieces of cargo in a generated port
    #[arg(long, help = "Number of pieces of cargo to generate")]
    pub cargo: Option<usize>,

    /// Evaluators to register, by name
    #[arg(
        short,
        long = "evaluator",
        help = "Statistics evaluator to register (repeatable)",
        long_help = "Statistics evaluator to register. May be given several times. Accepts ShipThroughputEvaluator, ShipFlagEvaluator, QuayOccupancyEvaluator, CargoDecompositionEvaluator or short forms such as ship-flag. Default: all four"
    )]
    pub evaluators: Vec<String>,

    /// Format of the final report
    #[arg(
        long,
        help = "Report format (text or json)",
        long_help = "Format of the run report printed at the end. Supported formats: text, json. Default: text"
    )]
    pub report_format: Option<String>,

    /// Where to save the port state after the run
    #[arg(long, help = "Write the final port state as a scenario file")]
    pub snapshot_output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Name of a generated port
    pub port_name: Option<String>,
    /// Number of minutes to simulate
    pub minutes: Option<u64>,
    /// Scenario file to load
    pub scenario: Option<String>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Number of ships in a generated port
    pub ship_count: Option<usize>,
    /// Number of quays in a generated port
    pub quay_count: Option<usize>,
    /// Number of pieces of cargo in a generated port
    pub cargo_count: Option<usize>,
    /// Evaluators to register
    pub evaluators: Option<Vec<String>>,
    /// Format of the final report
    pub report_format: Option<String>,
    /// Where to save the port state after the run
    pub snapshot_output: Option<String>,
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Name of a generated port
    pub port_name: String,
    /// Number of minutes to simulate
    pub minutes: u64,
    /// Scenario file to load; a port is generated when absent
    pub scenario: Option<String>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Number of ships in a generated port
    pub ship_count: usize,
    /// Number of quays in a generated port
    pub quay_count: usize,
    /// Number of pieces of cargo in a generated port
    pub cargo_count: usize,
    /// Evaluators to register, by name
    pub evaluators: Vec<String>,
    /// Format of the final report
    pub report_format: String,
    /// Where to save the port state after the run
    pub snapshot_output: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Minute count is invalid
    #[error("Minutes to simulate must be greater than 0, got {0}")]
    InvalidMinutes(u64),

    /// Quay count is invalid for a generated port
    #[error("Quay count must be greater than 0 when no scenario is given, got {0}")]
    InvalidQuayCount(usize),

    /// Port name is empty
    #[error("Port name must not be empty")]
    EmptyPortName,

    /// Evaluator name is not recognised
    #[error("Unknown statistics evaluator: {0}")]
    UnknownEvaluator(String),

    /// Report format is not recognised
    #[error("Unknown report format: {0} (supported: text, json)")]
    UnknownReportFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            port_name: "Brisbane".to_string(),
            minutes: 120,
            scenario: None,
            seed: None,
            ship_count: 12,
            quay_count: 4,
            cargo_count: 40,
            evaluators: EvaluatorKind::ALL.iter().map(|kind| kind.name().to_string()).collect(),
            report_format: "text".to_string(),
            snapshot_output: None,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            port_name: config_file.port_name.unwrap_or(defaults.port_name),
            minutes: config_file.minutes.unwrap_or(defaults.minutes),
            scenario: config_file.scenario.or(defaults.scenario),
            seed: config_file.seed.or(defaults.seed),
            ship_count: config_file.ship_count.unwrap_or(defaults.ship_count),
            quay_count: config_file.quay_count.unwrap_or(defaults.quay_count),
            cargo_count: config_file.cargo_count.unwrap_or(defaults.cargo_count),
            evaluators: config_file.evaluators.unwrap_or(defaults.evaluators),
            report_format: config_file.report_format.unwrap_or(defaults.report_format),
            snapshot_output: config_file.snapshot_output.or(defaults.snapshot_output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.port_name {
            config.port_name = value;
        }
        if let Some(value) = args.minutes {
            config.minutes = value;
        }
        if let Some(value) = args.scenario {
            config.scenario = Some(value);
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.ships {
            config.ship_count = value;
        }
        if let Some(value) = args.quays {
            config.quay_count = value;
        }
        if let Some(value) = args.cargo {
            config.cargo_count = value;
        }
        if !args.evaluators.is_empty() {
            config.evaluators = args.evaluators;
        }
        if let Some(value) = args.report_format {
            config.report_format = value;
        }
        if let Some(value) = args.snapshot_output {
            config.snapshot_output = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.minutes == 0 {
            return Err(ConfigValidationError::InvalidMinutes(self.minutes));
        }

        if self.scenario.is_none() {
            if self.quay_count == 0 {
                return Err(ConfigValidationError::InvalidQuayCount(self.quay_count));
            }
            if self.port_name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyPortName);
            }
        }

        self.evaluator_kinds()?;
        self.get_report_format()?;

        Ok(())
    }

    /// Parse the configured evaluator names
    pub fn evaluator_kinds(&self) -> Result<Vec<EvaluatorKind>, ConfigValidationError> {
        self.evaluators
            .iter()
            .map(|name| {
                name.parse::<EvaluatorKind>()
                    .map_err(|_| ConfigValidationError::UnknownEvaluator(name.clone()))
            })
            .collect()
    }

    /// Get the report format as an enum value
    pub fn get_report_format(&self) -> Result<ReportFormat, ConfigValidationError> {
        self.report_format
            .parse()
            .map_err(|_| ConfigValidationError::UnknownReportFormat(self.report_format.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();
        assert_eq!(config.port_name, "Brisbane");
        assert_eq!(config.minutes, 120);
        assert!(config.scenario.is_none());
        assert!(config.seed.is_none());
        assert_eq!(config.ship_count, 12);
        assert_eq!(config.quay_count, 4);
        assert_eq!(config.cargo_count, 40);
        assert_eq!(config.evaluators.len(), 4);
        assert_eq!(config.report_format, "text");
        config.validate().unwrap();
    }

    #[test]
    fn test_cli_parsing() {
        let args = vec![
            "test",
            "--minutes",
            "30",
            "--evaluator",
            "ship-flag",
            "--evaluator",
            "QuayOccupancyEvaluator",
            "--report-format",
            "json",
        ];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(cli_args.minutes, Some(30));
        assert_eq!(cli_args.evaluators, vec!["ship-flag", "QuayOccupancyEvaluator"]);

        let config = SimulationConfig::from_cli_args(cli_args).unwrap();
        assert_eq!(
            config.evaluator_kinds().unwrap(),
            vec![EvaluatorKind::ShipFlag, EvaluatorKind::QuayOccupancy]
        );
        assert_eq!(config.get_report_format().unwrap(), ReportFormat::Json);
    }

    #[test]
    fn test_cli_defaults_leave_config_untouched() {
        let cli_args = CliArgs::try_parse_from(vec!["test"]).unwrap();
        let config = SimulationConfig::from_cli_args(cli_args).unwrap();
        assert_eq!(config.minutes, 120);
        assert_eq!(config.evaluators.len(), 4);
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "port_name": "Rotterdam",
            "minutes": 600,
            "seed": 12345,
            "quay_count": 8,
            "evaluators": ["ShipThroughputEvaluator"]
        }"#;
        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.port_name, "Rotterdam");
        assert_eq!(config.minutes, 600);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.quay_count, 8);
        assert_eq!(config.evaluators, vec!["ShipThroughputEvaluator"]);
        // Defaults for everything the file leaves out
        assert_eq!(config.ship_count, 12);
        assert_eq!(config.report_format, "text");
    }

    #[test]
    fn test_cli_overrides_file() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(br#"{"minutes": 600, "seed": 1}"#).unwrap();
        temp_file.flush().unwrap();

        let path = temp_file.path().to_string_lossy().to_string();
        let args =
            CliArgs::try_parse_from(vec!["test", "--config", &path, "--minutes", "45"]).unwrap();
        let config = SimulationConfig::from_cli_args(args).unwrap();
        assert_eq!(config.minutes, 45);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        assert!(matches!(
            SimulationConfig::from_file("/nonexistent/config.json"),
            Err(ConfigError::FileNotFound(_))
        ));

        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            SimulationConfig::from_file(temp_file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        let config = SimulationConfig { minutes: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidMinutes(0))));

        let config = SimulationConfig { quay_count: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidQuayCount(0))));

        let config = SimulationConfig {
            quay_count: 0,
            scenario: Some("port.json".to_string()),
            ..Default::default()
        };
        config.validate().unwrap();

        let config = SimulationConfig {
            evaluators: vec!["ShipSpeedEvaluator".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigValidationError::UnknownEvaluator(_))));

        let config = SimulationConfig { report_format: "csv".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::UnknownReportFormat(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let config = SimulationConfig { minutes: 77, seed: Some(9), ..Default::default() };
        config.save_to_file(temp_file.path()).unwrap();

        let loaded = SimulationConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.minutes, 77);
        assert_eq!(loaded.seed, Some(9));
    }
}

//! Main simulation orchestrator
//!
//! This module contains the SimulationOrchestrator, which builds a port from
//! a scenario file or the generator, registers the configured evaluators and
//! drives the port minute by minute while collecting statistics.

use crate::port::{Port, TickReport};
use crate::simulation::{RunStatistics, ScenarioFile, ScenarioGenerator, SimulationResult};
use crate::types::{ReportFormat, SimulationConfig};
use tracing::{debug, info, instrument};

/// Drives a port for the configured number of minutes
#[derive(Debug)]
pub struct SimulationOrchestrator {
    config: SimulationConfig,
    port: Port,
    statistics: RunStatistics,
}

impl SimulationOrchestrator {
    /// Build the port described by `config`
    ///
    /// Loads the scenario file if one is configured and otherwise generates
    /// a port, seeded when `config.seed` is set.
    #[instrument(skip(config), fields(minutes = config.minutes, scenario = ?config.scenario))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let scenario = match &config.scenario {
            Some(path) => {
                info!("Loading scenario from {}", path);
                ScenarioFile::load(path)?
            }
            None => {
                let mut generator = match config.seed {
                    Some(seed) => {
                        info!("Using deterministic seed: {}", seed);
                        ScenarioGenerator::with_seed(seed)
                    }
                    None => {
                        debug!("Using entropy-based random seed");
                        ScenarioGenerator::new()
                    }
                };
                generator.generate(&config)?
            }
        };

        Self::from_scenario(config, scenario)
    }

    /// Build the port from an already loaded scenario
    pub fn from_scenario(
        config: SimulationConfig,
        scenario: ScenarioFile,
    ) -> SimulationResult<Self> {
        let port = scenario.into_port()?;
        Self::with_port(config, port)
    }

    /// Drive an existing port
    ///
    /// Configured evaluators not already registered with the port are added.
    pub fn with_port(config: SimulationConfig, mut port: Port) -> SimulationResult<Self> {
        for kind in config.evaluator_kinds()? {
            if port.evaluators().iter().all(|evaluator| evaluator.name() != kind.name()) {
                port.add_statistics_evaluator(kind.build());
            }
        }

        let statistics = RunStatistics::new(&port);
        info!(
            port = port.name(),
            ships = port.ships().len(),
            quays = port.quays().len(),
            evaluators = port.evaluators().len(),
            "Orchestrator initialized"
        );
        Ok(Self { config, port, statistics })
    }

    /// Advance the port by one minute
    pub fn step(&mut self) -> TickReport {
        let report = self.port.elapse_one_minute();
        self.statistics.record_tick(&report);
        if !report.docked.is_empty() || report.cargo_unloaded > 0 {
            debug!(
                time = report.time,
                docked = report.docked.len(),
                unloaded = report.cargo_unloaded,
                "Tick complete"
            );
        }
        report
    }

    /// Run for the configured number of minutes
    #[instrument(skip(self), fields(port = %self.port.name(), minutes = self.config.minutes))]
    pub fn run(&mut self) -> SimulationResult<&RunStatistics> {
        info!("Starting simulation at minute {}", self.port.time());

        for _ in 0..self.config.minutes {
            self.step();
        }
        self.statistics.finish(&self.port);

        if let Some(path) = &self.config.snapshot_output {
            ScenarioFile::from_port(&self.port).save(path)?;
            info!("Saved port snapshot to {}", path);
        }

        info!("Simulation finished: {}", self.statistics.summary());
        Ok(&self.statistics)
    }

    /// The simulated port
    pub fn port(&self) -> &Port {
        &self.port
    }

    /// Statistics collected so far
    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// The configuration driving this run
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current state of the port as a scenario
    pub fn snapshot(&self) -> ScenarioFile {
        ScenarioFile::from_port(&self.port)
    }

    /// Render the statistics in the configured report format
    pub fn render_report(&self) -> SimulationResult<String> {
        match self.config.get_report_format()? {
            ReportFormat::Text => Ok(self.statistics.generate_summary_report()),
            ReportFormat::Json => self.statistics.to_json(),
        }
    }

    /// Hand the port back to the caller
    pub fn into_port(self) -> Port {
        self.port
    }
}

//! Statistics collection and reporting
//!
//! [`RunStatistics`] accumulates the [`TickReport`]s of a run and, once the
//! run finishes, records the final state of the port and every evaluator's
//! readings.

use crate::port::{Port, TickPhase, TickReport};
use crate::simulation::SimulationResult;
use crate::types::RunId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Aggregated statistics for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Unique identifier of the run
    pub run_id: RunId,
    /// Name of the simulated port
    pub port_name: String,
    /// Wall-clock time the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock time the run finished
    pub finished_at: Option<DateTime<Utc>>,
    /// Port clock when the run started
    pub start_minute: u64,

    // Per-tick counters
    /// Minutes simulated
    pub minutes_simulated: u64,
    /// Ticks that ran the docking phase
    pub docking_phases: u64,
    /// Ticks that ran the unloading phase
    pub unloading_phases: u64,
    /// Ships docked at a quay
    pub ships_docked: usize,
    /// Pieces of cargo unloaded into the warehouse
    pub cargo_unloaded: usize,
    /// Movements processed
    pub movements_processed: usize,
    /// Movements discarded because their minute had passed
    pub stale_movements: usize,

    // Final state
    /// Ships still waiting to dock
    pub final_queue_length: usize,
    /// Quays holding a ship at the end
    pub occupied_quays: usize,
    /// Quays at the port
    pub total_quays: usize,
    /// Pieces of cargo in the warehouse at the end
    pub stored_cargo: usize,
    /// Movements still pending at the end
    pub pending_movements: usize,
    /// Readings of every registered evaluator, keyed by evaluator name
    pub evaluator_readings: BTreeMap<String, BTreeMap<String, u64>>,

    /// Wall-clock duration of the run
    pub run_duration: Duration,
}

impl RunStatistics {
    /// Start collecting statistics for a run on `port`
    pub fn new(port: &Port) -> Self {
        Self {
            run_id: RunId::new(),
            port_name: port.name().to_string(),
            started_at: Utc::now(),
            finished_at: None,
            start_minute: port.time(),
            minutes_simulated: 0,
            docking_phases: 0,
            unloading_phases: 0,
            ships_docked: 0,
            cargo_unloaded: 0,
            movements_processed: 0,
            stale_movements: 0,
            final_queue_length: port.ship_queue().len(),
            occupied_quays: 0,
            total_quays: port.quays().len(),
            stored_cargo: port.stored_cargo().len(),
            pending_movements: port.movements().len(),
            evaluator_readings: BTreeMap::new(),
            run_duration: Duration::from_secs(0),
        }
    }

    /// Fold one tick into the counters
    pub fn record_tick(&mut self, report: &TickReport) {
        self.minutes_simulated += 1;
        match report.phase {
            TickPhase::Docking => self.docking_phases += 1,
            TickPhase::Unloading => self.unloading_phases += 1,
            TickPhase::None => {}
        }
        self.ships_docked += report.docked.len();
        self.cargo_unloaded += report.cargo_unloaded;
        self.movements_processed += report.movements_processed;
        self.stale_movements += report.stale_movements;
    }

    /// Record the final state of the port
    pub fn finish(&mut self, port: &Port) {
        let finished_at = Utc::now();
        self.run_duration = (finished_at - self.started_at).to_std().unwrap_or_default();
        self.finished_at = Some(finished_at);

        self.final_queue_length = port.ship_queue().len();
        self.occupied_quays = port.quays().iter().filter(|quay| !quay.is_empty()).count();
        self.total_quays = port.quays().len();
        self.stored_cargo = port.stored_cargo().len();
        self.pending_movements = port.movements().len();
        self.evaluator_readings = port
            .evaluators()
            .iter()
            .map(|evaluator| (evaluator.name().to_string(), evaluator.readings(port)))
            .collect();
    }

    /// Port clock at the end of the run
    pub fn end_minute(&self) -> u64 {
        self.start_minute + self.minutes_simulated
    }

    /// Percentage of quays occupied at the end of the run
    pub fn quay_occupancy_percentage(&self) -> f64 {
        if self.total_quays == 0 {
            0.0
        } else {
            (self.occupied_quays as f64 / self.total_quays as f64) * 100.0
        }
    }

    /// Average ships docked per docking phase
    pub fn average_ships_per_docking_phase(&self) -> f64 {
        if self.docking_phases == 0 {
            0.0
        } else {
            self.ships_docked as f64 / self.docking_phases as f64
        }
    }

    /// Movements processed per simulated hour
    pub fn movements_per_hour(&self) -> f64 {
        if self.minutes_simulated == 0 {
            0.0
        } else {
            self.movements_processed as f64 * 60.0 / self.minutes_simulated as f64
        }
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} minutes simulated | {} ships docked | {} cargo unloaded | {} movements processed | {} ships waiting",
            self.minutes_simulated,
            self.ships_docked,
            self.cargo_unloaded,
            self.movements_processed,
            self.final_queue_length
        )
    }

    /// Multi-line report for the terminal
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Port Simulation Report ===\n\n");
        report.push_str(&format!("Run: {}\n", self.run_id));
        report.push_str(&format!("Port: {}\n", self.port_name));
        report.push_str(&format!(
            "Minutes: {} to {} ({} simulated)\n",
            self.start_minute,
            self.end_minute(),
            self.minutes_simulated
        ));
        report.push_str(&format!(
            "Wall-clock Duration: {:.3} seconds\n\n",
            self.run_duration.as_secs_f64()
        ));

        report.push_str("Activity:\n");
        report.push_str(&format!(
            "  • Docking Phases: {} ({} ships docked, avg {:.2}/phase)\n",
            self.docking_phases,
            self.ships_docked,
            self.average_ships_per_docking_phase()
        ));
        report.push_str(&format!(
            "  • Unloading Phases: {} ({} cargo unloaded)\n",
            self.unloading_phases, self.cargo_unloaded
        ));
        report.push_str(&format!(
            "  • Movements Processed: {} ({:.1}/hour)\n",
            self.movements_processed,
            self.movements_per_hour()
        ));
        if self.stale_movements > 0 {
            report
                .push_str(&format!("  • Stale Movements Discarded: {}\n", self.stale_movements));
        }

        report.push_str("\nFinal State:\n");
        report.push_str(&format!("  • Ships Waiting: {}\n", self.final_queue_length));
        report.push_str(&format!(
            "  • Quays Occupied: {}/{} ({:.1}%)\n",
            self.occupied_quays,
            self.total_quays,
            self.quay_occupancy_percentage()
        ));
        report.push_str(&format!("  • Cargo in Warehouse: {}\n", self.stored_cargo));
        report.push_str(&format!("  • Pending Movements: {}\n", self.pending_movements));

        if !self.evaluator_readings.is_empty() {
            report.push_str("\nEvaluators:\n");
            for (name, readings) in &self.evaluator_readings {
                report.push_str(&format!("  {}:\n", name));
                for (key, value) in readings {
                    report.push_str(&format!("    • {}: {}\n", key, value));
                }
            }
        }

        report
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluators::QuayOccupancyEvaluator;
    use crate::port::Quay;
    use crate::types::{ImoNumber, QuayId};

    fn report(time: u64, phase: TickPhase) -> TickReport {
        TickReport {
            time,
            phase,
            docked: Vec::new(),
            cargo_unloaded: 0,
            movements_processed: 0,
            stale_movements: 0,
        }
    }

    #[test]
    fn test_record_tick() {
        let port = Port::new("Brisbane");
        let mut stats = RunStatistics::new(&port);

        let mut docking = report(10, TickPhase::Docking);
        docking.docked.push((QuayId(1), ImoNumber::new(1234567).unwrap()));
        docking.movements_processed = 2;
        stats.record_tick(&docking);

        let mut unloading = report(15, TickPhase::Unloading);
        unloading.cargo_unloaded = 4;
        stats.record_tick(&unloading);
        stats.record_tick(&report(16, TickPhase::None));

        assert_eq!(stats.minutes_simulated, 3);
        assert_eq!(stats.docking_phases, 1);
        assert_eq!(stats.unloading_phases, 1);
        assert_eq!(stats.ships_docked, 1);
        assert_eq!(stats.cargo_unloaded, 4);
        assert_eq!(stats.movements_processed, 2);
        assert_eq!(stats.movements_per_hour(), 40.0);
    }

    #[test]
    fn test_finish_captures_final_state() {
        let mut port = Port::new("Brisbane");
        port.add_quay(Quay::bulk(QuayId(1), 100)).unwrap();
        port.add_quay(Quay::container(QuayId(2), 10)).unwrap();
        port.add_statistics_evaluator(Box::new(QuayOccupancyEvaluator::new()));

        let mut stats = RunStatistics::new(&port);
        stats.finish(&port);

        assert!(stats.finished_at.is_some());
        assert_eq!(stats.total_quays, 2);
        assert_eq!(stats.occupied_quays, 0);
        assert_eq!(stats.quay_occupancy_percentage(), 0.0);
        assert_eq!(stats.evaluator_readings["QuayOccupancyEvaluator"]["quays_total"], 2);
    }

    #[test]
    fn test_report_rendering() {
        let port = Port::new("Brisbane");
        let mut stats = RunStatistics::new(&port);
        stats.record_tick(&report(1, TickPhase::None));
        stats.finish(&port);

        let text = stats.generate_summary_report();
        assert!(text.contains("Port: Brisbane"));
        assert!(text.contains("Minutes: 0 to 1 (1 simulated)"));
        assert!(stats.summary().starts_with("1 minutes simulated"));

        let json: serde_json::Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();
        assert_eq!(json["port_name"], "Brisbane");
        assert!(json["run_id"].as_str().unwrap().starts_with("RUN_"));
    }

    #[test]
    fn test_empty_run_averages() {
        let stats = RunStatistics::new(&Port::new("Brisbane"));
        assert_eq!(stats.average_ships_per_docking_phase(), 0.0);
        assert_eq!(stats.movements_per_hour(), 0.0);
    }
}

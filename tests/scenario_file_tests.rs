//! Tests for loading, running and saving scenario files

use port_simulator::evaluators::ShipFlagEvaluator;
use port_simulator::simulation::{
    ScenarioFile, ScenarioGenerator, SimulationError, SimulationOrchestrator,
};
use port_simulator::types::{CargoId, ImoNumber, NauticalFlag, SimulationConfig};
use std::fs;
use tempfile::TempDir;

const HARBOUR: &str = r#"{
    "name": "Harbour",
    "time": 8,
    "cargo": [
        {"kind": "BulkCargo", "id": 1, "destination": "China", "tonnage": 400, "type": "COAL"},
        {"kind": "Container", "id": 2, "destination": "Japan", "type": "REEFER"},
        {"kind": "Container", "id": 3, "destination": "Japan", "type": "OPEN_TOP"}
    ],
    "ships": [
        {"imo_number": 1234567, "name": "Glorious", "origin_flag": "China", "flag": "WHISKEY",
         "kind": "BulkCarrier", "capacity": 500, "cargo": [1]},
        {"imo_number": 7654321, "name": "Endeavour", "origin_flag": "Japan", "flag": "NOVEMBER",
         "kind": "ContainerShip", "capacity": 20}
    ],
    "quays": [
        {"id": 1, "kind": "BulkQuay", "max_tonnage": 1000},
        {"id": 2, "kind": "ContainerQuay", "max_containers": 50, "ship": 7654321}
    ],
    "ship_queue": [1234567],
    "stored_cargo": [2],
    "movements": [
        {"time": 12, "direction": "INBOUND", "kind": "CargoMovement", "cargo": [3]},
        {"time": 14, "direction": "OUTBOUND", "kind": "ShipMovement", "imo_number": 7654321}
    ],
    "evaluators": ["ShipFlagEvaluator"]
}"#;

fn write_harbour(dir: &TempDir) -> String {
    let path = dir.path().join("harbour.json");
    fs::write(&path, HARBOUR).unwrap();
    path.display().to_string()
}

#[test]
fn test_load_scenario_file() {
    let temp_dir = TempDir::new().unwrap();
    let scenario = ScenarioFile::load(write_harbour(&temp_dir)).unwrap();

    assert_eq!(scenario.name, "Harbour");
    assert_eq!(scenario.time, 8);
    assert_eq!(scenario.cargo.len(), 3);
    assert_eq!(scenario.ships[0].flag, NauticalFlag::Whiskey);
    assert_eq!(scenario.stored_cargo, vec![CargoId(2)]);

    let port = scenario.into_port().unwrap();
    assert_eq!(port.time(), 8);
    assert_eq!(port.movements().len(), 2);
    assert_eq!(port.evaluators().len(), 1);
    assert!(port.ship(ImoNumber::new(1234567).unwrap()).unwrap().has_cargo());
}

#[test]
fn test_run_scenario_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("after.json").display().to_string();
    let config = SimulationConfig {
        scenario: Some(write_harbour(&temp_dir)),
        minutes: 12,
        evaluators: vec!["ShipFlagEvaluator".to_string(), "QuayOccupancyEvaluator".to_string()],
        snapshot_output: Some(snapshot_path.clone()),
        ..Default::default()
    };

    let mut orchestrator = SimulationOrchestrator::new(config).unwrap();
    // The scenario already brings a flag evaluator
    assert_eq!(orchestrator.port().evaluators().len(), 2);
    assert!(orchestrator.port().evaluator::<ShipFlagEvaluator>().is_some());

    let stats = orchestrator.run().unwrap();
    assert_eq!(stats.start_minute, 8);
    assert_eq!(stats.end_minute(), 20);
    assert_eq!(stats.ships_docked, 1);
    assert_eq!(stats.movements_processed, 2);

    let port = orchestrator.port();
    let endeavour = port.ship(ImoNumber::new(7654321).unwrap()).unwrap();
    assert_eq!(endeavour.cargo_count(), 2);
    assert_eq!(port.quays()[0].ship(), Some(ImoNumber::new(1234567).unwrap()));
    assert!(port.quays()[1].is_empty());
    // Coal was unloaded at minute 15
    assert_eq!(port.stored_cargo().len(), 1);
    assert_eq!(port.stored_cargo()[0].id(), CargoId(1));

    let saved = ScenarioFile::load(&snapshot_path).unwrap();
    assert_eq!(saved, orchestrator.snapshot());
    assert_eq!(saved.time, 20);
    assert!(saved.movements.is_empty());
}

#[test]
fn test_snapshot_resumes_where_it_left_off() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mid.json");

    let config = SimulationConfig { seed: Some(5), minutes: 40, ..Default::default() };
    let scenario = ScenarioGenerator::with_seed(5).generate(&config).unwrap();

    let mut straight =
        SimulationOrchestrator::from_scenario(config.clone(), scenario.clone()).unwrap();
    straight.run().unwrap();

    let half = SimulationConfig { minutes: 20, ..config };
    let mut first_half = SimulationOrchestrator::from_scenario(half.clone(), scenario).unwrap();
    first_half.run().unwrap();
    first_half.snapshot().save(&path).unwrap();

    let resumed = ScenarioFile::load(&path).unwrap();
    let mut second_half = SimulationOrchestrator::from_scenario(half, resumed).unwrap();
    second_half.run().unwrap();

    assert_eq!(second_half.port().time(), 40);
    assert_eq!(second_half.snapshot(), straight.snapshot());
}

#[test]
fn test_missing_scenario_file() {
    let config = SimulationConfig {
        scenario: Some("/nonexistent/harbour.json".to_string()),
        ..Default::default()
    };
    let error = SimulationOrchestrator::new(config).unwrap_err();
    assert!(matches!(error, SimulationError::IoError(_)));
    assert_eq!(error.category(), "IO");
}

#[test]
fn test_malformed_scenario_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, r#"{"name": "Harbour", "ships": [{"imo_number": 42}]}"#).unwrap();

    let error = ScenarioFile::load(&path).unwrap_err();
    assert!(matches!(error, SimulationError::SerializationError(_)));
}

#[test]
fn test_inconsistent_scenario_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("double.json");
    // Coal is both aboard the bulk carrier and in the warehouse
    let json = HARBOUR.replace(r#""stored_cargo": [2]"#, r#""stored_cargo": [1, 2]"#);
    fs::write(&path, json).unwrap();

    let error = ScenarioFile::load(&path).unwrap().into_port().unwrap_err();
    assert!(matches!(error, SimulationError::ScenarioError(_)));
}

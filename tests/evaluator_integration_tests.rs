//! Tests for evaluators observing a running port

use port_simulator::cargo::{BulkCargo, Container};
use port_simulator::evaluators::{
    CargoDecompositionEvaluator, QuayOccupancyEvaluator, ShipFlagEvaluator, ShipThroughputEvaluator,
    StatisticsEvaluator,
};
use port_simulator::movement::Movement;
use port_simulator::port::{Port, Quay};
use port_simulator::ship::Ship;
use port_simulator::simulation::SimulationOrchestrator;
use port_simulator::types::{
    BulkCargoType, ContainerType, MovementDirection, NauticalFlag, QuayId, SimulationConfig,
};
use std::any::Any;
use std::collections::BTreeMap;

/// Records every minute and movement it sees
#[derive(Debug, Default)]
struct MovementLog {
    time: u64,
    seen: Vec<(u64, String)>,
}

impl StatisticsEvaluator for MovementLog {
    fn name(&self) -> &'static str {
        "MovementLog"
    }

    fn current_time(&self) -> u64 {
        self.time
    }

    fn on_elapse_minute(&mut self) {
        self.time += 1;
    }

    fn on_process_movement(&mut self, movement: &Movement) {
        self.seen.push((movement.time(), movement.kind_name().to_string()));
    }

    fn readings(&self, _port: &Port) -> BTreeMap<String, u64> {
        BTreeMap::from([("movements".to_string(), self.seen.len() as u64)])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn busy_port() -> Port {
    let mut port = Port::new("Brisbane");
    port.add_quay(Quay::bulk(QuayId(1), 1000)).unwrap();
    port.add_quay(Quay::container(QuayId(2), 100)).unwrap();

    let carrier =
        Ship::bulk_carrier(1234567, "Glorious", "China", NauticalFlag::Whiskey, 800).unwrap();
    let boxes =
        Ship::container_ship(7654321, "Endeavour", "Japan", NauticalFlag::Bravo, 40).unwrap();
    let movements = vec![
        Movement::ship(2, MovementDirection::Inbound, &carrier),
        Movement::ship(4, MovementDirection::Inbound, &boxes),
        Movement::cargo(
            6,
            MovementDirection::Inbound,
            vec![
                BulkCargo::new(1, "China", 500, BulkCargoType::Grain).into(),
                Container::new(2, "Japan", ContainerType::Tanker).into(),
                Container::new(3, "Peru", ContainerType::Reefer).into(),
            ],
        ),
        Movement::ship(25, MovementDirection::Outbound, &carrier),
        Movement::ship(30, MovementDirection::Outbound, &boxes),
    ];
    port.add_ship(carrier).unwrap();
    port.add_ship(boxes).unwrap();
    for movement in movements {
        port.add_movement(movement).unwrap();
    }
    port
}

fn run(port: &mut Port, minutes: u64) {
    for _ in 0..minutes {
        port.elapse_one_minute();
    }
}

#[test]
fn test_custom_evaluator_sees_every_event() {
    let mut port = busy_port();
    port.add_statistics_evaluator(Box::new(MovementLog::default()));
    run(&mut port, 30);

    let log = port.evaluator::<MovementLog>().unwrap();
    assert_eq!(log.current_time(), 30);
    assert_eq!(
        log.seen,
        vec![
            (2, "ShipMovement".to_string()),
            (4, "ShipMovement".to_string()),
            (6, "CargoMovement".to_string()),
            (25, "ShipMovement".to_string()),
            (30, "ShipMovement".to_string()),
        ]
    );
}

#[test]
fn test_late_registration_misses_earlier_events() {
    let mut port = busy_port();
    run(&mut port, 5);
    port.add_statistics_evaluator(Box::new(ShipFlagEvaluator::new()));
    run(&mut port, 25);

    let flags = port.evaluator::<ShipFlagEvaluator>().unwrap();
    assert_eq!(flags.current_time(), 25);
    assert!(flags.flag_history().is_empty());
}

#[test]
fn test_removed_evaluator_stops_observing() {
    let mut port = busy_port();
    port.add_statistics_evaluator(Box::new(ShipThroughputEvaluator::new()));
    run(&mut port, 10);

    let removed = port.remove_statistics_evaluator(ShipThroughputEvaluator::NAME).unwrap();
    assert_eq!(removed.current_time(), 10);
    assert!(port.evaluator::<ShipThroughputEvaluator>().is_none());
    assert!(port.remove_statistics_evaluator(ShipThroughputEvaluator::NAME).is_none());
    run(&mut port, 20);
    assert_eq!(removed.current_time(), 10);
}

#[test]
fn test_builtin_evaluators_over_a_visit() {
    let mut port = busy_port();
    port.add_statistics_evaluator(Box::new(ShipFlagEvaluator::new()));
    port.add_statistics_evaluator(Box::new(QuayOccupancyEvaluator::new()));
    port.add_statistics_evaluator(Box::new(CargoDecompositionEvaluator::new()));
    port.add_statistics_evaluator(Box::new(ShipThroughputEvaluator::new()));

    // The container ship outranks the carrier, so the bulk quay stays empty
    run(&mut port, 10);
    let occupancy = port.evaluator::<QuayOccupancyEvaluator>().unwrap();
    assert_eq!(occupancy.quays_occupied(&port), 1);
    let cargo = port.evaluator::<CargoDecompositionEvaluator>().unwrap();
    assert_eq!(cargo.cargo_distribution(&port)["Container"], 2);
    assert_eq!(cargo.bulk_cargo_distribution(&port)[&BulkCargoType::Grain], 1);

    run(&mut port, 20);
    let flags = port.evaluator::<ShipFlagEvaluator>().unwrap();
    assert_eq!(flags.flag_distribution(NauticalFlag::Bravo), 1);
    assert_eq!(flags.flag_distribution(NauticalFlag::Whiskey), 1);
    assert_eq!(flags.flag_distribution(NauticalFlag::Hotel), 0);

    // Both ships took on their home cargo and left
    assert_eq!(port.evaluator::<ShipThroughputEvaluator>().unwrap().throughput_per_hour(), 2);
    assert_eq!(port.evaluator::<QuayOccupancyEvaluator>().unwrap().quays_occupied(&port), 0);
    let readings = port.evaluator::<CargoDecompositionEvaluator>().unwrap().readings(&port);
    assert_eq!(readings["Container.REEFER"], 1);
}

#[test]
fn test_report_includes_every_evaluator() {
    let config = SimulationConfig { seed: Some(8), minutes: 60, ..Default::default() };
    let mut orchestrator = SimulationOrchestrator::new(config).unwrap();
    let stats = orchestrator.run().unwrap();

    let names: Vec<&str> = stats.evaluator_readings.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "CargoDecompositionEvaluator",
            "QuayOccupancyEvaluator",
            "ShipFlagEvaluator",
            "ShipThroughputEvaluator",
        ]
    );
    assert!(stats.generate_summary_report().contains("ShipFlagEvaluator:"));
}

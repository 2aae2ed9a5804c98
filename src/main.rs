// Port Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/port-simulator
// ```
//
// Or with a saved scenario:
//
// ```console
// $ ./target/release/port-simulator --scenario port.json --minutes 240 --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use port_simulator::simulation::{LoggingConfig, SimulationOrchestrator};
use port_simulator::types::{CliArgs, SimulationConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Held until exit so file logs are flushed
    let _guard = match LoggingConfig::from_flags(args.verbose, args.debug).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Port Simulator");

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Port Simulator completed successfully");
}

fn run(args: CliArgs) -> Result<()> {
    let dry_run = args.dry_run;
    let config = SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    let mut orchestrator =
        SimulationOrchestrator::new(config).context("Failed to initialize simulation")?;
    orchestrator.run().context("Simulation failed")?;

    let report = orchestrator.render_report().context("Failed to render report")?;
    println!("{}", report);

    if let Some(path) = &orchestrator.config().snapshot_output {
        eprintln!("Port snapshot written to: {}", path);
    }
    Ok(())
}

fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Port Simulator");
    eprintln!("==============");
    eprintln!("Minute-by-minute simulation of a shipping port");
    eprintln!();

    print_configuration_summary(config);
}

fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    match &config.scenario {
        Some(path) => eprintln!("  Scenario: {}", path),
        None => {
            eprintln!("  Port Name: {}", config.port_name);
            eprintln!("  Ships: {}", config.ship_count);
            eprintln!("  Quays: {}", config.quay_count);
            eprintln!("  Cargo: {}", config.cargo_count);
            if let Some(seed) = config.seed {
                eprintln!("  Random Seed: {}", seed);
            }
        }
    }
    eprintln!("  Minutes: {}", config.minutes);
    eprintln!("  Evaluators: {}", config.evaluators.join(", "));
    eprintln!("  Report Format: {}", config.report_format);
    if let Some(path) = &config.snapshot_output {
        eprintln!("  Snapshot Output: {}", path);
    }
    eprintln!();
}

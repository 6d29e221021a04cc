use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use spacecraft_simulation::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Spacecraft mission lifecycle simulator")]
struct Cli {
    /// Mission configuration (TOML); defaults to the standard mission
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run ticks back to back instead of pacing them in real time
    #[arg(long, default_value_t = false)]
    no_pacing: bool,

    /// Comma separated operator tokens (e.g. "r,y") instead of reading stdin
    #[arg(long)]
    commands: Option<String>,

    /// Simulated seconds spent in orbit before the return decision
    #[arg(long)]
    hold_seconds: Option<f64>,

    /// Fault log file (appended)
    #[arg(long)]
    fault_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MissionConfig::load(path)
            .with_context(|| format!("loading mission config {}", path.display()))?,
        None => MissionConfig::default(),
    };
    if cli.no_pacing {
        config.simulation.pacing_millis = 0;
    }
    if let Some(seconds) = cli.hold_seconds {
        config.simulation.operator_delay_seconds = seconds;
    }
    if let Some(path) = cli.fault_log {
        config.simulation.fault_log = path;
    }
    config.validate()?;

    let faults = FileFaultLog::open(&config.simulation.fault_log).with_context(|| {
        format!(
            "opening fault log {}",
            config.simulation.fault_log.display()
        )
    })?;

    let mut machine = MissionStateMachine::new(config, Telemetry::with_echo(), faults);
    let report = match cli.commands {
        Some(list) => machine.run(&mut ScriptedCommands::from_list(&list)),
        None => machine.run(&mut LineCommands::new(io::stdin().lock())),
    };

    println!("{}", machine.telemetry().summary());
    println!(
        "Ticks: {} | Mission time: {:.0} s | Faults logged: {}",
        report.ticks,
        report.elapsed_seconds,
        machine.faults().written()
    );

    if report.success {
        println!("[MISSION COMPLETE] The mission was completed successfully!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("[MISSION FAILED] The mission could not be completed.");
        Ok(ExitCode::FAILURE)
    }
}

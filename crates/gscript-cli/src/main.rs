use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gscript_host::{EventTable, NpcCapabilities};
use gscript_runner::{logging, RunnerConfig, Scenario, ScriptRegistry, Simulation};
use tracing::info;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enables debug mode
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the event handlers and the slots they forward to
    Events,
    /// Compute the capability mask for a set of NPC slots
    Mask {
        /// Slot names, e.g. onPlayerChats
        #[arg(required = true)]
        slots: Vec<String>,
    },
    /// List the built-in scripts and trigger actions
    Scripts,
    /// Run a scenario file
    Run { scenario: PathBuf },
    /// Write an example config file
    InitConfig,
}

fn load_config(path: Option<&Path>) -> Result<RunnerConfig> {
    match path {
        Some(path) => RunnerConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let path = RunnerConfig::config_path();
            RunnerConfig::load_or_default(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
    }
}

/// Config to start with; `init-config` must work before any file exists
fn startup_config(cli: &Cli) -> Result<RunnerConfig> {
    match cli.command {
        Commands::InitConfig => Ok(RunnerConfig::default()),
        _ => load_config(cli.config.as_deref()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = startup_config(&cli)?;
    let _guard = logging::init_logging("gscript", &config.logging, cli.debug)
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Events => list_events(),
        Commands::Mask { slots } => print_mask(&slots)?,
        Commands::Scripts => list_scripts(),
        Commands::Run { scenario } => run_scenario(&scenario, &config)?,
        Commands::InitConfig => {
            init_config(cli.config.unwrap_or_else(RunnerConfig::config_path))?
        }
    }

    Ok(())
}

fn init_config(path: PathBuf) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists at {}", path.display());
    }
    RunnerConfig::write_example(&path)?;
    eprintln!("Config file created at: {}", path.display());
    Ok(())
}

fn list_events() {
    for (kind, handler) in EventTable::global().iter() {
        let slot = kind.slot().unwrap_or("<supplied action>");
        println!(
            "{:<20} {:<7} {}({})",
            kind.name(),
            handler.entity(),
            slot,
            kind.argument_shape()
        );
    }
}

fn print_mask(slots: &[String]) -> Result<()> {
    let mask = NpcCapabilities::from_slot_names(slots)?;
    println!("{} (0b{:06b})", mask.bits(), mask.bits());
    println!("{}", mask.slot_names().join(", "));
    Ok(())
}

fn list_scripts() {
    let registry = ScriptRegistry::with_builtin_scripts();
    println!("Scripts:");
    for (id, entity) in registry.available_scripts() {
        println!("  {:<12} {}", id, entity);
    }
    println!("Trigger actions:");
    for id in registry.available_triggers() {
        println!("  {}", id);
    }
}

fn run_scenario(path: &Path, config: &RunnerConfig) -> Result<()> {
    let scenario = Scenario::from_path(path)?;
    info!(
        "Running {}: {} NPCs, {} weapons, {} events",
        path.display(),
        scenario.npcs.len(),
        scenario.weapons.len(),
        scenario.events.len()
    );

    let report = Simulation::run(
        &scenario,
        ScriptRegistry::with_builtin_scripts(),
        config.dispatch.clone(),
    )
    .with_context(|| format!("Scenario {} failed", path.display()))?;

    println!("Delivered: {}", report.delivered);
    println!("Skipped:   {}", report.skipped);
    println!("Capabilities:");
    for (id, capabilities) in &report.capabilities {
        println!(
            "  NPC {:<5} {:>2}  {}",
            id,
            capabilities.bits(),
            capabilities.slot_names().join(", ")
        );
    }
    println!("Failures: {}", report.failures.len());
    for failure in &report.failures {
        println!("  {}", failure);
    }
    Ok(())
}

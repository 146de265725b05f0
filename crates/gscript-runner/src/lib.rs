/// Runtime around the gscript bridge
///
/// Configuration, logging setup, a host implementation that reports through
/// `tracing`, the built-in sample scripts, and a scenario simulation that
/// drives NPCs and weapons the way a game server would.
pub mod config;
pub mod logging;
pub mod scenario;
pub mod scripts;
pub mod simulation;
pub mod tracing_host;

pub use config::{ConfigLoadError, DispatchConfig, LoggingConfig, ProjectPaths, RunnerConfig};
pub use scenario::{NpcSpec, Scenario, ScenarioError, ScenarioEvent, WeaponSpec};
pub use scripts::{ScriptFactory, ScriptRegistry};
pub use simulation::{Simulation, SimulationReport};
pub use tracing_host::TracingHost;

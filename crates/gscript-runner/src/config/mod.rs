pub mod paths;
pub mod runner_config;

pub use paths::ProjectPaths;
pub use runner_config::{ConfigLoadError, DispatchConfig, LoggingConfig, RunnerConfig};

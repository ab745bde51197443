use crate::model::DisplayOptions;
use clap::Parser;
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// Using constants for default values makes them easy to change.
const DEFAULT_TICK_RATE_MS: u64 = 50;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_EXPORT_DIR: &str = ".";
const ENV_PREFIX: &str = "GRAPH_INSPECTOR";
const APP_NAME: &str = "graph-inspector";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    model: Option<PathBuf>,
    export_dir: Option<PathBuf>,
    show_attributes: Option<bool>,
    show_initializers: Option<bool>,
    show_names: Option<bool>,
    tick_rate_ms: Option<u64>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model fetched at startup.
    pub model: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub show_attributes: bool,
    pub show_initializers: bool,
    pub show_names: bool,
    pub tick_rate_ms: u64,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let display = DisplayOptions::default();
        Self {
            model: None,
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            show_attributes: display.show_attributes,
            show_initializers: display.show_initializers,
            show_names: display.show_names,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            log_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            show_attributes: self.show_attributes,
            show_initializers: self.show_initializers,
            show_names: self.show_names,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Terminal inspector for model graphs", long_about = None)]
pub struct CliArgs {
    /// Model file fetched at startup
    pub model: Option<PathBuf>,

    /// Path to a custom configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory exported graphs are written to
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    #[arg(long)]
    pub show_attributes: Option<bool>,
    #[arg(long)]
    pub show_initializers: Option<bool>,
    #[arg(long)]
    pub show_names: Option<bool>,

    /// Input poll interval in milliseconds
    #[arg(long)]
    pub tick_rate_ms: Option<u64>,

    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "graph_inspector=trace"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub debug_config: bool,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

pub fn load_config(args: &CliArgs) -> Result<AppConfig, ConfigError> {
    // Missing env vars are fine; an unreadable environment just contributes nothing.
    let env_map: Map<String, Value> = Environment::with_prefix(ENV_PREFIX)
        .collect()
        .unwrap_or_else(|_| Map::new());

    let config_file = args
        .config
        .clone()
        .or_else(|| project_dirs().map(|dirs| dirs.config_dir().join("config.toml")));
    let default_log_file =
        project_dirs().map(|dirs| dirs.cache_dir().join(format!("{}.log", APP_NAME)));

    build_config(args, config_file, Some(env_map), default_log_file)
}

// Separate function to allow testing with specific args and override sources
fn build_config(
    args: &CliArgs,
    config_file: Option<PathBuf>,
    override_source: Option<Map<String, Value>>,
    default_log_file: Option<PathBuf>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigCrate::builder();

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(false));
    }

    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            builder = builder.set_override(&key, value)?;
        }
    }

    let loaded: FileConfig = builder.build()?.try_deserialize()?;
    let defaults = AppConfig::default();

    // args > overrides > file > defaults
    let config = AppConfig {
        model: args.model.clone().or(loaded.model),
        export_dir: args
            .export_dir
            .clone()
            .or(loaded.export_dir)
            .unwrap_or(defaults.export_dir),
        show_attributes: args
            .show_attributes
            .or(loaded.show_attributes)
            .unwrap_or(defaults.show_attributes),
        show_initializers: args
            .show_initializers
            .or(loaded.show_initializers)
            .unwrap_or(defaults.show_initializers),
        show_names: args
            .show_names
            .or(loaded.show_names)
            .unwrap_or(defaults.show_names),
        tick_rate_ms: args
            .tick_rate_ms
            .or(loaded.tick_rate_ms)
            .unwrap_or(defaults.tick_rate_ms),
        log_file: args.log_file.clone().or(loaded.log_file).or(default_log_file),
        log_level: args
            .log_level
            .clone()
            .or(loaded.log_level)
            .unwrap_or(defaults.log_level),
    };

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.tick_rate_ms == 0 {
        return Err(ConfigError::ValidationError(
            "tick_rate_ms must be at least 1".to_string(),
        ));
    }
    if let Err(err) = EnvFilter::try_new(&config.log_level) {
        return Err(ConfigError::ValidationError(format!(
            "invalid log_level {:?}: {}",
            config.log_level, err
        )));
    }
    Ok(())
}

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. The terminal belongs to the UI, so events
/// go to the configured log file or nowhere. `RUST_LOG` wins over the
/// configured level.
pub fn init_logging(config: &AppConfig) -> AppResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|err| AppError::Logging(err.to_string()))?,
    };

    let result = match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init(),
    };

    result.map_err(|err| AppError::Logging(err.to_string()))
}

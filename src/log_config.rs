// SPDX-License-Identifier: MIT

//! Logging configuration loaded from a JSON file.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use env_logger::{Env, Target};
use log::LevelFilter;
use serde::Deserialize;

use crate::pipeline_error::PipelineError;

/// Logging configuration.
///
/// `level` is an env_logger filter level. When `file` is set the log output
/// goes to that file, appending, instead of stderr.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub timestamps: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl LogConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// An unreadable file, invalid JSON or an unknown level is a
    /// configuration error.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path).map_err(|error| config_error(path, error))?;

        let config: LogConfig =
            serde_json::from_str(&text).map_err(|error| config_error(path, error))?;

        config
            .level
            .parse::<LevelFilter>()
            .map_err(|error| config_error(path, error))?;

        Ok(config)
    }

    fn level_filter(&self) -> LevelFilter {
        // Validated in load().
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

fn config_error<E: ToString>(path: &Path, error: E) -> PipelineError {
    PipelineError::ConfigError {
        path: path.to_path_buf(),
        cause: error.to_string(),
    }
}

/// Initializes the global logger.
///
/// Without a configuration the logger reads the environment and defaults to
/// `info` on stderr without timestamps.
pub fn initialize_logging(config: Option<&LogConfig>) -> Result<(), PipelineError> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    builder.format_target(false);

    let Some(config) = config else {
        builder.format_timestamp(None).init();

        return Ok(());
    };

    builder.filter_level(config.level_filter());

    if !config.timestamps {
        builder.format_timestamp(None);
    }

    if let Some(file) = &config.file {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .map_err(|error| PipelineError::IoError { error })?;

        builder.target(Target::Pipe(Box::new(log_file)));
    }

    builder.init();

    Ok(())
}

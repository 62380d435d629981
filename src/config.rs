use std::{fmt, net::SocketAddr, path::Path, str::FromStr};

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::{
    state::AppState,
    tournaments::routes::{
        ballot_totals, ballots_csv, list_slots, report, report_csv,
        update_roster,
    },
};

pub const DEFAULT_CONFIG_PATH: &str = "mocktab.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub bind: SocketAddr,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    InvalidBind(String),
    InvalidLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {e}"),
            ConfigError::Toml(e) => write!(f, "invalid config: {e}"),
            ConfigError::InvalidBind(s) => {
                write!(f, "`{s}` is not a valid socket address")
            }
            ConfigError::InvalidLogLevel(s) => {
                write!(f, "`{s}` is not a valid log level")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

impl Settings {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads settings from `MOCKTAB_CONFIG` (or `mocktab.toml` if it exists),
    /// then applies the `MOCKTAB_BIND` and `MOCKTAB_LOG` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = match std::env::var("MOCKTAB_CONFIG") {
            Ok(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_toml(&std::fs::read_to_string(DEFAULT_CONFIG_PATH)?)?
            }
            Err(_) => Self::default(),
        };

        settings.with_overrides(
            std::env::var("MOCKTAB_BIND").ok(),
            std::env::var("MOCKTAB_LOG").ok(),
        )
    }

    pub fn with_overrides(
        mut self,
        bind: Option<String>,
        log_level: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(bind) = bind {
            self.bind = bind
                .parse()
                .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;
        }
        if let Some(log_level) = log_level {
            self.log_level = log_level;
        }
        self.level()?;
        Ok(self)
    }

    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        tracing::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

/// Installs the global fmt subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/slots", get(list_slots))
        .route("/ballots/totals", post(ballot_totals))
        .route("/tournaments/report", post(report))
        .route("/tournaments/report.csv", post(report_csv))
        .route("/tournaments/ballots.csv", post(ballots_csv))
        .route("/tournaments/roster", post(update_roster))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

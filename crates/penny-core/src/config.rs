//! Penny configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the config dir
//!    (~/.config/penny/penny.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default value. `PENNY_SEED`
//! in the environment forces random data with that seed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::synthetic::{DataMode, DateRange};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/penny.toml");

/// Environment variable forcing seeded random data
pub const SEED_ENV: &str = "PENNY_SEED";

/// Presentation timings
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Delay before a scripted reply is appended
    pub typing_delay: Duration,
    /// Delay before a free-text answer is appended
    pub chat_delay: Duration,
    /// Playback polling tick
    pub tick: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(800),
            chat_delay: Duration::from_millis(1000),
            tick: Duration::from_millis(50),
        }
    }
}

/// Synthetic data selection
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub random: bool,
    pub seed: Option<u64>,
    pub range: DateRange,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            random: false,
            seed: None,
            range: DateRange::default(),
        }
    }
}

impl DataConfig {
    pub fn mode(&self) -> DataMode {
        if self.random {
            DataMode::Random { seed: self.seed }
        } else {
            DataMode::Fixture
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub timing: TimingConfig,
    pub data: DataConfig,
    /// Override file the config was read from, if any
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load configuration (explicit path or override first, then default)
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// override location is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (content, source) = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::InvalidData(format!(
                        "Failed to read config {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                (content, Some(path.to_path_buf()))
            }
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => {
                    match fs::read_to_string(&default_path) {
                        Ok(content) => (content, Some(default_path)),
                        Err(e) => {
                            tracing::warn!(
                                path = %default_path.display(),
                                error = %e,
                                "Failed to read config override, using defaults"
                            );
                            (DEFAULT_CONFIG.to_string(), None)
                        }
                    }
                }
                _ => (DEFAULT_CONFIG.to_string(), None),
            },
        };

        let mut config = parse_config(&content)?;
        config.source = source;
        config.apply_seed_override(std::env::var(SEED_ENV).ok().as_deref());
        Ok(config)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Apply a `PENNY_SEED` value. Unparseable values are ignored.
    pub fn apply_seed_override(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };
        match value.trim().parse::<u64>() {
            Ok(seed) => {
                self.data.random = true;
                self.data.seed = Some(seed);
            }
            Err(_) => {
                tracing::warn!(value, "Ignoring invalid {}", SEED_ENV);
            }
        }
    }

    pub fn data_mode(&self) -> DataMode {
        self.data.mode()
    }

    pub fn range(&self) -> DateRange {
        self.data.range
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("penny").join("penny.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    timing: Option<RawTiming>,
    data: Option<RawData>,
}

#[derive(Debug, Deserialize)]
struct RawTiming {
    typing_delay_ms: Option<u64>,
    chat_delay_ms: Option<u64>,
    tick_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawData {
    mode: Option<String>,
    seed: Option<u64>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(timing) = raw.timing {
        if let Some(ms) = timing.typing_delay_ms {
            config.timing.typing_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = timing.chat_delay_ms {
            config.timing.chat_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = timing.tick_ms {
            if ms == 0 {
                return Err(Error::InvalidData("timing.tick_ms must be positive".into()));
            }
            config.timing.tick = Duration::from_millis(ms);
        }
    }

    if let Some(data) = raw.data {
        if let Some(mode) = data.mode {
            config.data.random = match mode.to_lowercase().as_str() {
                "fixture" => false,
                "random" => true,
                other => {
                    return Err(Error::InvalidData(format!(
                        "Unknown data mode '{}' (expected fixture or random)",
                        other
                    )))
                }
            };
        }
        config.data.seed = data.seed;
        let start = data.start.unwrap_or(config.data.range.start);
        let end = data.end.unwrap_or(config.data.range.end);
        config.data.range = DateRange::new(start, end)?;
    }

    Ok(config)
}

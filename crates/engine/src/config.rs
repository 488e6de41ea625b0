//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TOWER_SEED` | clock-derived | RNG seed (color offset, spawn sides) |
//! | `TOWER_TICK_MS` | 16 | Fixed timestep, `1..=1000` |
//! | `TOWER_EVENT_LOG` | unset | JSONL event log path |
//! | `TOWER_LOG_FILE` | unset | Diagnostic log path (`RUST_LOG` filters it) |

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;
use thiserror::Error;

use crate::types::TICK_MS;

pub const ENV_SEED: &str = "TOWER_SEED";
pub const ENV_TICK_MS: &str = "TOWER_TICK_MS";
pub const ENV_EVENT_LOG: &str = "TOWER_EVENT_LOG";
pub const ENV_LOG_FILE: &str = "TOWER_LOG_FILE";

const TICK_MS_MIN: u32 = 1;
const TICK_MS_MAX: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be within {min}..={max}, got {value}")]
    OutOfRange {
        var: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidNumber { .. } => "invalid_number",
            ConfigError::OutOfRange { .. } => "out_of_range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub tick_ms: u32,
    pub event_log: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: seed_from_clock(),
            tick_ms: TICK_MS,
            event_log: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Read the environment, falling back to defaults on bad values.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Config::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        match parse_u32(&lookup, ENV_SEED) {
            Ok(Some(seed)) => config.seed = seed,
            Ok(None) => {}
            Err(e) => warn!("{e} ({}); using a clock-derived seed", e.code()),
        }

        match parse_tick_ms(&lookup) {
            Ok(Some(tick_ms)) => config.tick_ms = tick_ms,
            Ok(None) => {}
            Err(e) => warn!("{e} ({}); using {TICK_MS}ms", e.code()),
        }

        config.event_log = parse_path(&lookup, ENV_EVENT_LOG);
        config.log_file = parse_path(&lookup, ENV_LOG_FILE);
        config
    }
}

fn parse_u32(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u32>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: raw.clone(),
        })
}

fn parse_tick_ms(lookup: &impl Fn(&str) -> Option<String>) -> Result<Option<u32>, ConfigError> {
    match parse_u32(lookup, ENV_TICK_MS)? {
        Some(v) if !(TICK_MS_MIN..=TICK_MS_MAX).contains(&v) => Err(ConfigError::OutOfRange {
            var: ENV_TICK_MS,
            value: v,
            min: TICK_MS_MIN,
            max: TICK_MS_MAX,
        }),
        other => Ok(other),
    }
}

fn parse_path(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<PathBuf> {
    lookup(var)
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(vars(&[]));
        assert_eq!(config.tick_ms, TICK_MS);
        assert!(config.event_log.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn values_are_parsed() {
        let config = Config::from_lookup(vars(&[
            (ENV_SEED, "42"),
            (ENV_TICK_MS, " 20 "),
            (ENV_EVENT_LOG, "/tmp/events.jsonl"),
            (ENV_LOG_FILE, "tower.log"),
        ]));
        assert_eq!(config.seed, 42);
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.event_log, Some(PathBuf::from("/tmp/events.jsonl")));
        assert_eq!(config.log_file, Some(PathBuf::from("tower.log")));
    }

    #[test]
    fn blank_paths_are_ignored() {
        let config = Config::from_lookup(vars(&[(ENV_EVENT_LOG, "   ")]));
        assert!(config.event_log.is_none());
    }

    #[test]
    fn bad_numbers_are_typed_errors() {
        let err = parse_u32(&vars(&[(ENV_SEED, "abc")]), ENV_SEED).unwrap_err();
        assert_eq!(err.code(), "invalid_number");

        let err = parse_tick_ms(&vars(&[(ENV_TICK_MS, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                var: ENV_TICK_MS,
                value: 0,
                min: 1,
                max: 1000
            }
        );
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(vars(&[(ENV_SEED, "-1"), (ENV_TICK_MS, "5000")]));
        assert_eq!(config.tick_ms, TICK_MS);
    }
}

//! Application-level configuration: playoff week numbers and the report
//! cache TTL, loaded from a JSON file with baked-in defaults.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "FLAG_LEAGUE_CONFIG_PATH";
/// Weeks treated as playoffs when the config file does not say otherwise.
const DEFAULT_PLAYOFF_WEEKS: [i64; 2] = [6, 7];
/// Report cache lifetime when the config file does not say otherwise.
const DEFAULT_REPORT_CACHE_TTL_SECS: u64 = 60;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    playoff_weeks: Vec<i64>,
    report_cache_ttl: Duration,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        playoff_weeks = ?config.playoff_weeks,
                        "loaded configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Whether `week` counts as a playoff week.
    pub fn is_playoff_week(&self, week: i64) -> bool {
        self.playoff_weeks.contains(&week)
    }

    /// How long cached reports stay valid.
    pub fn report_cache_ttl(&self) -> Duration {
        self.report_cache_ttl
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            playoff_weeks: DEFAULT_PLAYOFF_WEEKS.to_vec(),
            report_cache_ttl: Duration::from_secs(DEFAULT_REPORT_CACHE_TTL_SECS),
        }
    }
}

fn resolve_config_path() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    playoff_weeks: Option<Vec<i64>>,
    #[serde(default)]
    report_cache_ttl_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            playoff_weeks: raw
                .playoff_weeks
                .unwrap_or_else(|| defaults.playoff_weeks.clone()),
            report_cache_ttl: raw
                .report_cache_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.report_cache_ttl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mark_weeks_six_and_seven_as_playoffs() {
        let config = AppConfig::default();
        assert!(config.is_playoff_week(6));
        assert!(config.is_playoff_week(7));
        assert!(!config.is_playoff_week(5));
    }

    #[test]
    fn partial_raw_config_keeps_other_defaults() {
        let raw: RawConfig = serde_json::from_str(r#"{"playoff_weeks": [8]}"#).unwrap();
        let config: AppConfig = raw.into();
        assert!(config.is_playoff_week(8));
        assert!(!config.is_playoff_week(6));
        assert_eq!(config.report_cache_ttl(), Duration::from_secs(60));
    }
}

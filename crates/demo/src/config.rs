//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use domain::LotConfig;

/// Demo configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `PARKING_CAPACITY`, `PARKING_CRITICAL_FREE_PERCENT`: see [`LotConfig`]
/// - `PARKING_STATE_PATH`: snapshot file (default: `"data/parking_state.json"`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub lot: LotConfig,
    pub state_path: PathBuf,
    pub log_level: String,
}

impl Config {
    pub const DEFAULT_STATE_PATH: &'static str = "data/parking_state.json";

    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            lot: LotConfig::from_vars(&lookup),
            state_path: lookup("PARKING_STATE_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_STATE_PATH)),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lot: LotConfig::default(),
            state_path: PathBuf::from(Self::DEFAULT_STATE_PATH),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.lot.capacity, 100);
        assert_eq!(config.state_path, PathBuf::from("data/parking_state.json"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_environment_matches_default() {
        let config = from_map(&[]);
        let default = Config::default();
        assert_eq!(config.lot, default.lot);
        assert_eq!(config.state_path, default.state_path);
        assert_eq!(config.log_level, default.log_level);
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("PARKING_CAPACITY", "25"),
            ("PARKING_STATE_PATH", "/tmp/lot.json"),
            ("RUST_LOG", "debug"),
        ]);
        assert_eq!(config.lot.capacity, 25);
        assert_eq!(config.state_path, PathBuf::from("/tmp/lot.json"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_blank_state_path_uses_default() {
        let config = from_map(&[("PARKING_STATE_PATH", "  ")]);
        assert_eq!(config.state_path, PathBuf::from(Config::DEFAULT_STATE_PATH));
    }
}

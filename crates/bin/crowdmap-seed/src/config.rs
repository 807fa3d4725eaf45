//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `crowdmap.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use crowdmap_domain::adjacency::RoomDefaults;
use crowdmap_domain::error::CrowdMapError;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Seeding settings.
    pub seed: SeedConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Where the floor plan comes from and how its rooms are filled in.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Path to the JSON adjacency map.
    pub adjacency_path: String,
    /// Placeholder geometry for every seeded room.
    pub defaults: RoomDefaults,
}

impl Config {
    /// Load configuration from `crowdmap.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("crowdmap.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CROWDMAP_ADJACENCY") {
            self.seed.adjacency_path = val;
        }
        if let Ok(val) = std::env::var("CROWDMAP_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.seed.adjacency_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "adjacency_path must not be empty".to_string(),
            ));
        }
        self.logging.env_filter()?;
        self.seed
            .defaults
            .room("seed defaults")
            .map_err(ConfigError::Defaults)?;
        Ok(())
    }
}

impl LoggingConfig {
    /// Parse `filter` into a subscriber filter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogFilter`] if the directive is malformed.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.filter).map_err(ConfigError::LogFilter)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "crowdmap_seed=info,crowdmap=info".to_string(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            adjacency_path: "data/floor_plan.json".to_string(),
            defaults: RoomDefaults::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// The logging filter is not a valid directive.
    #[error("invalid configuration: malformed logging filter")]
    LogFilter(#[source] tracing_subscriber::filter::ParseError),
    /// The seed defaults break a room rule.
    #[error("invalid configuration: seed defaults do not produce a valid room")]
    Defaults(#[source] CrowdMapError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdmap_domain::room::RoomType;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.filter, "crowdmap_seed=info,crowdmap=info");
        assert_eq!(config.seed.adjacency_path, "data/floor_plan.json");
        assert_eq!(config.seed.defaults, RoomDefaults::default());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.seed.adjacency_path, "data/floor_plan.json");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [logging]
            filter = 'debug'

            [seed]
            adjacency_path = 'plans/second_floor.json'

            [seed.defaults]
            type = 'LOBBY'
            crowd_factor = 0.8
            popularity_factor = 1.5
            area = 120.0
            longitude = 12.5783
            latitude = 55.6889
            floor = 2
            borders = [[12.578, 55.688], [12.579, 55.688], [12.579, 55.689]]
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.seed.adjacency_path, "plans/second_floor.json");
        assert_eq!(config.seed.defaults.kind, RoomType::Lobby);
        assert_eq!(config.seed.defaults.floor, 2);
        assert_eq!(config.seed.defaults.borders.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_partial_defaults() {
        let toml = "
            [seed.defaults]
            floor = 3
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.seed.defaults.floor, 3);
        assert_eq!(config.seed.defaults.kind, RoomType::Exhibition);
        assert_eq!(config.seed.adjacency_path, "data/floor_plan.json");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.seed.adjacency_path, "data/floor_plan.json");
    }

    #[test]
    fn should_accept_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_empty_adjacency_path() {
        let mut config = Config::default();
        config.seed.adjacency_path = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_malformed_logging_filter() {
        let mut config = Config::default();
        config.logging.filter = "crowdmap=loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::LogFilter(_))));
    }

    #[test]
    fn should_reject_defaults_that_break_room_rules() {
        let mut config = Config::default();
        config.seed.defaults.floor = 7;
        assert!(matches!(config.validate(), Err(ConfigError::Defaults(_))));
    }

    #[test]
    fn should_report_parse_error_for_unknown_room_type() {
        let toml = "
            [seed.defaults]
            type = 'GARAGE'
        ";
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{ReadLimit, SymbolClassifier, DEFAULT_CLEAR_THRESHOLD, NOMINAL_CLEAR};

/// Color classification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Clear-channel level below which no card is considered present.
    pub clear_threshold: u16,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            clear_threshold: DEFAULT_CLEAR_THRESHOLD,
        }
    }
}

impl ClassifierConfig {
    pub fn classifier(&self) -> SymbolClassifier {
        SymbolClassifier::new(self.clear_threshold)
    }
}

/// Sensor polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Per-slot read timeout. Absent means wait forever.
    pub read_timeout_ms: Option<u64>,
    /// How long the terminal sensor waits for a key before reporting "no card".
    pub poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            read_timeout_ms: None,
            poll_interval_ms: 20,
        }
    }
}

impl InputConfig {
    pub fn read_limit(&self) -> ReadLimit {
        ReadLimit::from_millis(self.read_timeout_ms)
    }
}

/// Target generator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible targets; entropy-seeded when absent.
    pub seed: Option<u64>,
}

/// Headless simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub games: usize,
    pub level: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 1_000,
            level: 1,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub input: InputConfig,
    pub generator: GeneratorConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.clear_threshold == 0 {
            return Err(ConfigError::Validation(
                "classifier.clear_threshold must be > 0".into(),
            ));
        }
        if self.classifier.clear_threshold > NOMINAL_CLEAR {
            return Err(ConfigError::Validation(format!(
                "classifier.clear_threshold must be <= {NOMINAL_CLEAR}"
            )));
        }
        if self.input.read_timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "input.read_timeout_ms must be > 0 when set".into(),
            ));
        }
        if self.input.poll_interval_ms > 1_000 {
            return Err(ConfigError::Validation(
                "input.poll_interval_ms must be <= 1000".into(),
            ));
        }
        if self.simulation.games == 0 {
            return Err(ConfigError::Validation(
                "simulation.games must be > 0".into(),
            ));
        }
        if !(1..=3).contains(&self.simulation.level) {
            return Err(ConfigError::Validation(
                "simulation.level must be 1, 2 or 3".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[classifier]
clear_threshold = 250
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.classifier.clear_threshold, 250);
        // Other fields should be defaults
        assert_eq!(config.input.read_timeout_ms, None);
        assert_eq!(config.simulation.games, 1_000);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.classifier.clear_threshold, DEFAULT_CLEAR_THRESHOLD);
        assert_eq!(config.input.poll_interval_ms, 20);
        assert_eq!(config.generator.seed, None);
    }

    #[test]
    fn test_read_limit_from_config() {
        let mut config = AppConfig::default();
        assert_eq!(config.input.read_limit(), ReadLimit::Unbounded);
        config.input.read_timeout_ms = Some(1_500);
        assert_eq!(
            config.input.read_limit(),
            ReadLimit::Within(Duration::from_millis(1_500))
        );
    }

    #[test]
    fn test_validation_rejects_zero_threshold() {
        let mut config = AppConfig::default();
        config.classifier.clear_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_caps_threshold_at_nominal_clear() {
        let mut config = AppConfig::default();
        config.classifier.clear_threshold = NOMINAL_CLEAR;
        assert!(config.validate().is_ok());
        config.classifier.clear_threshold = NOMINAL_CLEAR + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("clear_threshold")
        ));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.input.read_timeout_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_slow_poll_interval() {
        let mut config = AppConfig::default();
        config.input.poll_interval_ms = 5_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_games() {
        let mut config = AppConfig::default();
        config.simulation.games = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_level() {
        let mut config = AppConfig::default();
        config.simulation.level = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.simulation.games, 1_000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[generator]
seed = 1234

[input]
read_timeout_ms = 30000
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.generator.seed, Some(1234));
        assert_eq!(config.input.read_timeout_ms, Some(30_000));
        // Others are defaults
        assert_eq!(config.classifier.clear_threshold, DEFAULT_CLEAR_THRESHOLD);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[simulation]\nlevel = 9\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}

/// Client configuration.
///
/// Settings come from an optional TOML file and are then overridden by
/// environment variables (a `.env` file in the working directory is loaded
/// first). Every key has a default, so running with no file at all talks to
/// the local backend with the standard feature set.
///
/// ```toml
/// endpoint = "http://127.0.0.1:5000/predict"
/// features = ["pressure", "dewpoint", "humidity"]
/// log_level = "info"
/// log_file = "rainfall.log"
/// console_timestamps = false
/// ```

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::features::FeatureSet;
use crate::logging::LogLevel;
use crate::model::DEFAULT_ENDPOINT;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const ENV_ENDPOINT: &str = "RAINFALL_ENDPOINT";
pub const ENV_LOG_LEVEL: &str = "RAINFALL_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "RAINFALL_LOG_FILE";

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    endpoint: String,
    features: Option<Vec<String>>,
    log_level: String,
    log_file: Option<String>,
    console_timestamps: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            features: None,
            log_level: "info".to_string(),
            log_file: None,
            console_timestamps: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Validated configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub features: FeatureSet,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            features: FeatureSet::default(),
            log_level: LogLevel::Info,
            log_file: None,
            console_timestamps: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: std::io::Error },
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Cannot read config {}: {}", path, source)
            }
            ConfigError::Toml(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

impl ClientConfig {
    /// Parses TOML text without consulting the environment.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Loads the config file, then applies environment overrides.
    ///
    /// A missing file is not an error when `path` is the default location;
    /// an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let raw = match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => RawConfig::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let mut config = Self::from_raw(raw)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production). Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.endpoint = validate_endpoint(&endpoint)?;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.log_level = level.parse().map_err(ConfigError::Invalid)?;
        }
        if let Some(file) = get(ENV_LOG_FILE) {
            self.log_file = Some(file);
        }
        Ok(())
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let features = match raw.features {
            Some(names) => FeatureSet::new(names).map_err(ConfigError::Invalid)?,
            None => FeatureSet::default(),
        };

        Ok(Self {
            endpoint: validate_endpoint(&raw.endpoint)?,
            features,
            log_level: raw.log_level.parse().map_err(ConfigError::Invalid)?,
            log_file: raw.log_file.filter(|f| !f.trim().is_empty()),
            console_timestamps: raw.console_timestamps,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<String, ConfigError> {
    let endpoint = endpoint.trim();
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(endpoint.to_string())
    } else {
        Err(ConfigError::Invalid(format!(
            "endpoint must be an http(s) URL: {:?}",
            endpoint
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = ClientConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint, "http://127.0.0.1:5000/predict");
    }

    #[test]
    fn test_toml_values_are_applied() {
        let config = ClientConfig::from_toml_str(
            r#"
            endpoint = "http://10.0.0.5:8080/predict"
            features = ["MinTemp", "MaxTemp", "Humidity9am"]
            log_level = "debug"
            log_file = "predict.log"
            console_timestamps = true
            "#,
        )
        .expect("valid config");

        assert_eq!(config.endpoint, "http://10.0.0.5:8080/predict");
        assert_eq!(config.features.names(), &["MinTemp", "MaxTemp", "Humidity9am"]);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_file.as_deref(), Some("predict.log"));
        assert!(config.console_timestamps);
    }

    #[test]
    fn test_empty_feature_list_is_rejected() {
        let result = ClientConfig::from_toml_str("features = []");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_duplicate_features_are_rejected() {
        let result = ClientConfig::from_toml_str(r#"features = ["cloud", "cloud"]"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = ClientConfig::from_toml_str("timeout_secs = 5");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_bad_endpoint_is_rejected() {
        let result = ClientConfig::from_toml_str(r#"endpoint = "127.0.0.1:5000/predict""#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut config = ClientConfig::from_toml_str(r#"endpoint = "http://a/predict""#)
            .expect("valid config");
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_ENDPOINT, "http://b:9000/predict"),
            (ENV_LOG_LEVEL, "error"),
            (ENV_LOG_FILE, "   "),
        ]);

        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .expect("valid overrides");

        assert_eq!(config.endpoint, "http://b:9000/predict");
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.log_file, None, "blank override is ignored");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = ClientConfig::load(Some(Path::new("/nonexistent/rainfall/config.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

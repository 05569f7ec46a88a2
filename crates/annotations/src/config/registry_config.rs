use crate::config::{ConfigError, ConfigSource};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Selects the environment preset
pub const ENVIRONMENT_VAR: &str = "ELIF_ENV";
/// Overrides [`RegistryConfig::log_level`]
pub const LOG_LEVEL_VAR: &str = "ELIF_ANNOTATIONS_LOG_LEVEL";
/// Overrides [`RegistryConfig::log_writes`]
pub const LOG_WRITES_VAR: &str = "ELIF_ANNOTATIONS_LOG_WRITES";
/// Overrides [`RegistryConfig::initial_class_capacity`]
pub const CLASS_CAPACITY_VAR: &str = "ELIF_ANNOTATIONS_CLASS_CAPACITY";

/// Upper bound for the pre-allocated class capacity
pub const MAX_CLASS_CAPACITY: usize = 1 << 20;

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

const FIELDS: [&str; 4] = [
    "environment",
    "log_level",
    "log_writes",
    "initial_class_capacity",
];

/// Configuration loading contract for the metadata registry
pub trait RegistryConfigTrait: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Environment enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::invalid_value(
                "environment",
                s,
                "development, testing, or production",
            )),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_str = match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        };
        write!(f, "{}", env_str)
    }
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn is_testing(&self) -> bool {
        matches!(self, Environment::Testing)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Shape of a YAML configuration document; absent keys keep the preset value
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    environment: Option<Environment>,
    log_level: Option<String>,
    log_writes: Option<bool>,
    initial_class_capacity: Option<usize>,
}

/// Metadata registry configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub environment: Environment,
    /// Verbosity the host should install its subscriber with
    pub log_level: String,
    /// Emit a debug event for every successful metadata write
    pub log_writes: bool,
    /// Number of classes the store pre-allocates room for
    pub initial_class_capacity: usize,
    sources: HashMap<String, ConfigSource>,
}

impl RegistryConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::development()
    }

    /// Create configuration for development
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            log_level: "debug".to_string(),
            log_writes: true,
            initial_class_capacity: 64,
            sources: HashMap::new(),
        }
    }

    /// Create configuration for testing
    pub fn testing() -> Self {
        Self {
            environment: Environment::Testing,
            log_level: "warn".to_string(),
            log_writes: false,
            initial_class_capacity: 16,
            sources: HashMap::new(),
        }
    }

    /// Create configuration for production
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            log_level: "info".to_string(),
            log_writes: false,
            initial_class_capacity: 256,
            sources: HashMap::new(),
        }
    }

    /// Preset for an environment
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::development(),
            Environment::Testing => Self::testing(),
            Environment::Production => Self::production(),
        }
    }

    /// Set the log level
    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self.sources
            .insert("log_level".to_string(), ConfigSource::Programmatic);
        self
    }

    /// Enable or disable per-write debug events
    pub fn with_log_writes(mut self, log_writes: bool) -> Self {
        self.log_writes = log_writes;
        self.sources
            .insert("log_writes".to_string(), ConfigSource::Programmatic);
        self
    }

    /// Set the number of classes to pre-allocate room for
    pub fn with_initial_class_capacity(mut self, capacity: usize) -> Self {
        self.initial_class_capacity = capacity;
        self.sources.insert(
            "initial_class_capacity".to_string(),
            ConfigSource::Programmatic,
        );
        self
    }

    /// `log_level` as a `tracing` level, for subscriber setup
    pub fn tracing_level(&self) -> Result<tracing::Level, ConfigError> {
        self.validate_log_level()?;
        self.log_level.parse().map_err(|_| {
            ConfigError::invalid_value("log_level", &self.log_level, VALID_LOG_LEVELS.join(", "))
        })
    }

    /// Parse configuration from a YAML document
    ///
    /// The document's `environment` (development when absent) selects the
    /// preset; every other key present in the document overrides it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::from_document(yaml, ConfigSource::Programmatic)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_document(&contents, ConfigSource::File(path.display().to_string()))
    }

    fn from_document(yaml: &str, origin: ConfigSource) -> Result<Self, ConfigError> {
        let document: ConfigDocument = serde_yaml::from_str(yaml)?;

        let environment = document.environment.unwrap_or(Environment::Development);
        let mut config = Self::for_environment(environment);
        let mut present = Vec::new();

        if document.environment.is_some() {
            present.push("environment");
        }
        if let Some(log_level) = document.log_level {
            config.log_level = log_level;
            present.push("log_level");
        }
        if let Some(log_writes) = document.log_writes {
            config.log_writes = log_writes;
            present.push("log_writes");
        }
        if let Some(capacity) = document.initial_class_capacity {
            config.initial_class_capacity = capacity;
            present.push("initial_class_capacity");
        }

        for field in present {
            config.sources.insert(field.to_string(), origin.clone());
        }

        config.validate()?;
        Ok(config)
    }

    fn validate_log_level(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::invalid_value(
                "log_level",
                &self.log_level,
                format!("one of: {}", VALID_LOG_LEVELS.join(", ")),
            ));
        }
        Ok(())
    }

    fn field_value(&self, field: &str) -> String {
        match field {
            "environment" => self.environment.to_string(),
            "log_level" => self.log_level.clone(),
            "log_writes" => self.log_writes.to_string(),
            "initial_class_capacity" => self.initial_class_capacity.to_string(),
            _ => String::new(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(field, value, "true or false")),
    }
}

impl RegistryConfigTrait for RegistryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var(ENVIRONMENT_VAR) {
            Ok(value) => value.parse()?,
            Err(_) => Environment::Development,
        };

        let mut config = Self::for_environment(environment);
        if env::var(ENVIRONMENT_VAR).is_ok() {
            config.sources.insert(
                "environment".to_string(),
                ConfigSource::EnvVar(ENVIRONMENT_VAR.to_string()),
            );
        }

        if let Ok(value) = env::var(LOG_LEVEL_VAR) {
            config.log_level = value.to_lowercase();
            config.sources.insert(
                "log_level".to_string(),
                ConfigSource::EnvVar(LOG_LEVEL_VAR.to_string()),
            );
        }

        if let Ok(value) = env::var(LOG_WRITES_VAR) {
            config.log_writes = parse_bool("log_writes", &value)?;
            config.sources.insert(
                "log_writes".to_string(),
                ConfigSource::EnvVar(LOG_WRITES_VAR.to_string()),
            );
        }

        if let Ok(value) = env::var(CLASS_CAPACITY_VAR) {
            config.initial_class_capacity = value.parse().map_err(|_| {
                ConfigError::invalid_value("initial_class_capacity", &value, "non-negative integer")
            })?;
            config.sources.insert(
                "initial_class_capacity".to_string(),
                ConfigSource::EnvVar(CLASS_CAPACITY_VAR.to_string()),
            );
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_log_level()?;

        if self.initial_class_capacity > MAX_CLASS_CAPACITY {
            return Err(ConfigError::invalid_value(
                "initial_class_capacity",
                self.initial_class_capacity.to_string(),
                format!("at most {}", MAX_CLASS_CAPACITY),
            ));
        }

        if self.environment.is_production() && self.log_writes {
            return Err(ConfigError::invalid_value(
                "log_writes",
                "true",
                "false in production environment",
            ));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        FIELDS
            .iter()
            .map(|field| {
                let source = self
                    .sources
                    .get(*field)
                    .cloned()
                    .unwrap_or_else(|| ConfigSource::Default(self.field_value(field)));
                (field.to_string(), source)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [ENVIRONMENT_VAR, LOG_LEVEL_VAR, LOG_WRITES_VAR, CLASS_CAPACITY_VAR] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_environment_aliases() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("TEST".parse::<Environment>().unwrap(), Environment::Testing);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_presets_validate() {
        assert!(RegistryConfig::development().validate().is_ok());
        assert!(RegistryConfig::testing().validate().is_ok());
        assert!(RegistryConfig::production().validate().is_ok());
    }

    #[test]
    fn test_log_writes_rejected_in_production() {
        let config = RegistryConfig::production().with_log_writes(true);
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("log_writes"));
    }

    #[test]
    fn test_capacity_upper_bound() {
        let config = RegistryConfig::new().with_initial_class_capacity(MAX_CLASS_CAPACITY + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_validation() {
        for level in VALID_LOG_LEVELS {
            assert!(RegistryConfig::new().with_log_level(level).validate().is_ok());
        }

        let err = RegistryConfig::new()
            .with_log_level("verbose")
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("log_level"));
    }

    #[test]
    fn test_tracing_level() {
        assert_eq!(
            RegistryConfig::production().tracing_level().unwrap(),
            tracing::Level::INFO
        );
        assert_eq!(
            RegistryConfig::new().with_log_level("trace").tracing_level().unwrap(),
            tracing::Level::TRACE
        );
        assert!(RegistryConfig::new().with_log_level("5").tracing_level().is_err());
    }

    #[test]
    fn test_from_yaml_str_uses_environment_preset() {
        let config = RegistryConfig::from_yaml_str("environment: production\n").unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.log_writes);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.initial_class_capacity, 256);

        let config = RegistryConfig::from_yaml_str("environment: testing\n").unwrap();
        assert!(!config.log_writes);
        assert_eq!(config.initial_class_capacity, 16);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_from_yaml_str_overrides_preset() {
        let config = RegistryConfig::from_yaml_str(
            "environment: test\nlog_level: trace\ninitial_class_capacity: 8\n",
        )
        .unwrap();
        assert_eq!(config.environment, Environment::Testing);
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.initial_class_capacity, 8);
        assert!(!config.log_writes);

        let config = RegistryConfig::from_yaml_str("log_writes: false\n").unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.log_writes);
    }

    #[test]
    fn test_from_yaml_str_rejects_bad_documents() {
        assert!(RegistryConfig::from_yaml_str("log_format: json\n").is_err());
        assert!(RegistryConfig::from_yaml_str("environment: staging\n").is_err());
        assert!(RegistryConfig::from_yaml_str("log_level: verbose\n").is_err());
        assert!(RegistryConfig::from_yaml_str("environment: production\nlog_writes: true\n").is_err());
    }

    #[test]
    fn test_from_yaml_file_records_only_present_keys() {
        let path = env::temp_dir().join(format!("elif-annotations-{}.yaml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "environment: testing\nlog_level: error\n").unwrap();

        let config = RegistryConfig::from_yaml_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let sources = config.config_sources();
        assert!(sources["environment"].is_file());
        assert!(sources["log_level"].is_file());
        assert_eq!(
            sources["log_level"],
            ConfigSource::File(path.display().to_string())
        );
        assert_eq!(sources["log_writes"], ConfigSource::Default("false".to_string()));
        assert_eq!(
            sources["initial_class_capacity"],
            ConfigSource::Default("16".to_string())
        );
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let path = env::temp_dir().join(format!("elif-annotations-{}.yaml", uuid::Uuid::new_v4()));
        assert!(matches!(
            RegistryConfig::from_yaml_file(&path),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = RegistryConfig::from_env().unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.log_level, "debug");
        assert!(config.config_sources().values().all(ConfigSource::is_default));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var(ENVIRONMENT_VAR, "production");
        env::set_var(CLASS_CAPACITY_VAR, "1024");
        env::set_var(LOG_LEVEL_VAR, "WARN");

        let config = RegistryConfig::from_env().unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.log_writes);
        assert_eq!(config.initial_class_capacity, 1024);
        assert_eq!(config.log_level, "warn");

        let sources = config.config_sources();
        assert!(sources["environment"].is_env_var());
        assert!(sources["initial_class_capacity"].is_env_var());
        assert!(sources["log_level"].is_env_var());
        assert!(sources["log_writes"].is_default());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        clear_env();
        env::set_var(LOG_WRITES_VAR, "sometimes");
        let err = RegistryConfig::from_env().unwrap_err();
        assert_eq!(err.field(), Some("log_writes"));

        clear_env();
        env::set_var(CLASS_CAPACITY_VAR, "-1");
        assert!(RegistryConfig::from_env().is_err());

        clear_env();
        env::set_var(LOG_LEVEL_VAR, "loud");
        let err = RegistryConfig::from_env().unwrap_err();
        assert_eq!(err.field(), Some("log_level"));
        clear_env();
    }
}

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::helpers::deserialize_duration_from_ms;
use crate::models::TopicSpec;

/// Provides the default value for partition_count.
fn default_partition_count() -> i32 {
    1
}

/// Provides the default value for replication_factor.
fn default_replication_factor() -> i32 {
    2
}

/// Provides the default value for call_timeout_ms.
fn default_call_timeout() -> Duration {
    Duration::from_millis(5000)
}

/// Application configuration for Teller.
///
/// Loaded from an optional `app.yaml` in the config directory with
/// environment variables layered on top, so `TOPIC_NAME` and
/// `BOOTSTRAP_ADDRESS` work without any file present.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The topic transaction events are published to.
    pub topic_name: String,

    /// Comma-separated list of `host:port` broker endpoints.
    pub bootstrap_address: String,

    /// Number of partitions used when the topic has to be created.
    #[serde(default = "default_partition_count")]
    pub partition_count: i32,

    /// Replication factor used when the topic has to be created.
    #[serde(default = "default_replication_factor")]
    pub replication_factor: i32,

    /// Upper bound for each individual broker call.
    #[serde(default = "default_call_timeout", deserialize_with = "deserialize_duration_from_ms")]
    pub call_timeout_ms: Duration,

    /// Credentials and trust material for the encrypted broker transport.
    #[serde(default)]
    pub security: SecurityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            topic_name: String::new(),
            bootstrap_address: String::new(),
            partition_count: default_partition_count(),
            replication_factor: default_replication_factor(),
            call_timeout_ms: default_call_timeout(),
            security: SecurityConfig::default(),
        }
    }
}

/// Credentials and trust material for the always-encrypted broker transport.
///
/// There is no plaintext option: the client connects over SSL, or SASL_SSL
/// when a SASL username is set.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// The SASL mechanism to use for authentication.
    /// Common values: PLAIN, SCRAM-SHA-256, SCRAM-SHA-512.
    #[serde(default)]
    pub sasl_mechanism: Option<String>,

    /// The username for SASL authentication.
    #[serde(default)]
    pub sasl_username: Option<String>,

    /// The password for SASL authentication.
    #[serde(default)]
    pub sasl_password: Option<String>,

    /// Path to the CA certificate file for verifying the broker's
    /// certificate.
    #[serde(default)]
    pub ssl_ca_location: Option<String>,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory
    /// and the environment.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{config_dir_str}/app")).required(false))
            .add_source(Environment::default())
            .build()?;
        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// The topic specification used when the topic has to be created.
    pub fn topic_spec(&self) -> TopicSpec {
        TopicSpec {
            name: self.topic_name.clone(),
            partition_count: self.partition_count,
            replication_factor: self.replication_factor,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.topic_name.is_empty() {
            return Err(ConfigError::Message("topic_name must not be empty".to_string()));
        }
        if self.bootstrap_address.is_empty() {
            return Err(ConfigError::Message("bootstrap_address must not be empty".to_string()));
        }
        if self.partition_count < 1 {
            return Err(ConfigError::Message("partition_count must be at least 1".to_string()));
        }
        if self.replication_factor < 1 {
            return Err(ConfigError::Message("replication_factor must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Creates a new `AppConfigBuilder` for testing purposes.
    #[cfg(test)]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// A builder for creating `AppConfig` instances for testing.
#[cfg(test)]
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn topic_name(mut self, topic_name: &str) -> Self {
        self.config.topic_name = topic_name.to_string();
        self
    }

    pub fn bootstrap_address(mut self, bootstrap_address: &str) -> Self {
        self.config.bootstrap_address = bootstrap_address.to_string();
        self
    }

    pub fn partition_count(mut self, partition_count: i32) -> Self {
        self.config.partition_count = partition_count;
        self
    }

    pub fn replication_factor(mut self, replication_factor: i32) -> Self {
        self.config.replication_factor = replication_factor;
        self
    }

    pub fn call_timeout(mut self, timeout_ms: u64) -> Self {
        self.config.call_timeout_ms = Duration::from_millis(timeout_ms);
        self
    }

    pub fn sasl_credentials(mut self, mechanism: &str, username: &str, password: &str) -> Self {
        self.config.security.sasl_mechanism = Some(mechanism.to_string());
        self.config.security.sasl_username = Some(username.to_string());
        self.config.security.sasl_password = Some(password.to_string());
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_builder() {
        let config = AppConfig::builder()
            .topic_name("transactions")
            .bootstrap_address("broker-1:9094")
            .partition_count(3)
            .call_timeout(2500)
            .build();

        assert_eq!(config.topic_name, "transactions");
        assert_eq!(config.bootstrap_address, "broker-1:9094");
        assert_eq!(config.partition_count, 3);
        assert_eq!(config.replication_factor, 2);
        assert_eq!(config.call_timeout_ms, Duration::from_millis(2500));

        let spec = config.topic_spec();
        assert_eq!(spec.name, "transactions");
        assert_eq!(spec.partition_count, 3);
    }

    #[test]
    fn test_app_config_from_file() {
        let config_content = r#"
        topic_name: "transactions"
        bootstrap_address: "broker-1:9094,broker-2:9094"
        partition_count: 4
        call_timeout_ms: 2500
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        let config = AppConfig::new(Some(temp_dir.path().to_str().unwrap())).unwrap();

        assert_eq!(config.topic_name, "transactions");
        assert_eq!(config.bootstrap_address, "broker-1:9094,broker-2:9094");
        assert_eq!(config.partition_count, 4);
        assert_eq!(config.call_timeout_ms, Duration::from_millis(2500));
        assert_eq!(config.security, SecurityConfig::default());
    }

    #[test]
    fn test_app_config_from_file_with_env_var_override() {
        let config_content = r#"
        topic_name: "transactions"
        bootstrap_address: "broker-1:9094"
        replication_factor: 2
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        unsafe {
            std::env::set_var("REPLICATION_FACTOR", "3");
        }

        let config = AppConfig::new(Some(temp_dir.path().to_str().unwrap())).unwrap();
        assert_eq!(config.replication_factor, 3);

        unsafe {
            std::env::remove_var("REPLICATION_FACTOR");
        }
    }

    #[test]
    fn test_app_config_rejects_missing_topic() {
        let config_content = r#"
        topic_name: ""
        bootstrap_address: "broker-1:9094"
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        let result = AppConfig::new(Some(temp_dir.path().to_str().unwrap()));
        assert!(result.is_err());
    }

    #[test]
    fn test_app_config_rejects_invalid_partition_count() {
        let config_content = r#"
        topic_name: "transactions"
        bootstrap_address: "broker-1:9094"
        partition_count: 0
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        let result = AppConfig::new(Some(temp_dir.path().to_str().unwrap()));
        assert!(result.is_err());
    }
}

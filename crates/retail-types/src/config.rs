//! Run configuration.
//!
//! A run is described by one JSON or YAML file. The general options drive the
//! generator, the throttle and the file sink; the `kafka` section drives the
//! publish pipeline and topic provisioning.

use crate::duration::parse_duration;
use crate::format::{self, FileFormat, ParseError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Iteration bound used when `testSize` is 0.
pub const UNBOUNDED_TEST_SIZE: u64 = u64::MAX;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing YAML
    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value is outside its accepted range
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// A duration string could not be parsed
    #[error("Invalid duration: '{0}'")]
    InvalidDuration(String),
}

impl From<ParseError> for ConfigError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Json(e) => ConfigError::Json(e),
            ParseError::Yaml(e) => ConfigError::Yaml(e),
        }
    }
}

fn default_sleep_max_millis() -> u64 {
    1000
}

fn default_max_items_per_basket() -> u32 {
    10
}

fn default_max_quantity() -> u32 {
    5
}

fn default_vat_rate() -> f64 {
    0.15
}

fn default_output_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_seed_file() -> PathBuf {
    PathBuf::from("seed.json")
}

/// General run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Number of records to produce, 0 means run until interrupted
    #[serde(default)]
    pub test_size: u64,

    /// Upper bound (exclusive) of each random pacing pause
    #[serde(default = "default_sleep_max_millis")]
    pub sleep_max_millis: u64,

    #[serde(default = "default_max_items_per_basket")]
    pub max_items_per_basket: u32,

    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,

    #[serde(default = "default_vat_rate")]
    pub vat_rate: f64,

    /// Suffix appended verbatim to every timestamp, e.g. "+02:00"
    #[serde(default)]
    pub time_offset: String,

    /// Store to use for every basket, 0 means pick one at random
    #[serde(default)]
    pub fixed_store_index: usize,

    #[serde(default)]
    pub debug_level: u8,

    #[serde(default)]
    pub write_to_file: bool,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    #[serde(default)]
    pub broker_enabled: bool,

    #[serde(default = "default_seed_file")]
    pub seed_file: PathBuf,

    /// Random seed; when absent the run draws one from the OS
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub echo_config: bool,

    #[serde(default)]
    pub echo_seed: bool,

    #[serde(default)]
    pub kafka: KafkaSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            test_size: 0,
            sleep_max_millis: default_sleep_max_millis(),
            max_items_per_basket: default_max_items_per_basket(),
            max_quantity: default_max_quantity(),
            vat_rate: default_vat_rate(),
            time_offset: String::new(),
            fixed_store_index: 0,
            debug_level: 0,
            write_to_file: false,
            output_path: default_output_path(),
            broker_enabled: false,
            seed_file: default_seed_file(),
            seed: None,
            echo_config: false,
            echo_seed: false,
            kafka: KafkaSettings::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a JSON or YAML file.
    ///
    /// Relative `seedFile` and `outputPath` entries are resolved against the
    /// directory holding the configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config: RunConfig = format::parse(&content, FileFormat::from_path(path))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }

        Ok(config)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(format::parse(json, FileFormat::Json)?)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(format::parse(yaml, FileFormat::Yaml)?)
    }

    fn resolve_relative_paths(&mut self, base: &Path) {
        if self.seed_file.is_relative() {
            self.seed_file = base.join(&self.seed_file);
        }
        if self.output_path.is_relative() {
            self.output_path = base.join(&self.output_path);
        }
    }

    /// Iteration bound for the run loop. `testSize = 0` is unbounded.
    pub fn effective_test_size(&self) -> u64 {
        if self.test_size == 0 {
            UNBOUNDED_TEST_SIZE
        } else {
            self.test_size
        }
    }

    /// Validate ranges before anything is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_items_per_basket < 1 {
            return Err(ConfigError::InvalidValue {
                field: "maxItemsPerBasket",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_quantity < 1 {
            return Err(ConfigError::InvalidValue {
                field: "maxQuantity",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.vat_rate.is_finite() || self.vat_rate < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "vatRate",
                reason: format!("must be a non-negative number, got {}", self.vat_rate),
            });
        }
        if self.broker_enabled {
            self.kafka.validate()?;
        }
        Ok(())
    }

    /// Copy of this configuration with secrets masked, for echoing to logs.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(sasl) = copy.kafka.sasl.as_mut() {
            if !sasl.password.is_empty() {
                sasl.password = "***".to_string();
            }
        }
        copy
    }
}

fn default_bootstrap_servers() -> String {
    "localhost:9092".to_string()
}

fn default_basket_topic() -> String {
    "basket".to_string()
}

fn default_payment_topic() -> String {
    "payment".to_string()
}

fn default_num_partitions() -> i32 {
    3
}

fn default_replication_factor() -> i32 {
    1
}

fn default_flush_interval() -> u64 {
    100
}

fn default_flush_timeout_ms() -> u64 {
    10_000
}

fn default_admin_timeout() -> String {
    "60s".to_string()
}

fn default_payment_key() -> String {
    "1001".to_string()
}

/// Broker connection and topic settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KafkaSettings {
    #[serde(default = "default_bootstrap_servers")]
    pub bootstrap_servers: String,

    #[serde(default = "default_basket_topic")]
    pub basket_topic: String,

    #[serde(default = "default_payment_topic")]
    pub payment_topic: String,

    #[serde(default = "default_num_partitions")]
    pub num_partitions: i32,

    #[serde(default = "default_replication_factor")]
    pub replication_factor: i32,

    /// Number of successful sends between forced flushes
    #[serde(default = "default_flush_interval")]
    pub flush_interval: u64,

    #[serde(default = "default_flush_timeout_ms")]
    pub flush_timeout_ms: u64,

    /// Topic provisioning timeout, e.g. "60s"
    #[serde(default = "default_admin_timeout")]
    pub admin_timeout: String,

    /// Partition key shared by every payment message
    #[serde(default = "default_payment_key")]
    pub payment_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sasl: Option<SaslSettings>,
}

impl Default for KafkaSettings {
    fn default() -> Self {
        Self {
            bootstrap_servers: default_bootstrap_servers(),
            basket_topic: default_basket_topic(),
            payment_topic: default_payment_topic(),
            num_partitions: default_num_partitions(),
            replication_factor: default_replication_factor(),
            flush_interval: default_flush_interval(),
            flush_timeout_ms: default_flush_timeout_ms(),
            admin_timeout: default_admin_timeout(),
            payment_key: default_payment_key(),
            client_id: None,
            sasl: None,
        }
    }
}

impl KafkaSettings {
    pub fn flush_timeout(&self) -> Duration {
        Duration::from_millis(self.flush_timeout_ms)
    }

    pub fn admin_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.admin_timeout)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_empty = [
            ("kafka.bootstrapServers", &self.bootstrap_servers),
            ("kafka.basketTopic", &self.basket_topic),
            ("kafka.paymentTopic", &self.payment_topic),
        ];
        for (field, value) in non_empty {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if self.flush_interval < 1 {
            return Err(ConfigError::InvalidValue {
                field: "kafka.flushInterval",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.num_partitions < 1 {
            return Err(ConfigError::InvalidValue {
                field: "kafka.numPartitions",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.replication_factor < 1 {
            return Err(ConfigError::InvalidValue {
                field: "kafka.replicationFactor",
                reason: "must be at least 1".to_string(),
            });
        }
        self.admin_timeout()?;
        Ok(())
    }
}

/// SASL authentication settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaslSettings {
    pub mechanisms: String,
    #[serde(default = "default_security_protocol")]
    pub security_protocol: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn default_security_protocol() -> String {
    "SASL_SSL".to_string()
}

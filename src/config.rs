use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub kafka: KafkaConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KafkaConfig {
    #[serde(default = "default_brokers")]
    pub brokers: Vec<String>,
    #[serde(default = "default_group_id")]
    pub group_id: String,
    #[serde(default = "default_auto_offset_reset")]
    pub auto_offset_reset: String,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_acks")]
    pub acks: String,
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    #[serde(default = "default_input_topic")]
    pub input_topic: String,
    #[serde(default = "default_output_topic")]
    pub output_topic: String,
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    #[serde(default)]
    pub delivery: DeliveryMode,
}

/// How the relay treats the producer's delivery report for each record.
///
/// `BestEffort` enqueues the record and moves on without inspecting the
/// outcome, so a failed publish is silently dropped. `AwaitAck` waits for the
/// broker acknowledgement and surfaces failures as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    #[default]
    BestEffort,
    AwaitAck,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: default_brokers(),
            group_id: default_group_id(),
            auto_offset_reset: default_auto_offset_reset(),
            compression: default_compression(),
            acks: default_acks(),
            linger_ms: default_linger_ms(),
            batch_size: default_batch_size(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            input_topic: default_input_topic(),
            output_topic: default_output_topic(),
            poll_timeout_ms: default_poll_timeout_ms(),
            delivery: DeliveryMode::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kafka: KafkaConfig::default(),
            relay: RelayConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("KAFKA_RELAY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kafka.brokers.is_empty() {
            return Err(Error::Config("kafka.brokers must not be empty".to_string()));
        }
        if self.relay.input_topic.is_empty() {
            return Err(Error::Config(
                "relay.input_topic must not be empty".to_string(),
            ));
        }
        if self.relay.output_topic.is_empty() {
            return Err(Error::Config(
                "relay.output_topic must not be empty".to_string(),
            ));
        }
        if self.relay.poll_timeout_ms == 0 {
            return Err(Error::Config(
                "relay.poll_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bootstrap_servers(&self) -> String {
        self.kafka.brokers.join(",")
    }
}

fn default_brokers() -> Vec<String> {
    vec!["localhost:29092".to_string()]
}

fn default_group_id() -> String {
    "consumer-group-1".to_string()
}

fn default_auto_offset_reset() -> String {
    "earliest".to_string()
}

fn default_compression() -> String {
    "none".to_string()
}

fn default_acks() -> String {
    "all".to_string()
}

fn default_linger_ms() -> u32 {
    100
}

fn default_batch_size() -> usize {
    16384
}

fn default_input_topic() -> String {
    "user-login".to_string()
}

fn default_output_topic() -> String {
    "processed-user-login".to_string()
}

fn default_poll_timeout_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_toml() -> tempfile::NamedTempFile {
        Builder::new().suffix(".toml").tempfile().unwrap()
    }

    #[test]
    fn test_defaults_match_original_constants() {
        let config = Config::default();
        assert_eq!(config.kafka.brokers, vec!["localhost:29092".to_string()]);
        assert_eq!(config.kafka.group_id, "consumer-group-1");
        assert_eq!(config.kafka.auto_offset_reset, "earliest");
        assert_eq!(config.relay.input_topic, "user-login");
        assert_eq!(config.relay.output_topic, "processed-user-login");
        assert_eq!(config.relay.poll_timeout_ms, 100);
        assert_eq!(config.relay.delivery, DeliveryMode::BestEffort);
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let mut file = temp_toml();
        writeln!(
            file,
            r#"
[kafka]
brokers = ["broker-a:9092", "broker-b:9092"]
group_id = "relay-test"

[relay]
input_topic = "in"
output_topic = "out"
poll_timeout_ms = 250
delivery = "await_ack"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.kafka.brokers.len(), 2);
        assert_eq!(config.kafka.group_id, "relay-test");
        assert_eq!(config.relay.input_topic, "in");
        assert_eq!(config.relay.output_topic, "out");
        assert_eq!(config.relay.poll_timeout_ms, 250);
        assert_eq!(config.relay.delivery, DeliveryMode::AwaitAck);
        // Untouched fields keep their defaults
        assert_eq!(config.kafka.auto_offset_reset, "earliest");
    }

    #[test]
    fn test_partial_file_keeps_section_defaults() {
        let mut file = temp_toml();
        writeln!(
            file,
            r#"
[relay]
output_topic = "trimmed"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.relay.output_topic, "trimmed");
        assert_eq!(config.relay.input_topic, "user-login");
        assert_eq!(config.kafka.brokers, vec!["localhost:29092".to_string()]);
    }

    #[test]
    fn test_validation_rejects_empty_brokers() {
        let mut config = Config::default();
        config.kafka.brokers.clear();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validation_rejects_zero_poll_timeout() {
        let mut config = Config::default();
        config.relay.poll_timeout_ms = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_bootstrap_servers_joins_brokers() {
        let mut config = Config::default();
        config.kafka.brokers = vec!["a:1".to_string(), "b:2".to_string()];
        assert_eq!(config.bootstrap_servers(), "a:1,b:2");
    }
}

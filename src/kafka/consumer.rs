use crate::config::KafkaConfig;
use crate::record::Record;
use crate::{Error, Result};
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message};
use rdkafka::ClientConfig;
use std::time::Duration;

/// Consumer half of the relay, subscribed to the input topic under the
/// configured consumer group.
pub struct RelayConsumer {
    consumer: StreamConsumer,
}

impl RelayConsumer {
    pub fn new(config: &KafkaConfig, input_topic: &str) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", config.brokers.join(","))
            .set("group.id", &config.group_id)
            .set("auto.offset.reset", &config.auto_offset_reset)
            .create()?;

        consumer.subscribe(&[input_topic])?;

        Ok(Self { consumer })
    }

    /// Waits up to `timeout` for the next record on the input topic.
    ///
    /// Returns `Ok(None)` when nothing arrives within the window, which is
    /// the normal idle case. Records already prefetched by the client are
    /// returned without waiting, so a busy topic drains back to back.
    pub async fn poll(&self, timeout: Duration) -> Result<Option<Record>> {
        match tokio::time::timeout(timeout, self.consumer.recv()).await {
            Err(_) => Ok(None),
            Ok(Err(e)) => Err(Error::Kafka(e)),
            Ok(Ok(message)) => decode(&message).map(Some),
        }
    }
}

/// Decodes a raw broker message into a [`Record`], requiring the key and
/// value to be valid UTF-8. An absent payload decodes to the empty string,
/// matching the text deserializer's treatment of null values.
fn decode(message: &BorrowedMessage<'_>) -> Result<Record> {
    let partition = message.partition();
    let offset = message.offset();

    let key = match message.key() {
        None => None,
        Some(bytes) => Some(
            std::str::from_utf8(bytes)
                .map_err(|e| Error::InvalidRecord {
                    partition,
                    offset,
                    message: format!("key is not valid UTF-8: {}", e),
                })?
                .to_string(),
        ),
    };

    let value = match message.payload() {
        None => String::new(),
        Some(bytes) => std::str::from_utf8(bytes)
            .map_err(|e| Error::InvalidRecord {
                partition,
                offset,
                message: format!("value is not valid UTF-8: {}", e),
            })?
            .to_string(),
    };

    Ok(Record {
        key,
        value,
        partition,
        offset,
    })
}

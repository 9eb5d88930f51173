use crate::config::{DeliveryMode, KafkaConfig};
use crate::{Error, Result};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;

/// Producer half of the relay, publishing transformed records to the output
/// topic.
pub struct RelayProducer {
    producer: FutureProducer,
}

impl RelayProducer {
    pub fn new(config: &KafkaConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", config.brokers.join(","))
            .set("compression.type", &config.compression)
            .set("acks", &config.acks)
            .set("linger.ms", config.linger_ms.to_string())
            .set("batch.size", config.batch_size.to_string())
            .create()?;

        Ok(Self { producer })
    }

    /// Publishes one record to `topic`, carrying the key through unchanged.
    /// A record consumed without a key is published without one.
    ///
    /// In [`DeliveryMode::BestEffort`] the record is handed to the client's
    /// internal queue and the delivery report is dropped unread; a failed
    /// delivery is invisible to the caller. In [`DeliveryMode::AwaitAck`] the
    /// call resolves once the broker acknowledges the write and reports
    /// failures as [`Error::Publish`].
    pub async fn send(
        &self,
        topic: &str,
        key: Option<&str>,
        value: &str,
        mode: DeliveryMode,
    ) -> Result<()> {
        let mut record = FutureRecord::<str, str>::to(topic).payload(value);
        if let Some(key) = key {
            record = record.key(key);
        }

        match mode {
            DeliveryMode::BestEffort => {
                let _delivery = self
                    .producer
                    .send_result(record)
                    .map_err(|(e, _)| Error::Kafka(e))?;
                Ok(())
            }
            DeliveryMode::AwaitAck => {
                self.producer
                    .send(record, rdkafka::util::Timeout::Never)
                    .await
                    .map_err(|(e, _)| Error::Publish {
                        topic: topic.to_string(),
                        source: e,
                    })?;
                Ok(())
            }
        }
    }
}

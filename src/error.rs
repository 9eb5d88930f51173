//! Error types and result handling for kafka-relay.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use kafka_relay::{Error, Result};
//!
//! fn load_settings() -> Result<()> {
//!     // Simulating a configuration error
//!     Err(Error::Config("brokers list is empty".to_string()))
//! }
//!
//! match load_settings() {
//!     Ok(()) => println!("Loaded"),
//!     Err(Error::Config(msg)) => eprintln!("Configuration error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for kafka-relay operations.
///
/// This enum represents all possible errors that can occur while relaying
/// records, from configuration issues to runtime failures. There is no retry
/// layer: any of these propagating out of the relay loop ends the process.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error, from an invalid file or environment variables.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Kafka client, consumer, or producer error.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// Delivery failure reported by the broker when awaited acknowledgement
    /// is configured. Never raised in best-effort mode.
    #[error("Publish to '{topic}' failed: {source}")]
    Publish {
        /// The output topic the record was destined for
        topic: String,
        /// The underlying client error
        source: rdkafka::error::KafkaError,
    },

    /// A consumed record whose key or value is not valid UTF-8.
    #[error("Invalid record at partition {partition} offset {offset}: {message}")]
    InvalidRecord {
        /// Partition the record was consumed from
        partition: i32,
        /// Offset of the record within its partition
        offset: i64,
        /// Description of what was invalid
        message: String,
    },

    /// I/O error, typically while reading the configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Graceful shutdown was requested (e.g., via Ctrl+C).
    ///
    /// This is not really an error but uses the error mechanism
    /// to cleanly exit the relay loop.
    #[error("Shutdown requested")]
    Shutdown,
}

/// A convenient Result type alias for kafka-relay operations.
///
/// This is equivalent to `std::result::Result<T, kafka_relay::Error>`.
///
/// # Example
///
/// ```rust
/// use kafka_relay::Result;
///
/// fn do_something() -> Result<String> {
///     Ok("Success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

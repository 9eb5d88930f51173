pub mod config;
pub mod error;
pub mod record;
pub mod relay;

pub mod kafka;

pub use config::Config;
pub use error::{Error, Result};
pub use relay::{Relay, ShutdownHandle};

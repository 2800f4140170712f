pub mod cache;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;

pub use envelope::{Envelope, EnvelopeCodec};
pub use error::{ConfigError, EnvelopeError};

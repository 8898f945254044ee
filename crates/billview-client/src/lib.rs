pub mod aggregate;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod fetch;
pub mod filter;
pub mod metrics;
pub mod records;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::sql_gateway::SqlGateway;
pub use config::CliConfig;
pub use crate::core::ingest::run;
pub use domain::model::{ProcessingResult, Record, RunSummary, SkipReason, SourceRow, ValidationOutcome};
pub use domain::ports::{GatewayError, UserGateway};
pub use utils::error::{Result, UploadError};

use crate::adapters::csv_source;
use crate::adapters::offline_gateway::OfflineGateway;
use crate::adapters::sql_gateway::SqlGateway;
use crate::config::toml_config::TomlConfig;
use crate::config::{CliConfig, RunMode};
use crate::core::ingest;
use crate::core::report::TABLE_CREATED;
use crate::domain::model::ProcessingResult;
use crate::domain::ports::{GatewayError, UserGateway};
use crate::utils::error::{Result, UploadError};
use crate::utils::validation::Validate;
use std::io::Write;

/// Executes one invocation of the tool, writing the user-facing report to `out`.
///
/// Returns the per-row results of an upload (empty for `--create_table`). Any
/// `Err` is fatal; the database connection, if one was opened, is released
/// before this returns.
pub async fn execute<W: Write>(config: &CliConfig, out: &mut W) -> Result<Vec<ProcessingResult>> {
    config.validate()?;

    let settings = match &config.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    settings.validate()?;

    match config.mode()? {
        RunMode::CreateTable => {
            let url = config.database_url(&settings.database)?;
            let mut gateway = SqlGateway::connect(&url).await?;
            ensure_schema(&mut gateway).await?;
            writeln!(out, "{}", TABLE_CREATED)?;
            gateway.close().await?;
            Ok(Vec::new())
        }
        RunMode::Upload { file, dry_run: true } => {
            let rows = csv_source::open(&file)?;
            tracing::info!(file = %file, "dry run, database left untouched");
            ingest::run(rows, true, &mut OfflineGateway, out).await
        }
        RunMode::Upload { file, dry_run: false } => {
            let url = config.database_url(&settings.database)?;
            let rows = csv_source::open(&file)?;
            let mut gateway = SqlGateway::connect(&url).await?;
            ensure_schema(&mut gateway).await?;
            tracing::info!(file = %file, "uploading");
            let results = ingest::run(rows, false, &mut gateway, out).await?;
            gateway.close().await?;
            Ok(results)
        }
    }
}

async fn ensure_schema<G: UserGateway + ?Sized>(gateway: &mut G) -> Result<()> {
    gateway.ensure_schema().await.map_err(|e| match e {
        GatewayError::DuplicateKey => UploadError::SchemaError {
            message: "unexpected duplicate key".to_string(),
        },
        GatewayError::Other(message) => UploadError::SchemaError { message },
    })
}

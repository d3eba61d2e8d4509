use clap::Parser;
use user_upload::utils::logger;
use user_upload::{app, CliConfig};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting user_upload");
    tracing::debug!("CLI config: {:?}", config);

    let mut stdout = std::io::stdout();
    match app::execute(&config, &mut stdout).await {
        Ok(results) => {
            tracing::info!(rows = results.len(), "user_upload finished");
        }
        Err(e) => {
            tracing::debug!(
                "Fatal error: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("Error: {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}

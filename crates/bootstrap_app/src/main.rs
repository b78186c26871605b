use std::process::ExitCode;

use bootstrap_infrastructure::{bootstrap::BootstrapRunner, settings::Settings};
use bootstrap_interface::errors::AppError;

mod logger;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", AppError::ConfigError { msg: e.to_string() });
            return ExitCode::FAILURE;
        }
    };

    logger::setup(&settings.logger.level);
    tracing::info!("Bootstrapping the '{}' environment", settings.environment);

    match BootstrapRunner::run(&settings).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

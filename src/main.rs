//! aleph-marc - fetch one Aleph record and print its bibliographic summary
//!
//! The summary is written to stdout as JSON; logs go to stderr.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aleph_marc::{config::LoggingConfig, AppConfig, AppError, Services};

#[derive(Debug, Parser)]
#[command(name = "aleph-marc", version, about)]
struct Cli {
    /// Aleph system number of the record
    identifier: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let e = AppError::from(e);
            eprintln!("{}", e);
            std::process::exit(e.code().exit_code());
        }
    };

    init_tracing(&config.logging);
    tracing::debug!("aleph-marc v{}", env!("CARGO_PKG_VERSION"));

    let services = Services::new(&config);

    match services.catalog.summary(&cli.identifier).await {
        Ok(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Getting MARC21 failed for sysid {}: {}", cli.identifier, e);
            eprintln!("{} for sysid: {}", e, cli.identifier);
            std::process::exit(e.code().exit_code());
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("aleph_marc={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

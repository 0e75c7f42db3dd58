use anyhow::Result;
use query_form::{
    Error,
    api::HttpQueryClient,
    config::{self, LogFormat},
    form::QueryForm,
    session::SessionId,
    terminal,
};
use std::sync::{Arc, Mutex};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// `RUST_LOG` takes full filter directives; the config file takes a level.
fn build_filter(rust_log: Option<&str>, configured_level: &str) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG '{}': {}", directives, e)),
        None => {
            validate_log_level(configured_level)?;
            Ok(EnvFilter::new(configured_level))
        }
    }
}

fn init_logging(filter: EnvFilter, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let mut config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Ok(url) = std::env::var("BACKEND_URL") {
        config.backend.base_url = url;
    }

    // Environment variable overrides config
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = match build_filter(rust_log.as_deref(), &config.logs.level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_logging(filter, config.logs.format);

    let client = HttpQueryClient::new(&config.backend)?;
    info!("Query form posting to {}", client.url());

    let form = QueryForm::new(Arc::new(client), SessionId::from_config(&config.session));
    let out = Arc::new(Mutex::new(std::io::stdout()));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        let stdin = BufReader::new(tokio::io::stdin());
        terminal::run_interactive(&form, stdin, out).await?;
        return Ok(());
    }

    match terminal::run_once(&form, args.join(" "), &out).await {
        Ok(()) => Ok(()),
        Err(Error::EmptyInput) => {
            eprintln!("{}", terminal::REQUIRED_NOTICE);
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

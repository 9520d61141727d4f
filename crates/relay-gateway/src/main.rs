//! line-relay: LINE to LLM bridge binary
//!
//! Usage:
//!   line-relay                   - Serve the webhook using ./config.yaml
//!   line-relay --config <path>   - Serve the webhook using another config file
//!   line-relay --help            - Show help

use std::path::PathBuf;

use relay_core::Config;
use relay_line::LineBot;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Serve the webhook, optionally with an explicit config path
    Server { config_path: Option<PathBuf> },
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args(std::env::args().skip(1))?;

    let config_path = match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("line-relay {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server { config_path } => config_path,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file so ${VAR} references in the config can use it
    dotenvy::dotenv().ok();

    let config = match &config_path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting line-relay...");
    tracing::info!("Model: {}", config.openai.model);
    tracing::info!("Completion API: {}", config.openai.base_url);

    let bot = LineBot::new(config)
        .map_err(|e| anyhow::anyhow!("Failed to create LINE bot: {}", e))?;

    bot.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    })
    .await
    .map_err(|e| anyhow::anyhow!("Webhook server error: {}", e))?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Parse command line arguments
fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<RunMode> {
    let mut config_path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a path", arg))?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            other => anyhow::bail!("Unknown argument: {} (see --help)", other),
        }
    }

    Ok(RunMode::Server { config_path })
}

/// Print help message
fn print_help() {
    println!("line-relay - LINE to LLM bridge");
    println!();
    println!("Usage:");
    println!("  line-relay                  Serve POST /callback using ./config.yaml");
    println!("  line-relay --config <path>  Use another config file (.yaml or .toml)");
    println!("  line-relay --help           Show this help message");
    println!("  line-relay --version        Show version");
    println!();
    println!("Configuration file:");
    println!("  line.channel_access_token   LINE channel access token (required)");
    println!("  line.channel_secret         LINE channel secret (required)");
    println!("  openai.base_url             Completion API base URL (required)");
    println!("  openai.api_key              Completion API key (required)");
    println!("  openai.model                Model name (required)");
    println!("  server.host / server.port   Bind address (default: 0.0.0.0:8000)");
    println!();
    println!("Values may reference environment variables as ${{VAR_NAME}}.");
    println!("Log level is controlled by RUST_LOG (default: info).");
}

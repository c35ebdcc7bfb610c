use anyhow::Result;
use clap::{Parser, Subcommand};
use paybridge_braintree::{HttpTransport, exchange_token};
use paybridge_config::{Config, LogConfig, LogFormat};
use paybridge_types::TokenizePayload;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "paybridge", about = "Braintree PayPal tokenization helper")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved configuration as JSON.
    Config,
    /// Print the Braintree script URLs in load order.
    Scripts,
    /// Exchange a Braintree PayPal payload for a backend token.
    Exchange {
        /// JSON file holding the tokenize payload (`nonce`, `type`, `details`).
        #[arg(value_name = "PAYLOAD")]
        payload: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.log);

    match cli.command {
        Commands::Config => cmd_config(&config),
        Commands::Scripts => {
            cmd_scripts(&config);
            Ok(())
        }
        Commands::Exchange { payload } => cmd_exchange(&config, &payload).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path).map_err(|e| anyhow::anyhow!("config error: {e}")),
        None => Ok(Config::default()),
    }
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log.level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn cmd_config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn cmd_scripts(config: &Config) {
    for url in config.script_set().in_load_order() {
        println!("{url}");
    }
}

async fn cmd_exchange(config: &Config, payload_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(payload_path)?;
    let payload: TokenizePayload = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid payload '{}': {e}", payload_path.display()))?;

    let transport = HttpTransport::new(rquest::Client::new(), &config.api);
    let token = exchange_token(&transport, &payload)
        .await
        .map_err(|e| anyhow::anyhow!("token exchange failed: {e}"))?;

    tracing::info!(token = %token.id, "backend token issued");
    println!("{}", serde_json::to_string_pretty(&token)?);
    Ok(())
}

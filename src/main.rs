//! diagnosis-api entry point
//!
//! Usage:
//!   diagnosis-api                      # serve (default)
//!   diagnosis-api --bind 0.0.0.0:8080 serve
//!   diagnosis-api check
//!   diagnosis-api diagnose ed --input answers.json

use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diagnosis_api::{
    Engines,
    config::Config,
    http::{DiagnosisResponse, start_http_server},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "diagnosis-api")]
#[command(about = "ED/PE symptom classifier over HTTP", long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the HTTP bind address
    #[arg(long, global = true)]
    bind: Option<SocketAddr>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Build both engines and report their tables
    Check,
    /// Diagnose one JSON answer set from a file or stdin
    Diagnose {
        /// Engine to run: "ed" or "pe"
        engine: String,
        /// JSON file with the answers; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .with_ansi(config.logging.ansi)
        .with_writer(std::io::stderr)
        .init();

    // table integrity is fatal at startup
    let engines = Engines::standard().context("diagnosis tables failed integrity check")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config, engines).await,
        Commands::Check => check(&engines),
        Commands::Diagnose { engine, input } => diagnose(&engines, &engine, input),
    }
}

async fn serve(config: &Config, engines: Engines) -> Result<()> {
    info!(
        "Engines ready: {}",
        engines
            .iter()
            .map(|e| e.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    start_http_server(config, Arc::new(engines)).await?;
    Ok(())
}

fn check(engines: &Engines) -> Result<()> {
    for engine in engines.iter() {
        println!(
            "✅ {} ({}): {} fields, {} conditions",
            engine.label(),
            engine.kind(),
            engine.required_fields().len(),
            engine.condition_names().count()
        );
    }
    Ok(())
}

fn diagnose(engines: &Engines, name: &str, input: Option<PathBuf>) -> Result<()> {
    let body = match input {
        Some(path) => std::fs::read(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let outcome = engines
        .by_name(name)
        .and_then(|engine| engine.diagnose_json(&body));

    match outcome {
        Ok(result) => {
            let response = DiagnosisResponse::from(result);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&err.to_body())?);
            Err(anyhow::Error::new(err).context("diagnosis failed"))
        }
    }
}

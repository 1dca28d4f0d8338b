use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use extractor_cli::cmd;
use extractor_cli::Config;

#[derive(Parser)]
#[command(name = "extractor")]
#[command(about = "Submit scanned permit PDFs to the document extractor service")]
#[command(version)]
struct Cli {
    /// Extraction service URL (overrides EXTRACTOR_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the service is reachable
    Health {
        /// Keep probing every N seconds until interrupted
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        watch: Option<u64>,
    },

    /// List supported document types
    Types,

    /// Extract fields from PDF files
    Extract(cmd::extract::ExtractArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let default_filter = if cli.verbose {
        "info,extractor_client=debug,extraction_results=debug,extractor_cli=debug"
    } else {
        "warn,extractor_cli=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.url {
        config.extractor_url = url;
    }
    tracing::debug!(url = %config.extractor_url, "Configuration loaded");

    let client = config.client();
    match cli.command {
        Commands::Health { watch } => {
            cmd::health::run(&client, watch.map(Duration::from_secs)).await
        }
        Commands::Types => cmd::types::run(&client).await,
        Commands::Extract(args) => {
            let export_dir = args.out_dir.clone().unwrap_or(config.export_dir);
            cmd::extract::run(client, &args, &export_dir).await.map(|_| ())
        }
    }
}

//! Speechstats CLI
//!
//! ```bash
//! speechstats serve                           # Start HTTP server (port 8081)
//! speechstats evaluate a.csv-url b.csv-url    # Evaluate sources once, print JSON
//! ```

use clap::{Parser, Subcommand};
use speechstats::{
    evaluate_params, logging::init_logger, server::start_server, LogFormat, ServerConfig,
    SourceFetcher,
};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "speechstats")]
#[command(about = "Evaluate speech statistics from CSV files", long_about = None)]
struct Cli {
    /// Log output format (overrides SPEECHSTATS_LOG_FORMAT)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Address to bind (overrides SPEECHSTATS_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides SPEECHSTATS_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Per-source fetch timeout in seconds, 0 for none
        #[arg(long)]
        fetch_timeout: Option<u64>,
    },

    /// Evaluate CSV sources once and print the result
    Evaluate {
        /// Source URLs, passed on as url1, url2, ... in this order
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print counters and diagnostics along with the result
        #[arg(long)]
        report: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    init_logger(config.log_format);

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            fetch_timeout,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(secs) = fetch_timeout {
                config.fetch_timeout = (secs > 0).then(|| Duration::from_secs(secs));
            }
            cmd_serve(&config).await
        }

        Commands::Evaluate { urls, report } => cmd_evaluate(&config, urls, report).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    start_server(config).await?;
    Ok(())
}

async fn cmd_evaluate(
    config: &ServerConfig,
    urls: Vec<String>,
    full_report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = SourceFetcher::with_timeout(config.fetch_timeout)?;

    let params: Vec<(String, String)> = urls
        .into_iter()
        .enumerate()
        .map(|(i, url)| (format!("url{}", i + 1), url))
        .collect();

    let report = evaluate_params(&params, &fetcher).await;

    let json = if full_report {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.evaluation)?
    };
    println!("{}", json);

    Ok(())
}

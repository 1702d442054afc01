use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use charterlead::api::AppState;
use charterlead::config::{CharterConfig, LoggingConfig};
use charterlead::console::Console;
use charterlead::quotes::quote_source_from_config;
use charterlead::submission::submitter_from_config;
use charterlead::{
    AircraftClass, AirportResolver, HttpAirportDirectory, WizardSession, estimator, web,
};

#[derive(Parser)]
#[command(name = "charterlead", version, about = "Private jet charter lead funnel")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, env = "CHARTERLEAD_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Look up ranked airport suggestions
    Search { query: String },
    /// Estimate the flight time between two locations
    Estimate {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "light")]
        class: AircraftClass,
    },
    /// Run the booking wizard in the terminal
    Wizard,
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // logs go to stderr so `search` and `estimate` output stays clean
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolver(config: &CharterConfig) -> Result<AirportResolver> {
    let directory = HttpAirportDirectory::new(&config.lookup)?;
    Ok(AirportResolver::new(Arc::new(directory)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // estimate is offline and needs no configuration
    if let Command::Estimate { from, to, class } = &cli.command {
        let estimate = estimator::estimate_detailed(Some(from.as_str()), Some(to.as_str()), *class);
        println!("{}", estimate.duration);
        return Ok(());
    }

    let mut config =
        CharterConfig::load_from_path(cli.config.clone()).context("Failed to load configuration")?;
    init_tracing(&config.logging, cli.verbose);

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState {
                resolver: resolver(&config)?,
                quote_source: quote_source_from_config(&config.quotes)?,
                submitter: submitter_from_config(&config.submission)?,
            };
            info!("Starting charterlead {}", charterlead::VERSION);
            web::run(&config.server, state).await?;
        }
        Command::Search { query } => {
            let suggestions = resolver(&config)?.suggest(&query).await;
            if suggestions.is_empty() {
                println!("No airports found for '{query}'");
            }
            for (i, airport) in suggestions.iter().enumerate() {
                println!("{:>2}. {}", i + 1, airport.summary());
            }
        }
        Command::Wizard => {
            let mut session = WizardSession::new(
                config.wizard.variant,
                resolver(&config)?,
                quote_source_from_config(&config.quotes)?,
                submitter_from_config(&config.submission)?,
            );
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut console = Console::new(stdin, tokio::io::stdout());
            console.run(&mut session).await?;
        }
        Command::Estimate { .. } => {}
    }

    Ok(())
}

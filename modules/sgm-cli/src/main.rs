//! Command-line access to the SGM analysis API.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gdelt_client::GdeltClient;
use sgm_data::{CountryQuery, EventQuery, SgmDataService};

mod config;
use config::Config;

#[derive(Parser)]
#[command(name = "sgm")]
#[command(about = "Query Supremacism Global Metric data from the analysis API")]
#[command(version)]
struct Cli {
    /// Base URL of the analysis API (overrides SGM_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// SGM metrics for all countries
    Countries {
        /// Maximum number of countries to return
        #[arg(short, long)]
        limit: Option<u32>,

        /// Leave out descriptions and event statistics
        #[arg(long)]
        no_details: bool,
    },

    /// SGM metrics for one country
    Country {
        /// ISO country code, e.g. US
        code: String,
    },

    /// Regional SGM summaries
    Regions,

    /// Submit a new GDELT analysis run
    Analyze,

    /// Status of a submitted analysis run
    Status { job_id: String },

    /// GDELT event aggregates
    Events {
        /// Days of history to include
        #[arg(short, long)]
        days: Option<u32>,

        /// Maximum number of events to return
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// NLP analysis results
    Nlp,

    /// Check that the API is reachable
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sgm=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?.with_api_url(cli.api_url);
    config.log_redacted();

    let client = GdeltClient::new(&config.api_url, config.api_timeout)
        .context("Failed to build HTTP client")?;
    let service = SgmDataService::new(client);

    match cli.command {
        Commands::Countries { limit, no_details } => {
            let query = CountryQuery {
                limit,
                include_details: no_details.then_some(false),
            };
            let countries = service
                .get_supremacism_data_with(&query)
                .await
                .context("Failed to fetch country data")?;
            info!(count = countries.len(), "Fetched countries");
            print_json(&countries)
        }
        Commands::Country { code } => {
            let metric = service
                .get_country_analysis(&code)
                .await
                .with_context(|| format!("Failed to fetch country {code}"))?;
            print_json(&metric)
        }
        Commands::Regions => {
            let regions = service
                .get_regional_summary()
                .await
                .context("Failed to fetch regional summary")?;
            print_json(&regions)
        }
        Commands::Analyze => {
            let job = service
                .trigger_gdelt_analysis()
                .await
                .context("Failed to trigger analysis")?;
            info!(job_id = %job.job_id, status = %job.status, "Analysis submitted");
            print_json(&job)
        }
        Commands::Status { job_id } => {
            let status = service
                .get_analysis_status(&job_id)
                .await
                .with_context(|| format!("Failed to fetch status of job {job_id}"))?;
            print_json(&status)
        }
        Commands::Events { days, limit } => {
            let events = service
                .get_event_data_with(&EventQuery { days, limit })
                .await
                .context("Failed to fetch event data")?;
            info!(count = events.len(), "Fetched events");
            print_json(&events)
        }
        Commands::Nlp => {
            let results = service
                .get_nlp_analysis()
                .await
                .context("Failed to fetch NLP analysis")?;
            print_json(&results)
        }
        Commands::Health => {
            let health = service
                .source()
                .health()
                .await
                .context("Analysis API is not reachable")?;
            print_json(&health)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

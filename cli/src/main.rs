//! CLI entrypoint for aqi-herald
//!
//! This is the single-shot binary that wires together all layers using
//! dependency injection: scrape AQI readings, summarize them, post the
//! summary to the configured channel.

use anyhow::{Context, Result};
use clap::Parser;
use herald_application::{
    AggregateReadingsUseCase, ComposeReportUseCase, PublishPolicy, RunReportInput,
    RunReportUseCase,
};
use herald_infrastructure::{
    AqicnSource, ConfigLoader, McpClient, OpenAiSummarizer, SlackToolPublisher,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aqi-herald", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip config files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Fetch and compose the report but print it instead of posting
    #[arg(long)]
    dry_run: bool,

    /// Treat a publish failure as a run failure (non-zero exit)
    #[arg(long)]
    strict_publish: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting aqi-herald");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let cities = config.normalized_cities();

    // === Dependency Injection ===
    let source = Arc::new(AqicnSource::new(&config.scrape.base_url));
    let summarizer = Arc::new(OpenAiSummarizer::with_base_url(
        &config.openai.api_key,
        &config.openai.model,
        &config.openai.base_url,
    ));

    if cli.dry_run {
        println!("Fetching air quality data for {} cities...", cities.len());
        let report = AggregateReadingsUseCase::new(source).execute(&cities).await;
        let summary = ComposeReportUseCase::new(summarizer).execute(&report).await;
        println!("\n{}", summary);
        return Ok(());
    }

    // Acquire the tool-server session up front; a failure here is the one
    // fault without a fallback and aborts the run. The child process is
    // killed when the last Arc drops, on every exit path.
    let server_envs: HashMap<String, String> = HashMap::from([
        ("SLACK_BOT_TOKEN".to_string(), config.slack.bot_token.clone()),
        ("SLACK_TEAM_ID".to_string(), config.slack.team_id.clone()),
    ]);
    let client = Arc::new(
        McpClient::spawn(
            &config.tool_server.command,
            &config.tool_server.args,
            &server_envs,
        )
        .await
        .context("Failed to spawn tool server")?,
    );
    client
        .initialize("aqi-herald", env!("CARGO_PKG_VERSION"))
        .await
        .context("Tool server handshake failed")?;

    match client.list_tools().await {
        Ok(tools) => {
            let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
            println!("Connected to tool server with tools: {}", names.join(", "));
        }
        Err(e) => warn!("Could not list tools: {}", e),
    }

    let publisher = Arc::new(SlackToolPublisher::new(Arc::clone(&client)));
    let use_case = RunReportUseCase::new(source, summarizer, publisher);

    let policy = if cli.strict_publish {
        PublishPolicy::Strict
    } else {
        PublishPolicy::BestEffort
    };
    let input =
        RunReportInput::new(cities, config.slack.channel_id.clone()).with_policy(policy);

    println!("Fetching air quality data for {} cities...", input.cities.len());
    let outcome = use_case.execute(input).await?;

    println!("\n{}", outcome.summary);
    if outcome.published {
        println!(
            "\nReport ({} cities) posted to channel {}.",
            outcome.cities_reported, config.slack.channel_id
        );
    } else {
        println!("\nReport was not posted; see logs for details.");
    }

    Ok(())
}

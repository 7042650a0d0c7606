//! showtimes - Finnkino showtimes with OMDb plot and cast.

/// Application configuration (TOML).
mod config;
/// Schedule, dedupe, enrichment and rendering pipeline.
mod listing;
/// Terminal UI components.
mod tui;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, OMDB_API_KEY_ENV, resolve_config_path};
use crate::listing::{Controller, HtmlDocument, Selection, run_batch};
use crate::tui::run_browser;
use showtimes_api::finnkino::{FinnkinoApi, FinnkinoClient, TheatreArea, parse_schedule_date};
use showtimes_api::omdb::OmdbClient;

/// User-Agent sent to both APIs.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List theater areas.
    Areas(AreasArgs),
    /// Render the movies of one area as an HTML page.
    Shows(ShowsArgs),
    /// Browse areas and movies interactively via TUI.
    Browse(BrowseArgs),
}

/// Arguments for the `areas` subcommand.
#[derive(clap::Args)]
struct AreasArgs {
    /// Save this area ID as the default for `shows`.
    #[arg(long)]
    set_default: Option<String>,
}

/// Arguments for the `shows` subcommand.
#[derive(clap::Args)]
struct ShowsArgs {
    /// Theater area ID (e.g. "1016"). Falls back to `areas.default` in config if omitted.
    #[arg(long)]
    area: Option<String>,

    /// Schedule date, YYYY-MM-DD (default: today).
    #[arg(long, value_parser = parse_schedule_date)]
    date: Option<NaiveDate>,

    /// Write the page to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Open the written page in the default browser.
    #[arg(long, requires = "output")]
    open: bool,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Schedule date, YYYY-MM-DD (default: today).
    #[arg(long, value_parser = parse_schedule_date)]
    date: Option<NaiveDate>,
}

/// Loads the config file, returning its path too.
fn load_config(dir: Option<&PathBuf>) -> Result<(PathBuf, AppConfig)> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok((config_path, config))
}

/// Parses a configured base URL.
fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid base URL: {raw}"))
}

/// Builds the Finnkino client with the configured base URL.
fn build_finnkino_client(config: &AppConfig) -> Result<FinnkinoClient> {
    let mut builder = FinnkinoClient::builder().user_agent(USER_AGENT);
    if let Some(raw) = &config.finnkino.base_url {
        builder = builder.base_url(parse_base_url(raw)?);
    }
    builder.build().context("failed to build Finnkino API client")
}

/// Builds the OMDb client.
///
/// `OMDB_API_KEY` takes precedence over `omdb.api_key`.
fn build_omdb_client(config: &AppConfig) -> Result<OmdbClient> {
    let api_key = config.resolve_api_key(std::env::var(OMDB_API_KEY_ENV).ok())?;
    let mut builder = OmdbClient::builder().api_key(api_key).user_agent(USER_AGENT);
    if let Some(raw) = &config.omdb.base_url {
        builder = builder.base_url(parse_base_url(raw)?);
    }
    builder.build().context("failed to build OMDb API client")
}

/// Fetches the theater areas.
async fn fetch_areas(client: &FinnkinoClient) -> Result<Vec<TheatreArea>> {
    client
        .theatre_areas()
        .await
        .context("failed to fetch theater areas")
}

/// Runs the `areas` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails, the default area is unknown,
/// or the config cannot be saved.
#[instrument(skip_all)]
async fn run_areas(args: &AreasArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (config_path, mut config) = load_config(dir)?;
    let client = build_finnkino_client(&config)?;
    let areas = fetch_areas(&client).await?;

    tracing::info!("ID\tName");
    for area in &areas {
        tracing::info!("{}\t{}", area.id, area.name);
    }
    tracing::info!("Total: {} areas", areas.len());

    if let Some(id) = &args.set_default {
        if *id == config.finnkino.placeholder_area {
            bail!("area {id} is the placeholder entry and has no schedule");
        }
        if !areas.iter().any(|a| a.id == *id) {
            bail!("unknown area ID: {id}");
        }
        config.areas.default = Some(id.clone());
        config.save(&config_path).context("failed to save config")?;
        tracing::info!("Saved default area {} to {}", id, config_path.display());
    }

    Ok(())
}

/// Runs the `shows` subcommand.
///
/// Runs one batch to completion and writes the page.
///
/// # Errors
///
/// Returns an error if no area is given, a client cannot be built, the
/// area listing fails, or the page cannot be written.
#[instrument(skip_all)]
async fn run_shows(args: &ShowsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let area = args
        .area
        .clone()
        .or_else(|| config.areas.default.clone())
        .context("no area given: pass --area or set areas.default in config")?;

    let finnkino = build_finnkino_client(&config)?;
    let omdb = build_omdb_client(&config)?;
    let areas = fetch_areas(&finnkino).await?;

    let mut doc = HtmlDocument::new();
    let mut controller = Controller::new(config.finnkino.placeholder_area.as_str());
    controller.areas_loaded(&mut doc, &areas);

    if let Selection::Fetch(batch) = controller.select(&mut doc, &area) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_batch(&finnkino, &omdb, batch, args.date, tx).await;
        while let Some(event) = rx.recv().await {
            controller.apply(&mut doc, event);
        }
    }
    tracing::info!("Rendered {} movie(s) for area {}", doc.movie_count(), area);

    let page = doc.render_page(Local::now());
    if let Some(path) = &args.output {
        std::fs::write(path, page).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
        if args.open {
            open::that(path).with_context(|| format!("failed to open {}", path.display()))?;
        }
    } else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(page.as_bytes())
            .context("failed to write page to stdout")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if a client cannot be built, the area listing fails,
/// or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let finnkino = build_finnkino_client(&config)?;
    let omdb = build_omdb_client(&config)?;

    tracing::info!("Fetching theater areas...");
    let areas = fetch_areas(&finnkino).await?;
    tracing::info!("Loaded {} areas. Launching TUI...", areas.len());

    run_browser(
        &finnkino,
        &omdb,
        &areas,
        &config.finnkino.placeholder_area,
        args.date,
    )
    .await
    .context("browser TUI failed")
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so `shows` can write the page to stdout.
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Areas(args) => run_areas(&args, cli.dir.as_ref()).await,
        Commands::Shows(args) => run_shows(&args, cli.dir.as_ref()).await,
        Commands::Browse(args) => run_browse(&args, cli.dir.as_ref()).await,
    }
}

//! showcat - TVmaze show catalog browser.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::MakeWriterExt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use showcat_api::tvmaze::{Catalog, FetchOutcome, TvMazeClient, fetch_details, fetch_shows};
use showcat_catalog::{CatalogView, PageWindow, QueryState, RatingFloor, parse_genre_filter};

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
    /// List one page of the filtered show catalog.
    Shows(ShowsArgs),
    /// Show seasons, cast, and crew of a show.
    Details(DetailsArgs),
    /// Browse the catalog interactively via TUI.
    Browse(BrowseArgs),
    /// Write the default config file.
    Init(InitArgs),
}

/// Arguments for the `shows` subcommand.
#[derive(clap::Args)]
struct ShowsArgs {
    /// Case-insensitive name search (e.g. "break").
    #[arg(long, default_value = "")]
    search: String,

    /// Exact genre label (e.g. "Drama"); "any" disables the filter.
    #[arg(long)]
    genre: Option<String>,

    /// Minimum rating in tenths (e.g. "70" for 7.0); "any" disables the filter.
    #[arg(long)]
    rating: Option<String>,

    /// Page number (1-indexed, clamped to the available pages).
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Maximum index pages to fetch (0 = until exhausted). Overrides config.
    #[arg(long)]
    max_pages: Option<u32>,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TVmaze show ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Maximum index pages to fetch (0 = until exhausted). Overrides config.
    #[arg(long)]
    max_pages: Option<u32>,
}

/// Arguments for the `init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Loads the config file, falling back to defaults when missing.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TvMazeClient` from the `[api]` config section.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_client(config: &AppConfig) -> Result<TvMazeClient> {
    let mut builder = TvMazeClient::builder()
        .base_url(config.api.base_url()?)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .min_interval(config.api.min_interval());
    if let Some(timeout) = config.api.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build TVmaze client")
}

/// Fetches the show catalog and reports failed pages.
async fn load_catalog(
    client: &TvMazeClient,
    config: &AppConfig,
    max_pages: Option<u32>,
) -> Catalog {
    let options = config.catalog.fetch_options(max_pages);
    let catalog = fetch_shows(client, &options).await;
    if catalog.is_partial() {
        let pages: Vec<String> = catalog
            .failed_pages
            .iter()
            .map(|f| f.page.to_string())
            .collect();
        tracing::warn!(
            "Catalog is partial: index page(s) {} failed to load",
            pages.join(", ")
        );
    }
    catalog
}

/// Runs the `shows` subcommand.
///
/// # Errors
///
/// Returns an error if the filter arguments are invalid or the client fails
/// to build.
#[instrument(skip_all)]
async fn run_shows(args: &ShowsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let rating = match args.rating.as_deref() {
        Some(value) => RatingFloor::parse_filter(value)?,
        None => None,
    };
    let genre = args.genre.as_deref().and_then(parse_genre_filter);

    let config = load_config(dir)?;
    let client = build_client(&config)?;
    let catalog = load_catalog(&client, &config, args.max_pages).await;

    let query = QueryState {
        search: args.search.clone(),
        genre,
        rating,
        page: args.page,
    };
    let view = CatalogView::with_query(catalog, query);

    tracing::info!("ID\tRating\tPremiered\tGenres\t\t\tName");
    for show in view.visible() {
        tracing::info!(
            "{}\t{}\t{}\t{}\t\t{}",
            show.id,
            show.rating
                .map_or_else(|| String::from("-"), |r| format!("{r:.1}")),
            show.premiered.as_deref().unwrap_or("-"),
            show.genres.join(","),
            show.name,
        );
    }
    tracing::info!(
        "Page {}/{} ({} of {} shows)  {}",
        view.current_page(),
        view.total_pages(),
        view.filtered_count(),
        view.catalog().shows.len(),
        fmt_page_links(&view.window(), view.current_page()),
    );

    Ok(())
}

/// Formats the pagination window as plain text, e.g. `< 1 ... 4 [5] 6 ... 20 >`.
fn fmt_page_links(window: &PageWindow, current: u32) -> String {
    if window.is_empty() {
        return String::new();
    }
    let mut parts = Vec::new();
    if window.has_prev {
        parts.push(String::from("<"));
    }
    if let Some(first) = window.first {
        parts.push(first.page.to_string());
        if first.ellipsis {
            parts.push(String::from("..."));
        }
    }
    parts.extend(window.pages().map(|page| {
        if page == current {
            format!("[{page}]")
        } else {
            page.to_string()
        }
    }));
    if let Some(last) = window.last {
        if last.ellipsis {
            parts.push(String::from("..."));
        }
        parts.push(last.page.to_string());
    }
    if window.has_next {
        parts.push(String::from(">"));
    }
    parts.join(" ")
}

/// Logs one detail section, marking it when the fetch failed.
fn log_section<T>(heading: &str, outcome: &FetchOutcome<T>, fmt_item: impl Fn(&T) -> String) {
    match outcome {
        FetchOutcome::Loaded(items) => {
            tracing::info!("{heading} ({}):", items.len());
            for item in items {
                tracing::info!("  {}", fmt_item(item));
            }
        }
        FetchOutcome::Failed(failure) => {
            tracing::warn!("{heading}: unavailable ({failure})");
        }
    }
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_client(&config)?;

    let details = fetch_details(&client, args.id).await;

    tracing::info!("Show ID: {}", details.show_id);
    log_section("Seasons", &details.seasons, |season| {
        format!(
            "Season {}: {} episodes ({} ~ {})",
            season.number,
            season
                .episode_order
                .map_or_else(|| String::from("-"), |n| n.to_string()),
            season.premiere_date.as_deref().unwrap_or("-"),
            season.end_date.as_deref().unwrap_or("-"),
        )
    });
    log_section("Cast", &details.cast, |member| {
        format!("{} as {}", member.person.name, member.character)
    });
    log_section("Crew", &details.crew, |member| {
        format!("{}: {}", member.kind, member.person.name)
    });

    Ok(())
}

/// Loads the catalog and launches the browser TUI.
///
/// # Errors
///
/// Returns an error if config, client, or TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let ratings = config.filters.rating_floors()?;
    let client = build_client(&config)?;
    let catalog = load_catalog(&client, &config, args.max_pages).await;

    if catalog.shows.is_empty() {
        bail!("no shows could be loaded from {}", config.api.base_url);
    }

    tracing::info!("Loaded {} shows. Launching TUI...", catalog.shows.len());

    crate::tui::run_browser(&client, catalog, config.filters.genres.clone(), ratings)
        .await
        .context("browser TUI failed")
}

/// Runs the `init` subcommand.
///
/// # Errors
///
/// Returns an error if the config file exists (without `--force`) or cannot
/// be written.
fn run_init(args: &InitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    AppConfig::default()
        .save(&config_path)
        .context("failed to save config")?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Console log filter; silent while the TUI owns the terminal.
fn console_enabled(_metadata: &tracing::Metadata<'_>) -> bool {
    tui::console_available()
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(io::stdout.with_filter(console_enabled))
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stdout.with_filter(console_enabled));

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
        Commands::Shows(args) => run_shows(&args, cli.dir.as_ref()).await,
        Commands::Details(args) => run_details(&args, cli.dir.as_ref()).await,
        Commands::Browse(args) => run_browse(&args, cli.dir.as_ref()).await,
        Commands::Init(args) => run_init(&args, cli.dir.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use showcat_catalog::page_window;

    use super::*;

    #[test]
    fn test_fmt_page_links_middle() {
        // Arrange & Act
        let links = fmt_page_links(&page_window(10, 20), 10);

        // Assert
        assert_eq!(links, "< 1 ... 8 9 [10] 11 12 ... 20 >");
    }

    #[test]
    fn test_fmt_page_links_first_page() {
        // Arrange & Act
        let links = fmt_page_links(&page_window(1, 2), 1);

        // Assert
        assert_eq!(links, "[1] 2 >");
    }

    #[test]
    fn test_fmt_page_links_no_pages() {
        // Arrange & Act & Assert
        assert_eq!(fmt_page_links(&page_window(1, 0), 1), "");
    }
}

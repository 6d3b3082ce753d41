//! repocards CLI
//!
//! Web server runner and one-off analysis tool.

use anyhow::Result;
use clap::{Parser, Subcommand};
use repocards_analyzer::{
    compute_aggregates, compute_coverage, compute_engineering, compute_maturity, MaturityParams,
};
use repocards_api::{create_router, AppConfig, AppState};
use repocards_collector::{
    github::GithubClient, normalize::normalize_repos, CollectorConfig, RepoSource,
};
use repocards_store::{Kv, MemoryKv, RedisRestKv};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "repocards")]
#[command(about = "repocards - GitHub profile stats cards")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },

    /// Fetch and score a user once, printing the reports
    Analyze {
        /// GitHub username
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Serve { bind } => serve(bind).await?,
        Commands::Analyze { username } => analyze(&username).await?,
    }

    Ok(())
}

/// Redis-backed when the REST credentials are present, otherwise a
/// process-local store that loses all coordination state on restart.
fn open_kv() -> Result<Arc<dyn Kv>> {
    match (
        std::env::var("REDIS_REST_URL"),
        std::env::var("REDIS_REST_TOKEN"),
    ) {
        (Ok(url), Ok(token)) => {
            info!("using Redis REST store at {}", url);
            Ok(Arc::new(RedisRestKv::new(url, &token)?))
        }
        _ => {
            warn!("REDIS_REST_URL/REDIS_REST_TOKEN not set, using in-memory store");
            Ok(Arc::new(MemoryKv::new()))
        }
    }
}

async fn serve(bind: SocketAddr) -> Result<()> {
    let config = AppConfig::from_env();
    let collector_config = CollectorConfig::default();
    if collector_config.github_token.is_none() {
        warn!("GITHUB_TOKEN not set, upstream API rate limits will be restricted");
    }

    let kv = open_kv()?;
    let source = Arc::new(GithubClient::new(collector_config)?);
    let state = Arc::new(AppState::new(config, kv, source));
    let router = create_router(state);

    info!("Starting repocards server on {}", bind);
    info!("Cards available at http://{}/stats", bind);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn analyze(username: &str) -> Result<()> {
    let config = CollectorConfig::default();
    if config.github_token.is_none() {
        eprintln!("Warning: GITHUB_TOKEN not set. API rate limits will be restricted.");
    }

    let client = GithubClient::new(config)?;

    println!("Fetching repositories for {}...", username);
    let listing = client.list_repos(username).await?;
    let repos = normalize_repos(listing.repos, chrono::Utc::now());

    let aggregates = compute_aggregates(&repos);
    let engineering = compute_engineering(&repos);
    let maturity = compute_maturity(&repos, &MaturityParams::default());
    let coverage = compute_coverage(&repos);

    println!();
    println!("User: {}", username);
    println!(
        "Repos: {} (⭐{} 🍴{}, {} archived, {} forks)",
        repos.len(),
        aggregates.stars_total,
        aggregates.forks_total,
        aggregates.archived_count,
        aggregates.forked_count
    );

    if !aggregates.languages.is_empty() {
        let langs = aggregates
            .languages
            .iter()
            .map(|l| format!("{} {:.0}%", l.name, l.share * 100.0))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Languages: {}", langs);
    }

    println!();
    println!(
        "Engineering: {} (Velocity: {}, Impact: {}, Breadth: {}, Hygiene: {})",
        engineering.score,
        engineering.dimensions.velocity,
        engineering.dimensions.impact,
        engineering.dimensions.breadth,
        engineering.dimensions.hygiene
    );
    println!(
        "Maturity:    {} (Docs: {}, Maintenance: {}, Repo hygiene: {})",
        maturity.score,
        maturity.subscores.docs,
        maturity.subscores.maintenance,
        maturity.subscores.repo_hygiene
    );
    println!(
        "Coverage:    sampled {}%, recently active {}%",
        coverage.repos_sampled_pct, coverage.recently_active_pct
    );
    println!();
    println!("GitHub API calls: {}", listing.meta.calls);

    Ok(())
}

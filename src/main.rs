use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobfinder::config::{Command, Config};
use jobfinder::db;
use jobfinder::models::job::JobListing;
use jobfinder::routes::{self, AppState, search::SearchResponse};
use jobfinder::scrapers::ScraperRegistry;
use jobfinder::scrapers::fetch::HttpFetcher;
use jobfinder::scrapers::search::{JobSearch, SearchOptions};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jobfinder=info,tower_http=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_json);

    let pool = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let pool = db::create_pool(url).await?;
            if config.run_migrations {
                tracing::info!("Running database migrations...");
                db::run_migrations(&pool).await?;
                tracing::info!("Migrations complete");
            }
            Some(pool)
        }
        None => {
            tracing::info!("No DATABASE_URL set, results will not be saved");
            None
        }
    };

    let search = Arc::new(JobSearch::new(
        ScraperRegistry::with_default_sites(),
        Arc::new(HttpFetcher::new()?),
        SearchOptions::from(&config),
    ));

    match config.resolved_command() {
        Command::Serve { listen_addr } => {
            let app = routes::router(AppState { search, pool });

            let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
            tracing::info!("Listening on {listen_addr}");
            axum::serve(listener, app).await?;
        }
        Command::Search(args) => {
            let query = args.into_query();
            query.validate().map_err(anyhow::Error::msg)?;

            let jobs = search.search_jobs(&query).await;
            if let Some(pool) = &pool {
                JobListing::save_all(pool, &jobs).await;
            }

            let response = SearchResponse::from(jobs);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

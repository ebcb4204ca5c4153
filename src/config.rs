use clap::Parser;

use crate::models::query::{JobSearchQuery, Source};

#[derive(Parser, Debug, Clone)]
#[command(name = "jobfinder", about = "Job search across LinkedIn, Indeed and Welcome to the Jungle")]
pub struct Config {
    /// Database connection URL; results are not persisted when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Run database migrations on startup
    #[arg(long, env = "RUN_MIGRATIONS", default_value = "true")]
    pub run_migrations: bool,

    /// Detail pages fetched per source
    #[arg(long, env = "DETAIL_LIMIT", default_value = "20")]
    pub detail_limit: usize,

    /// Concurrent detail fetches within a source
    #[arg(long, env = "DETAIL_CONCURRENCY", default_value = "10")]
    pub detail_concurrency: usize,

    /// Pause between sources, in milliseconds
    #[arg(long, env = "SOURCE_DELAY_MS", default_value = "2000")]
    pub source_delay_ms: u64,

    /// Timeout for search-results pages, in seconds
    #[arg(long, env = "SEARCH_TIMEOUT_SECS", default_value = "15")]
    pub search_timeout_secs: u64,

    /// Timeout for job detail pages, in seconds
    #[arg(long, env = "DETAIL_TIMEOUT_SECS", default_value = "10")]
    pub detail_timeout_secs: u64,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web server (default when no subcommand given)
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen_addr: String,
    },
    /// Run a single search and print the results as JSON
    Search(SearchArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct SearchArgs {
    /// Job board to search; repeat for several (default: all)
    #[arg(long = "source")]
    pub sources: Vec<Source>,

    /// Role to search for
    #[arg(long)]
    pub poste: String,

    /// Technology keyword appended to the search; repeatable
    #[arg(long = "tech")]
    pub technologies: Vec<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Drop results mentioning this term; repeatable
    #[arg(long = "exclude")]
    pub exclude_terms: Vec<String>,

    #[arg(long)]
    pub remote_only: bool,
}

impl SearchArgs {
    pub fn into_query(self) -> JobSearchQuery {
        let sources = if self.sources.is_empty() {
            Source::all().to_vec()
        } else {
            self.sources
        };
        JobSearchQuery {
            sources,
            poste: self.poste,
            technologies: self.technologies,
            location: self.location,
            exclude_terms: self.exclude_terms,
            remote_only: self.remote_only,
        }
    }
}

impl Config {
    /// Resolve the command, defaulting to Serve if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }
}

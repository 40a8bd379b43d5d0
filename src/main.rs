// src/main.rs

//! wordcrawl CLI
//!
//! Local execution entry point: loads the TOML configuration, runs the
//! profiled crawl, and writes the result and profile reports.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use wordcrawl::{
    error::Result,
    models::Config,
    pipeline,
    profiler::Profiler,
    storage,
};

/// wordcrawl - Parallel popular-word crawler
#[derive(Parser, Debug)]
#[command(
    name = "wordcrawl",
    version,
    about = "Bounded parallel web crawler that reports the most popular words"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl from the configured (or given) seed URLs
    Crawl {
        /// Seed URLs overriding [crawl].start_pages
        seeds: Vec<String>,

        /// Result path overriding [output].result_path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl { seeds, output } => {
            if let Some(path) = output {
                config.output.result_path = path;
            }
            let config = Arc::new(config);
            let seeds = if seeds.is_empty() {
                config.crawl.start_pages.clone()
            } else {
                seeds
            };

            let profiler = Profiler::new();
            let result = pipeline::run_crawl(&config, &profiler, &seeds).await?;

            storage::write_result(&result, &config.output.result_path).await?;
            storage::write_profile(&profiler.report(), &config.output.profile_path).await?;

            if !config.output.result_path.is_empty() {
                log::info!("Result written to {}", config.output.result_path);
            }
        }
        Command::Validate => {
            config.validate()?;
            log::info!("Configuration is valid");
            log::info!("  timeout: {}s", config.crawl.timeout_secs);
            log::info!("  max depth: {}", config.crawl.max_depth);
            log::info!("  popular words: {}", config.crawl.popular_word_count);
            log::info!("  thread count: {}", config.crawl.thread_count);
            log::info!("  seeds: {}", config.crawl.start_pages.len());
            log::info!("  ignored urls: {}", config.crawl.ignored_urls.len());
        }
    }

    Ok(())
}

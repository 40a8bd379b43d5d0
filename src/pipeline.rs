// src/pipeline.rs

//! Crawl pipeline entry point.

use std::sync::Arc;

use crate::crawl::CrawlEngine;
use crate::error::Result;
use crate::models::{Config, CrawlResult};
use crate::parser::HtmlParser;
use crate::profiler::Profiler;

/// Run one profiled crawl over the configured (or overridden) seeds.
///
/// Configuration problems surface here, before any task launches; the crawl
/// itself always produces a result.
pub async fn run_crawl(
    config: &Arc<Config>,
    profiler: &Profiler,
    seeds: &[String],
) -> Result<CrawlResult> {
    let parser = Arc::new(HtmlParser::new(&config.fetch)?);
    let engine = CrawlEngine::new(Arc::clone(config), parser)?;

    log::info!(
        "Crawling {} seed(s), depth {}, {}s budget, {} fetch slot(s)",
        seeds.len(),
        config.crawl.max_depth,
        config.crawl.timeout_secs,
        config
            .crawl
            .thread_count
            .min(CrawlEngine::max_parallelism())
            .max(1)
    );

    let result = profiler.time("crawl", engine.crawl(seeds)).await;

    log::info!(
        "Crawl complete: {} URL(s) visited, {} ranked word(s)",
        result.urls_visited,
        result.word_counts.len()
    );

    Ok(result)
}

// src/crawl/engine.rs

//! Crawl orchestration.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use regex::Regex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::Result;
use crate::models::{Config, CrawlResult, compile_full_match};
use crate::parser::PageParser;

use super::state::{VisitedSet, WordTally};
use super::task::{CrawlContext, CrawlTask};

/// Bounded-time, bounded-depth parallel crawl engine.
///
/// One engine may serve many crawl invocations; every invocation gets a
/// fresh visited set and word tally, so no state leaks between runs.
pub struct CrawlEngine {
    config: Arc<Config>,
    parser: Arc<dyn PageParser>,
    ignored_urls: Arc<[Regex]>,
    fetch_permits: usize,
}

impl CrawlEngine {
    /// Build an engine from validated configuration.
    ///
    /// Malformed ignore patterns are reported here, before any task can
    /// launch. Patterns are compiled exactly once and kept for the
    /// engine's lifetime.
    pub fn new(config: Arc<Config>, parser: Arc<dyn PageParser>) -> Result<Self> {
        config.validate_limits()?;
        let ignored_urls: Arc<[Regex]> =
            compile_full_match(&config.crawl.ignored_urls)?.into();
        let fetch_permits = config
            .crawl
            .thread_count
            .min(Self::max_parallelism())
            .max(1);
        Ok(Self {
            config,
            parser,
            ignored_urls,
            fetch_permits,
        })
    }

    /// Maximum usable parallelism, bounded by the hardware.
    pub fn max_parallelism() -> usize {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    }

    /// Crawl from the given seeds until the deadline passes or the
    /// reachable graph is exhausted.
    ///
    /// Always produces a result; per-URL failures and deadline expiry are
    /// normal termination conditions, not errors. The call returns only
    /// after every spawned task and all of its descendants have completed.
    pub async fn crawl(&self, seeds: &[String]) -> CrawlResult {
        let deadline = Instant::now() + Duration::from_secs(self.config.crawl.timeout_secs);
        self.crawl_until(deadline, seeds).await
    }

    /// Crawl against an absolute deadline.
    ///
    /// The deadline is computed once and shared, unmutated, by every task.
    async fn crawl_until(&self, deadline: Instant, seeds: &[String]) -> CrawlResult {
        let visited = VisitedSet::new();
        let tally = WordTally::new();

        let ctx = Arc::new(CrawlContext {
            parser: Arc::clone(&self.parser),
            visited: visited.clone(),
            tally: tally.clone(),
            ignored_urls: Arc::clone(&self.ignored_urls),
            deadline,
            fetch_permits: Arc::new(Semaphore::new(self.fetch_permits)),
        });

        let mut roots = JoinSet::new();
        for seed in seeds {
            let root = CrawlTask {
                url: seed.clone(),
                depth: self.config.crawl.max_depth,
            };
            roots.spawn(root.run(Arc::clone(&ctx)));
        }
        while let Some(joined) = roots.join_next().await {
            if let Err(e) = joined {
                log::warn!("Root crawl task failed: {}", e);
            }
        }

        CrawlResult::from_tally(
            tally.snapshot(),
            self.config.crawl.popular_word_count,
            visited.len(),
        )
    }
}

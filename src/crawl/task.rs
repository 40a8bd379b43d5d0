// src/crawl/task.rs

//! The recursive unit of crawl work.

use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use futures::future::BoxFuture;
use regex::Regex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::parser::PageParser;

use super::state::{VisitedSet, WordTally};

/// Shared environment for every task of one crawl invocation.
///
/// Created once by the engine and dropped when the crawl completes; nothing
/// in here survives across invocations.
pub(crate) struct CrawlContext {
    pub parser: Arc<dyn PageParser>,
    pub visited: VisitedSet,
    pub tally: WordTally,
    pub ignored_urls: Arc<[Regex]>,
    pub deadline: Instant,
    pub fetch_permits: Arc<Semaphore>,
}

impl CrawlContext {
    fn is_ignored(&self, url: &str) -> bool {
        self.ignored_urls.iter().any(|p| p.is_match(url))
    }
}

/// One URL at one remaining depth.
///
/// Everything else a task needs lives in the shared [`CrawlContext`]; the
/// task itself carries no synchronization.
pub(crate) struct CrawlTask {
    pub url: String,
    pub depth: usize,
}

impl CrawlTask {
    /// Process this URL and its whole subtree.
    ///
    /// Returns true iff the page was fetched and merged; every pruning
    /// outcome returns false. A task is not complete until all of its
    /// spawned children have completed.
    ///
    /// Async recursion needs an explicit boxed future, hence the
    /// `BoxFuture` return instead of `async fn`.
    pub fn run(self, ctx: Arc<CrawlContext>) -> BoxFuture<'static, bool> {
        async move {
            // Pruning checks, in order, before any fetch. Depth and deadline
            // first so expired work never touches the visited set.
            if self.depth == 0 {
                return false;
            }
            if Instant::now() > ctx.deadline {
                return false;
            }
            if ctx.is_ignored(&self.url) {
                return false;
            }
            if !ctx.visited.claim(&self.url) {
                return false;
            }

            // Parallel fetches are capped by the permit budget; pruned tasks
            // above never wait for one.
            let page = {
                let _permit = match ctx.fetch_permits.acquire().await {
                    Ok(permit) => permit,
                    // The semaphore is never closed while a crawl is running.
                    Err(_) => return false,
                };
                match ctx.parser.parse(&self.url).await {
                    Ok(page) => page,
                    Err(e) => {
                        // A failed fetch is local: no merge, no children, and
                        // sibling tasks are unaffected.
                        log::debug!("Skipping {}: {}", self.url, e);
                        return false;
                    }
                }
            };

            ctx.tally.merge(&page.word_counts);

            let mut children = JoinSet::new();
            for link in page.links {
                let child = CrawlTask {
                    url: link,
                    depth: self.depth - 1,
                };
                children.spawn(child.run(Arc::clone(&ctx)));
            }
            while let Some(joined) = children.join_next().await {
                if let Err(e) = joined {
                    log::warn!("Crawl subtask failed: {}", e);
                }
            }
            true
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::parser::tests::StubParser;

    fn context(parser: Arc<dyn PageParser>, deadline: Instant) -> Arc<CrawlContext> {
        Arc::new(CrawlContext {
            parser,
            visited: VisitedSet::new(),
            tally: WordTally::new(),
            ignored_urls: Arc::from(Vec::<Regex>::new()),
            deadline,
            fetch_permits: Arc::new(Semaphore::new(4)),
        })
    }

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    #[tokio::test]
    async fn zero_depth_prunes_without_claiming() {
        let parser = Arc::new(StubParser::default());
        let ctx = context(parser.clone(), far_deadline());

        let done = CrawlTask {
            url: "http://a".into(),
            depth: 0,
        }
        .run(Arc::clone(&ctx))
        .await;

        assert!(!done);
        assert!(ctx.visited.is_empty());
        assert_eq!(parser.calls("http://a"), 0);
    }

    #[tokio::test]
    async fn expired_deadline_prunes_without_claiming() {
        let parser = Arc::new(StubParser::default());
        let ctx = context(parser.clone(), Instant::now() - Duration::from_secs(1));

        let done = CrawlTask {
            url: "http://a".into(),
            depth: 3,
        }
        .run(Arc::clone(&ctx))
        .await;

        assert!(!done);
        assert!(ctx.visited.is_empty());
        assert_eq!(parser.calls("http://a"), 0);
    }

    #[tokio::test]
    async fn already_claimed_url_is_not_reprocessed() {
        let parser = Arc::new(StubParser::default());
        let ctx = context(parser.clone(), far_deadline());
        assert!(ctx.visited.claim("http://a"));

        let done = CrawlTask {
            url: "http://a".into(),
            depth: 3,
        }
        .run(Arc::clone(&ctx))
        .await;

        assert!(!done);
        assert_eq!(parser.calls("http://a"), 0);
    }

    #[tokio::test]
    async fn fetch_failure_is_a_prune_but_claim_stands() {
        let parser = Arc::new(StubParser::default());
        // No page registered for the URL, so parse fails.
        let ctx = context(parser.clone(), far_deadline());

        let done = CrawlTask {
            url: "http://gone".into(),
            depth: 3,
        }
        .run(Arc::clone(&ctx))
        .await;

        assert!(!done);
        // At-most-one fetch attempt per URL: the claim is kept.
        assert_eq!(ctx.visited.len(), 1);
        assert!(ctx.tally.snapshot().is_empty());
    }

    #[tokio::test]
    async fn success_merges_and_descends() {
        let parser = Arc::new(StubParser::default());
        parser.add_page(
            "http://a",
            vec!["http://b".into()],
            HashMap::from([("x".to_string(), 2)]),
        );
        parser.add_page("http://b", vec![], HashMap::from([("x".to_string(), 1)]));
        let ctx = context(parser.clone(), far_deadline());

        let done = CrawlTask {
            url: "http://a".into(),
            depth: 2,
        }
        .run(Arc::clone(&ctx))
        .await;

        assert!(done);
        assert_eq!(ctx.visited.len(), 2);
        assert_eq!(ctx.tally.snapshot().get("x"), Some(&3));
        assert_eq!(parser.calls("http://a"), 1);
        assert_eq!(parser.calls("http://b"), 1);
    }
}

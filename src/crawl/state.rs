// src/crawl/state.rs

//! Shared per-invocation crawl state.
//!
//! The visited set and the word tally are the only mutable state shared
//! between tasks. Each exposes exactly one mutating operation behind a
//! mutex, so claims and merges stay atomic under concurrent use; iteration
//! is only available as a snapshot copy.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Concurrency-safe set of claimed URLs.
///
/// Membership means "claimed for processing": a URL is inserted before it is
/// fetched, and never removed for the lifetime of one crawl invocation.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically test-and-insert a URL.
    ///
    /// Returns true iff this call performed the insert, i.e. the caller now
    /// owns processing of that URL for this invocation.
    pub fn claim(&self, url: &str) -> bool {
        self.inner
            .lock()
            .expect("visited set lock poisoned")
            .insert(url.to_string())
    }

    /// Number of distinct URLs claimed so far.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("visited set lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Concurrency-safe running word tally.
#[derive(Debug, Clone, Default)]
pub struct WordTally {
    inner: Arc<Mutex<HashMap<String, u64>>>,
}

impl WordTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one page's word counts into the running totals.
    ///
    /// Per-word addition under a single lock acquisition, so the net result
    /// is the same for any interleaving of concurrent merges.
    pub fn merge(&self, counts: &HashMap<String, u64>) {
        let mut tally = self.inner.lock().expect("word tally lock poisoned");
        for (word, count) in counts {
            let total = tally.entry(word.clone()).or_insert(0);
            *total = total.saturating_add(*count);
        }
    }

    /// Copy of the current totals, for ranking after the crawl completes.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.inner
            .lock()
            .expect("word tally lock poisoned")
            .clone()
    }
}

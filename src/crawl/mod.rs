// src/crawl/mod.rs

//! Parallel web-graph traversal.
//!
//! - [`CrawlEngine`]: computes the deadline, owns the per-invocation state,
//!   fans out one root task per seed, and ranks the final tally.
//! - `CrawlTask`: the recursive unit of work (prune checks, one fetch,
//!   structured fan-out to children).
//! - [`VisitedSet`] / [`WordTally`]: the only shared mutable state.

mod engine;
mod state;
mod task;

pub use engine::CrawlEngine;
pub use state::{VisitedSet, WordTally};

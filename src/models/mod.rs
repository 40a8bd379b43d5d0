// src/models/mod.rs

//! Domain models for the crawler.
//!
//! This module contains the data structures used throughout the crate,
//! organized by their primary purpose.

mod config;
mod page;
mod result;

// Re-export all public types
pub use config::{Config, CrawlConfig, FetchConfig, OutputConfig, compile_full_match};
pub use page::PageData;
pub use result::{CrawlResult, WordCounts, rank_words};

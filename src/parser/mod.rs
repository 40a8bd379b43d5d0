// src/parser/mod.rs

//! Fetch-and-extract collaborator.
//!
//! The crawl engine only ever sees the [`PageParser`] trait: one URL in,
//! outbound links and per-word counts out. [`HtmlParser`] is the HTTP
//! implementation used by the CLI; tests substitute an in-memory stub.

mod html;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PageData;

pub use html::HtmlParser;

/// Per-URL fetch-and-extract operation.
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Fetch `url` and extract its outbound links and word counts.
    async fn parse(&self, url: &str) -> Result<PageData>;
}

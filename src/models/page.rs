// src/models/page.rs

//! Data extracted from a single fetched page.

use std::collections::HashMap;

/// Outbound links and word occurrences for one page.
#[derive(Debug, Clone, Default)]
pub struct PageData {
    /// Absolute outbound link URLs
    pub links: Vec<String>,

    /// Occurrence count per word on this page
    pub word_counts: HashMap<String, u64>,
}

impl PageData {
    /// Build page data from raw parts.
    pub fn new(links: Vec<String>, word_counts: HashMap<String, u64>) -> Self {
        Self { links, word_counts }
    }
}

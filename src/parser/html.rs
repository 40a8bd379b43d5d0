// src/parser/html.rs

//! HTTP/HTML implementation of the page parser.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use unicode_segmentation::UnicodeSegmentation;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FetchConfig, PageData, compile_full_match};
use crate::utils::{is_http_url, resolve_url};

/// Fetches pages over HTTP and extracts links and word counts.
pub struct HtmlParser {
    client: Client,
    link_selector: Selector,
    ignored_words: Vec<Regex>,
}

impl HtmlParser {
    /// Create a parser with the given fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let link_selector = Selector::parse("a[href]")
            .map_err(|e| AppError::config(format!("Invalid link selector: {e:?}")))?;
        let ignored_words = compile_full_match(&config.ignored_words)?;
        Ok(Self {
            client,
            link_selector,
            ignored_words,
        })
    }

    /// Extract links and word counts from fetched HTML.
    ///
    /// Synchronous on purpose: `scraper::Html` is not `Send`, so it must
    /// never be held across an await point.
    fn extract(&self, url: &str, body: &str) -> Result<PageData> {
        let base = Url::parse(url)?;
        let document = Html::parse_document(body);

        let links = document
            .select(&self.link_selector)
            .filter_map(|a| a.value().attr("href"))
            .map(|href| resolve_url(&base, href))
            .filter(|link| is_http_url(link))
            .collect();

        let mut word_counts: HashMap<String, u64> = HashMap::new();
        for node in document.tree.nodes() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            if !in_content(&node) {
                continue;
            }
            for word in text.unicode_words() {
                let word = word.to_lowercase();
                if self.ignored_words.iter().any(|p| p.is_match(&word)) {
                    continue;
                }
                *word_counts.entry(word).or_insert(0) += 1;
            }
        }

        Ok(PageData::new(links, word_counts))
    }
}

/// Whether a text node holds page content rather than embedded code.
fn in_content(node: &ego_tree::NodeRef<'_, scraper::Node>) -> bool {
    node.parent()
        .and_then(|p| p.value().as_element().map(|el| el.name().to_string()))
        .map(|name| !matches!(name.as_str(), "script" | "style" | "noscript"))
        .unwrap_or(true)
}

#[async_trait]
impl super::PageParser for HtmlParser {
    async fn parse(&self, url: &str) -> Result<PageData> {
        let body = self.client.get(url).send().await?.text().await?;
        self.extract(url, &body)
    }
}

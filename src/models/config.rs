//! Application configuration structures.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Traversal behavior settings
    #[serde(default)]
    pub crawl: CrawlConfig,

    /// HTTP fetching and word extraction settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Result and profile output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    ///
    /// Runs before any crawl task is launched, so malformed configuration
    /// surfaces as a synchronous error rather than a quiet empty result.
    /// Pattern compilation results are discarded here; the engine and the
    /// parser compile their own patterns once at construction via
    /// [`compile_full_match`] and keep them.
    pub fn validate(&self) -> Result<()> {
        self.validate_limits()?;
        compile_full_match(&self.crawl.ignored_urls)
            .map_err(|e| AppError::validation(format!("crawl.ignored_urls: {e}")))?;
        compile_full_match(&self.fetch.ignored_words)
            .map_err(|e| AppError::validation(format!("fetch.ignored_words: {e}")))?;
        Ok(())
    }

    /// Validate every scalar setting, leaving patterns to their consumers.
    pub fn validate_limits(&self) -> Result<()> {
        if self.crawl.timeout_secs == 0 {
            return Err(AppError::validation("crawl.timeout_secs must be > 0"));
        }
        if self.crawl.popular_word_count == 0 {
            return Err(AppError::validation("crawl.popular_word_count must be > 0"));
        }
        if self.crawl.thread_count == 0 {
            return Err(AppError::validation("crawl.thread_count must be > 0"));
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Traversal behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Total wall-time budget for one crawl invocation, in seconds
    #[serde(default = "defaults::crawl_timeout")]
    pub timeout_secs: u64,

    /// Hop budget applied to every seed URL
    #[serde(default = "defaults::max_depth")]
    pub max_depth: usize,

    /// Number of top words to report
    #[serde(default = "defaults::popular_word_count")]
    pub popular_word_count: usize,

    /// Requested fetch parallelism (clamped to hardware parallelism)
    #[serde(default = "defaults::thread_count")]
    pub thread_count: usize,

    /// Full-match patterns for URLs that must never be claimed
    #[serde(default)]
    pub ignored_urls: Vec<String>,

    /// Seed URLs
    #[serde(default)]
    pub start_pages: Vec<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::crawl_timeout(),
            max_depth: defaults::max_depth(),
            popular_word_count: defaults::popular_word_count(),
            thread_count: defaults::thread_count(),
            ignored_urls: Vec::new(),
            start_pages: Vec::new(),
        }
    }
}

/// HTTP client and word extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::fetch_timeout")]
    pub timeout_secs: u64,

    /// Full-match patterns for words excluded from the tally
    #[serde(default = "defaults::ignored_words")]
    pub ignored_words: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::fetch_timeout(),
            ignored_words: defaults::ignored_words(),
        }
    }
}

/// Result and profile output settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Path for the crawl result JSON; empty string writes to stdout
    #[serde(default)]
    pub result_path: String,

    /// Path for the profile report; empty string writes to stdout
    #[serde(default)]
    pub profile_path: String,
}

/// Compile full-match patterns by anchoring each one.
///
/// `Regex::is_match` is a substring search; the configured patterns must
/// match the whole URL or word, so they are wrapped in `^(?:...)$`.
pub fn compile_full_match(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(&format!("^(?:{p})$"))
                .map_err(|e| AppError::config(format!("Invalid pattern '{p}': {e}")))
        })
        .collect()
}

mod defaults {
    // Crawl defaults
    pub fn crawl_timeout() -> u64 {
        7
    }
    pub fn max_depth() -> usize {
        10
    }
    pub fn popular_word_count() -> usize {
        10
    }
    pub fn thread_count() -> usize {
        8
    }

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; wordcrawl/0.1)".into()
    }
    pub fn fetch_timeout() -> u64 {
        30
    }
    pub fn ignored_words() -> Vec<String> {
        // Short function words carry no signal in popularity rankings.
        vec![r".{1,3}".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawl.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_word_count() {
        let mut config = Config::default();
        config.crawl.popular_word_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_ignore_pattern() {
        let mut config = Config::default();
        config.crawl.ignored_urls = vec!["[[invalid".to_string()];
        assert!(config.validate().is_err());
        // Pattern checking belongs to the full validation pass; the scalar
        // pass leaves it to the pattern consumers.
        assert!(config.validate_limits().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_word_pattern() {
        let mut config = Config::default();
        config.fetch.ignored_words = vec!["(unclosed".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn compiled_patterns_require_full_match() {
        let patterns = compile_full_match(&[r"https?://example\.com/.*".to_string()]).unwrap();
        assert!(patterns[0].is_match("http://example.com/page"));
        // A substring hit alone must not count as a match.
        assert!(!patterns[0].is_match("http://other.com/https://example.com/page/suffix-xyz"));
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawl]
            max_depth = 2
            start_pages = ["http://example.com"]
            "#,
        )
        .unwrap();
        assert_eq!(config.crawl.max_depth, 2);
        assert_eq!(config.crawl.start_pages.len(), 1);
        assert_eq!(config.crawl.timeout_secs, 7);
        assert!(config.output.result_path.is_empty());
    }
}

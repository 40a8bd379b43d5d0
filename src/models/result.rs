// src/models/result.rs

//! Final crawl summary and word ranking.

use std::collections::HashMap;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Immutable output of one crawl invocation.
#[derive(Debug, Clone, Serialize, Default)]
pub struct CrawlResult {
    /// Top words in rank order (descending count, ties lexicographic)
    pub word_counts: WordCounts,

    /// Number of distinct URLs claimed during the crawl
    pub urls_visited: usize,
}

impl CrawlResult {
    /// Build a result from the final tally snapshot.
    ///
    /// An empty tally still reports the visited count alongside an empty
    /// word map.
    pub fn from_tally(tally: HashMap<String, u64>, limit: usize, urls_visited: usize) -> Self {
        Self {
            word_counts: WordCounts(rank_words(tally, limit)),
            urls_visited,
        }
    }
}

/// Ranked word counts, serialized as a JSON object in rank order.
#[derive(Debug, Clone, Default)]
pub struct WordCounts(pub Vec<(String, u64)>);

impl WordCounts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// JSON maps lose ordering with derived impls; the ranked order is part of
// the user-visible output, so the map is emitted entry by entry.
impl Serialize for WordCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in &self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// Rank words by descending count and truncate to `limit`.
///
/// Ties are broken by lexicographically ascending word, which keeps the
/// ranking deterministic across runs.
pub fn rank_words(tally: HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = tally.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries
            .iter()
            .map(|(w, c)| (w.to_string(), *c))
            .collect()
    }

    #[test]
    fn ranks_by_count_descending() {
        let ranked = rank_words(tally(&[("a", 1), ("b", 3), ("c", 2)]), 3);
        assert_eq!(
            ranked,
            vec![
                ("b".to_string(), 3),
                ("c".to_string(), 2),
                ("a".to_string(), 1)
            ]
        );
    }

    #[test]
    fn breaks_ties_lexicographically() {
        let ranked = rank_words(tally(&[("zebra", 2), ("apple", 2), ("mango", 2)]), 3);
        assert_eq!(ranked[0].0, "apple");
        assert_eq!(ranked[1].0, "mango");
        assert_eq!(ranked[2].0, "zebra");
    }

    #[test]
    fn truncates_to_limit() {
        let ranked = rank_words(tally(&[("a", 5), ("b", 4), ("c", 3)]), 1);
        assert_eq!(ranked, vec![("a".to_string(), 5)]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let source = tally(&[("x", 2), ("y", 2), ("z", 1)]);
        let first = rank_words(source.clone(), 10);
        let second = rank_words(source, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_tally_reports_visited_count() {
        let result = CrawlResult::from_tally(HashMap::new(), 5, 4);
        assert!(result.word_counts.is_empty());
        assert_eq!(result.urls_visited, 4);
    }

    #[test]
    fn serializes_word_counts_in_rank_order() {
        let result = CrawlResult::from_tally(tally(&[("beta", 1), ("alpha", 7)]), 10, 2);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"word_counts":{"alpha":7,"beta":1},"urls_visited":2}"#
        );
    }
}

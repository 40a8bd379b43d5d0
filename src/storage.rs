// src/storage.rs

//! Result and profile report writers.
//!
//! Files are written atomically (temp file, then rename) so a crash never
//! leaves a half-written report. An empty path sends the output to stdout
//! instead.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::CrawlResult;

/// Write the crawl result as pretty-printed JSON.
///
/// `path` empty writes to stdout.
pub async fn write_result(result: &CrawlResult, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    write_report(&json, path).await
}

/// Write the profile report text.
///
/// `path` empty writes to stdout.
pub async fn write_profile(report: &str, path: &str) -> Result<()> {
    write_report(report, path).await
}

async fn write_report(content: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(content.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        return Ok(());
    }
    write_bytes(Path::new(path), content.as_bytes()).await
}

/// Write bytes atomically (write to temp, then rename).
async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let tmp = path.with_extension("tmp");
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[tokio::test]
    async fn writes_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let result =
            CrawlResult::from_tally(HashMap::from([("word".to_string(), 3)]), 10, 1);

        write_result(&result, path.to_str().unwrap()).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("\"word\": 3"));
        assert!(content.contains("\"urls_visited\": 1"));
        // No stray temp file left behind.
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/profile.txt");

        write_profile("Run at now\n", path.to_str().unwrap())
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.txt");
        let path_str = path.to_str().unwrap();

        write_profile("first", path_str).await.unwrap();
        write_profile("second", path_str).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "second");
    }
}

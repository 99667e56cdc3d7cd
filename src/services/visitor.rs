// src/services/visitor.rs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

/// On-disk shape of the counter file.
#[derive(Debug, Serialize, Deserialize)]
struct CountData {
    count: u64,
}

/// File-backed page visit counter.
///
/// Each call is a plain read-modify-write with no locking, so two requests
/// racing on the same file can both write the same value.
#[derive(Debug, Clone)]
pub struct VisitorCounter {
    path: PathBuf,
}

impl VisitorCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Increments the persisted count and returns the new value.
    ///
    /// A missing or unreadable file counts as the first visit. A failed write
    /// is logged and the incremented value is still returned.
    pub async fn increment_and_get(&self) -> u64 {
        let count = match self.read().await {
            Ok(data) => data.count.saturating_add(1),
            Err(e) => {
                tracing::debug!("Visitor count unavailable at {:?}, starting at 1: {}", self.path, e);
                1
            }
        };

        if let Err(e) = self.write(&CountData { count }).await {
            tracing::error!("Failed to write visitor count file {:?}: {}", self.path, e);
        }

        count
    }

    async fn read(&self) -> Result<CountData, Box<dyn std::error::Error + Send + Sync>> {
        let raw = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write(&self, data: &CountData) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let body = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::VisitorCounter;

    #[tokio::test]
    async fn absent_file_starts_at_one_then_increments() {
        let dir = tempfile::tempdir().unwrap();
        let counter = VisitorCounter::new(dir.path().join("visitor-count.json"));

        assert_eq!(counter.increment_and_get().await, 1);
        assert_eq!(counter.increment_and_get().await, 2);

        let raw = std::fs::read_to_string(counter.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["count"], 2);
    }

    #[tokio::test]
    async fn existing_count_is_continued() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visitor-count.json");
        std::fs::write(&path, r#"{ "count": 41 }"#).unwrap();

        let counter = VisitorCounter::new(&path);
        assert_eq!(counter.increment_and_get().await, 42);
    }

    #[tokio::test]
    async fn corrupt_file_resets_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visitor-count.json");
        std::fs::write(&path, "not json").unwrap();

        let counter = VisitorCounter::new(&path);
        assert_eq!(counter.increment_and_get().await, 1);
        assert_eq!(counter.increment_and_get().await, 2);
    }

    #[tokio::test]
    async fn write_failure_still_returns_count() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so every write fails.
        let counter = VisitorCounter::new(dir.path().join("missing").join("count.json"));

        assert_eq!(counter.increment_and_get().await, 1);
        assert_eq!(counter.increment_and_get().await, 1);
    }
}

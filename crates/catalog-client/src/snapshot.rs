//! Fetcher that serves pages out of a catalog snapshot.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;

use data_loader::{MovieRecord, parser};

use crate::{CatalogFetcher, Result};

/// Records per page, matching TMDB's popular endpoint
pub const SNAPSHOT_PAGE_SIZE: usize = 20;

/// Serves a fixed list of records in pages of twenty.
///
/// Page `p` (1-based) holds records `(p - 1) * 20 .. p * 20`; pages past
/// the end are empty.
#[derive(Debug, Clone)]
pub struct SnapshotCatalog {
    records: Vec<MovieRecord>,
    page_size: usize,
}

impl SnapshotCatalog {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self::with_page_size(records, SNAPSHOT_PAGE_SIZE)
    }

    pub fn with_page_size(records: Vec<MovieRecord>, page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
        }
    }

    /// Load a snapshot file written by `reel-swipe export`
    pub fn from_file(path: &Path) -> data_loader::Result<Self> {
        Ok(Self::new(parser::parse_catalog(path)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn page(&self, page: u32) -> &[MovieRecord] {
        if page == 0 {
            return &[];
        }
        let start = (page as usize - 1).saturating_mul(self.page_size);
        if start >= self.records.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.records.len());
        &self.records[start..end]
    }
}

#[async_trait]
impl CatalogFetcher for SnapshotCatalog {
    fn name(&self) -> &str {
        "SnapshotCatalog"
    }

    async fn fetch_batch(&self, range_start: u32, range_end: u32) -> Result<Vec<MovieRecord>> {
        let mut seen = HashSet::new();
        let mut batch = Vec::new();
        for page in range_start..=range_end {
            for record in self.page(page) {
                if seen.insert(record.id) {
                    batch.push(record.clone());
                }
            }
        }
        tracing::debug!(
            "Snapshot pages {}..={} yielded {} movies",
            range_start,
            range_end,
            batch.len()
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(count: u64) -> SnapshotCatalog {
        SnapshotCatalog::new(
            (1..=count)
                .map(|id| MovieRecord::new(id, format!("Movie {}", id)))
                .collect(),
        )
    }

    fn ids(records: &[MovieRecord]) -> Vec<u64> {
        records.iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn test_page_zero_is_skipped() {
        let batch = catalog(50).fetch_batch(0, 1).await.unwrap();
        assert_eq!(ids(&batch), (1..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_range_spans_pages() {
        let batch = catalog(50).fetch_batch(2, 3).await.unwrap();
        assert_eq!(ids(&batch), (21..=50).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_pages_past_end_are_empty() {
        let batch = catalog(30).fetch_batch(3, 8).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_inverted_range_is_empty() {
        let batch = catalog(30).fetch_batch(2, 1).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let records: Vec<MovieRecord> = (1..=3)
            .map(|id| MovieRecord::new(id, format!("Movie {}", id)).with_genres(["Drama"]))
            .collect();
        parser::write_catalog(&path, &records).unwrap();

        let catalog = SnapshotCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        let batch = catalog.fetch_batch(1, 1).await.unwrap();
        assert_eq!(batch, records);
    }
}

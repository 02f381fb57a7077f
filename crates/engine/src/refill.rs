//! Refill trigger and page arithmetic for catalog fetches.

use crate::pools::MoviePools;

/// Results per catalog page
pub const PAGE_SIZE: usize = 20;

/// Pages requested per fetch by default
pub const DEFAULT_PAGES_PER_BATCH: u32 = 5;

/// A batch larger than this would run past the last page TMDB serves
pub const MAX_PAGES_PER_BATCH: u32 = catalog_client::MAX_PAGE;

/// Inclusive range of catalog pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// First batch requested for an empty catalog
    pub fn initial(pages_per_batch: u32) -> Self {
        Self::new(0, pages_per_batch)
    }
}

/// True when fewer unrated movies are known than the window holds.
pub fn needs_refill(pools: &MoviePools) -> bool {
    pools.all().len().saturating_sub(pools.rated_count()) < pools.capacity()
}

/// Next range to request, continuing from the pages already ingested.
///
/// The start page is the last page (partially) covered by `all`, so
/// consecutive ranges overlap by one page; ingest drops the repeats.
pub fn next_page_range(pools: &MoviePools, pages_per_batch: u32) -> PageRange {
    let start = (pools.all().len() / PAGE_SIZE) as u32;
    PageRange::new(start, start.saturating_add(pages_per_batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{MovieRecord, Verdict};

    fn pools_with(count: u64) -> MoviePools {
        let mut pools = MoviePools::default();
        pools.ingest((1..=count).map(|id| MovieRecord::new(id, format!("Movie {}", id))));
        pools.initialize_suggestions();
        pools
    }

    #[test]
    fn test_refill_threshold() {
        assert!(needs_refill(&MoviePools::default()));
        assert!(needs_refill(&pools_with(9)));
        assert!(!needs_refill(&pools_with(10)));

        let mut pools = pools_with(10);
        pools.record_feedback(3, Verdict::Liked).unwrap();
        assert!(needs_refill(&pools));
    }

    #[test]
    fn test_page_ranges() {
        assert_eq!(PageRange::initial(DEFAULT_PAGES_PER_BATCH), PageRange::new(0, 5));
        assert_eq!(next_page_range(&MoviePools::default(), 5), PageRange::new(0, 5));
        assert_eq!(next_page_range(&pools_with(100), 5), PageRange::new(5, 10));
        assert_eq!(next_page_range(&pools_with(35), 2), PageRange::new(1, 3));
    }

    #[test]
    fn test_page_range_saturates() {
        let range = next_page_range(&pools_with(40), u32::MAX);
        assert_eq!(range, PageRange::new(2, u32::MAX));
        assert_eq!(PageRange::initial(u32::MAX), PageRange::new(0, u32::MAX));
    }
}

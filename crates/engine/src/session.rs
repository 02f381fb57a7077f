//! # Catalog Session
//!
//! Pairs a [`RecommendationEngine`] with a [`CatalogFetcher`] and keeps the
//! catalog topped up:
//! 1. `start` fetches the first pages and fills the window
//! 2. After every feedback event, if fewer unrated movies are known than
//!    the window holds, the next page range is fetched and ingested
//!
//! A failed fetch leaves the engine untouched and is reported back with the
//! feedback result; the next event retries.

use tracing::{info, warn};

use catalog_client::{CatalogFetcher, FetchError};
use data_loader::{MovieId, Verdict};

use crate::engine::{FeedbackReport, IngestReport, RecommendationEngine};
use crate::error::Result;
use crate::refill::PageRange;

/// What the catalog check after an event did
#[derive(Debug)]
pub enum RefillStatus {
    /// Enough unrated movies are known
    NotNeeded,
    Ingested(IngestReport),
    /// Nothing was ingested; pools are unchanged
    Failed { range: PageRange, error: FetchError },
}

impl RefillStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, RefillStatus::Failed { .. })
    }
}

/// A feedback result together with the refill it triggered
#[derive(Debug)]
pub struct SessionFeedback {
    pub report: FeedbackReport,
    pub refill: RefillStatus,
}

pub struct CatalogSession<F: CatalogFetcher> {
    engine: RecommendationEngine,
    fetcher: F,
}

impl<F: CatalogFetcher> CatalogSession<F> {
    pub fn new(engine: RecommendationEngine, fetcher: F) -> Self {
        Self { engine, fetcher }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Fetch the first page range and fill the window.
    pub async fn start(&mut self) -> std::result::Result<IngestReport, FetchError> {
        let range = self.engine.next_page_range();
        let report = self.fetch_and_ingest(range).await?;
        info!(
            "Session started with {} movies, {} on screen",
            report.added,
            self.engine.suggested().len()
        );
        Ok(report)
    }

    /// Fetch more of the catalog if the refill threshold is crossed.
    pub async fn refill_if_needed(&mut self) -> RefillStatus {
        if !self.engine.needs_refill() {
            return RefillStatus::NotNeeded;
        }
        let range = self.engine.next_page_range();
        match self.fetch_and_ingest(range).await {
            Ok(report) => RefillStatus::Ingested(report),
            Err(error) => {
                let kind = if error.is_transient() { "transient" } else { "permanent" };
                warn!(
                    "Catalog fetch for pages {}..={} failed ({}: {}), keeping current pools",
                    range.start, range.end, kind, error
                );
                RefillStatus::Failed { range, error }
            }
        }
    }

    /// Apply a verdict, then refill the catalog if it is running low.
    pub async fn submit_feedback(
        &mut self,
        id: MovieId,
        verdict: Verdict,
    ) -> Result<SessionFeedback> {
        let report = self.engine.submit_feedback(id, verdict)?;
        let refill = self.refill_if_needed().await;
        Ok(SessionFeedback { report, refill })
    }

    async fn fetch_and_ingest(
        &mut self,
        range: PageRange,
    ) -> std::result::Result<IngestReport, FetchError> {
        let batch = self.fetcher.fetch_batch(range.start, range.end).await?;
        Ok(self.engine.ingest(batch))
    }
}

//! # Recommendation Engine
//!
//! The single owner of all pool state. Each public method runs one event
//! to completion:
//! - `ingest`: append a fetched batch, fill the window if it is empty
//! - `submit_feedback`: record a verdict, then replace the rated slot with
//!   the best scoring untouched movie
//!
//! Mutation goes through `&mut self`, so two event chains can never
//! interleave.

use tracing::{debug, info, warn};

use data_loader::{MovieId, MovieRecord, Verdict};
use pipeline::{PreferenceProfile, RankWeightScorer, ScoreBreakdown};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::pools::MoviePools;
use crate::refill::{self, PageRange};
use crate::selector::{ScoredCandidate, SuggestionSelector};

/// What happened to the slot of a rated movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The slot now shows `next`
    Replaced { next: MovieId },
    /// The rated movie was not being shown; no slot changed
    SlotNotFound,
    /// No untouched movie was left; the slot was removed
    PoolExhausted,
}

/// Result of one feedback event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReport {
    pub rated: MovieId,
    pub verdict: Verdict,
    pub slot: SlotOutcome,
    /// Ids placed into slots left empty by earlier exhaustion
    pub backfilled: Vec<MovieId>,
}

impl FeedbackReport {
    pub fn is_exhausted(&self) -> bool {
        self.slot == SlotOutcome::PoolExhausted
    }
}

/// Result of ingesting one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub received: usize,
    pub added: usize,
    /// The window was empty and this batch filled it
    pub initialized: bool,
}

pub struct RecommendationEngine {
    pools: MoviePools,
    selector: SuggestionSelector,
    pages_per_batch: u32,
}

impl RecommendationEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_selector(config, SuggestionSelector::new(config.selection_policy))
    }

    pub fn with_selector(config: &EngineConfig, selector: SuggestionSelector) -> Self {
        info!(
            "Engine ready: {} slots, {} pages per fetch, scorer {}",
            config.suggestion_capacity,
            config.pages_per_batch,
            selector.scorer_name()
        );
        Self {
            pools: MoviePools::new(config.suggestion_capacity),
            selector,
            pages_per_batch: config.pages_per_batch,
        }
    }

    // Presentation boundary

    /// The movies currently shown, in slot order
    pub fn suggested(&self) -> &[MovieRecord] {
        self.pools.suggested()
    }

    pub fn pools(&self) -> &MoviePools {
        &self.pools
    }

    /// Profile as it stands for the current histories
    pub fn profile(&self) -> PreferenceProfile {
        PreferenceProfile::build(self.pools.liked(), self.pools.disliked())
    }

    /// Per-attribute score of a known movie under the current profile
    pub fn explain(&self, id: MovieId) -> Option<ScoreBreakdown> {
        let movie = self.pools.get(id)?;
        Some(RankWeightScorer::new().breakdown(movie, &self.profile()))
    }

    // Refill trigger

    pub fn needs_refill(&self) -> bool {
        refill::needs_refill(&self.pools)
    }

    pub fn next_page_range(&self) -> PageRange {
        if self.pools.all().is_empty() {
            return PageRange::initial(self.pages_per_batch);
        }
        refill::next_page_range(&self.pools, self.pages_per_batch)
    }

    // Events

    /// Ingest a complete fetched batch.
    pub fn ingest(&mut self, batch: Vec<MovieRecord>) -> IngestReport {
        let received = batch.len();
        let added = self.pools.ingest(batch);
        let initialized = self.pools.initialize_suggestions();

        info!(
            "Ingested {} new of {} fetched movies (catalog {}, untouched {})",
            added,
            received,
            self.pools.all().len(),
            self.pools.untouched().len()
        );
        IngestReport {
            received,
            added,
            initialized,
        }
    }

    /// Record a verdict and refill the rated movie's slot.
    ///
    /// ## Algorithm
    /// 1. Append the movie to the liked or disliked history
    /// 2. Build the profile from the updated histories
    /// 3. Rank the untouched pool by score (ties keep pool order)
    /// 4. Put the best candidate in the rated slot, or drop the slot when
    ///    nothing is left
    /// 5. Fill slots emptied by earlier exhaustion with the next candidates
    ///
    /// A verdict for a movie that is not on screen is still recorded; only
    /// the slot replacement is skipped.
    pub fn submit_feedback(&mut self, id: MovieId, verdict: Verdict) -> Result<FeedbackReport> {
        let rated = self.pools.record_feedback(id, verdict)?;
        let profile = PreferenceProfile::build(self.pools.liked(), self.pools.disliked());

        let ranked: Vec<MovieRecord> = self
            .selector
            .rank(self.pools.untouched(), &profile)
            .into_iter()
            .map(|ScoredCandidate { movie, .. }| movie.clone())
            .collect();
        let mut candidates = ranked.into_iter().peekable();

        let slot = match candidates.peek().cloned() {
            Some(best) => {
                let next = best.id;
                match self.pools.replace_slot(id, best) {
                    Ok(()) => {
                        candidates.next();
                        SlotOutcome::Replaced { next }
                    }
                    Err(_) => SlotOutcome::SlotNotFound,
                }
            }
            None => match self.pools.vacate_slot(id) {
                Ok(()) => SlotOutcome::PoolExhausted,
                Err(_) => SlotOutcome::SlotNotFound,
            },
        };

        let backfilled = if self.pools.vacancies() > 0 {
            self.pools.fill_vacancies(candidates)
        } else {
            Vec::new()
        };

        match slot {
            SlotOutcome::Replaced { next } => info!(
                "{} {}; slot now shows {}",
                verdict,
                rated,
                next
            ),
            SlotOutcome::SlotNotFound => debug!(
                "{} {} was not on screen; history updated, no slot replaced",
                verdict,
                rated
            ),
            SlotOutcome::PoolExhausted => warn!(
                "{} {}; no untouched movies left, window down to {} slots",
                verdict,
                rated,
                self.pools.suggested().len()
            ),
        }
        if !backfilled.is_empty() {
            info!("Backfilled {} empty slots: {:?}", backfilled.len(), backfilled);
        }

        Ok(FeedbackReport {
            rated: rated.id,
            verdict,
            slot,
            backfilled,
        })
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoolError;

    fn ids(records: &[MovieRecord]) -> Vec<MovieId> {
        records.iter().map(|m| m.id).collect()
    }

    /// Twelve movies. Movie 1 and 11 share the Western genre and director;
    /// movie 12 shares nothing.
    fn twelve_movies() -> Vec<MovieRecord> {
        (1..=12)
            .map(|id| {
                let movie = MovieRecord::new(id, format!("Movie {}", id));
                match id {
                    1 | 11 => movie.with_genres(["Western"]).with_director("Leone"),
                    _ => movie.with_genres(["Drama"]).with_director(format!("Director {}", id)),
                }
            })
            .collect()
    }

    #[test]
    fn test_like_replaces_slot_with_best_match() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(twelve_movies());

        assert_eq!(ids(engine.suggested()), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(engine.pools().untouched()), vec![11, 12]);

        let report = engine.submit_feedback(1, Verdict::Liked).unwrap();

        assert_eq!(report.slot, SlotOutcome::Replaced { next: 11 });
        assert!(report.backfilled.is_empty());
        assert_eq!(ids(engine.suggested()), vec![11, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(ids(engine.pools().untouched()), vec![12]);
        assert_eq!(ids(engine.pools().liked()), vec![1]);
    }

    #[test]
    fn test_dislike_steers_away() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(twelve_movies());

        // Disliking a Western pushes 11 below 12
        engine.submit_feedback(1, Verdict::Disliked).unwrap();
        assert_eq!(engine.suggested()[0].id, 12);
        assert_eq!(ids(engine.pools().untouched()), vec![11]);
    }

    #[test]
    fn test_equal_scores_pick_first_untouched() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(
            (1..=13)
                .map(|id| {
                    MovieRecord::new(id, format!("Movie {}", id)).with_director(format!("D{}", id))
                })
                .collect(),
        );

        let report = engine.submit_feedback(5, Verdict::Liked).unwrap();
        assert_eq!(report.slot, SlotOutcome::Replaced { next: 11 });
        assert_eq!(engine.suggested()[4].id, 11);
    }

    #[test]
    fn test_unknown_movie_changes_nothing() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(twelve_movies());

        let err = engine.submit_feedback(404, Verdict::Liked).unwrap_err();
        assert_eq!(err, PoolError::UnknownMovie(404));
        assert_eq!(ids(engine.suggested()), (1..=10).collect::<Vec<_>>());
        assert!(engine.pools().liked().is_empty());
    }

    #[test]
    fn test_rating_off_screen_movie_records_history_only() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(twelve_movies());

        let report = engine.submit_feedback(12, Verdict::Liked).unwrap();

        assert_eq!(report.slot, SlotOutcome::SlotNotFound);
        assert_eq!(ids(engine.pools().liked()), vec![12]);
        assert_eq!(ids(engine.suggested()), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(engine.pools().untouched()), vec![11]);
    }

    #[test]
    fn test_rating_twice_is_rejected() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(twelve_movies());
        engine.submit_feedback(1, Verdict::Liked).unwrap();

        let err = engine.submit_feedback(1, Verdict::Disliked).unwrap_err();
        assert_eq!(err, PoolError::AlreadyRated(1));
        assert!(engine.pools().disliked().is_empty());
    }

    #[test]
    fn test_exhaustion_then_backfill_on_next_feedback() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(twelve_movies());

        engine.submit_feedback(1, Verdict::Liked).unwrap();
        engine.submit_feedback(2, Verdict::Liked).unwrap();
        assert!(engine.pools().untouched().is_empty());

        // Nothing left to show in place of 3
        let report = engine.submit_feedback(3, Verdict::Disliked).unwrap();
        assert!(report.is_exhausted());
        assert_eq!(engine.suggested().len(), 9);

        // New movies do not fill the gap on their own
        engine.ingest(
            (13..=15)
                .map(|id| MovieRecord::new(id, format!("Movie {}", id)))
                .collect(),
        );
        assert_eq!(engine.suggested().len(), 9);
        assert_eq!(ids(engine.pools().untouched()), vec![13, 14, 15]);

        // The next verdict replaces its own slot and fills the gap
        let report = engine.submit_feedback(4, Verdict::Liked).unwrap();
        assert!(matches!(report.slot, SlotOutcome::Replaced { .. }));
        assert_eq!(report.backfilled.len(), 1);
        assert_eq!(engine.suggested().len(), 10);
        assert_eq!(engine.pools().untouched().len(), 1);
    }

    #[test]
    fn test_never_reshows_rated_movies() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(twelve_movies());

        for id in 1..=10 {
            engine.submit_feedback(id, Verdict::Liked).unwrap();
        }
        let shown = ids(engine.suggested());
        assert_eq!(shown, vec![11, 12]);
        assert!(engine.pools().untouched().is_empty());
    }

    #[test]
    fn test_refill_trigger_and_ranges() {
        let mut engine = RecommendationEngine::default();
        assert!(engine.needs_refill());
        assert_eq!(engine.next_page_range(), PageRange::new(0, 5));

        engine.ingest(twelve_movies());
        assert!(!engine.needs_refill());

        engine.submit_feedback(1, Verdict::Liked).unwrap();
        engine.submit_feedback(2, Verdict::Liked).unwrap();
        engine.submit_feedback(3, Verdict::Liked).unwrap();
        assert!(engine.needs_refill());
        assert_eq!(engine.next_page_range(), PageRange::new(0, 5));
    }

    #[test]
    fn test_explain_uses_current_profile() {
        let mut engine = RecommendationEngine::default();
        engine.ingest(twelve_movies());
        assert_eq!(engine.explain(11).map(|b| b.total()), Some(0));

        engine.submit_feedback(1, Verdict::Liked).unwrap();
        let breakdown = engine.explain(11).unwrap();
        assert_eq!(breakdown.genres, 1);
        assert_eq!(breakdown.director, 1);
        assert!(engine.explain(999).is_none());
    }
}

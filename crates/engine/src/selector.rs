//! # Suggestion Selector
//!
//! Ranks the untouched pool against a preference profile. Scores are
//! computed in parallel with rayon; the final sort is stable, so equal
//! scores keep untouched-pool order.

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};

use data_loader::MovieRecord;
use pipeline::{FilterPipeline, PreferenceProfile, RankWeightScorer, Scorer};

/// How candidates are chosen for a freed slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Rank the whole untouched pool by score
    #[default]
    Ranked,
    /// Drop candidates sharing any attribute with a disliked movie first,
    /// unless that would leave no candidates at all
    AvoidDisliked,
}

impl std::str::FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "ranked" => Ok(SelectionPolicy::Ranked),
            "avoid_disliked" => Ok(SelectionPolicy::AvoidDisliked),
            other => Err(format!("unknown selection policy '{}'", other)),
        }
    }
}

/// A candidate with its score
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub movie: &'a MovieRecord,
    pub score: i64,
}

pub struct SuggestionSelector {
    scorer: Box<dyn Scorer>,
    filters: FilterPipeline,
}

impl SuggestionSelector {
    /// Selector using the rank-weight scorer and the filters for `policy`
    pub fn new(policy: SelectionPolicy) -> Self {
        let filters = match policy {
            SelectionPolicy::Ranked => FilterPipeline::new(),
            SelectionPolicy::AvoidDisliked => FilterPipeline::avoid_disliked(),
        };
        Self::with_parts(RankWeightScorer::new(), filters)
    }

    pub fn with_parts(scorer: impl Scorer + 'static, filters: FilterPipeline) -> Self {
        Self {
            scorer: Box::new(scorer),
            filters,
        }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Rank `untouched` best first.
    ///
    /// ## Algorithm
    /// 1. Narrow the pool with the filter pipeline (falls back to the whole
    ///    pool if the filters leave nothing or fail)
    /// 2. Score every remaining candidate in parallel
    /// 3. Stable sort by score descending
    pub fn rank<'a>(
        &self,
        untouched: &'a [MovieRecord],
        profile: &PreferenceProfile,
    ) -> Vec<ScoredCandidate<'a>> {
        let pool: Vec<&MovieRecord> = untouched.iter().collect();
        let candidates = match self.filters.apply_or_fallback(pool.clone(), profile) {
            Ok(filtered) => filtered,
            Err(e) => {
                warn!("Candidate filtering failed, ranking unfiltered pool: {:#}", e);
                pool
            }
        };

        // collect() on an indexed parallel iterator keeps input order
        let mut scored: Vec<ScoredCandidate<'a>> = candidates
            .par_iter()
            .map(|&movie| ScoredCandidate {
                movie,
                score: self.scorer.score(movie, profile),
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));

        if let Some(best) = scored.first() {
            debug!(
                "Ranked {} candidates with {}, best is {} (score {})",
                scored.len(),
                self.scorer.name(),
                best.movie,
                best.score
            );
        }
        scored
    }
}

impl Default for SuggestionSelector {
    fn default() -> Self {
        Self::new(SelectionPolicy::default())
    }
}

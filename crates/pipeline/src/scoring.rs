//! Scoring a candidate against a preference profile.
//!
//! Every attribute value of the candidate adds its liked weight and
//! subtracts its disliked weight. There is no normalization, so a movie
//! with more genres or actors in common with the history collects more
//! score.

use crate::profile::{PreferenceProfile, RankList};
use data_loader::MovieRecord;

/// Assigns an integer relevance score to a candidate.
///
/// Implementations must be pure: the same candidate and profile always
/// give the same score.
pub trait Scorer: Send + Sync {
    /// Returns the name of this scorer (for logging/debugging)
    fn name(&self) -> &str;

    fn score(&self, candidate: &MovieRecord, profile: &PreferenceProfile) -> i64;
}

/// Per-attribute contributions to a score, for explaining a suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub genres: i64,
    pub director: i64,
    pub actors: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.genres + self.director + self.actors
    }
}

/// The rank-weight heuristic: `liked.weight(v) - disliked.weight(v)` summed
/// over every genre, the director, and every actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankWeightScorer;

impl RankWeightScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute the score split by attribute class.
    pub fn breakdown(
        &self,
        candidate: &MovieRecord,
        profile: &PreferenceProfile,
    ) -> ScoreBreakdown {
        let genres = candidate
            .genres
            .iter()
            .map(|g| net_weight(g, &profile.liked_genres, &profile.disliked_genres))
            .sum();

        let director = net_weight(
            &candidate.director,
            &profile.liked_directors,
            &profile.disliked_directors,
        );

        let actors = candidate
            .actors
            .iter()
            .map(|a| net_weight(a, &profile.liked_actors, &profile.disliked_actors))
            .sum();

        ScoreBreakdown {
            genres,
            director,
            actors,
        }
    }
}

impl Scorer for RankWeightScorer {
    fn name(&self) -> &str {
        "RankWeightScorer"
    }

    fn score(&self, candidate: &MovieRecord, profile: &PreferenceProfile) -> i64 {
        self.breakdown(candidate, profile).total()
    }
}

// A value in both lists gets both terms.
fn net_weight(value: &str, liked: &RankList, disliked: &RankList) -> i64 {
    liked.weight(value) - disliked.weight(value)
}

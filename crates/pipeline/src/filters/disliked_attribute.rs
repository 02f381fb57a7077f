//! Filter to drop candidates that share an attribute with disliked movies.
//!
//! Used by the strict selection policy: a candidate with any genre,
//! the director, or any actor that appears in the matching disliked
//! rank list is removed before ranking.

use crate::profile::{PreferenceProfile, RankList};
use crate::traits::Filter;
use anyhow::Result;
use data_loader::MovieRecord;

/// Attribute class a [`DislikedAttributeFilter`] checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Genre,
    Director,
    Cast,
}

/// Removes candidates touching a disliked value of one attribute class.
///
/// ## Algorithm
/// Rank lists keep a position map, so each lookup is O(1); the candidate
/// order is untouched.
pub struct DislikedAttributeFilter {
    attribute: Attribute,
}

impl DislikedAttributeFilter {
    pub fn new(attribute: Attribute) -> Self {
        Self { attribute }
    }

    fn touches(&self, movie: &MovieRecord, profile: &PreferenceProfile) -> bool {
        match self.attribute {
            Attribute::Genre => any_in(&movie.genres, &profile.disliked_genres),
            Attribute::Director => profile.disliked_directors.contains(&movie.director),
            Attribute::Cast => any_in(&movie.actors, &profile.disliked_actors),
        }
    }
}

fn any_in(values: &[String], list: &RankList) -> bool {
    values.iter().any(|v| list.contains(v))
}

impl Filter for DislikedAttributeFilter {
    fn name(&self) -> &str {
        match self.attribute {
            Attribute::Genre => "DislikedGenreFilter",
            Attribute::Director => "DislikedDirectorFilter",
            Attribute::Cast => "DislikedCastFilter",
        }
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a MovieRecord>,
        profile: &PreferenceProfile,
    ) -> Result<Vec<&'a MovieRecord>> {
        let filtered: Vec<&MovieRecord> = candidates
            .into_iter()
            .filter(|movie| !self.touches(movie, profile))
            .collect();
        Ok(filtered)
    }
}

//! Preference profile built from like/dislike history.
//!
//! This module turns the two feedback histories into six rank lists
//! (genres, directors and actors, each for liked and disliked movies).

use data_loader::MovieRecord;
use std::collections::HashMap;

/// Distinct attribute values ordered by how often they occur.
///
/// ## Ordering
/// Values with a higher count come first. Equal counts keep the order in
/// which the values first appeared in the flattened history, so the list
/// is fully deterministic for a given history.
///
/// ## Weight
/// The value at index `i` of a list of length `n` weighs `n - i`: the most
/// frequent value weighs `n`, the least frequent weighs 1, and a value not
/// in the list weighs 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankList {
    values: Vec<String>,
    positions: HashMap<String, usize>,
}

impl RankList {
    /// Rank the values of a flattened attribute sequence.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        // (value, count) in first-appearance order
        let mut tallies: Vec<(&'a str, usize)> = Vec::new();
        let mut slots: HashMap<&'a str, usize> = HashMap::new();

        for value in values {
            match slots.get(value).copied() {
                Some(slot) => tallies[slot].1 += 1,
                None => {
                    slots.insert(value, tallies.len());
                    tallies.push((value, 1));
                }
            }
        }

        // sort_by is stable: ties stay in first-appearance order
        tallies.sort_by(|a, b| b.1.cmp(&a.1));

        let values: Vec<String> = tallies.into_iter().map(|(v, _)| v.to_string()).collect();
        let positions = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();

        Self { values, positions }
    }

    /// Weight of `value` for scoring (0 when absent)
    pub fn weight(&self, value: &str) -> i64 {
        match self.positions.get(value) {
            Some(&index) => (self.values.len() - index) as i64,
            None => 0,
        }
    }

    pub fn position(&self, value: &str) -> Option<usize> {
        self.positions.get(value).copied()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.positions.contains_key(value)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `n` highest ranked values
    pub fn top(&self, n: usize) -> &[String] {
        &self.values[..n.min(self.values.len())]
    }
}

/// The six rank lists derived from feedback history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceProfile {
    pub liked_genres: RankList,
    pub disliked_genres: RankList,
    pub liked_directors: RankList,
    pub disliked_directors: RankList,
    pub liked_actors: RankList,
    pub disliked_actors: RankList,
}

impl PreferenceProfile {
    /// Build the profile from the liked and disliked histories.
    ///
    /// Genres and actors are flattened across movies; the director counts
    /// once per movie. The "Unknown" director sentinel is ranked like any
    /// other name.
    pub fn build(liked: &[MovieRecord], disliked: &[MovieRecord]) -> Self {
        let profile = Self {
            liked_genres: RankList::from_values(flatten_genres(liked)),
            disliked_genres: RankList::from_values(flatten_genres(disliked)),
            liked_directors: RankList::from_values(liked.iter().map(|m| m.director.as_str())),
            disliked_directors: RankList::from_values(
                disliked.iter().map(|m| m.director.as_str()),
            ),
            liked_actors: RankList::from_values(flatten_actors(liked)),
            disliked_actors: RankList::from_values(flatten_actors(disliked)),
        };

        tracing::debug!(
            "Built preference profile from {} liked / {} disliked movies \
             (genres {}/{}, directors {}/{}, actors {}/{})",
            liked.len(),
            disliked.len(),
            profile.liked_genres.len(),
            profile.disliked_genres.len(),
            profile.liked_directors.len(),
            profile.disliked_directors.len(),
            profile.liked_actors.len(),
            profile.disliked_actors.len(),
        );
        profile
    }

    /// True when no feedback has been given yet
    pub fn is_empty(&self) -> bool {
        self.liked_genres.is_empty()
            && self.disliked_genres.is_empty()
            && self.liked_directors.is_empty()
            && self.disliked_directors.is_empty()
            && self.liked_actors.is_empty()
            && self.disliked_actors.is_empty()
    }

    /// True when any of the movie's genres, director or actors appears in
    /// a disliked rank list
    pub fn touches_disliked(&self, movie: &MovieRecord) -> bool {
        movie.genres.iter().any(|g| self.disliked_genres.contains(g))
            || self.disliked_directors.contains(&movie.director)
            || movie.actors.iter().any(|a| self.disliked_actors.contains(a))
    }
}

fn flatten_genres(movies: &[MovieRecord]) -> impl Iterator<Item = &str> {
    movies
        .iter()
        .flat_map(|m| m.genres.iter().map(String::as_str))
}

fn flatten_actors(movies: &[MovieRecord]) -> impl Iterator<Item = &str> {
    movies
        .iter()
        .flat_map(|m| m.actors.iter().map(String::as_str))
}

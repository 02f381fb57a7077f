//! Core domain types for the swipe catalog.
//!
//! This module defines the record every other crate operates on.
//! Key concepts:
//! - Type aliases for domain clarity (MovieId)
//! - An immutable record with public fields for display code
//! - A two-valued Verdict enum for feedback

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (the TMDB movie id)
pub type MovieId = u64;

/// Director sentinel used when the credits carry no "Director" entry
pub const UNKNOWN_DIRECTOR: &str = "Unknown";

/// Maximum number of top-billed actors kept per record
pub const MAX_ACTORS: usize = 3;

// =============================================================================
// Movie Record
// =============================================================================

/// A single catalog entry.
///
/// Records are built once (by a fetcher or the snapshot parser) and never
/// modified afterwards. Membership everywhere in the workspace goes through
/// `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    /// Poster path relative to the image CDN (e.g. "/abc123.jpg")
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Genre names in source order, no duplicates
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default = "default_director")]
    pub director: String,
    /// Up to three names, top-billed first
    #[serde(default)]
    pub actors: Vec<String>,
}

fn default_director() -> String {
    UNKNOWN_DIRECTOR.to_string()
}

impl MovieRecord {
    /// Create a record with only an id and a title.
    ///
    /// Everything else starts empty and the director is the "Unknown"
    /// sentinel; chain the `with_*` builders to fill the rest.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            genres: Vec::new(),
            director: default_director(),
            actors: Vec::new(),
        }
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    pub fn with_poster_path(mut self, poster_path: impl Into<String>) -> Self {
        self.poster_path = Some(poster_path.into());
        self
    }

    /// Set genres, dropping repeated names while keeping first-seen order
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for genre in genres {
            let genre = genre.into();
            if !kept.contains(&genre) {
                kept.push(genre);
            }
        }
        self.genres = kept;
        self
    }

    /// Set the director; a blank name falls back to the "Unknown" sentinel
    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        let director = director.into();
        self.director = if director.trim().is_empty() {
            default_director()
        } else {
            director
        };
        self
    }

    /// Set actors, keeping at most the first three
    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = actors.into_iter().take(MAX_ACTORS).map(Into::into).collect();
        self
    }

    pub fn has_known_director(&self) -> bool {
        self.director != UNKNOWN_DIRECTOR
    }
}

impl fmt::Display for MovieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.title, self.id)
    }
}

// =============================================================================
// Feedback
// =============================================================================

/// Binary feedback a user gives on a shown movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Liked,
    Disliked,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Liked => write!(f, "liked"),
            Verdict::Disliked => write!(f, "disliked"),
        }
    }
}

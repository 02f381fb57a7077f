//! Preference learning and scoring for movie candidates.
//!
//! This crate provides:
//! - PreferenceProfile and RankList, built from like/dislike history
//! - Scorer trait and the RankWeightScorer implementation
//! - Filter trait, filters and FilterPipeline for the strict selection policy
//!
//! ## Architecture
//! The selector in the engine crate uses these pieces in stages:
//! 1. Build a PreferenceProfile from the post-feedback histories
//! 2. Optionally narrow the untouched pool with a FilterPipeline
//! 3. Score every remaining candidate and pick the best
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{PreferenceProfile, RankWeightScorer, Scorer};
//!
//! let profile = PreferenceProfile::build(&liked, &disliked);
//! let scorer = RankWeightScorer::new();
//! let best = untouched
//!     .iter()
//!     .max_by_key(|m| scorer.score(m, &profile));
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod profile;
pub mod scoring;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use profile::{PreferenceProfile, RankList};
pub use scoring::{RankWeightScorer, ScoreBreakdown, Scorer};

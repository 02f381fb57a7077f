//! Core traits for the candidate filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to narrow the untouched pool before ranking.

use crate::profile::PreferenceProfile;
use anyhow::Result;
use data_loader::MovieRecord;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - Filters borrow the candidate records from the pool; they never clone them
/// - Filters must keep the relative order of the candidates they retain,
///   because ranking ties are broken by pool order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter, in pool order
    /// * `profile` - Preference profile built from the current histories
    ///
    /// # Returns
    /// * `Ok(Vec<&MovieRecord>)` - The retained candidates, order preserved
    /// * `Err` - If filtering fails
    fn apply<'a>(
        &self,
        candidates: Vec<&'a MovieRecord>,
        profile: &PreferenceProfile,
    ) -> Result<Vec<&'a MovieRecord>>;
}

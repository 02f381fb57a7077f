//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::filters::{Attribute, DislikedAttributeFilter};
use crate::profile::PreferenceProfile;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::MovieRecord;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DislikedAttributeFilter::new(Attribute::Genre))
///     .add_filter(DislikedAttributeFilter::new(Attribute::Director));
///
/// let narrowed = pipeline.apply_or_fallback(untouched.iter().collect(), &profile)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Pipeline that drops anything sharing a genre, director or actor
    /// with the disliked history.
    pub fn avoid_disliked() -> Self {
        Self::new()
            .add_filter(DislikedAttributeFilter::new(Attribute::Genre))
            .add_filter(DislikedAttributeFilter::new(Attribute::Director))
            .add_filter(DislikedAttributeFilter::new(Attribute::Cast))
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    pub fn apply<'a>(
        &self,
        candidates: Vec<&'a MovieRecord>,
        profile: &PreferenceProfile,
    ) -> Result<Vec<&'a MovieRecord>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, profile)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }

    /// Like [`FilterPipeline::apply`], but hands back the unfiltered
    /// candidates when the filters would leave nothing.
    pub fn apply_or_fallback<'a>(
        &self,
        candidates: Vec<&'a MovieRecord>,
        profile: &PreferenceProfile,
    ) -> Result<Vec<&'a MovieRecord>> {
        if candidates.is_empty() || self.filters.is_empty() {
            return Ok(candidates);
        }
        let filtered = self.apply(candidates.clone(), profile)?;
        if filtered.is_empty() {
            tracing::debug!(
                "Filters removed all {} candidates, falling back to unfiltered pool",
                candidates.len()
            );
            return Ok(candidates);
        }
        Ok(filtered)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

//! # Movie Pools
//!
//! Owns the five pools that track every movie's status:
//! - `all`: every record ever ingested, append-only, arrival order
//! - `suggested`: the fixed-capacity window shown to the user
//! - `liked` / `disliked`: append-only feedback histories
//! - `untouched`: `all` minus everything suggested or rated
//!
//! `untouched` is derived state. Every mutating method recomputes it before
//! returning, so readers always see it consistent with the other pools.

use std::collections::HashSet;

use data_loader::{MovieId, MovieRecord, Verdict};

use crate::error::{PoolError, Result};

/// Default number of slots in the suggested window
pub const DEFAULT_CAPACITY: usize = 10;

/// The slot lookup in [`MoviePools::replace_slot`] found no such id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotNotFound(pub MovieId);

#[derive(Debug, Clone)]
pub struct MoviePools {
    capacity: usize,
    all: Vec<MovieRecord>,
    all_ids: HashSet<MovieId>,
    suggested: Vec<MovieRecord>,
    liked: Vec<MovieRecord>,
    disliked: Vec<MovieRecord>,
    rated_ids: HashSet<MovieId>,
    untouched: Vec<MovieRecord>,
}

impl MoviePools {
    /// Create empty pools with a suggested window of `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            all: Vec::new(),
            all_ids: HashSet::new(),
            suggested: Vec::with_capacity(capacity),
            liked: Vec::new(),
            disliked: Vec::new(),
            rated_ids: HashSet::new(),
            untouched: Vec::new(),
        }
    }

    // Readers

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn all(&self) -> &[MovieRecord] {
        &self.all
    }

    pub fn suggested(&self) -> &[MovieRecord] {
        &self.suggested
    }

    pub fn liked(&self) -> &[MovieRecord] {
        &self.liked
    }

    pub fn disliked(&self) -> &[MovieRecord] {
        &self.disliked
    }

    pub fn untouched(&self) -> &[MovieRecord] {
        &self.untouched
    }

    pub fn get(&self, id: MovieId) -> Option<&MovieRecord> {
        if !self.all_ids.contains(&id) {
            return None;
        }
        self.all.iter().find(|m| m.id == id)
    }

    pub fn is_suggested(&self, id: MovieId) -> bool {
        self.suggested.iter().any(|m| m.id == id)
    }

    pub fn is_rated(&self, id: MovieId) -> bool {
        self.rated_ids.contains(&id)
    }

    /// Number of movies that have received a verdict
    pub fn rated_count(&self) -> usize {
        self.liked.len() + self.disliked.len()
    }

    /// Open slots in the suggested window
    pub fn vacancies(&self) -> usize {
        self.capacity.saturating_sub(self.suggested.len())
    }

    // Mutators

    /// Append records whose id is not already known.
    ///
    /// Arrival order is preserved and duplicates (against earlier batches
    /// or within this one) are dropped. `suggested` is left alone.
    ///
    /// Returns the number of records added.
    pub fn ingest<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = MovieRecord>,
    {
        let before = self.all.len();
        for record in batch {
            if self.all_ids.insert(record.id) {
                self.all.push(record);
            }
        }
        let added = self.all.len() - before;
        self.recompute_untouched();
        added
    }

    /// Fill an empty window with the first `capacity` unrated records of
    /// `all`.
    ///
    /// Does nothing while the window holds anything; a window that has only
    /// shrunk is topped up by feedback instead. Returns whether the window
    /// was filled by this call.
    pub fn initialize_suggestions(&mut self) -> bool {
        if !self.suggested.is_empty() {
            return false;
        }
        self.suggested = self
            .all
            .iter()
            .filter(|m| !self.rated_ids.contains(&m.id))
            .take(self.capacity)
            .cloned()
            .collect();
        self.recompute_untouched();
        !self.suggested.is_empty()
    }

    /// Rebuild `untouched` from the other pools, keeping `all` order.
    pub fn recompute_untouched(&mut self) {
        let shown: HashSet<MovieId> = self.suggested.iter().map(|m| m.id).collect();
        self.untouched = self
            .all
            .iter()
            .filter(|m| !shown.contains(&m.id) && !self.rated_ids.contains(&m.id))
            .cloned()
            .collect();
    }

    /// Put `record` into the slot currently holding `old_id`.
    pub fn replace_slot(
        &mut self,
        old_id: MovieId,
        record: MovieRecord,
    ) -> std::result::Result<(), SlotNotFound> {
        let slot = self
            .suggested
            .iter()
            .position(|m| m.id == old_id)
            .ok_or(SlotNotFound(old_id))?;
        self.suggested[slot] = record;
        self.recompute_untouched();
        Ok(())
    }

    /// Remove the slot holding `id`, shrinking the window by one.
    pub fn vacate_slot(&mut self, id: MovieId) -> std::result::Result<(), SlotNotFound> {
        let slot = self
            .suggested
            .iter()
            .position(|m| m.id == id)
            .ok_or(SlotNotFound(id))?;
        self.suggested.remove(slot);
        self.recompute_untouched();
        Ok(())
    }

    /// Append records to the end of the window until it is full.
    ///
    /// Records already shown or rated are skipped. Returns the ids placed.
    pub fn fill_vacancies<I>(&mut self, records: I) -> Vec<MovieId>
    where
        I: IntoIterator<Item = MovieRecord>,
    {
        let mut placed = Vec::new();
        for record in records {
            if self.vacancies() == 0 {
                break;
            }
            if self.is_suggested(record.id) || self.is_rated(record.id) {
                continue;
            }
            placed.push(record.id);
            self.suggested.push(record);
        }
        if !placed.is_empty() {
            self.recompute_untouched();
        }
        placed
    }

    /// Append the record for `id` to the history for `verdict`.
    ///
    /// The slot holding the movie (if any) is not touched here; the
    /// selector decides what replaces it.
    pub fn record_feedback(&mut self, id: MovieId, verdict: Verdict) -> Result<MovieRecord> {
        let record = self.get(id).cloned().ok_or(PoolError::UnknownMovie(id))?;
        if self.rated_ids.contains(&id) {
            return Err(PoolError::AlreadyRated(id));
        }

        self.rated_ids.insert(id);
        match verdict {
            Verdict::Liked => self.liked.push(record.clone()),
            Verdict::Disliked => self.disliked.push(record.clone()),
        }
        self.recompute_untouched();
        Ok(record)
    }
}

impl Default for MoviePools {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

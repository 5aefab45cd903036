#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Bounded visit history with a pinnable comparison baseline.
//!
//! Keeps the 10 most recently viewed units, most-recent-first and
//! unique by id. One entry may be pinned as the baseline for trend
//! arrows; without a pin the most recent entry is the baseline, so the
//! newest entry naturally shows no trend against itself.

use census_map_census_models::{HistoryEntry, TrendComparison};
use census_map_geography_models::GeoUnitId;

/// Maximum number of retained history entries.
pub const MAX_ENTRIES: usize = 10;

/// Session-scoped visit history. Created empty; mutated only through
/// [`record_visit`](Self::record_visit) and
/// [`toggle_pin`](Self::toggle_pin); never persisted across sessions.
#[derive(Debug, Default, Clone)]
pub struct History {
    /// Most-recent-first, unique by id.
    entries: Vec<HistoryEntry>,
    /// Pinned baseline id, if any.
    pinned: Option<GeoUnitId>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit: any existing entry with the same id is removed,
    /// the new entry goes to the front, and the list is truncated to
    /// [`MAX_ENTRIES`]. Bounded n, so the linear scan is fine.
    pub fn record_visit(&mut self, entry: HistoryEntry) {
        self.entries.retain(|existing| existing.id != entry.id);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);

        // A pinned unit that just fell off the end loses its pin.
        if let Some(pinned) = &self.pinned
            && !self.entries.iter().any(|existing| &existing.id == pinned)
        {
            log::debug!("pinned unit {pinned} dropped out of history; unpinning");
            self.pinned = None;
        }
    }

    /// Toggles the pinned baseline: pinning the already-pinned id
    /// unpins it; pinning an id not present in history is a no-op.
    pub fn toggle_pin(&mut self, id: &GeoUnitId) {
        if self.pinned.as_ref() == Some(id) {
            self.pinned = None;
            return;
        }
        if self.entries.iter().any(|entry| &entry.id == id) {
            self.pinned = Some(id.clone());
        } else {
            log::debug!("ignoring pin for {id}: not in history");
        }
    }

    /// The pinned baseline id, if any.
    #[must_use]
    pub const fn pinned(&self) -> Option<&GeoUnitId> {
        self.pinned.as_ref()
    }

    /// Entries in chronological (most-recent-first) order, ignoring
    /// the pin.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries in render order: the pinned entry first (if any), the
    /// rest keeping their most-recent-first relative order. A stable
    /// partition — toggling the pin never reorders the unpinned tail.
    #[must_use]
    pub fn ordered(&self) -> Vec<&HistoryEntry> {
        let mut ordered: Vec<&HistoryEntry> = Vec::with_capacity(self.entries.len());
        ordered.extend(
            self.entries
                .iter()
                .filter(|entry| Some(&entry.id) == self.pinned.as_ref()),
        );
        ordered.extend(
            self.entries
                .iter()
                .filter(|entry| Some(&entry.id) != self.pinned.as_ref()),
        );
        ordered
    }

    /// The baseline entry trends compare against: the pinned entry if
    /// set, otherwise the most recent entry.
    #[must_use]
    pub fn resolved_baseline(&self) -> Option<&HistoryEntry> {
        if let Some(pinned) = &self.pinned {
            self.entries.iter().find(|entry| &entry.id == pinned)
        } else {
            self.entries.first()
        }
    }

    /// Render-ordered entries paired with their trend against the
    /// resolved baseline. The baseline entry itself pairs with `None`
    /// (self-comparison shows no trend).
    #[must_use]
    pub fn trends(&self) -> Vec<(&HistoryEntry, Option<TrendComparison>)> {
        let baseline = self.resolved_baseline();
        self.ordered()
            .into_iter()
            .map(|entry| (entry, census_map_analytics::compare_to_baseline(entry, baseline)))
            .collect()
    }
}

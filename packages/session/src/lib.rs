#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Drill-down session orchestration.
//!
//! A [`Session`] owns all shared mutable state — navigation, the
//! record cache, visit history, and the in-flight fetch set — with the
//! session as the single writer. User selections become operations
//! that return [`SessionEvent`]s for the rendering layer; no event is
//! ever pushed from anywhere else.
//!
//! Everything runs on one control thread; fetches are the only
//! suspension points. A fetch in flight never blocks navigation, a
//! second fetch for the same unit is dropped by the in-flight guard,
//! and a fetch that completes after the user moved on is discarded by
//! the staleness check.

use std::collections::HashSet;

use census_map_cache::StatsCache;
use census_map_census::fetch::AcsClient;
use census_map_census::local::LocalDataset;
use census_map_census::CensusError;
use census_map_census_models::{DemographicRecord, HistoryEntry};
use census_map_geography::index::CountyIndex;
use census_map_geography::navigation::Navigation;
use census_map_geography_models::{CountyFeature, GeoUnitId, Level};
use census_map_history::History;

/// The result of asking for a unit's record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// The record is available (from local data, cache, or a fresh
    /// fetch).
    Ready(DemographicRecord),
    /// No record is available for this unit; the same selection can be
    /// retried.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Events emitted to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The navigation level or visible set changed.
    NavigationChanged {
        /// New active level.
        level: Level,
        /// Counties now visible, in input-geography order.
        visible: Vec<CountyFeature>,
    },
    /// A requested record resolved (successfully or not).
    RecordReady {
        /// The unit the request was for.
        id: GeoUnitId,
        /// The record or the failure reason.
        outcome: RecordOutcome,
    },
    /// The visit history or pin changed.
    HistoryChanged {
        /// Entries in render order (pinned first).
        entries: Vec<HistoryEntry>,
        /// The pinned baseline id, if any.
        pinned: Option<GeoUnitId>,
    },
}

/// Permission to fetch a unit, handed out by
/// [`Session::begin_fetch`]. Exists so the in-flight guard is taken
/// before the suspension point and released in
/// [`Session::complete_fetch`].
#[derive(Debug)]
pub struct FetchTicket {
    id: GeoUnitId,
}

impl FetchTicket {
    /// The unit this ticket authorizes.
    #[must_use]
    pub const fn id(&self) -> &GeoUnitId {
        &self.id
    }
}

/// One user's drill-down session.
#[derive(Debug)]
pub struct Session {
    geography: CountyIndex,
    local: LocalDataset,
    client: AcsClient,
    navigation: Navigation,
    cache: StatsCache,
    history: History,
    /// Units with a fetch outstanding.
    in_flight: HashSet<GeoUnitId>,
    /// The unit the user most recently asked for; fetch results for
    /// any other unit are stale.
    unit_of_interest: Option<GeoUnitId>,
}

impl Session {
    /// Creates a fresh session at `Overview` with empty cache and
    /// history.
    #[must_use]
    pub fn new(geography: CountyIndex, local: LocalDataset, client: AcsClient) -> Self {
        Self {
            geography,
            local,
            client,
            navigation: Navigation::new(),
            cache: StatsCache::new(),
            history: History::new(),
            in_flight: HashSet::new(),
            unit_of_interest: None,
        }
    }

    /// The navigation machine (read-only).
    #[must_use]
    pub const fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// The visit history (read-only).
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The record cache (read-only).
    #[must_use]
    pub const fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// The input geography.
    #[must_use]
    pub const fn geography(&self) -> &CountyIndex {
        &self.geography
    }

    /// Handles a state selection (or toggle / switch).
    pub fn select_state(&mut self, id: &GeoUnitId) -> Vec<SessionEvent> {
        let change = self.navigation.select_state(id, &self.geography);
        vec![SessionEvent::NavigationChanged {
            level: change.level,
            visible: change.visible,
        }]
    }

    /// Handles escape/back to the overview.
    pub fn back(&mut self) -> Vec<SessionEvent> {
        let change = self.navigation.back();
        vec![SessionEvent::NavigationChanged {
            level: change.level,
            visible: change.visible,
        }]
    }

    /// Handles a county selection end-to-end: local dataset, then
    /// cache, then a live fetch.
    ///
    /// This is the convenience path for callers that can await in
    /// place; callers juggling multiple concurrent selections drive
    /// [`begin_fetch`](Self::begin_fetch) /
    /// [`complete_fetch`](Self::complete_fetch) themselves.
    pub async fn select_county(&mut self, id: &GeoUnitId) -> Vec<SessionEvent> {
        if let Some(events) = self.resolve_without_fetch(id) {
            return events;
        }

        let Some(ticket) = self.begin_fetch(id) else {
            return Vec::new();
        };
        let result = self.client.fetch_county(id).await;
        self.complete_fetch(ticket, result)
    }

    /// Resolves a county selection from the local dataset or cache,
    /// without touching the network. `None` means a fetch is needed.
    pub fn resolve_without_fetch(&mut self, id: &GeoUnitId) -> Option<Vec<SessionEvent>> {
        self.unit_of_interest = Some(id.clone());

        if self.cache.get(id).is_none()
            && let Some(record) = self.local.get(id)
        {
            log::debug!("{id}: using local dataset record");
            let record = record.clone();
            self.cache.put(id.clone(), record);
        }

        let record = self.cache.get(id)?.clone();
        Some(self.finish_record(id.clone(), record))
    }

    /// Takes the in-flight guard for a unit. `None` when a fetch for
    /// the same unit is already outstanding — the duplicate selection
    /// (double-click) is dropped.
    pub fn begin_fetch(&mut self, id: &GeoUnitId) -> Option<FetchTicket> {
        self.unit_of_interest = Some(id.clone());
        if !self.in_flight.insert(id.clone()) {
            log::debug!("{id}: fetch already in flight; dropping duplicate request");
            return None;
        }
        Some(FetchTicket { id: id.clone() })
    }

    /// Applies a completed fetch: releases the in-flight guard,
    /// discards stale results, caches the record, and records the
    /// visit.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<DemographicRecord, CensusError>,
    ) -> Vec<SessionEvent> {
        let FetchTicket { id } = ticket;
        self.in_flight.remove(&id);

        if self.unit_of_interest.as_ref() != Some(&id) {
            log::debug!("{id}: discarding stale fetch result");
            return Vec::new();
        }

        match result {
            Ok(record) => {
                self.cache.put(id.clone(), record.clone());
                self.finish_record(id, record)
            }
            Err(error) => {
                log::warn!("{id}: fetch failed: {error}");
                vec![SessionEvent::RecordReady {
                    id,
                    outcome: RecordOutcome::Failed {
                        reason: error.to_string(),
                    },
                }]
            }
        }
    }

    /// Toggles the history pin and emits the updated history.
    pub fn toggle_pin(&mut self, id: &GeoUnitId) -> Vec<SessionEvent> {
        self.history.toggle_pin(id);
        vec![self.history_event()]
    }

    fn finish_record(&mut self, id: GeoUnitId, record: DemographicRecord) -> Vec<SessionEvent> {
        self.history
            .record_visit(HistoryEntry::snapshot(id.clone(), &record));
        vec![
            SessionEvent::RecordReady {
                id,
                outcome: RecordOutcome::Ready(record),
            },
            self.history_event(),
        ]
    }

    fn history_event(&self) -> SessionEvent {
        SessionEvent::HistoryChanged {
            entries: self.history.ordered().into_iter().cloned().collect(),
            pinned: self.history.pinned().cloned(),
        }
    }
}

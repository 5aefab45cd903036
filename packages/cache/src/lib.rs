#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory per-unit statistics cache.
//!
//! Memoizes computed [`DemographicRecord`]s by [`GeoUnitId`] so a unit
//! is fetched at most once per session. Keys are normalized ids, so
//! every caller formatting of the same unit shares one slot. Records
//! are replaced wholesale on re-fetch, never mutated in place.

use std::collections::HashMap;

use census_map_census_models::DemographicRecord;
use census_map_geography_models::GeoUnitId;

/// Maximum number of cached units. Sits above the 3,144 US counties,
/// so the bound is never hit by organic drill-down; it exists to keep
/// memory growth explicit if the cache is embedded in a long-lived
/// process.
pub const CACHE_CAPACITY: usize = 3250;

/// Session-scoped record cache. No eviction: at capacity, new keys are
/// rejected with a warning (existing keys can still be replaced).
#[derive(Debug, Default)]
pub struct StatsCache {
    records: HashMap<GeoUnitId, DemographicRecord>,
}

impl StatsCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the record for a unit.
    #[must_use]
    pub fn get(&self, id: &GeoUnitId) -> Option<&DemographicRecord> {
        self.records.get(id)
    }

    /// Stores (or replaces) the record for a unit. Returns whether the
    /// record was stored; a new key is rejected once the cache holds
    /// [`CACHE_CAPACITY`] records.
    pub fn put(&mut self, id: GeoUnitId, record: DemographicRecord) -> bool {
        if self.records.len() >= CACHE_CAPACITY && !self.records.contains_key(&id) {
            log::warn!("stats cache at capacity ({CACHE_CAPACITY}); dropping record for {id}");
            return false;
        }
        self.records.insert(id, record);
        true
    }

    /// Number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use census_map_census_models::Provenance;

    use super::*;

    fn record(name: &str) -> DemographicRecord {
        DemographicRecord {
            name: name.to_string(),
            population: Some(100),
            median_age: None,
            median_income: None,
            age_buckets: None,
            ethnicity: None,
            income_brackets: None,
            total_households: None,
            households: None,
            provenance: Provenance::Local,
        }
    }

    #[test]
    fn get_miss_then_hit() {
        let mut cache = StatsCache::new();
        let id = GeoUnitId::parse("06037").unwrap();
        assert!(cache.get(&id).is_none());
        assert!(cache.put(id.clone(), record("LA")));
        assert_eq!(cache.get(&id).unwrap().name, "LA");
    }

    #[test]
    fn normalized_ids_share_a_slot() {
        let mut cache = StatsCache::new();
        cache.put(GeoUnitId::parse("6037").unwrap(), record("LA"));
        let padded = GeoUnitId::parse("06037").unwrap();
        assert_eq!(cache.get(&padded).unwrap().name, "LA");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_replaces_existing_record() {
        let mut cache = StatsCache::new();
        let id = GeoUnitId::parse("06037").unwrap();
        cache.put(id.clone(), record("old"));
        cache.put(id.clone(), record("new"));
        assert_eq!(cache.get(&id).unwrap().name, "new");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn rejects_new_keys_at_capacity() {
        let mut cache = StatsCache::new();
        for state in 0..50u32 {
            for county in 0..65u32 {
                cache.put(GeoUnitId::county(state, county).unwrap(), record("x"));
            }
        }
        assert_eq!(cache.len(), CACHE_CAPACITY);

        let overflow = GeoUnitId::county(56, 999).unwrap();
        assert!(!cache.put(overflow.clone(), record("overflow")));
        assert!(cache.get(&overflow).is_none());

        // Existing keys can still be replaced at capacity.
        let existing = GeoUnitId::county(0, 0).unwrap();
        assert!(cache.put(existing.clone(), record("replaced")));
        assert_eq!(cache.get(&existing).unwrap().name, "replaced");
    }
}

//! The drill-down navigation state machine.
//!
//! Two levels: `Overview` (all states, no counties visible) and
//! `StateSelected` (one state's counties visible). Loading is not a
//! navigation state — fetches are tracked per unit by the session so
//! navigation stays responsive while data loads.
//!
//! Invariant, enforced by every transition: the visible set is
//! non-empty iff a state is selected.

use census_map_geography_models::{CountyFeature, GeoUnitId, Level};

use crate::index::CountyIndex;

/// The outcome of a transition, emitted to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationChange {
    /// The new active level.
    pub level: Level,
    /// The counties now visible, in input-geography order. Empty at
    /// `Overview`.
    pub visible: Vec<CountyFeature>,
}

/// Drill-down navigation state. Starts at `Overview`; cycles for the
/// life of the session (no terminal state).
#[derive(Debug, Clone)]
pub struct Navigation {
    level: Level,
    visible: Vec<CountyFeature>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigation {
    /// Creates a machine at `Overview` with nothing visible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: Level::Overview,
            visible: Vec::new(),
        }
    }

    /// The active level.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// The currently visible counties.
    #[must_use]
    pub fn visible(&self) -> &[CountyFeature] {
        &self.visible
    }

    /// Selects a state.
    ///
    /// - From `Overview`: drills into the state.
    /// - Re-selecting the already-active state: toggles back to
    ///   `Overview`.
    /// - Selecting a different state: switches directly, no pass
    ///   through `Overview`.
    ///
    /// A state with no counties in the geography stays at (or returns
    /// to) `Overview` — entering it would leave the visible set empty
    /// while a state is selected.
    pub fn select_state(&mut self, state: &GeoUnitId, geography: &CountyIndex) -> NavigationChange {
        let state = state.parent_state();

        if self.level == Level::StateSelected(state.clone()) {
            log::debug!("re-selected {state}; toggling back to overview");
            return self.leave();
        }

        let counties = geography.counties_in_state(&state);
        if counties.is_empty() {
            log::warn!("state {state} has no counties in the input geography");
            return self.leave();
        }

        self.level = Level::StateSelected(state);
        self.visible = counties;
        NavigationChange {
            level: self.level.clone(),
            visible: self.visible.clone(),
        }
    }

    /// Returns to `Overview` (escape / back). A no-op when already
    /// there.
    pub fn back(&mut self) -> NavigationChange {
        self.leave()
    }

    fn leave(&mut self) -> NavigationChange {
        self.level = Level::Overview;
        self.visible.clear();
        NavigationChange {
            level: Level::Overview,
            visible: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geography() -> CountyIndex {
        let county = |id: &str, name: &str| CountyFeature {
            id: GeoUnitId::parse(id).unwrap(),
            name: name.to_string(),
        };
        CountyIndex::from_features(vec![
            county("06037", "Los Angeles"),
            county("06059", "Orange"),
            county("48201", "Harris"),
            county("48113", "Dallas"),
        ])
    }

    fn state(id: &str) -> GeoUnitId {
        GeoUnitId::parse(id).unwrap()
    }

    #[test]
    fn starts_at_overview() {
        let navigation = Navigation::new();
        assert_eq!(navigation.level(), &Level::Overview);
        assert!(navigation.visible().is_empty());
    }

    #[test]
    fn select_drills_into_state() {
        let geography = geography();
        let mut navigation = Navigation::new();

        let change = navigation.select_state(&state("06"), &geography);
        assert_eq!(change.level, Level::StateSelected(state("06")));
        let names: Vec<&str> = change.visible.iter().map(|county| county.name.as_str()).collect();
        assert_eq!(names, vec!["Los Angeles", "Orange"]);
    }

    #[test]
    fn reselect_toggles_back_to_overview() {
        let geography = geography();
        let mut navigation = Navigation::new();

        navigation.select_state(&state("06"), &geography);
        let change = navigation.select_state(&state("06"), &geography);

        assert_eq!(change.level, Level::Overview);
        assert!(change.visible.is_empty());
        assert!(navigation.visible().is_empty());
    }

    #[test]
    fn switching_states_skips_overview() {
        let geography = geography();
        let mut navigation = Navigation::new();

        navigation.select_state(&state("06"), &geography);
        let change = navigation.select_state(&state("48"), &geography);

        assert_eq!(change.level, Level::StateSelected(state("48")));
        let names: Vec<&str> = change.visible.iter().map(|county| county.name.as_str()).collect();
        assert_eq!(names, vec!["Harris", "Dallas"]);
    }

    #[test]
    fn back_returns_to_overview() {
        let geography = geography();
        let mut navigation = Navigation::new();

        navigation.select_state(&state("06"), &geography);
        let change = navigation.back();
        assert_eq!(change.level, Level::Overview);
        assert!(change.visible.is_empty());

        // Back at overview is a no-op.
        let change = navigation.back();
        assert_eq!(change.level, Level::Overview);
    }

    #[test]
    fn county_id_selects_its_parent_state() {
        let geography = geography();
        let mut navigation = Navigation::new();

        let change = navigation.select_state(&state("06037"), &geography);
        assert_eq!(change.level, Level::StateSelected(state("06")));
    }

    #[test]
    fn empty_state_stays_at_overview() {
        let geography = geography();
        let mut navigation = Navigation::new();

        let change = navigation.select_state(&state("56"), &geography);
        assert_eq!(change.level, Level::Overview);
        assert!(change.visible.is_empty());
    }

    #[test]
    fn visible_set_consistent_with_level() {
        let geography = geography();
        let mut navigation = Navigation::new();

        for id in ["06", "48", "48", "06", "56"] {
            navigation.select_state(&state(id), &geography);
            match navigation.level() {
                Level::Overview => assert!(navigation.visible().is_empty()),
                Level::StateSelected(_) => assert!(!navigation.visible().is_empty()),
            }
        }
    }
}

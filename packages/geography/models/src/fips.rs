//! US state FIPS code table.
//!
//! One row per state (50 states + DC) mapping the two-digit FIPS code
//! to the postal abbreviation and full name. The overview level of the
//! navigation state machine lists exactly these units.

/// A single state entry in the FIPS table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEntry {
    /// Two-digit FIPS code.
    pub fips: &'static str,
    /// Two-letter postal abbreviation.
    pub abbr: &'static str,
    /// Full state name.
    pub name: &'static str,
}

/// The 50 US states + DC, ordered by FIPS code.
pub const STATES: &[StateEntry] = &[
    StateEntry { fips: "01", abbr: "AL", name: "Alabama" },
    StateEntry { fips: "02", abbr: "AK", name: "Alaska" },
    StateEntry { fips: "04", abbr: "AZ", name: "Arizona" },
    StateEntry { fips: "05", abbr: "AR", name: "Arkansas" },
    StateEntry { fips: "06", abbr: "CA", name: "California" },
    StateEntry { fips: "08", abbr: "CO", name: "Colorado" },
    StateEntry { fips: "09", abbr: "CT", name: "Connecticut" },
    StateEntry { fips: "10", abbr: "DE", name: "Delaware" },
    StateEntry { fips: "11", abbr: "DC", name: "District of Columbia" },
    StateEntry { fips: "12", abbr: "FL", name: "Florida" },
    StateEntry { fips: "13", abbr: "GA", name: "Georgia" },
    StateEntry { fips: "15", abbr: "HI", name: "Hawaii" },
    StateEntry { fips: "16", abbr: "ID", name: "Idaho" },
    StateEntry { fips: "17", abbr: "IL", name: "Illinois" },
    StateEntry { fips: "18", abbr: "IN", name: "Indiana" },
    StateEntry { fips: "19", abbr: "IA", name: "Iowa" },
    StateEntry { fips: "20", abbr: "KS", name: "Kansas" },
    StateEntry { fips: "21", abbr: "KY", name: "Kentucky" },
    StateEntry { fips: "22", abbr: "LA", name: "Louisiana" },
    StateEntry { fips: "23", abbr: "ME", name: "Maine" },
    StateEntry { fips: "24", abbr: "MD", name: "Maryland" },
    StateEntry { fips: "25", abbr: "MA", name: "Massachusetts" },
    StateEntry { fips: "26", abbr: "MI", name: "Michigan" },
    StateEntry { fips: "27", abbr: "MN", name: "Minnesota" },
    StateEntry { fips: "28", abbr: "MS", name: "Mississippi" },
    StateEntry { fips: "29", abbr: "MO", name: "Missouri" },
    StateEntry { fips: "30", abbr: "MT", name: "Montana" },
    StateEntry { fips: "31", abbr: "NE", name: "Nebraska" },
    StateEntry { fips: "32", abbr: "NV", name: "Nevada" },
    StateEntry { fips: "33", abbr: "NH", name: "New Hampshire" },
    StateEntry { fips: "34", abbr: "NJ", name: "New Jersey" },
    StateEntry { fips: "35", abbr: "NM", name: "New Mexico" },
    StateEntry { fips: "36", abbr: "NY", name: "New York" },
    StateEntry { fips: "37", abbr: "NC", name: "North Carolina" },
    StateEntry { fips: "38", abbr: "ND", name: "North Dakota" },
    StateEntry { fips: "39", abbr: "OH", name: "Ohio" },
    StateEntry { fips: "40", abbr: "OK", name: "Oklahoma" },
    StateEntry { fips: "41", abbr: "OR", name: "Oregon" },
    StateEntry { fips: "42", abbr: "PA", name: "Pennsylvania" },
    StateEntry { fips: "44", abbr: "RI", name: "Rhode Island" },
    StateEntry { fips: "45", abbr: "SC", name: "South Carolina" },
    StateEntry { fips: "46", abbr: "SD", name: "South Dakota" },
    StateEntry { fips: "47", abbr: "TN", name: "Tennessee" },
    StateEntry { fips: "48", abbr: "TX", name: "Texas" },
    StateEntry { fips: "49", abbr: "UT", name: "Utah" },
    StateEntry { fips: "50", abbr: "VT", name: "Vermont" },
    StateEntry { fips: "51", abbr: "VA", name: "Virginia" },
    StateEntry { fips: "53", abbr: "WA", name: "Washington" },
    StateEntry { fips: "54", abbr: "WV", name: "West Virginia" },
    StateEntry { fips: "55", abbr: "WI", name: "Wisconsin" },
    StateEntry { fips: "56", abbr: "WY", name: "Wyoming" },
];

/// Looks up the table entry for a two-digit FIPS code.
#[must_use]
pub fn lookup(fips: &str) -> Option<&'static StateEntry> {
    STATES.iter().find(|entry| entry.fips == fips)
}

/// Maps a two-digit FIPS code to the state abbreviation.
///
/// Returns `"??"` for unrecognized codes.
#[must_use]
pub fn state_abbr(fips: &str) -> &'static str {
    lookup(fips).map_or("??", |entry| entry.abbr)
}

/// Maps a two-digit FIPS code to the full state name.
///
/// Returns `"Unknown"` for unrecognized codes.
#[must_use]
pub fn state_name(fips: &str) -> &'static str {
    lookup(fips).map_or("Unknown", |entry| entry.name)
}

/// Maps a two-letter abbreviation (case-insensitive) to the FIPS code.
#[must_use]
pub fn abbr_to_fips(abbr: &str) -> Option<&'static str> {
    let upper = abbr.to_uppercase();
    STATES
        .iter()
        .find(|entry| entry.abbr == upper)
        .map(|entry| entry.fips)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_fifty_states_plus_dc() {
        assert_eq!(STATES.len(), 51);
    }

    #[test]
    fn table_sorted_by_fips() {
        for pair in STATES.windows(2) {
            assert!(pair[0].fips < pair[1].fips);
        }
    }

    #[test]
    fn abbr_roundtrip() {
        for entry in STATES {
            assert_eq!(abbr_to_fips(entry.abbr), Some(entry.fips));
        }
    }

    #[test]
    fn unknown_codes_degrade() {
        assert_eq!(state_abbr("99"), "??");
        assert_eq!(state_name("99"), "Unknown");
        assert_eq!(abbr_to_fips("XX"), None);
    }

    #[test]
    fn case_insensitive_abbr() {
        assert_eq!(abbr_to_fips("ca"), Some("06"));
        assert_eq!(abbr_to_fips("Ca"), Some("06"));
    }
}

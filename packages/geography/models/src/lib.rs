#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic unit identifiers and navigation level types.
//!
//! A [`GeoUnitId`] is the normalized FIPS-based identifier used as the
//! key for every lookup in the system: two digits for a state, five
//! digits (state + county) for a county. Identifiers are normalized at
//! construction so that `"6"` / `"06"` / `6` all name the same unit.

pub mod fips;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a [`GeoUnitId`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeoUnitIdError {
    /// The input was not 2 or 5 digits after trimming.
    #[error("Invalid geographic id {input:?}: expected 2-digit state or 5-digit county code")]
    InvalidFormat {
        /// The offending input.
        input: String,
    },
    /// A numeric part was too large to zero-pad into its field width.
    #[error("Numeric part {value} does not fit in {width} digits")]
    OutOfRange {
        /// The offending value.
        value: u32,
        /// The field width it must fit in.
        width: usize,
    },
}

/// A normalized geographic unit identifier.
///
/// Either a 2-digit state FIPS code (e.g. `"06"`) or a 5-digit
/// state+county FIPS code (e.g. `"06037"`). The inner string is always
/// zero-padded to exactly 2 or 5 digits, so two ids naming the same
/// unit always compare equal and hash identically regardless of how a
/// caller formatted the input. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GeoUnitId(String);

impl GeoUnitId {
    /// Constructs a state-level id from a numeric FIPS code.
    ///
    /// # Errors
    ///
    /// Returns [`GeoUnitIdError::OutOfRange`] if `state` exceeds two
    /// digits.
    pub fn state(state: u32) -> Result<Self, GeoUnitIdError> {
        if state > 99 {
            return Err(GeoUnitIdError::OutOfRange {
                value: state,
                width: 2,
            });
        }
        Ok(Self(format!("{state:02}")))
    }

    /// Constructs a county-level id from numeric state and county FIPS
    /// codes, zero-padding each to its fixed width.
    ///
    /// # Errors
    ///
    /// Returns [`GeoUnitIdError::OutOfRange`] if either part exceeds
    /// its field width (2 digits for state, 3 for county).
    pub fn county(state: u32, county: u32) -> Result<Self, GeoUnitIdError> {
        if state > 99 {
            return Err(GeoUnitIdError::OutOfRange {
                value: state,
                width: 2,
            });
        }
        if county > 999 {
            return Err(GeoUnitIdError::OutOfRange {
                value: county,
                width: 3,
            });
        }
        Ok(Self(format!("{state:02}{county:03}")))
    }

    /// Parses an id from a string, normalizing unpadded numeric input.
    ///
    /// Accepts 1-2 digit input as a state id and 4-5 digit input as a
    /// county id (a 4-digit county id is a 1-digit state code that lost
    /// its leading zero).
    ///
    /// # Errors
    ///
    /// Returns [`GeoUnitIdError::InvalidFormat`] for non-digit input or
    /// lengths that cannot be normalized to 2 or 5 digits.
    pub fn parse(input: &str) -> Result<Self, GeoUnitIdError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GeoUnitIdError::InvalidFormat {
                input: input.to_string(),
            });
        }
        match trimmed.len() {
            1 | 2 => Ok(Self(format!("{trimmed:0>2}"))),
            4 | 5 => Ok(Self(format!("{trimmed:0>5}"))),
            _ => Err(GeoUnitIdError::InvalidFormat {
                input: input.to_string(),
            }),
        }
    }

    /// The normalized id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 2-digit state FIPS code portion.
    #[must_use]
    pub fn state_fips(&self) -> &str {
        &self.0[..2]
    }

    /// The 3-digit county FIPS code portion, if this is a county id.
    #[must_use]
    pub fn county_fips(&self) -> Option<&str> {
        if self.is_county() {
            Some(&self.0[2..])
        } else {
            None
        }
    }

    /// Whether this id names a county (5 digits) rather than a state.
    #[must_use]
    pub fn is_county(&self) -> bool {
        self.0.len() == 5
    }

    /// The state-level id for this unit (identity for state ids).
    #[must_use]
    pub fn parent_state(&self) -> Self {
        Self(self.0[..2].to_string())
    }
}

impl std::fmt::Display for GeoUnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for GeoUnitId {
    type Err = GeoUnitIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for GeoUnitId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A county polygon feature from the input geography.
///
/// The core only reads the id and name; geometry stays in the rendering
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyFeature {
    /// Normalized county id.
    pub id: GeoUnitId,
    /// Display name (e.g. "Los Angeles County").
    pub name: String,
}

/// The active drill-down level of the navigation state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "level", content = "state")]
pub enum Level {
    /// Nation-wide view: all states shown, no counties visible.
    Overview,
    /// A single state is active; its counties are the visible set.
    StateSelected(GeoUnitId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_id_zero_pads() {
        assert_eq!(GeoUnitId::state(6).unwrap().as_str(), "06");
        assert_eq!(GeoUnitId::state(56).unwrap().as_str(), "56");
    }

    #[test]
    fn county_id_zero_pads_both_parts() {
        let id = GeoUnitId::county(6, 37).unwrap();
        assert_eq!(id.as_str(), "06037");
        assert_eq!(id.state_fips(), "06");
        assert_eq!(id.county_fips(), Some("037"));
    }

    #[test]
    fn parse_normalizes_unpadded_input() {
        assert_eq!(GeoUnitId::parse("6").unwrap().as_str(), "06");
        assert_eq!(GeoUnitId::parse("6037").unwrap().as_str(), "06037");
        assert_eq!(GeoUnitId::parse("06037").unwrap(), GeoUnitId::parse("6037").unwrap());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(GeoUnitId::parse("").is_err());
        assert!(GeoUnitId::parse("abc").is_err());
        assert!(GeoUnitId::parse("123").is_err());
        assert!(GeoUnitId::parse("123456").is_err());
    }

    #[test]
    fn out_of_range_parts() {
        assert!(GeoUnitId::state(100).is_err());
        assert!(GeoUnitId::county(6, 1000).is_err());
    }

    #[test]
    fn parent_state() {
        let county = GeoUnitId::parse("06037").unwrap();
        assert_eq!(county.parent_state().as_str(), "06");
        assert!(!county.parent_state().is_county());
    }
}

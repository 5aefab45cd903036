#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Demographic record and derived breakdown types.
//!
//! A [`DemographicRecord`] is the canonical per-unit result, built
//! either from the bundled local dataset or by parsing a fresh ACS
//! response. Every statistical field is optional: absence is explicit
//! and every consumer must handle it. Records are never mutated after
//! creation — a re-fetch replaces the whole record.

pub mod variables;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A raw tabular row from a statistics query: ordered string cells,
/// positionally aligned with the requested variable list. Cell 0 is
/// always the display name. Ephemeral — consumed by the row parser.
pub type RawRow = Vec<String>;

/// Where a record's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Provenance {
    /// Bundled local dataset.
    Local,
    /// Fetched live from the ACS API.
    Acs,
}

/// Ethnicity/origin counts for one unit, following the 12-variable
/// `B03002` hispanic-or-latino-by-race table. The seven non-hispanic
/// categories plus `hispanic_or_latino` partition `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EthnicityCounts {
    /// Total population in the ethnicity universe.
    pub total: u64,
    /// White alone, not hispanic.
    pub white_alone: u64,
    /// Black alone, not hispanic.
    pub black_alone: u64,
    /// American Indian and Alaska Native alone, not hispanic.
    pub native_american: u64,
    /// Asian alone, not hispanic.
    pub asian_alone: u64,
    /// Native Hawaiian and Pacific Islander alone, not hispanic.
    pub pacific_islander: u64,
    /// Some other race alone, not hispanic.
    pub other_race: u64,
    /// Two races including some other race, not hispanic.
    pub two_races_including_other: u64,
    /// Two races excluding some other race, plus three or more races.
    pub two_races_excluding_other: u64,
    /// Hispanic or latino of any race.
    pub hispanic_or_latino: u64,
}

/// One fine-grained income bracket: households earning below
/// `upper_bound` dollars (open-ended top bracket when `None`) and above
/// the previous bracket's bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBracketCount {
    /// Display label (e.g. "$50,000 to $59,999").
    pub label: String,
    /// Exclusive upper bound in dollars; `None` for the top bracket.
    pub upper_bound: Option<u64>,
    /// Number of households in the bracket.
    pub count: u64,
}

/// Household composition and housing-unit counts for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdCounts {
    /// Total households.
    pub total_households: Option<u64>,
    /// Non-family households.
    pub non_family: Option<u64>,
    /// Single-person (householder living alone) households.
    pub single_person: Option<u64>,
    /// Average household size.
    pub avg_household_size: Option<f64>,
    /// Total housing units.
    pub total_units: Option<u64>,
    /// Units in buildings with 10-19 units.
    pub units_10_to_19: Option<u64>,
    /// Units in buildings with 20-49 units.
    pub units_20_to_49: Option<u64>,
    /// Units in buildings with 50 or more units.
    pub units_50_plus: Option<u64>,
}

/// The canonical per-unit demographic result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicRecord {
    /// Display name (e.g. "Los Angeles County, California").
    pub name: String,
    /// Total population.
    pub population: Option<u64>,
    /// Median age.
    pub median_age: Option<f64>,
    /// Median household income in dollars.
    pub median_income: Option<u64>,
    /// Age-band label → population count. `None` when the age response
    /// was malformed (never partially filled).
    pub age_buckets: Option<BTreeMap<String, u64>>,
    /// Ethnicity counts.
    pub ethnicity: Option<EthnicityCounts>,
    /// Fine-grained income bracket counts.
    pub income_brackets: Option<Vec<IncomeBracketCount>>,
    /// Total households for the income universe.
    pub total_households: Option<u64>,
    /// Household composition counts.
    pub households: Option<HouseholdCounts>,
    /// Data source. Local-dataset JSON may omit it.
    #[serde(default = "Provenance::local")]
    pub provenance: Provenance,
}

impl Provenance {
    const fn local() -> Self {
        Self::Local
    }
}

/// One of the five named generational cohorts, youngest to oldest.
/// Boundaries are fixed at ages 15 / 25 / 40 / 55.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
pub enum Cohort {
    /// Under 15.
    #[strum(serialize = "Gen Alpha")]
    GenAlpha,
    /// 15 to 24.
    #[strum(serialize = "Gen Z")]
    GenZ,
    /// 25 to 39.
    #[strum(serialize = "Millennial")]
    Millennial,
    /// 40 to 54.
    #[strum(serialize = "Gen X")]
    GenX,
    /// 55 and over.
    #[strum(serialize = "Boomer+")]
    BoomerPlus,
}

/// One cohort's slice of a generational breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSlice {
    /// The cohort.
    pub cohort: Cohort,
    /// Absolute population count.
    pub count: u64,
    /// Percentage of total population, rounded to one decimal. May not
    /// sum to exactly 100 across cohorts due to rounding.
    pub percent: f64,
}

/// Generational breakdown derived from a record's age buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationalBreakdown {
    /// Sum of all supplied age buckets.
    pub total: u64,
    /// The five cohorts, youngest to oldest.
    pub cohorts: Vec<CohortSlice>,
}

/// Ethnicity percentages derived from [`EthnicityCounts`]. Only
/// produced when the universe total is positive — an absent breakdown
/// is distinguishable from a legitimate all-zero one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthnicityBreakdown {
    /// White alone, percent of total.
    pub white: f64,
    /// Black alone, percent of total.
    pub black: f64,
    /// Hispanic or latino, percent of total.
    pub hispanic: f64,
    /// Asian alone, percent of total.
    pub asian: f64,
    /// Combined remaining minority categories, percent of total.
    pub other: f64,
}

/// One of the five canonical income display ranges.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
pub enum IncomeRange {
    /// Household income below $25,000.
    #[strum(serialize = "< $25k")]
    Under25k,
    /// $25,000 to $49,999.
    #[strum(serialize = "$25k\u{2013}50k")]
    From25kTo50k,
    /// $50,000 to $74,999.
    #[strum(serialize = "$50k\u{2013}75k")]
    From50kTo75k,
    /// $75,000 to $99,999.
    #[strum(serialize = "$75k\u{2013}100k")]
    From75kTo100k,
    /// $100,000 and above.
    #[strum(serialize = "> $100k")]
    Over100k,
}

impl IncomeRange {
    /// Maps a fine bracket's exclusive upper bound to its canonical
    /// range. Open-ended brackets (`None`) land in the top range.
    #[must_use]
    pub const fn for_upper_bound(upper_bound: Option<u64>) -> Self {
        match upper_bound {
            Some(bound) if bound <= 25_000 => Self::Under25k,
            Some(bound) if bound <= 50_000 => Self::From25kTo50k,
            Some(bound) if bound <= 75_000 => Self::From50kTo75k,
            Some(bound) if bound <= 100_000 => Self::From75kTo100k,
            _ => Self::Over100k,
        }
    }
}

/// One canonical range's share of households.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRangeSlice {
    /// The canonical range.
    pub range: IncomeRange,
    /// Percentage of households, rounded to one decimal. Zero when the
    /// household total is non-positive.
    pub percent: f64,
}

/// Household income distribution over the five canonical ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDistribution {
    /// The five ranges, lowest to highest.
    pub ranges: Vec<IncomeRangeSlice>,
}

/// Derived household statistics. Each field independently guards its
/// own denominator — one unavailable ratio never blanks the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInsights {
    /// Percent of households that are single-person.
    pub pct_single_person: Option<f64>,
    /// Percent of households that are non-family.
    pub pct_non_family: Option<f64>,
    /// Average household size (pass-through).
    pub avg_household_size: Option<f64>,
    /// Percent of housing units in buildings with 10+ units.
    pub pct_large_buildings: Option<f64>,
}

/// A visit-history snapshot of a record's headline numbers. Decoupled
/// from the live [`DemographicRecord`] so later cache replacement never
/// retroactively alters history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The unit this entry snapshots.
    pub id: census_map_geography_models::GeoUnitId,
    /// Display name.
    pub name: String,
    /// Total population at visit time.
    pub population: Option<u64>,
    /// Median age at visit time.
    pub median_age: Option<f64>,
    /// Median household income at visit time.
    pub median_income: Option<u64>,
}

impl HistoryEntry {
    /// Snapshots a record's headline numbers for the given unit.
    #[must_use]
    pub fn snapshot(
        id: census_map_geography_models::GeoUnitId,
        record: &DemographicRecord,
    ) -> Self {
        Self {
            id,
            name: record.name.clone(),
            population: record.population,
            median_age: record.median_age,
            median_income: record.median_income,
        }
    }
}

/// Direction of change for one metric relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum TrendDirection {
    /// Current value is above the baseline.
    Up,
    /// Current value is below the baseline.
    Down,
    /// Values are equal.
    Same,
}

/// Per-metric trend of a history entry against the active baseline.
/// A metric is `None` when either side is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendComparison {
    /// Population trend.
    pub population: Option<TrendDirection>,
    /// Median age trend.
    pub median_age: Option<TrendDirection>,
    /// Median income trend.
    pub median_income: Option<TrendDirection>,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator as _;

    use super::*;

    #[test]
    fn cohort_display_names() {
        let names: Vec<String> = Cohort::iter().map(|cohort| cohort.to_string()).collect();
        assert_eq!(
            names,
            vec!["Gen Alpha", "Gen Z", "Millennial", "Gen X", "Boomer+"]
        );
    }

    #[test]
    fn income_range_thresholds() {
        assert_eq!(IncomeRange::for_upper_bound(Some(10_000)), IncomeRange::Under25k);
        assert_eq!(IncomeRange::for_upper_bound(Some(25_000)), IncomeRange::Under25k);
        assert_eq!(IncomeRange::for_upper_bound(Some(30_000)), IncomeRange::From25kTo50k);
        assert_eq!(IncomeRange::for_upper_bound(Some(75_000)), IncomeRange::From50kTo75k);
        assert_eq!(IncomeRange::for_upper_bound(Some(100_000)), IncomeRange::From75kTo100k);
        assert_eq!(IncomeRange::for_upper_bound(Some(200_000)), IncomeRange::Over100k);
        assert_eq!(IncomeRange::for_upper_bound(None), IncomeRange::Over100k);
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = DemographicRecord {
            name: "Example County".to_string(),
            population: Some(1000),
            median_age: Some(38.2),
            median_income: Some(61_000),
            age_buckets: None,
            ethnicity: None,
            income_brackets: None,
            total_households: None,
            households: None,
            provenance: Provenance::Local,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"medianAge\":38.2"));
        let back: DemographicRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

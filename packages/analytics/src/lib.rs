#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure demographic aggregation.
//!
//! Every function here is total and side-effect-free: bad or missing
//! input degrades to `None` (or zeroed percentages where the contract
//! says so), never to a panic or an `Err`. Absence always means "data
//! unavailable", which callers must keep distinguishable from a
//! legitimate zero.

use std::collections::BTreeMap;

use census_map_census_models::{
    Cohort, CohortSlice, DemographicRecord, EthnicityBreakdown, EthnicityCounts,
    GenerationalBreakdown, HistoryEntry, HouseholdCounts, HouseholdInsights, IncomeBracketCount,
    IncomeDistribution, IncomeRange, IncomeRangeSlice, TrendComparison, TrendDirection,
};
use strum::IntoEnumIterator as _;

/// The single source-of-truth mapping from age-band label to cohort.
/// Cohort boundaries are fixed at ages 15 / 25 / 40 / 55; the groups
/// are non-overlapping and cover all 22 bands.
const COHORT_BANDS: &[(Cohort, &[&str])] = &[
    (Cohort::GenAlpha, &["Under 5", "5 to 9", "10 to 14"]),
    (
        Cohort::GenZ,
        &["15 to 17", "18 and 19", "20 and 21", "22 to 24"],
    ),
    (
        Cohort::Millennial,
        &["25 to 29", "30 to 34", "35 to 39"],
    ),
    (Cohort::GenX, &["40 to 44", "45 to 49", "50 to 54"]),
    (
        Cohort::BoomerPlus,
        &[
            "55 to 59",
            "60 and 61",
            "62 to 64",
            "65 and 66",
            "67 to 69",
            "70 to 74",
            "75 to 79",
            "80 to 84",
            "85 and over",
        ],
    ),
];

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage of `part` in `total`, rounded to one decimal. Zero when
/// `total` is zero.
#[allow(clippy::cast_precision_loss)]
fn pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(part as f64 / total as f64 * 100.0)
    }
}

/// Computes the generational breakdown from a record's age buckets.
///
/// The total is the sum over all supplied buckets; a zero total yields
/// five cohorts with zero percentages rather than a division by zero.
/// A missing bucket map (the malformed-age-response case) is rejected
/// with a logged warning and `None`.
#[must_use]
pub fn generational_breakdown(
    age_buckets: Option<&BTreeMap<String, u64>>,
) -> Option<GenerationalBreakdown> {
    let Some(buckets) = age_buckets else {
        log::warn!("generational breakdown: no age buckets available");
        return None;
    };

    let total: u64 = buckets.values().sum();

    let cohorts = COHORT_BANDS
        .iter()
        .map(|(cohort, bands)| {
            let count: u64 = bands
                .iter()
                .filter_map(|band| buckets.get(*band))
                .sum();
            CohortSlice {
                cohort: *cohort,
                count,
                percent: pct(count, total),
            }
        })
        .collect();

    Some(GenerationalBreakdown { total, cohorts })
}

/// Computes ethnicity percentages from raw counts.
///
/// The "other" bucket sums the five remaining minority categories
/// (native american, pacific islander, other race, and the two-race
/// detail split). Returns `None` when counts are absent or the
/// universe total is zero — callers must not confuse that with an
/// all-zero breakdown.
#[must_use]
pub fn ethnicity_breakdown(counts: Option<&EthnicityCounts>) -> Option<EthnicityBreakdown> {
    let counts = counts?;
    if counts.total == 0 {
        return None;
    }

    let other = counts.native_american
        + counts.pacific_islander
        + counts.other_race
        + counts.two_races_including_other
        + counts.two_races_excluding_other;

    Some(EthnicityBreakdown {
        white: pct(counts.white_alone, counts.total),
        black: pct(counts.black_alone, counts.total),
        hispanic: pct(counts.hispanic_or_latino, counts.total),
        asian: pct(counts.asian_alone, counts.total),
        other: pct(other, counts.total),
    })
}

/// Collapses fine-grained income brackets into the five canonical
/// display ranges.
///
/// Works for both the 16-bracket ACS input and the 6-bracket local
/// input: each fine bracket lands in a canonical range by its upper
/// bound. Percentages are zero (never negative, never NaN) when the
/// household total is missing or non-positive.
#[must_use]
pub fn income_distribution(
    brackets: &[IncomeBracketCount],
    total_households: Option<u64>,
) -> IncomeDistribution {
    let total = total_households.unwrap_or(0);

    let mut sums: BTreeMap<IncomeRange, u64> =
        IncomeRange::iter().map(|range| (range, 0)).collect();
    for bracket in brackets {
        let range = IncomeRange::for_upper_bound(bracket.upper_bound);
        if let Some(sum) = sums.get_mut(&range) {
            *sum += bracket.count;
        }
    }

    let ranges = IncomeRange::iter()
        .map(|range| IncomeRangeSlice {
            range,
            percent: pct(sums.get(&range).copied().unwrap_or(0), total),
        })
        .collect();

    IncomeDistribution { ranges }
}

/// Rank of `value` within a comparison population, as the percentage
/// of comparison values **strictly below** `value`, rounded to the
/// nearest integer.
///
/// Returns `None` when the comparison set is empty or the value is
/// absent — an empty reference population has no percentiles.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn income_percentile(value: Option<u64>, comparison: &[u64]) -> Option<u8> {
    let value = value?;
    if comparison.is_empty() {
        return None;
    }
    let below = comparison.iter().filter(|other| **other < value).count();
    Some((below as f64 / comparison.len() as f64 * 100.0).round() as u8)
}

/// Derives household insights from composition counts.
///
/// Every ratio guards its own denominator: a zero household total
/// nulls the two household percentages but leaves the housing-unit
/// ratio intact, and vice versa.
#[must_use]
pub fn household_insights(counts: Option<&HouseholdCounts>) -> HouseholdInsights {
    let Some(counts) = counts else {
        return HouseholdInsights {
            pct_single_person: None,
            pct_non_family: None,
            avg_household_size: None,
            pct_large_buildings: None,
        };
    };

    let households = counts.total_households.filter(|total| *total > 0);
    let pct_single_person = match (counts.single_person, households) {
        (Some(single), Some(total)) => Some(pct(single, total)),
        _ => None,
    };
    let pct_non_family = match (counts.non_family, households) {
        (Some(non_family), Some(total)) => Some(pct(non_family, total)),
        _ => None,
    };

    let units = counts.total_units.filter(|total| *total > 0);
    let pct_large_buildings = match (
        counts.units_10_to_19,
        counts.units_20_to_49,
        counts.units_50_plus,
        units,
    ) {
        (Some(small), Some(mid), Some(large), Some(total)) => {
            Some(pct(small + mid + large, total))
        }
        _ => None,
    };

    HouseholdInsights {
        pct_single_person,
        pct_non_family,
        avg_household_size: counts.avg_household_size,
        pct_large_buildings,
    }
}

/// Compares a history entry's headline metrics against a baseline
/// entry.
///
/// Each metric yields a direction only when both sides are present;
/// the whole comparison is `None` when there is no baseline or the
/// entry *is* the baseline (self-comparison shows no trend).
#[must_use]
pub fn compare_to_baseline(
    current: &HistoryEntry,
    baseline: Option<&HistoryEntry>,
) -> Option<TrendComparison> {
    let baseline = baseline?;
    if current.id == baseline.id {
        return None;
    }

    Some(TrendComparison {
        population: direction_u64(current.population, baseline.population),
        median_age: direction_f64(current.median_age, baseline.median_age),
        median_income: direction_u64(current.median_income, baseline.median_income),
    })
}

fn direction_u64(current: Option<u64>, baseline: Option<u64>) -> Option<TrendDirection> {
    match (current, baseline) {
        (Some(current), Some(baseline)) => Some(match current.cmp(&baseline) {
            std::cmp::Ordering::Greater => TrendDirection::Up,
            std::cmp::Ordering::Less => TrendDirection::Down,
            std::cmp::Ordering::Equal => TrendDirection::Same,
        }),
        _ => None,
    }
}

fn direction_f64(current: Option<f64>, baseline: Option<f64>) -> Option<TrendDirection> {
    match (current, baseline) {
        (Some(current), Some(baseline)) => {
            current.partial_cmp(&baseline).map(|ordering| match ordering {
                std::cmp::Ordering::Greater => TrendDirection::Up,
                std::cmp::Ordering::Less => TrendDirection::Down,
                std::cmp::Ordering::Equal => TrendDirection::Same,
            })
        }
        _ => None,
    }
}

/// Bundles the derived views of a single record for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBreakdowns {
    /// Generational cohorts, if age data is available.
    pub generational: Option<GenerationalBreakdown>,
    /// Ethnicity percentages, if the universe total is positive.
    pub ethnicity: Option<EthnicityBreakdown>,
    /// Canonical income distribution (always shaped, possibly zeroed).
    pub income: IncomeDistribution,
    /// Household insights with per-field availability.
    pub households: HouseholdInsights,
}

/// Derives every display breakdown from one record.
#[must_use]
pub fn record_breakdowns(record: &DemographicRecord) -> RecordBreakdowns {
    RecordBreakdowns {
        generational: generational_breakdown(record.age_buckets.as_ref()),
        ethnicity: ethnicity_breakdown(record.ethnicity.as_ref()),
        income: income_distribution(
            record.income_brackets.as_deref().unwrap_or(&[]),
            record.total_households,
        ),
        households: household_insights(record.households.as_ref()),
    }
}

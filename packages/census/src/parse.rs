//! Row parsing: raw tabular API responses into typed numeric fields.
//!
//! Cells are coerced leniently. A single bad cell nulls only its own
//! field; a row too short to cover the sex-by-age span invalidates the
//! whole age breakdown rather than producing misaligned sums.

use std::collections::BTreeMap;

use census_map_census_models::variables;
use census_map_census_models::{
    DemographicRecord, EthnicityCounts, HouseholdCounts, IncomeBracketCount, Provenance, RawRow,
};

/// ACS annotation sentinel: estimate values at or below this mark
/// "data unavailable" variants (-666666666 and friends), not real
/// numbers.
const ACS_NULL_SENTINEL: f64 = -666_666_666.0;

/// Coerces one cell to a finite number. Empty, non-numeric, non-finite
/// and ACS-sentinel cells all yield `None`.
#[must_use]
pub fn coerce_cell(cell: &str) -> Option<f64> {
    let value: f64 = cell.trim().parse().ok()?;
    if !value.is_finite() || value <= ACS_NULL_SENTINEL {
        return None;
    }
    Some(value)
}

/// Parses a row against the ordered variable list that produced it.
///
/// Returns a map from variable code to `Some(value)` or `None` for
/// cells that failed coercion or are missing (short row). Position 0
/// is the display name and is never parsed; trailing geography columns
/// beyond the variable list are ignored.
#[must_use]
pub fn parse_row(row: &RawRow, variable_codes: &[&str]) -> BTreeMap<String, Option<f64>> {
    let mut fields = BTreeMap::new();
    for (position, code) in variable_codes.iter().enumerate() {
        if position == 0 {
            continue;
        }
        let value = row.get(position).and_then(|cell| coerce_cell(cell));
        if value.is_none() {
            log::debug!("no numeric value for {code} at position {position}");
        }
        fields.insert((*code).to_string(), value);
    }
    fields
}

/// The display name cell (position 0), if present.
#[must_use]
pub fn display_name(row: &RawRow) -> Option<&str> {
    row.first().map(String::as_str)
}

/// Parses the 22 age bands from a sex-by-age row.
///
/// `male_offset` / `female_offset` locate the [`variables::AGE_MALE`]
/// and [`variables::AGE_FEMALE`] spans within the row. Each band sums
/// its male and female cells positionally; cells that fail coercion
/// contribute zero. A row too short to cover both spans yields `None`
/// for the entire breakdown — partial sums over misaligned indices
/// would be nonsense.
#[must_use]
pub fn parse_age_buckets(
    row: &RawRow,
    male_offset: usize,
    female_offset: usize,
) -> Option<BTreeMap<String, u64>> {
    let span = variables::AGE_MALE.len();
    if row.len() < male_offset + span || row.len() < female_offset + span {
        log::warn!(
            "age row too short ({} cells) for spans at {male_offset}/{female_offset}",
            row.len()
        );
        return None;
    }

    let cell_count = |position: usize| -> u64 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = coerce_cell(&row[position]).map_or(0, |value| value.max(0.0) as u64);
        count
    };

    let mut buckets = BTreeMap::new();
    for (label, offsets) in variables::AGE_BANDS {
        let count: u64 = offsets
            .iter()
            .map(|offset| cell_count(male_offset + offset) + cell_count(female_offset + offset))
            .sum();
        buckets.insert((*label).to_string(), count);
    }
    Some(buckets)
}

/// Rounds a parsed field to a non-negative integer count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: Option<f64>) -> Option<u64> {
    value.filter(|value| *value >= 0.0).map(|value| value.round() as u64)
}

fn field(fields: &BTreeMap<String, Option<f64>>, code: &str) -> Option<f64> {
    fields.get(code).copied().flatten()
}

fn count_field(fields: &BTreeMap<String, Option<f64>>, code: &str) -> Option<u64> {
    as_count(field(fields, code))
}

/// Builds the full variable list for the age group request:
/// name + male span + female span.
#[must_use]
pub fn age_group_variables() -> Vec<&'static str> {
    let mut codes = vec![variables::NAME];
    codes.extend_from_slice(variables::AGE_MALE);
    codes.extend_from_slice(variables::AGE_FEMALE);
    codes
}

/// Builds the variable list for the headline group request.
#[must_use]
pub fn basic_group_variables() -> Vec<&'static str> {
    vec![
        variables::NAME,
        variables::TOTAL_POPULATION,
        variables::MEDIAN_AGE,
        variables::MEDIAN_INCOME,
    ]
}

/// Builds the variable list for the ethnicity group request.
#[must_use]
pub fn ethnicity_group_variables() -> Vec<&'static str> {
    let mut codes = vec![variables::NAME];
    codes.extend_from_slice(variables::ETHNICITY);
    codes
}

/// Builds the variable list for the income + household group request.
#[must_use]
pub fn income_household_group_variables() -> Vec<&'static str> {
    let mut codes = vec![variables::NAME];
    codes.extend_from_slice(variables::INCOME);
    codes.extend_from_slice(variables::HOUSEHOLD);
    codes
}

/// Parses ethnicity counts from the ethnicity group row. `None` when
/// the universe total is unavailable.
fn parse_ethnicity(row: &RawRow) -> Option<EthnicityCounts> {
    let codes = ethnicity_group_variables();
    let fields = parse_row(row, &codes);
    let total = count_field(&fields, "B03002_001E")?;
    let count = |code: &str| count_field(&fields, code).unwrap_or(0);
    Some(EthnicityCounts {
        total,
        white_alone: count("B03002_003E"),
        black_alone: count("B03002_004E"),
        native_american: count("B03002_005E"),
        asian_alone: count("B03002_006E"),
        pacific_islander: count("B03002_007E"),
        other_race: count("B03002_008E"),
        two_races_including_other: count("B03002_010E"),
        two_races_excluding_other: count("B03002_011E"),
        hispanic_or_latino: count("B03002_012E"),
    })
}

/// Parses the 16 fine income brackets and the household total from the
/// income + household group row.
fn parse_income(row: &RawRow) -> (Option<Vec<IncomeBracketCount>>, Option<u64>) {
    let codes = income_household_group_variables();
    let fields = parse_row(row, &codes);
    let total_households = count_field(&fields, "B19001_001E");

    let mut brackets = Vec::with_capacity(variables::INCOME_UPPER_BOUNDS.len());
    for (index, upper_bound) in variables::INCOME_UPPER_BOUNDS.iter().enumerate() {
        // INCOME[0] is the household total; brackets start at [1].
        let Some(count) = count_field(&fields, variables::INCOME[index + 1]) else {
            return (None, total_households);
        };
        brackets.push(IncomeBracketCount {
            label: variables::INCOME_LABELS[index].to_string(),
            upper_bound: *upper_bound,
            count,
        });
    }
    (Some(brackets), total_households)
}

/// Parses household composition counts from the income + household
/// group row.
fn parse_households(row: &RawRow) -> HouseholdCounts {
    let codes = income_household_group_variables();
    let fields = parse_row(row, &codes);
    HouseholdCounts {
        total_households: count_field(&fields, "B11001_001E"),
        non_family: count_field(&fields, "B11001_007E"),
        single_person: count_field(&fields, "B11001_008E"),
        avg_household_size: field(&fields, "B25010_001E"),
        total_units: count_field(&fields, "B25024_001E"),
        units_10_to_19: count_field(&fields, "B25024_007E"),
        units_20_to_49: count_field(&fields, "B25024_008E"),
        units_50_plus: count_field(&fields, "B25024_009E"),
    }
}

/// Assembles a [`DemographicRecord`] from the four group rows of one
/// unit's fetch.
#[must_use]
pub fn build_record(
    basic: &RawRow,
    age: &RawRow,
    ethnicity: &RawRow,
    income_household: &RawRow,
) -> DemographicRecord {
    let basic_fields = parse_row(basic, &basic_group_variables());
    let (income_brackets, total_households) = parse_income(income_household);

    DemographicRecord {
        name: display_name(basic).unwrap_or("Unknown").to_string(),
        population: count_field(&basic_fields, variables::TOTAL_POPULATION),
        median_age: field(&basic_fields, variables::MEDIAN_AGE),
        median_income: count_field(&basic_fields, variables::MEDIAN_INCOME),
        age_buckets: parse_age_buckets(age, 1, 1 + variables::AGE_MALE.len()),
        ethnicity: parse_ethnicity(ethnicity),
        income_brackets,
        total_households,
        households: Some(parse_households(income_household)),
        provenance: Provenance::Acs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    #[test]
    fn coerce_handles_bad_cells() {
        assert_eq!(coerce_cell("42"), Some(42.0));
        assert_eq!(coerce_cell(" 38.5 "), Some(38.5));
        assert_eq!(coerce_cell(""), None);
        assert_eq!(coerce_cell("n/a"), None);
        assert_eq!(coerce_cell("-666666666"), None);
        assert_eq!(coerce_cell("inf"), None);
    }

    #[test]
    fn parse_row_never_parses_the_name_cell() {
        let codes = basic_group_variables();
        let fields = parse_row(&row(&["Harris County, Texas", "4731145", "34.4", "65788"]), &codes);
        assert!(!fields.contains_key("NAME"));
        assert_eq!(fields["B01003_001E"], Some(4_731_145.0));
        assert_eq!(fields["B01002_001E"], Some(34.4));
    }

    #[test]
    fn parse_row_bad_cell_nulls_one_field_only() {
        let codes = basic_group_variables();
        let fields = parse_row(&row(&["Somewhere", "1000", "bogus", "50000"]), &codes);
        assert_eq!(fields["B01003_001E"], Some(1000.0));
        assert_eq!(fields["B01002_001E"], None);
        assert_eq!(fields["B19013_001E"], Some(50_000.0));
    }

    #[test]
    fn parse_row_short_row_nulls_missing_fields() {
        let codes = basic_group_variables();
        let fields = parse_row(&row(&["Somewhere", "1000"]), &codes);
        assert_eq!(fields["B01003_001E"], Some(1000.0));
        assert_eq!(fields["B01002_001E"], None);
        assert_eq!(fields["B19013_001E"], None);
    }

    fn age_row() -> RawRow {
        // Name + 23 male cells (value 10 each) + 23 female cells
        // (value 20 each).
        let mut cells = vec!["Somewhere".to_string()];
        cells.extend(std::iter::repeat_n("10".to_string(), 23));
        cells.extend(std::iter::repeat_n("20".to_string(), 23));
        cells
    }

    #[test]
    fn age_buckets_sum_male_female_pairs() {
        let buckets = parse_age_buckets(&age_row(), 1, 24).unwrap();
        assert_eq!(buckets.len(), 22);
        assert_eq!(buckets["Under 5"], 30);
        // "20 and 21" spans two cell pairs.
        assert_eq!(buckets["20 and 21"], 60);
        assert_eq!(buckets["85 and over"], 30);
        let total: u64 = buckets.values().sum();
        assert_eq!(total, 23 * 30);
    }

    #[test]
    fn short_age_row_invalidates_whole_breakdown() {
        let mut cells = age_row();
        cells.truncate(40);
        assert_eq!(parse_age_buckets(&cells, 1, 24), None);
    }

    #[test]
    fn unparseable_age_cell_counts_as_zero() {
        let mut cells = age_row();
        cells[1] = "(X)".to_string(); // male "Under 5"
        let buckets = parse_age_buckets(&cells, 1, 24).unwrap();
        assert_eq!(buckets["Under 5"], 20);
    }

    fn ethnicity_row() -> RawRow {
        row(&[
            "Somewhere", "1000", "800", "500", "120", "30", "80", "10", "40", "20", "15", "5",
            "200",
        ])
    }

    #[test]
    fn ethnicity_counts_parse() {
        let counts = parse_ethnicity(&ethnicity_row()).unwrap();
        assert_eq!(counts.total, 1000);
        assert_eq!(counts.white_alone, 500);
        assert_eq!(counts.hispanic_or_latino, 200);
        assert_eq!(counts.two_races_including_other, 15);
    }

    #[test]
    fn ethnicity_without_total_is_none() {
        let mut cells = ethnicity_row();
        cells[1] = "-666666666".to_string();
        assert_eq!(parse_ethnicity(&cells), None);
    }

    #[test]
    fn build_record_round_trips_headline_fields() {
        let basic = row(&["Harris County, Texas", "4731145", "34.4", "65788"]);
        let mut income_household = vec!["Harris County, Texas".to_string()];
        income_household.extend(std::iter::repeat_n("100".to_string(), 17));
        income_household.extend(vec![
            "1600000".to_string(), // total households
            "500000".to_string(),  // non-family
            "400000".to_string(),  // single person
            "2.75".to_string(),    // avg size
            "1800000".to_string(), // total units
            "90000".to_string(),
            "80000".to_string(),
            "60000".to_string(),
        ]);

        let record = build_record(&basic, &age_row(), &ethnicity_row(), &income_household);
        assert_eq!(record.name, "Harris County, Texas");
        assert_eq!(record.population, Some(4_731_145));
        assert_eq!(record.median_age, Some(34.4));
        assert_eq!(record.median_income, Some(65_788));
        assert_eq!(record.provenance, Provenance::Acs);
        assert_eq!(record.total_households, Some(100));
        assert_eq!(record.income_brackets.as_ref().unwrap().len(), 16);
        assert!(record.age_buckets.is_some());
        let households = record.households.unwrap();
        assert_eq!(households.avg_household_size, Some(2.75));
        assert_eq!(households.units_50_plus, Some(60_000));
    }

    // A record supplied pre-built (local dataset shape) and one built
    // by parsing equivalent raw rows must derive identical breakdowns.
    #[test]
    fn local_and_parsed_records_derive_identical_breakdowns() {
        let basic = row(&["Somewhere", "1380", "36.0", "52000"]);

        // 23 male cells + 23 female cells, all 10s: every band gets 20
        // except the two-pair "20 and 21" band, which gets 40.
        let mut age = vec!["Somewhere".to_string()];
        age.extend(std::iter::repeat_n("10".to_string(), 46));

        // 16 fine brackets of 10 households each over a total of 160.
        let mut income_household = vec!["Somewhere".to_string(), "160".to_string()];
        income_household.extend(std::iter::repeat_n("10".to_string(), 16));

        let parsed = build_record(&basic, &age, &ethnicity_row(), &income_household);

        let local = DemographicRecord {
            name: "Somewhere".to_string(),
            population: Some(1380),
            median_age: Some(36.0),
            median_income: Some(52_000),
            age_buckets: parsed.age_buckets.clone(),
            ethnicity: parsed.ethnicity,
            // Local datasets carry six broad brackets; equivalent
            // counts per canonical range.
            income_brackets: Some(vec![
                IncomeBracketCount {
                    label: "Less than $25,000".to_string(),
                    upper_bound: Some(25_000),
                    count: 40,
                },
                IncomeBracketCount {
                    label: "$25,000 to $49,999".to_string(),
                    upper_bound: Some(50_000),
                    count: 50,
                },
                IncomeBracketCount {
                    label: "$50,000 to $74,999".to_string(),
                    upper_bound: Some(75_000),
                    count: 20,
                },
                IncomeBracketCount {
                    label: "$75,000 to $99,999".to_string(),
                    upper_bound: Some(100_000),
                    count: 10,
                },
                IncomeBracketCount {
                    label: "$100,000 to $149,999".to_string(),
                    upper_bound: Some(150_000),
                    count: 20,
                },
                IncomeBracketCount {
                    label: "$150,000 or more".to_string(),
                    upper_bound: None,
                    count: 20,
                },
            ]),
            total_households: Some(160),
            households: None,
            provenance: Provenance::Local,
        };

        let parsed_breakdowns = census_map_analytics::record_breakdowns(&parsed);
        let local_breakdowns = census_map_analytics::record_breakdowns(&local);

        assert_eq!(parsed_breakdowns.generational, local_breakdowns.generational);
        assert_eq!(parsed_breakdowns.ethnicity, local_breakdowns.ethnicity);
        assert_eq!(parsed_breakdowns.income, local_breakdowns.income);
    }

    #[test]
    fn build_record_with_short_age_row_has_no_age_buckets() {
        let basic = row(&["Somewhere", "1000", "30.0", "50000"]);
        let short_age = row(&["Somewhere", "10", "20"]);
        let record = build_record(&basic, &short_age, &ethnicity_row(), &row(&["Somewhere"]));
        assert_eq!(record.age_buckets, None);
        assert_eq!(record.income_brackets, None);
        assert_eq!(record.population, Some(1000));
    }
}

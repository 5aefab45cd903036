//! Table formatting for records, breakdowns, and history trends.

use census_map_analytics::{income_percentile, record_breakdowns};
use census_map_census_models::{DemographicRecord, TrendDirection};
use census_map_geography_models::GeoUnitId;
use census_map_history::History;

/// Prints a record's headline numbers and derived breakdowns.
pub fn print_record(id: &GeoUnitId, record: &DemographicRecord, incomes: &[u64]) {
    println!("{} [{id}] ({})", record.name, record.provenance);

    match record.population {
        Some(population) => println!("  Population:     {population}"),
        None => println!("  Population:     unavailable"),
    }
    match record.median_age {
        Some(age) => println!("  Median age:     {age:.1}"),
        None => println!("  Median age:     unavailable"),
    }
    match record.median_income {
        Some(income) => {
            let percentile = income_percentile(Some(income), incomes)
                .map_or(String::new(), |rank| format!(" (p{rank} nationally)"));
            println!("  Median income:  ${income}{percentile}");
        }
        None => println!("  Median income:  unavailable"),
    }

    let breakdowns = record_breakdowns(record);

    if let Some(generational) = &breakdowns.generational {
        println!("  Generations:");
        for slice in &generational.cohorts {
            println!(
                "    {:<12} {:>9}  {:>5.1}%",
                slice.cohort.to_string(),
                slice.count,
                slice.percent
            );
        }
    }

    if let Some(ethnicity) = &breakdowns.ethnicity {
        println!("  Ethnicity:");
        println!("    White        {:>5.1}%", ethnicity.white);
        println!("    Black        {:>5.1}%", ethnicity.black);
        println!("    Hispanic     {:>5.1}%", ethnicity.hispanic);
        println!("    Asian        {:>5.1}%", ethnicity.asian);
        println!("    Other        {:>5.1}%", ethnicity.other);
    }

    if record.income_brackets.is_some() {
        println!("  Household income:");
        for slice in &breakdowns.income.ranges {
            println!("    {:<12} {:>5.1}%", slice.range.to_string(), slice.percent);
        }
    }

    let households = &breakdowns.households;
    if households.pct_single_person.is_some()
        || households.pct_non_family.is_some()
        || households.avg_household_size.is_some()
        || households.pct_large_buildings.is_some()
    {
        println!("  Households:");
        if let Some(pct) = households.pct_single_person {
            println!("    Single-person     {pct:>5.1}%");
        }
        if let Some(pct) = households.pct_non_family {
            println!("    Non-family        {pct:>5.1}%");
        }
        if let Some(size) = households.avg_household_size {
            println!("    Average size      {size:>5.2}");
        }
        if let Some(pct) = households.pct_large_buildings {
            println!("    In 10+ unit bldgs {pct:>5.1}%");
        }
    }
}

/// Prints the history in render order with trend arrows against the
/// resolved baseline.
pub fn print_history(history: &History) {
    println!("Recently viewed (baseline: {}):", baseline_label(history));
    for (entry, trend) in history.trends() {
        let pin = if history.pinned() == Some(&entry.id) {
            "*"
        } else {
            " "
        };
        let arrows = trend.map_or_else(String::new, |trend| {
            format!(
                "  pop {}  age {}  income {}",
                arrow(trend.population),
                arrow(trend.median_age),
                arrow(trend.median_income)
            )
        });
        println!("  {pin} {:<40}{arrows}", entry.name);
    }
    println!();
}

fn baseline_label(history: &History) -> String {
    history
        .resolved_baseline()
        .map_or_else(|| "none".to_string(), |entry| entry.name.clone())
}

const fn arrow(direction: Option<TrendDirection>) -> &'static str {
    match direction {
        Some(TrendDirection::Up) => "\u{2191}",
        Some(TrendDirection::Down) => "\u{2193}",
        Some(TrendDirection::Same) => "=",
        None => "?",
    }
}

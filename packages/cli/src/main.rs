#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive terminal front-end for the census map drill-down.
//!
//! Stands in for the map rendering layer: state and county selections
//! become session operations, and the emitted events are printed as
//! tables instead of drawn as polygons. `RUST_LOG=debug` shows the
//! parse/fetch diagnostics.

mod display;

use std::path::PathBuf;

use census_map_census::fetch::{AcsClient, FetchConfig};
use census_map_census::local::LocalDataset;
use census_map_geography::index::CountyIndex;
use census_map_geography_models::fips;
use census_map_geography_models::{GeoUnitId, Level};
use census_map_session::{RecordOutcome, Session, SessionEvent};
use clap::Parser;
use dialoguer::Select;

/// Drill into US county demographics from the terminal.
#[derive(Parser, Debug)]
#[command(name = "census_map_cli")]
struct Args {
    /// Path to the county geography GeoJSON file.
    #[arg(long)]
    geography: PathBuf,

    /// Path to the bundled local dataset JSON. Omit to fetch
    /// everything live.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// ACS 5-year vintage to query.
    #[arg(long, default_value_t = 2023)]
    year: u16,

    /// Never fetch; only local/cached records resolve.
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let geography = CountyIndex::from_file(&args.geography)?;
    let local = match &args.dataset {
        Some(path) => LocalDataset::from_file(path)?,
        None => LocalDataset::empty(),
    };
    let incomes = local.median_incomes();
    let client = AcsClient::new(FetchConfig {
        year: args.year,
        ..FetchConfig::default()
    })?;

    let mut session = Session::new(geography, local, client);

    println!("Census Map");
    println!();

    loop {
        match session.navigation().level().clone() {
            Level::Overview => {
                if !overview_menu(&mut session)? {
                    break;
                }
            }
            Level::StateSelected(state) => {
                county_menu(&mut session, &state, &incomes, args.offline).await?;
            }
        }
    }

    Ok(())
}

/// Overview-level menu: pick a state, view history, or quit. Returns
/// `false` on quit.
fn overview_menu(session: &mut Session) -> Result<bool, Box<dyn std::error::Error>> {
    let states = states_in_geography(session);
    let mut labels: Vec<String> = states
        .iter()
        .map(|entry| format!("{} ({})", entry.name, entry.abbr))
        .collect();
    labels.push("View history".to_string());
    labels.push("Quit".to_string());

    let choice = Select::new()
        .with_prompt("Select a state")
        .items(&labels)
        .default(0)
        .interact()?;

    if choice == labels.len() - 1 {
        return Ok(false);
    }
    if choice == labels.len() - 2 {
        history_menu(session)?;
        return Ok(true);
    }

    let state = GeoUnitId::parse(states[choice].fips)?;
    apply_events(session.select_state(&state), &[], session);
    Ok(true)
}

/// State-level menu: pick a county or go back.
async fn county_menu(
    session: &mut Session,
    state: &GeoUnitId,
    incomes: &[u64],
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let counties = session.navigation().visible().to_vec();
    let mut labels: Vec<String> = counties.iter().map(|county| county.name.clone()).collect();
    labels.push("Back".to_string());

    let prompt = format!("{} counties", fips::state_name(state.state_fips()));
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    if choice == labels.len() - 1 {
        apply_events(session.back(), incomes, session);
        return Ok(());
    }

    let county = counties[choice].id.clone();
    let events = if offline {
        session.resolve_without_fetch(&county).unwrap_or_else(|| {
            vec![SessionEvent::RecordReady {
                id: county.clone(),
                outcome: RecordOutcome::Failed {
                    reason: "offline and not in the local dataset".to_string(),
                },
            }]
        })
    } else {
        session.select_county(&county).await
    };
    apply_events(events, incomes, session);
    Ok(())
}

/// History menu: show trends, optionally toggle a pin.
fn history_menu(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    if session.history().entries().is_empty() {
        println!("No history yet.");
        println!();
        return Ok(());
    }

    display::print_history(session.history());

    let mut labels: Vec<String> = session
        .history()
        .ordered()
        .iter()
        .map(|entry| format!("Toggle pin: {}", entry.name))
        .collect();
    labels.push("Back".to_string());

    let choice = Select::new()
        .with_prompt("Baseline")
        .items(&labels)
        .default(labels.len() - 1)
        .interact()?;

    if choice < labels.len() - 1 {
        let id = session.history().ordered()[choice].id.clone();
        apply_events(session.toggle_pin(&id), &[], session);
        display::print_history(session.history());
    }
    Ok(())
}

/// Prints each emitted event the way the rendering layer would draw
/// it.
fn apply_events(events: Vec<SessionEvent>, incomes: &[u64], session: &Session) {
    for event in events {
        match event {
            SessionEvent::NavigationChanged { level, visible } => match level {
                Level::Overview => println!("Back to the national overview."),
                Level::StateSelected(state) => {
                    println!(
                        "{}: {} counties",
                        fips::state_name(state.state_fips()),
                        visible.len()
                    );
                }
            },
            SessionEvent::RecordReady { id, outcome } => match outcome {
                RecordOutcome::Ready(record) => display::print_record(&id, &record, incomes),
                RecordOutcome::Failed { reason } => {
                    println!("{id}: data unavailable ({reason})");
                }
            },
            SessionEvent::HistoryChanged { .. } => {
                // Printed on demand from the history menu.
                log::debug!("history now has {} entries", session.history().entries().len());
            }
        }
        println!();
    }
}

/// The states that actually have counties in the loaded geography, in
/// FIPS order.
fn states_in_geography(session: &Session) -> Vec<&'static fips::StateEntry> {
    fips::STATES
        .iter()
        .filter(|entry| {
            session
                .geography()
                .counties()
                .iter()
                .any(|county| county.id.state_fips() == entry.fips)
        })
        .collect()
}

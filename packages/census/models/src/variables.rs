//! The fixed variable-code contract with the ACS 5-year API.
//!
//! Variables are requested in named groups; within each group the
//! response row is positionally aligned with the order declared here.
//! Any change to the provider's code list is a breaking change to the
//! row parser and aggregator.

/// Display name variable. Always position 0 of every request.
pub const NAME: &str = "NAME";

/// Total population (`B01003`).
pub const TOTAL_POPULATION: &str = "B01003_001E";

/// Median age (`B01002`).
pub const MEDIAN_AGE: &str = "B01002_001E";

/// Median household income in dollars (`B19013`).
pub const MEDIAN_INCOME: &str = "B19013_001E";

/// Male sex-by-age counts (`B01001_003E`..`B01001_025E`), 23 cells.
pub const AGE_MALE: &[&str] = &[
    "B01001_003E", "B01001_004E", "B01001_005E", "B01001_006E", "B01001_007E",
    "B01001_008E", "B01001_009E", "B01001_010E", "B01001_011E", "B01001_012E",
    "B01001_013E", "B01001_014E", "B01001_015E", "B01001_016E", "B01001_017E",
    "B01001_018E", "B01001_019E", "B01001_020E", "B01001_021E", "B01001_022E",
    "B01001_023E", "B01001_024E", "B01001_025E",
];

/// Female sex-by-age counts (`B01001_027E`..`B01001_049E`), 23 cells,
/// same band order as [`AGE_MALE`].
pub const AGE_FEMALE: &[&str] = &[
    "B01001_027E", "B01001_028E", "B01001_029E", "B01001_030E", "B01001_031E",
    "B01001_032E", "B01001_033E", "B01001_034E", "B01001_035E", "B01001_036E",
    "B01001_037E", "B01001_038E", "B01001_039E", "B01001_040E", "B01001_041E",
    "B01001_042E", "B01001_043E", "B01001_044E", "B01001_045E", "B01001_046E",
    "B01001_047E", "B01001_048E", "B01001_049E",
];

/// The 22 age bands and, for each, the cell offsets (within the
/// [`AGE_MALE`]/[`AGE_FEMALE`] spans) that sum into it. Bands merging
/// two single-year cells ("20 and 21") span two offsets; all others
/// span one. Offsets partition 0..23.
pub const AGE_BANDS: &[(&str, &[usize])] = &[
    ("Under 5", &[0]),
    ("5 to 9", &[1]),
    ("10 to 14", &[2]),
    ("15 to 17", &[3]),
    ("18 and 19", &[4]),
    ("20 and 21", &[5, 6]),
    ("22 to 24", &[7]),
    ("25 to 29", &[8]),
    ("30 to 34", &[9]),
    ("35 to 39", &[10]),
    ("40 to 44", &[11]),
    ("45 to 49", &[12]),
    ("50 to 54", &[13]),
    ("55 to 59", &[14]),
    ("60 and 61", &[15]),
    ("62 to 64", &[16]),
    ("65 and 66", &[17]),
    ("67 to 69", &[18]),
    ("70 to 74", &[19]),
    ("75 to 79", &[20]),
    ("80 to 84", &[21]),
    ("85 and over", &[22]),
];

/// Ethnicity/origin counts: the 12-variable `B03002` table, in table
/// order (total, not-hispanic total, seven not-hispanic race
/// categories, the two-race detail split, hispanic total).
pub const ETHNICITY: &[&str] = &[
    "B03002_001E", // total
    "B03002_002E", // not hispanic total
    "B03002_003E", // white alone
    "B03002_004E", // black alone
    "B03002_005E", // native american alone
    "B03002_006E", // asian alone
    "B03002_007E", // pacific islander alone
    "B03002_008E", // some other race alone
    "B03002_009E", // two or more races
    "B03002_010E", // two races including some other race
    "B03002_011E", // two races excluding some other race, 3+ races
    "B03002_012E", // hispanic or latino
];

/// Income variables: household total plus the 16 fine `B19001`
/// brackets, 17 cells.
pub const INCOME: &[&str] = &[
    "B19001_001E", "B19001_002E", "B19001_003E", "B19001_004E", "B19001_005E",
    "B19001_006E", "B19001_007E", "B19001_008E", "B19001_009E", "B19001_010E",
    "B19001_011E", "B19001_012E", "B19001_013E", "B19001_014E", "B19001_015E",
    "B19001_016E", "B19001_017E",
];

/// Exclusive upper bounds (dollars) of the 16 fine income brackets, in
/// the same order as `INCOME[1..]`; `None` marks the open-ended top
/// bracket.
pub const INCOME_UPPER_BOUNDS: &[Option<u64>] = &[
    Some(10_000),
    Some(15_000),
    Some(20_000),
    Some(25_000),
    Some(30_000),
    Some(35_000),
    Some(40_000),
    Some(45_000),
    Some(50_000),
    Some(60_000),
    Some(75_000),
    Some(100_000),
    Some(125_000),
    Some(150_000),
    Some(200_000),
    None,
];

/// Display labels for the fine income brackets, aligned with
/// [`INCOME_UPPER_BOUNDS`].
pub const INCOME_LABELS: &[&str] = &[
    "Less than $10,000",
    "$10,000 to $14,999",
    "$15,000 to $19,999",
    "$20,000 to $24,999",
    "$25,000 to $29,999",
    "$30,000 to $34,999",
    "$35,000 to $39,999",
    "$40,000 to $44,999",
    "$45,000 to $49,999",
    "$50,000 to $59,999",
    "$60,000 to $74,999",
    "$75,000 to $99,999",
    "$100,000 to $124,999",
    "$125,000 to $149,999",
    "$150,000 to $199,999",
    "$200,000 or more",
];

/// Household composition and housing-unit variables: total households,
/// non-family, single-person, average household size, total housing
/// units, then units in 10-19 / 20-49 / 50+ unit buildings.
pub const HOUSEHOLD: &[&str] = &[
    "B11001_001E",
    "B11001_007E",
    "B11001_008E",
    "B25010_001E",
    "B25024_001E",
    "B25024_007E",
    "B25024_008E",
    "B25024_009E",
];

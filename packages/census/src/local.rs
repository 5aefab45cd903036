//! The bundled local dataset.
//!
//! A JSON object mapping normalized unit ids to pre-built
//! [`DemographicRecord`]s. Consulted before any network fetch; a local
//! hit never goes to the API. Local records typically carry the six
//! broad income brackets instead of the 16 fine ACS ones — the
//! aggregator collapses both into the same five canonical ranges.

use std::collections::HashMap;
use std::path::Path;

use census_map_census_models::DemographicRecord;
use census_map_geography_models::GeoUnitId;

use crate::CensusError;

/// In-memory local dataset, keyed by normalized unit id.
#[derive(Debug, Default, Clone)]
pub struct LocalDataset {
    records: HashMap<GeoUnitId, DemographicRecord>,
}

impl LocalDataset {
    /// An empty dataset (every lookup misses).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a dataset from its JSON representation. Keys are
    /// normalized on load, so unpadded ids in the file still match.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError::Json`] for malformed JSON. Entries whose
    /// key is not a valid unit id are skipped with a warning rather
    /// than failing the whole dataset.
    pub fn from_json(input: &str) -> Result<Self, CensusError> {
        let raw: HashMap<String, DemographicRecord> = serde_json::from_str(input)?;

        let mut records = HashMap::with_capacity(raw.len());
        for (key, record) in raw {
            match GeoUnitId::parse(&key) {
                Ok(id) => {
                    records.insert(id, record);
                }
                Err(error) => {
                    log::warn!("skipping local dataset entry {key:?}: {error}");
                }
            }
        }

        log::info!("loaded {} local records", records.len());
        Ok(Self { records })
    }

    /// Loads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CensusError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Looks up a unit's pre-built record.
    #[must_use]
    pub fn get(&self, id: &GeoUnitId) -> Option<&DemographicRecord> {
        self.records.get(id)
    }

    /// The median household incomes of every local record that has
    /// one. Used as the comparison population for income percentiles.
    #[must_use]
    pub fn median_incomes(&self) -> Vec<u64> {
        let mut incomes: Vec<u64> = self
            .records
            .values()
            .filter_map(|record| record.median_income)
            .collect();
        incomes.sort_unstable();
        incomes
    }

    /// Number of local records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use census_map_census_models::Provenance;

    use super::*;

    const SAMPLE: &str = r#"{
        "6037": {
            "name": "Los Angeles County, California",
            "population": 9936690,
            "medianAge": 37.2,
            "medianIncome": 76367,
            "ageBuckets": null,
            "ethnicity": null,
            "incomeBrackets": [
                {"label": "Less than $25,000", "upperBound": 25000, "count": 500000},
                {"label": "$25,000 to $49,999", "upperBound": 50000, "count": 600000},
                {"label": "$50,000 to $74,999", "upperBound": 75000, "count": 550000},
                {"label": "$75,000 to $99,999", "upperBound": 100000, "count": 450000},
                {"label": "$100,000 to $149,999", "upperBound": 150000, "count": 600000},
                {"label": "$150,000 or more", "upperBound": null, "count": 640000}
            ],
            "totalHouseholds": 3340000,
            "households": null
        },
        "bogus": {
            "name": "Nowhere",
            "population": null,
            "medianAge": null,
            "medianIncome": null,
            "ageBuckets": null,
            "ethnicity": null,
            "incomeBrackets": null,
            "totalHouseholds": null,
            "households": null
        }
    }"#;

    #[test]
    fn loads_and_normalizes_keys() {
        let dataset = LocalDataset::from_json(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 1);

        let id = GeoUnitId::parse("06037").unwrap();
        let record = dataset.get(&id).unwrap();
        assert_eq!(record.population, Some(9_936_690));
        // Provenance defaults to local when the file omits it.
        assert_eq!(record.provenance, Provenance::Local);
        assert_eq!(record.income_brackets.as_ref().unwrap().len(), 6);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            LocalDataset::from_json("not json"),
            Err(CensusError::Json(_))
        ));
    }

    #[test]
    fn empty_dataset_misses() {
        let dataset = LocalDataset::empty();
        assert!(dataset.get(&GeoUnitId::parse("06037").unwrap()).is_none());
        assert!(dataset.is_empty());
    }
}

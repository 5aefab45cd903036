//! County feature index over the input geography.
//!
//! Preserves the order counties appear in the input: the visible set
//! emitted when a state is selected uses this order unchanged, so the
//! rendering layer's draw order is stable across sessions.

use census_map_geography_models::{CountyFeature, GeoUnitId};
use geojson::GeoJson;

use crate::GeographyError;

/// Ordered, id-keyed table of county features.
#[derive(Debug, Default, Clone)]
pub struct CountyIndex {
    counties: Vec<CountyFeature>,
}

impl CountyIndex {
    /// Builds an index from already-typed features, keeping their
    /// order.
    #[must_use]
    pub fn from_features(counties: Vec<CountyFeature>) -> Self {
        Self { counties }
    }

    /// Parses a `GeoJSON` feature collection, reading each feature's
    /// id and name and ignoring geometry entirely.
    ///
    /// Features without a parseable 5-digit id are skipped with a
    /// warning (national geography files often carry territories the
    /// FIPS tables do not cover).
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError`] if the input is not valid `GeoJSON`
    /// or not a feature collection.
    pub fn from_geojson(input: &str) -> Result<Self, GeographyError> {
        let geojson: GeoJson = input.parse()?;
        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(GeographyError::NotAFeatureCollection);
        };

        let mut counties = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            let raw_id = feature_id(&feature);
            let Some(raw_id) = raw_id else {
                log::warn!("skipping geography feature without an id");
                continue;
            };
            match GeoUnitId::parse(&raw_id) {
                Ok(id) if id.is_county() => {
                    counties.push(CountyFeature {
                        id,
                        name: feature_name(&feature),
                    });
                }
                Ok(_) | Err(_) => {
                    log::warn!("skipping geography feature with non-county id {raw_id:?}");
                }
            }
        }

        log::info!("loaded {} county features", counties.len());
        Ok(Self { counties })
    }

    /// Loads and parses a `GeoJSON` file.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError`] if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, GeographyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_geojson(&contents)
    }

    /// Looks up a county by id.
    #[must_use]
    pub fn get(&self, id: &GeoUnitId) -> Option<&CountyFeature> {
        self.counties.iter().find(|county| &county.id == id)
    }

    /// The counties belonging to a state, in input order.
    #[must_use]
    pub fn counties_in_state(&self, state: &GeoUnitId) -> Vec<CountyFeature> {
        self.counties
            .iter()
            .filter(|county| county.id.state_fips() == state.state_fips())
            .cloned()
            .collect()
    }

    /// All counties, in input order.
    #[must_use]
    pub fn counties(&self) -> &[CountyFeature] {
        &self.counties
    }

    /// Number of indexed counties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counties.len()
    }

    /// Whether the index holds no counties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }
}

/// Extracts a feature's id: the `GeoJSON` id member if present, else
/// the `GEOID` or `id` property.
fn feature_id(feature: &geojson::Feature) -> Option<String> {
    if let Some(id) = &feature.id {
        return Some(match id {
            geojson::feature::Id::String(value) => value.clone(),
            geojson::feature::Id::Number(value) => value.to_string(),
        });
    }
    let properties = feature.properties.as_ref()?;
    for key in ["GEOID", "id"] {
        if let Some(value) = properties.get(key) {
            if let Some(text) = value.as_str() {
                return Some(text.to_string());
            }
            if value.is_number() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Extracts a feature's display name from its properties, degrading to
/// `"Unknown"`.
fn feature_name(feature: &geojson::Feature) -> String {
    feature
        .properties
        .as_ref()
        .and_then(|properties| {
            for key in ["NAME", "name", "BASENAME"] {
                if let Some(name) = properties.get(key).and_then(serde_json::Value::as_str) {
                    return Some(name.to_string());
                }
            }
            None
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "06037", "properties": {"NAME": "Los Angeles"}, "geometry": null},
            {"type": "Feature", "id": "06059", "properties": {"NAME": "Orange"}, "geometry": null},
            {"type": "Feature", "id": "48201", "properties": {"NAME": "Harris"}, "geometry": null},
            {"type": "Feature", "id": "06", "properties": {"NAME": "California"}, "geometry": null},
            {"type": "Feature", "properties": {"GEOID": "6001", "NAME": "Alameda"}, "geometry": null}
        ]
    }"#;

    #[test]
    fn parses_features_and_skips_non_counties() {
        let index = CountyIndex::from_geojson(SAMPLE).unwrap();
        // The state-level "06" feature is skipped; the GEOID-keyed
        // unpadded "6001" is normalized and kept.
        assert_eq!(index.len(), 4);
        assert_eq!(index.counties()[3].id.as_str(), "06001");
        assert_eq!(index.counties()[3].name, "Alameda");
    }

    #[test]
    fn counties_in_state_preserves_input_order() {
        let index = CountyIndex::from_geojson(SAMPLE).unwrap();
        let state = GeoUnitId::parse("06").unwrap();
        let names: Vec<String> = index
            .counties_in_state(&state)
            .iter()
            .map(|county| county.name.clone())
            .collect();
        assert_eq!(names, vec!["Los Angeles", "Orange", "Alameda"]);
    }

    #[test]
    fn get_by_normalized_id() {
        let index = CountyIndex::from_geojson(SAMPLE).unwrap();
        let id = GeoUnitId::parse("48201").unwrap();
        assert_eq!(index.get(&id).unwrap().name, "Harris");
        assert!(index.get(&GeoUnitId::parse("99999").unwrap()).is_none());
    }

    #[test]
    fn rejects_non_collection_input() {
        let result = CountyIndex::from_geojson(
            r#"{"type": "Feature", "properties": {}, "geometry": null}"#,
        );
        assert!(matches!(
            result,
            Err(GeographyError::NotAFeatureCollection)
        ));
    }
}

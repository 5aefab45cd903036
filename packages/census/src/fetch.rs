//! Live statistics fetching from the ACS 5-year API.
//!
//! One drill-down fetch issues the four variable-group requests for a
//! unit concurrently and assembles the responses into a single
//! [`DemographicRecord`]. Transient failures (connection errors, 429,
//! 5xx) are retried with exponential backoff; other 4xx responses and
//! the ACS error envelope fail immediately — re-invoking the same call
//! is the retry mechanism.

use std::time::Duration;

use census_map_census_models::{DemographicRecord, RawRow};
use census_map_geography_models::GeoUnitId;

use crate::{CensusError, parse};

/// Maximum retry attempts per group request.
const MAX_RETRIES: u32 = 3;

/// Request timeout. ACS responses are small; anything slower than
/// this is effectively down.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent for ACS requests.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; CensusMap/1.0; +https://github.com)";

/// Fetch configuration: endpoint base and dataset vintage.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// ACS 5-year vintage (e.g. 2023).
    pub year: u16,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.census.gov/data".to_string(),
            year: 2023,
        }
    }
}

/// ACS API client.
#[derive(Debug, Clone)]
pub struct AcsClient {
    client: reqwest::Client,
    config: FetchConfig,
}

impl AcsClient {
    /// Builds a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError`] if the HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, CensusError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetches and assembles the full demographic record for a county.
    ///
    /// The four variable groups are requested concurrently; the caller
    /// serializes units (one drill-down click at a time) and performs
    /// its own staleness check on completion.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError::Fetch`] if the id is not a county or any
    /// group request fails after retries. The failure is retryable by
    /// calling again.
    pub async fn fetch_county(&self, id: &GeoUnitId) -> Result<DemographicRecord, CensusError> {
        let Some(county) = id.county_fips() else {
            return Err(CensusError::Fetch {
                message: format!("{id} is not a county id"),
            });
        };
        let state = id.state_fips();

        let basic_variables = parse::basic_group_variables();
        let age_variables = parse::age_group_variables();
        let ethnicity_variables = parse::ethnicity_group_variables();
        let income_household_variables = parse::income_household_group_variables();
        let (basic, age, ethnicity, income_household) = futures::try_join!(
            self.fetch_group(&basic_variables, state, county),
            self.fetch_group(&age_variables, state, county),
            self.fetch_group(&ethnicity_variables, state, county),
            self.fetch_group(&income_household_variables, state, county),
        )?;

        Ok(parse::build_record(&basic, &age, &ethnicity, &income_household))
    }

    /// Fetches one variable group for one county, returning the data
    /// row (header row stripped).
    async fn fetch_group(
        &self,
        variable_codes: &[&str],
        state: &str,
        county: &str,
    ) -> Result<RawRow, CensusError> {
        let url = format!(
            "{}/{}/acs/acs5?get={}&for=county:{county}&in=state:{state}",
            self.config.base_url,
            self.config.year,
            variable_codes.join(","),
        );

        let json = self.send_with_retry(&url).await?;
        data_row(&json, state, county)
    }

    /// Sends a GET with bounded retry and exponential backoff on
    /// transient failures. Non-429 4xx responses fail immediately —
    /// they are application-level bad requests, not transient.
    async fn send_with_retry(&self, url: &str) -> Result<serde_json::Value, CensusError> {
        let mut last_error = String::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay_secs = 1u64 << attempt; // 2s, 4s
                log::warn!("ACS retry {attempt}/{MAX_RETRIES} in {delay_secs}s: {last_error}");
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            }

            let response = match self.client.get(url).send().await {
                Ok(response) => response,
                Err(error) => {
                    last_error = format!("HTTP request error: {error}");
                    continue;
                }
            };

            let status = response.status();
            if status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS {
                let body = response.text().await.unwrap_or_default();
                return Err(CensusError::Fetch {
                    message: format!("ACS rejected request ({status}): {body}"),
                });
            }
            if !status.is_success() {
                last_error = format!("HTTP {status}");
                continue;
            }

            match response.json::<serde_json::Value>().await {
                Ok(json) => return Ok(json),
                Err(error) => {
                    last_error = format!("JSON decode error: {error}");
                }
            }
        }

        Err(CensusError::Fetch {
            message: format!("ACS request failed after {MAX_RETRIES} attempts: {last_error}"),
        })
    }
}

/// Extracts the data row from an ACS response.
///
/// ACS returns an array of arrays: a header row followed by one data
/// row per requested geography. Cells may arrive as JSON strings or
/// bare numbers; both become string cells of the [`RawRow`].
fn data_row(
    json: &serde_json::Value,
    state: &str,
    county: &str,
) -> Result<RawRow, CensusError> {
    let rows = json.as_array().ok_or_else(|| CensusError::Fetch {
        message: format!("unexpected ACS response shape for {state}{county}"),
    })?;
    let row = rows.get(1).ok_or_else(|| CensusError::Fetch {
        message: format!("no data row in ACS response for {state}{county}"),
    })?;
    let cells = row.as_array().ok_or_else(|| CensusError::Fetch {
        message: format!("malformed data row in ACS response for {state}{county}"),
    })?;

    Ok(cells
        .iter()
        .map(|cell| match cell {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect())
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistics sourcing: ACS row parsing, the live fetch client, and
//! the bundled local dataset.
//!
//! Parsing never fails — bad cells degrade to `None` fields. Only the
//! fetch and dataset-load boundaries return errors, and a fetch error
//! always means "no record available for this unit, retry by
//! re-invoking" regardless of whether the transport or the API itself
//! failed.

pub mod fetch;
pub mod local;
pub mod parse;

use thiserror::Error;

/// Errors that can occur sourcing statistics.
#[derive(Debug, Error)]
pub enum CensusError {
    /// The statistics API could not be reached or rejected the
    /// request. Transport and application failures are deliberately
    /// indistinguishable: either way the record is absent and the same
    /// call can be retried.
    #[error("Fetch failed: {message}")]
    Fetch {
        /// Description of what went wrong.
        message: String,
    },

    /// Reading the local dataset failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The local dataset was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CensusError {
    fn from(error: reqwest::Error) -> Self {
        Self::Fetch {
            message: error.to_string(),
        }
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input-geography county index and the drill-down navigation state
//! machine.
//!
//! The county index is an opaque lookup table over the polygon
//! features supplied by the rendering layer: only feature ids and
//! names are read, geometry is never inspected.

pub mod index;
pub mod navigation;

use thiserror::Error;

/// Errors that can occur loading the input geography.
#[derive(Debug, Error)]
pub enum GeographyError {
    /// Reading the geography file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The input parsed but was not a feature collection.
    #[error("Expected a GeoJSON FeatureCollection")]
    NotAFeatureCollection,
}

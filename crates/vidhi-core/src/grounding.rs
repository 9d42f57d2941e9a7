//! Grounded location result types.
//!
//! A grounding chunk returned by the backend is parsed into a tagged
//! variant so consumers handle each shape explicitly instead of probing
//! optional fields.

use serde::{Deserialize, Serialize};

/// Geographic coordinates used as an optional spatial bias for grounded
/// searches. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A place listing backed by live map data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapResult {
    pub uri: String,
    pub title: String,
    /// Review excerpts attached to the place, when the backend supplies
    /// them.
    pub review_snippets: Vec<String>,
}

/// A plain web citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResult {
    pub uri: String,
    pub title: String,
}

/// One grounding chunk from the backend, classified by source.
///
/// Chunks that carry neither a maps nor a web member end up as `Unknown`
/// and are discarded by the finder flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundingResult {
    Map(MapResult),
    Web(WebResult),
    Unknown,
}

impl GroundingResult {
    /// Returns the map listing when this chunk is map-backed.
    pub fn as_map(&self) -> Option<&MapResult> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Consumes the chunk, keeping only map-backed listings.
    pub fn into_map(self) -> Option<MapResult> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

//! Location models

use serde::{Deserialize, Serialize};

use crate::types::Coordinates;

/// City name used when reverse geocoding cannot produce one
pub const UNKNOWN_CITY: &str = "Unknown City";

/// Coordinates paired with a display city name from reverse geocoding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub city: String,
}

impl ResolvedLocation {
    /// Location with coordinates but no resolvable city name
    pub fn unresolved(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            city: UNKNOWN_CITY.to_string(),
        }
    }
}

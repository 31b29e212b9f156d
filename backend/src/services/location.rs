//! Location resolution service
//!
//! Wraps the reverse geocoding client; a failed lookup degrades to the
//! coordinates with a placeholder city name

use crate::config::Config;
use crate::external::geocoding::GeocodingClient;
use shared::models::ResolvedLocation;
use shared::types::Coordinates;

/// Location resolution service
#[derive(Clone)]
pub struct LocationService {
    client: GeocodingClient,
}

impl LocationService {
    /// Create a new LocationService
    pub fn new(client: GeocodingClient) -> Self {
        Self { client }
    }

    /// Create a LocationService from application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(GeocodingClient::with_base_url(
            config.geocoding.user_agent.clone(),
            config.geocoding.base_url.clone(),
        ))
    }

    /// Resolve coordinates to a named location, never failing
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> ResolvedLocation {
        match self.client.reverse_geocode(latitude, longitude).await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!("Reverse geocoding failed, returning coordinates only: {}", e);
                ResolvedLocation::unresolved(Coordinates::new(latitude, longitude))
            }
        }
    }
}

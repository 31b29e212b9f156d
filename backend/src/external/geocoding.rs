//! Reverse geocoding client
//!
//! Integrates with Nominatim to resolve coordinates into a city name

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use shared::models::{ResolvedLocation, UNKNOWN_CITY};
use shared::types::Coordinates;

/// Nominatim reverse geocoding client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

/// Nominatim reverse geocoding response
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

impl GeocodingClient {
    /// Create a new GeocodingClient
    pub fn new(user_agent: String) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent,
        }
    }

    /// Create a new GeocodingClient with custom base URL (for testing)
    pub fn with_base_url(user_agent: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            user_agent,
        }
    }

    /// Resolve coordinates into a named location
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<ResolvedLocation> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=10&addressdetails=1",
            self.base_url, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            // Nominatim rejects requests without an identifying User-Agent
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Geocoding API error: {} - {}",
                status, body
            )));
        }

        let data: NominatimResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse geocoding response: {}", e))
        })?;

        Ok(ResolvedLocation {
            coordinates: Coordinates::new(latitude, longitude),
            city: resolve_city_name(&data),
        })
    }
}

/// Pick the best available city name from a Nominatim response
fn resolve_city_name(data: &NominatimResponse) -> String {
    if let Some(address) = &data.address {
        let named = address
            .city
            .clone()
            .or_else(|| address.town.clone())
            .or_else(|| address.village.clone());
        if let Some(city) = named {
            return city;
        }
    }

    if let Some(display_name) = &data.display_name {
        if let Some(first) = display_name.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    UNKNOWN_CITY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(
        city: Option<&str>,
        town: Option<&str>,
        village: Option<&str>,
        display_name: Option<&str>,
    ) -> NominatimResponse {
        NominatimResponse {
            address: Some(NominatimAddress {
                city: city.map(String::from),
                town: town.map(String::from),
                village: village.map(String::from),
            }),
            display_name: display_name.map(String::from),
        }
    }

    #[test]
    fn prefers_city_over_town_and_village() {
        let data = response(Some("Mecca"), Some("Al Aziziyah"), None, None);
        assert_eq!(resolve_city_name(&data), "Mecca");
    }

    #[test]
    fn falls_back_to_town_then_village() {
        let data = response(None, Some("Al Aziziyah"), None, None);
        assert_eq!(resolve_city_name(&data), "Al Aziziyah");

        let data = response(None, None, Some("Wadi Fatima"), None);
        assert_eq!(resolve_city_name(&data), "Wadi Fatima");
    }

    #[test]
    fn falls_back_to_first_display_name_segment() {
        let data = response(None, None, None, Some("Jeddah, Makkah Province, Saudi Arabia"));
        assert_eq!(resolve_city_name(&data), "Jeddah");
    }

    #[test]
    fn unknown_city_when_nothing_resolves() {
        let data = NominatimResponse {
            address: None,
            display_name: None,
        };
        assert_eq!(resolve_city_name(&data), UNKNOWN_CITY);

        let data = response(None, None, None, Some("   "));
        assert_eq!(resolve_city_name(&data), UNKNOWN_CITY);
    }
}

//! Validation utilities for Maghrib Companion

use crate::models::{parse_time_of_day, ALERT_LEAD_CHOICES};
use crate::types::Coordinates;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate latitude is within [-90, 90]
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() {
        return Err("Latitude must be a finite number");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is within [-180, 180]
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !longitude.is_finite() {
        return Err("Longitude must be a finite number");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a coordinate pair
pub fn validate_coordinates(coordinates: &Coordinates) -> Result<(), &'static str> {
    validate_latitude(coordinates.latitude)?;
    validate_longitude(coordinates.longitude)?;
    Ok(())
}

// ============================================================================
// Alert Settings Validations
// ============================================================================

/// Validate an alert lead time is one of the supported choices
pub fn validate_alert_lead_minutes(minutes: u32) -> Result<(), &'static str> {
    if ALERT_LEAD_CHOICES.contains(&minutes) {
        Ok(())
    } else {
        Err("Alert lead time must be one of 5, 10, 15, 20, 30 or 45 minutes")
    }
}

// ============================================================================
// Schedule Validations
// ============================================================================

/// Validate a wall-clock time string is well-formed HH:MM
pub fn validate_time_of_day(raw: &str) -> Result<(), &'static str> {
    if parse_time_of_day(raw).is_some() {
        Ok(())
    } else {
        Err("Time must be in 24-hour HH:MM format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Location Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_latitude_valid() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(21.4225).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
    }

    #[test]
    fn test_validate_latitude_invalid() {
        assert!(validate_latitude(90.1).is_err());
        assert!(validate_latitude(-120.0).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
        assert!(validate_latitude(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_longitude_valid() {
        assert!(validate_longitude(0.0).is_ok());
        assert!(validate_longitude(39.8262).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
    }

    #[test]
    fn test_validate_longitude_invalid() {
        assert!(validate_longitude(180.5).is_err());
        assert!(validate_longitude(-200.0).is_err());
        assert!(validate_longitude(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(&Coordinates::new(21.4225, 39.8262)).is_ok());
        assert!(validate_coordinates(&Coordinates::new(91.0, 0.0)).is_err());
        assert!(validate_coordinates(&Coordinates::new(0.0, 181.0)).is_err());
    }

    // ========================================================================
    // Alert Settings Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_alert_lead_minutes_valid() {
        for minutes in ALERT_LEAD_CHOICES {
            assert!(validate_alert_lead_minutes(minutes).is_ok());
        }
    }

    #[test]
    fn test_validate_alert_lead_minutes_invalid() {
        assert!(validate_alert_lead_minutes(0).is_err());
        assert!(validate_alert_lead_minutes(7).is_err());
        assert!(validate_alert_lead_minutes(60).is_err());
    }

    // ========================================================================
    // Schedule Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_time_of_day_valid() {
        assert!(validate_time_of_day("18:30").is_ok());
        assert!(validate_time_of_day("00:00").is_ok());
        assert!(validate_time_of_day("23:59").is_ok());
    }

    #[test]
    fn test_validate_time_of_day_invalid() {
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("18:60").is_err());
        assert!(validate_time_of_day("6pm").is_err());
        assert!(validate_time_of_day("").is_err());
    }
}

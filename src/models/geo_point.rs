use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AppError, AppResult};

/// Scale used to keep coordinates at 6 decimal digits (about 0.11 m).
const COORDINATE_SCALE: f64 = 1_000_000.0;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Round a coordinate component to 6 decimal digits, half away from zero.
pub fn round_coordinate(value: f64) -> f64 {
    (value * COORDINATE_SCALE).round() / COORDINATE_SCALE
}

/// A normalized WGS84 coordinate.
///
/// Both components are rounded once, when the point is built. Reading them
/// back never rounds again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl From<RawPoint> for GeoPoint {
    fn from(raw: RawPoint) -> Self {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: round_coordinate(latitude),
            longitude: round_coordinate(longitude),
        }
    }

    /// Same as `new`, but rejects values that are not finite or out of range.
    pub fn try_new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::InvalidCoordinate(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidCoordinate(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self::new(latitude, longitude))
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Point moved `meters` due north. Used to build fixtures and debug centres.
    pub fn offset_north(&self, meters: f64) -> GeoPoint {
        let delta_deg = (meters / EARTH_RADIUS_M).to_degrees();
        GeoPoint::new(self.latitude + delta_deg, self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

use serde::{Deserialize, Serialize};

use super::category::PoiCategory;
use super::geo_point::GeoPoint;

const METERS_PER_MILE: f64 = 1609.34;
const FEET_PER_METER: f64 = 3.28084;

/// A ranked search result, with its distance from the query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    pub category: Option<PoiCategory>,
    pub distance_meters: f64,
}

impl PlaceCandidate {
    /// Feet below a hundredth of a mile, miles with two decimals otherwise.
    pub fn formatted_distance(&self) -> String {
        format_distance(self.distance_meters)
    }
}

pub fn format_distance(meters: f64) -> String {
    let miles = meters / METERS_PER_MILE;
    if miles < 0.01 {
        return format!("{:.0} ft", meters * FEET_PER_METER);
    }
    format!("{:.2} mi", miles)
}

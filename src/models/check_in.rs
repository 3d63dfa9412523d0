use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geo_point::GeoPoint;
use super::place::PlaceCandidate;
use crate::codec::timestamp;

/// Name given to check-ins made from bare coordinates.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A confirmed visit to a place.
///
/// Identity is the `id` alone: two records with the same id are duplicates
/// whatever their content. Only `created_at` can change after creation, via
/// `with_created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RecordWire", from = "RecordWire")]
pub struct CheckInRecord {
    id: Uuid,
    name: String,
    address: String,
    location: GeoPoint,
    category: Option<String>,
    created_at: DateTime<Utc>,
}

/// On-disk shape. Keys are declared in lexicographic order so that every
/// encoder emits them sorted.
#[derive(Clone, Serialize, Deserialize)]
struct RecordWire {
    address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(rename = "createdAt", with = "timestamp")]
    created_at: DateTime<Utc>,
    id: Uuid,
    latitude: f64,
    longitude: f64,
    name: String,
}

impl From<CheckInRecord> for RecordWire {
    fn from(r: CheckInRecord) -> Self {
        Self {
            address: r.address,
            category: r.category,
            created_at: r.created_at,
            id: r.id,
            latitude: r.location.latitude(),
            longitude: r.location.longitude(),
            name: r.name,
        }
    }
}

impl From<RecordWire> for CheckInRecord {
    fn from(w: RecordWire) -> Self {
        CheckInRecord::restore(
            w.id,
            w.name,
            w.address,
            GeoPoint::new(w.latitude, w.longitude),
            w.category,
            w.created_at,
        )
    }
}

impl CheckInRecord {
    /// New check-in happening now, with a fresh identity.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        location: GeoPoint,
        category: Option<String>,
    ) -> Self {
        Self::restore(
            Uuid::new_v4(),
            name.into(),
            address.into(),
            location,
            category,
            Utc::now(),
        )
    }

    /// Check-in at the user's own coordinates when no place matched.
    pub fn raw(location: GeoPoint) -> Self {
        Self::new(UNKNOWN_LOCATION, "", location, None)
    }

    pub fn from_place(place: &PlaceCandidate) -> Self {
        Self::new(
            place.name.clone(),
            place.address.clone(),
            place.location,
            place.category.map(|c| c.display_name().to_string()),
        )
    }

    /// Rebuild a record whose identity already exists elsewhere (import,
    /// migration, decoding).
    pub fn restore(
        id: Uuid,
        name: String,
        address: String,
        location: GeoPoint,
        category: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            address,
            location,
            category,
            created_at: timestamp::normalize(created_at),
        }
    }

    /// The date-edit operation: same identity and content, new timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = timestamp::normalize(created_at);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.created_at.with_timezone(tz).format("%Y-%m-%d").to_string()
    }

    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.created_at.with_timezone(tz).format("%H:%M").to_string()
    }

    pub fn address_text(&self) -> &str {
        if self.address.is_empty() {
            "Not available"
        } else {
            &self.address
        }
    }

    pub fn category_text(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }
}

/// Record shape written by the first releases. Address and category did not
/// always exist, so both default when missing.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyCheckInRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "createdAt", deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl From<LegacyCheckInRecord> for CheckInRecord {
    fn from(l: LegacyCheckInRecord) -> Self {
        CheckInRecord::restore(
            l.id,
            l.name,
            l.address,
            GeoPoint::new(l.latitude, l.longitude),
            l.category,
            l.created_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::PoiCategory;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn new_rounds_coordinates_and_truncates_seconds() {
        let r = CheckInRecord::new(
            "Blue Bottle Coffee",
            "300 Webster St",
            GeoPoint::new(37.80123456, -122.27274444),
            Some("Cafe".into()),
        );
        assert_eq!(r.latitude(), 37.801235);
        assert_eq!(r.longitude(), -122.272744);
        assert_eq!(r.created_at().nanosecond(), 0);
    }

    #[test]
    fn raw_check_in_has_no_address_or_category() {
        let r = CheckInRecord::raw(GeoPoint::new(45.0, 9.0));
        assert_eq!(r.name(), UNKNOWN_LOCATION);
        assert_eq!(r.address_text(), "Not available");
        assert_eq!(r.category_text(), "Uncategorized");
    }

    #[test]
    fn from_place_stores_category_display_name() {
        let place = PlaceCandidate {
            name: "Heinold's".into(),
            address: "48 Webster St".into(),
            location: GeoPoint::new(37.7952, -122.2776),
            category: Some(PoiCategory::Nightlife),
            distance_meters: 12.0,
        };
        let r = CheckInRecord::from_place(&place);
        assert_eq!(r.category(), Some("Nightlife"));
        assert_eq!(r.name(), "Heinold's");
    }

    #[test]
    fn date_edit_keeps_identity() {
        let r = CheckInRecord::raw(GeoPoint::new(1.0, 2.0));
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let edited = r.clone().with_created_at(when);
        assert_eq!(edited.id(), r.id());
        assert_eq!(edited.created_at(), when);
        assert_eq!(edited.location(), r.location());
    }

    #[test]
    fn local_date_and_time_follow_the_zone() {
        let when = Utc.with_ymd_and_hms(2025, 12, 27, 23, 5, 0).unwrap();
        let r = CheckInRecord::raw(GeoPoint::new(1.0, 2.0)).with_created_at(when);
        assert_eq!(r.date_in(&Utc), "2025-12-27");
        assert_eq!(r.time_in(&Utc), "23:05");

        let plus_two = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(r.date_in(&plus_two), "2025-12-28");
        assert_eq!(r.time_in(&plus_two), "01:05");
    }

    #[test]
    fn legacy_shape_without_optional_fields_decodes() {
        let json = r#"[{"id":"6f1c1d2e-0f7a-4d7e-9d43-2b8f8e8e5a11","name":"Old Place",
            "latitude":37.1234567,"longitude":-122.1,"createdAt":"2023-03-04T05:06:07Z"}]"#;
        let legacy: Vec<LegacyCheckInRecord> = serde_json::from_str(json).unwrap();
        let record = CheckInRecord::from(legacy[0].clone());
        assert_eq!(record.address(), "");
        assert_eq!(record.category(), None);
        assert_eq!(record.latitude(), 37.123457);
    }
}

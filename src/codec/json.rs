use crate::errors::AppResult;
use crate::models::{CheckInRecord, LegacyCheckInRecord};

/// Compact form used for the internal store file.
pub fn encode_compact(records: &[CheckInRecord]) -> AppResult<String> {
    Ok(serde_json::to_string(records)?)
}

/// Pretty-printed form used for export files.
pub fn encode_pretty(records: &[CheckInRecord]) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Decode a JSON array of records (store file, export file, import file).
pub fn decode(input: &str) -> AppResult<Vec<CheckInRecord>> {
    Ok(serde_json::from_str(input)?)
}

/// Decode the file written by the first releases.
pub fn decode_legacy(input: &str) -> AppResult<Vec<LegacyCheckInRecord>> {
    Ok(serde_json::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample() -> Vec<CheckInRecord> {
        vec![
            CheckInRecord::restore(
                Uuid::parse_str("0b9a4c1e-7a51-4a36-9d0e-3f1c5b2d8e01").unwrap(),
                "Test Place".into(),
                "123 Main St".into(),
                GeoPoint::new(37.8012, -122.2727),
                Some("Restaurant".into()),
                Utc.with_ymd_and_hms(2025, 12, 27, 9, 12, 0).unwrap(),
            ),
            CheckInRecord::restore(
                Uuid::parse_str("0b9a4c1e-7a51-4a36-9d0e-3f1c5b2d8e02").unwrap(),
                "Unknown Location".into(),
                String::new(),
                GeoPoint::new(-33.856784, 151.215297),
                None,
                Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            ),
        ]
    }

    #[test]
    fn keys_are_sorted_and_timestamps_are_utc_seconds() {
        let json = encode_compact(&sample()[..1]).unwrap();
        assert_eq!(
            json,
            r#"[{"address":"123 Main St","category":"Restaurant","createdAt":"2025-12-27T09:12:00Z","id":"0b9a4c1e-7a51-4a36-9d0e-3f1c5b2d8e01","latitude":37.8012,"longitude":-122.2727,"name":"Test Place"}]"#
        );
    }

    #[test]
    fn missing_category_is_omitted() {
        let json = encode_compact(&sample()[1..]).unwrap();
        assert!(!json.contains("category"));
    }

    #[test]
    fn pretty_output_contains_fields() {
        let json = encode_pretty(&sample()).unwrap();
        assert!(json.contains("\"name\": \"Test Place\""));
        assert!(json.contains("\"address\": \"123 Main St\""));
        assert!(json.contains("\"category\": \"Restaurant\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn empty_array() {
        assert_eq!(encode_compact(&[]).unwrap(), "[]");
        assert_eq!(encode_pretty(&[]).unwrap(), "[]");
    }

    #[test]
    fn decode_then_encode_is_byte_identical() {
        let records = sample();
        for encoded in [encode_compact(&records).unwrap(), encode_pretty(&records).unwrap()] {
            let decoded = decode(&encoded).unwrap();
            assert_eq!(decoded, records);
        }

        let compact = encode_compact(&records).unwrap();
        assert_eq!(encode_compact(&decode(&compact).unwrap()).unwrap(), compact);
        let pretty = encode_pretty(&records).unwrap();
        assert_eq!(encode_pretty(&decode(&pretty).unwrap()).unwrap(), pretty);
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(decode("{not json").is_err());
        assert!(decode(r#"[{"name":"no id"}]"#).is_err());
    }
}

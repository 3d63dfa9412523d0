use chrono::TimeZone;

use super::check_in::CheckInRecord;

/// Plain-text snippet used when sharing a check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureData {
    pub date: String,
    pub time: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CaptureData {
    pub fn from_record<Tz: TimeZone>(record: &CheckInRecord, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            date: record.date_in(tz),
            time: record.time_in(tz),
            name: record.name().to_string(),
            address: record.address().to_string(),
            latitude: record.latitude(),
            longitude: record.longitude(),
        }
    }

    pub fn yaml_string(&self) -> String {
        format!(
            "date: {}\ntime: {}\nname: {}\naddress: {}\ncoordinates: {:.6}, {:.6}",
            self.date, self.time, self.name, self.address, self.latitude, self.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(latitude: f64, longitude: f64) -> CaptureData {
        CaptureData {
            date: "2025-12-27".into(),
            time: "09:12".into(),
            name: "Blue Bottle Coffee".into(),
            address: "300 Webster St, Oakland, CA 94607".into(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn yaml_string_lists_every_field() {
        let yaml = sample(37.8012, -122.2727).yaml_string();
        assert!(yaml.contains("date: 2025-12-27"));
        assert!(yaml.contains("time: 09:12"));
        assert!(yaml.contains("name: Blue Bottle Coffee"));
        assert!(yaml.contains("coordinates: 37.801200, -122.272700"));
    }

    #[test]
    fn yaml_string_prints_six_decimals() {
        let yaml = sample(37.12345678, -122.98765432).yaml_string();
        assert!(yaml.contains("coordinates: 37.123457, -122.987654"));
    }
}

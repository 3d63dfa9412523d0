use chrono::{Local, TimeZone};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::errors::{AppError, AppResult};
use crate::models::CheckInRecord;

pub const CSV_HEADER: [&str; 7] = [
    "date",
    "time",
    "name",
    "address",
    "latitude",
    "longitude",
    "category",
];

/// CSV export using the local wall-clock for date and time.
pub fn encode_csv(records: &[CheckInRecord]) -> AppResult<String> {
    encode_csv_in(records, &Local)
}

/// CSV export in an explicit time zone.
///
/// Rows keep the order they are given in. Fields are quoted only when they
/// contain a delimiter, a quote or a line break; inner quotes are doubled.
/// No line terminator follows the last row.
pub fn encode_csv_in<Tz: TimeZone>(records: &[CheckInRecord], tz: &Tz) -> AppResult<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;

    for record in records {
        wtr.write_record([
            record.date_in(tz),
            record.time_in(tz),
            record.name().to_string(),
            record.address().to_string(),
            format!("{:.6}", record.latitude()),
            format!("{:.6}", record.longitude()),
            record.category().unwrap_or_default().to_string(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    let mut out =
        String::from_utf8(bytes).map_err(|e| AppError::Export(format!("CSV encoding error: {e}")))?;

    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use chrono::Utc;

    fn make_check_in(name: &str, address: &str, category: Option<&str>) -> CheckInRecord {
        let when = Utc.with_ymd_and_hms(2025, 12, 27, 9, 2, 0).unwrap();
        CheckInRecord::new(
            name,
            address,
            GeoPoint::new(37.8012, -122.2727),
            category.map(str::to_string),
        )
        .with_created_at(when)
    }

    #[test]
    fn empty_export_is_the_header_only() {
        assert_eq!(
            encode_csv(&[]).unwrap(),
            "date,time,name,address,latitude,longitude,category"
        );
    }

    #[test]
    fn plain_row_is_verbatim() {
        let csv = encode_csv_in(
            &[make_check_in("Test Place", "123 Main St", Some("Restaurant"))],
            &Utc,
        )
        .unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "2025-12-27,09:02,Test Place,123 Main St,37.801200,-122.272700,Restaurant"
        );
    }

    #[test]
    fn commas_are_quoted() {
        let csv = encode_csv_in(
            &[make_check_in("Cafe", "300 Webster St, Oakland, CA 94607", None)],
            &Utc,
        )
        .unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"300 Webster St, Oakland, CA 94607\""));
        assert!(lines[1].ends_with(",-122.272700,"));
    }

    #[test]
    fn quotes_are_doubled() {
        let csv = encode_csv_in(&[make_check_in("Joe's \"Best\" Pizza", "1 Main St", None)], &Utc)
            .unwrap();
        assert!(csv.contains("\"Joe's \"\"Best\"\" Pizza\""));
    }

    #[test]
    fn newlines_are_quoted() {
        let csv = encode_csv_in(&[make_check_in("Two\nLines", "1 Main St", None)], &Utc).unwrap();
        assert!(csv.contains("\"Two\nLines\""));
    }

    #[test]
    fn carriage_return_is_quoted_too() {
        let csv = encode_csv_in(&[make_check_in("Cafe\rBar", "1 Main St", None)], &Utc).unwrap();
        assert!(csv.contains(",\"Cafe\rBar\",1 Main St,"));
    }

    #[test]
    fn tabs_and_apostrophes_stay_bare() {
        let csv = encode_csv_in(&[make_check_in("Joe's\tPlace", "1 Main St", None)], &Utc).unwrap();
        assert!(csv.contains(",Joe's\tPlace,1 Main St,"));
    }

    #[test]
    fn rows_keep_input_order() {
        let older = make_check_in("Older", "a", None);
        let newer = make_check_in("Newer", "b", None)
            .with_created_at(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        let csv = encode_csv_in(&[older, newer], &Utc).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert!(lines[1].contains("Older"));
        assert!(lines[2].contains("Newer"));
    }
}

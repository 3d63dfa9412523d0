#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use poilog::codec::encode_pretty;
use poilog::models::{CheckInRecord, GeoPoint};
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub fn poilog() -> Command {
    cargo_bin_cmd!("poilog")
}

/// Binary pointed at an isolated application directory.
pub fn poilog_in(dir: &Path) -> Command {
    let mut cmd = poilog();
    cmd.arg("--dir").arg(dir);
    cmd
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// A record with a fresh id at a fixed time.
pub fn record(name: &str, lat: f64, lon: f64, created_at: DateTime<Utc>) -> CheckInRecord {
    CheckInRecord::restore(
        Uuid::new_v4(),
        name.to_string(),
        format!("{name} street"),
        GeoPoint::new(lat, lon),
        None,
        created_at,
    )
}

pub fn write_export(path: &Path, records: &[CheckInRecord]) {
    fs::write(path, encode_pretty(records).unwrap()).unwrap();
}

/// Legacy file body: the older shape without address/category.
pub fn legacy_json(entries: &[(Uuid, &str, f64, f64, &str)]) -> String {
    let items: Vec<String> = entries
        .iter()
        .map(|(id, name, lat, lon, created)| {
            format!(
                r#"{{"id":"{id}","name":"{name}","latitude":{lat},"longitude":{lon},"createdAt":"{created}"}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use uuid::Uuid;

mod common;
use common::{legacy_json, poilog_in};

fn first_id(dir: &std::path::Path) -> String {
    let store = poilog::store::RecordStore::open(dir.join("history.json"));
    store.records()[0].id().to_string()
}

#[test]
fn init_writes_default_config() {
    let dir = tempfile::tempdir().unwrap();

    poilog_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("poilog.conf"));

    let conf = fs::read_to_string(dir.path().join("poilog.conf")).unwrap();
    assert!(conf.contains("store_file: history.json"));
    assert!(conf.contains("radius_meters: 8040.67"));
}

#[test]
fn checkin_then_list_and_show() {
    let dir = tempfile::tempdir().unwrap();

    poilog_in(dir.path())
        .args([
            "checkin",
            "--name",
            "Blue Bottle Coffee",
            "--address",
            "300 Webster St",
            "--lat",
            "37.8012",
            "--lon",
            "-122.2727",
            "--category",
            "cafe",
        ])
        .assert()
        .success()
        .stdout(contains("Checked in at Blue Bottle Coffee"));

    poilog_in(dir.path())
        .args(["checkin", "--raw", "--lat", "-33.8688", "--lon", "151.2093"])
        .assert()
        .success()
        .stdout(contains("Unknown Location"));

    poilog_in(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Blue Bottle Coffee"))
        .stdout(contains("Unknown Location"))
        .stdout(contains("Uncategorized"));

    let id = first_id(dir.path());
    poilog_in(dir.path())
        .args(["show", &id[..8]])
        .assert()
        .success()
        .stdout(contains("coordinates: -33.868800, 151.209300"))
        .stdout(contains("Not available"));
}

#[test]
fn checkin_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();

    poilog_in(dir.path())
        .args(["checkin", "--name", "Nowhere", "--lat", "91", "--lon", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid coordinate"));

    poilog_in(dir.path())
        .args([
            "checkin", "--name", "X", "--lat", "1", "--lon", "1", "--category", "spaceport",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown category"));

    poilog_in(dir.path())
        .args(["checkin", "--lat", "1", "--lon", "1"])
        .assert()
        .failure();
}

#[test]
fn edit_date_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    poilog_in(dir.path())
        .args(["checkin", "--raw", "--lat", "1", "--lon", "2"])
        .assert()
        .success();
    let id = first_id(dir.path());

    poilog_in(dir.path())
        .args(["edit-date", &id, "2024-02-29", "18:45"])
        .assert()
        .success()
        .stdout(contains("2024-02-29 18:45"));

    poilog_in(dir.path())
        .args(["edit-date", &id, "2024-02-30", "18:45"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    poilog_in(dir.path())
        .args(["del", "--yes", &id])
        .assert()
        .success()
        .stdout(contains("1 check-in(s) deleted"));

    poilog_in(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No check-ins yet"));
}

#[test]
fn export_and_reimport_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    for name in ["Alpha", "Beta"] {
        poilog_in(dir.path())
            .args(["checkin", "--name", name, "--lat", "10", "--lon", "20"])
            .assert()
            .success();
    }

    let file = out.path().join("history-export.json");
    poilog_in(dir.path())
        .args(["export", "--format", "json", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    poilog_in(dir.path())
        .args(["export", "--format", "json", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(contains("already exists"));

    poilog_in(other.path())
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Imported 2 check-in(s), skipped 0"));

    poilog_in(other.path())
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Imported 0 check-in(s), skipped 2"));
}

#[test]
fn csv_export_uses_timestamped_name() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    poilog_in(dir.path())
        .args([
            "checkin", "--name", "Bar, Grill", "--lat", "1", "--lon", "1",
        ])
        .assert()
        .success();

    poilog_in(dir.path())
        .args(["export", "--format", "csv", "--out-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(contains("poi-log-").and(contains(".csv")));

    let entry = fs::read_dir(out.path()).unwrap().next().unwrap().unwrap();
    let body = fs::read_to_string(entry.path()).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("date,time,name,address,latitude,longitude,category")
    );
    assert!(lines.next().unwrap().contains("\"Bar, Grill\",,1.000000,1.000000,"));
}

#[test]
fn legacy_file_is_migrated_on_launch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("checkins.json"),
        legacy_json(&[(Uuid::new_v4(), "Old Haunt", 5.0, 6.0, "2023-05-05T05:05:05Z")]),
    )
    .unwrap();

    poilog_in(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Old Haunt"));

    assert!(dir.path().join("checkins.json.migrated").exists());

    poilog_in(dir.path())
        .arg("migrate")
        .assert()
        .success()
        .stdout(contains("already done"));
}

#[test]
fn nearby_ranks_and_checks_in() {
    let dir = tempfile::tempdir().unwrap();
    let places = dir.path().join("places.json");
    fs::write(
        &places,
        r#"[
            {"name":"Far Bar","address":"2 Main","location":{"latitude":37.8100,"longitude":-122.2712},"category":"nightlife"},
            {"name":"Near Diner","location":{"latitude":37.8045,"longitude":-122.2712},"category":"restaurant"},
            {"name":"Coffee","location":{"latitude":37.8046,"longitude":-122.2712},"category":"cafe"},
            {"name":"","location":{"latitude":37.8044,"longitude":-122.2712},"category":"restaurant"}
        ]"#,
    )
    .unwrap();

    poilog_in(dir.path())
        .args(["nearby", "--lat", "37.8044", "--lon", "-122.2712", "--places"])
        .arg(&places)
        .args(["--checkin", "1"])
        .assert()
        .success()
        .stdout(contains("Near Diner").and(contains("Far Bar")))
        .stdout(contains("Coffee").not())
        .stdout(contains("Checked in at Near Diner"));

    let store = poilog::store::RecordStore::open(dir.path().join("history.json"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].address(), "Unknown");
    assert_eq!(store.records()[0].category(), Some("Restaurant"));
}

#[test]
fn settings_drive_nearby_categories() {
    let dir = tempfile::tempdir().unwrap();
    let places = dir.path().join("places.json");
    fs::write(
        &places,
        r#"[{"name":"Coffee","location":{"latitude":1.0,"longitude":1.0},"category":"cafe"}]"#,
    )
    .unwrap();

    poilog_in(dir.path())
        .args(["settings", "--categories", "cafe,bakery", "--debug", "on"])
        .assert()
        .success()
        .stdout(contains("Bakery, Cafe"));

    poilog_in(dir.path())
        .args(["settings", "--print"])
        .assert()
        .success()
        .stdout(contains("keys:       bakery,cafe"))
        .stdout(contains("debug:      on"));

    poilog_in(dir.path())
        .args(["nearby", "--lat", "1", "--lon", "1", "--places"])
        .arg(&places)
        .assert()
        .success()
        .stdout(contains("Coffee"))
        .stdout(contains("kept:          1"));

    poilog_in(dir.path())
        .args(["settings", "--categories", ""])
        .assert()
        .success()
        .stdout(contains("None selected"));

    poilog_in(dir.path())
        .args(["nearby", "--lat", "1", "--lon", "1", "--places"])
        .arg(&places)
        .assert()
        .success()
        .stdout(contains("No categories selected"));
}

#[test]
fn categories_lists_keys() {
    let dir = tempfile::tempdir().unwrap();
    poilog_in(dir.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(contains("restaurant"))
        .stdout(contains("music-venue").not());

    poilog_in(dir.path())
        .args(["categories", "--extended"])
        .assert()
        .success()
        .stdout(contains("music-venue"));
}

#[test]
fn migrate_refuses_to_overwrite_unreadable_history() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("history.json");
    fs::write(&history, "[{\"name\":\"Precious\"").unwrap();
    fs::write(
        dir.path().join("checkins.json"),
        legacy_json(&[(Uuid::new_v4(), "Old", 1.0, 1.0, "2024-01-01T00:00:00Z")]),
    )
    .unwrap();

    // Launch hook only warns; the explicit command reports the failure.
    poilog_in(dir.path()).arg("list").assert().success();
    poilog_in(dir.path())
        .arg("migrate")
        .assert()
        .failure()
        .stderr(contains("unreadable"));

    assert_eq!(
        fs::read_to_string(&history).unwrap(),
        "[{\"name\":\"Precious\""
    );
    assert!(dir.path().join("checkins.json").exists());
}

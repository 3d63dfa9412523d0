use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{CheckInRecord, GeoPoint, PlaceCandidate};
use crate::store::RecordStore;

pub struct CheckInLogic;

impl CheckInLogic {
    /// Confirm a check-in at a place returned by the search.
    pub fn check_in_place(
        store: &mut RecordStore,
        place: &PlaceCandidate,
    ) -> AppResult<CheckInRecord> {
        Self::commit(store, CheckInRecord::from_place(place))
    }

    /// Confirm a check-in described by hand.
    pub fn check_in_manual(
        store: &mut RecordStore,
        name: &str,
        address: &str,
        point: GeoPoint,
        category: Option<String>,
    ) -> AppResult<CheckInRecord> {
        Self::commit(store, CheckInRecord::new(name, address, point, category))
    }

    /// Confirm a check-in at bare coordinates.
    pub fn check_in_raw(store: &mut RecordStore, point: GeoPoint) -> AppResult<CheckInRecord> {
        Self::commit(store, CheckInRecord::raw(point))
    }

    fn commit(store: &mut RecordStore, record: CheckInRecord) -> AppResult<CheckInRecord> {
        store.add(record.clone())?;
        Ok(record)
    }

    /// Change when a check-in happened. This is the only edit path.
    pub fn edit_date(
        store: &mut RecordStore,
        id: Uuid,
        created_at: DateTime<Utc>,
    ) -> AppResult<CheckInRecord> {
        let current = store.get(id).cloned().ok_or(AppError::RecordNotFound(id))?;
        let edited = current.with_created_at(created_at);
        store.update(edited.clone())?;
        Ok(edited)
    }

    pub fn delete(store: &mut RecordStore, ids: &[Uuid]) -> AppResult<usize> {
        for id in ids {
            if !store.contains(*id) {
                return Err(AppError::RecordNotFound(*id));
            }
        }
        store.remove(ids)
    }

    /// Accept a full id or an unambiguous prefix of one (as shown by `list`).
    pub fn resolve_id(store: &RecordStore, text: &str) -> AppResult<Uuid> {
        if let Ok(id) = Uuid::parse_str(text) {
            return Ok(id);
        }

        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AppError::InvalidId(text.to_string()));
        }

        let mut matches = store
            .records()
            .iter()
            .map(CheckInRecord::id)
            .filter(|id| id.to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(AppError::InvalidId(format!("{text} is ambiguous"))),
            (None, _) => Err(AppError::InvalidId(text.to_string())),
        }
    }
}

/// Parse `YYYY-MM-DD` + `HH:MM` as wall-clock time in `tz`.
pub fn parse_wall_clock<Tz: TimeZone>(date: &str, time: &str, tz: &Tz) -> AppResult<DateTime<Utc>> {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(date.to_string()))?;
    let t = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::InvalidTime(time.to_string()))?;

    tz.from_local_datetime(&d.and_time(t))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTime(format!("{date} {time} does not exist locally")))
}

pub fn parse_local(date: &str, time: &str) -> AppResult<DateTime<Utc>> {
    parse_wall_clock(date, time, &Local)
}

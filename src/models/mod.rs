pub mod capture;
pub mod category;
pub mod check_in;
pub mod geo_point;
pub mod place;

pub use capture::CaptureData;
pub use category::{CategorySet, PoiCategory};
pub use check_in::{CheckInRecord, LegacyCheckInRecord};
pub use geo_point::GeoPoint;
pub use place::PlaceCandidate;

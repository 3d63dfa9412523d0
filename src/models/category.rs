use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Point-of-interest categories understood by the search controller.
///
/// The first block is the base set every provider supports. The second block
/// only exists on providers that advertise it through
/// `PlacesProvider::supported_categories`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoiCategory {
    Airport,
    AmusementPark,
    Aquarium,
    Atm,
    Bakery,
    Bank,
    Beach,
    Brewery,
    Cafe,
    Campground,
    CarRental,
    EvCharger,
    FitnessCenter,
    FoodMarket,
    GasStation,
    Hospital,
    Hotel,
    Library,
    Marina,
    MovieTheater,
    Museum,
    NationalPark,
    Nightlife,
    Park,
    Parking,
    Pharmacy,
    PostOffice,
    PublicTransport,
    Restaurant,
    Stadium,
    Store,
    Theater,
    University,
    Winery,
    Zoo,

    // extended
    Bowling,
    Castle,
    ConventionCenter,
    Distillery,
    Golf,
    Hiking,
    Landmark,
    MiniGolf,
    MusicVenue,
    Planetarium,
    Spa,
    Swimming,
}

pub type CategorySet = BTreeSet<PoiCategory>;

impl PoiCategory {
    pub const BASE: &'static [PoiCategory] = &[
        PoiCategory::Airport,
        PoiCategory::AmusementPark,
        PoiCategory::Aquarium,
        PoiCategory::Atm,
        PoiCategory::Bakery,
        PoiCategory::Bank,
        PoiCategory::Beach,
        PoiCategory::Brewery,
        PoiCategory::Cafe,
        PoiCategory::Campground,
        PoiCategory::CarRental,
        PoiCategory::EvCharger,
        PoiCategory::FitnessCenter,
        PoiCategory::FoodMarket,
        PoiCategory::GasStation,
        PoiCategory::Hospital,
        PoiCategory::Hotel,
        PoiCategory::Library,
        PoiCategory::Marina,
        PoiCategory::MovieTheater,
        PoiCategory::Museum,
        PoiCategory::NationalPark,
        PoiCategory::Nightlife,
        PoiCategory::Park,
        PoiCategory::Parking,
        PoiCategory::Pharmacy,
        PoiCategory::PostOffice,
        PoiCategory::PublicTransport,
        PoiCategory::Restaurant,
        PoiCategory::Stadium,
        PoiCategory::Store,
        PoiCategory::Theater,
        PoiCategory::University,
        PoiCategory::Winery,
        PoiCategory::Zoo,
    ];

    pub const EXTENDED: &'static [PoiCategory] = &[
        PoiCategory::Bowling,
        PoiCategory::Castle,
        PoiCategory::ConventionCenter,
        PoiCategory::Distillery,
        PoiCategory::Golf,
        PoiCategory::Hiking,
        PoiCategory::Landmark,
        PoiCategory::MiniGolf,
        PoiCategory::MusicVenue,
        PoiCategory::Planetarium,
        PoiCategory::Spa,
        PoiCategory::Swimming,
    ];

    /// Restaurants and nightlife (bars).
    pub fn defaults() -> CategorySet {
        [PoiCategory::Restaurant, PoiCategory::Nightlife]
            .into_iter()
            .collect()
    }

    pub fn base_set() -> CategorySet {
        Self::BASE.iter().copied().collect()
    }

    pub fn extended_set() -> CategorySet {
        Self::BASE.iter().chain(Self::EXTENDED).copied().collect()
    }

    /// Stable key used in settings files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            PoiCategory::Airport => "airport",
            PoiCategory::AmusementPark => "amusement-park",
            PoiCategory::Aquarium => "aquarium",
            PoiCategory::Atm => "atm",
            PoiCategory::Bakery => "bakery",
            PoiCategory::Bank => "bank",
            PoiCategory::Beach => "beach",
            PoiCategory::Brewery => "brewery",
            PoiCategory::Cafe => "cafe",
            PoiCategory::Campground => "campground",
            PoiCategory::CarRental => "car-rental",
            PoiCategory::EvCharger => "ev-charger",
            PoiCategory::FitnessCenter => "fitness-center",
            PoiCategory::FoodMarket => "food-market",
            PoiCategory::GasStation => "gas-station",
            PoiCategory::Hospital => "hospital",
            PoiCategory::Hotel => "hotel",
            PoiCategory::Library => "library",
            PoiCategory::Marina => "marina",
            PoiCategory::MovieTheater => "movie-theater",
            PoiCategory::Museum => "museum",
            PoiCategory::NationalPark => "national-park",
            PoiCategory::Nightlife => "nightlife",
            PoiCategory::Park => "park",
            PoiCategory::Parking => "parking",
            PoiCategory::Pharmacy => "pharmacy",
            PoiCategory::PostOffice => "post-office",
            PoiCategory::PublicTransport => "public-transport",
            PoiCategory::Restaurant => "restaurant",
            PoiCategory::Stadium => "stadium",
            PoiCategory::Store => "store",
            PoiCategory::Theater => "theater",
            PoiCategory::University => "university",
            PoiCategory::Winery => "winery",
            PoiCategory::Zoo => "zoo",
            PoiCategory::Bowling => "bowling",
            PoiCategory::Castle => "castle",
            PoiCategory::ConventionCenter => "convention-center",
            PoiCategory::Distillery => "distillery",
            PoiCategory::Golf => "golf",
            PoiCategory::Hiking => "hiking",
            PoiCategory::Landmark => "landmark",
            PoiCategory::MiniGolf => "mini-golf",
            PoiCategory::MusicVenue => "music-venue",
            PoiCategory::Planetarium => "planetarium",
            PoiCategory::Spa => "spa",
            PoiCategory::Swimming => "swimming",
        }
    }

    /// Human readable name, also what gets stored on a check-in.
    pub fn display_name(&self) -> &'static str {
        match self {
            PoiCategory::Airport => "Airport",
            PoiCategory::AmusementPark => "Amusement Park",
            PoiCategory::Aquarium => "Aquarium",
            PoiCategory::Atm => "ATM",
            PoiCategory::Bakery => "Bakery",
            PoiCategory::Bank => "Bank",
            PoiCategory::Beach => "Beach",
            PoiCategory::Brewery => "Brewery",
            PoiCategory::Cafe => "Cafe",
            PoiCategory::Campground => "Campground",
            PoiCategory::CarRental => "Car Rental",
            PoiCategory::EvCharger => "EV Charger",
            PoiCategory::FitnessCenter => "Fitness Center",
            PoiCategory::FoodMarket => "Food Market",
            PoiCategory::GasStation => "Gas Station",
            PoiCategory::Hospital => "Hospital",
            PoiCategory::Hotel => "Hotel",
            PoiCategory::Library => "Library",
            PoiCategory::Marina => "Marina",
            PoiCategory::MovieTheater => "Movie Theater",
            PoiCategory::Museum => "Museum",
            PoiCategory::NationalPark => "National Park",
            PoiCategory::Nightlife => "Nightlife",
            PoiCategory::Park => "Park",
            PoiCategory::Parking => "Parking",
            PoiCategory::Pharmacy => "Pharmacy",
            PoiCategory::PostOffice => "Post Office",
            PoiCategory::PublicTransport => "Public Transport",
            PoiCategory::Restaurant => "Restaurant",
            PoiCategory::Stadium => "Stadium",
            PoiCategory::Store => "Store",
            PoiCategory::Theater => "Theater",
            PoiCategory::University => "University",
            PoiCategory::Winery => "Winery",
            PoiCategory::Zoo => "Zoo",
            PoiCategory::Bowling => "Bowling",
            PoiCategory::Castle => "Castle",
            PoiCategory::ConventionCenter => "Convention Center",
            PoiCategory::Distillery => "Distillery",
            PoiCategory::Golf => "Golf",
            PoiCategory::Hiking => "Hiking",
            PoiCategory::Landmark => "Landmark",
            PoiCategory::MiniGolf => "Mini Golf",
            PoiCategory::MusicVenue => "Music Venue",
            PoiCategory::Planetarium => "Planetarium",
            PoiCategory::Spa => "Spa",
            PoiCategory::Swimming => "Swimming",
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PoiCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::BASE
            .iter()
            .chain(Self::EXTENDED)
            .copied()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| AppError::InvalidCategory(s.to_string()))
    }
}

/// Parse a comma separated list such as `restaurant,cafe`.
pub fn parse_category_list(input: &str) -> Result<CategorySet, AppError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PoiCategory::from_str)
        .collect()
}

/// Short summary of a selection, as shown in settings.
pub fn describe_selection(selected: &CategorySet, available: &CategorySet) -> String {
    if selected.is_empty() {
        return "None selected".to_string();
    }
    if selected.len() == available.len() {
        return "All categories".to_string();
    }

    let mut names: Vec<&str> = selected.iter().map(|c| c.display_name()).collect();
    names.sort_unstable();
    if names.len() <= 3 {
        names.join(", ")
    } else {
        format!("{} selected", names.len())
    }
}

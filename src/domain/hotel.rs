// src/domain/hotel.rs

use crate::domain::room::Room;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Address {
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Non-empty parts joined for display, e.g. "12 quai du Lac, 74000 Annecy, France".
    pub fn one_line(&self) -> String {
        let street = [&self.address_1, &self.address_2]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        let town = [&self.zip, &self.city]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        [Some(street), Some(town), self.country.clone()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Everything the user metadata table knows about a hotel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelMetas {
    pub address: Address,
    pub geo_lat: Option<f64>,
    pub geo_lng: Option<f64>,
    pub image_url: Option<String>,
    pub phone: Option<String>,
}

/// Rounded average of the `rating` values and how many there are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReviewSummary {
    pub rating: Option<i64>,
    pub count: i64,
}

/// A hotel as shown in the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub address: Address,
    pub geo_lat: Option<f64>,
    pub geo_lng: Option<f64>,
    pub image_url: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<i64>,
    pub rating_count: i64,
    pub cheapest_room: Room,
    /// Kilometres from the search point, only set when a radius was given.
    pub distance: Option<f64>,
}

/// One row of the user table.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelRow {
    pub id: i64,
    pub display_name: String,
}

/// Why a hotel was left out of a listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    /// No room passes every active filter.
    NoMatchingRoom,
    OutOfRange { distance: f64, max: f64 },
}

/// Outcome of building one hotel against a set of filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembly {
    Included(Hotel),
    Excluded(Exclusion),
}

// src/domain/room.rs

use serde::Serialize;

/// The cheapest room of a hotel that satisfies the active filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: i64,
    pub title: String,
    pub surface: f64,
    /// Lowest numeric `price` stored for this room.
    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    #[serde(rename = "type")]
    pub room_type: String,
}

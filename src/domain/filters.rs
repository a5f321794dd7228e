// src/domain/filters.rs

use crate::errors::ServerError;
use std::str::FromStr;

/// Inclusive bounds, either side optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Optional constraints for the hotel listing. A `None` / empty field puts no
/// constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelFilters {
    /// Free-text search. Accepted and carried along; the listing doesn't use it.
    pub search: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Search radius in kilometres around `lat`/`lng`.
    pub distance: Option<f64>,
    pub price: NumericRange,
    pub surface: NumericRange,
    /// Minimum number of bedrooms.
    pub rooms: Option<i64>,
    /// Minimum number of bathrooms.
    pub bathrooms: Option<i64>,
    /// Accepted room types; empty accepts any type.
    pub types: Vec<String>,
}

/// Reference point and radius, present only when all three were given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSearch {
    pub lat: f64,
    pub lng: f64,
    pub max_distance: f64,
}

impl HotelFilters {
    pub fn radius(&self) -> Option<RadiusSearch> {
        match (self.lat, self.lng, self.distance) {
            (Some(lat), Some(lng), Some(max_distance)) => Some(RadiusSearch {
                lat,
                lng,
                max_distance,
            }),
            _ => None,
        }
    }

    /// Parse filters from a URL query string (without the leading `?`).
    ///
    /// Empty values are ignored, so a submitted form with blank fields means
    /// "no filter". Unknown keys are ignored too.
    pub fn from_query(query: &str) -> Result<Self, ServerError> {
        let mut filters = HotelFilters::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                "search" => filters.search = Some(value.to_string()),
                "lat" => filters.lat = Some(parse_float(&key, value)?),
                "lng" => filters.lng = Some(parse_float(&key, value)?),
                "distance" => filters.distance = Some(parse_float(&key, value)?),
                "price_min" | "price[min]" => filters.price.min = Some(parse_float(&key, value)?),
                "price_max" | "price[max]" => filters.price.max = Some(parse_float(&key, value)?),
                "surface_min" | "surface[min]" => {
                    filters.surface.min = Some(parse_float(&key, value)?)
                }
                "surface_max" | "surface[max]" => {
                    filters.surface.max = Some(parse_float(&key, value)?)
                }
                "rooms" => filters.rooms = Some(parse_number(&key, value)?),
                "bathrooms" | "bathRooms" => filters.bathrooms = Some(parse_number(&key, value)?),
                "types" | "types[]" => filters.types.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string),
                ),
                _ => {}
            }
        }

        Ok(filters)
    }
}

/// Like `parse_number`, but `NaN` and the infinities are refused.
fn parse_float(key: &str, value: &str) -> Result<f64, ServerError> {
    let number: f64 = parse_number(key, value)?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(ServerError::BadRequest(format!(
            "'{key}' must be a finite number, got '{value}'"
        )))
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ServerError> {
    value
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("'{key}' must be a number, got '{value}'")))
}

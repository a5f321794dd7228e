// src/db/hotels.rs
use crate::db::connection::Database;
use crate::db::room_query::RoomQuery;
use crate::domain::filters::HotelFilters;
use crate::domain::geo::compute_distance;
use crate::domain::hotel::{
    Address, Assembly, Exclusion, Hotel, HotelMetas, HotelRow, ReviewSummary,
};
use crate::domain::room::Room;
use crate::errors::ServerError;
use crate::timers::Timers;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Reads hotels (users), their metadata, reviews and rooms, and applies the
/// listing filters.
pub struct HotelService<'a> {
    db: &'a Database,
    timers: &'a Timers,
}

impl<'a> HotelService<'a> {
    pub fn new(db: &'a Database, timers: &'a Timers) -> Self {
        Self { db, timers }
    }

    /// Every hotel that has a room matching `filters` (and lies within the
    /// search radius when one is given), in table order.
    ///
    /// Filtered-out hotels are simply skipped. Any database or data error
    /// aborts the whole listing.
    #[instrument(skip(self))]
    pub fn list(&self, filters: &HotelFilters) -> Result<Vec<Hotel>, ServerError> {
        let db_timer = self.timers.start("getDB");

        self.db.with_conn(|conn| {
            self.timers.stop(db_timer);

            let rows = fetch_hotel_rows(conn)?;
            let candidates = rows.len();

            let mut hotels = Vec::with_capacity(candidates);
            for row in rows {
                let hotel_id = row.id;
                match assemble_hotel(conn, self.timers, row, filters)? {
                    Assembly::Included(hotel) => hotels.push(hotel),
                    Assembly::Excluded(reason) => {
                        debug!(hotel_id, ?reason, "hotel excluded from listing")
                    }
                }
            }

            info!(candidates, returned = hotels.len(), "hotel listing built");
            Ok(hotels)
        })
    }
}

/// All rows of the user table; each one is a hotel.
pub fn fetch_hotel_rows(conn: &Connection) -> Result<Vec<HotelRow>, ServerError> {
    let mut stmt = conn
        .prepare("SELECT ID, display_name FROM wp_users")
        .map_err(|e| ServerError::DbError(format!("Prepare failed: {e}")))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(HotelRow {
                id: row.get(0)?,
                display_name: row.get(1)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("Query failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Builds the full hotel for `row`, or says why it doesn't make the listing.
/// Stops at the first exclusion.
pub fn assemble_hotel(
    conn: &Connection,
    timers: &Timers,
    row: HotelRow,
    filters: &HotelFilters,
) -> Result<Assembly, ServerError> {
    let metas = timers.time("getMetas", || fetch_metas(conn, row.id))?;
    let reviews = timers.time("getReviews", || fetch_reviews(conn, row.id))?;

    let cheapest = timers.time("getCheapest", || fetch_cheapest_room(conn, row.id, filters))?;
    let Some(cheapest_room) = cheapest else {
        return Ok(Assembly::Excluded(Exclusion::NoMatchingRoom));
    };

    let distance = match filters.radius() {
        None => None,
        Some(search) => {
            // Missing coordinates count as 0.
            let lat = metas.geo_lat.unwrap_or(0.0);
            let lng = metas.geo_lng.unwrap_or(0.0);
            let distance = compute_distance(search.lat, search.lng, lat, lng);
            if distance > search.max_distance {
                return Ok(Assembly::Excluded(Exclusion::OutOfRange {
                    distance,
                    max: search.max_distance,
                }));
            }
            Some(distance)
        }
    };

    Ok(Assembly::Included(Hotel {
        id: row.id,
        name: row.display_name,
        address: metas.address,
        geo_lat: metas.geo_lat,
        geo_lng: metas.geo_lng,
        image_url: metas.image_url,
        phone: metas.phone,
        rating: reviews.rating,
        rating_count: reviews.count,
        cheapest_room,
        distance,
    }))
}

/// Address, coordinates, cover image and phone from the user metadata.
/// Missing keys stay `None`.
pub fn fetch_metas(conn: &Connection, hotel_id: i64) -> Result<HotelMetas, ServerError> {
    let mut stmt = conn
        .prepare("SELECT meta_key, meta_value FROM wp_usermeta WHERE user_id = ?")
        .map_err(|e| ServerError::DbError(format!("Prepare failed: {e}")))?;

    let rows = stmt
        .query_map(params![hotel_id], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, Option<String>>(1)?,
            ))
        })
        .map_err(|e| ServerError::DbError(format!("Query failed: {e}")))?;

    // Later duplicates win.
    let mut data: HashMap<String, String> = HashMap::new();
    for r in rows {
        if let (Some(key), Some(value)) = r.map_err(|e| ServerError::DbError(e.to_string()))? {
            data.insert(key, value);
        }
    }

    let owner = || format!("hotel {hotel_id}");
    let mut take = |key: &str| data.remove(key);

    let address = Address {
        address_1: take("address_1"),
        address_2: take("address_2"),
        city: take("address_city"),
        zip: take("address_zip"),
        country: take("address_country"),
    };
    let geo_lat = parse_optional(owner, "geo_lat", take("geo_lat"))?;
    let geo_lng = parse_optional(owner, "geo_lng", take("geo_lng"))?;

    Ok(HotelMetas {
        address,
        geo_lat,
        geo_lng,
        image_url: take("coverImage"),
        phone: take("phone"),
    })
}

/// Rounded average and count of the hotel's review ratings.
pub fn fetch_reviews(conn: &Connection, hotel_id: i64) -> Result<ReviewSummary, ServerError> {
    conn.query_row(
        r#"
        SELECT
            ROUND(AVG(CAST(meta.meta_value AS REAL))) AS rating,
            COUNT(meta.meta_value) AS count
        FROM wp_posts AS review
        INNER JOIN wp_postmeta AS meta
            ON review.ID = meta.post_id AND meta.meta_key = 'rating'
        WHERE review.post_author = ? AND review.post_type = 'review'
        "#,
        params![hotel_id],
        |row| {
            Ok(ReviewSummary {
                rating: row.get::<_, Option<f64>>(0)?.map(|r| r as i64),
                count: row.get(1)?,
            })
        },
    )
    .map_err(|e| ServerError::DbError(format!("failed to load reviews: {e}")))
}

/// The hotel's cheapest room passing every filter, if there is one.
pub fn fetch_cheapest_room(
    conn: &Connection,
    hotel_id: i64,
    filters: &HotelFilters,
) -> Result<Option<Room>, ServerError> {
    let query = RoomQuery::cheapest_for(hotel_id, filters);

    let raw = conn
        .query_row(query.sql(), params_from_iter(query.params()), |row| {
            Ok(RawRoom {
                id: row.get(0)?,
                title: row.get(1)?,
                surface: row.get(2)?,
                price: row.get(3)?,
                bedrooms: row.get(4)?,
                bathrooms: row.get(5)?,
                room_type: row.get(6)?,
                price_text: row.get(7)?,
            })
        })
        .optional()
        .map_err(|e| ServerError::DbError(format!("failed to load cheapest room: {e}")))?;

    let room = raw.map(RawRoom::into_room).transpose()?;
    if let Some(room) = &room {
        debug_assert!(filters.price.contains(room.price));
        debug_assert!(filters.surface.contains(room.surface));
    }
    Ok(room)
}

/// A room row before its metadata strings are checked.
struct RawRoom {
    id: i64,
    title: String,
    surface: Option<String>,
    price: Option<f64>,
    bedrooms: Option<String>,
    bathrooms: Option<String>,
    room_type: Option<String>,
    /// Stored text behind `price`, from the same meta row as the minimum.
    price_text: Option<String>,
}

impl RawRoom {
    fn into_room(self) -> Result<Room, ServerError> {
        let id = self.id;
        let owner = || format!("room {id}");

        Ok(Room {
            id,
            title: self.title,
            surface: parse_required(owner, "surface", self.surface)?,
            price: checked_price(owner, self.price, self.price_text)?,
            bedrooms: parse_required(owner, "bedrooms_count", self.bedrooms)?,
            bathrooms: parse_required(owner, "bathrooms_count", self.bathrooms)?,
            room_type: self.room_type.unwrap_or_default(),
        })
    }
}

/// The cast price only stands if its stored text is a number itself.
fn checked_price(
    owner: impl Fn() -> String,
    cast: Option<f64>,
    text: Option<String>,
) -> Result<f64, ServerError> {
    let parsed: f64 = parse_required(&owner, "price", text.clone())?;
    match cast {
        Some(price) if parsed.is_finite() => Ok(price),
        _ => Err(ServerError::MalformedMeta {
            owner: owner(),
            key: "price",
            value: text.unwrap_or_default(),
        }),
    }
}

/// Blank counts as absent; anything else must parse.
fn parse_optional<T: FromStr>(
    owner: impl Fn() -> String,
    key: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ServerError> {
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ServerError::MalformedMeta {
                owner: owner(),
                key,
                value,
            }),
        _ => Ok(None),
    }
}

fn parse_required<T: FromStr>(
    owner: impl Fn() -> String,
    key: &'static str,
    raw: Option<String>,
) -> Result<T, ServerError> {
    parse_optional(&owner, key, raw.clone())?.ok_or_else(|| ServerError::MalformedMeta {
        owner: owner(),
        key,
        value: raw.unwrap_or_default(),
    })
}

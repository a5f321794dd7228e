// src/db/room_query.rs
use crate::domain::filters::{HotelFilters, NumericRange};
use rusqlite::types::Value;

const SELECT_ROOM: &str = r#"SELECT
    room.ID AS id,
    room.post_title AS title,
    surfaceData.meta_value AS surface,
    MIN(CAST(priceData.meta_value AS REAL)) AS price,
    roomsData.meta_value AS rooms,
    bathData.meta_value AS bathrooms,
    typeData.meta_value AS type,
    priceData.meta_value AS price_text
FROM wp_posts AS room"#;

/// Cheapest-room SQL for one hotel, with a predicate for every filter that is
/// set and a positional parameter for every value.
///
/// Meta values are stored as text; numeric predicates cast them so `"80"` is
/// compared as 80 and not as a string. SQLite casts text that isn't a number
/// to 0, so the uncast price of the winning row is selected too and checked
/// by the caller.
#[derive(Debug, Clone)]
pub struct RoomQuery {
    sql: String,
    params: Vec<Value>,
}

impl RoomQuery {
    pub fn cheapest_for(hotel_id: i64, filters: &HotelFilters) -> Self {
        let mut query = RoomQuery {
            sql: SELECT_ROOM.to_string(),
            params: Vec::new(),
        };

        query.join_meta("surfaceData", "surface");
        query.range("surfaceData", &filters.surface);

        query.join_meta("priceData", "price");
        query.range("priceData", &filters.price);

        query.join_meta("roomsData", "bedrooms_count");
        query.at_least("roomsData", filters.rooms.map(Value::Integer));

        query.join_meta("bathData", "bathrooms_count");
        query.at_least("bathData", filters.bathrooms.map(Value::Integer));

        query.join_meta("typeData", "type");
        query.one_of("typeData", &filters.types);

        query.sql.push_str("\nWHERE room.post_author = ? AND room.post_type = 'room'");
        query.params.push(Value::Integer(hotel_id));

        query
            .sql
            .push_str("\nGROUP BY room.ID\nORDER BY price ASC, room.ID ASC\nLIMIT 1");

        query
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    fn join_meta(&mut self, alias: &str, key: &'static str) {
        self.sql.push_str(&format!(
            "\nINNER JOIN wp_postmeta AS {alias} ON room.ID = {alias}.post_id AND {alias}.meta_key = '{key}'"
        ));
    }

    fn range(&mut self, alias: &str, range: &NumericRange) {
        self.at_least(alias, range.min.map(Value::Real));
        self.at_most(alias, range.max.map(Value::Real));
    }

    fn at_least(&mut self, alias: &str, bound: Option<Value>) {
        if let Some(bound) = bound {
            self.sql
                .push_str(&format!(" AND CAST({alias}.meta_value AS REAL) >= ?"));
            self.params.push(bound);
        }
    }

    fn at_most(&mut self, alias: &str, bound: Option<Value>) {
        if let Some(bound) = bound {
            self.sql
                .push_str(&format!(" AND CAST({alias}.meta_value AS REAL) <= ?"));
            self.params.push(bound);
        }
    }

    fn one_of(&mut self, alias: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        self.sql
            .push_str(&format!(" AND {alias}.meta_value IN ({placeholders})"));
        self.params
            .extend(values.iter().cloned().map(Value::Text));
    }
}

use crate::db::connection::{init_db, Database};
use crate::errors::ServerError;
use rusqlite::params;

/// A fresh in-memory DB with the production schema
pub fn init_test_db() -> Database {
    let db = Database::open_in_memory()
        .unwrap_or_else(|e| panic!("Database open failed: {e}"));

    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

/// Meta values exactly as they will be stored (text), so tests can also
/// plant malformed ones.
pub struct RoomSeed<'a> {
    pub title: &'a str,
    pub price: &'a str,
    pub surface: &'a str,
    pub bedrooms: &'a str,
    pub bathrooms: &'a str,
    pub room_type: &'a str,
}

impl Default for RoomSeed<'_> {
    fn default() -> Self {
        Self {
            title: "Chambre",
            price: "100",
            surface: "20",
            bedrooms: "1",
            bathrooms: "1",
            room_type: "Chambre",
        }
    }
}

pub fn add_hotel(db: &Database, name: &str, metas: &[(&str, &str)]) -> i64 {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO wp_users (user_login, display_name) VALUES (?1, ?1)",
            params![name],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        let hotel_id = conn.last_insert_rowid();

        for (key, value) in metas {
            conn.execute(
                "INSERT INTO wp_usermeta (user_id, meta_key, meta_value) VALUES (?, ?, ?)",
                params![hotel_id, key, value],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        }
        Ok(hotel_id)
    })
    .unwrap()
}

pub fn add_room(db: &Database, hotel_id: i64, room: RoomSeed) -> i64 {
    add_post(
        db,
        hotel_id,
        room.title,
        "room",
        &[
            ("surface", room.surface),
            ("price", room.price),
            ("bedrooms_count", room.bedrooms),
            ("bathrooms_count", room.bathrooms),
            ("type", room.room_type),
        ],
    )
}

pub fn add_review(db: &Database, hotel_id: i64, rating: &str) -> i64 {
    add_post(db, hotel_id, "Avis", "review", &[("rating", rating)])
}

pub fn add_post(
    db: &Database,
    author: i64,
    title: &str,
    post_type: &str,
    metas: &[(&str, &str)],
) -> i64 {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO wp_posts (post_author, post_title, post_type) VALUES (?, ?, ?)",
            params![author, title, post_type],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        let post_id = conn.last_insert_rowid();

        for (key, value) in metas {
            conn.execute(
                "INSERT INTO wp_postmeta (post_id, meta_key, meta_value) VALUES (?, ?, ?)",
                params![post_id, key, value],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        }
        Ok(post_id)
    })
    .unwrap()
}

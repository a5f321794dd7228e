pub mod connection;
pub mod hotels;
pub mod room_query;

pub use connection::{init_db, seed_db, Database};
pub use hotels::HotelService;

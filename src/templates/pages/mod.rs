pub mod hotels;

pub use hotels::hotels_page;

pub mod card;
pub mod error;
pub mod filter_form;

pub use card::hotel_card;
pub use error::error_page;
pub use filter_form::filter_form;

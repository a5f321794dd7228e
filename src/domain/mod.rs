pub mod filters;
pub mod geo;
pub mod hotel;
pub mod room;

use crate::db::{Database, HotelService};
use crate::domain::filters::HotelFilters;
use crate::domain::hotel::Hotel;
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, text_response, ResultResp};
use crate::templates::pages::hotels_page;
use crate::timers::Timers;
use astra::Request;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct HotelListBody<'a> {
    count: usize,
    hotels: &'a [Hotel],
}

pub fn handle(req: Request, db: &Database) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") | ("GET", "/hotels") => {
            let filters = parse_filters(&req)?;
            let hotels = list_hotels(db, &filters)?;
            html_response(hotels_page(&filters, &hotels))
        }
        ("GET", "/api/hotels") => {
            let filters = parse_filters(&req)?;
            let hotels = list_hotels(db, &filters)?;
            json_response(&HotelListBody {
                count: hotels.len(),
                hotels: &hotels,
            })
        }
        ("GET", "/health") => text_response("OK"),
        _ => Err(ServerError::NotFound),
    }
}

fn parse_filters(req: &Request) -> Result<HotelFilters, ServerError> {
    HotelFilters::from_query(req.uri().query().unwrap_or(""))
}

fn list_hotels(db: &Database, filters: &HotelFilters) -> Result<Vec<Hotel>, ServerError> {
    let timers = Timers::new();
    let hotels = HotelService::new(db, &timers).list(filters)?;

    for (name, total) in timers.report() {
        info!(
            timer = %name,
            calls = total.calls,
            elapsed_ms = total.elapsed.as_secs_f64() * 1000.0,
            "listing timer"
        );
    }

    Ok(hotels)
}

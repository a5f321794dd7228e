// src/tests/router_tests/hotels_tests.rs

use crate::db::connection::{seed_db, Database};
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{add_hotel, add_review, add_room, init_test_db, RoomSeed};
use astra::{Body, Request, Response};
use http::Method;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

fn get(uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

fn body_string(mut resp: Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}

fn content_type(resp: &Response) -> &str {
    resp.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Two hotels: "Hotel du Lac" (80 / 120) and "Grand Hotel" (a 300 suite of 60 m²).
fn seeded_db() -> Database {
    let db = init_test_db();

    let lac = add_hotel(
        &db,
        "Hotel du Lac",
        &[("address_city", "Annecy"), ("geo_lat", "45.8992"), ("geo_lng", "6.1294")],
    );
    add_room(&db, lac, RoomSeed { title: "Small", price: "80", surface: "20", ..Default::default() });
    add_room(&db, lac, RoomSeed { title: "Large", price: "120", surface: "40", ..Default::default() });
    add_review(&db, lac, "4");

    let grand = add_hotel(&db, "Grand Hotel", &[("address_city", "Lyon")]);
    add_room(
        &db,
        grand,
        RoomSeed { title: "Royale", price: "300", surface: "60", room_type: "Suite", ..Default::default() },
    );

    db
}

#[test]
fn api_lists_all_hotels_as_json() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded_db();

    let resp = handle(get("/api/hotels"), &db)?;
    assert_eq!(resp.status(), 200);
    assert_eq!(content_type(&resp), "application/json");

    let json: Value = serde_json::from_str(&body_string(resp))?;
    assert_eq!(json["count"], 2);
    assert_eq!(json["hotels"][0]["name"], "Hotel du Lac");
    assert_eq!(json["hotels"][0]["rating"], 4);
    assert_eq!(json["hotels"][0]["rating_count"], 1);
    assert_eq!(json["hotels"][0]["cheapest_room"]["price"], 80.0);
    assert_eq!(json["hotels"][0]["distance"], Value::Null);
    assert_eq!(json["hotels"][1]["cheapest_room"]["type"], "Suite");
    assert_eq!(json["hotels"][1]["rating"], Value::Null);
    Ok(())
}

#[test]
fn api_applies_query_filters() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded_db();

    let resp = handle(get("/api/hotels?price_min=100&price_max=200"), &db)?;
    let json: Value = serde_json::from_str(&body_string(resp))?;
    assert_eq!(json["count"], 1);
    assert_eq!(json["hotels"][0]["cheapest_room"]["price"], 120.0);
    assert_eq!(json["hotels"][0]["cheapest_room"]["title"], "Large");

    let resp = handle(get("/api/hotels?types=Suite"), &db)?;
    let json: Value = serde_json::from_str(&body_string(resp))?;
    assert_eq!(json["count"], 1);
    assert_eq!(json["hotels"][0]["name"], "Grand Hotel");

    let resp = handle(get("/api/hotels?lat=45.8992&lng=6.1294&distance=5"), &db)?;
    let json: Value = serde_json::from_str(&body_string(resp))?;
    assert_eq!(json["count"], 1);
    assert_eq!(json["hotels"][0]["distance"], 0.0);
    Ok(())
}

#[test]
fn html_page_renders_each_hotel() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded_db();

    let resp = handle(get("/hotels?surface_max=30"), &db)?;
    assert_eq!(resp.status(), 200);
    assert!(content_type(&resp).starts_with("text/html"));

    let body = body_string(resp);
    assert!(body.contains("Hotel du Lac"), "missing hotel name");
    assert!(body.contains("Small"), "missing cheapest room");
    assert!(!body.contains("Grand Hotel"), "filtered hotel rendered");
    assert!(body.contains("1 hôtel(s)"));
    // the form keeps the submitted value
    assert!(body.contains(r#"name="surface_max" placeholder="Max" value="30""#));
    Ok(())
}

#[test]
fn home_page_is_the_listing() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded_db();
    let body = body_string(handle(get("/"), &db)?);
    assert!(body.contains("Grand Hotel"));
    Ok(())
}

#[test]
fn empty_listing_says_so() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded_db();
    let body = body_string(handle(get("/hotels?price_min=5000"), &db)?);
    assert!(body.contains("Aucun hôtel"));
    Ok(())
}

#[test]
fn non_numeric_filter_is_a_bad_request() {
    let db = seeded_db();

    let err = handle(get("/api/hotels?price_min=cheap"), &db).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("price_min"));
}

#[test]
fn nan_distance_is_a_bad_request() {
    let db = seeded_db();

    let err = handle(get("/api/hotels?lat=45&lng=6&distance=NaN"), &db).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(error_to_response(err).status(), 400);
}

#[test]
fn pages_only_link_to_served_routes() -> Result<(), Box<dyn std::error::Error>> {
    let db = init_test_db();
    seed_db(&db, Path::new("sql/seed.sql"))?;

    let listing = body_string(handle(get("/hotels"), &db)?);
    assert!(listing.contains("Hôtel du Lac"));
    let error = body_string(error_to_response(ServerError::NotFound));

    for body in [listing, error] {
        assert!(!body.contains("/static/"), "link to an unserved path");
        assert!(!body.contains("stylesheet"));
    }
    Ok(())
}

#[test]
fn unknown_route_is_not_found() {
    let db = seeded_db();

    let err = handle(get("/nope"), &db).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
    assert_eq!(error_to_response(err).status(), 404);
}

#[test]
fn health_check() -> Result<(), Box<dyn std::error::Error>> {
    let db = init_test_db();
    let resp = handle(get("/health"), &db)?;
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), "OK");
    Ok(())
}

#[test]
fn malformed_data_is_a_server_error_without_details() {
    let db = seeded_db();
    let broken = add_hotel(&db, "Broken", &[]);
    add_room(&db, broken, RoomSeed { bedrooms: "two", ..Default::default() });

    let err = handle(get("/api/hotels"), &db).unwrap_err();
    assert!(matches!(err, ServerError::MalformedMeta { .. }));

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 500);
    let body = body_string(resp);
    assert!(!body.contains("two"));
    assert!(body.contains("Internal Server Error"));
}

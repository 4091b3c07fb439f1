//! API integration tests, driven in-process through the router

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use pintprice_server::{
    api, config::AppConfig, models::venue::Venue, repository::InMemoryCatalog, AppState,
};

fn venue(id: i64, name: &str, base_cents: Option<i64>) -> Venue {
    Venue {
        id,
        name: name.to_string(),
        suburb: Some("Perth".to_string()),
        beer_type: None,
        price_verified: true,
        base_price: base_cents.map(|c| Decimal::new(c, 2)),
        promo_price: None,
        promo_days: None,
        promo_start: None,
        promo_end: None,
    }
}

fn catalog() -> Vec<Venue> {
    let mut royal = venue(1, "The Royal", Some(1000));
    royal.promo_price = Some(Decimal::new(700, 2));
    royal.promo_days = Some("Mon-Fri".to_string());
    royal.promo_start = Some("16:00".to_string());
    royal.promo_end = Some("18:00".to_string());

    let mut corner = venue(2, "Corner Bar", Some(900));
    corner.promo_days = Some("Fri-Mon".to_string());
    corner.promo_start = Some("5pm".to_string());
    corner.promo_end = Some("7pm".to_string());
    corner.promo_price = Some(Decimal::new(750, 2));

    vec![royal, corner, venue(3, "Mystery Tavern", None)]
}

fn app(venues: Vec<Venue>) -> Router {
    let state = AppState::new(AppConfig::default(), Arc::new(InMemoryCatalog::new(venues)))
        .expect("default config has a valid timezone");
    api::router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// Wednesday 2025-02-26 17:30 in Perth
const WED_1730: &str = "2025-02-26T09:30:00Z";

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(app(catalog()), "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready() {
    let (status, body) = get(app(catalog()), "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_list_venues_during_happy_hour() {
    let (status, body) = get(app(catalog()), &format!("/api/v1/venues?at={}", WED_1730)).await;
    assert_eq!(status, StatusCode::OK);

    let venues = body.as_array().expect("array body");
    let ids: Vec<i64> = venues.iter().map(|v| v["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    assert_eq!(venues[0]["isPromoActive"], true);
    assert_eq!(venues[0]["effectivePrice"], "7.00");
    assert_eq!(venues[0]["countdown"], "30m left");
    assert_eq!(venues[0]["promoStatus"]["state"], "active");
    assert_eq!(venues[0]["promoStatus"]["minutesRemaining"], 30);

    // Fri-Mon promo is not on a Wednesday
    assert_eq!(venues[1]["isPromoActive"], false);
    assert_eq!(venues[1]["effectivePrice"], "9.00");
    assert_eq!(venues[1]["promoStatus"]["state"], "upcomingFuture");
    assert_eq!(venues[1]["countdown"], "Fri 5:00pm");

    assert!(venues[2]["effectivePrice"].is_null());
}

#[tokio::test]
async fn test_list_promo_active_only() {
    let uri = format!("/api/v1/venues?promo_active=true&at={}", WED_1730);
    let (status, body) = get(app(catalog()), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "The Royal");
}

#[tokio::test]
async fn test_get_venue() {
    let (status, body) = get(app(catalog()), "/api/v1/venues/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Mystery Tavern");
    assert_eq!(body["promoStatus"]["state"], "noPromo");

    let (status, _) = get(app(catalog()), "/api/v1/venues/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_instant_is_rejected() {
    let (status, body) = get(app(catalog()), "/api/v1/venues?at=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_upcoming_happy_hours() {
    // Wednesday 15:45 in Perth
    let uri = "/api/v1/venues/happy-hours/upcoming?within=30&at=2025-02-26T07:45:00Z";
    let (status, body) = get(app(catalog()), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["promoStatus"]["minutesUntil"], 15);

    let (status, _) = get(app(catalog()), "/api/v1/venues/happy-hours/upcoming?within=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_daily_pick_is_stable_for_a_date() {
    let uri = format!("/api/v1/daily-pick?date=2025-02-25&at={}", WED_1730);
    let (status, first) = get(app(catalog()), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["date"], "2025-02-25");
    assert!(first["reason"].is_string());
    assert!(first["winner"]["id"].is_i64());
    assert!(first["runnerUp"]["id"].is_i64());

    let (_, second) = get(app(catalog()), &uri).await;
    assert_eq!(first["winner"]["id"], second["winner"]["id"]);
    assert_eq!(first["runnerUp"]["id"], second["runnerUp"]["id"]);
}

#[tokio::test]
async fn test_daily_pick_defaults_to_market_date() {
    // 20:00 UTC on the 25th is already the 26th in Perth
    let (status, body) = get(app(catalog()), "/api/v1/daily-pick?at=2025-02-25T20:00:00Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2025-02-26");
}

#[tokio::test]
async fn test_daily_pick_unavailable_without_eligible_venues() {
    let (status, body) = get(app(vec![venue(3, "Mystery Tavern", None)]), "/api/v1/daily-pick").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Unavailable");

    let (status, _) = get(app(vec![]), "/api/v1/daily-pick").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_daily_pick_bad_date() {
    let (status, _) = get(app(catalog()), "/api/v1/daily-pick?date=25/02/2025").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_daily_pick_out_of_range_date_after_warm_cache() {
    let app = app(catalog());
    let today = format!("/api/v1/daily-pick?at={}", WED_1730);
    let (status, _) = get(app.clone(), &today).await;
    assert_eq!(status, StatusCode::OK);

    for date in ["-262143-01-03", "0001-01-01", "10000-01-01"] {
        let uri = format!("/api/v1/daily-pick?date={}&at={}", date, WED_1730);
        let (status, body) = get(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "date {}", date);
        assert_eq!(body["error"], "BadValue");
    }

    let (status, body) = get(app, &today).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2025-02-26");
}

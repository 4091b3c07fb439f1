//! API handlers for Pintprice REST endpoints

pub mod daily_pick;
pub mod health;
pub mod openapi;
pub mod venues;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

#[derive(Deserialize)]
struct AtQuery {
    at: Option<String>,
}

/// The instant a request is evaluated at: the `at` query parameter
/// (RFC 3339) when given, the server clock otherwise. Read once per request.
pub struct EvaluationInstant(pub DateTime<Utc>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for EvaluationInstant {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<AtQuery>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        match query.at {
            Some(at) => DateTime::parse_from_rfc3339(&at)
                .map(|t| EvaluationInstant(t.with_timezone(&Utc)))
                .map_err(|_| AppError::Validation(format!("Invalid at timestamp: {}", at))),
            None => Ok(EvaluationInstant(Utc::now())),
        }
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Venues
        .route("/venues", get(venues::list_venues))
        .route("/venues/happy-hours/upcoming", get(venues::upcoming_happy_hours))
        .route("/venues/:id", get(venues::get_venue))
        // Pick of the Day
        .route("/daily-pick", get(daily_pick::get_daily_pick))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

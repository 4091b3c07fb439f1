//! Venue endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::venue::VenueView,
    services::venues::VenueFilter,
};

use super::EvaluationInstant;

/// Query parameters for the venue listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct VenueListQuery {
    /// Only venues with a promo price applying now
    pub promo_active: Option<bool>,
    /// Suburb name (case-insensitive)
    pub suburb: Option<String>,
    /// Evaluation instant (RFC 3339), defaults to now
    pub at: Option<String>,
}

/// Query parameters for upcoming happy hours
#[derive(Debug, Default, Deserialize, Validate, IntoParams, ToSchema)]
pub struct UpcomingQuery {
    /// Look-ahead in minutes (1-1440)
    #[validate(range(min = 1, max = 1440, message = "within must be between 1 and 1440"))]
    pub within: Option<u32>,
    /// Evaluation instant (RFC 3339), defaults to now
    pub at: Option<String>,
}

/// List venues, cheapest effective price first
#[utoipa::path(
    get,
    path = "/venues",
    tag = "venues",
    params(VenueListQuery),
    responses(
        (status = 200, description = "Decorated venues", body = Vec<VenueView>)
    )
)]
pub async fn list_venues(
    State(state): State<crate::AppState>,
    EvaluationInstant(now): EvaluationInstant,
    Query(query): Query<VenueListQuery>,
) -> AppResult<Json<Vec<VenueView>>> {
    let filter = VenueFilter {
        promo_active: query.promo_active.unwrap_or(false),
        suburb: query.suburb,
    };
    let venues = state.services.venues.list(&filter, now).await?;
    Ok(Json(venues))
}

/// Get a venue by ID
#[utoipa::path(
    get,
    path = "/venues/{id}",
    tag = "venues",
    params(
        ("id" = i64, Path, description = "Venue ID"),
        ("at" = Option<String>, Query, description = "Evaluation instant (RFC 3339)")
    ),
    responses(
        (status = 200, description = "Venue details", body = VenueView),
        (status = 404, description = "Venue not found")
    )
)]
pub async fn get_venue(
    State(state): State<crate::AppState>,
    EvaluationInstant(now): EvaluationInstant,
    Path(id): Path<i64>,
) -> AppResult<Json<VenueView>> {
    let venue = state.services.venues.get(id, now).await?;
    Ok(Json(venue))
}

/// Venues whose happy hour starts soon
#[utoipa::path(
    get,
    path = "/venues/happy-hours/upcoming",
    tag = "venues",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Venues starting happy hour soon", body = Vec<VenueView>),
        (status = 400, description = "Invalid look-ahead")
    )
)]
pub async fn upcoming_happy_hours(
    State(state): State<crate::AppState>,
    EvaluationInstant(now): EvaluationInstant,
    Query(query): Query<UpcomingQuery>,
) -> AppResult<Json<Vec<VenueView>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let within = query
        .within
        .unwrap_or(state.config.notifications.lead_minutes);
    let venues = state.services.venues.starting_soon(within, now).await?;
    Ok(Json(venues))
}

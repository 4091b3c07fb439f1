//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{daily_pick, health, venues};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pintprice API",
        version = "1.0.0",
        description = "Happy hour pricing and Pick of the Day REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Venues
        venues::list_venues,
        venues::get_venue,
        venues::upcoming_happy_hours,
        // Pick of the Day
        daily_pick::get_daily_pick,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::models::venue::Venue,
            crate::models::venue::VenueView,
            crate::models::daily_pick::DailyPick,
            crate::models::daily_pick::DailyPickResponse,
            crate::models::daily_pick::DailyPickQuery,
            venues::VenueListQuery,
            venues::UpcomingQuery,
        )
    ),
    tags(
        (name = "health", description = "Health checks"),
        (name = "venues", description = "Venue listing with live happy hour pricing"),
        (name = "daily-pick", description = "Deterministic Pick of the Day")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

//! Pick of the Day endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::daily_pick::{DailyPickQuery, DailyPickResponse},
};

use super::EvaluationInstant;

/// Calendar years a pick can be requested for
const PICK_YEARS: std::ops::RangeInclusive<i32> = 1970..=9999;

/// Get the Pick of the Day
#[utoipa::path(
    get,
    path = "/daily-pick",
    tag = "daily-pick",
    params(DailyPickQuery),
    responses(
        (status = 200, description = "Pick of the Day", body = DailyPickResponse),
        (status = 400, description = "Invalid date or instant"),
        (status = 503, description = "No eligible venues today")
    )
)]
pub async fn get_daily_pick(
    State(state): State<crate::AppState>,
    EvaluationInstant(now): EvaluationInstant,
    Query(query): Query<DailyPickQuery>,
) -> AppResult<Json<DailyPickResponse>> {
    let date = query
        .date
        .as_ref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::Validation("Invalid date, expected YYYY-MM-DD".to_string()))?;

    if let Some(date) = date.filter(|d| !PICK_YEARS.contains(&d.year())) {
        return Err(AppError::Validation(format!("Date {} is out of range", date)));
    }

    let pick = state.services.daily_pick.pick(date, now).await?;
    Ok(Json(pick))
}

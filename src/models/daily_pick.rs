//! Daily pick models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::venue::{Venue, VenueView};

/// The featured venue for one market-local calendar date
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyPick {
    pub winner_id: i64,
    pub runner_up_id: Option<i64>,
    /// Why this venue, evaluated against the current instant
    pub reason: String,
    pub generated_for_date: NaiveDate,
}

/// Daily pick response body
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyPickResponse {
    pub date: NaiveDate,
    pub winner: VenueView,
    pub reason: String,
    pub runner_up: Option<Venue>,
}

/// Query parameters for the daily pick
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DailyPickQuery {
    /// Calendar date (YYYY-MM-DD), defaults to today in market time
    pub date: Option<String>,
    /// Evaluation instant (RFC 3339), defaults to now
    pub at: Option<String>,
}

//! RSVP API endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::{success, ApiResult, ListParams};
use crate::models::{CreateRsvpRequest, Rsvp, RsvpStats};
use crate::AppState;

/// GET /api/rsvp - List RSVPs, public ones unless `publicOnly=false`.
pub async fn list_rsvps(
    State(state): State<AppState>,
    params: ListParams,
) -> ApiResult<Vec<Rsvp>> {
    let rsvps = state.queries.list_rsvps(params.public_only()).await?;
    success(rsvps)
}

/// POST /api/rsvp - Record a new attendance confirmation.
pub async fn create_rsvp(
    State(state): State<AppState>,
    payload: Result<Json<CreateRsvpRequest>, JsonRejection>,
) -> ApiResult<Rsvp> {
    let Json(request) = payload?;
    let rsvp = state.submissions.create_rsvp(request).await?;
    success(rsvp)
}

/// GET /api/rsvp/stats - Attendance totals.
pub async fn rsvp_stats(State(state): State<AppState>) -> ApiResult<RsvpStats> {
    let stats = state.queries.rsvp_stats().await?;
    success(stats)
}

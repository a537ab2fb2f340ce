//! Wish API endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::{success, ApiResult, ListParams};
use crate::models::{CreateWishRequest, Wish};
use crate::AppState;

/// GET /api/wishes - List wishes, public ones unless `publicOnly=false`.
pub async fn list_wishes(
    State(state): State<AppState>,
    params: ListParams,
) -> ApiResult<Vec<Wish>> {
    let wishes = state.queries.list_wishes(params.public_only()).await?;
    success(wishes)
}

/// POST /api/wishes - Record a new wish.
pub async fn create_wish(
    State(state): State<AppState>,
    payload: Result<Json<CreateWishRequest>, JsonRejection>,
) -> ApiResult<Wish> {
    let Json(request) = payload?;
    let wish = state.submissions.create_wish(request).await?;
    success(wish)
}

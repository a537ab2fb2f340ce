//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod files;
mod rsvp;
mod wishes;

pub use files::*;
pub use rsvp::*;
pub use wishes::*;

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Query parameters accepted by the listing endpoints.
///
/// Extraction never rejects: the first `publicOnly` wins, and a query
/// string that cannot be decoded is treated as empty.
#[derive(Debug, Default)]
pub struct ListParams {
    pub public_only: Option<String>,
}

impl ListParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let public_only = pairs
            .into_iter()
            .find(|(key, _)| key == "publicOnly")
            .map(|(_, value)| value);
        Self { public_only }
    }

    /// Only an explicit `publicOnly=false` widens the listing.
    pub fn public_only(&self) -> bool {
        self.public_only.as_deref() != Some("false")
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ListParams {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => Ok(Self::from_pairs(pairs)),
            Err(rejection) => {
                tracing::debug!("Ignoring query string: {}", rejection.body_text());
                Ok(Self::default())
            }
        }
    }
}

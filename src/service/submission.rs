//! Validation and insertion of new RSVPs and wishes.

use std::sync::Arc;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{CreateRsvpRequest, CreateWishRequest, NewRsvp, NewWish, Rsvp, Wish};

#[derive(Clone)]
pub struct SubmissionService {
    repo: Arc<Repository>,
}

impl SubmissionService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Validate an RSVP request and append it to the store.
    pub async fn create_rsvp(&self, request: CreateRsvpRequest) -> Result<Rsvp, AppError> {
        let new = NewRsvp::try_from(request)?;
        let rsvp = self.repo.insert_rsvp(&new).await?;

        tracing::info!(
            id = rsvp.id,
            attendance = rsvp.attendance.as_str(),
            "RSVP recorded"
        );
        Ok(rsvp)
    }

    /// Validate a wish request and append it to the store.
    pub async fn create_wish(&self, request: CreateWishRequest) -> Result<Wish, AppError> {
        let new = NewWish::try_from(request)?;
        let wish = self.repo.insert_wish(&new).await?;

        tracing::info!(id = wish.id, "Wish recorded");
        Ok(wish)
    }
}

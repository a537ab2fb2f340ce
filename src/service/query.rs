//! Read-side queries: listings and attendance statistics.

use std::sync::Arc;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{Rsvp, RsvpStats, Wish};

#[derive(Clone)]
pub struct QueryService {
    repo: Arc<Repository>,
}

impl QueryService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// RSVPs newest first. `public_only = false` is not access-checked.
    pub async fn list_rsvps(&self, public_only: bool) -> Result<Vec<Rsvp>, AppError> {
        if !public_only {
            tracing::debug!("Listing RSVPs including private records");
        }
        self.repo.list_rsvps(public_only).await
    }

    /// Wishes newest first. `public_only = false` is not access-checked.
    pub async fn list_wishes(&self, public_only: bool) -> Result<Vec<Wish>, AppError> {
        if !public_only {
            tracing::debug!("Listing wishes including private records");
        }
        self.repo.list_wishes(public_only).await
    }

    /// Attendance totals over every RSVP, private ones included.
    pub async fn rsvp_stats(&self) -> Result<RsvpStats, AppError> {
        let rsvps = self.repo.list_rsvps(false).await?;
        Ok(RsvpStats::from_records(&rsvps))
    }
}

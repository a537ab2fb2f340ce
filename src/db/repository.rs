//! Database repository for the append-only record tables.
//!
//! Every write is a single `INSERT ... RETURNING` statement, so a failed
//! submission never leaves a partial row behind.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Attendance, NewRsvp, NewWish, Rsvp, Wish};

const RSVP_COLUMNS: &str =
    "id, name, email, phone, attendance, guest_count, is_public, created_at, updated_at";
const WISH_COLUMNS: &str = "id, name, email, message, is_public, created_at, updated_at";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the underlying pool. Later calls fail with a store error.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ==================== RSVP OPERATIONS ====================

    /// Insert a validated RSVP and return the stored row.
    pub async fn insert_rsvp(&self, rsvp: &NewRsvp) -> Result<Rsvp, AppError> {
        let now = timestamp(Utc::now());

        let row = sqlx::query(&format!(
            "INSERT INTO rsvp (name, email, phone, attendance, guest_count, is_public, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            RSVP_COLUMNS
        ))
        .bind(&rsvp.name)
        .bind(&rsvp.email)
        .bind(&rsvp.phone)
        .bind(rsvp.attendance.as_str())
        .bind(&rsvp.guest_count)
        .bind(rsvp.is_public)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        Ok(rsvp_from_row(&row)?)
    }

    /// List RSVPs newest first, optionally only the public ones.
    pub async fn list_rsvps(&self, public_only: bool) -> Result<Vec<Rsvp>, AppError> {
        let filter = if public_only { "WHERE is_public = 1" } else { "" };
        let rows = sqlx::query(&format!(
            "SELECT {} FROM rsvp {} ORDER BY created_at DESC, id DESC",
            RSVP_COLUMNS, filter
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| rsvp_from_row(row).map_err(AppError::from))
            .collect()
    }

    // ==================== WISH OPERATIONS ====================

    /// Insert a validated wish and return the stored row.
    pub async fn insert_wish(&self, wish: &NewWish) -> Result<Wish, AppError> {
        let now = timestamp(Utc::now());

        let row = sqlx::query(&format!(
            "INSERT INTO wishes (name, email, message, is_public, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
            WISH_COLUMNS
        ))
        .bind(&wish.name)
        .bind(&wish.email)
        .bind(&wish.message)
        .bind(wish.is_public)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        Ok(wish_from_row(&row)?)
    }

    /// List wishes newest first, optionally only the public ones.
    pub async fn list_wishes(&self, public_only: bool) -> Result<Vec<Wish>, AppError> {
        let filter = if public_only { "WHERE is_public = 1" } else { "" };
        let rows = sqlx::query(&format!(
            "SELECT {} FROM wishes {} ORDER BY created_at DESC, id DESC",
            WISH_COLUMNS, filter
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| wish_from_row(row).map_err(AppError::from))
            .collect()
    }
}

// ==================== HELPER FUNCTIONS ====================

/// Fixed-width UTC timestamp, so text ordering matches time ordering.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn rsvp_from_row(row: &SqliteRow) -> Result<Rsvp, sqlx::Error> {
    let attendance: String = row.try_get("attendance")?;
    let attendance = Attendance::parse(&attendance).ok_or_else(|| {
        sqlx::Error::Decode(format!("unknown attendance value '{}'", attendance).into())
    })?;

    Ok(Rsvp {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        attendance,
        guest_count: row.try_get("guest_count")?,
        is_public: row.try_get("is_public")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn wish_from_row(row: &SqliteRow) -> Result<Wish, sqlx::Error> {
    Ok(Wish {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        message: row.try_get("message")?,
        is_public: row.try_get("is_public")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

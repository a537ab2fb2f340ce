//! Wish model matching the frontend Wish interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate::{optional_text, required_text};
use crate::errors::AppError;

const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;

/// A stored well-wish message from a guest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new wish.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// A validated wish ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWish {
    pub name: String,
    pub email: Option<String>,
    pub message: String,
    pub is_public: bool,
}

impl TryFrom<CreateWishRequest> for NewWish {
    type Error = AppError;

    fn try_from(request: CreateWishRequest) -> Result<Self, Self::Error> {
        let name = required_text("Name", &request.name, MAX_NAME_LEN)?;
        let email = optional_text("Email", request.email.as_deref(), MAX_EMAIL_LEN)?;
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }

        Ok(NewWish {
            name,
            email,
            message: message.to_string(),
            is_public: request.is_public.unwrap_or(true),
        })
    }
}

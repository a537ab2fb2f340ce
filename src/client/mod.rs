//! Typed HTTP client for the invitation API, plus the form controllers and
//! asset preloader built on it.

mod form;
mod preload;

pub use form::*;
pub use preload::*;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::ErrorDetails;
use crate::models::{CreateRsvpRequest, CreateWishRequest, Rsvp, RsvpStats, Wish};

/// Errors surfaced to the form controllers.
#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a response
    Transport(String),
    /// The server answered with a failure envelope or status
    Api { status: u16, message: String },
    /// The response body was not the expected shape
    Decode(String),
    /// A submission from the same form is still in flight
    Busy,
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "transport error: {}", msg),
            ClientError::Api { status, message } => write!(f, "API error {}: {}", status, message),
            ClientError::Decode(msg) => write!(f, "invalid response: {}", msg),
            ClientError::Busy => write!(f, "submission already in progress"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Either envelope the server sends back.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<ErrorDetails>,
}

/// Client for the `/api` routes of one invitation site.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub async fn create_rsvp(&self, request: &CreateRsvpRequest) -> Result<Rsvp, ClientError> {
        self.post("/rsvp", request).await
    }

    pub async fn list_rsvps(&self, public_only: bool) -> Result<Vec<Rsvp>, ClientError> {
        self.get(&format!("/rsvp?publicOnly={}", public_only)).await
    }

    pub async fn rsvp_stats(&self) -> Result<RsvpStats, ClientError> {
        self.get("/rsvp/stats").await
    }

    pub async fn create_wish(&self, request: &CreateWishRequest) -> Result<Wish, ClientError> {
        self.post("/wishes", request).await
    }

    pub async fn list_wishes(&self, public_only: bool) -> Result<Vec<Wish>, ClientError> {
        self.get(&format!("/wishes?publicOnly={}", public_only)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(path)).send().await?;
        unwrap_envelope(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        unwrap_envelope(response).await
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    let envelope: Envelope<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            })
        }
        Err(e) => return Err(ClientError::Decode(e.to_string())),
    };

    match (envelope.success && status.is_success(), envelope.data) {
        (true, Some(data)) => Ok(data),
        (true, None) => Err(ClientError::Decode("missing data".to_string())),
        (false, _) => Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| format!("request failed with status {}", status)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.url("/rsvp"), "http://localhost:3000/api/rsvp");
    }

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Api {
            status: 400,
            message: "Message is required".to_string(),
        };
        assert_eq!(err.to_string(), "API error 400: Message is required");
    }
}

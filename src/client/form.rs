//! RSVP and wish form controllers.
//!
//! Each controller moves through `Idle -> Submitting -> Success | Error` and
//! back to `Idle` on the next edit. A successful submission clears the form
//! and re-reads the listing from the server; a failed one keeps the input.

use super::{ApiClient, ClientError};
use crate::models::{
    Attendance, CreateRsvpRequest, CreateWishRequest, GuestCountInput, Rsvp, RsvpStats, Wish,
    DEFAULT_GUEST_COUNT,
};

/// Where a form is in its submit cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// Editable RSVP form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub attendance: Attendance,
    pub guest_count: String,
    pub is_public: bool,
}

impl Default for RsvpForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            attendance: Attendance::Attending,
            guest_count: DEFAULT_GUEST_COUNT.to_string(),
            is_public: true,
        }
    }
}

impl RsvpForm {
    pub fn to_request(&self) -> CreateRsvpRequest {
        CreateRsvpRequest {
            name: self.name.clone(),
            email: non_blank(&self.email),
            phone: non_blank(&self.phone),
            attendance: Some(self.attendance.as_str().to_string()),
            guest_count: Some(GuestCountInput::Text(self.guest_count.clone())),
            is_public: Some(self.is_public),
        }
    }
}

/// Editable wish form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub is_public: bool,
}

impl Default for WishForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            is_public: true,
        }
    }
}

impl WishForm {
    pub fn to_request(&self) -> CreateWishRequest {
        CreateWishRequest {
            name: self.name.clone(),
            email: non_blank(&self.email),
            message: self.message.clone(),
            is_public: Some(self.is_public),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Form values plus submit status.
#[derive(Debug, Clone, Default)]
struct FormState<F> {
    form: F,
    status: SubmitStatus,
}

impl<F: Default + Clone> FormState<F> {
    fn edit(&mut self, change: impl FnOnce(&mut F)) {
        if self.status == SubmitStatus::Submitting {
            return;
        }
        change(&mut self.form);
        self.status = SubmitStatus::Idle;
    }

    fn begin(&mut self) -> Result<F, ClientError> {
        if self.status == SubmitStatus::Submitting {
            return Err(ClientError::Busy);
        }
        self.status = SubmitStatus::Submitting;
        Ok(self.form.clone())
    }

    fn succeed(&mut self) {
        self.form = F::default();
        self.status = SubmitStatus::Success;
    }

    fn fail(&mut self, err: &ClientError) {
        self.status = SubmitStatus::Error(err.to_string());
    }
}

/// Drives the RSVP form, the public RSVP list and the attendance totals.
#[derive(Debug)]
pub struct RsvpController {
    client: ApiClient,
    state: FormState<RsvpForm>,
    rsvps: Vec<Rsvp>,
    stats: RsvpStats,
}

impl RsvpController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: FormState::default(),
            rsvps: Vec::new(),
            stats: RsvpStats::default(),
        }
    }

    pub fn form(&self) -> &RsvpForm {
        &self.state.form
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.state.status
    }

    pub fn rsvps(&self) -> &[Rsvp] {
        &self.rsvps
    }

    pub fn stats(&self) -> RsvpStats {
        self.stats
    }

    /// The submit control is disabled while a submission is in flight.
    pub fn can_submit(&self) -> bool {
        self.state.status != SubmitStatus::Submitting
    }

    pub fn edit(&mut self, change: impl FnOnce(&mut RsvpForm)) {
        self.state.edit(change);
    }

    /// Load the public listing and the totals together.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let (rsvps, stats) =
            tokio::try_join!(self.client.list_rsvps(true), self.client.rsvp_stats())?;
        self.rsvps = rsvps;
        self.stats = stats;
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<Rsvp, ClientError> {
        let form = self.state.begin()?;

        match self.client.create_rsvp(&form.to_request()).await {
            Ok(rsvp) => {
                self.state.succeed();
                if let Err(e) = self.refresh().await {
                    tracing::warn!("Failed to refresh RSVPs after submit: {}", e);
                }
                Ok(rsvp)
            }
            Err(e) => {
                self.state.fail(&e);
                Err(e)
            }
        }
    }
}

/// Drives the wish form and the public wish list.
#[derive(Debug)]
pub struct WishController {
    client: ApiClient,
    state: FormState<WishForm>,
    wishes: Vec<Wish>,
}

impl WishController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: FormState::default(),
            wishes: Vec::new(),
        }
    }

    pub fn form(&self) -> &WishForm {
        &self.state.form
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.state.status
    }

    pub fn wishes(&self) -> &[Wish] {
        &self.wishes
    }

    pub fn can_submit(&self) -> bool {
        self.state.status != SubmitStatus::Submitting
    }

    pub fn edit(&mut self, change: impl FnOnce(&mut WishForm)) {
        self.state.edit(change);
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.wishes = self.client.list_wishes(true).await?;
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<Wish, ClientError> {
        let form = self.state.begin()?;

        match self.client.create_wish(&form.to_request()).await {
            Ok(wish) => {
                self.state.succeed();
                if let Err(e) = self.refresh().await {
                    tracing::warn!("Failed to refresh wishes after submit: {}", e);
                }
                Ok(wish)
            }
            Err(e) => {
                self.state.fail(&e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsvp_form_defaults() {
        let form = RsvpForm::default();
        let request = form.to_request();

        assert_eq!(request.attendance.as_deref(), Some("hadir"));
        assert_eq!(
            request.guest_count,
            Some(GuestCountInput::Text("1".to_string()))
        );
        assert_eq!(request.is_public, Some(true));
        assert_eq!(request.email, None);
    }

    #[test]
    fn test_edit_returns_to_idle() {
        let mut state = FormState::<WishForm>::default();
        state.fail(&ClientError::Transport("offline".to_string()));

        state.edit(|form| form.message = "Selamat".to_string());

        assert_eq!(state.status, SubmitStatus::Idle);
        assert_eq!(state.form.message, "Selamat");
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut state = FormState::<WishForm>::default();

        assert!(state.begin().is_ok());
        assert!(matches!(state.begin(), Err(ClientError::Busy)));

        // Edits are ignored while submitting
        state.edit(|form| form.name = "Sari".to_string());
        assert_eq!(state.form.name, "");
        assert_eq!(state.status, SubmitStatus::Submitting);
    }

    #[test]
    fn test_success_clears_form() {
        let mut state = FormState::<RsvpForm>::default();
        state.edit(|form| {
            form.name = "Rudi".to_string();
            form.guest_count = "3".to_string();
        });

        state.begin().unwrap();
        state.succeed();

        assert_eq!(state.form, RsvpForm::default());
        assert_eq!(state.status, SubmitStatus::Success);
    }
}

//! RSVP model matching the frontend RSVP interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate::{optional_text, required_text};
use crate::errors::AppError;

/// Default party size when none is given.
pub const DEFAULT_GUEST_COUNT: &str = "1";

const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 50;
const MAX_GUEST_COUNT_LEN: usize = 10;

/// Whether the guest will attend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Attendance {
    #[serde(rename = "hadir", alias = "attending")]
    Attending,
    #[serde(rename = "tidak_hadir", alias = "not_attending")]
    NotAttending,
}

impl Attendance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Attending => "hadir",
            Attendance::NotAttending => "tidak_hadir",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hadir" | "attending" => Some(Attendance::Attending),
            "tidak_hadir" | "not_attending" => Some(Attendance::NotAttending),
            _ => None,
        }
    }
}

/// A stored attendance confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub attendance: Attendance,
    pub guest_count: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rsvp {
    /// Number of people this confirmation brings, read from the leading
    /// digits of the stored text ("2 orang" is 2). No digits counts as one.
    pub fn headcount(&self) -> u64 {
        let text = self.guest_count.trim_start();
        let text = text.strip_prefix('+').unwrap_or(text);
        let digits = text
            .find(|c: char| !c.is_ascii_digit())
            .map_or(text, |end| &text[..end]);

        if digits.is_empty() {
            return 1;
        }
        digits.parse::<u64>().unwrap_or(u64::MAX)
    }
}

/// Text that starts with a minus sign followed by a digit reads as a
/// negative count.
fn is_negative_count(text: &str) -> bool {
    text.strip_prefix('-')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

fn guest_count_from(input: Option<GuestCountInput>) -> Result<String, AppError> {
    let text = match input {
        None => return Ok(DEFAULT_GUEST_COUNT.to_string()),
        Some(GuestCountInput::Number(n)) => n.to_string(),
        Some(GuestCountInput::Text(text)) => text,
    };

    if is_negative_count(text.trim()) {
        return Err(AppError::Validation(
            "Guest count cannot be negative".to_string(),
        ));
    }

    Ok(optional_text("Guest count", Some(text.as_str()), MAX_GUEST_COUNT_LEN)?
        .unwrap_or_else(|| DEFAULT_GUEST_COUNT.to_string()))
}

/// `guestCount` as sent by clients: usually text, sometimes a bare number.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum GuestCountInput {
    Text(String),
    Number(i64),
}

/// Request body for creating a new RSVP.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRsvpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub attendance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<GuestCountInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// A validated RSVP ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRsvp {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub attendance: Attendance,
    pub guest_count: String,
    pub is_public: bool,
}

impl TryFrom<CreateRsvpRequest> for NewRsvp {
    type Error = AppError;

    fn try_from(request: CreateRsvpRequest) -> Result<Self, Self::Error> {
        let name = required_text("Name", &request.name, MAX_NAME_LEN)?;
        let email = optional_text("Email", request.email.as_deref(), MAX_EMAIL_LEN)?;
        let phone = optional_text("Phone", request.phone.as_deref(), MAX_PHONE_LEN)?;

        let attendance = match request.attendance.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(AppError::Validation("Attendance is required".to_string()))
            }
            Some(value) => Attendance::parse(value).ok_or_else(|| {
                AppError::Validation(format!(
                    "Attendance must be 'hadir' or 'tidak_hadir', got '{}'",
                    value
                ))
            })?,
        };

        let guest_count = guest_count_from(request.guest_count)?;

        Ok(NewRsvp {
            name,
            email,
            phone,
            attendance,
            guest_count,
            is_public: request.is_public.unwrap_or(true),
        })
    }
}

/// Aggregate attendance figures over every RSVP, public or not.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RsvpStats {
    pub total: u64,
    pub attending: u64,
    pub not_attending: u64,
    pub total_guests: u64,
}

impl RsvpStats {
    pub fn from_records(rsvps: &[Rsvp]) -> Self {
        rsvps.iter().fold(Self::default(), |mut stats, rsvp| {
            stats.total = stats.total.saturating_add(1);
            match rsvp.attendance {
                Attendance::Attending => {
                    stats.attending = stats.attending.saturating_add(1);
                    stats.total_guests = stats.total_guests.saturating_add(rsvp.headcount());
                }
                Attendance::NotAttending => {
                    stats.not_attending = stats.not_attending.saturating_add(1)
                }
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(attendance: Attendance, guest_count: &str) -> Rsvp {
        let now = Utc::now();
        Rsvp {
            id: 1,
            name: "Guest".to_string(),
            email: None,
            phone: None,
            attendance,
            guest_count: guest_count.to_string(),
            is_public: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn request(body: serde_json::Value) -> CreateRsvpRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_stats_sum_attending_guests_only() {
        let rsvps = vec![
            record(Attendance::Attending, "2"),
            record(Attendance::Attending, "3"),
            record(Attendance::NotAttending, "4"),
        ];

        let stats = RsvpStats::from_records(&rsvps);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.attending, 2);
        assert_eq!(stats.not_attending, 1);
        assert_eq!(stats.total_guests, 5);
    }

    #[test]
    fn test_unparsable_guest_count_counts_as_one() {
        let rsvps = vec![
            record(Attendance::Attending, "two"),
            record(Attendance::Attending, ""),
            record(Attendance::Attending, " 4 "),
        ];

        assert_eq!(RsvpStats::from_records(&rsvps).total_guests, 6);
    }

    #[test]
    fn test_headcount_reads_leading_digits() {
        assert_eq!(record(Attendance::Attending, "2 orang").headcount(), 2);
        assert_eq!(record(Attendance::Attending, "+3").headcount(), 3);
        assert_eq!(record(Attendance::Attending, "0").headcount(), 0);
        assert_eq!(record(Attendance::Attending, "orang 2").headcount(), 1);
    }

    #[test]
    fn test_stats_saturate_instead_of_overflowing() {
        let huge = "9".repeat(25);
        let rsvps = vec![
            record(Attendance::Attending, &huge),
            record(Attendance::Attending, "9223372036854775807"),
            record(Attendance::Attending, "9223372036854775807"),
        ];

        let stats = RsvpStats::from_records(&rsvps);

        assert_eq!(stats.attending, 3);
        assert_eq!(stats.total_guests, u64::MAX);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(RsvpStats::from_records(&[]), RsvpStats::default());
    }

    #[test]
    fn test_attendance_wire_values() {
        assert_eq!(
            serde_json::to_value(Attendance::Attending).unwrap(),
            "hadir"
        );
        assert_eq!(
            serde_json::from_str::<Attendance>("\"not_attending\"").unwrap(),
            Attendance::NotAttending
        );
        assert_eq!(Attendance::parse("maybe"), None);
    }

    #[test]
    fn test_validate_applies_defaults() {
        let new = NewRsvp::try_from(request(serde_json::json!({
            "name": "  Rudi  ",
            "attendance": "hadir",
            "email": "   "
        })))
        .unwrap();

        assert_eq!(new.name, "Rudi");
        assert_eq!(new.email, None);
        assert_eq!(new.guest_count, "1");
        assert!(new.is_public);
    }

    #[test]
    fn test_validate_numeric_guest_count() {
        let new = NewRsvp::try_from(request(serde_json::json!({
            "name": "Rudi",
            "attendance": "hadir",
            "guestCount": 3
        })))
        .unwrap();
        assert_eq!(new.guest_count, "3");

        let err = NewRsvp::try_from(request(serde_json::json!({
            "name": "Rudi",
            "attendance": "hadir",
            "guestCount": -1
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_numeric_guest_count_obeys_length_limit() {
        let err = NewRsvp::try_from(request(serde_json::json!({
            "name": "Big",
            "attendance": "hadir",
            "guestCount": i64::MAX
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.message().contains("Guest count"));

        let new = NewRsvp::try_from(request(serde_json::json!({
            "name": "Big",
            "attendance": "hadir",
            "guestCount": 9_999_999_999_i64
        })))
        .unwrap();
        assert_eq!(new.guest_count, "9999999999");
    }

    #[test]
    fn test_negative_guest_count_rejected_as_text_or_number() {
        for guest_count in [
            serde_json::json!(-1),
            serde_json::json!("-1"),
            serde_json::json!(" -2 orang"),
        ] {
            let err = NewRsvp::try_from(request(serde_json::json!({
                "name": "Rudi",
                "attendance": "hadir",
                "guestCount": guest_count
            })))
            .unwrap_err();
            assert_eq!(err.message(), "Guest count cannot be negative");
        }

        let new = NewRsvp::try_from(request(serde_json::json!({
            "name": "Rudi",
            "attendance": "hadir",
            "guestCount": "2 orang"
        })))
        .unwrap();
        assert_eq!(new.guest_count, "2 orang");
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let missing_name = NewRsvp::try_from(request(serde_json::json!({
            "name": " ",
            "attendance": "hadir"
        })));
        assert!(matches!(missing_name, Err(AppError::Validation(_))));

        let missing_attendance = NewRsvp::try_from(request(serde_json::json!({
            "name": "Rudi"
        })));
        assert!(matches!(missing_attendance, Err(AppError::Validation(_))));

        let bad_attendance = NewRsvp::try_from(request(serde_json::json!({
            "name": "Rudi",
            "attendance": "maybe"
        })));
        assert!(matches!(bad_attendance, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_length_limits() {
        let err = NewRsvp::try_from(request(serde_json::json!({
            "name": "Rudi",
            "attendance": "hadir",
            "phone": "0".repeat(51)
        })))
        .unwrap_err();

        assert!(err.message().contains("Phone"));
    }
}

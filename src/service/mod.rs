//! Service layer between the HTTP handlers and the repository.

mod query;
mod submission;

pub use query::*;
pub use submission::*;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::db::{init_database, Repository};
    use crate::errors::AppError;
    use crate::models::{Attendance, CreateRsvpRequest, CreateWishRequest, GuestCountInput};

    async fn services() -> (SubmissionService, QueryService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite:{}", temp_dir.path().join("svc.sqlite").display());
        let pool = init_database(&url, 2).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));
        (
            SubmissionService::new(repo.clone()),
            QueryService::new(repo),
            temp_dir,
        )
    }

    fn rsvp(name: &str, attendance: &str, guests: &str, is_public: bool) -> CreateRsvpRequest {
        CreateRsvpRequest {
            name: name.to_string(),
            attendance: Some(attendance.to_string()),
            guest_count: Some(GuestCountInput::Text(guests.to_string())),
            is_public: Some(is_public),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_created_rsvp_is_listed() {
        let (submit, query, _dir) = services().await;

        let created = submit
            .create_rsvp(CreateRsvpRequest {
                email: Some("rudi@example.com".to_string()),
                ..rsvp("Rudi", "hadir", "2", false)
            })
            .await
            .unwrap();

        assert_eq!(created.attendance, Attendance::Attending);
        assert_eq!(created.email.as_deref(), Some("rudi@example.com"));

        let all = query.list_rsvps(false).await.unwrap();
        assert_eq!(all, vec![created]);
        assert!(query.list_rsvps(true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats_include_private_records() {
        let (submit, query, _dir) = services().await;

        submit.create_rsvp(rsvp("A", "hadir", "2", true)).await.unwrap();
        submit.create_rsvp(rsvp("B", "hadir", "3", false)).await.unwrap();
        submit
            .create_rsvp(rsvp("C", "tidak_hadir", "5", true))
            .await
            .unwrap();

        let stats = query.rsvp_stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.attending, 2);
        assert_eq!(stats.not_attending, 1);
        assert_eq!(stats.total_guests, 5);
    }

    #[tokio::test]
    async fn test_rejected_wish_writes_nothing() {
        let (submit, query, _dir) = services().await;

        let err = submit
            .create_wish(CreateWishRequest {
                name: "Sari".to_string(),
                message: String::new(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(query.list_wishes(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_newest_first() {
        let (submit, query, _dir) = services().await;

        for i in 0..5 {
            submit
                .create_wish(CreateWishRequest {
                    name: format!("Guest {}", i),
                    message: "Selamat!".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let wishes = query.list_wishes(true).await.unwrap();
        assert_eq!(wishes.len(), 5);
        assert_eq!(wishes[0].name, "Guest 4");
        assert!(wishes
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at && w[0].id > w[1].id));
    }
}

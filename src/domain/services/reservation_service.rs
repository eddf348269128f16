use std::sync::Arc;

use tracing::info;

use crate::domain::models::reservation::{Reservation, ReservationDraft, ReservationKind};
use crate::domain::ports::ReservationRepository;
use crate::domain::services::availability::{AvailabilityChecker, Slot};
use crate::error::AppError;

/// Reservation lifecycle per kind. Every write passes the availability check
/// first; drafts arrive already validated.
pub struct ReservationService {
    repo: Arc<dyn ReservationRepository>,
    checker: AvailabilityChecker,
}

impl ReservationService {
    pub fn new(repo: Arc<dyn ReservationRepository>) -> Self {
        Self {
            checker: AvailabilityChecker::new(repo.clone()),
            repo,
        }
    }

    pub async fn add(&self, draft: ReservationDraft) -> Result<Reservation, AppError> {
        self.checker.ensure_available(&Slot::from(&draft.details), None).await?;

        let created = self.repo.create(&Reservation::new(draft)).await?;
        info!(kind = %created.kind(), id = %created.id, "Reservation created");
        Ok(created)
    }

    pub async fn update(&self, kind: ReservationKind, id: &str, draft: ReservationDraft) -> Result<Reservation, AppError> {
        if draft.kind() != kind {
            return Err(AppError::Validation(format!("Expected a {} reservation", kind.label().to_lowercase())));
        }

        let mut reservation = self.repo.find_by_id(kind, id).await?
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;

        self.checker.ensure_available(&Slot::from(&draft.details), Some(id)).await?;

        reservation.apply(draft);
        let updated = self.repo.update(&reservation).await?
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;

        info!(kind = %kind, id = %updated.id, "Reservation updated");
        Ok(updated)
    }

    pub async fn delete(&self, kind: ReservationKind, id: &str) -> Result<(), AppError> {
        self.repo.delete(kind, id).await?;
        info!(kind = %kind, id = %id, "Reservation deleted");
        Ok(())
    }

    pub async fn list(&self, kind: ReservationKind) -> Result<Vec<Reservation>, AppError> {
        self.repo.list(kind).await
    }

    /// Exact match on the customer name; an empty result is a 404.
    pub async fn search(&self, kind: ReservationKind, customer_name: &str) -> Result<Vec<Reservation>, AppError> {
        let found = self.repo.list_by_customer_name(kind, customer_name).await?;
        if found.is_empty() {
            return Err(AppError::NotFound("Reservation not found".into()));
        }
        Ok(found)
    }

    pub async fn list_by_email(&self, kind: ReservationKind, email: &str) -> Result<Vec<Reservation>, AppError> {
        self.repo.list_by_email(kind, email).await
    }

    pub async fn count(&self, kind: ReservationKind) -> Result<i64, AppError> {
        self.repo.count(kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::reservation::{
        ClockTime, ContactDetails, OutdoorDetails, ReservationDetails, TableDetails,
    };
    use crate::infra::repositories::memory_reservation_repo::MemoryReservationRepo;
    use chrono::NaiveDate;

    fn contact(name: &str) -> ContactDetails {
        ContactDetails {
            customer_name: name.into(),
            email: "guest@example.com".into(),
            phone_number: "0771234567".into(),
            number_of_guests: 4,
        }
    }

    fn table(name: &str, table_no: &str, from: &str, to: &str) -> ReservationDraft {
        ReservationDraft {
            contact: contact(name),
            details: ReservationDetails::Table(TableDetails {
                table_no: table_no.into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                time_from: ClockTime::parse(from).unwrap(),
                time_to: ClockTime::parse(to).unwrap(),
            }),
        }
    }

    fn service() -> ReservationService {
        ReservationService::new(Arc::new(MemoryReservationRepo::default()))
    }

    #[tokio::test]
    async fn test_add_rejects_double_booking() {
        let svc = service();
        svc.add(table("Ann Lee", "5", "18:00", "19:00")).await.unwrap();

        let err = svc.add(table("Bob Ray", "5", "18:30", "19:30")).await.unwrap_err();
        assert!(matches!(err, AppError::SlotUnavailable { .. }));

        svc.add(table("Bob Ray", "5", "19:00", "20:00")).await.unwrap();
        assert_eq!(svc.count(ReservationKind::Table).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_with_identical_values_succeeds() {
        let svc = service();
        let created = svc.add(table("Ann Lee", "5", "18:00", "19:00")).await.unwrap();

        let updated = svc
            .update(ReservationKind::Table, &created.id, table("Ann Lee", "5", "18:00", "19:00"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_into_another_booking_is_rejected() {
        let svc = service();
        svc.add(table("Ann Lee", "5", "18:00", "19:00")).await.unwrap();
        let second = svc.add(table("Bob Ray", "5", "20:00", "21:00")).await.unwrap();

        let err = svc
            .update(ReservationKind::Table, &second.id, table("Bob Ray", "5", "18:30", "19:30"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SlotUnavailable { .. }));

        let stored = svc.list(ReservationKind::Table).await.unwrap();
        assert_eq!(stored[1].details, second.details);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let svc = service();
        let err = svc
            .update(ReservationKind::Table, "missing", table("Ann Lee", "5", "18:00", "19:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_cannot_change_kind() {
        let svc = service();
        let created = svc.add(table("Ann Lee", "5", "18:00", "19:00")).await.unwrap();
        let outdoor = ReservationDraft {
            contact: contact("Ann Lee"),
            details: ReservationDetails::Outdoor(OutdoorDetails {
                event_type: "Birthday".into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                time_from: ClockTime::parse("10:00").unwrap(),
                time_to: ClockTime::parse("12:00").unwrap(),
            }),
        };

        let err = svc.update(ReservationKind::Table, &created.id, outdoor).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_and_search() {
        let svc = service();
        let created = svc.add(table("Ann Lee", "5", "18:00", "19:00")).await.unwrap();

        assert_eq!(svc.search(ReservationKind::Table, "Ann Lee").await.unwrap().len(), 1);
        assert!(matches!(svc.search(ReservationKind::Table, "ann lee").await, Err(AppError::NotFound(_))));

        svc.delete(ReservationKind::Table, &created.id).await.unwrap();
        assert!(matches!(svc.delete(ReservationKind::Table, &created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.search(ReservationKind::Table, "Ann Lee").await, Err(AppError::NotFound(_))));
    }
}

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::{
    models::reservation::{Reservation, ReservationKind},
    ports::ReservationRepository,
    services::availability::Slot,
};
use crate::error::AppError;
use crate::infra::repositories::rows::first_conflict;

/// Process-local reservation store, kept in insertion order.
#[derive(Default)]
pub struct MemoryReservationRepo {
    reservations: Mutex<Vec<Reservation>>,
    fail_next: AtomicBool,
}

impl MemoryReservationRepo {
    /// Makes the next repository call fail as if the store were unreachable.
    pub fn fail_next_query(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Result<Vec<Reservation>, AppError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::InternalWithMsg("reservation store unavailable".into()));
        }
        self.reservations
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| AppError::InternalWithMsg("reservation store poisoned".into()))
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut Vec<Reservation>) -> T) -> Result<T, AppError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::InternalWithMsg("reservation store unavailable".into()));
        }
        let mut guard = self.reservations
            .lock()
            .map_err(|_| AppError::InternalWithMsg("reservation store poisoned".into()))?;
        Ok(f(&mut guard))
    }

    fn of_kind(&self, kind: ReservationKind) -> Result<Vec<Reservation>, AppError> {
        Ok(self.snapshot()?.into_iter().filter(|r| r.kind() == kind).collect())
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepo {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        self.with_store(|store| {
            store.push(reservation.clone());
            reservation.clone()
        })
    }

    async fn find_by_id(&self, kind: ReservationKind, id: &str) -> Result<Option<Reservation>, AppError> {
        Ok(self.of_kind(kind)?.into_iter().find(|r| r.id == id))
    }

    async fn list(&self, kind: ReservationKind) -> Result<Vec<Reservation>, AppError> {
        self.of_kind(kind)
    }

    async fn list_by_customer_name(&self, kind: ReservationKind, customer_name: &str) -> Result<Vec<Reservation>, AppError> {
        Ok(self.of_kind(kind)?.into_iter().filter(|r| r.contact.customer_name == customer_name).collect())
    }

    async fn list_by_email(&self, kind: ReservationKind, email: &str) -> Result<Vec<Reservation>, AppError> {
        Ok(self.of_kind(kind)?.into_iter().filter(|r| r.contact.email == email).collect())
    }

    async fn count(&self, kind: ReservationKind) -> Result<i64, AppError> {
        Ok(self.of_kind(kind)?.len() as i64)
    }

    async fn update(&self, reservation: &Reservation) -> Result<Option<Reservation>, AppError> {
        self.with_store(|store| {
            store
                .iter_mut()
                .find(|r| r.id == reservation.id && r.kind() == reservation.kind())
                .map(|existing| {
                    *existing = reservation.clone();
                    reservation.clone()
                })
        })
    }

    async fn delete(&self, kind: ReservationKind, id: &str) -> Result<(), AppError> {
        let removed = self.with_store(|store| {
            let before = store.len();
            store.retain(|r| !(r.id == id && r.kind() == kind));
            before != store.len()
        })?;
        if !removed { return Err(AppError::NotFound("Reservation not found".into())); }
        Ok(())
    }

    async fn find_conflict(&self, slot: &Slot, exclude_id: Option<&str>) -> Result<Option<Reservation>, AppError> {
        let candidates = self
            .of_kind(slot.kind())?
            .into_iter()
            .filter(|r| Some(r.id.as_str()) != exclude_id)
            .collect();
        Ok(first_conflict(slot, candidates))
    }
}

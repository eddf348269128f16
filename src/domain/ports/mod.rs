use crate::domain::models::{
    customer::Customer,
    reservation::{Reservation, ReservationKind},
};
use crate::domain::services::availability::Slot;
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError>;
    async fn find_by_id(&self, kind: ReservationKind, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn list(&self, kind: ReservationKind) -> Result<Vec<Reservation>, AppError>;
    async fn list_by_customer_name(&self, kind: ReservationKind, customer_name: &str) -> Result<Vec<Reservation>, AppError>;
    async fn list_by_email(&self, kind: ReservationKind, email: &str) -> Result<Vec<Reservation>, AppError>;
    async fn count(&self, kind: ReservationKind) -> Result<i64, AppError>;
    /// Returns `None` when no row with the reservation's id exists.
    async fn update(&self, reservation: &Reservation) -> Result<Option<Reservation>, AppError>;
    async fn delete(&self, kind: ReservationKind, id: &str) -> Result<(), AppError>;
    /// First stored reservation of the slot's kind that the slot conflicts with,
    /// ignoring `exclude_id`.
    async fn find_conflict(&self, slot: &Slot, exclude_id: Option<&str>) -> Result<Option<Reservation>, AppError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

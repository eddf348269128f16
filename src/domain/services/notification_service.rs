use std::sync::Arc;
use std::time::Duration;

use tera::{Context, Tera};
use tracing::{error, info};

use crate::domain::models::reservation::{Reservation, ReservationKind};
use crate::domain::ports::EmailService;
use crate::error::AppError;

pub fn template_name(kind: ReservationKind) -> &'static str {
    match kind {
        ReservationKind::Outdoor => "outdoor_confirmation.html",
        ReservationKind::Table => "table_confirmation.html",
        ReservationKind::Room => "room_confirmation.html",
    }
}

pub fn subject(kind: ReservationKind) -> &'static str {
    match kind {
        ReservationKind::Outdoor => "Reservation Confirmation - Your Outdoor Space is Ready!",
        ReservationKind::Table => "Reservation Confirmation - Your Table is Ready!",
        ReservationKind::Room => "Room Reservation Confirmation",
    }
}

/// Sends booking confirmations. Runs after the write has committed, so a
/// failure here is reported but never undoes the reservation.
pub struct NotificationService {
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    timeout: Duration,
}

impl NotificationService {
    pub fn new(email_service: Arc<dyn EmailService>, templates: Arc<Tera>, timeout: Duration) -> Self {
        Self { email_service, templates, timeout }
    }

    pub fn render(&self, reservation: &Reservation) -> Result<String, AppError> {
        let context = Context::from_serialize(reservation)
            .map_err(|e| AppError::InternalWithMsg(format!("Template context error: {}", e)))?;

        self.templates
            .render(template_name(reservation.kind()), &context)
            .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {}", e)))
    }

    pub async fn send_confirmation(&self, reservation: &Reservation) -> Result<(), AppError> {
        let body = self.render(reservation)?;
        let recipient = reservation.contact.email.as_str();

        let sent = tokio::time::timeout(
            self.timeout,
            self.email_service.send(recipient, subject(reservation.kind()), &body),
        )
        .await;

        match sent {
            Ok(Ok(())) => {
                info!(id = %reservation.id, "Confirmation email sent to {}", recipient);
                Ok(())
            }
            Ok(Err(e)) => {
                error!(id = %reservation.id, "Confirmation email failed: {}", e);
                Err(e)
            }
            Err(_) => {
                error!(id = %reservation.id, "Confirmation email timed out after {:?}", self.timeout);
                Err(AppError::InternalWithMsg("Confirmation email timed out".into()))
            }
        }
    }
}

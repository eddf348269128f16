use std::sync::Arc;
use crate::domain::ports::CustomerRepository;
use crate::domain::services::{
    auth_service::AuthService, notification_service::NotificationService,
    reservation_service::ReservationService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub reservations: Arc<ReservationService>,
    pub notifications: Arc<NotificationService>,
    pub auth_service: Arc<AuthService>,
}

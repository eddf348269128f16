pub mod auth_service;
pub mod availability;
pub mod notification_service;
pub mod reservation_service;
pub mod validation;

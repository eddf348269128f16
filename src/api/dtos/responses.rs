use serde::Serialize;

use crate::domain::models::{customer::CustomerProfile, reservation::Reservation};

#[derive(Serialize)]
pub struct ReservationResponse {
    pub message: String,
    pub reservation: Reservation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreatedResponse {
    pub message: String,
    pub customer: CustomerProfile,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfileResponse {
    pub customer: CustomerProfile,
    pub outdoor_reservations: Vec<Reservation>,
    pub table_reservations: Vec<Reservation>,
    pub room_reservations: Vec<Reservation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub outdoor_reservations: i64,
    pub table_reservations: i64,
    pub room_reservations: i64,
    pub total: i64,
}

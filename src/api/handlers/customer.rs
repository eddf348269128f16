use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::AppJson;
use crate::api::dtos::requests::{LoginRequest, RegisterCustomerRequest};
use crate::api::dtos::responses::{CustomerCreatedResponse, CustomerProfileResponse};
use crate::domain::models::customer::{Customer, CustomerProfile};
use crate::domain::models::reservation::ReservationKind;
use crate::domain::services::auth_service::{hash_password, verify_password};
use crate::error::{AppError, is_unique_violation};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn register_customer(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<RegisterCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = [&payload.name, &payload.email, &payload.phone, &payload.password];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::Validation("All fields are required".into()));
    }

    let customer = Customer::new(
        payload.name.trim().to_string(),
        payload.email.trim().to_string(),
        payload.phone.trim().to_string(),
        hash_password(&payload.password)?,
    );

    let created = state.customer_repo.create(&customer).await.map_err(|e| match e {
        AppError::Database(db) if is_unique_violation(&db) => {
            AppError::Conflict("A customer with this email already exists".into())
        }
        other => other,
    })?;

    info!("Customer registered: {}", created.id);

    Ok((StatusCode::CREATED, Json(CustomerCreatedResponse {
        message: "New customer added successfully".to_string(),
        customer: CustomerProfile::from(&created),
    })))
}

pub async fn login_customer(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.ensure_complete()?;

    let customer = state.customer_repo.find_by_email(payload.email.trim()).await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &customer.password_hash)? {
        warn!("Failed login for customer {}", customer.id);
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(CustomerProfile::from(&customer)))
}

pub async fn customer_profile(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state.customer_repo.find_by_email(&email).await?
        .ok_or(AppError::NotFound("Customer not found".into()))?;

    let reservations = &state.reservations;
    Ok(Json(CustomerProfileResponse {
        customer: CustomerProfile::from(&customer),
        outdoor_reservations: reservations.list_by_email(ReservationKind::Outdoor, &customer.email).await?,
        table_reservations: reservations.list_by_email(ReservationKind::Table, &customer.email).await?,
        room_reservations: reservations.list_by_email(ReservationKind::Room, &customer.email).await?,
    }))
}

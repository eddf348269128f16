use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::api::extractors::json::AppJson;
use crate::state::AppState;
use crate::api::dtos::requests::ReservationForm;
use crate::api::dtos::responses::{MessageResponse, ReservationResponse};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

/// One set of handlers serves every kind; `F` fixes which table and rules apply.
pub async fn add_reservation<F: ReservationForm>(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<F>,
) -> Result<impl IntoResponse, AppError> {
    let draft = payload.into_draft()?;
    let reservation = state.reservations.add(draft).await?;

    let (message, warning) = match state.notifications.send_confirmation(&reservation).await {
        Ok(()) => (format!("{} Reservation Added and Email Sent", F::KIND), None),
        Err(e) => {
            warn!(id = %reservation.id, "Reservation stored without confirmation email: {}", e);
            (
                format!("{} Reservation Added", F::KIND),
                Some("Reservation added, but failed to send confirmation email.".to_string()),
            )
        }
    };

    Ok((StatusCode::CREATED, Json(ReservationResponse { message, reservation, warning })))
}

pub async fn list_reservations<F: ReservationForm>(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservations.list(F::KIND).await?;
    Ok(Json(reservations))
}

pub async fn update_reservation<F: ReservationForm>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<F>,
) -> Result<impl IntoResponse, AppError> {
    let draft = payload.into_draft()?;
    let reservation = state.reservations.update(F::KIND, &id, draft).await?;

    Ok(Json(ReservationResponse {
        message: "Reservation Updated".to_string(),
        reservation,
        warning: None,
    }))
}

pub async fn delete_reservation<F: ReservationForm>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.reservations.delete(F::KIND, &id).await?;
    Ok(Json(MessageResponse { message: "Reservation Deleted".to_string() }))
}

pub async fn search_reservations<F: ReservationForm>(
    State(state): State<Arc<AppState>>,
    Path(customer_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let kind = F::KIND;
    info!(kind = %kind, "Searching reservations for {}", customer_name);
    let reservations = state.reservations.search(kind, &customer_name).await?;
    Ok(Json(reservations))
}

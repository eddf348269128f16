use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::AppJson;
use crate::api::dtos::requests::LoginRequest;
use crate::api::dtos::responses::DashboardResponse;
use crate::api::extractors::auth::{AdminUser, ACCESS_COOKIE};
use crate::domain::models::auth::{AuthResponse, ROLE_ADMIN};
use crate::domain::models::reservation::ReservationKind;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.ensure_complete()?;
    let token = state.auth_service.login_admin(payload.email.trim(), &payload.password)?;

    let mut access = Cookie::new(ACCESS_COOKIE, token);
    access.set_http_only(true);
    access.set_secure(true);
    access.set_same_site(SameSite::Strict);
    access.set_path("/");
    access.set_max_age(Duration::hours(8));
    cookies.add(access);

    info!("Admin logged in: {}", state.config.admin_email);

    Ok(Json(AuthResponse {
        email: state.config.admin_email.clone(),
        role: ROLE_ADMIN.to_string(),
    }))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    AdminUser(staff): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    info!("Dashboard summary requested by {}", staff.email);

    let outdoor_reservations = state.reservations.count(ReservationKind::Outdoor).await?;
    let table_reservations = state.reservations.count(ReservationKind::Table).await?;
    let room_reservations = state.reservations.count(ReservationKind::Room).await?;

    Ok(Json(DashboardResponse {
        outdoor_reservations,
        table_reservations,
        room_reservations,
        total: outdoor_reservations + table_reservations + room_reservations,
    }))
}

use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::dtos::requests::{OutdoorForm, ReservationForm, RoomForm, TableForm};
use crate::api::handlers::{health, reservation, customer, admin};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

/// CRUD and search routes for one reservation kind, mounted under its prefix.
fn reservation_routes<F: ReservationForm>() -> Router<Arc<AppState>> {
    let prefix = F::KIND.route_prefix();

    Router::new()
        .route(&format!("/{}/add", prefix), post(reservation::add_reservation::<F>))
        .route(&format!("/{}", prefix), get(reservation::list_reservations::<F>))
        .route(&format!("/{}/", prefix), get(reservation::list_reservations::<F>))
        .route(&format!("/{}/update/{{id}}", prefix), put(reservation::update_reservation::<F>))
        .route(&format!("/{}/delete/{{id}}", prefix), delete(reservation::delete_reservation::<F>))
        .route(&format!("/{}/search/{{customer_name}}", prefix), get(reservation::search_reservations::<F>))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Reservations
        .merge(reservation_routes::<OutdoorForm>())
        .merge(reservation_routes::<TableForm>())
        .merge(reservation_routes::<RoomForm>())

        // Customers
        .route("/customer/add", post(customer::register_customer))
        .route("/customer/login", post(customer::login_customer))
        .route("/customer/profile/{email}", get(customer::customer_profile))

        // Staff
        .route("/admin/login", post(admin::login))
        .route("/admin/dashboard", get(admin::dashboard))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        staff = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

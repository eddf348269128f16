use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::auth::{StaffIdentity, ROLE_ADMIN};
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

pub const ACCESS_COOKIE: &str = "access_token";

/// Staff member holding a valid admin access token cookie.
pub struct AdminUser(pub StaffIdentity);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(AppError::InternalWithMsg("Cookie layer missing".into()))?;

        let access_token = cookies.get(ACCESS_COOKIE)
            .ok_or(AppError::Unauthorized)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let identity = app_state.auth_service.verify(&access_token)?;

        if identity.role != ROLE_ADMIN {
            return Err(AppError::Forbidden("Admin role required".into()));
        }

        Span::current().record("staff", &identity.email.as_str());

        Ok(AdminUser(identity))
    }
}

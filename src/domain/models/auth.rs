use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://reservations.local/claims/role")]
    pub role: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub email: String,
    pub role: String,
}

/// Identity resolved from a verified access token.
#[derive(Debug, Clone)]
pub struct StaffIdentity {
    pub email: String,
    pub role: String,
}

use std::env;

use crate::error::AppError;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub mail_from_alias: String,
    pub mail_timeout_ms: u64,
    pub jwt_secret_key: String, // Ed25519 private key (PEM)
    pub jwt_public_key: String, // Ed25519 public key (PEM)
    pub auth_issuer: String,
    pub admin_email: String,
    pub admin_password_hash: String, // argon2 PHC string
}

fn required(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::InternalWithMsg(format!("{} must be set", name)))
}

fn or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::InternalWithMsg(format!("{} must be a number", name))),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: parsed("PORT", 8070)?,
            mail_service_url: or_default("MAIL_SERVICE_URL", "http://localhost:8000/api/v1/send"),
            mail_service_token: or_default("MAIL_SERVICE_TOKEN", "test-token-1"),
            mail_from_alias: or_default("MAIL_FROM_ALIAS", "reservations"),
            mail_timeout_ms: parsed("MAIL_TIMEOUT_MS", 4000)?,
            jwt_secret_key: required("JWT_SECRET_KEY")?,
            jwt_public_key: required("JWT_PUBLIC_KEY")?,
            auth_issuer: or_default("AUTH_ISSUER", "https://api.reservations.local"),
            admin_email: required("ADMIN_EMAIL")?,
            admin_password_hash: required("ADMIN_PASSWORD_HASH")?,
        })
    }
}

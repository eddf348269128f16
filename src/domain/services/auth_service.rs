use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use tracing::{error, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::models::auth::{Claims, StaffIdentity, ROLE_ADMIN};
use crate::error::AppError;

const AUDIENCE: &str = "reservation-dashboard";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))
}

/// `Ok(false)` on a wrong password; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::InternalWithMsg(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Issues and verifies staff access tokens.
pub struct AuthService {
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid JWT private key PEM: {}", e)))?;
        let decoding_key = DecodingKey::from_ed_pem(config.jwt_public_key.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid JWT public key PEM: {}", e)))?;

        Ok(Self { config, encoding_key, decoding_key })
    }

    /// Checks the configured admin credential and returns a signed access token.
    pub fn login_admin(&self, email: &str, password: &str) -> Result<String, AppError> {
        if !email.eq_ignore_ascii_case(&self.config.admin_email)
            || !verify_password(password, &self.config.admin_password_hash)?
        {
            warn!("Rejected admin login for {}", email);
            return Err(AppError::InvalidCredentials);
        }

        self.issue_token(&self.config.admin_email, ROLE_ADMIN)
    }

    fn issue_token(&self, subject: &str, role: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: subject.to_string(),
            aud: AUDIENCE.to_string(),
            exp: (now + Duration::hours(8)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            role: role.to_string(),
        };

        encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)
            .map_err(|e| {
                error!("JWT encoding failed: {}", e);
                AppError::Internal
            })
    }

    pub fn verify(&self, token: &str) -> Result<StaffIdentity, AppError> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[AUDIENCE]);
        validation.set_issuer(&[self.config.auth_issuer.as_str()]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized)?;

        Ok(StaffIdentity {
            email: data.claims.sub,
            role: data.claims.role,
        })
    }
}

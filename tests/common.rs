#![allow(dead_code)]

use reservation_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::{assemble_state, load_templates},
    infra::repositories::{
        sqlite_customer_repo::SqliteCustomerRepo,
        sqlite_reservation_repo::SqliteReservationRepo,
    },
    domain::ports::{EmailService, ReservationRepository},
    domain::services::auth_service::hash_password,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_EMAIL: &str = "admin@restaurant.test";
pub const ADMIN_PASSWORD: &str = "staff-only-123";

#[derive(Default)]
pub struct MockEmailService {
    pub fail: AtomicBool,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl MockEmailService {
    pub fn sent_subjects(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, subject)| subject.clone()).collect()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, _html_body: &str) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::InternalWithMsg("mail relay down".into()));
        }
        self.sent.lock().unwrap().push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub email: Arc<MockEmailService>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_reservation_repo(|pool| Arc::new(SqliteReservationRepo::new(pool)) as Arc<dyn ReservationRepository>).await
    }

    /// Builds the app around a custom reservation repository sharing the test pool.
    pub async fn with_reservation_repo<F>(make_repo: F) -> Self
    where
        F: FnOnce(Pool<Sqlite>) -> Arc<dyn ReservationRepository>,
    {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            mail_from_alias: "reservations".to_string(),
            mail_timeout_ms: 1000,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
        };

        let email = Arc::new(MockEmailService::default());

        let state = Arc::new(assemble_state(
            &config,
            make_repo(pool.clone()),
            Arc::new(SqliteCustomerRepo::new(pool.clone())),
            email.clone(),
            Arc::new(load_templates().unwrap()),
        ).unwrap());

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            email,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Response {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request("GET", uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request("DELETE", uri, None).await
    }

    /// Logs in as the configured admin and returns the access token cookie value.
    pub async fn login_admin(&self) -> String {
        let response = self.post("/admin/login", serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        })).await;

        if !response.status().is_success() {
            panic!("Admin login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        access_token_cookie[start..start + end].to_string()
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

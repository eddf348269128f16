use crate::domain::{models::customer::Customer, ports::CustomerRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCustomerRepo {
    pool: SqlitePool,
}

impl SqliteCustomerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepo {
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (id, name, email, phone, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id, name, email, phone, password_hash, created_at, updated_at",
        )
            .bind(&customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(&customer.password_hash)
            .bind(customer.created_at)
            .bind(customer.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, phone, password_hash, created_at, updated_at FROM customers WHERE email = ?",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}

pub mod rows;
#[cfg(test)]
pub mod memory_reservation_repo;

pub mod sqlite_reservation_repo;
pub mod sqlite_customer_repo;

pub mod postgres_reservation_repo;
pub mod postgres_customer_repo;

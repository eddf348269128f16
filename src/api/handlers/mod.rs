pub mod admin;
pub mod customer;
pub mod health;
pub mod reservation;

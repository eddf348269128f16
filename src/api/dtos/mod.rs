pub mod form_value;
pub mod requests;
pub mod responses;

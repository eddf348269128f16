//! Pure input checks shared by every reservation kind.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Customer name can only contain letters and spaces.")]
    Name,
    #[error("Invalid email format. Must contain an '@' and valid domain.")]
    Email,
    #[error("Invalid time format, must be HH:mm (24-hour format)")]
    Time,
    #[error("Phone number must be exactly 10 digits.")]
    Phone,
    #[error("Number of guests must be a positive number.")]
    Guests,
    #[error("Invalid date format, must be YYYY-MM-DD")]
    Date,
    #[error("Room type must be one of AC, Normal or VIP.")]
    RoomType,
    #[error("{0} is required.")]
    Missing(&'static str),
    #[error("{0}")]
    Range(&'static str),
}

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|error| panic!("validation regex failed to compile: {error}"))
    })
}

pub fn is_valid_name(s: &str) -> bool {
    compiled(&NAME_RE, r"^[A-Za-z\s]+$").is_match(s)
}

pub fn is_valid_email(s: &str) -> bool {
    compiled(&EMAIL_RE, r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_match(s)
}

pub fn is_valid_phone(s: &str) -> bool {
    compiled(&PHONE_RE, r"^[0-9]{10}$").is_match(s)
}

/// Strict zero-padded `HH:MM`, hours 00-23 and minutes 00-59.
pub fn is_valid_time(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    if ![0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit()) {
        return false;
    }
    let hours = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minutes = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hours < 24 && minutes < 60
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    if s.len() != 10 {
        return Err(ValidationError::Date);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ValidationError::Date)
}

pub fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

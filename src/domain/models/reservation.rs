use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::services::validation::{ValidationError, is_valid_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationKind {
    Outdoor,
    Table,
    Room,
}

impl ReservationKind {
    /// URL prefix the kind is served under.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Self::Outdoor => "outdoorReservation",
            Self::Table => "tableReservation",
            Self::Room => "roomReservation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Outdoor => "Outdoor",
            Self::Table => "Table",
            Self::Room => "Room",
        }
    }
}

impl fmt::Display for ReservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Zero-padded 24-hour `HH:MM` time of day.
///
/// The fixed width makes the derived string ordering chronological, which is
/// what the overlap predicates rely on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(String);

impl ClockTime {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if is_valid_time(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(ValidationError::Time)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_time(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::Time)
        }
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "AC")]
    Ac,
    Normal,
    #[serde(rename = "VIP")]
    Vip,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Normal => "Normal",
            Self::Vip => "VIP",
        }
    }
}

impl FromStr for RoomType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AC" => Ok(Self::Ac),
            "Normal" => Ok(Self::Normal),
            "VIP" => Ok(Self::Vip),
            _ => Err(ValidationError::RoomType),
        }
    }
}

/// Fields every reservation carries regardless of kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub customer_name: String,
    pub email: String,
    pub phone_number: String,
    pub number_of_guests: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdoorDetails {
    pub event_type: String,
    pub date: NaiveDate,
    pub time_from: ClockTime,
    pub time_to: ClockTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDetails {
    pub table_no: String,
    pub date: NaiveDate,
    pub time_from: ClockTime,
    pub time_to: ClockTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetails {
    pub room_type: RoomType,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_in_time: ClockTime,
    pub check_out_date: NaiveDate,
    pub check_out_time: ClockTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReservationDetails {
    Outdoor(OutdoorDetails),
    Table(TableDetails),
    Room(RoomDetails),
}

impl ReservationDetails {
    pub fn kind(&self) -> ReservationKind {
        match self {
            Self::Outdoor(_) => ReservationKind::Outdoor,
            Self::Table(_) => ReservationKind::Table,
            Self::Room(_) => ReservationKind::Room,
        }
    }
}

/// A validated reservation that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDraft {
    pub contact: ContactDetails,
    pub details: ReservationDetails,
}

impl ReservationDraft {
    pub fn kind(&self) -> ReservationKind {
        self.details.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    #[serde(flatten)]
    pub contact: ContactDetails,
    #[serde(flatten)]
    pub details: ReservationDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(draft: ReservationDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            contact: draft.contact,
            details: draft.details,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> ReservationKind {
        self.details.kind()
    }

    /// Replaces every mutable field; id and creation time are kept.
    pub fn apply(&mut self, draft: ReservationDraft) {
        self.contact = draft.contact;
        self.details = draft.details;
        self.updated_at = Utc::now();
    }
}

//! Row shapes of the per-kind reservation tables, shared by the SQLite and
//! PostgreSQL adapters.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::domain::models::reservation::{
    ClockTime, ContactDetails, OutdoorDetails, Reservation, ReservationDetails, ReservationKind,
    RoomDetails, RoomType, TableDetails,
};
use crate::domain::services::availability::Slot;
use crate::error::{AppError, is_unique_violation};

#[derive(Debug, FromRow)]
pub struct OutdoorRow {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone_number: String,
    pub number_of_guests: i32,
    pub event_type: String,
    pub date: NaiveDate,
    pub time_from: String,
    pub time_to: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct TableRow {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone_number: String,
    pub number_of_guests: i32,
    pub table_no: String,
    pub date: NaiveDate,
    pub time_from: String,
    pub time_to: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct RoomRow {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone_number: String,
    pub number_of_guests: i32,
    pub room_type: String,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_in_time: String,
    pub check_out_date: NaiveDate,
    pub check_out_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn stored_time(id: &str, value: String) -> Result<ClockTime, AppError> {
    ClockTime::try_from(value)
        .map_err(|e| AppError::InternalWithMsg(format!("Corrupt time in reservation {}: {}", id, e)))
}

impl TryFrom<OutdoorRow> for Reservation {
    type Error = AppError;

    fn try_from(row: OutdoorRow) -> Result<Self, Self::Error> {
        Ok(Reservation {
            details: ReservationDetails::Outdoor(OutdoorDetails {
                event_type: row.event_type,
                date: row.date,
                time_from: stored_time(&row.id, row.time_from)?,
                time_to: stored_time(&row.id, row.time_to)?,
            }),
            contact: ContactDetails {
                customer_name: row.customer_name,
                email: row.email,
                phone_number: row.phone_number,
                number_of_guests: row.number_of_guests,
            },
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<TableRow> for Reservation {
    type Error = AppError;

    fn try_from(row: TableRow) -> Result<Self, Self::Error> {
        Ok(Reservation {
            details: ReservationDetails::Table(TableDetails {
                table_no: row.table_no,
                date: row.date,
                time_from: stored_time(&row.id, row.time_from)?,
                time_to: stored_time(&row.id, row.time_to)?,
            }),
            contact: ContactDetails {
                customer_name: row.customer_name,
                email: row.email,
                phone_number: row.phone_number,
                number_of_guests: row.number_of_guests,
            },
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<RoomRow> for Reservation {
    type Error = AppError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let room_type: RoomType = row.room_type.parse()
            .map_err(|_| AppError::InternalWithMsg(format!("Corrupt room type in reservation {}: {}", row.id, row.room_type)))?;

        Ok(Reservation {
            details: ReservationDetails::Room(RoomDetails {
                room_type,
                room_number: row.room_number,
                check_in_date: row.check_in_date,
                check_in_time: stored_time(&row.id, row.check_in_time)?,
                check_out_date: row.check_out_date,
                check_out_time: stored_time(&row.id, row.check_out_time)?,
            }),
            contact: ContactDetails {
                customer_name: row.customer_name,
                email: row.email,
                phone_number: row.phone_number,
                number_of_guests: row.number_of_guests,
            },
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub fn into_reservations<R>(rows: Vec<R>) -> Result<Vec<Reservation>, AppError>
where
    Reservation: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(Reservation::try_from).collect()
}

pub fn table_name(kind: ReservationKind) -> &'static str {
    match kind {
        ReservationKind::Outdoor => "outdoor_reservations",
        ReservationKind::Table => "table_reservations",
        ReservationKind::Room => "room_reservations",
    }
}

/// Maps a unique-index violation on the slot start to a slot conflict; the
/// check-then-write race is the only way to reach it.
pub fn write_error(reservation: &Reservation) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            AppError::SlotUnavailable {
                message: Slot::from(reservation).unavailable_message(),
                conflict: None,
            }
        } else {
            AppError::Database(e)
        }
    }
}

pub fn first_conflict(slot: &Slot, candidates: Vec<Reservation>) -> Option<Reservation> {
    candidates.into_iter().find(|existing| slot.conflicts_with(&Slot::from(existing)))
}

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::models::reservation::{
    ClockTime, Reservation, ReservationDetails, ReservationKind,
};
use crate::domain::ports::ReservationRepository;
use crate::error::AppError;

/// Half-open `[from, to)` interval within a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub from: ClockTime,
    pub to: ClockTime,
}

impl TimeWindow {
    pub fn new(from: ClockTime, to: ClockTime) -> Self {
        Self { from, to }
    }

    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.from < other.to && self.to > other.from
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStay {
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_in_time: ClockTime,
    pub check_out_date: NaiveDate,
    pub check_out_time: ClockTime,
}

impl RoomStay {
    fn contains_span(&self, other: &RoomStay) -> bool {
        self.check_in_date <= other.check_in_date && other.check_out_date <= self.check_out_date
    }

    /// Room policy, evaluated with `self` as the candidate:
    /// same check-in day with the stored check-in time inside the candidate's
    /// `[check_in_time, check_out_time)`, same check-out day with the stored
    /// check-out time inside `(check_in_time, check_out_time]`, or one
    /// inclusive date span containing the other.
    pub fn conflicts_with(&self, existing: &RoomStay) -> bool {
        if self.room_number != existing.room_number {
            return false;
        }

        let check_in_clash = existing.check_in_date == self.check_in_date
            && existing.check_in_time >= self.check_in_time
            && existing.check_in_time < self.check_out_time;

        let check_out_clash = existing.check_out_date == self.check_out_date
            && existing.check_out_time > self.check_in_time
            && existing.check_out_time <= self.check_out_time;

        check_in_clash
            || check_out_clash
            || self.contains_span(existing)
            || existing.contains_span(self)
    }
}

/// The claim a reservation makes on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Slot {
    Outdoor {
        date: NaiveDate,
        window: TimeWindow,
    },
    Table {
        table_no: String,
        date: NaiveDate,
        window: TimeWindow,
    },
    Room(RoomStay),
}

impl Slot {
    pub fn kind(&self) -> ReservationKind {
        match self {
            Slot::Outdoor { .. } => ReservationKind::Outdoor,
            Slot::Table { .. } => ReservationKind::Table,
            Slot::Room(_) => ReservationKind::Room,
        }
    }

    /// Resource key conflicts are scoped to. The outdoor venue is implicit.
    pub fn identity(&self) -> Option<&str> {
        match self {
            Slot::Outdoor { .. } => None,
            Slot::Table { table_no, .. } => Some(table_no.as_str()),
            Slot::Room(stay) => Some(stay.room_number.as_str()),
        }
    }

    pub fn conflicts_with(&self, existing: &Slot) -> bool {
        match (self, existing) {
            (
                Slot::Outdoor { date, window },
                Slot::Outdoor { date: other_date, window: other_window },
            ) => date == other_date && window.overlaps(other_window),
            (
                Slot::Table { table_no, date, window },
                Slot::Table { table_no: other_table, date: other_date, window: other_window },
            ) => table_no == other_table && date == other_date && window.overlaps(other_window),
            (Slot::Room(stay), Slot::Room(other)) => stay.conflicts_with(other),
            _ => false,
        }
    }

    pub fn unavailable_message(&self) -> String {
        match self {
            Slot::Outdoor { date, window } => format!(
                "Outdoor space is not available on {} from {} to {}.",
                date, window.from, window.to
            ),
            Slot::Table { table_no, date, window } => format!(
                "Table {} is not available on {} from {} to {}.",
                table_no, date, window.from, window.to
            ),
            Slot::Room(stay) => format!(
                "Room {} is not available from {} {} to {} {}.",
                stay.room_number,
                stay.check_in_date,
                stay.check_in_time,
                stay.check_out_date,
                stay.check_out_time
            ),
        }
    }
}

impl From<&ReservationDetails> for Slot {
    fn from(details: &ReservationDetails) -> Self {
        match details {
            ReservationDetails::Outdoor(d) => Slot::Outdoor {
                date: d.date,
                window: TimeWindow::new(d.time_from.clone(), d.time_to.clone()),
            },
            ReservationDetails::Table(d) => Slot::Table {
                table_no: d.table_no.clone(),
                date: d.date,
                window: TimeWindow::new(d.time_from.clone(), d.time_to.clone()),
            },
            ReservationDetails::Room(d) => Slot::Room(RoomStay {
                room_number: d.room_number.clone(),
                check_in_date: d.check_in_date,
                check_in_time: d.check_in_time.clone(),
                check_out_date: d.check_out_date,
                check_out_time: d.check_out_time.clone(),
            }),
        }
    }
}

impl From<&Reservation> for Slot {
    fn from(reservation: &Reservation) -> Self {
        Slot::from(&reservation.details)
    }
}

/// The stored booking a candidate clashed with, without customer details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictContext {
    pub id: String,
    pub slot: Slot,
}

impl From<&Reservation> for ConflictContext {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id.clone(),
            slot: Slot::from(reservation),
        }
    }
}

/// Stateless: every answer is derived from what the repository holds now.
pub struct AvailabilityChecker {
    repo: Arc<dyn ReservationRepository>,
}

impl AvailabilityChecker {
    pub fn new(repo: Arc<dyn ReservationRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_conflict(&self, slot: &Slot, exclude_id: Option<&str>) -> Result<Option<Reservation>, AppError> {
        let conflict = self.repo.find_conflict(slot, exclude_id).await?;
        if let Some(existing) = &conflict {
            debug!(kind = %slot.kind(), identity = ?slot.identity(), conflicting_id = %existing.id, "slot conflict found");
        }
        Ok(conflict)
    }

    pub async fn is_available(&self, slot: &Slot, exclude_id: Option<&str>) -> Result<bool, AppError> {
        Ok(self.find_conflict(slot, exclude_id).await?.is_none())
    }

    pub async fn ensure_available(&self, slot: &Slot, exclude_id: Option<&str>) -> Result<(), AppError> {
        match self.find_conflict(slot, exclude_id).await? {
            Some(existing) => {
                warn!("Reservation rejected: {}", slot.unavailable_message());
                Err(AppError::SlotUnavailable {
                    message: slot.unavailable_message(),
                    conflict: Some(ConflictContext::from(&existing)),
                })
            }
            None => Ok(()),
        }
    }
}

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::dtos::form_value;
use crate::domain::models::reservation::{
    ClockTime, ContactDetails, OutdoorDetails, ReservationDetails, ReservationDraft,
    ReservationKind, RoomDetails, RoomType, TableDetails,
};
use crate::error::AppError;
use crate::domain::services::validation::{
    is_valid_email, is_valid_name, is_valid_phone, parse_date, require, ValidationError,
};

/// Raw reservation body for one kind. Fields are read as text, numbers
/// included, so a malformed value is reported with the validation message
/// rather than a deserialization failure.
pub trait ReservationForm: DeserializeOwned + Send + 'static {
    const KIND: ReservationKind;

    /// Validates in a fixed order and stops at the first failure.
    fn into_draft(self) -> Result<ReservationDraft, ValidationError>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    #[serde(deserialize_with = "form_value::text")]
    pub customer_name: String,
    #[serde(deserialize_with = "form_value::text")]
    pub email: String,
    #[serde(deserialize_with = "form_value::text")]
    pub phone_number: String,
    #[serde(deserialize_with = "form_value::text")]
    pub number_of_guests: String,
}

impl ContactForm {
    fn check_name_and_email(&self) -> Result<(), ValidationError> {
        if !is_valid_name(&self.customer_name) {
            return Err(ValidationError::Name);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::Email);
        }
        Ok(())
    }

    fn into_contact(self) -> Result<ContactDetails, ValidationError> {
        if !is_valid_phone(&self.phone_number) {
            return Err(ValidationError::Phone);
        }
        let number_of_guests = self.number_of_guests.trim().parse::<i32>()
            .ok()
            .filter(|guests| *guests > 0)
            .ok_or(ValidationError::Guests)?;
        Ok(ContactDetails {
            customer_name: self.customer_name,
            email: self.email,
            phone_number: self.phone_number,
            number_of_guests,
        })
    }
}

fn ordered(from: &ClockTime, to: &ClockTime) -> Result<(), ValidationError> {
    if from >= to {
        return Err(ValidationError::Range("Time from must be earlier than time to."));
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutdoorForm {
    #[serde(flatten)]
    pub contact: ContactForm,
    #[serde(deserialize_with = "form_value::text")]
    pub event_type: String,
    #[serde(deserialize_with = "form_value::text")]
    pub date: String,
    #[serde(deserialize_with = "form_value::text")]
    pub time_from: String,
    #[serde(deserialize_with = "form_value::text")]
    pub time_to: String,
}

impl ReservationForm for OutdoorForm {
    const KIND: ReservationKind = ReservationKind::Outdoor;

    fn into_draft(self) -> Result<ReservationDraft, ValidationError> {
        self.contact.check_name_and_email()?;
        let time_from = ClockTime::parse(&self.time_from)?;
        let time_to = ClockTime::parse(&self.time_to)?;
        let contact = self.contact.into_contact()?;
        let date = parse_date(&self.date)?;
        require(&self.event_type, "Event type")?;
        ordered(&time_from, &time_to)?;

        Ok(ReservationDraft {
            contact,
            details: ReservationDetails::Outdoor(OutdoorDetails {
                event_type: self.event_type.trim().to_string(),
                date,
                time_from,
                time_to,
            }),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableForm {
    #[serde(flatten)]
    pub contact: ContactForm,
    #[serde(deserialize_with = "form_value::text")]
    pub table_no: String,
    #[serde(deserialize_with = "form_value::text")]
    pub date: String,
    #[serde(deserialize_with = "form_value::text")]
    pub time_from: String,
    #[serde(deserialize_with = "form_value::text")]
    pub time_to: String,
}

impl ReservationForm for TableForm {
    const KIND: ReservationKind = ReservationKind::Table;

    fn into_draft(self) -> Result<ReservationDraft, ValidationError> {
        self.contact.check_name_and_email()?;
        let time_from = ClockTime::parse(&self.time_from)?;
        let time_to = ClockTime::parse(&self.time_to)?;
        let contact = self.contact.into_contact()?;
        let date = parse_date(&self.date)?;
        require(&self.table_no, "Table number")?;
        ordered(&time_from, &time_to)?;

        Ok(ReservationDraft {
            contact,
            details: ReservationDetails::Table(TableDetails {
                table_no: self.table_no.trim().to_string(),
                date,
                time_from,
                time_to,
            }),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomForm {
    #[serde(flatten)]
    pub contact: ContactForm,
    #[serde(deserialize_with = "form_value::text")]
    pub room_type: String,
    #[serde(deserialize_with = "form_value::text")]
    pub room_number: String,
    #[serde(deserialize_with = "form_value::text")]
    pub check_in_date: String,
    #[serde(deserialize_with = "form_value::text")]
    pub check_in_time: String,
    #[serde(deserialize_with = "form_value::text")]
    pub check_out_date: String,
    #[serde(deserialize_with = "form_value::text")]
    pub check_out_time: String,
}

impl ReservationForm for RoomForm {
    const KIND: ReservationKind = ReservationKind::Room;

    fn into_draft(self) -> Result<ReservationDraft, ValidationError> {
        self.contact.check_name_and_email()?;
        let check_in_time = ClockTime::parse(&self.check_in_time)?;
        let check_out_time = ClockTime::parse(&self.check_out_time)?;
        let contact = self.contact.into_contact()?;
        let check_in_date = parse_date(&self.check_in_date)?;
        let check_out_date = parse_date(&self.check_out_date)?;
        require(&self.room_number, "Room number")?;
        let room_type: RoomType = self.room_type.parse()?;

        if check_out_date < check_in_date {
            return Err(ValidationError::Range("Check-out date cannot be before check-in date."));
        }
        if check_out_date == check_in_date && check_in_time >= check_out_time {
            return Err(ValidationError::Range("Check-out time must be after check-in time."));
        }

        Ok(ReservationDraft {
            contact,
            details: ReservationDetails::Room(RoomDetails {
                room_type,
                room_number: self.room_number.trim().to_string(),
                check_in_date,
                check_in_time,
                check_out_date,
                check_out_time,
            }),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "form_value::text")]
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn ensure_complete(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::Validation("Email and password are required".into()));
        }
        Ok(())
    }
}

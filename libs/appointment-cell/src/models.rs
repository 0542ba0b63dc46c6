use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use shared_database::InsertAck;

/// A treatment type with its fixed catalog of time slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentOption {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub slots: Vec<String>,
}

/// Catalog entry with `slots` narrowed to the ones still open on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityView {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub id: Uuid,
    pub name: String,
}

/// A patient's reservation of one slot of one treatment on one date.
///
/// `email` is the booking identity. Required text fields default to empty so
/// that a payload missing them reaches validation instead of failing to parse.
/// Fields outside the known set are kept in `extra` and round-tripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub slot: String,
    #[serde(default)]
    pub patient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `bookings` table row. Free-form fields live in the `details` JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub email: String,
    pub treatment: String,
    pub appointment_date: String,
    pub slot: String,
    pub patient: String,
    pub phone: Option<String>,
    pub price: Option<f64>,
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl From<Booking> for BookingRow {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            email: booking.email,
            treatment: booking.treatment,
            appointment_date: booking.appointment_date,
            slot: booking.slot,
            patient: booking.patient,
            phone: booking.phone,
            price: booking.price,
            details: booking.extra,
        }
    }
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            treatment: row.treatment,
            appointment_date: row.appointment_date,
            slot: row.slot,
            patient: row.patient,
            phone: row.phone,
            price: row.price,
            extra: row.details,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Same identity already holds this treatment on this date.
    Duplicate,
    /// Another booking already holds the requested slot.
    SlotTaken,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdmitResult {
    Admitted { booking: Booking },
    Rejected { reason: RejectReason, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRejection {
    pub acknowledged: bool,
    pub message: String,
}

/// Body of `POST /bookings`: either the store's insert acknowledgement or an
/// unacknowledged rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BookingResponse {
    Inserted(InsertAck),
    Rejected(BookingRejection),
}

impl BookingResponse {
    pub fn rejected(message: String) -> Self {
        BookingResponse::Rejected(BookingRejection {
            acknowledged: false,
            message,
        })
    }
}

use tracing::{debug, warn};

use shared_database::{InsertAck, Query, StoreError, SupabaseClient};
use shared_models::error::AppError;

use crate::models::{
    AdmitResult, AppointmentOption, AvailabilityView, Booking, BookingResponse, BookingRow,
    Speciality,
};
use crate::services::admission::{admit_booking, claim_slot, duplicate_message, slot_taken_message};
use crate::services::availability::resolve_availability;

const OPTIONS_TABLE: &str = "appointment_options";
const BOOKINGS_TABLE: &str = "bookings";

/// Insertion order of the catalog.
const CATALOG_ORDER: &str = "position";

/// Name of the unique index on (treatment, appointment_date, slot). See
/// `migrations/0001_init.sql`.
const SLOT_UNIQUE_INDEX: &str = "bookings_treatment_date_slot_key";

/// Store-facing half of booking: fetches the snapshots the pure resolver and
/// admitter need, and persists admitted bookings.
pub struct BookingService<'a> {
    store: &'a SupabaseClient,
}

impl<'a> BookingService<'a> {
    pub fn new(store: &'a SupabaseClient) -> Self {
        Self { store }
    }

    /// Catalog with slots already booked on `date` removed. Without a date
    /// nothing is subtracted.
    pub async fn available_options(&self, date: Option<&str>) -> Result<Vec<AvailabilityView>, AppError> {
        let options: Vec<AppointmentOption> = self
            .store
            .select(OPTIONS_TABLE, &Query::new().order(CATALOG_ORDER))
            .await?;

        let Some(date) = date else {
            debug!("No date supplied, returning full catalog");
            return Ok(resolve_availability("", &options, &[]));
        };

        let bookings_on_date = self
            .fetch_bookings(Query::new().eq("appointment_date", date))
            .await?;

        Ok(resolve_availability(date, &options, &bookings_on_date))
    }

    pub async fn specialities(&self) -> Result<Vec<Speciality>, AppError> {
        let specialities = self
            .store
            .select(OPTIONS_TABLE, &Query::new().select("id,name").order(CATALOG_ORDER))
            .await?;
        Ok(specialities)
    }

    pub async fn bookings_for(&self, email: &str) -> Result<Vec<Booking>, AppError> {
        debug!("Fetching bookings for {}", email);
        self.fetch_bookings(Query::new().eq("email", email)).await
    }

    /// Validate, admit and persist `candidate`.
    ///
    /// Duplicate and taken-slot outcomes are returned as an unacknowledged
    /// `BookingResponse`, not as errors. The unique indexes on `bookings`
    /// back both checks, so a concurrent insert that slips past the reads
    /// surfaces as a store conflict and is reported the same way.
    pub async fn create_booking(&self, candidate: Booking) -> Result<BookingResponse, AppError> {
        validate_candidate(&candidate)?;

        let option: Option<AppointmentOption> = self
            .store
            .select_one(OPTIONS_TABLE, &Query::new().eq("name", &candidate.treatment))
            .await?;

        let option = option.ok_or_else(|| {
            AppError::ValidationError(format!("Unknown treatment: {}", candidate.treatment))
        })?;

        if !option.slots.contains(&candidate.slot) {
            return Err(AppError::ValidationError(format!(
                "{} is not a slot offered for {}",
                candidate.slot, candidate.treatment
            )));
        }

        let existing_matches = self
            .fetch_bookings(
                Query::new()
                    .eq("appointment_date", &candidate.appointment_date)
                    .eq("email", &candidate.email)
                    .eq("treatment", &candidate.treatment),
            )
            .await?;

        let booking = match admit_booking(candidate, &existing_matches) {
            AdmitResult::Admitted { booking } => booking,
            AdmitResult::Rejected { message, .. } => return Ok(BookingResponse::rejected(message)),
        };

        let slot_holders = self
            .fetch_bookings(
                Query::new()
                    .eq("appointment_date", &booking.appointment_date)
                    .eq("treatment", &booking.treatment)
                    .eq("slot", &booking.slot),
            )
            .await?;

        match claim_slot(booking, &slot_holders) {
            AdmitResult::Admitted { booking } => self.insert_booking(booking).await,
            AdmitResult::Rejected { message, .. } => Ok(BookingResponse::rejected(message)),
        }
    }

    async fn insert_booking(&self, booking: Booking) -> Result<BookingResponse, AppError> {
        let mut row = BookingRow::from(booking.clone());
        row.id = None;

        let body = serde_json::to_value(&row)
            .map_err(|e| AppError::Internal(format!("Failed to encode booking: {}", e)))?;

        let inserted: Result<Vec<BookingRow>, StoreError> = self.store.insert(BOOKINGS_TABLE, body).await;

        match inserted {
            Ok(rows) => {
                let id = rows
                    .into_iter()
                    .next()
                    .and_then(|row| row.id)
                    .ok_or_else(|| AppError::Database("Store returned no booking row".to_string()))?;
                debug!("Booking {} stored for {}", id, booking.email);
                Ok(BookingResponse::Inserted(InsertAck::inserted(id)))
            }
            Err(StoreError::Conflict(body)) => {
                warn!("Booking insert lost a uniqueness race: {}", body);
                let message = if body.contains(SLOT_UNIQUE_INDEX) {
                    slot_taken_message(&booking)
                } else {
                    duplicate_message(&booking.appointment_date)
                };
                Ok(BookingResponse::rejected(message))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_bookings(&self, query: Query) -> Result<Vec<Booking>, AppError> {
        let rows: Vec<BookingRow> = self.store.select(BOOKINGS_TABLE, &query).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }
}

/// Reject payloads missing any field the booking rules depend on.
pub fn validate_candidate(candidate: &Booking) -> Result<(), AppError> {
    let missing: Vec<&str> = [
        ("email", &candidate.email),
        ("treatment", &candidate.treatment),
        ("appointmentDate", &candidate.appointment_date),
        ("slot", &candidate.slot),
        ("patient", &candidate.patient),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "Missing required booking fields: {}",
            missing.join(", ")
        )))
    }
}

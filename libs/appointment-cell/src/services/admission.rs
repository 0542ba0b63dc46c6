use tracing::{debug, warn};

use crate::models::{AdmitResult, Booking, RejectReason};

pub fn duplicate_message(appointment_date: &str) -> String {
    format!("You already have a booking on {}", appointment_date)
}

pub fn slot_taken_message(booking: &Booking) -> String {
    format!(
        "{} is no longer available for {} on {}",
        booking.slot, booking.treatment, booking.appointment_date
    )
}

/// Decide whether `candidate` may be booked.
///
/// `existing_matches` must already be restricted to bookings with the
/// candidate's email, treatment and appointment date. Any match rejects the
/// candidate, whatever slot either booking names: one identity gets at most
/// one booking per treatment per day. An admitted candidate is returned as-is.
pub fn admit_booking(candidate: Booking, existing_matches: &[Booking]) -> AdmitResult {
    if existing_matches.is_empty() {
        debug!(
            "Admitting {} for {} on {} at {}",
            candidate.email, candidate.treatment, candidate.appointment_date, candidate.slot
        );
        return AdmitResult::Admitted { booking: candidate };
    }

    warn!(
        "Duplicate booking for {} / {} on {} ({} existing)",
        candidate.email,
        candidate.treatment,
        candidate.appointment_date,
        existing_matches.len()
    );

    AdmitResult::Rejected {
        reason: RejectReason::Duplicate,
        message: duplicate_message(&candidate.appointment_date),
    }
}

/// Second gate after `admit_booking`: `slot_holders` are the bookings of any
/// identity on the candidate's treatment, date and slot.
pub fn claim_slot(candidate: Booking, slot_holders: &[Booking]) -> AdmitResult {
    if slot_holders.is_empty() {
        return AdmitResult::Admitted { booking: candidate };
    }

    warn!(
        "Slot {} for {} on {} already held",
        candidate.slot, candidate.treatment, candidate.appointment_date
    );

    AdmitResult::Rejected {
        reason: RejectReason::SlotTaken,
        message: slot_taken_message(&candidate),
    }
}

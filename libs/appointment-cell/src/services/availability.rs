use std::collections::HashSet;

use tracing::debug;

use crate::models::{AppointmentOption, AvailabilityView, Booking};

/// Remaining open slots per treatment on `date`.
///
/// `bookings_on_date` must already be restricted to `date`; this function does
/// not look at `Booking::appointment_date`. A slot is consumed by any booking
/// whose `treatment` equals the option name and whose `slot` is the exact same
/// label. Catalog order is preserved, and options with nothing left are still
/// returned with an empty slot list.
pub fn resolve_availability(
    date: &str,
    options: &[AppointmentOption],
    bookings_on_date: &[Booking],
) -> Vec<AvailabilityView> {
    debug!(
        "Resolving availability for {} across {} options and {} bookings",
        date,
        options.len(),
        bookings_on_date.len()
    );

    options
        .iter()
        .map(|option| {
            let booked: HashSet<&str> = bookings_on_date
                .iter()
                .filter(|booking| booking.treatment == option.name)
                .map(|booking| booking.slot.as_str())
                .collect();

            let slots = option
                .slots
                .iter()
                .filter(|slot| !booked.contains(slot.as_str()))
                .cloned()
                .collect();

            AvailabilityView {
                id: option.id,
                name: option.name.clone(),
                price: option.price,
                slots,
            }
        })
        .collect()
}

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use services::{admit_booking, claim_slot, resolve_availability, BookingService};

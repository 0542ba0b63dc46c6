pub mod admission;
pub mod availability;
pub mod booking;

pub use admission::{admit_booking, claim_slot};
pub use availability::resolve_availability;
pub use booking::BookingService;

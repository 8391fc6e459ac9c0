pub mod cancellation;
pub mod engine;

pub use cancellation::{CancellationEngine, CancellationError, Confirmation};
pub use engine::{BookingEngine, BookingError, BookingRequest};

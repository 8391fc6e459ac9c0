pub mod fares;
pub mod models;
pub mod repository;
pub mod session;
pub mod validate;

pub use fares::FareClass;
pub use models::{Flight, Passenger, PassengerDetails, Ticket, UserAccount};
pub use session::{ActingSession, Role};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

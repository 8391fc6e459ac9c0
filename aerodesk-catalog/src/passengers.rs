use aerodesk_core::models::Passenger;
use aerodesk_core::repository::PassengerRepository;
use aerodesk_core::session::ActingSession;
use aerodesk_core::{validate, CoreError};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Access denied: only staff can add passengers")]
    NotAuthorized,

    #[error("Passenger already exists: {0}")]
    DuplicatePassenger(String),

    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("Storage error: {0}")]
    Store(String),
}

fn store_err(err: Box<dyn std::error::Error + Send + Sync>) -> DirectoryError {
    DirectoryError::Store(err.to_string())
}

/// Passenger identity records. Lookups are open; full-detail creation
/// is a staff desk operation (self-registration and inline booking
/// creation go through their own flows with minimal records).
pub struct PassengerDirectory {
    passengers: Arc<dyn PassengerRepository>,
}

impl PassengerDirectory {
    pub fn new(passengers: Arc<dyn PassengerRepository>) -> Self {
        Self { passengers }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Passenger>, DirectoryError> {
        self.passengers.get_passenger(id).await.map_err(store_err)
    }

    pub async fn list(&self) -> Result<Vec<Passenger>, DirectoryError> {
        self.passengers.list_passengers().await.map_err(store_err)
    }

    /// Next id for auto-numbered self-registration
    pub async fn next_numeric_id(&self) -> Result<i64, DirectoryError> {
        self.passengers.next_numeric_id().await.map_err(store_err)
    }

    pub async fn record(
        &self,
        session: &ActingSession,
        passenger: Passenger,
    ) -> Result<Passenger, DirectoryError> {
        if !session.role.is_privileged() {
            return Err(DirectoryError::NotAuthorized);
        }

        // The desk form requires every field filled in
        let passenger = Passenger {
            id: validate::require_non_blank("passenger id", &passenger.id)?,
            name: validate::require_non_blank("name", &passenger.name)?,
            address: validate::require_non_blank("address", &passenger.address)?,
            passport: validate::require_non_blank("passport", &passenger.passport)?,
            nationality: validate::require_non_blank("nationality", &passenger.nationality)?,
            gender: validate::require_non_blank("gender", &passenger.gender)?,
            phone: validate::require_non_blank("phone", &passenger.phone)?,
        };

        if self
            .passengers
            .get_passenger(&passenger.id)
            .await
            .map_err(store_err)?
            .is_some()
        {
            return Err(DirectoryError::DuplicatePassenger(passenger.id));
        }

        self.passengers
            .create_passenger(&passenger)
            .await
            .map_err(store_err)?;
        info!(id = %passenger.id, "passenger recorded");
        Ok(passenger)
    }
}

use aerodesk_core::models::Flight;
use aerodesk_core::repository::{FlightRepository, TicketRepository};
use aerodesk_core::session::ActingSession;
use aerodesk_core::{validate, CoreError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Access denied: only staff can manage flights")]
    NotAuthorized,

    #[error("Flight not found: {0}")]
    FlightNotFound(String),

    #[error("Flight {0} still has tickets booked against it")]
    FlightInUse(String),

    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("Storage error: {0}")]
    Store(String),
}

fn store_err(err: Box<dyn std::error::Error + Send + Sync>) -> CatalogError {
    CatalogError::Store(err.to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFlight {
    pub code: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub seats: i64,
}

/// Flight records. Lookups are open to every role; mutation is staff
/// only, and deletion is refused while tickets still reference the
/// flight.
pub struct FlightCatalog {
    flights: Arc<dyn FlightRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl FlightCatalog {
    pub fn new(flights: Arc<dyn FlightRepository>, tickets: Arc<dyn TicketRepository>) -> Self {
        Self { flights, tickets }
    }

    pub async fn get(&self, code: &str) -> Result<Option<Flight>, CatalogError> {
        self.flights.get_flight(code).await.map_err(store_err)
    }

    pub async fn list(&self) -> Result<Vec<Flight>, CatalogError> {
        self.flights.list_flights().await.map_err(store_err)
    }

    /// Flights still selling seats, for booking pickers
    pub async fn list_open(&self) -> Result<Vec<Flight>, CatalogError> {
        self.flights.list_open_flights().await.map_err(store_err)
    }

    pub async fn record(
        &self,
        session: &ActingSession,
        new_flight: NewFlight,
    ) -> Result<Flight, CatalogError> {
        if !session.role.is_privileged() {
            return Err(CatalogError::NotAuthorized);
        }

        let flight = Flight {
            code: validate::require_non_blank("flight code", &new_flight.code)?,
            origin: validate::require_non_blank("source", &new_flight.origin)?,
            destination: validate::require_non_blank("destination", &new_flight.destination)?,
            departure: new_flight.departure,
            seats: validate::require_seat_count(new_flight.seats)?,
        };

        self.flights.create_flight(&flight).await.map_err(store_err)?;
        info!(code = %flight.code, seats = flight.seats, "flight recorded");
        Ok(flight)
    }

    /// Direct staff edit of every mutable field, seat counter included
    pub async fn update(
        &self,
        session: &ActingSession,
        flight: Flight,
    ) -> Result<(), CatalogError> {
        if !session.role.is_privileged() {
            return Err(CatalogError::NotAuthorized);
        }

        let flight = Flight {
            code: validate::require_non_blank("flight code", &flight.code)?,
            origin: validate::require_non_blank("source", &flight.origin)?,
            destination: validate::require_non_blank("destination", &flight.destination)?,
            departure: flight.departure,
            seats: validate::require_seat_count(flight.seats)?,
        };

        let updated = self.flights.update_flight(&flight).await.map_err(store_err)?;
        if updated == 0 {
            return Err(CatalogError::FlightNotFound(flight.code));
        }
        Ok(())
    }

    pub async fn delete(&self, session: &ActingSession, code: &str) -> Result<(), CatalogError> {
        if !session.role.is_privileged() {
            return Err(CatalogError::NotAuthorized);
        }

        let code = validate::require_non_blank("flight code", code)?;

        if self.tickets.flight_has_tickets(&code).await.map_err(store_err)? {
            return Err(CatalogError::FlightInUse(code));
        }

        let deleted = self.flights.delete_flight(&code).await.map_err(store_err)?;
        if deleted == 0 {
            return Err(CatalogError::FlightNotFound(code));
        }

        info!(%code, "flight deleted");
        Ok(())
    }
}

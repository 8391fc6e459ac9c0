use aerodesk_core::fares::FareClass;
use aerodesk_core::models::{Passenger, PassengerDetails, Ticket};
use aerodesk_core::session::ActingSession;
use aerodesk_core::{validate, CoreError};
use aerodesk_store::{DbClient, FlightTx, PassengerTx, TicketTx};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Passenger not found and no identity details were supplied")]
    MissingPassengerDetails,

    #[error("Flight not found: {0}")]
    FlightNotFound(String),

    #[error("No seats available on flight {0}")]
    NoSeatsAvailable(String),

    #[error("Seat on flight {0} was taken by another booking")]
    SeatReservationLost(String),

    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("Storage error: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub passenger_id: String,
    pub flight_code: String,
    /// Raw fare-class input; unrecognized values fold to Economy
    pub fare_class: String,
    /// Identity fields for creating the passenger inline when the id
    /// has no directory record yet
    pub passenger_details: Option<PassengerDetails>,
}

/// Sells tickets. Every booking runs as one transaction: passenger
/// creation, ticket insert and seat decrement all commit together or
/// not at all.
pub struct BookingEngine {
    db: DbClient,
}

impl BookingEngine {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }

    pub async fn book_ticket(
        &self,
        session: &ActingSession,
        request: BookingRequest,
    ) -> Result<Ticket, BookingError> {
        // A passenger session always books as itself, whatever id the
        // caller put in the request.
        let passenger_id = validate::require_non_blank(
            "passenger id",
            session.resolve_acting_passenger_id(&request.passenger_id),
        )?;
        let flight_code = validate::require_non_blank("flight code", &request.flight_code)?;
        let fare_class = FareClass::from_input(&request.fare_class);

        let mut tx = self.db.pool.begin().await?;

        // 1. Ensure the passenger exists; create a minimal record from
        //    the supplied details if not.
        let passenger = match PassengerTx::get(&mut tx, &passenger_id).await? {
            Some(existing) => existing,
            None => {
                let details = request
                    .passenger_details
                    .as_ref()
                    .filter(|d| d.is_complete())
                    .ok_or(BookingError::MissingPassengerDetails)?;

                let created = Passenger::minimal(passenger_id.clone(), details);
                PassengerTx::insert(&mut tx, &created).await?;
                created
            }
        };

        // 2. The flight must exist, with the seat counter re-read
        //    inside this transaction.
        let flight = FlightTx::get(&mut tx, &flight_code)
            .await?
            .ok_or_else(|| BookingError::FlightNotFound(flight_code.clone()))?;

        if flight.seats <= 0 {
            return Err(BookingError::NoSeatsAvailable(flight_code));
        }

        // 3. Flat fare per class; flights carry no base fare.
        let amount = fare_class.amount();

        // 4. Ticket row snapshots the passenger identity as of now.
        let ticket_id =
            TicketTx::insert(&mut tx, &flight_code, &passenger, fare_class, amount).await?;

        // 5. Conditional decrement. Zero rows means the last seat went
        //    to a concurrent booking between our read and this update;
        //    dropping the transaction rolls everything back.
        if !FlightTx::reserve_seat(&mut tx, &flight_code).await? {
            return Err(BookingError::SeatReservationLost(flight_code));
        }

        tx.commit().await?;

        info!(
            ticket_id,
            flight = %flight_code,
            passenger = %passenger.id,
            class = %fare_class,
            "ticket booked"
        );

        Ok(Ticket {
            id: ticket_id,
            flight_code,
            passenger_id: passenger.id,
            passenger_name: passenger.name,
            passenger_passport: passenger.passport,
            passenger_nationality: passenger.nationality,
            fare_class,
            amount,
        })
    }
}

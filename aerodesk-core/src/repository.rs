use crate::models::{Flight, Passenger, Ticket, UserAccount};
use async_trait::async_trait;

/// Repository trait for flight data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn get_flight(
        &self,
        code: &str,
    ) -> Result<Option<Flight>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_flights(&self) -> Result<Vec<Flight>, Box<dyn std::error::Error + Send + Sync>>;

    /// Flights with at least one seat left, for booking pickers
    async fn list_open_flights(
        &self,
    ) -> Result<Vec<Flight>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_flight(
        &self,
        flight: &Flight,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Direct set of every mutable column. Returns affected row count.
    async fn update_flight(
        &self,
        flight: &Flight,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_flight(
        &self,
        code: &str,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for passenger identity records
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    async fn get_passenger(
        &self,
        id: &str,
    ) -> Result<Option<Passenger>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_passengers(
        &self,
    ) -> Result<Vec<Passenger>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_passenger(
        &self,
        passenger: &Passenger,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Highest numeric passenger id plus one, for auto-numbered
    /// self-registration. Non-numeric ids are ignored.
    async fn next_numeric_id(&self) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for ticket lookups
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn get_ticket(
        &self,
        id: i64,
    ) -> Result<Option<Ticket>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_tickets(&self) -> Result<Vec<Ticket>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_tickets_for_passenger(
        &self,
        passenger_id: &str,
    ) -> Result<Vec<Ticket>, Box<dyn std::error::Error + Send + Sync>>;

    /// Referential-integrity probe used before flight deletion
    async fn flight_has_tickets(
        &self,
        flight_code: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for login credentials
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_user(
        &self,
        user: &UserAccount,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Username already holding a link to this passenger id, if any
    async fn linked_username(
        &self,
        passenger_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;
}

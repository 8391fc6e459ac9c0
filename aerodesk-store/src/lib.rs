pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod passenger_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use app_config::{BusinessRules, Config};
pub use database::DbClient;
pub use flight_repo::{FlightTx, StoreFlightRepository};
pub use passenger_repo::{PassengerTx, StorePassengerRepository};
pub use ticket_repo::{StoreTicketRepository, TicketTx};
pub use user_repo::{StoreUserRepository, UserTx};

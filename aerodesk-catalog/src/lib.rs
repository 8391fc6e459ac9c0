pub mod flights;
pub mod passengers;

pub use flights::{CatalogError, FlightCatalog, NewFlight};
pub use passengers::{DirectoryError, PassengerDirectory};

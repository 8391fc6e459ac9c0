use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled flight with its live seat counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub code: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub seats: i64,
}

/// Passenger identity record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub id: String,
    pub name: String,
    pub address: String,
    pub passport: String,
    pub nationality: String,
    pub gender: String,
    pub phone: String,
}

impl Passenger {
    /// Minimal record created when a booking supplies identity inline.
    /// Address, gender and phone stay empty until staff fill them in.
    pub fn minimal(id: String, details: &PassengerDetails) -> Self {
        Self {
            id,
            name: details.name.trim().to_string(),
            address: String::new(),
            passport: details.passport.trim().to_string(),
            nationality: details.nationality.trim().to_string(),
            gender: String::new(),
            phone: String::new(),
        }
    }
}

/// Identity fields a caller may supply inline when booking for a
/// passenger id that has no directory record yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerDetails {
    pub name: String,
    pub passport: String,
    pub nationality: String,
}

impl PassengerDetails {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.passport.trim().is_empty()
            && !self.nationality.trim().is_empty()
    }
}

/// A sold ticket. Passenger fields are snapshotted at booking time and
/// do not follow later directory edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub flight_code: String,
    pub passenger_id: String,
    pub passenger_name: String,
    pub passenger_passport: String,
    pub passenger_nationality: String,
    pub fare_class: crate::fares::FareClass,
    pub amount: i64,
}

/// Login credential row. Not mutated by the engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    pub role: crate::session::Role,
    pub passenger_id: Option<String>,
}

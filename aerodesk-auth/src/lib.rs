mod login;
mod register;

pub use register::RegisterRequest;

use aerodesk_core::CoreError;
use aerodesk_store::app_config::BusinessRules;
use aerodesk_store::DbClient;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Passenger id {passenger_id} is already linked to user '{username}'")]
    PassengerLinked {
        passenger_id: String,
        username: String,
    },

    #[error("Password must be at least {0} characters long")]
    WeakPassword(usize),

    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("Storage error: {0}")]
    Store(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Store(err.to_string())
    }
}

/// Establishes sessions: credential login and self-registration.
pub struct AuthService {
    db: DbClient,
    rules: BusinessRules,
}

impl AuthService {
    pub fn new(db: DbClient, rules: BusinessRules) -> Self {
        Self { db, rules }
    }

    pub(crate) fn db(&self) -> &DbClient {
        &self.db
    }

    pub(crate) fn rules(&self) -> &BusinessRules {
        &self.rules
    }
}

use serde::{Deserialize, Serialize};

/// Actor role. Stored as free text in the credential table; parsing
/// folds anything unknown to Passenger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Staff,
    Admin,
    Passenger,
}

impl Role {
    /// Case-insensitive parse; absent or unrecognized roles default to
    /// Passenger, the least-privileged role.
    pub fn parse(value: &str) -> Self {
        let v = value.trim();
        if v.eq_ignore_ascii_case("staff") {
            Role::Staff
        } else if v.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Passenger
        }
    }

    /// Staff and Admin may manage flights and passengers and cancel any
    /// ticket. Everything else is gated per passenger.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "Staff",
            Role::Admin => "Admin",
            Role::Passenger => "Passenger",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated actor, constructed once at login and passed
/// explicitly into every engine call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActingSession {
    pub username: String,
    pub role: Role,
    pub passenger_id: Option<String>,
}

impl ActingSession {
    pub fn new(username: impl Into<String>, role: Role, passenger_id: Option<String>) -> Self {
        Self {
            username: username.into(),
            role,
            passenger_id,
        }
    }

    /// The passenger id this session is allowed to act as. A
    /// Passenger-role session always acts as its own linked id (or its
    /// username when no id is linked) regardless of what the caller
    /// requested; privileged sessions act as the requested id.
    pub fn resolve_acting_passenger_id<'a>(&'a self, requested: &'a str) -> &'a str {
        if self.role == Role::Passenger {
            match &self.passenger_id {
                Some(id) if !id.trim().is_empty() => id,
                _ => &self.username,
            }
        } else {
            requested
        }
    }
}

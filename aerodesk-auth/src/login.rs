use crate::{AuthError, AuthService};
use aerodesk_core::repository::UserRepository;
use aerodesk_core::session::{ActingSession, Role};
use aerodesk_core::validate;
use aerodesk_store::StoreUserRepository;
use tracing::{info, warn};

impl AuthService {
    /// Authenticate a credential pair and build the acting session.
    /// Passenger users carry their linked passenger id into the
    /// session; other roles never do.
    pub async fn login(&self, username: &str, password: &str) -> Result<ActingSession, AuthError> {
        let username = validate::require_non_blank("username", username)?;
        let password = validate::require_non_blank("password", password)?;

        let users = StoreUserRepository::new(self.db().pool.clone());
        let user = users
            .find_user(&username)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        match user {
            Some(account) if account.password == password => {
                let passenger_id = if account.role == Role::Passenger {
                    account.passenger_id
                } else {
                    None
                };
                info!(username = %account.username, role = %account.role, "login");
                Ok(ActingSession::new(account.username, account.role, passenger_id))
            }
            _ => {
                // Bootstrap escape hatch carried over from the desktop
                // build; disable via business rules once real staff
                // accounts exist.
                if self.rules().fallback_admin && username == "admin" && password == "admin" {
                    warn!("fallback admin credentials used");
                    return Ok(ActingSession::new("admin", Role::Staff, None));
                }
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

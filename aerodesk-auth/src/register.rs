use crate::{AuthError, AuthService};
use aerodesk_core::models::{Passenger, PassengerDetails, UserAccount};
use aerodesk_core::session::{ActingSession, Role};
use aerodesk_core::validate;
use aerodesk_store::{PassengerTx, UserTx};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Raw role input; unknown values fold to Passenger
    pub role: String,
    /// Existing passenger id to link, for passengers already in the
    /// directory. Absent means auto-number a fresh one.
    pub passenger_id: Option<String>,
}

impl AuthService {
    /// Create a credential row, and for passengers ensure a directory
    /// record exists and is linked. The whole registration is one
    /// transaction. Passengers are signed in immediately and get their
    /// session back; staff accounts return `None` and log in normally.
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<Option<ActingSession>, AuthError> {
        let username = validate::require_non_blank("username", &request.username)?;
        if request.password.len() < self.rules().min_password_length {
            return Err(AuthError::WeakPassword(self.rules().min_password_length));
        }
        let role = Role::parse(&request.role);

        let mut tx = self.db().pool.begin().await?;

        if UserTx::find(&mut tx, &username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username));
        }

        let passenger_id = if role == Role::Passenger {
            let provided = request
                .passenger_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from);

            let id = match provided {
                Some(id) => id,
                None => PassengerTx::next_numeric_id(&mut tx).await?.to_string(),
            };

            // New registrants start with just a name; the desk fills in
            // the rest later.
            if PassengerTx::get(&mut tx, &id).await?.is_none() {
                let record = Passenger::minimal(
                    id.clone(),
                    &PassengerDetails {
                        name: username.clone(),
                        passport: String::new(),
                        nationality: String::new(),
                    },
                );
                PassengerTx::insert(&mut tx, &record).await?;
            }

            if let Some(owner) = UserTx::linked_username(&mut tx, &id).await? {
                return Err(AuthError::PassengerLinked {
                    passenger_id: id,
                    username: owner,
                });
            }

            Some(id)
        } else {
            None
        };

        UserTx::insert(
            &mut tx,
            &UserAccount {
                username: username.clone(),
                password: request.password,
                role,
                passenger_id: passenger_id.clone(),
            },
        )
        .await?;

        tx.commit().await?;
        info!(%username, role = %role, "user registered");

        Ok(if role == Role::Passenger {
            Some(ActingSession::new(username, role, passenger_id))
        } else {
            None
        })
    }
}

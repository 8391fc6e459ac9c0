use aerodesk_auth::{AuthError, AuthService, RegisterRequest};
use aerodesk_core::repository::PassengerRepository;
use aerodesk_core::session::Role;
use aerodesk_store::app_config::BusinessRules;
use aerodesk_store::{DbClient, StorePassengerRepository};

async fn setup() -> AuthService {
    let db = DbClient::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    AuthService::new(db, BusinessRules::default())
}

fn passenger_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: "hunter22".to_string(),
        role: "Passenger".to_string(),
        passenger_id: None,
    }
}

#[tokio::test]
async fn test_passenger_registration_signs_in_with_numbered_id() {
    let db = DbClient::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let auth = AuthService::new(db.clone(), BusinessRules::default());

    let session = auth
        .register(passenger_request("omar"))
        .await
        .unwrap()
        .expect("passenger registration returns a live session");

    assert_eq!(session.role, Role::Passenger);
    assert_eq!(session.passenger_id.as_deref(), Some("1"));

    // A directory record was created, named after the account
    let passengers = StorePassengerRepository::new(db.pool.clone());
    let record = passengers.get_passenger("1").await.unwrap().unwrap();
    assert_eq!(record.name, "omar");

    // The next registrant gets the next number
    let session = auth.register(passenger_request("sara")).await.unwrap().unwrap();
    assert_eq!(session.passenger_id.as_deref(), Some("2"));
}

#[tokio::test]
async fn test_login_roundtrip_and_wrong_password() {
    let auth = setup().await;
    auth.register(passenger_request("omar")).await.unwrap();

    let session = auth.login("omar", "hunter22").await.unwrap();
    assert_eq!(session.role, Role::Passenger);
    assert_eq!(session.passenger_id.as_deref(), Some("1"));

    let err = auth.login("omar", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_staff_registration_returns_no_session() {
    let auth = setup().await;
    let outcome = auth
        .register(RegisterRequest {
            username: "desk1".to_string(),
            password: "hunter22".to_string(),
            role: "Staff".to_string(),
            passenger_id: None,
        })
        .await
        .unwrap();
    assert!(outcome.is_none());

    let session = auth.login("desk1", "hunter22").await.unwrap();
    assert_eq!(session.role, Role::Staff);
    assert!(session.passenger_id.is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_refused() {
    let auth = setup().await;
    auth.register(passenger_request("omar")).await.unwrap();

    let err = auth.register(passenger_request("omar")).await.unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken(_)));
}

#[tokio::test]
async fn test_passenger_id_cannot_be_linked_twice() {
    let auth = setup().await;
    auth.register(passenger_request("omar")).await.unwrap();

    let err = auth
        .register(RegisterRequest {
            username: "imposter".to_string(),
            password: "hunter22".to_string(),
            role: "Passenger".to_string(),
            passenger_id: Some("1".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::PassengerLinked { .. }));
}

#[tokio::test]
async fn test_short_password_is_refused() {
    let auth = setup().await;
    let err = auth
        .register(RegisterRequest {
            username: "omar".to_string(),
            password: "abc".to_string(),
            role: "Passenger".to_string(),
            passenger_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::WeakPassword(6)));
}

#[tokio::test]
async fn test_fallback_admin_is_a_business_rule() {
    let auth = setup().await;
    let session = auth.login("admin", "admin").await.unwrap();
    assert_eq!(session.role, Role::Staff);

    let db = DbClient::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let rules = BusinessRules {
        fallback_admin: false,
        ..BusinessRules::default()
    };
    let locked_down = AuthService::new(db, rules);
    let err = locked_down.login("admin", "admin").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_unknown_stored_role_folds_to_passenger() {
    let db = DbClient::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    // A row written with a role this build does not know about
    sqlx::query("INSERT INTO users (username, password, role, passenger_id) VALUES (?, ?, ?, ?)")
        .bind("legacy")
        .bind("hunter22")
        .bind("Manager")
        .bind(Option::<String>::None)
        .execute(&db.pool)
        .await
        .unwrap();

    let auth = AuthService::new(db, BusinessRules::default());
    let session = auth.login("legacy", "hunter22").await.unwrap();
    assert_eq!(session.role, Role::Passenger);
}

use aerodesk_booking::{
    BookingEngine, BookingRequest, CancellationEngine, CancellationError, Confirmation,
};
use aerodesk_core::models::{Flight, Passenger, Ticket};
use aerodesk_core::repository::{FlightRepository, PassengerRepository, TicketRepository};
use aerodesk_core::session::{ActingSession, Role};
use aerodesk_store::app_config::BusinessRules;
use aerodesk_store::{DbClient, StoreFlightRepository, StorePassengerRepository, StoreTicketRepository};
use chrono::{Duration, Utc};

async fn setup() -> DbClient {
    let db = DbClient::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db
}

fn flight(code: &str, seats: i64) -> Flight {
    Flight {
        code: code.to_string(),
        origin: "Karachi".to_string(),
        destination: "Dubai".to_string(),
        departure: Utc::now() + Duration::days(7),
        seats,
    }
}

fn passenger(id: &str, name: &str) -> Passenger {
    Passenger {
        id: id.to_string(),
        name: name.to_string(),
        address: String::new(),
        passport: format!("P-{id}"),
        nationality: "Pakistani".to_string(),
        gender: String::new(),
        phone: String::new(),
    }
}

fn staff() -> ActingSession {
    ActingSession::new("desk1", Role::Staff, None)
}

/// Seed a flight plus one booked ticket and return the ticket.
async fn seed_booked_ticket(db: &DbClient, code: &str, passenger_id: &str, name: &str) -> Ticket {
    let flights = StoreFlightRepository::new(db.pool.clone());
    let passengers = StorePassengerRepository::new(db.pool.clone());

    flights.create_flight(&flight(code, 5)).await.unwrap();
    passengers
        .create_passenger(&passenger(passenger_id, name))
        .await
        .unwrap();

    BookingEngine::new(db.clone())
        .book_ticket(
            &staff(),
            BookingRequest {
                passenger_id: passenger_id.to_string(),
                flight_code: code.to_string(),
                fare_class: "Economy".to_string(),
                passenger_details: None,
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_staff_cancels_any_ticket() {
    let db = setup().await;
    let ticket = seed_booked_ticket(&db, "AA901", "5", "Asad Khan").await;
    let tickets = StoreTicketRepository::new(db.pool.clone());
    let flights = StoreFlightRepository::new(db.pool.clone());

    let engine = CancellationEngine::new(db.clone(), &BusinessRules::default());
    let snapshot = engine
        .cancel_ticket(&staff(), ticket.id, Confirmation::Confirmed)
        .await
        .unwrap();

    assert_eq!(snapshot.id, ticket.id);
    assert_eq!(snapshot.passenger_name, "Asad Khan");
    assert!(tickets.get_ticket(ticket.id).await.unwrap().is_none());

    // Default rule: the seat stays forfeited.
    assert_eq!(flights.get_flight("AA901").await.unwrap().unwrap().seats, 4);
}

#[tokio::test]
async fn test_passenger_cancels_own_ticket_only() {
    let db = setup().await;
    let ticket = seed_booked_ticket(&db, "AA901", "42", "Nadia Aziz").await;
    let other = seed_booked_ticket(&db, "PK310", "7", "Bilal Shah").await;
    let tickets = StoreTicketRepository::new(db.pool.clone());

    let session = ActingSession::new("nadia", Role::Passenger, Some("42".to_string()));
    let engine = CancellationEngine::new(db.clone(), &BusinessRules::default());

    let err = engine
        .cancel_ticket(&session, other.id, Confirmation::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, CancellationError::NotAuthorized));
    assert!(tickets.get_ticket(other.id).await.unwrap().is_some());

    engine
        .cancel_ticket(&session, ticket.id, Confirmation::Confirmed)
        .await
        .unwrap();
    assert!(tickets.get_ticket(ticket.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unlinked_passenger_matches_by_username() {
    let db = setup().await;
    let ticket = seed_booked_ticket(&db, "AA901", "omar", "Omar Farooq").await;

    // No linked passenger id: the username matching the stored
    // passenger id still counts as ownership.
    let session = ActingSession::new("omar", Role::Passenger, None);
    let engine = CancellationEngine::new(db.clone(), &BusinessRules::default());

    engine
        .cancel_ticket(&session, ticket.id, Confirmation::Confirmed)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancelling_missing_ticket_reports_not_found() {
    let db = setup().await;
    seed_booked_ticket(&db, "AA901", "5", "Asad Khan").await;
    let tickets = StoreTicketRepository::new(db.pool.clone());
    let flights = StoreFlightRepository::new(db.pool.clone());

    let engine = CancellationEngine::new(db.clone(), &BusinessRules::default());
    let err = engine
        .cancel_ticket(&staff(), 9999, Confirmation::Confirmed)
        .await
        .unwrap_err();

    assert!(matches!(err, CancellationError::TicketNotFound(9999)));
    assert_eq!(tickets.list_tickets().await.unwrap().len(), 1);
    assert_eq!(flights.get_flight("AA901").await.unwrap().unwrap().seats, 4);
}

#[tokio::test]
async fn test_declined_confirmation_mutates_nothing() {
    let db = setup().await;
    let ticket = seed_booked_ticket(&db, "AA901", "5", "Asad Khan").await;
    let tickets = StoreTicketRepository::new(db.pool.clone());

    let engine = CancellationEngine::new(db.clone(), &BusinessRules::default());
    let err = engine
        .cancel_ticket(&staff(), ticket.id, Confirmation::Declined)
        .await
        .unwrap_err();

    assert!(matches!(err, CancellationError::NotConfirmed));
    assert!(tickets.get_ticket(ticket.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_restore_seat_rule_returns_the_seat() {
    let db = setup().await;
    let ticket = seed_booked_ticket(&db, "AA901", "5", "Asad Khan").await;
    let flights = StoreFlightRepository::new(db.pool.clone());
    assert_eq!(flights.get_flight("AA901").await.unwrap().unwrap().seats, 4);

    let rules = BusinessRules {
        restore_seat_on_cancel: true,
        ..BusinessRules::default()
    };
    let engine = CancellationEngine::new(db.clone(), &rules);
    engine
        .cancel_ticket(&staff(), ticket.id, Confirmation::Confirmed)
        .await
        .unwrap();

    assert_eq!(flights.get_flight("AA901").await.unwrap().unwrap().seats, 5);
}

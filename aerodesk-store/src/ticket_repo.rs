use aerodesk_core::fares::FareClass;
use aerodesk_core::models::{Passenger, Ticket};
use aerodesk_core::repository::TicketRepository;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

pub struct StoreTicketRepository {
    pool: SqlitePool,
}

impl StoreTicketRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    flight_code: String,
    passenger_id: String,
    passenger_name: String,
    passenger_passport: String,
    passenger_nationality: String,
    fare_class: String,
    amount: i64,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            flight_code: row.flight_code,
            passenger_id: row.passenger_id,
            passenger_name: row.passenger_name,
            passenger_passport: row.passenger_passport,
            passenger_nationality: row.passenger_nationality,
            fare_class: FareClass::from_input(&row.fare_class),
            amount: row.amount,
        }
    }
}

const SELECT_TICKET: &str = "SELECT id, flight_code, passenger_id, passenger_name, \
     passenger_passport, passenger_nationality, fare_class, amount FROM tickets";

#[async_trait]
impl TicketRepository for StoreTicketRepository {
    async fn get_ticket(
        &self,
        id: i64,
    ) -> Result<Option<Ticket>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, TicketRow>(&format!("{SELECT_TICKET} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Ticket::from))
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!("{SELECT_TICKET} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn list_tickets_for_passenger(
        &self,
        passenger_id: &str,
    ) -> Result<Vec<Ticket>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "{SELECT_TICKET} WHERE passenger_id = ? ORDER BY id"
        ))
        .bind(passenger_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn flight_has_tickets(
        &self,
        flight_code: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM tickets WHERE flight_code = ?")
            .bind(flight_code)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}

/// Transaction-scoped ticket operations for the booking and
/// cancellation units of work.
pub struct TicketTx;

impl TicketTx {
    /// Insert a ticket snapshotting the passenger's identity at booking
    /// time. Returns the generated ticket id.
    pub async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        flight_code: &str,
        passenger: &Passenger,
        fare_class: FareClass,
        amount: i64,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO tickets (flight_code, passenger_id, passenger_name,
                                 passenger_passport, passenger_nationality, fare_class, amount)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(flight_code)
        .bind(&passenger.id)
        .bind(&passenger.name)
        .bind(&passenger.passport)
        .bind(&passenger.nationality)
        .bind(fare_class.as_str())
        .bind(amount)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let row = sqlx::query_as::<_, TicketRow>(&format!("{SELECT_TICKET} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(Ticket::from))
    }

    pub async fn delete(tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

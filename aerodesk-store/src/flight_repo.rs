use aerodesk_core::models::Flight;
use aerodesk_core::repository::FlightRepository;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

pub struct StoreFlightRepository {
    pool: SqlitePool,
}

impl StoreFlightRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct FlightRow {
    code: String,
    origin: String,
    destination: String,
    departure: chrono::DateTime<chrono::Utc>,
    seats: i64,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            code: row.code,
            origin: row.origin,
            destination: row.destination,
            departure: row.departure,
            seats: row.seats,
        }
    }
}

const SELECT_FLIGHT: &str = "SELECT code, origin, destination, departure, seats FROM flights";

#[async_trait]
impl FlightRepository for StoreFlightRepository {
    async fn get_flight(
        &self,
        code: &str,
    ) -> Result<Option<Flight>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} WHERE code = ?"))
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Flight::from))
    }

    async fn list_flights(&self) -> Result<Vec<Flight>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} ORDER BY code"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn list_open_flights(
        &self,
    ) -> Result<Vec<Flight>, Box<dyn std::error::Error + Send + Sync>> {
        let rows =
            sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} WHERE seats > 0 ORDER BY code"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn create_flight(
        &self,
        flight: &Flight,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO flights (code, origin, destination, departure, seats)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&flight.code)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.departure)
        .bind(flight.seats)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_flight(
        &self,
        flight: &Flight,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            r#"
            UPDATE flights SET origin = ?, destination = ?, departure = ?, seats = ?
            WHERE code = ?
            "#,
        )
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.departure)
        .bind(flight.seats)
        .bind(&flight.code)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_flight(
        &self,
        code: &str,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM flights WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Transaction-scoped flight operations used inside the booking and
/// cancellation units of work.
pub struct FlightTx;

impl FlightTx {
    pub async fn get(
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
    ) -> Result<Option<Flight>, sqlx::Error> {
        let row = sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} WHERE code = ?"))
            .bind(code)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(Flight::from))
    }

    /// Compare-and-decrement: takes one seat only while the counter is
    /// still positive. Returns false when the conditional update hit
    /// zero rows, i.e. the seat was gone by the time we claimed it.
    pub async fn reserve_seat(
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE flights SET seats = seats - 1 WHERE code = ? AND seats > 0")
            .bind(code)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Puts one seat back. Returns false when the flight no longer
    /// exists (ticket references are soft).
    pub async fn release_seat(
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE flights SET seats = seats + 1 WHERE code = ?")
            .bind(code)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

use aerodesk_core::models::Passenger;
use aerodesk_core::repository::PassengerRepository;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

pub struct StorePassengerRepository {
    pool: SqlitePool,
}

impl StorePassengerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    id: String,
    name: String,
    address: String,
    passport: String,
    nationality: String,
    gender: String,
    phone: String,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            id: row.id,
            name: row.name,
            address: row.address,
            passport: row.passport,
            nationality: row.nationality,
            gender: row.gender,
            phone: row.phone,
        }
    }
}

const SELECT_PASSENGER: &str =
    "SELECT id, name, address, passport, nationality, gender, phone FROM passengers";

const INSERT_PASSENGER: &str = r#"
INSERT INTO passengers (id, name, address, passport, nationality, gender, phone)
VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

#[async_trait]
impl PassengerRepository for StorePassengerRepository {
    async fn get_passenger(
        &self,
        id: &str,
    ) -> Result<Option<Passenger>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, PassengerRow>(&format!("{SELECT_PASSENGER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Passenger::from))
    }

    async fn list_passengers(
        &self,
    ) -> Result<Vec<Passenger>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, PassengerRow>(&format!("{SELECT_PASSENGER} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn create_passenger(
        &self,
        passenger: &Passenger,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(INSERT_PASSENGER)
            .bind(&passenger.id)
            .bind(&passenger.name)
            .bind(&passenger.address)
            .bind(&passenger.passport)
            .bind(&passenger.nationality)
            .bind(&passenger.gender)
            .bind(&passenger.phone)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn next_numeric_id(&self) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        // Only ids that are plain digit strings participate in numbering
        let max: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(CAST(id AS INTEGER)) FROM passengers WHERE id GLOB '[0-9]*'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(max.unwrap_or(0) + 1)
    }
}

/// Transaction-scoped passenger operations for the booking unit of work
pub struct PassengerTx;

impl PassengerTx {
    pub async fn get(
        tx: &mut Transaction<'_, Sqlite>,
        id: &str,
    ) -> Result<Option<Passenger>, sqlx::Error> {
        let row = sqlx::query_as::<_, PassengerRow>(&format!("{SELECT_PASSENGER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(Passenger::from))
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        passenger: &Passenger,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(INSERT_PASSENGER)
            .bind(&passenger.id)
            .bind(&passenger.name)
            .bind(&passenger.address)
            .bind(&passenger.passport)
            .bind(&passenger.nationality)
            .bind(&passenger.gender)
            .bind(&passenger.phone)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub async fn next_numeric_id(tx: &mut Transaction<'_, Sqlite>) -> Result<i64, sqlx::Error> {
        let max: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(CAST(id AS INTEGER)) FROM passengers WHERE id GLOB '[0-9]*'",
        )
        .fetch_one(&mut **tx)
        .await?;

        Ok(max.unwrap_or(0) + 1)
    }
}

use aerodesk_core::models::UserAccount;
use aerodesk_core::repository::UserRepository;
use aerodesk_core::session::Role;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

pub struct StoreUserRepository {
    pool: SqlitePool,
}

impl StoreUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    password: String,
    role: String,
    passenger_id: Option<String>,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        UserAccount {
            username: row.username,
            password: row.password,
            role: Role::parse(&row.role),
            passenger_id: row.passenger_id,
        }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn find_user(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT username, password, role, passenger_id FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserAccount::from))
    }

    async fn create_user(
        &self,
        user: &UserAccount,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password, role, passenger_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(&user.passenger_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn linked_username(
        &self,
        passenger_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let username: Option<String> =
            sqlx::query_scalar("SELECT username FROM users WHERE passenger_id = ?")
                .bind(passenger_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(username)
    }
}

/// Transaction-scoped credential operations for the registration unit
/// of work.
pub struct UserTx;

impl UserTx {
    pub async fn find(
        tx: &mut Transaction<'_, Sqlite>,
        username: &str,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT username, password, role, passenger_id FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(UserAccount::from))
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        user: &UserAccount,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password, role, passenger_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(&user.passenger_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn linked_username(
        tx: &mut Transaction<'_, Sqlite>,
        passenger_id: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let username: Option<String> =
            sqlx::query_scalar("SELECT username FROM users WHERE passenger_id = ?")
                .bind(passenger_id)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(username)
    }
}

//! SQLite user repository implementation

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::user::{NewUser, Outcome, Standing, User, UserId, UserRepository, UserStats};
use crate::domain::DomainError;
use crate::infrastructure::storage::SqliteDatabase;

/// SQLite implementation of UserRepository
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    database: SqliteDatabase,
}

impl SqliteUserRepository {
    pub fn new(database: SqliteDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let mut conn = self.database.connect().await?;
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, wins, losses, streak
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.value())
        .fetch_optional(&mut conn)
        .await;
        self.database.release(conn).await;

        let row = row.map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.database.connect().await?;
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, wins, losses, streak
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut conn)
        .await;
        self.database.release(conn).await;

        let row = row
            .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut conn = self.database.connect().await?;
        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(&user.username)
            .bind(&user.password_hash)
            .execute(&mut conn)
            .await;
        self.database.release(conn).await;

        let result = result.map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::conflict("That username is already taken.")
            }
            _ => DomainError::storage(format!("Failed to create user: {}", e)),
        })?;

        Ok(User::new(
            UserId::new(result.last_insert_rowid()),
            user.username,
            user.password_hash,
        ))
    }

    async fn record_outcome(
        &self,
        id: &UserId,
        outcome: Outcome,
    ) -> Result<Option<Standing>, DomainError> {
        let statement = match outcome {
            Outcome::Win => {
                "UPDATE users SET wins = wins + 1, streak = streak + 1 \
                 WHERE id = ? RETURNING wins, losses, streak"
            }
            Outcome::Loss => {
                "UPDATE users SET losses = losses + 1, streak = 0 \
                 WHERE id = ? RETURNING wins, losses, streak"
            }
        };

        let mut conn = self.database.connect().await?;
        let row = sqlx::query(statement)
            .bind(id.value())
            .fetch_optional(&mut conn)
            .await;
        self.database.release(conn).await;

        let row = row.map_err(|e| {
            DomainError::storage(format!("Failed to record {}: {}", outcome.as_str(), e))
        })?;

        row.as_ref().map(row_to_standing).transpose()
    }

    async fn top_by_wins(&self, limit: usize) -> Result<Vec<UserStats>, DomainError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut conn = self.database.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT username, wins, losses, streak
            FROM users
            ORDER BY wins DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&mut conn)
        .await;
        self.database.release(conn).await;

        let rows =
            rows.map_err(|e| DomainError::storage(format!("Failed to load leaderboard: {}", e)))?;

        rows.iter().map(row_to_stats).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let mut conn = self.database.connect().await?;
        let count: Result<i64, _> = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut conn)
            .await;
        self.database.release(conn).await;

        let count = count.map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        usize::try_from(count).map_err(|_| {
            DomainError::storage(format!("User count out of range in database: {}", count))
        })
    }
}

fn row_to_user(row: &SqliteRow) -> Result<User, DomainError> {
    let id: i64 = get_column(row, "id")?;
    let username: String = get_column(row, "username")?;
    let password_hash: String = get_column(row, "password_hash")?;

    Ok(User::with_standing(
        UserId::new(id),
        username,
        password_hash,
        row_to_standing(row)?,
    ))
}

fn row_to_stats(row: &SqliteRow) -> Result<UserStats, DomainError> {
    let standing = row_to_standing(row)?;

    Ok(UserStats {
        username: get_column(row, "username")?,
        wins: standing.wins,
        losses: standing.losses,
        streak: standing.streak,
    })
}

fn row_to_standing(row: &SqliteRow) -> Result<Standing, DomainError> {
    Ok(Standing {
        wins: get_counter(row, "wins")?,
        losses: get_counter(row, "losses")?,
        streak: get_counter(row, "streak")?,
    })
}

fn get_column<T>(row: &SqliteRow, column: &str) -> Result<T, DomainError>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("Invalid '{}' column in database: {}", column, e)))
}

fn get_counter(row: &SqliteRow, column: &str) -> Result<u32, DomainError> {
    let value: i64 = get_column(row, column)?;

    u32::try_from(value).map_err(|_| {
        DomainError::storage(format!("Counter '{}' out of range in database: {}", column, value))
    })
}

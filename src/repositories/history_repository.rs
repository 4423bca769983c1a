// src/repositories/history_repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::{DeviceId, HistoryEntry, HistoryKey, Movie, MovieId, UserId};
use crate::error::{AppError, AppResult};

/// Keyed document store for history entries
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Entry for the exact (device, movie, user) triple
    async fn get(&self, key: &HistoryKey) -> AppResult<Option<HistoryEntry>>;

    /// Insert a new entry; fails if the key already exists
    async fn create(&self, entry: &HistoryEntry) -> AppResult<()>;

    /// Overwrite flag, snapshot and timestamp of an existing entry
    async fn update(&self, entry: &HistoryEntry) -> AppResult<()>;

    /// All entries of a user across devices, most recently updated first
    async fn list_by_user(&self, user_id: &UserId) -> AppResult<Vec<HistoryEntry>>;
}

pub struct SqliteHistoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteHistoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Run a blocking query on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            f(&conn)
        })
        .await?
    }

    fn row_to_entry(row: &Row) -> Result<HistoryEntry, rusqlite::Error> {
        let movie_json: String = row.get("movie_json")?;
        let movie: Movie = serde_json::from_str(&movie_json)
            .map_err(|e| decode_failure(row, "movie_json", e))?;

        let movie_id: i64 = row.get("movie_id")?;

        Ok(HistoryEntry {
            id: row.get("id")?,
            key: HistoryKey {
                device_id: DeviceId::new(row.get::<_, String>("device_id")?),
                movie_id: MovieId(movie_id as u64),
                user_id: UserId::new(row.get::<_, String>("user_id")?),
            },
            is_saved: row.get("is_saved")?,
            movie,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }
}

fn parse_timestamp(row: &Row, column: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    let value: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| decode_failure(row, column, e))
}

/// A TEXT column that holds a value we cannot decode
fn decode_failure<E>(row: &Row, column: &str, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    match row.as_ref().column_index(column) {
        Ok(index) => rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)),
        Err(e) => e,
    }
}

#[async_trait]
impl HistoryRepository for SqliteHistoryRepository {
    async fn get(&self, key: &HistoryKey) -> AppResult<Option<HistoryEntry>> {
        let key = key.clone();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM history_movies
                 WHERE device_id = ?1 AND movie_id = ?2 AND user_id = ?3",
            )?;

            match stmt.query_row(
                params![
                    key.device_id.as_str(),
                    key.movie_id.0 as i64,
                    key.user_id.as_str()
                ],
                Self::row_to_entry,
            ) {
                Ok(entry) => Ok(Some(entry)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(AppError::Database(e)),
            }
        })
        .await
    }

    async fn create(&self, entry: &HistoryEntry) -> AppResult<()> {
        let entry = entry.clone();
        let movie_json = serde_json::to_string(&entry.movie)?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO history_movies
                    (id, device_id, movie_id, user_id, is_saved, movie_json, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entry.id,
                    entry.key.device_id.as_str(),
                    entry.key.movie_id.0 as i64,
                    entry.key.user_id.as_str(),
                    entry.is_saved,
                    movie_json,
                    entry.created_at.to_rfc3339(),
                    entry.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn update(&self, entry: &HistoryEntry) -> AppResult<()> {
        let entry = entry.clone();
        let movie_json = serde_json::to_string(&entry.movie)?;
        self.with_conn(move |conn| {
            let changed = conn.execute(
                "UPDATE history_movies
                 SET is_saved = ?2, movie_json = ?3, updated_at = ?4
                 WHERE id = ?1",
                params![
                    entry.id,
                    entry.is_saved,
                    movie_json,
                    entry.updated_at.to_rfc3339(),
                ],
            )?;

            if changed == 0 {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn list_by_user(&self, user_id: &UserId) -> AppResult<Vec<HistoryEntry>> {
        let user_id = user_id.clone();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM history_movies WHERE user_id = ?1 ORDER BY updated_at DESC",
            )?;

            let entries = stmt
                .query_map(params![user_id.as_str()], Self::row_to_entry)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(entries)
        })
        .await
    }
}

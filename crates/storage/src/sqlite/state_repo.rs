use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{StateEntry, StateRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl StateRepository for SqliteRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<StateEntry>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT key, value, updated_at
            FROM kv_entries
            WHERE key = ?1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let key: String = row.try_get("key").map_err(ser)?;
        let value: String = row.try_get("value").map_err(ser)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(ser)?;
        Ok(Some(StateEntry {
            key,
            value,
            updated_at,
        }))
    }

    async fn put_entry(&self, entry: &StateEntry) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(&entry.key)
        .bind(&entry.value)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn delete_entry(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}

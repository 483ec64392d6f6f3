use chrono::Utc;

use crate::db::{with_conn, DbPool};
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, NewTrainer, Trainer};

#[derive(Clone)]
pub struct TrainerRepository {
    pool: DbPool,
}

impl TrainerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, trainer: NewTrainer) -> Result<Trainer> {
        with_conn(&self.pool, move |conn| {
            let exists: bool = conn.query_row(
                "SELECT COUNT(*) > 0 FROM trainers WHERE id = ?",
                [&trainer.id],
                |row| row.get(0),
            )?;
            if exists {
                return Err(AppError::Conflict(format!(
                    "Trainer ID {} already exists",
                    trainer.id
                )));
            }

            let trainer = Trainer {
                id: trainer.id,
                name: trainer.name,
                specialization: trainer.specialization,
                created_at: Utc::now(),
            };
            conn.execute(
                "INSERT INTO trainers (id, name, specialization, created_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![
                    trainer.id,
                    trainer.name,
                    trainer.specialization,
                    trainer.created_at
                ],
            )?;
            Ok(trainer)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Trainer>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(Trainer::query_optional(
                conn,
                "SELECT * FROM trainers WHERE id = ?",
                [&id],
            )?)
        })
        .await
    }

    pub async fn find_all(&self) -> Result<Vec<Trainer>> {
        with_conn(&self.pool, |conn| {
            Ok(Trainer::query_all(
                conn,
                "SELECT * FROM trainers ORDER BY created_at, id",
                [],
            )?)
        })
        .await
    }

    pub async fn count(&self) -> Result<i64> {
        with_conn(&self.pool, |conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM trainers", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
    }

    /// Remove a trainer; their classes stay on the schedule without one.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM trainers WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::member_repo::require_member;
use crate::db::{with_conn, DbPool};
use crate::error::Result;
use crate::models::{FromSqliteRow, Measurement, NewMeasurement};

#[derive(Clone)]
pub struct MeasurementRepository {
    pool: DbPool,
}

impl MeasurementRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        measurement: NewMeasurement,
        recorded_at: DateTime<Utc>,
    ) -> Result<Measurement> {
        with_conn(&self.pool, move |conn| {
            require_member(conn, &measurement.member_id)?;

            let measurement = Measurement {
                id: Uuid::new_v4().to_string(),
                member_id: measurement.member_id,
                weight_kg: measurement.weight_kg,
                running_speed_kmh: measurement.running_speed_kmh,
                recorded_at,
            };
            conn.execute(
                "INSERT INTO measurements (id, member_id, weight_kg, running_speed_kmh, recorded_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    measurement.id,
                    measurement.member_id,
                    measurement.weight_kg,
                    measurement.running_speed_kmh,
                    measurement.recorded_at
                ],
            )?;
            Ok(measurement)
        })
        .await
    }

    /// A member's measurements, oldest first.
    pub async fn find_by_member(&self, member_id: &str) -> Result<Vec<Measurement>> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(Measurement::query_all(
                conn,
                "SELECT * FROM measurements WHERE member_id = ? ORDER BY recorded_at",
                [&member_id],
            )?)
        })
        .await
    }

    pub async fn find_in_range(
        &self,
        member_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Measurement>> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(Measurement::query_all(
                conn,
                "SELECT * FROM measurements
                 WHERE member_id = ? AND date(recorded_at) BETWEEN ? AND ?
                 ORDER BY recorded_at",
                rusqlite::params![member_id, from, to],
            )?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::error::AppError;
    use crate::migrations::run_migrations_for_tests;
    use chrono::TimeZone;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn insert_member(pool: &DbPool, id: &str) {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO members (id, name, age, membership_type, joined_at) VALUES (?, 'John Doe', 30, 'basic', datetime('now'))",
            [id],
        )
        .unwrap();
    }

    fn weight(member_id: &str, kg: f64) -> NewMeasurement {
        NewMeasurement {
            member_id: member_id.to_string(),
            weight_kg: Some(kg),
            running_speed_kmh: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_member_is_chronological() {
        let pool = setup_test_db();
        insert_member(&pool, "M001");
        let repo = MeasurementRepository::new(pool);
        let later = Utc.with_ymd_and_hms(2026, 5, 10, 7, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2026, 5, 1, 7, 0, 0).unwrap();

        repo.create(weight("M001", 79.0), later).await.unwrap();
        repo.create(weight("M001", 80.0), earlier).await.unwrap();

        let series = repo.find_by_member("M001").await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].weight_kg, Some(80.0));
        assert_eq!(series[1].recorded_at, later);

        let in_range = repo
            .find_in_range(
                "M001",
                NaiveDate::from_ymd_opt(2026, 5, 5).unwrap(),
                NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(in_range.len(), 1);
    }

    #[tokio::test]
    async fn test_create_for_missing_member_rejected() {
        let repo = MeasurementRepository::new(setup_test_db());
        let result = repo.create(weight("M404", 80.0), Utc::now()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

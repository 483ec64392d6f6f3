use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::member_repo::require_member;
use crate::db::{with_conn, DbPool};
use crate::error::Result;
use crate::models::{
    FromSqliteRow, MemberWorkoutSummary, NewWorkoutLog, WorkoutLog, WorkoutLogWithMember,
};

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, log: NewWorkoutLog, logged_at: DateTime<Utc>) -> Result<WorkoutLog> {
        with_conn(&self.pool, move |conn| {
            require_member(conn, &log.member_id)?;

            let workout = WorkoutLog {
                id: Uuid::new_v4().to_string(),
                member_id: log.member_id,
                exercise_type: log.exercise_type,
                duration_minutes: log.duration_minutes,
                calories_burned: log.calories_burned,
                distance_km: log.distance_km,
                notes: log.notes,
                logged_at,
                updated_at: None,
            };
            conn.execute(
                "INSERT INTO workout_logs
                    (id, member_id, exercise_type, duration_minutes, calories_burned, distance_km, notes, logged_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    workout.id,
                    workout.member_id,
                    workout.exercise_type,
                    workout.duration_minutes,
                    workout.calories_burned,
                    workout.distance_km,
                    workout.notes,
                    workout.logged_at
                ],
            )?;
            Ok(workout)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<WorkoutLog>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(WorkoutLog::query_optional(
                conn,
                "SELECT * FROM workout_logs WHERE id = ?",
                [&id],
            )?)
        })
        .await
    }

    pub async fn find_by_member(&self, member_id: &str) -> Result<Vec<WorkoutLog>> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(WorkoutLog::query_all(
                conn,
                "SELECT * FROM workout_logs WHERE member_id = ? ORDER BY logged_at DESC",
                [&member_id],
            )?)
        })
        .await
    }

    pub async fn find_recent(&self, limit: i64) -> Result<Vec<WorkoutLogWithMember>> {
        with_conn(&self.pool, move |conn| {
            Ok(WorkoutLogWithMember::query_all(
                conn,
                "SELECT w.*, m.name AS member_name
                 FROM workout_logs w
                 JOIN members m ON m.id = w.member_id
                 ORDER BY w.logged_at DESC
                 LIMIT ?",
                [limit],
            )?)
        })
        .await
    }

    /// A member's workouts on days `from..=to`, oldest first.
    pub async fn find_in_range(
        &self,
        member_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WorkoutLog>> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(WorkoutLog::query_all(
                conn,
                "SELECT * FROM workout_logs
                 WHERE member_id = ? AND date(logged_at) BETWEEN ? AND ?
                 ORDER BY logged_at",
                rusqlite::params![member_id, from, to],
            )?)
        })
        .await
    }

    /// Correct a logged workout. The member and the original log time stay
    /// unless a new day is given.
    pub async fn update(
        &self,
        id: &str,
        log: NewWorkoutLog,
        logged_at: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute(
                "UPDATE workout_logs
                 SET exercise_type = ?, duration_minutes = ?, calories_burned = ?, distance_km = ?,
                     notes = ?, logged_at = COALESCE(?, logged_at), updated_at = ?
                 WHERE id = ?",
                rusqlite::params![
                    log.exercise_type,
                    log.duration_minutes,
                    log.calories_burned,
                    log.distance_km,
                    log.notes,
                    logged_at,
                    Utc::now(),
                    id
                ],
            )?;
            Ok(rows > 0)
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM workout_logs WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
    }

    /// Calories burned and kilometres covered by a member since `since`.
    pub async fn totals_since(&self, member_id: &str, since: DateTime<Utc>) -> Result<(f64, f64)> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            let totals = conn.query_row(
                "SELECT COALESCE(SUM(calories_burned), 0.0), COALESCE(SUM(distance_km), 0.0)
                 FROM workout_logs
                 WHERE member_id = ? AND julianday(logged_at) >= julianday(?)",
                rusqlite::params![member_id, since],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(totals)
        })
        .await
    }

    /// Workout totals per member on days `from..=to`. Members without
    /// workouts are listed with zeros.
    pub async fn summary_by_member(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MemberWorkoutSummary>> {
        with_conn(&self.pool, move |conn| {
            Ok(MemberWorkoutSummary::query_all(
                conn,
                "SELECT m.id AS member_id, m.name AS member_name,
                        COUNT(w.id) AS workouts,
                        COALESCE(SUM(w.duration_minutes), 0) AS total_minutes,
                        COALESCE(SUM(w.calories_burned), 0) AS total_calories
                 FROM members m
                 LEFT JOIN workout_logs w
                    ON w.member_id = m.id AND date(w.logged_at) BETWEEN ? AND ?
                 GROUP BY m.id, m.name
                 ORDER BY workouts DESC, m.name",
                rusqlite::params![from, to],
            )?)
        })
        .await
    }

    pub async fn count(&self) -> Result<i64> {
        with_conn(&self.pool, |conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM workout_logs", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
    }
}

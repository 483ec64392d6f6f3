use chrono::Utc;
use uuid::Uuid;

use super::member_repo::require_member;
use crate::db::{with_conn, DbPool};
use crate::error::Result;
use crate::models::{FromSqliteRow, Goal, GoalStatus, GoalWithMember, NewGoal};

#[derive(Clone)]
pub struct GoalRepository {
    pool: DbPool,
}

impl GoalRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, goal: NewGoal) -> Result<Goal> {
        with_conn(&self.pool, move |conn| {
            require_member(conn, &goal.member_id)?;

            let now = Utc::now();
            let goal = Goal {
                id: Uuid::new_v4().to_string(),
                member_id: goal.member_id,
                goal_type: goal.goal_type,
                target_value: goal.target_value,
                duration_weeks: goal.duration_weeks,
                status: GoalStatus::Active,
                created_at: now,
                updated_at: now,
            };
            conn.execute(
                "INSERT INTO goals
                    (id, member_id, goal_type, target_value, duration_weeks, status, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    goal.id,
                    goal.member_id,
                    goal.goal_type.as_str(),
                    goal.target_value,
                    goal.duration_weeks,
                    goal.status.as_str(),
                    goal.created_at,
                    goal.updated_at
                ],
            )?;
            Ok(goal)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Goal>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(Goal::query_optional(
                conn,
                "SELECT * FROM goals WHERE id = ?",
                [&id],
            )?)
        })
        .await
    }

    pub async fn find_by_member(&self, member_id: &str) -> Result<Vec<Goal>> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(Goal::query_all(
                conn,
                "SELECT * FROM goals WHERE member_id = ? ORDER BY created_at DESC",
                [&member_id],
            )?)
        })
        .await
    }

    /// Every goal with its member's name; active goals first.
    pub async fn find_all(&self) -> Result<Vec<GoalWithMember>> {
        with_conn(&self.pool, |conn| {
            Ok(GoalWithMember::query_all(
                conn,
                "SELECT g.*, m.name AS member_name
                 FROM goals g
                 JOIN members m ON m.id = g.member_id
                 ORDER BY g.status = 'active' DESC, g.created_at DESC",
                [],
            )?)
        })
        .await
    }

    /// Close an active goal. Returns false when the goal does not exist or is
    /// already achieved or abandoned.
    pub async fn update_status(&self, id: &str, status: GoalStatus) -> Result<bool> {
        if !GoalStatus::Active.can_transition_to(status) {
            return Ok(false);
        }
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute(
                "UPDATE goals SET status = ?, updated_at = ? WHERE id = ? AND status = 'active'",
                rusqlite::params![status.as_str(), Utc::now(), id],
            )?;
            Ok(rows > 0)
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM goals WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::member_repo::require_member;
use crate::db::{with_conn, DbPool};
use crate::error::Result;
use crate::models::{FromSqliteRow, NewNutritionLog, NutritionLog, NutritionLogWithMember};

#[derive(Clone)]
pub struct NutritionRepository {
    pool: DbPool,
}

impl NutritionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        meal: NewNutritionLog,
        logged_at: DateTime<Utc>,
    ) -> Result<NutritionLog> {
        with_conn(&self.pool, move |conn| {
            require_member(conn, &meal.member_id)?;

            let log = NutritionLog {
                id: Uuid::new_v4().to_string(),
                member_id: meal.member_id,
                meal_type: meal.meal_type,
                food_items: meal.food_items,
                calories: meal.calories,
                protein_g: meal.protein_g,
                carbs_g: meal.carbs_g,
                fat_g: meal.fat_g,
                logged_at,
            };
            conn.execute(
                "INSERT INTO nutrition_logs
                    (id, member_id, meal_type, food_items, calories, protein_g, carbs_g, fat_g, logged_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    log.id,
                    log.member_id,
                    log.meal_type.as_str(),
                    log.food_items,
                    log.calories,
                    log.protein_g,
                    log.carbs_g,
                    log.fat_g,
                    log.logged_at
                ],
            )?;
            Ok(log)
        })
        .await
    }

    pub async fn find_by_member(&self, member_id: &str) -> Result<Vec<NutritionLog>> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(NutritionLog::query_all(
                conn,
                "SELECT * FROM nutrition_logs WHERE member_id = ? ORDER BY logged_at DESC",
                [&member_id],
            )?)
        })
        .await
    }

    pub async fn find_recent(&self, limit: i64) -> Result<Vec<NutritionLogWithMember>> {
        with_conn(&self.pool, move |conn| {
            Ok(NutritionLogWithMember::query_all(
                conn,
                "SELECT n.*, m.name AS member_name
                 FROM nutrition_logs n
                 JOIN members m ON m.id = n.member_id
                 ORDER BY n.logged_at DESC
                 LIMIT ?",
                [limit],
            )?)
        })
        .await
    }

    /// A member's meals on days `from..=to`, oldest first.
    pub async fn find_in_range(
        &self,
        member_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NutritionLog>> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(NutritionLog::query_all(
                conn,
                "SELECT * FROM nutrition_logs
                 WHERE member_id = ? AND date(logged_at) BETWEEN ? AND ?
                 ORDER BY logged_at",
                rusqlite::params![member_id, from, to],
            )?)
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM nutrition_logs WHERE id = ?", [&id])?;
            Ok(rows > 0)
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
    use crate::models::MealType;
    use chrono::TimeZone;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn insert_member(pool: &DbPool, id: &str, name: &str) {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO members (id, name, age, membership_type, joined_at) VALUES (?, ?, 30, 'basic', datetime('now'))",
            rusqlite::params![id, name],
        )
        .unwrap();
    }

    fn oatmeal(member_id: &str) -> NewNutritionLog {
        NewNutritionLog {
            member_id: member_id.to_string(),
            meal_type: MealType::Breakfast,
            food_items: "Oatmeal, banana".to_string(),
            calories: 420,
            protein_g: 12,
            carbs_g: 70,
            fat_g: 8,
            eaten_on: None,
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, d, 8, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_member() {
        let pool = setup_test_db();
        insert_member(&pool, "M001", "John Doe");
        let repo = NutritionRepository::new(pool);

        let log = repo.create(oatmeal("M001"), day(1)).await.unwrap();
        let logs = repo.find_by_member("M001").await.unwrap();

        assert_eq!(logs, vec![log]);
    }

    #[tokio::test]
    async fn test_create_for_missing_member_rejected() {
        let repo = NutritionRepository::new(setup_test_db());
        let result = repo.create(oatmeal("M404"), day(1)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_in_range_and_recent() {
        let pool = setup_test_db();
        insert_member(&pool, "M001", "John Doe");
        let repo = NutritionRepository::new(pool);
        for d in [1, 3, 5] {
            repo.create(oatmeal("M001"), day(d)).await.unwrap();
        }

        let in_range = repo
            .find_in_range(
                "M001",
                NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
                NaiveDate::from_ymd_opt(2026, 4, 5).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(in_range.len(), 2);

        let recent = repo.find_recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].log.logged_at, day(5));
        assert_eq!(recent[0].member_name, "John Doe");
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = setup_test_db();
        insert_member(&pool, "M001", "John Doe");
        let repo = NutritionRepository::new(pool);
        let log = repo.create(oatmeal("M001"), day(1)).await.unwrap();

        assert!(repo.delete(&log.id).await.unwrap());
        assert!(repo.find_by_member("M001").await.unwrap().is_empty());
    }
}

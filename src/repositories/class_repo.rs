use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

use super::member_repo::require_member;
use crate::db::{with_conn, DbPool};
use crate::error::{AppError, Result};
use crate::models::{
    Booking, BookingOutcome, ClassOverview, FitnessClass, FromSqliteRow, NewFitnessClass,
};

const OVERVIEW_SELECT: &str = "SELECT c.id, c.name, c.capacity, c.schedule, c.trainer_id,
        t.name AS trainer_name,
        (SELECT COUNT(*) FROM class_bookings b WHERE b.class_id = c.id) AS enrolled
     FROM fitness_classes c
     LEFT JOIN trainers t ON t.id = c.trainer_id";

#[derive(Clone)]
pub struct ClassRepository {
    pool: DbPool,
}

impl ClassRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, class: NewFitnessClass) -> Result<FitnessClass> {
        with_conn(&self.pool, move |conn| {
            let exists: bool = conn.query_row(
                "SELECT COUNT(*) > 0 FROM fitness_classes WHERE id = ?",
                [&class.id],
                |row| row.get(0),
            )?;
            if exists {
                return Err(AppError::Conflict(format!(
                    "Class ID {} already exists",
                    class.id
                )));
            }
            if let Some(trainer_id) = &class.trainer_id {
                require_trainer(conn, trainer_id)?;
            }

            let class = FitnessClass {
                id: class.id,
                name: class.name,
                capacity: class.capacity,
                schedule: class.schedule,
                trainer_id: class.trainer_id,
                created_at: Utc::now(),
            };
            conn.execute(
                "INSERT INTO fitness_classes (id, name, capacity, schedule, trainer_id, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    class.id,
                    class.name,
                    class.capacity,
                    class.schedule,
                    class.trainer_id,
                    class.created_at
                ],
            )?;
            Ok(class)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<ClassOverview>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let sql = format!("{OVERVIEW_SELECT} WHERE c.id = ?");
            Ok(ClassOverview::query_optional(conn, &sql, [&id])?)
        })
        .await
    }

    /// Every class with trainer name and enrollment, in scheduling order.
    pub async fn find_all(&self) -> Result<Vec<ClassOverview>> {
        with_conn(&self.pool, |conn| {
            let sql = format!("{OVERVIEW_SELECT} ORDER BY c.created_at, c.id");
            Ok(ClassOverview::query_all(conn, &sql, [])?)
        })
        .await
    }

    pub async fn find_by_trainer(&self, trainer_id: &str) -> Result<Vec<ClassOverview>> {
        let trainer_id = trainer_id.to_string();
        with_conn(&self.pool, move |conn| {
            let sql = format!("{OVERVIEW_SELECT} WHERE c.trainer_id = ? ORDER BY c.created_at, c.id");
            Ok(ClassOverview::query_all(conn, &sql, [&trainer_id])?)
        })
        .await
    }

    pub async fn find_by_member(&self, member_id: &str) -> Result<Vec<ClassOverview>> {
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            let sql = format!(
                "{OVERVIEW_SELECT}
                 WHERE c.id IN (SELECT class_id FROM class_bookings WHERE member_id = ?)
                 ORDER BY c.created_at, c.id"
            );
            Ok(ClassOverview::query_all(conn, &sql, [&member_id])?)
        })
        .await
    }

    /// Set or clear the trainer of a class. Returns false if the class does
    /// not exist.
    pub async fn assign_trainer(&self, class_id: &str, trainer_id: Option<String>) -> Result<bool> {
        let class_id = class_id.to_string();
        with_conn(&self.pool, move |conn| {
            if let Some(trainer_id) = &trainer_id {
                require_trainer(conn, trainer_id)?;
            }
            let rows = conn.execute(
                "UPDATE fitness_classes SET trainer_id = ? WHERE id = ?",
                rusqlite::params![trainer_id, class_id],
            )?;
            Ok(rows > 0)
        })
        .await
    }

    /// Book a member into a class. The capacity check and the insert share
    /// one IMMEDIATE transaction so concurrent bookings cannot overfill.
    pub async fn book(&self, class_id: &str, member_id: &str) -> Result<BookingOutcome> {
        let class_id = class_id.to_string();
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let capacity: Option<i64> = tx
                .query_row(
                    "SELECT capacity FROM fitness_classes WHERE id = ?",
                    [&class_id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(capacity) = capacity else {
                return Err(AppError::not_found("Class"));
            };
            require_member(&tx, &member_id)?;

            let already_booked: bool = tx.query_row(
                "SELECT COUNT(*) > 0 FROM class_bookings WHERE class_id = ? AND member_id = ?",
                [&class_id, &member_id],
                |row| row.get(0),
            )?;
            if already_booked {
                return Ok(BookingOutcome::AlreadyBooked);
            }

            let enrolled: i64 = tx.query_row(
                "SELECT COUNT(*) FROM class_bookings WHERE class_id = ?",
                [&class_id],
                |row| row.get(0),
            )?;
            if enrolled >= capacity {
                return Ok(BookingOutcome::ClassFull);
            }

            tx.execute(
                "INSERT INTO class_bookings (class_id, member_id, booked_at) VALUES (?, ?, ?)",
                rusqlite::params![class_id, member_id, Utc::now()],
            )?;
            tx.commit()?;
            Ok(BookingOutcome::Booked)
        })
        .await
    }

    pub async fn cancel_booking(&self, class_id: &str, member_id: &str) -> Result<bool> {
        let class_id = class_id.to_string();
        let member_id = member_id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute(
                "DELETE FROM class_bookings WHERE class_id = ? AND member_id = ?",
                [&class_id, &member_id],
            )?;
            Ok(rows > 0)
        })
        .await
    }

    pub async fn roster(&self, class_id: &str) -> Result<Vec<Booking>> {
        let class_id = class_id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(Booking::query_all(
                conn,
                "SELECT b.class_id, b.member_id, m.name AS member_name, b.booked_at
                 FROM class_bookings b
                 JOIN members m ON m.id = b.member_id
                 WHERE b.class_id = ?
                 ORDER BY b.booked_at, m.name",
                [&class_id],
            )?)
        })
        .await
    }

    /// `(class name, bookings)` for every class, in scheduling order.
    pub async fn enrollment_counts(&self) -> Result<Vec<(String, i64)>> {
        with_conn(&self.pool, |conn| {
            let mut stmt = conn.prepare(
                "SELECT c.name, COUNT(b.member_id)
                 FROM fitness_classes c
                 LEFT JOIN class_bookings b ON b.class_id = c.id
                 GROUP BY c.id, c.name
                 ORDER BY c.created_at, c.id",
            )?;
            let counts = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(counts)
        })
        .await
    }

    pub async fn count(&self) -> Result<i64> {
        with_conn(&self.pool, |conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM fitness_classes", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM fitness_classes WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
    }
}

fn require_trainer(conn: &Connection, id: &str) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM trainers WHERE id = ?",
        [id],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(AppError::not_found("Trainer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn insert_member(pool: &DbPool, id: &str) {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO members (id, name, age, membership_type, joined_at) VALUES (?, ?, 30, 'basic', datetime('now'))",
            rusqlite::params![id, format!("Member {id}")],
        )
        .unwrap();
    }

    fn insert_trainer(pool: &DbPool, id: &str) {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO trainers (id, name, specialization, created_at) VALUES (?, ?, 'Yoga', datetime('now'))",
            rusqlite::params![id, format!("Trainer {id}")],
        )
        .unwrap();
    }

    fn new_class(id: &str, capacity: i64) -> NewFitnessClass {
        NewFitnessClass {
            id: id.to_string(),
            name: format!("Class {id}"),
            capacity,
            schedule: "Monday, 8:00 AM".to_string(),
            trainer_id: None,
        }
    }

    #[tokio::test]
    async fn test_booking_respects_capacity() {
        let pool = setup_test_db();
        insert_member(&pool, "M001");
        insert_member(&pool, "M002");
        let repo = ClassRepository::new(pool);
        repo.create(new_class("C001", 1)).await.unwrap();

        assert_eq!(repo.book("C001", "M001").await.unwrap(), BookingOutcome::Booked);
        assert_eq!(repo.book("C001", "M002").await.unwrap(), BookingOutcome::ClassFull);

        let class = repo.find_by_id("C001").await.unwrap().unwrap();
        assert_eq!(class.enrolled, 1);
    }

    #[tokio::test]
    async fn test_double_booking_rejected() {
        let pool = setup_test_db();
        insert_member(&pool, "M001");
        let repo = ClassRepository::new(pool);
        repo.create(new_class("C001", 10)).await.unwrap();

        repo.book("C001", "M001").await.unwrap();
        assert_eq!(
            repo.book("C001", "M001").await.unwrap(),
            BookingOutcome::AlreadyBooked
        );
        assert_eq!(repo.roster("C001").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_booking_unknown_member_or_class() {
        let pool = setup_test_db();
        insert_member(&pool, "M001");
        let repo = ClassRepository::new(pool);
        repo.create(new_class("C001", 10)).await.unwrap();

        assert!(matches!(
            repo.book("C001", "M404").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            repo.book("C404", "M001").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_cancel_booking_frees_spot() {
        let pool = setup_test_db();
        insert_member(&pool, "M001");
        insert_member(&pool, "M002");
        let repo = ClassRepository::new(pool);
        repo.create(new_class("C001", 1)).await.unwrap();
        repo.book("C001", "M001").await.unwrap();

        assert!(repo.cancel_booking("C001", "M001").await.unwrap());
        assert!(!repo.cancel_booking("C001", "M001").await.unwrap());
        assert_eq!(repo.book("C001", "M002").await.unwrap(), BookingOutcome::Booked);
    }

    #[tokio::test]
    async fn test_assign_trainer_and_schedule() {
        let pool = setup_test_db();
        insert_trainer(&pool, "T001");
        let repo = ClassRepository::new(pool);
        repo.create(new_class("C001", 10)).await.unwrap();
        repo.create(new_class("C002", 10)).await.unwrap();

        assert!(repo
            .assign_trainer("C001", Some("T001".to_string()))
            .await
            .unwrap());
        assert!(matches!(
            repo.assign_trainer("C002", Some("T404".to_string())).await,
            Err(AppError::NotFound(_))
        ));

        let schedule = repo.find_by_trainer("T001").await.unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].trainer_name.as_deref(), Some("Trainer T001"));
    }

    #[tokio::test]
    async fn test_deleting_trainer_unassigns_classes() {
        let pool = setup_test_db();
        insert_trainer(&pool, "T001");
        let repo = ClassRepository::new(pool.clone());
        let mut class = new_class("C001", 10);
        class.trainer_id = Some("T001".to_string());
        repo.create(class).await.unwrap();

        pool.get()
            .unwrap()
            .execute("DELETE FROM trainers WHERE id = 'T001'", [])
            .unwrap();

        let class = repo.find_by_id("C001").await.unwrap().unwrap();
        assert_eq!(class.trainer_id, None);
    }

    #[tokio::test]
    async fn test_member_bookings() {
        let pool = setup_test_db();
        insert_member(&pool, "M001");
        let repo = ClassRepository::new(pool);
        repo.create(new_class("C001", 10)).await.unwrap();
        repo.create(new_class("C002", 10)).await.unwrap();
        repo.book("C002", "M001").await.unwrap();

        let booked = repo.find_by_member("M001").await.unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].id, "C002");
    }
}

use chrono::Utc;
use rusqlite::Connection;

use crate::db::{with_conn, DbPool};
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Member, MemberDetails, MembershipType};

#[derive(Clone)]
pub struct MemberRepository {
    pool: DbPool,
}

impl MemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a member under `code`, or under the next free `M###` code when
    /// none is given.
    pub async fn create(&self, code: Option<String>, details: MemberDetails) -> Result<Member> {
        with_conn(&self.pool, move |conn| {
            let id = match code {
                Some(code) => {
                    if member_exists(conn, &code)? {
                        return Err(AppError::Conflict(format!(
                            "Member ID {code} already exists"
                        )));
                    }
                    code
                }
                None => next_code(conn)?,
            };

            let member = Member {
                id,
                name: details.name,
                age: details.age,
                membership_type: details.membership_type,
                fitness_goal: details.fitness_goal,
                email: details.email,
                phone: details.phone,
                joined_at: Utc::now(),
            };

            conn.execute(
                "INSERT INTO members (id, name, age, membership_type, fitness_goal, email, phone, joined_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    member.id,
                    member.name,
                    member.age,
                    member.membership_type.as_str(),
                    member.fitness_goal,
                    member.email,
                    member.phone,
                    member.joined_at
                ],
            )?;
            Ok(member)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Member>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(Member::query_optional(
                conn,
                "SELECT * FROM members WHERE id = ?",
                [&id],
            )?)
        })
        .await
    }

    pub async fn find_all(&self) -> Result<Vec<Member>> {
        with_conn(&self.pool, |conn| {
            Ok(Member::query_all(
                conn,
                "SELECT * FROM members ORDER BY joined_at, id",
                [],
            )?)
        })
        .await
    }

    pub async fn count(&self) -> Result<i64> {
        with_conn(&self.pool, |conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
    }

    pub async fn update(&self, id: &str, details: MemberDetails) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute(
                "UPDATE members
                 SET name = ?, age = ?, membership_type = ?, fitness_goal = ?, email = ?, phone = ?
                 WHERE id = ?",
                rusqlite::params![
                    details.name,
                    details.age,
                    details.membership_type.as_str(),
                    details.fitness_goal,
                    details.email,
                    details.phone,
                    id
                ],
            )?;
            Ok(rows > 0)
        })
        .await
    }

    pub async fn update_membership(&self, id: &str, membership: MembershipType) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute(
                "UPDATE members SET membership_type = ? WHERE id = ?",
                rusqlite::params![membership.as_str(), id],
            )?;
            Ok(rows > 0)
        })
        .await
    }

    /// Remove a member. Their logs, goals, measurements and bookings go with
    /// them; their payments stay on record without a member reference.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM members WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
    }
}

pub(crate) fn member_exists(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM members WHERE id = ?",
        [id],
        |row| row.get(0),
    )
}

/// Fail with `NotFound` unless the member exists.
pub(crate) fn require_member(conn: &Connection, id: &str) -> Result<()> {
    if member_exists(conn, id)? {
        Ok(())
    } else {
        Err(AppError::not_found("Member"))
    }
}

/// The first `M###` code above every numeric `M` code in use.
fn next_code(conn: &Connection) -> Result<String> {
    let mut stmt = conn.prepare("SELECT id FROM members WHERE id GLOB 'M*'")?;
    let highest = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .filter_map(|id| id.ok())
        .filter_map(|id| id[1..].parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    let next = highest
        .checked_add(1)
        .ok_or_else(|| AppError::Conflict("No member codes left to generate; enter one".to_string()))?;
    Ok(format!("M{next:03}"))
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

    fn details(name: &str) -> MemberDetails {
        MemberDetails {
            name: name.to_string(),
            age: 30,
            membership_type: MembershipType::Premium,
            fitness_goal: Some("Weight Loss".to_string()),
            email: Some("member@example.com".to_string()),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_returns_same_data() {
        let repo = MemberRepository::new(setup_test_db());

        let created = repo
            .create(Some("M001".to_string()), details("John Doe"))
            .await
            .unwrap();
        let found = repo.find_by_id("M001").await.unwrap().unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_duplicate_code_conflicts() {
        let repo = MemberRepository::new(setup_test_db());

        repo.create(Some("M001".to_string()), details("John Doe"))
            .await
            .unwrap();
        let result = repo
            .create(Some("M001".to_string()), details("Jane Smith"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_generated_codes_skip_past_highest() {
        let repo = MemberRepository::new(setup_test_db());

        let first = repo.create(None, details("A")).await.unwrap();
        repo.create(Some("M007".to_string()), details("B"))
            .await
            .unwrap();
        repo.create(Some("VIP-1".to_string()), details("C"))
            .await
            .unwrap();
        let next = repo.create(None, details("D")).await.unwrap();

        assert_eq!(first.id, "M001");
        assert_eq!(next.id, "M008");
    }

    #[tokio::test]
    async fn test_generated_codes_ignore_lowercase_prefix() {
        let repo = MemberRepository::new(setup_test_db());

        repo.create(Some("m050".to_string()), details("A"))
            .await
            .unwrap();
        let next = repo.create(None, details("B")).await.unwrap();

        assert_eq!(next.id, "M001");
    }

    #[tokio::test]
    async fn test_generated_code_at_limit_conflicts() {
        let repo = MemberRepository::new(setup_test_db());

        repo.create(Some("M4294967295".to_string()), details("A"))
            .await
            .unwrap();
        let result = repo.create(None, details("B")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_and_membership_change() {
        let repo = MemberRepository::new(setup_test_db());
        repo.create(Some("M001".to_string()), details("John Doe"))
            .await
            .unwrap();

        let mut changed = details("Johnny Doe");
        changed.age = 31;
        assert!(repo.update("M001", changed).await.unwrap());
        assert!(repo
            .update_membership("M001", MembershipType::Vip)
            .await
            .unwrap());

        let found = repo.find_by_id("M001").await.unwrap().unwrap();
        assert_eq!(found.name, "Johnny Doe");
        assert_eq!(found.age, 31);
        assert_eq!(found.membership_type, MembershipType::Vip);
    }

    #[tokio::test]
    async fn test_update_missing_member_returns_false() {
        let repo = MemberRepository::new(setup_test_db());

        assert!(!repo.update("M404", details("Nobody")).await.unwrap());
        assert!(!repo.delete("M404").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_stored_membership_is_an_error() {
        let pool = setup_test_db();
        let repo = MemberRepository::new(pool.clone());
        repo.create(Some("M001".to_string()), details("John Doe"))
            .await
            .unwrap();
        pool.get()
            .unwrap()
            .execute("UPDATE members SET membership_type = 'gold' WHERE id = 'M001'", [])
            .unwrap();

        let result = repo.find_by_id("M001").await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_delete_leaves_other_members() {
        let repo = MemberRepository::new(setup_test_db());
        repo.create(Some("M001".to_string()), details("John Doe"))
            .await
            .unwrap();
        repo.create(Some("M002".to_string()), details("Jane Smith"))
            .await
            .unwrap();

        assert!(repo.delete("M001").await.unwrap());

        assert!(repo.find_by_id("M001").await.unwrap().is_none());
        let remaining = repo.find_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "M002");
    }
}

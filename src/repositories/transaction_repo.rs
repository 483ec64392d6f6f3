use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::{with_conn, DbPool};
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, NewPayment, Transaction};

#[derive(Clone)]
pub struct TransactionRepository {
    pool: DbPool,
}

impl TransactionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record a payment. The member's name is copied onto the transaction so
    /// the receipt outlives the membership.
    pub async fn create(&self, payment: NewPayment) -> Result<Transaction> {
        with_conn(&self.pool, move |conn| {
            let member_name: Option<String> = conn
                .query_row(
                    "SELECT name FROM members WHERE id = ?",
                    [&payment.member_id],
                    |row| row.get(0),
                )
                .optional()?;
            let member_name = member_name.ok_or_else(|| AppError::not_found("Member"))?;

            let transaction = Transaction {
                id: Uuid::new_v4().to_string(),
                member_id: Some(payment.member_id),
                member_name,
                amount: payment.amount,
                service: payment.service,
                paid_at: Utc::now(),
            };
            conn.execute(
                "INSERT INTO transactions (id, member_id, member_name, amount, service, paid_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    transaction.id,
                    transaction.member_id,
                    transaction.member_name,
                    transaction.amount,
                    transaction.service,
                    transaction.paid_at
                ],
            )?;
            Ok(transaction)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(Transaction::query_optional(
                conn,
                "SELECT * FROM transactions WHERE id = ?",
                [&id],
            )?)
        })
        .await
    }

    /// Every transaction, newest first.
    pub async fn find_all(&self) -> Result<Vec<Transaction>> {
        with_conn(&self.pool, |conn| {
            Ok(Transaction::query_all(
                conn,
                "SELECT * FROM transactions ORDER BY paid_at DESC",
                [],
            )?)
        })
        .await
    }

    /// Sum and count of all payments, including those of removed members.
    pub async fn total_revenue(&self) -> Result<(f64, i64)> {
        with_conn(&self.pool, |conn| {
            let totals = conn.query_row(
                "SELECT COALESCE(SUM(amount), 0.0), COUNT(*) FROM transactions",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(totals)
        })
        .await
    }
}

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::input;
use super::FromSqliteRow;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// `None` once the paying member has been removed.
    pub member_id: Option<String>,
    pub member_name: String,
    pub amount: f64,
    pub service: String,
    pub paid_at: DateTime<Utc>,
}

impl Transaction {
    pub fn amount_display(&self) -> String {
        format!("${:.2}", self.amount)
    }

    pub fn receipt(&self) -> String {
        format!(
            "Receipt for Transaction #{}\n\
             Member: {}\n\
             Service: {}\n\
             Date: {}\n\
             Amount Paid: {}\n",
            self.id,
            self.member_name,
            self.service,
            self.paid_at.format("%Y-%m-%d"),
            self.amount_display(),
        )
    }
}

impl FromSqliteRow for Transaction {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            member_id: row.get("member_id")?,
            member_name: row.get("member_name")?,
            amount: row.get("amount")?,
            service: row.get("service")?,
            paid_at: row.get("paid_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentInput {
    pub member_id: String,
    pub amount: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub member_id: String,
    pub amount: f64,
    pub service: String,
}

impl PaymentInput {
    pub fn parse(&self) -> Result<NewPayment> {
        Ok(NewPayment {
            member_id: input::required("Member", &self.member_id)?,
            amount: input::positive_decimal("Amount", &self.amount)?,
            service: input::required("Service", &self.service)?,
        })
    }
}

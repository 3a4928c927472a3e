// 🗂️ Records - raw rows as read from CSV, and their cleaned counterparts
//
// Raw records keep every non-key cell as optional text (empty cell = None).
// Cleaned records carry typed dates/amounts and implement `Row` for output.

use crate::dates::DATE_FORMAT;
use crate::schema::{Column, ColumnType, Row, Value};
use chrono::NaiveDate;
use serde::Deserialize;
use std::borrow::Cow;

// ============================================================================
// RAW RECORDS (as extracted)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawUser {
    pub user_id: String,
    pub join_date: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTransaction {
    pub transaction_id: String,
    pub user_id: String,
    pub timestamp: Option<String>,
    pub amount: Option<String>,
    pub transaction_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDelivery {
    pub package_id: String,
    pub user_id: String,
    pub delivery_date: Option<String>,
    pub courier: Option<String>,
    pub delivery_status: Option<String>,
}

// ============================================================================
// CLEANED RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: String,
    pub join_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    pub user_id: String,
    /// `YYYY-MM-DD HH:MM:SS`, wall clock in the configured zone
    pub timestamp: Option<String>,
    /// Rounded to 2 decimals
    pub amount: Option<f64>,
    pub transaction_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub package_id: String,
    pub user_id: String,
    pub delivery_date: Option<NaiveDate>,
    /// Trimmed + upper-cased
    pub courier: Option<String>,
    pub delivery_status: Option<String>,
}

fn date_value(date: Option<NaiveDate>) -> Value<'static> {
    match date {
        Some(d) => Value::Text(Cow::Owned(d.format(DATE_FORMAT).to_string())),
        None => Value::Null,
    }
}

// ============================================================================
// ROW LAYOUTS
// ============================================================================

impl Row for User {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("user_id", ColumnType::Id),
            Column::new("join_date", ColumnType::Date),
            Column::new("name", ColumnType::Text),
            Column::new("email", ColumnType::Text),
        ]
    }

    fn values(&self) -> Vec<Value<'_>> {
        vec![
            Value::text(&self.user_id),
            date_value(self.join_date),
            Value::opt_text(self.name.as_deref()),
            Value::opt_text(self.email.as_deref()),
        ]
    }
}

impl Row for Transaction {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("transaction_id", ColumnType::Id),
            Column::new("user_id", ColumnType::Id),
            Column::new("timestamp", ColumnType::Timestamp),
            Column::new("amount", ColumnType::Real),
            Column::new("transaction_type", ColumnType::Text),
        ]
    }

    fn values(&self) -> Vec<Value<'_>> {
        vec![
            Value::text(&self.transaction_id),
            Value::text(&self.user_id),
            Value::opt_text(self.timestamp.as_deref()),
            self.amount.map(Value::Real).unwrap_or(Value::Null),
            Value::opt_text(self.transaction_type.as_deref()),
        ]
    }
}

impl Row for Delivery {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("package_id", ColumnType::Id),
            Column::new("user_id", ColumnType::Id),
            Column::new("delivery_date", ColumnType::Date),
            Column::new("courier", ColumnType::Text),
            Column::new("delivery_status", ColumnType::Text),
        ]
    }

    fn values(&self) -> Vec<Value<'_>> {
        vec![
            Value::text(&self.package_id),
            Value::text(&self.user_id),
            date_value(self.delivery_date),
            Value::opt_text(self.courier.as_deref()),
            Value::opt_text(self.delivery_status.as_deref()),
        ]
    }
}

// ============================================================================
// TESTS
// ============================================================================

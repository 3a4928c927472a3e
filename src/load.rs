// 💾 Load - persist validated tables to CSV files and SQLite
//
// SQLite writes replace the table: prior contents of a same-named table are discarded.

use crate::schema::{Row, Value};
use anyhow::{bail, Context, Result};
use rusqlite::types::{Null, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use std::fs;
use std::path::Path;
use tracing::info;

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Null => Null.to_sql(),
            Value::Text(s) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes()))),
            Value::Real(n) => Ok(ToSqlOutput::from(*n)),
        }
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Write `rows` with a header line; nulls become empty cells
pub fn save_to_csv<R: Row>(rows: &[R], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record(R::columns().iter().map(|c| c.name.as_str()))?;
    for row in rows {
        writer.write_record(row.values().iter().map(Value::render))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "📁 Saved CSV");
    Ok(())
}

// ============================================================================
// SQLITE
// ============================================================================

fn quote_ident(name: &str) -> Result<String> {
    if name.is_empty() || name.contains('"') || name.contains('\0') {
        bail!("Invalid SQL identifier: {:?}", name);
    }
    Ok(format!("\"{}\"", name))
}

/// Open (or create) the database file with WAL journaling
pub fn open_database(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}

/// Replace `table` with `rows`, inside one SQLite transaction
pub fn write_table<R: Row>(conn: &mut Connection, table: &str, rows: &[R]) -> Result<usize> {
    let columns = R::columns();
    let table_ident = quote_ident(table)?;

    let column_defs = columns
        .iter()
        .map(|c| Ok(format!("{} {}", quote_ident(&c.name)?, c.ty.sql_type())))
        .collect::<Result<Vec<_>>>()?
        .join(", ");
    let column_names = columns
        .iter()
        .map(|c| quote_ident(&c.name))
        .collect::<Result<Vec<_>>>()?
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");

    let tx = conn.transaction()?;
    tx.execute(&format!("DROP TABLE IF EXISTS {}", table_ident), [])?;
    tx.execute(&format!("CREATE TABLE {} ({})", table_ident, column_defs), [])?;

    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table_ident, column_names, placeholders
        ))?;
        for row in rows {
            stmt.execute(params_from_iter(row.values()))
                .with_context(|| format!("Failed to insert row into '{}'", table))?;
        }
    }

    tx.commit()?;
    Ok(rows.len())
}

/// Open `db_path` and replace `table` with `rows`
pub fn save_to_sqlite<R: Row>(rows: &[R], db_path: &Path, table: &str) -> Result<()> {
    let mut conn = open_database(db_path)?;
    let inserted = write_table(&mut conn, table, rows)?;

    info!(table, db = %db_path.display(), rows = inserted, "🗃️ Saved table to SQLite");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::left_join;
    use crate::records::{Delivery, User};
    use chrono::NaiveDate;

    fn users() -> Vec<User> {
        vec![
            User {
                user_id: "1".to_string(),
                join_date: NaiveDate::from_ymd_opt(2023, 1, 5),
                name: Some("Ann, Jr.".to_string()),
                email: Some("ann@example.com".to_string()),
            },
            User {
                user_id: "2".to_string(),
                join_date: None,
                name: Some("Bob".to_string()),
                email: None,
            },
        ]
    }

    fn deliveries() -> Vec<Delivery> {
        vec![Delivery {
            package_id: "P1".to_string(),
            user_id: "1".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            courier: Some("FEDEX".to_string()),
            delivery_status: Some("delivered".to_string()),
        }]
    }

    #[test]
    fn test_save_to_csv_header_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed").join("deliveries_merged.csv");
        let merged = left_join(&users(), &deliveries());

        save_to_csv(&merged, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "user_id,join_date,name,email,package_id,delivery_date,courier,delivery_status"
        );
        assert_eq!(
            lines[1],
            "1,2023-01-05,\"Ann, Jr.\",ann@example.com,P1,2024-03-10,FEDEX,delivered"
        );
        assert_eq!(lines[2], "2,,Bob,,,,,");
    }

    #[test]
    fn test_save_to_sqlite_typed_columns_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("merged_data.sqlite");
        let merged = left_join(&users(), &deliveries());

        save_to_sqlite(&merged, &db, "user_deliveries").unwrap();

        let conn = Connection::open(&db).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM user_deliveries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let courier: Option<String> = conn
            .query_row(
                "SELECT courier FROM user_deliveries WHERE user_id = '2'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(courier, None);
    }

    #[test]
    fn test_save_to_sqlite_replaces_table() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("merged_data.sqlite");

        save_to_sqlite(&left_join(&users(), &deliveries()), &db, "user_deliveries").unwrap();
        save_to_sqlite(&left_join(&users()[..1], &deliveries()), &db, "user_deliveries").unwrap();

        let conn = Connection::open(&db).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM user_deliveries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_real_column_stored_as_real() {
        use crate::records::Transaction;

        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("merged_data.sqlite");
        let txs = vec![Transaction {
            transaction_id: "100".to_string(),
            user_id: "1".to_string(),
            timestamp: Some("2024-03-10 02:00:00".to_string()),
            amount: Some(12.35),
            transaction_type: Some("purchase".to_string()),
        }];

        save_to_sqlite(&left_join(&users(), &txs), &db, "user_transactions").unwrap();

        let conn = Connection::open(&db).unwrap();
        let (amount, kind): (f64, String) = conn
            .query_row(
                "SELECT amount, typeof(amount) FROM user_transactions WHERE transaction_id = '100'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(amount, 12.35);
        assert_eq!(kind, "real");
    }

    #[test]
    fn test_rejects_bad_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("merged_data.sqlite");

        let result = save_to_sqlite(&users(), &db, "bad\"name");
        assert!(result.is_err());
    }
}

// 📂 Extract - read a headed CSV file into typed raw records

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Deserialize every row of `path` into `T` (columns matched by header name)
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (line_num, result) in reader.deserialize().enumerate() {
        let row: T = result.with_context(|| {
            // +2 because: 1-indexed + header row
            format!("Failed to parse CSV line {} in {}", line_num + 2, path.display())
        })?;
        rows.push(row);
    }

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RawDelivery, RawTransaction, RawUser};
    use std::fs;

    #[test]
    fn test_read_users_with_empty_cells_and_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_info.csv");
        fs::write(
            &path,
            "user_id,name,email,join_date,country\n\
             1,Ann,ann@example.com,2023-01-05,MX\n\
             2,,bob@example.com,,US\n",
        )
        .unwrap();

        let users: Vec<RawUser> = read_csv(&path).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].user_id, "1");
        assert_eq!(users[0].join_date.as_deref(), Some("2023-01-05"));
        assert_eq!(users[1].name, None);
        assert_eq!(users[1].join_date, None);
    }

    #[test]
    fn test_read_preserves_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package_delivery_info.csv");
        fs::write(
            &path,
            "package_id,user_id,delivery_date,courier,delivery_status\n\
             P1,1,2024-03-10,\"  fedEx \",delivered\n",
        )
        .unwrap();

        let deliveries: Vec<RawDelivery> = read_csv(&path).unwrap();

        assert_eq!(deliveries[0].courier.as_deref(), Some("  fedEx "));
    }

    #[test]
    fn test_missing_column_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transaction_info.csv");
        fs::write(&path, "transaction_id,timestamp,amount\n100,2024-03-10,5\n").unwrap();

        let err = read_csv::<RawTransaction>(&path).unwrap_err();

        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv::<RawUser>(Path::new("/no/such/user_info.csv")).unwrap_err();

        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}

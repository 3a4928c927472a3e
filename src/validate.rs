// ✅ Validator - the all-or-nothing gate before persistence
//
// 1. Primary key uniqueness (rows whose key columns are all null are exempt:
//    they are unmatched left-join rows)
// 2. No text cell longer than the field cap

use crate::error::ValidationError;
use crate::schema::Row;
use std::collections::HashMap;
use tracing::info;

/// Number of colliding key combinations carried in a DuplicateKey error
const MAX_DUPLICATE_SAMPLES: usize = 5;

/// Check a table; `Ok(())` means it may be persisted as-is
pub fn validate<R: Row>(
    table: &str,
    rows: &[R],
    primary_key: &[&str],
    max_len: usize,
) -> Result<(), ValidationError> {
    if !primary_key.is_empty() {
        check_primary_key(table, rows, primary_key)?;
    }
    check_field_lengths(table, rows, max_len)?;

    info!(table, rows = rows.len(), "✅ Data validation passed");
    Ok(())
}

fn check_primary_key<R: Row>(
    table: &str,
    rows: &[R],
    primary_key: &[&str],
) -> Result<(), ValidationError> {
    let columns = R::columns();
    let key_idx = primary_key
        .iter()
        .map(|name| {
            columns
                .iter()
                .position(|c| c.name == *name)
                .ok_or_else(|| ValidationError::UnknownColumn {
                    table: table.to_string(),
                    column: name.to_string(),
                })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    // key -> number of rows, plus first-seen order for stable reporting
    let mut counts: HashMap<Vec<Option<String>>, usize> = HashMap::new();
    let mut order: Vec<Vec<Option<String>>> = Vec::new();

    for row in rows {
        let values = row.values();
        let key: Vec<Option<String>> = key_idx
            .iter()
            .map(|&i| {
                let v = &values[i];
                if v.is_null() {
                    None
                } else {
                    Some(v.render())
                }
            })
            .collect();

        if key.iter().all(Option::is_none) {
            continue;
        }

        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    let colliding: Vec<&Vec<Option<String>>> = order.iter().filter(|k| counts[*k] > 1).collect();
    if colliding.is_empty() {
        return Ok(());
    }

    let duplicate_rows: usize = colliding.iter().map(|k| counts[*k]).sum();
    let samples: Vec<Vec<String>> = colliding
        .iter()
        .take(MAX_DUPLICATE_SAMPLES)
        .map(|k| {
            k.iter()
                .map(|v| v.clone().unwrap_or_else(|| "<null>".to_string()))
                .collect()
        })
        .collect();

    Err(ValidationError::DuplicateKey {
        table: table.to_string(),
        columns: primary_key.iter().map(|c| c.to_string()).collect(),
        samples,
        duplicate_rows,
    })
}

fn check_field_lengths<R: Row>(table: &str, rows: &[R], max_len: usize) -> Result<(), ValidationError> {
    let columns = R::columns();
    let text_idx: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.ty.is_text())
        .map(|(i, _)| i)
        .collect();

    for (row_idx, row) in rows.iter().enumerate() {
        let values = row.values();
        for &i in &text_idx {
            if let Some(length) = values[i].text_len() {
                if length > max_len {
                    return Err(ValidationError::FieldTooLong {
                        table: table.to_string(),
                        column: columns[i].name.clone(),
                        row: row_idx,
                        length,
                        max_len,
                    });
                }
            }
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

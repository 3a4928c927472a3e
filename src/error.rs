// 🚨 Error Types - the two fatal families the pipeline can raise on its own
// I/O failures stay in anyhow with path context (see extract.rs / load.rs)

use thiserror::Error;

// ============================================================================
// VALIDATION ERRORS (the gate before persistence)
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Same primary key combination found on more than one row
    #[error(
        "❌ Duplicate primary key rows found in '{table}' on {columns:?}: {duplicate_rows} rows collide, e.g. {samples:?}"
    )]
    DuplicateKey {
        table: String,
        columns: Vec<String>,
        /// Up to 5 colliding key combinations, in first-seen order
        samples: Vec<Vec<String>>,
        duplicate_rows: usize,
    },

    #[error("❌ Field '{column}' in '{table}' row {row} is {length} characters (max {max_len})")]
    FieldTooLong {
        table: String,
        column: String,
        row: usize,
        length: usize,
        max_len: usize,
    },

    #[error("Unknown primary key column '{column}' for table '{table}'")]
    UnknownColumn { table: String, column: String },
}

// ============================================================================
// INPUT ERRORS (bad configuration values or unusable cells)
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Unknown time zone: {0}")]
    UnknownTimezone(String),

    #[error("Transaction {transaction_id}: amount '{raw}' is not a number")]
    InvalidAmount { transaction_id: String, raw: String },
}

// Data Consolidation - Core Library
// Users + transactions + deliveries → cleaned, merged, validated, persisted

pub mod config;
pub mod dates;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod load;
pub mod merge;
pub mod pipeline;
pub mod records;
pub mod sanitize;
pub mod schema;
pub mod transform;
pub mod validate;

// Re-export commonly used types
pub use config::{
    PipelineConfig, DEFAULT_TIMEZONE, DELIVERIES_CSV, DELIVERIES_TABLE, TRANSACTIONS_CSV,
    TRANSACTIONS_TABLE,
};
pub use dates::{parse_loose, DateNormalizer, Parsed};
pub use dedupe::{dedupe_by_key, dedupe_with_report, DedupeReport};
pub use error::{InputError, ValidationError};
pub use extract::read_csv;
pub use load::{open_database, save_to_csv, save_to_sqlite, write_table};
pub use merge::{left_join, merge_data, ChildRecord, Joined, UserDelivery, UserTransaction};
pub use pipeline::{run, RunSummary, StageCounts, DELIVERIES_KEY, TRANSACTIONS_KEY};
pub use records::{Delivery, RawDelivery, RawTransaction, RawUser, Transaction, User};
pub use sanitize::{FieldSanitizer, MAX_FIELD_LEN};
pub use schema::{join_columns, Column, ColumnType, Row, Value};
pub use transform::{round_amount, Transformer};
pub use validate::validate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

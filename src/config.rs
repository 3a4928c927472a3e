// ⚙️ Pipeline Configuration - file locations and cleaning parameters
// Defaults reproduce the fixed layout under `data/`

use crate::sanitize::MAX_FIELD_LEN;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Zone every timestamp is normalized into
pub const DEFAULT_TIMEZONE: &str = "America/Mexico_City";

pub const TRANSACTIONS_CSV: &str = "transactions_merged.csv";
pub const DELIVERIES_CSV: &str = "deliveries_merged.csv";
pub const TRANSACTIONS_TABLE: &str = "user_transactions";
pub const DELIVERIES_TABLE: &str = "user_deliveries";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub users_path: PathBuf,
    pub transactions_path: PathBuf,
    pub deliveries_path: PathBuf,

    /// Directory receiving the two merged CSV files
    pub csv_out_dir: PathBuf,

    /// SQLite database receiving the two merged tables
    pub db_path: PathBuf,

    /// IANA zone name used by timestamp normalization
    pub timezone: String,

    pub max_field_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            users_path: PathBuf::from("data/raw/user_info.csv"),
            transactions_path: PathBuf::from("data/raw/transaction_info.csv"),
            deliveries_path: PathBuf::from("data/raw/package_delivery_info.csv"),
            csv_out_dir: PathBuf::from("data/processed"),
            db_path: PathBuf::from("data/merged_data.sqlite"),
            timezone: DEFAULT_TIMEZONE.to_string(),
            max_field_len: MAX_FIELD_LEN,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file; missing keys fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: PipelineConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        Ok(config)
    }

    pub fn transactions_csv(&self) -> PathBuf {
        self.csv_out_dir.join(TRANSACTIONS_CSV)
    }

    pub fn deliveries_csv(&self) -> PathBuf {
        self.csv_out_dir.join(DELIVERIES_CSV)
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 🔄 Pipeline - extract → transform → merge → validate → load, in one pass
//
// Any fatal error stops the run where it happens. There is no rollback: artifacts
// written before the failure stay on disk.

use crate::config::{PipelineConfig, DELIVERIES_TABLE, TRANSACTIONS_TABLE};
use crate::extract::read_csv;
use crate::load::{save_to_csv, save_to_sqlite};
use crate::merge::merge_data;
use crate::records::{RawDelivery, RawTransaction, RawUser};
use crate::transform::Transformer;
use crate::validate::validate;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

pub const TRANSACTIONS_KEY: &[&str] = &["user_id", "transaction_id"];
pub const DELIVERIES_KEY: &[&str] = &["user_id", "package_id"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub users: usize,
    pub transactions: usize,
    pub deliveries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub extracted: StageCounts,
    pub cleaned: StageCounts,
    pub merged_transactions: usize,
    pub merged_deliveries: usize,
    pub transactions_csv: PathBuf,
    pub deliveries_csv: PathBuf,
    pub db_path: PathBuf,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        format!(
            "Users: {} → {}, Transactions: {} → {}, Deliveries: {} → {} | merged rows: {} transactions, {} deliveries",
            self.extracted.users,
            self.cleaned.users,
            self.extracted.transactions,
            self.cleaned.transactions,
            self.extracted.deliveries,
            self.cleaned.deliveries,
            self.merged_transactions,
            self.merged_deliveries,
        )
    }
}

/// Run the whole batch described by `config`
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let transformer = Transformer::from_config(config)?;

    info!("🔄 Extracting data...");
    let raw_users: Vec<RawUser> = read_csv(&config.users_path)?;
    let raw_transactions: Vec<RawTransaction> = read_csv(&config.transactions_path)?;
    let raw_deliveries: Vec<RawDelivery> = read_csv(&config.deliveries_path)?;
    let extracted = StageCounts {
        users: raw_users.len(),
        transactions: raw_transactions.len(),
        deliveries: raw_deliveries.len(),
    };
    info!(
        users = extracted.users,
        transactions = extracted.transactions,
        deliveries = extracted.deliveries,
        "Extracted raw rows"
    );

    info!("🧹 Transforming data...");
    let users = transformer.transform_users(&raw_users);
    let transactions = transformer.transform_transactions(&raw_transactions)?;
    let deliveries = transformer.transform_deliveries(&raw_deliveries);
    let cleaned = StageCounts {
        users: users.len(),
        transactions: transactions.len(),
        deliveries: deliveries.len(),
    };

    info!("🔗 Merging datasets...");
    let (transactions_merged, deliveries_merged) = merge_data(&users, &transactions, &deliveries);

    info!("✅ Validating merged data...");
    validate(
        TRANSACTIONS_TABLE,
        &transactions_merged,
        TRANSACTIONS_KEY,
        config.max_field_len,
    )?;
    validate(
        DELIVERIES_TABLE,
        &deliveries_merged,
        DELIVERIES_KEY,
        config.max_field_len,
    )?;

    info!("💾 Saving merged CSVs...");
    let transactions_csv = config.transactions_csv();
    let deliveries_csv = config.deliveries_csv();
    save_to_csv(&transactions_merged, &transactions_csv)?;
    save_to_csv(&deliveries_merged, &deliveries_csv)?;

    info!("🗃️ Saving to SQLite database...");
    save_to_sqlite(&transactions_merged, &config.db_path, TRANSACTIONS_TABLE)?;
    save_to_sqlite(&deliveries_merged, &config.db_path, DELIVERIES_TABLE)?;

    Ok(RunSummary {
        extracted,
        cleaned,
        merged_transactions: transactions_merged.len(),
        merged_deliveries: deliveries_merged.len(),
        transactions_csv,
        deliveries_csv,
        db_path: config.db_path.clone(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputError, ValidationError};
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path) -> PipelineConfig {
        PipelineConfig {
            users_path: dir.join("user_info.csv"),
            transactions_path: dir.join("transaction_info.csv"),
            deliveries_path: dir.join("package_delivery_info.csv"),
            csv_out_dir: dir.join("processed"),
            db_path: dir.join("merged_data.sqlite"),
            ..PipelineConfig::default()
        }
    }

    fn write_inputs(config: &PipelineConfig, users: &str, transactions: &str, deliveries: &str) {
        fs::write(&config.users_path, users).unwrap();
        fs::write(&config.transactions_path, transactions).unwrap();
        fs::write(&config.deliveries_path, deliveries).unwrap();
    }

    #[test]
    fn test_run_counts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_inputs(
            &config,
            "user_id,join_date,name,email\n1,2023-01-05,Ann,a@x.com\n1,2023-02-01,ann-dup,b@x.com\n2,bad,Bob,c@x.com\n",
            "transaction_id,user_id,timestamp,amount,transaction_type\n100,1,2024-03-10T08:00:00Z,10.555,purchase\n101,1,2024-03-11 09:00:00,5,refund\n",
            "package_id,user_id,delivery_date,courier,delivery_status\nP1,2,2024-03-12,  fedEx ,delivered\n",
        );

        let summary = run(&config).unwrap();

        assert_eq!(summary.extracted.users, 3);
        assert_eq!(summary.cleaned.users, 2);
        assert_eq!(summary.merged_transactions, 3);
        assert_eq!(summary.merged_deliveries, 2);
        assert!(summary.transactions_csv.exists());
        assert!(summary.deliveries_csv.exists());
        assert!(summary.db_path.exists());
        assert!(summary.summary().contains("Users: 3 → 2"));
    }

    #[test]
    fn test_run_stops_on_field_too_long() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            max_field_len: 4,
            ..config_in(dir.path())
        };
        write_inputs(
            &config,
            "user_id,join_date,name,email\n1,2023-01-05,Ann,ann@example.com\n",
            "transaction_id,user_id,timestamp,amount,transaction_type\n",
            "package_id,user_id,delivery_date,courier,delivery_status\n",
        );

        let err = run(&config).unwrap_err();

        // Transform caps fields at max_field_len, but ISO dates are validated too
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert!(matches!(validation, ValidationError::FieldTooLong { column, .. } if column == "join_date"));
        assert!(!config.transactions_csv().exists());
        assert!(!config.db_path.exists());
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = run(&config).unwrap_err();

        assert!(format!("{:#}", err).contains("user_info.csv"));
    }

    #[test]
    fn test_run_invalid_amount() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_inputs(
            &config,
            "user_id,join_date,name,email\n1,2023-01-05,Ann,a@x.com\n",
            "transaction_id,user_id,timestamp,amount,transaction_type\n100,1,2024-03-10,ten,purchase\n",
            "package_id,user_id,delivery_date,courier,delivery_status\n",
        );

        let err = run(&config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_run_unknown_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            timezone: "Atlantis/Capital".to_string(),
            ..config_in(dir.path())
        };

        let err = run(&config).unwrap_err();

        assert!(err.downcast_ref::<InputError>().is_some());
    }
}

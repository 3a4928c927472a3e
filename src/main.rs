use anyhow::Result;
use clap::Parser;
use data_consolidation::{run, PipelineConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "data-consolidation")]
#[command(author, version, about = "Consolidate users, transactions and deliveries into CSV + SQLite")]
struct Cli {
    /// JSON config file (missing keys use the built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Users CSV
    #[arg(long)]
    users: Option<PathBuf>,

    /// Transactions CSV
    #[arg(long)]
    transactions: Option<PathBuf>,

    /// Package deliveries CSV
    #[arg(long)]
    deliveries: Option<PathBuf>,

    /// Directory for the merged CSV files
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    db: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(p) = self.users {
            config.users_path = p;
        }
        if let Some(p) = self.transactions {
            config.transactions_path = p;
        }
        if let Some(p) = self.deliveries {
            config.deliveries_path = p;
        }
        if let Some(p) = self.out_dir {
            config.csv_out_dir = p;
        }
        if let Some(p) = self.db {
            config.db_path = p;
        }

        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "data_consolidation=debug"
    } else {
        "data_consolidation=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config()?;

    println!("🗄️  Data Consolidation: CSV → CSV + SQLite");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let summary = run(&config)?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ {}", summary.summary());
    println!("✓ CSV: {}", summary.transactions_csv.display());
    println!("✓ CSV: {}", summary.deliveries_csv.display());
    println!("✓ SQLite: {}", summary.db_path.display());
    println!("🎉 ETL process completed successfully!");

    Ok(())
}

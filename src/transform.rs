// 🧹 Dataset Transformers - per-entity cleaning rules
//
// Every transformer dedupes on the raw rows first, then cleans fields, so the
// "first occurrence" decision is made on raw values. Inputs are borrowed and
// never modified; each call returns a fresh table.

use crate::config::PipelineConfig;
use crate::dates::DateNormalizer;
use crate::dedupe::dedupe_with_report;
use crate::error::InputError;
use crate::records::{Delivery, RawDelivery, RawTransaction, RawUser, Transaction, User};
use crate::sanitize::FieldSanitizer;
use tracing::debug;

/// Round to 2 decimals, ties to even (same rule as numpy's `round`)
pub fn round_amount(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Parse a raw amount cell; empty or NaN is None, anything non-numeric is an error
fn parse_amount(transaction_id: &str, raw: Option<&str>) -> Result<Option<f64>, InputError> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let value: f64 = text.parse().map_err(|_| InputError::InvalidAmount {
        transaction_id: transaction_id.to_string(),
        raw: text.to_string(),
    })?;

    Ok(if value.is_nan() {
        None
    } else {
        Some(round_amount(value))
    })
}

// ============================================================================
// TRANSFORMER
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer {
    dates: DateNormalizer,
    sanitizer: FieldSanitizer,
}

impl Transformer {
    pub fn new(dates: DateNormalizer, sanitizer: FieldSanitizer) -> Self {
        Transformer { dates, sanitizer }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, InputError> {
        Ok(Transformer::new(
            DateNormalizer::from_name(&config.timezone)?,
            FieldSanitizer::new(config.max_field_len),
        ))
    }

    fn truncate(&self, value: Option<&str>) -> Option<String> {
        value.map(|v| self.sanitizer.truncate(v))
    }

    /// Dedupe on user_id, normalize join_date, cap name/email
    pub fn transform_users(&self, raw: &[RawUser]) -> Vec<User> {
        let report = dedupe_with_report(raw, |u| u.user_id.clone());
        if !report.dropped.is_empty() {
            debug!(dropped = report.dropped.len(), "Dropped duplicate user_id rows");
        }

        report
            .rows
            .into_iter()
            .map(|u| User {
                join_date: u.join_date.as_deref().and_then(|d| self.dates.normalize_date(d)),
                name: self.truncate(u.name.as_deref()),
                email: self.truncate(u.email.as_deref()),
                user_id: u.user_id,
            })
            .collect()
    }

    /// Dedupe on transaction_id, localize timestamp, round amount, cap transaction_type
    pub fn transform_transactions(
        &self,
        raw: &[RawTransaction],
    ) -> Result<Vec<Transaction>, InputError> {
        let report = dedupe_with_report(raw, |t| t.transaction_id.clone());
        if !report.dropped.is_empty() {
            debug!(dropped = report.dropped.len(), "Dropped duplicate transaction_id rows");
        }

        report
            .rows
            .into_iter()
            .map(|t| -> Result<Transaction, InputError> {
                Ok(Transaction {
                    timestamp: t
                        .timestamp
                        .as_deref()
                        .and_then(|ts| self.dates.normalize_timestamp(ts)),
                    amount: parse_amount(&t.transaction_id, t.amount.as_deref())?,
                    transaction_type: self.truncate(t.transaction_type.as_deref()),
                    transaction_id: t.transaction_id,
                    user_id: t.user_id,
                })
            })
            .collect()
    }

    /// Dedupe on package_id, normalize delivery_date, clean courier, cap delivery_status
    pub fn transform_deliveries(&self, raw: &[RawDelivery]) -> Vec<Delivery> {
        let report = dedupe_with_report(raw, |d| d.package_id.clone());
        if !report.dropped.is_empty() {
            debug!(dropped = report.dropped.len(), "Dropped duplicate package_id rows");
        }

        report
            .rows
            .into_iter()
            .map(|d| Delivery {
                delivery_date: d
                    .delivery_date
                    .as_deref()
                    .and_then(|dd| self.dates.normalize_date(dd)),
                courier: d.courier.as_deref().map(|c| self.sanitizer.normalize_courier(c)),
                delivery_status: self.truncate(d.delivery_status.as_deref()),
                package_id: d.package_id,
                user_id: d.user_id,
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

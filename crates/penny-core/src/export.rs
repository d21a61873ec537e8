//! Transaction export
//!
//! Supports:
//! - CSV (one row per transaction, header row first)
//! - JSON (pretty-printed array)

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (expected csv or json)", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flat CSV row
#[derive(Serialize)]
struct CsvRow<'a> {
    id: i64,
    date: String,
    description: &'a str,
    amount: f64,
    category: &'a str,
    merchant: &'a str,
    payment_type: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(t: &'a Transaction) -> Self {
        Self {
            id: t.id,
            date: t.date.format("%Y-%m-%d").to_string(),
            description: &t.description,
            amount: t.amount,
            category: t.category.as_str(),
            merchant: &t.merchant,
            payment_type: t.payment_type.as_str(),
        }
    }
}

/// Render transactions in the given format
pub fn export_transactions(transactions: &[Transaction], format: ExportFormat) -> Result<String> {
    let output = match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for t in transactions {
                writer.serialize(CsvRow::from(t))?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| Error::InvalidData(format!("Failed to flush CSV: {}", e)))?;
            String::from_utf8(bytes)
                .map_err(|e| Error::InvalidData(format!("CSV output is not UTF-8: {}", e)))?
        }
        ExportFormat::Json => serde_json::to_string_pretty(transactions)?,
    };

    tracing::debug!(
        count = transactions.len(),
        format = format.as_str(),
        "Exported transactions"
    );
    Ok(output)
}

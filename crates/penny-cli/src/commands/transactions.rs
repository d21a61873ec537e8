//! Transaction commands (list, export)

use std::path::Path;

use anyhow::{Context, Result};
use penny_core::{by_category, export_transactions, format_signed_inr, Config, ExportFormat};

use super::common::{load_transactions, parse_category};
use super::truncate;
use crate::cli::DataArgs;

pub fn cmd_transactions(
    config: &Config,
    data: &DataArgs,
    limit: usize,
    category: Option<&str>,
) -> Result<()> {
    let category = parse_category(category)?;
    let all = load_transactions(config, data);
    let transactions = match category {
        Some(category) => by_category(&all, category),
        None => all.iter().collect(),
    };

    if transactions.is_empty() {
        match category {
            Some(category) => println!("No {} transactions in the selected range.", category),
            None => println!("No transactions in the selected range."),
        }
        return Ok(());
    }

    println!();
    match category {
        Some(category) => println!(
            "🧾 {} transactions (showing {} of {})",
            category,
            limit.min(transactions.len()),
            transactions.len()
        ),
        None => println!(
            "🧾 Transactions (showing {} of {})",
            limit.min(transactions.len()),
            transactions.len()
        ),
    }
    println!("   ─────────────────────────────────────────────────────────────────────────────");

    for t in transactions.iter().take(limit) {
        println!(
            "   {:>4}  {}  {:<34} {:>11}  {:<14} {}",
            t.id,
            t.date,
            truncate(&t.description, 34),
            format_signed_inr(t.amount),
            t.category.as_str(),
            t.payment_type.as_str()
        );
    }

    println!();
    Ok(())
}

pub fn cmd_export(
    config: &Config,
    data: &DataArgs,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;
    let transactions = load_transactions(config, data);
    let content = export_transactions(&transactions, format)
        .with_context(|| format!("Failed to export transactions as {}", format))?;

    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} transactions to {}",
                transactions.len(),
                path.display()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

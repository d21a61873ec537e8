//! Spending dashboard behind the (simulated) account connection sequence

use anyhow::{Context, Result};
use penny_core::screens::IntroBlock;
use penny_core::{
    by_category, format_inr, format_signed_inr, play_intro, summarize, Category, Config, Insights,
    Playback, PlaybackEnd, ScreenCatalog, Sequencer, Transaction,
};

use super::common::{ctrl_c_teardown, load_transactions, parse_category};
use super::render::bar;
use super::truncate;
use crate::cli::DataArgs;

const LOADING_SCREEN: &str = "account-aggregator";

/// Rows shown when drilling into a category
const CATEGORY_ROWS: usize = 10;

/// One loading line; the final step of the sequence is the connection itself
pub fn loading_line(block: &IntroBlock, is_last: bool) -> Option<String> {
    match block {
        IntroBlock::Message(draft) => {
            let icon = if is_last { "✅" } else { "⏳" };
            Some(format!("   {} {}", icon, draft.text))
        }
        IntroBlock::Prompt { .. } => None,
    }
}

pub async fn cmd_dashboard(
    catalog: &ScreenCatalog,
    config: &Config,
    data: &DataArgs,
    category: Option<&str>,
    playback: &Playback,
) -> Result<()> {
    let category = parse_category(category)?;
    let screen = catalog
        .get(LOADING_SCREEN)
        .context("Loading screen missing from catalogue")?;

    println!();
    println!("🔗 {}", screen.title);
    println!("   ─────────────────────────────────────────────────────────────");

    let total = screen.intro.len();
    let mut shown = 0;
    let mut print_step = |block: &IntroBlock| {
        shown += 1;
        if let Some(line) = loading_line(block, shown == total) {
            println!("{}", line);
        }
    };

    let mut sequencer = Sequencer::start(screen.intro.clone());
    for block in sequencer.visible() {
        print_step(block);
    }
    let mut teardown = ctrl_c_teardown();
    let end = play_intro(&mut sequencer, playback, &mut teardown, &mut print_step).await;
    if end == PlaybackEnd::TornDown {
        println!("   Cancelled.");
        return Ok(());
    }

    let transactions = load_transactions(config, data);
    let insights = summarize(&transactions);
    print!("{}", render_dashboard(&transactions, &insights));
    if let Some(category) = category {
        print!("{}", render_category(&transactions, &insights, category));
    }
    Ok(())
}

/// Dashboard body: summary cards, category split and recent transactions
pub fn render_dashboard(transactions: &[Transaction], insights: &Insights) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("╭─────────────────────────────────────────╮\n");
    out.push_str("│           💰 Penny Dashboard            │\n");
    out.push_str("╰─────────────────────────────────────────╯\n");
    out.push('\n');
    out.push_str(&format!("  Total Spent:     {}\n", format_inr(insights.total_spent)));
    out.push_str(&format!("  Total Income:    {}\n", format_inr(insights.total_income)));
    out.push_str(&format!("  Net:             {}\n", format_signed_inr(insights.net())));
    out.push_str(&format!("  Categories:      {}\n", insights.category_totals.len()));
    out.push_str(&format!("  Transactions:    {}\n", transactions.len()));

    if !insights.category_totals.is_empty() {
        out.push('\n');
        out.push_str("  📊 Category Split\n");
        for (category, total) in insights.top_categories() {
            let share = insights.category_share(category);
            out.push_str(&format!(
                "     {:<14} {} {:>10} ({:.0}%)\n",
                category.as_str(),
                bar(share, 20),
                format_inr(total),
                share
            ));
        }
    }

    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if !recent.is_empty() {
        out.push('\n');
        out.push_str("  🧾 Recent Transactions\n");
        for t in recent.into_iter().take(5) {
            out.push_str(&format!(
                "     {}  {:<32} {:>10}\n",
                t.date.format("%d %b"),
                truncate(&t.description, 32),
                format_signed_inr(t.amount)
            ));
        }
    }
    out.push('\n');
    out
}

/// Drill-down for one category: its share of spending and the first rows
pub fn render_category(
    transactions: &[Transaction],
    insights: &Insights,
    category: Category,
) -> String {
    let rows = by_category(transactions, category);
    let mut out = String::new();
    out.push_str(&format!(
        "  🔎 {} ({} transactions, {:.0}% of spending)\n",
        category,
        rows.len(),
        insights.category_share(category)
    ));
    if rows.is_empty() {
        out.push_str("     Nothing in this category.\n");
    }
    for t in rows.iter().take(CATEGORY_ROWS) {
        out.push_str(&format!(
            "     {}  {:<32} {:>10}  {}\n",
            t.date.format("%d %b"),
            truncate(&t.description, 32),
            format_signed_inr(t.amount),
            t.payment_type.as_str()
        ));
    }
    if rows.len() > CATEGORY_ROWS {
        out.push_str(&format!("     … and {} more\n", rows.len() - CATEGORY_ROWS));
    }
    out.push('\n');
    out
}

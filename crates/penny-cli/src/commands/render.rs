//! Terminal rendering of chat messages and their attachments

use penny_core::models::{Attachment, ChartKind, ChartPoint, GoalSnapshot};
use penny_core::{format_inr, Message, Role};

const BAR_WIDTH: usize = 20;

/// A proportional bar of `width` cells for `percent` (0-100)
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn render_message(message: &Message) -> String {
    let (icon, name) = match message.role {
        Role::Bot => ("🤖", "Penny"),
        Role::User => ("🙋", "You"),
    };

    let mut lines = Vec::new();
    let mut text = message.text.lines();
    lines.push(format!("  {} {}: {}", icon, name, text.next().unwrap_or_default()));
    for line in text {
        lines.push(format!("     {}", line));
    }
    if let Some(attachment) = &message.attachment {
        lines.extend(render_attachment(attachment));
    }
    lines.join("\n")
}

pub fn print_message(message: &Message) {
    println!();
    println!("{}", render_message(message));
}

pub fn render_attachment(attachment: &Attachment) -> Vec<String> {
    match attachment {
        Attachment::Chart { kind, title, data } => render_chart(*kind, title.as_deref(), data),
        Attachment::PurchaseOptions { items } => {
            let best = items
                .iter()
                .map(|i| i.price)
                .fold(f64::INFINITY, f64::min);
            items
                .iter()
                .map(|i| {
                    let marker = if i.price == best { "  ← best price" } else { "" };
                    format!(
                        "     🛒 {:<12} {:>10}  ({}){}",
                        i.merchant,
                        format_inr(i.price),
                        i.delivery,
                        marker
                    )
                })
                .collect()
        }
        Attachment::CreditCards { cards } => cards
            .iter()
            .map(|c| {
                let fee = if c.annual_fee > 0.0 {
                    format!("annual fee {}", format_inr(c.annual_fee))
                } else {
                    "no annual fee".to_string()
                };
                format!("     💳 {}: {} ({})", c.name, c.benefit, fee)
            })
            .collect(),
        Attachment::GoalTracker { goal } => render_goal(goal),
        Attachment::Celebration => vec!["     🎉 🎊 🎉".to_string()],
        Attachment::Subscriptions { items } => {
            let mut lines: Vec<String> = items
                .iter()
                .map(|s| {
                    format!(
                        "     {} {:<18} {:>6}/mo  last used {}",
                        if s.flagged { "⚠️ " } else { "📺" },
                        s.name,
                        format_inr(s.monthly_cost),
                        s.last_used
                    )
                })
                .collect();
            let total: f64 = items.iter().map(|s| s.monthly_cost).sum();
            lines.push(format!("     Total monthly cost: {}", format_inr(total)));
            lines
        }
        Attachment::Leaderboard { entries } => entries
            .iter()
            .map(|e| {
                format!(
                    "     #{} {:<16} {:>8}  {}{}",
                    e.rank,
                    e.name,
                    format_inr(e.amount),
                    e.percentile,
                    if e.is_user { "  ← you" } else { "" }
                )
            })
            .collect(),
        Attachment::Savings { items } => {
            let mut lines: Vec<String> = items
                .iter()
                .map(|s| format!("     💰 {:<22} {}", s.label, format_inr(s.amount)))
                .collect();
            let total: f64 = items.iter().map(|s| s.amount).sum();
            lines.push(format!("     Total potential savings: {}", format_inr(total)));
            lines
        }
        Attachment::Action { label } => vec![format!("     [ {} ]", label)],
    }
}

fn render_chart(kind: ChartKind, title: Option<&str>, data: &[ChartPoint]) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(title) = title {
        lines.push(format!("     📊 {}", title));
    }

    let total: f64 = data.iter().map(|p| p.value).sum();
    let max = data.iter().map(|p| p.value).fold(0.0, f64::max);
    for point in data {
        let line = match kind {
            // Scores out of 100
            ChartKind::Radial => format!(
                "     {:<14} {} {}/100",
                point.label,
                bar(point.value, BAR_WIDTH),
                point.value
            ),
            ChartKind::Pie => {
                let share = if total > 0.0 { point.value / total * 100.0 } else { 0.0 };
                format!(
                    "     {:<14} {} {} ({:.0}%)",
                    point.label,
                    bar(share, BAR_WIDTH),
                    format_inr(point.value),
                    share
                )
            }
            ChartKind::Bar => {
                let scaled = if max > 0.0 { point.value / max * 100.0 } else { 0.0 };
                format!(
                    "     {:<14} {} {}",
                    point.label,
                    bar(scaled, BAR_WIDTH),
                    format_inr(point.value)
                )
            }
        };
        lines.push(line);
    }
    lines
}

fn render_goal(goal: &GoalSnapshot) -> Vec<String> {
    let mut lines = vec![format!(
        "     🎯 {} {} {} / {} ({:.0}%)",
        goal.name,
        bar(goal.percent(), BAR_WIDTH),
        format_inr(goal.current),
        format_inr(goal.target),
        goal.percent()
    )];
    if goal.streak_days > 0 {
        lines.push(format!("     🔥 {} days streak!", goal.streak_days));
    }
    if goal.is_complete() {
        lines.push(format!(
            "     🎉 Congratulations! You've reached your {} goal!",
            goal.name
        ));
    }
    lines
}

/// Numbered option menu
pub fn print_options(options: &[String]) {
    if options.is_empty() {
        return;
    }
    println!();
    for (i, option) in options.iter().enumerate() {
        println!("   [{}] {}", i + 1, option);
    }
}

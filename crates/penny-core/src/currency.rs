//! Rupee formatting
//!
//! Amounts are always rendered as magnitudes; callers convey direction with
//! color or an explicit `+`/`-` prefix via [`format_signed_inr`].

pub const CURRENCY_SYMBOL: &str = "₹";

/// Format the magnitude of `value` as rupees with Indian digit grouping
///
/// Whole amounts carry no decimals (`₹1,20,000`), fractional amounts carry two
/// (`₹499.50`).
pub fn format_inr(value: f64) -> String {
    let magnitude = value.abs();
    let paise = (magnitude * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;

    let grouped = group_indian(rupees);
    if fraction == 0 {
        format!("{}{}", CURRENCY_SYMBOL, grouped)
    } else {
        format!("{}{}.{:02}", CURRENCY_SYMBOL, grouped, fraction)
    }
}

/// Format with an explicit sign prefix kept outside the numeric part
pub fn format_signed_inr(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "+" };
    format!("{}{}", sign, format_inr(value))
}

/// 1234567 -> "12,34,567": last three digits, then groups of two
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

//! Insight aggregation
//!
//! Derives read-only summary figures from a transaction set. Expenses and
//! income are partitioned by sign before any totals are taken, and expense
//! totals are stored as absolute values so a single total never mixes signs.
//! Maps are ordered so that repeated summaries of the same input are
//! identical, iteration order included.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Category, Transaction};

/// Merchants counted as food delivery
pub const FOOD_DELIVERY_MERCHANTS: &[&str] = &["Swiggy", "Zomato"];

/// Merchants counted as quick commerce
pub const QUICK_COMMERCE_MERCHANTS: &[&str] = &["Blinkit", "Zepto", "Dunzo"];

/// A shopping purchase extracted from its description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub item: String,
    pub amount: f64,
    pub merchant: String,
}

/// Aggregate view over a transaction set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub total_spent: f64,
    pub total_income: f64,
    pub expense_count: usize,
    pub income_count: usize,
    /// Absolute expense totals per category
    pub category_totals: BTreeMap<Category, f64>,
    /// Absolute expense totals per merchant
    pub merchant_totals: BTreeMap<String, f64>,
    pub food_delivery_count: usize,
    pub food_delivery_total: f64,
    pub entertainment_total: f64,
    pub quick_commerce_total: f64,
    pub shopping_items: Vec<ShoppingItem>,
}

impl Insights {
    /// Share of total spending for a category, in percent
    pub fn category_share(&self, category: Category) -> f64 {
        if self.total_spent <= 0.0 {
            return 0.0;
        }
        self.category_totals.get(&category).copied().unwrap_or(0.0) / self.total_spent * 100.0
    }

    /// Categories ordered by spend, largest first
    pub fn top_categories(&self) -> Vec<(Category, f64)> {
        let mut categories: Vec<(Category, f64)> = self
            .category_totals
            .iter()
            .map(|(category, total)| (*category, *total))
            .collect();
        categories.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        categories
    }

    pub fn net(&self) -> f64 {
        self.total_income - self.total_spent
    }
}

/// Summarize a transaction set
///
/// Pure and idempotent; an empty slice yields all-zero insights.
pub fn summarize(transactions: &[Transaction]) -> Insights {
    let (expenses, income): (Vec<&Transaction>, Vec<&Transaction>) = transactions
        .iter()
        .filter(|t| t.amount != 0.0)
        .partition(|t| t.is_expense());

    let mut insights = Insights {
        expense_count: expenses.len(),
        income_count: income.len(),
        total_income: income.iter().map(|t| t.amount).sum(),
        ..Insights::default()
    };

    for t in &expenses {
        let spent = t.amount.abs();
        insights.total_spent += spent;
        *insights.category_totals.entry(t.category).or_insert(0.0) += spent;
        *insights
            .merchant_totals
            .entry(t.merchant.clone())
            .or_insert(0.0) += spent;

        if FOOD_DELIVERY_MERCHANTS.contains(&t.merchant.as_str()) {
            insights.food_delivery_count += 1;
            insights.food_delivery_total += spent;
        }
        if QUICK_COMMERCE_MERCHANTS.contains(&t.merchant.as_str()) {
            insights.quick_commerce_total += spent;
        }
        match t.category {
            Category::Entertainment => insights.entertainment_total += spent,
            Category::Shopping => insights.shopping_items.push(ShoppingItem {
                item: item_name(&t.description),
                amount: spent,
                merchant: t.merchant.clone(),
            }),
            _ => {}
        }
    }

    insights
}

/// Transactions in one category, in their original order
pub fn by_category(transactions: &[Transaction], category: Category) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.category == category)
        .collect()
}

/// "Blinkit - Air Fryer" -> "Air Fryer"
fn item_name(description: &str) -> String {
    match description.split_once('-') {
        Some((_, item)) => item.trim().to_string(),
        None => description.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{fixture, generate, DateRange};

    #[test]
    fn test_empty_input() {
        let insights = summarize(&[]);
        assert_eq!(insights, Insights::default());
        assert_eq!(insights.total_spent, 0.0);
        assert!(insights.category_totals.is_empty());
        assert!(insights.merchant_totals.is_empty());
        assert_eq!(insights.category_share(Category::Shopping), 0.0);
    }

    #[test]
    fn test_fixture_totals() {
        let insights = summarize(&fixture());

        assert_eq!(insights.food_delivery_count, 3);
        assert_eq!(insights.food_delivery_total, 1699.0);
        assert_eq!(insights.entertainment_total, 1027.0);
        assert_eq!(insights.quick_commerce_total, 6199.0);
        assert_eq!(insights.total_income, 65000.0);
        assert_eq!(insights.income_count, 1);
        assert_eq!(insights.expense_count, 10);
        assert_eq!(insights.merchant_totals["Blinkit"], 6199.0);

        let items: Vec<&str> = insights
            .shopping_items
            .iter()
            .map(|i| i.item.as_str())
            .collect();
        assert_eq!(items, vec!["Air Fryer", "Electronics", "Clothing"]);
    }

    #[test]
    fn test_category_totals_match_expense_sum() {
        for seed in [1, 2, 3, 99] {
            let transactions = generate(DateRange::march_2024(), Some(seed));
            let insights = summarize(&transactions);

            let by_category: f64 = insights.category_totals.values().sum();
            let by_merchant: f64 = insights.merchant_totals.values().sum();
            let expected: f64 = transactions
                .iter()
                .filter(|t| t.amount < 0.0)
                .map(|t| t.amount)
                .sum::<f64>()
                .abs();

            assert!((by_category - expected).abs() < 1e-6);
            assert!((by_merchant - expected).abs() < 1e-6);
            assert!(!insights.category_totals.contains_key(&Category::Income));
        }
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let transactions = generate(DateRange::march_2024(), Some(5));
        let first = summarize(&transactions);
        let second = summarize(&transactions);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_top_categories_sorted() {
        let insights = summarize(&fixture());
        let top = insights.top_categories();
        assert_eq!(top[0].0, Category::Shopping);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_item_name_without_separator() {
        assert_eq!(item_name("Gift card"), "Gift card");
        assert_eq!(item_name("Amazon - Home Appliances"), "Home Appliances");
    }

    #[test]
    fn test_by_category_filters_fixture() {
        let transactions = fixture();
        let shopping: Vec<i64> = by_category(&transactions, Category::Shopping)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(shopping, vec![8, 9, 10]);
        assert_eq!(by_category(&transactions, Category::Income).len(), 1);
        assert!(by_category(&[], Category::Shopping).is_empty());
    }
}

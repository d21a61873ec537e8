//! Synthetic transaction data
//!
//! Two sources of mock data back the screens:
//! - a fixed fixture (the March 2024 set the chat screen reasons over)
//! - a generated month of random spending, reproducible when seeded
//!
//! Callers must treat every unseeded [`generate`] call as an independent
//! dataset.

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Category, PaymentType, Transaction};

/// Monthly salary credited on the first day of every generated range
pub const SALARY_AMOUNT: f64 = 65000.0;

/// Inclusive date range bounding generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidData(format!(
                "date range end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// March 2024, the month the prototype's data describes
    pub fn march_2024() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2024, 3, 31).expect("valid date"),
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::march_2024()
    }
}

/// Which dataset a screen mounts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// The fixed fixture, identical on every call
    Fixture,
    /// A random month; `Some(seed)` makes it reproducible
    Random { seed: Option<u64> },
}

/// Load transactions for the given mode
pub fn load(mode: DataMode, range: DateRange) -> Vec<Transaction> {
    match mode {
        DataMode::Fixture => fixture(),
        DataMode::Random { seed } => generate(range, seed),
    }
}

struct MerchantGroup {
    name: &'static str,
    items: &'static [&'static str],
}

const FOOD: &[MerchantGroup] = &[
    MerchantGroup {
        name: "Swiggy",
        items: &["Burger King", "McDonalds", "Pizza Hut", "Dominos", "Bowl Company"],
    },
    MerchantGroup {
        name: "Zomato",
        items: &["Behrouz Biryani", "Subway", "KFC", "Chinese Box", "Mad Over Donuts"],
    },
];

const ENTERTAINMENT: &[MerchantGroup] = &[
    MerchantGroup {
        name: "Netflix",
        items: &["Monthly Subscription"],
    },
    MerchantGroup {
        name: "Spotify",
        items: &["Premium Subscription"],
    },
    MerchantGroup {
        name: "Amazon Prime",
        items: &["Annual Subscription"],
    },
    MerchantGroup {
        name: "BookMyShow",
        items: &["Movie Tickets", "Event Tickets"],
    },
];

const SHOPPING: &[MerchantGroup] = &[
    MerchantGroup {
        name: "Amazon",
        items: &["Electronics", "Books", "Home Appliances", "Clothing"],
    },
    MerchantGroup {
        name: "Myntra",
        items: &["Clothing", "Shoes", "Accessories"],
    },
    MerchantGroup {
        name: "Flipkart",
        items: &["Electronics", "Home Goods", "Fashion"],
    },
];

const TRANSPORT: &[MerchantGroup] = &[
    MerchantGroup {
        name: "Uber",
        items: &["Ride"],
    },
    MerchantGroup {
        name: "Ola",
        items: &["Ride"],
    },
    MerchantGroup {
        name: "Rapido",
        items: &["Bike Ride"],
    },
];

const UTILITIES: &[MerchantGroup] = &[
    MerchantGroup {
        name: "BESCOM",
        items: &["Electricity Bill"],
    },
    MerchantGroup {
        name: "Airtel",
        items: &["Mobile Bill", "Broadband Bill"],
    },
    MerchantGroup {
        name: "Jio",
        items: &["Mobile Recharge"],
    },
];

const GROCERIES: &[MerchantGroup] = &[
    MerchantGroup {
        name: "BigBasket",
        items: &["Monthly Groceries", "Fresh Vegetables"],
    },
    MerchantGroup {
        name: "Blinkit",
        items: &["Quick Groceries", "Daily Essentials"],
    },
    MerchantGroup {
        name: "Zepto",
        items: &["Instant Delivery", "Daily Needs"],
    },
];

fn merchants_for(category: Category) -> &'static [MerchantGroup] {
    match category {
        Category::FoodAndDining => FOOD,
        Category::Entertainment => ENTERTAINMENT,
        Category::Shopping => SHOPPING,
        Category::Transport => TRANSPORT,
        Category::Utilities => UTILITIES,
        Category::Groceries => GROCERIES,
        Category::Income => &[],
    }
}

/// (minimum, span) of the expense amount for a category, in whole rupees
fn amount_band(category: Category) -> (u32, u32) {
    match category {
        Category::FoodAndDining => (200, 500),
        Category::Entertainment => (200, 300),
        Category::Shopping => (500, 3000),
        Category::Transport => (100, 200),
        Category::Utilities => (500, 1000),
        Category::Groceries => (300, 2000),
        Category::Income => (0, 1000),
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).expect("valid March 2024 day")
}

fn tx(
    id: i64,
    day: u32,
    description: &str,
    amount: f64,
    category: Category,
    merchant: &str,
    payment_type: PaymentType,
) -> Transaction {
    Transaction {
        id,
        date: date(day),
        description: description.to_string(),
        amount,
        category,
        merchant: merchant.to_string(),
        payment_type,
    }
}

/// The fixed March 2024 dataset behind the chat screen
pub fn fixture() -> Vec<Transaction> {
    use Category::*;
    use PaymentType::*;

    vec![
        tx(1, 1, "Swiggy - Burger King", -450.0, FoodAndDining, "Swiggy", Upi),
        tx(2, 3, "Zomato - Pizza Hut", -899.0, FoodAndDining, "Zomato", Card),
        tx(3, 5, "Swiggy - Bowl Company", -350.0, FoodAndDining, "Swiggy", Upi),
        tx(4, 8, "Blinkit - Groceries", -1200.0, FoodAndDining, "Blinkit", Upi),
        tx(5, 1, "Netflix - Monthly Subscription", -649.0, Entertainment, "Netflix", Card),
        tx(6, 1, "Spotify - Premium Subscription", -199.0, Entertainment, "Spotify", Card),
        tx(7, 1, "Amazon Prime - Monthly", -179.0, Entertainment, "Amazon Prime", Card),
        tx(8, 15, "Blinkit - Air Fryer", -4999.0, Shopping, "Blinkit", Upi),
        tx(9, 18, "Amazon - Electronics", -2999.0, Shopping, "Amazon", Card),
        tx(10, 20, "Myntra - Clothing", -3499.0, Shopping, "Myntra", Upi),
        tx(11, 1, "Salary Credit - March 2024", SALARY_AMOUNT, Income, "Employer", BankTransfer),
    ]
}

/// Generate a random month of transactions over `range`
///
/// The first transaction is always the salary credit on `range.start`;
/// every day then gets 2-4 expenses. Ids are assigned in generation order.
pub fn generate(range: DateRange, seed: Option<u64>) -> Vec<Transaction> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut transactions = Vec::new();
    let mut id = 1;

    transactions.push(Transaction {
        id,
        date: range.start,
        description: format!("Salary Credit - {}", range.start.format("%B %Y")),
        amount: SALARY_AMOUNT,
        category: Category::Income,
        merchant: "Employer".to_string(),
        payment_type: PaymentType::BankTransfer,
    });
    id += 1;

    let categories = Category::expense_categories();
    for day in range.days() {
        let count = rng.gen_range(2..=4);
        for _ in 0..count {
            let category = categories[rng.gen_range(0..categories.len())];
            let groups = merchants_for(category);
            let group = &groups[rng.gen_range(0..groups.len())];
            let item = group.items[rng.gen_range(0..group.items.len())];
            let (min, span) = amount_band(category);
            let amount = -f64::from(min + rng.gen_range(0..span));
            let payment_type = if rng.gen_bool(0.5) {
                PaymentType::Upi
            } else {
                PaymentType::Card
            };

            transactions.push(Transaction {
                id,
                date: day,
                description: format!("{} - {}", group.name, item),
                amount,
                category,
                merchant: group.name.to_string(),
                payment_type,
            });
            id += 1;
        }
    }

    tracing::debug!(
        count = transactions.len(),
        seeded = seed.is_some(),
        "Generated synthetic transactions"
    );

    transactions
}

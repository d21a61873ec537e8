//! Domain models for Penny

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Spending category of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Entertainment,
    Shopping,
    Transport,
    Utilities,
    Groceries,
    Income,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Transport => "Transport",
            Self::Utilities => "Utilities",
            Self::Groceries => "Groceries",
            Self::Income => "Income",
        }
    }

    /// Categories that random generation draws expenses from
    pub fn expense_categories() -> &'static [Category] {
        &[
            Self::FoodAndDining,
            Self::Entertainment,
            Self::Shopping,
            Self::Transport,
            Self::Utilities,
            Self::Groceries,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food & dining" | "food" | "dining" => Ok(Self::FoodAndDining),
            "entertainment" => Ok(Self::Entertainment),
            "shopping" => Ok(Self::Shopping),
            "transport" => Ok(Self::Transport),
            "utilities" => Ok(Self::Utilities),
            "groceries" => Ok(Self::Groceries),
            "income" => Ok(Self::Income),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

impl std::str::FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "bank transfer" | "bank_transfer" => Ok(Self::BankTransfer),
            _ => Err(format!("Unknown payment type: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A synthetic financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    /// Negative = expense, positive = income
    pub amount: f64,
    pub category: Category,
    pub merchant: String,
    pub payment_type: PaymentType,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
    Radial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOption {
    pub merchant: String,
    pub price: f64,
    pub delivery: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub name: String,
    pub benefit: String,
    #[serde(default)]
    pub annual_fee: f64,
}

/// Progress of a savings goal at the moment a message was sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    pub name: String,
    pub current: f64,
    pub target: f64,
    #[serde(default)]
    pub streak_days: u32,
}

impl GoalSnapshot {
    /// Progress towards the target, clamped to 0..=100
    pub fn percent(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.current / self.target * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionLine {
    pub name: String,
    pub monthly_cost: f64,
    pub last_used: String,
    #[serde(default)]
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub amount: f64,
    pub percentile: String,
    #[serde(default)]
    pub is_user: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsLine {
    pub label: String,
    pub amount: f64,
}

/// Rich content rendered alongside a message's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attachment {
    Chart {
        kind: ChartKind,
        #[serde(default)]
        title: Option<String>,
        data: Vec<ChartPoint>,
    },
    PurchaseOptions {
        items: Vec<PurchaseOption>,
    },
    CreditCards {
        cards: Vec<CreditCard>,
    },
    GoalTracker {
        goal: GoalSnapshot,
    },
    Celebration,
    Subscriptions {
        items: Vec<SubscriptionLine>,
    },
    Leaderboard {
        entries: Vec<LeaderboardEntry>,
    },
    Savings {
        items: Vec<SavingsLine>,
    },
    Action {
        label: String,
    },
}

impl Attachment {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Chart { .. } => "chart",
            Self::PurchaseOptions { .. } => "purchase_options",
            Self::CreditCards { .. } => "credit_cards",
            Self::GoalTracker { .. } => "goal_tracker",
            Self::Celebration => "celebration",
            Self::Subscriptions { .. } => "subscriptions",
            Self::Leaderboard { .. } => "leaderboard",
            Self::Savings { .. } => "savings",
            Self::Action { .. } => "action",
        }
    }
}

/// Message content that has not been appended to a transcript yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl MessageDraft {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            attachment: None,
            options: Vec::new(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            attachment: None,
            options: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// A message in a session transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub attachment: Option<Attachment>,
    /// Selectable follow-up option labels, in display order
    pub options: Vec<String>,
}

/// Append-only, ordered log of messages for one mounted screen
///
/// Messages are never edited or removed once pushed. Ids are assigned
/// monotonically starting at 1.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    pub fn push(&mut self, draft: MessageDraft) -> &Message {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.messages.push(Message {
            id,
            role: draft.role,
            text: draft.text,
            attachment: draft.attachment,
            options: draft.options,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Messages appended at or after `index`
    pub fn since(&self, index: usize) -> &[Message] {
        &self.messages[index.min(self.messages.len())..]
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

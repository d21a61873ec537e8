//! Scripted free-text responses
//!
//! Free text is lower-cased and matched against an ordered list of keyword
//! sets. The first set with any keyword contained in the input wins, and its
//! template is filled from live [`Insights`]. Ordering matters: savings
//! triggers are checked before food, food before shopping.

use crate::currency::format_inr;
use crate::insights::Insights;
use crate::models::MessageDraft;

/// Returned verbatim when no keyword set matches
pub const FALLBACK_RESPONSE: &str =
    "Ask me about your food spending, shopping habits, or where you could save money! 💡";

/// Price of the air fryer on regular (non quick-commerce) delivery
pub const AIR_FRYER_REFERENCE_PRICE: f64 = 3499.0;

/// Rough cost of one delivery meal, used to count home-cooked equivalents
pub const MEAL_COST: f64 = 500.0;

/// Response branch selected by a keyword set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Savings,
    Food,
    Shopping,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Savings => "savings",
            Self::Food => "food",
            Self::Shopping => "shopping",
        }
    }
}

struct TriggerSet {
    topic: Topic,
    keywords: &'static [&'static str],
}

const TRIGGERS: &[TriggerSet] = &[
    TriggerSet {
        topic: Topic::Savings,
        keywords: &["save", "saving", "cheaper"],
    },
    TriggerSet {
        topic: Topic::Food,
        keywords: &["food", "eating"],
    },
    TriggerSet {
        topic: Topic::Shopping,
        keywords: &["shopping", "spent"],
    },
];

/// Keyword-matched responder for the chat screen
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver;

impl Resolver {
    pub fn new() -> Self {
        Self
    }

    /// First matching topic for `input`, if any
    pub fn classify(&self, input: &str) -> Option<Topic> {
        let query = input.to_lowercase();
        TRIGGERS
            .iter()
            .find(|set| set.keywords.iter().any(|k| query.contains(k)))
            .map(|set| set.topic)
    }

    /// Resolve free text into a response. Never fails; unmatched input gets
    /// [`FALLBACK_RESPONSE`].
    pub fn resolve(&self, input: &str, insights: &Insights) -> String {
        let topic = self.classify(input);
        tracing::debug!(topic = topic.map(|t| t.as_str()), "Resolved free text");

        match topic {
            Some(Topic::Savings) => savings_response(insights),
            Some(Topic::Food) => food_response(insights),
            Some(Topic::Shopping) => shopping_response(insights),
            None => FALLBACK_RESPONSE.to_string(),
        }
    }
}

fn savings_response(insights: &Insights) -> String {
    let air_fryer = insights
        .shopping_items
        .iter()
        .find(|i| i.item.to_lowercase().contains("air fryer"));

    if let Some(item) = air_fryer {
        let overpaid = item.amount - AIR_FRYER_REFERENCE_PRICE;
        return format!(
            "Oh boy, about that Air Fryer you bought from {} for {}...\n\
             I found the exact same model on Amazon for {}! 😱\n\
             That's {} you could've saved by waiting a day for delivery.\n\
             Quick commerce is convenient but expensive! Want me to check prices before your next big purchase? 🛒",
            item.merchant,
            format_inr(item.amount),
            format_inr(AIR_FRYER_REFERENCE_PRICE),
            format_inr(overpaid.max(0.0)),
        );
    }

    format!(
        "Here's where your money's going:\n\
         🍕 Food delivery: {}\n\
         🎬 Entertainment: {}\n\
         🚀 Quick Commerce: {}\n\n\
         Pro tip: Quick commerce apps charge 20-30% more than regular stores.\n\
         Maybe wait a day for delivery next time? 😉",
        format_inr(insights.food_delivery_total),
        format_inr(insights.entertainment_total),
        format_inr(insights.quick_commerce_total),
    )
}

fn food_response(insights: &Insights) -> String {
    let meals = (insights.food_delivery_total / MEAL_COST).floor() as u64;
    format!(
        "You've spent {} on food delivery this month!\n\
         That's about {} home-cooked meals! 🍳\n\n\
         Want some quick and easy recipes that could save you money?\n\
         Or should we look at some meal prep ideas? 👩‍🍳",
        format_inr(insights.food_delivery_total),
        meals,
    )
}

fn shopping_response(insights: &Insights) -> String {
    let purchases = insights
        .shopping_items
        .iter()
        .map(|i| format!("{}: {} from {}", i.item, format_inr(i.amount), i.merchant))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Let's talk about your shopping! 🛍️\n\
         Recent purchases:\n\
         {}\n\n\
         Pro tip: Always compare prices across Amazon, Flipkart, and offline stores.\n\
         Want me to help you track prices for your wishlist? 📉",
        purchases,
    )
}

/// Greeting messages the chat screen opens with
pub fn opening_messages(insights: &Insights) -> Vec<MessageDraft> {
    vec![
        MessageDraft::bot(
            "Hey there! 👋 I've been looking at your March spending and... well, let's just say there's room for improvement! 😅",
        ),
        MessageDraft::bot(format!(
            "I notice you've ordered food delivery {} times this month. \
             Your cooking skills can't be THAT bad! 👩‍🍳 Want some money-saving tips?",
            insights.food_delivery_count
        )),
    ]
}

/// Canned prompts offered below the chat input
pub fn quick_prompts() -> &'static [(&'static str, &'static str)] {
    &[
        ("Saving opportunities", "Where can I save money?"),
        ("Food spending", "How much did I spend on food?"),
        ("Shopping analysis", "Show my recent purchases"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::summarize;
    use crate::synthetic::fixture;

    fn fixture_insights() -> Insights {
        summarize(&fixture())
    }

    #[test]
    fn test_savings_wins_over_food() {
        let resolver = Resolver::new();
        let insights = fixture_insights();

        assert_eq!(
            resolver.classify("how can I save on food?"),
            Some(Topic::Savings)
        );
        let response = resolver.resolve("how can I save on food?", &insights);
        assert!(response.contains("Air Fryer"));
        assert!(!response.contains("home-cooked meals"));
    }

    #[test]
    fn test_food_wins_over_shopping() {
        let resolver = Resolver::new();
        assert_eq!(
            resolver.classify("I spent a lot eating out"),
            Some(Topic::Food)
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(Resolver::new().classify("SHOPPING?"), Some(Topic::Shopping));
    }

    #[test]
    fn test_fallback_is_verbatim() {
        let response = Resolver::new().resolve("what's the weather like", &fixture_insights());
        assert_eq!(response, FALLBACK_RESPONSE);
    }

    #[test]
    fn test_savings_with_air_fryer() {
        let response = Resolver::new().resolve("anything cheaper?", &fixture_insights());
        assert!(response.contains("from Blinkit for ₹4,999"));
        assert!(response.contains("on Amazon for ₹3,499"));
        assert!(response.contains("That's ₹1,500 you could've saved"));
    }

    #[test]
    fn test_savings_without_air_fryer() {
        let response = Resolver::new().resolve("help me save", &Insights::default());
        assert!(response.contains("Food delivery: ₹0"));
        assert!(response.contains("Quick Commerce: ₹0"));
    }

    #[test]
    fn test_food_template() {
        let response = Resolver::new().resolve("How much did I spend on food?", &fixture_insights());
        assert!(response.contains("₹1,699 on food delivery"));
        assert!(response.contains("about 3 home-cooked meals"));
    }

    #[test]
    fn test_shopping_template_lists_items() {
        let response = Resolver::new().resolve("Where have I spent?", &fixture_insights());
        assert!(response.contains("Air Fryer: ₹4,999 from Blinkit"));
        assert!(response.contains("Clothing: ₹3,499 from Myntra"));
    }

    #[test]
    fn test_empty_input_falls_back() {
        assert_eq!(
            Resolver::new().resolve("", &Insights::default()),
            FALLBACK_RESPONSE
        );
    }

    #[test]
    fn test_opening_mentions_food_count() {
        let messages = opening_messages(&fixture_insights());
        assert_eq!(messages.len(), 2);
        assert!(messages[1].text.contains("3 times"));
    }

    #[test]
    fn test_quick_prompts_resolve_to_topics() {
        let resolver = Resolver::new();
        let topics: Vec<_> = quick_prompts()
            .iter()
            .map(|(_, text)| resolver.classify(text))
            .collect();
        assert_eq!(
            topics,
            vec![Some(Topic::Savings), Some(Topic::Food), None]
        );
    }
}

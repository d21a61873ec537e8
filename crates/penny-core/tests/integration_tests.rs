//! Integration tests for penny-core
//!
//! These tests exercise the full catalogue → engine → transcript workflow.

use std::time::Duration;

use penny_core::{
    insights::summarize,
    models::{Attachment, Role},
    screens::IntroBlock,
    synthetic::{fixture, generate, load},
    Config, DataMode, DateRange, FlowEngine, ScreenCatalog, Sequencer, Submission,
};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Mount a screen and reveal its whole intro on a virtual clock
fn mount_with_intro(catalog: &ScreenCatalog, id: &str) -> FlowEngine {
    let screen = catalog.get(id).expect("screen exists");
    let mut engine = FlowEngine::mount(screen, &Config::default());
    let mut sequencer = Sequencer::start(screen.intro.clone());
    for block in sequencer.visible() {
        engine.reveal(block);
    }
    while let Some(due) = sequencer.next_due() {
        for block in sequencer.advance(due) {
            engine.reveal(block);
        }
    }
    engine
}

// =============================================================================
// Assistant Flow
// =============================================================================

#[test]
fn test_purchase_planning_path() {
    let catalog = ScreenCatalog::builtin().expect("Failed to load screens");
    let mut engine = FlowEngine::mount(catalog.get("assistant").unwrap(), &Config::default());

    for label in ["Plan a big purchase", "Air fryer", "Credit card options", "Buy on Amazon"] {
        assert!(
            engine.current_options().iter().any(|o| o == label),
            "{} should be offered",
            label
        );
        assert!(engine.submit_option(label).is_accepted());
        engine.advance(ms(800));
    }

    let kinds: Vec<&str> = engine
        .transcript()
        .iter()
        .filter_map(|m| m.attachment.as_ref().map(Attachment::kind))
        .collect();
    assert_eq!(
        kinds,
        vec!["purchase_options", "credit_cards", "celebration"]
    );

    // Greeting + 4 × (echo, reply)
    assert_eq!(engine.transcript().len(), 9);
    let ids: Vec<u64> = engine.transcript().iter().map(|m| m.id).collect();
    assert_eq!(ids, (1..=9).collect::<Vec<u64>>());
}

#[test]
fn test_savings_goal_transfer() {
    let catalog = ScreenCatalog::builtin().unwrap();
    let mut engine = FlowEngine::mount(catalog.get("assistant").unwrap(), &Config::default());

    engine.submit_option("Track my savings goals");
    engine.advance(ms(800));
    engine.submit_option("Transfer ₹500");
    engine.advance(ms(800));
    engine.submit_option("Confirm");
    let appended = engine.advance(ms(500));

    assert_eq!(appended.len(), 1);
    match &appended[0].attachment {
        Some(Attachment::GoalTracker { goal }) => {
            assert_eq!(goal.current, 18500.0);
            assert_eq!(goal.streak_days, 13);
        }
        other => panic!("expected goal tracker, got {:?}", other),
    }
}

#[test]
fn test_credit_cards_reachable_from_home_and_purchase() {
    let catalog = ScreenCatalog::builtin().unwrap();
    let config = Config::default();

    let mut direct = FlowEngine::mount(catalog.get("assistant").unwrap(), &config);
    direct.submit_option("Credit card options");
    let from_home = direct.advance(ms(800))[0].clone();

    let mut via_laptop = FlowEngine::mount(catalog.get("assistant").unwrap(), &config);
    via_laptop.submit_option("Plan a big purchase");
    via_laptop.advance(ms(800));
    via_laptop.submit_option("Laptop");
    via_laptop.advance(ms(800));
    via_laptop.submit_option("Credit card options");
    let from_purchase = via_laptop.advance(ms(800))[0].clone();

    assert_eq!(from_home.text, from_purchase.text);
    assert_eq!(from_home.attachment, from_purchase.attachment);
}

#[test]
fn test_transcript_is_append_only() {
    let catalog = ScreenCatalog::builtin().unwrap();
    let mut engine = FlowEngine::mount(catalog.get("assistant").unwrap(), &Config::default());

    let snapshot = engine.transcript().as_slice().to_vec();
    engine.submit_option("Look up current balance");
    engine.submit_option("Unknown thing");
    engine.advance(ms(800));
    engine.submit_option("Recurring Charges");
    engine.advance(ms(800));

    assert_eq!(&engine.transcript().as_slice()[..snapshot.len()], snapshot.as_slice());
}

// =============================================================================
// Demo Screens
// =============================================================================

#[test]
fn test_every_demo_plays_to_completion() {
    let catalog = ScreenCatalog::builtin().unwrap();
    for screen in catalog.demos() {
        let engine = mount_with_intro(&catalog, &screen.id);
        let messages = screen
            .intro
            .entries()
            .iter()
            .filter(|(_, block)| matches!(block, IntroBlock::Message(_)))
            .count();
        assert_eq!(engine.transcript().len(), messages, "screen {}", screen.id);
    }
}

#[test]
fn test_subscription_cancel_echo() {
    let catalog = ScreenCatalog::builtin().unwrap();
    let mut engine = mount_with_intro(&catalog, "subscription-insights");
    assert_eq!(engine.current_options(), ["Cancel subscription"]);

    assert_eq!(
        engine.submit_option("Cancel subscription"),
        Submission::Accepted { due_in: ms(1000) }
    );
    let echo = engine.transcript().last().unwrap();
    assert_eq!(echo.role, Role::User);
    assert_eq!(echo.text, "Yes, please cancel my Netflix subscription");

    let appended = engine.advance(ms(1000));
    assert!(appended[0].text.starts_with("Subscription Cancelled"));
}

#[test]
fn test_roast_budget_chain_ends_in_noops() {
    let catalog = ScreenCatalog::builtin().unwrap();
    let mut engine = mount_with_intro(&catalog, "roast-budget");

    for _ in 0..3 {
        let next = engine.current_options()[0].clone();
        assert!(engine.submit_option(&next).is_accepted());
        engine.advance(ms(1000));
    }

    let len = engine.transcript().len();
    assert_eq!(engine.current_options(), ["Show budget breakdown", "Set budget reminder"]);
    assert_eq!(engine.submit_option("Show budget breakdown"), Submission::Ignored);
    assert_eq!(engine.transcript().len(), len);
}

#[test]
fn test_budget_quiz_reaches_budget_chart() {
    let catalog = ScreenCatalog::builtin().unwrap();
    let mut engine = mount_with_intro(&catalog, "budget-personality");

    while let Some(option) = engine.current_options().first().cloned() {
        let Submission::Accepted { due_in } = engine.submit_option(&option) else {
            panic!("{} was not accepted", option);
        };
        engine.advance(due_in);
    }

    match &engine.transcript().last().unwrap().attachment {
        Some(Attachment::Chart { data, .. }) => {
            let total: f64 = data.iter().map(|p| p.value).sum();
            assert_eq!(total, 55000.0);
        }
        other => panic!("expected budget chart, got {:?}", other),
    }
}

// =============================================================================
// Data → Insights → Chat
// =============================================================================

#[test]
fn test_chat_over_fixture() {
    let insights = summarize(&fixture());
    let mut engine = FlowEngine::chat(insights, &Config::default());

    engine.submit_free_text("how can I save on food?");
    engine.submit_free_text("what about eating out");
    let replies: Vec<String> = engine
        .advance(ms(1000))
        .iter()
        .map(|m| m.text.clone())
        .collect();

    assert_eq!(replies.len(), 2);
    assert!(replies[0].contains("Air Fryer"));
    assert!(replies[1].contains("home-cooked meals"));
}

#[test]
fn test_seeded_load_is_stable() {
    let range = DateRange::default();
    let mode = DataMode::Random { seed: Some(2024) };
    let first = summarize(&load(mode, range));
    let second = summarize(&generate(range, Some(2024)));
    assert_eq!(first, second);
    assert_eq!(first.total_income, 65000.0);
}

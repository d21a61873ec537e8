//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use clap::{CommandFactory, Parser};
use penny_core::models::{Attachment, GoalSnapshot, MessageDraft, PurchaseOption};
use penny_core::synthetic::fixture;
use penny_core::{summarize, Category, Config, DataMode, IntroBlock, Message, Role, ScreenCatalog};

use crate::cli::{Cli, Commands, DataArgs};
use crate::commands::{
    self, bar, data_mode, parse_category, parse_input, render_message, truncate, Choice,
};

fn options(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

fn bot(text: &str, attachment: Option<Attachment>) -> Message {
    Message {
        id: 1,
        role: Role::Bot,
        text: text.to_string(),
        attachment,
        options: Vec::new(),
    }
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["penny", "demo", "roast-spending", "--instant"]).unwrap();
    assert!(cli.instant);
    assert!(matches!(cli.command, Commands::Demo { ref id } if id == "roast-spending"));
}

#[test]
fn test_parse_export_with_seed() {
    let cli = Cli::try_parse_from(["penny", "export", "--format", "json", "--seed", "7"]).unwrap();
    match cli.command {
        Commands::Export { format, output, data } => {
            assert_eq!(format, "json");
            assert!(output.is_none());
            assert_eq!(data.seed, Some(7));
        }
        _ => panic!("expected export command"),
    }
}

#[test]
fn test_parse_category_flags() {
    let cli = Cli::try_parse_from(["penny", "transactions", "--category", "shopping"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Transactions { ref category, limit: 20, .. } if category.as_deref() == Some("shopping")
    ));

    let cli = Cli::try_parse_from(["penny", "dashboard", "-c", "food"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Dashboard { ref category, .. } if category.as_deref() == Some("food")
    ));
}

// ========== Input Parsing Tests ==========

#[test]
fn test_parse_input_blank_and_quit() {
    let opts = options(&["Confirm", "Cancel"]);
    assert_eq!(parse_input("   ", &opts), Choice::Blank);
    assert_eq!(parse_input("q", &opts), Choice::Quit);
    assert_eq!(parse_input("QUIT", &opts), Choice::Quit);
}

#[test]
fn test_parse_input_by_number() {
    let opts = options(&["Confirm", "Cancel"]);
    assert_eq!(parse_input("2", &opts), Choice::Option("Cancel".to_string()));
    assert_eq!(parse_input("0", &opts), Choice::Text("0".to_string()));
    assert_eq!(parse_input("3", &opts), Choice::Text("3".to_string()));
}

#[test]
fn test_parse_input_by_label() {
    let opts = options(&["Look up current balance"]);
    assert_eq!(
        parse_input(" look up CURRENT balance ", &opts),
        Choice::Option("Look up current balance".to_string())
    );
    assert_eq!(
        parse_input("where can I save?", &opts),
        Choice::Text("where can I save?".to_string())
    );
}

// ========== Data Selection Tests ==========

#[test]
fn test_data_mode_resolution() {
    let config = Config::default();
    assert_eq!(data_mode(&config, &DataArgs::default()), DataMode::Fixture);

    let seeded = DataArgs {
        random: false,
        seed: Some(3),
    };
    assert_eq!(data_mode(&config, &seeded), DataMode::Random { seed: Some(3) });

    let mut random_config = Config::default();
    random_config.data.seed = Some(11);
    let random = DataArgs {
        random: true,
        seed: None,
    };
    assert_eq!(
        data_mode(&random_config, &random),
        DataMode::Random { seed: Some(11) }
    );
}

#[test]
fn test_parse_category() {
    assert_eq!(parse_category(None).unwrap(), None);
    assert_eq!(parse_category(Some("Shopping")).unwrap(), Some(Category::Shopping));
    assert_eq!(parse_category(Some("dining")).unwrap(), Some(Category::FoodAndDining));
    assert!(parse_category(Some("crypto")).is_err());
}

// ========== Rendering Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Salary Credit - March 2024", 10), "Salary ...");
    assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
}

#[test]
fn test_bar() {
    assert_eq!(bar(50.0, 10).chars().filter(|c| *c == '█').count(), 5);
    assert_eq!(bar(150.0, 4), "████");
    assert_eq!(bar(-5.0, 4), "░░░░");
}

#[test]
fn test_render_user_message() {
    let message = Message {
        id: 2,
        role: Role::User,
        text: "Look up current balance".to_string(),
        attachment: None,
        options: Vec::new(),
    };
    assert_eq!(render_message(&message), "  🙋 You: Look up current balance");
}

#[test]
fn test_render_multiline_bot_message() {
    let rendered = render_message(&bot("first\nsecond", None));
    assert_eq!(rendered, "  🤖 Penny: first\n     second");
}

#[test]
fn test_render_goal_tracker() {
    let goal = GoalSnapshot {
        name: "Travel Fund".to_string(),
        current: 18000.0,
        target: 20000.0,
        streak_days: 12,
    };
    let rendered = render_message(&bot("Keep going", Some(Attachment::GoalTracker { goal })));
    assert!(rendered.contains("₹18,000 / ₹20,000 (90%)"));
    assert!(rendered.contains("🔥 12 days streak!"));
    assert!(!rendered.contains("Congratulations"));
}

#[test]
fn test_render_purchase_options_marks_best_price() {
    let items = vec![
        PurchaseOption {
            merchant: "Blinkit".to_string(),
            price: 4999.0,
            delivery: "10 minutes".to_string(),
        },
        PurchaseOption {
            merchant: "Amazon".to_string(),
            price: 3499.0,
            delivery: "Tomorrow".to_string(),
        },
    ];
    let rendered = render_message(&bot("Prices", Some(Attachment::PurchaseOptions { items })));
    let amazon = rendered.lines().find(|l| l.contains("Amazon")).unwrap();
    let blinkit = rendered.lines().find(|l| l.contains("Blinkit")).unwrap();
    assert!(amazon.contains("best price"));
    assert!(!blinkit.contains("best price"));
}

#[test]
fn test_render_dashboard_over_fixture() {
    let transactions = fixture();
    let dashboard = commands::render_dashboard(&transactions, &summarize(&transactions));
    assert!(dashboard.contains("Total Income:    ₹65,000"));
    assert!(dashboard.contains("Transactions:    11"));
    assert!(dashboard.contains("Shopping"));
    assert!(dashboard.contains("Recent Transactions"));
}

#[test]
fn test_render_category_drilldown() {
    let transactions = fixture();
    let rendered =
        commands::render_category(&transactions, &summarize(&transactions), Category::Shopping);
    assert!(rendered.contains("Shopping (3 transactions"));
    assert!(rendered.contains("Blinkit - Air Fryer"));
    assert!(rendered.contains("Myntra - Clothing"));
    assert!(!rendered.contains("Swiggy"));
    assert!(!rendered.contains("more"));
}

#[test]
fn test_render_empty_category() {
    let rendered = commands::render_category(&[], &summarize(&[]), Category::Transport);
    assert!(rendered.contains("Transport (0 transactions"));
    assert!(rendered.contains("Nothing in this category."));
}

#[test]
fn test_loading_line_marks_final_step() {
    let step = IntroBlock::Message(MessageDraft::bot("Organizing your data"));
    assert_eq!(
        commands::loading_line(&step, false).as_deref(),
        Some("   ⏳ Organizing your data")
    );
    assert_eq!(
        commands::loading_line(&step, true).as_deref(),
        Some("   ✅ Organizing your data")
    );
    let prompt = IntroBlock::Prompt {
        options: vec!["Go".to_string()],
    };
    assert_eq!(commands::loading_line(&prompt, true), None);
}

// ========== Command Tests ==========

#[test]
fn test_cmd_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.csv");

    commands::cmd_export(&Config::default(), &DataArgs::default(), "csv", Some(&path)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 12);
    assert!(content.starts_with("id,date,description"));
}

#[test]
fn test_cmd_export_unknown_format() {
    let result = commands::cmd_export(&Config::default(), &DataArgs::default(), "xml", None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_ask_requires_question() {
    assert!(commands::cmd_ask(&Config::default(), &[]).is_err());
    assert!(commands::cmd_ask(&Config::default(), &options(&["how", "much", "food?"])).is_ok());
}

#[test]
fn test_cmd_screens_show() {
    let catalog = ScreenCatalog::builtin().unwrap();
    assert!(commands::cmd_screens_show(&catalog, "assistant").is_ok());
    assert!(commands::cmd_screens_show(&catalog, "missing").is_err());
    assert!(commands::cmd_screens_list(&catalog).is_ok());
    assert!(commands::cmd_demos(&catalog).is_ok());
}

#[test]
fn test_cmd_config() {
    assert!(commands::cmd_config(&Config::default()).is_ok());
}

#[test]
fn test_cmd_transactions_by_category() {
    let config = Config::default();
    let data = DataArgs::default();
    assert!(commands::cmd_transactions(&config, &data, 20, Some("shopping")).is_ok());
    assert!(commands::cmd_transactions(&config, &data, 20, None).is_ok());
    assert!(commands::cmd_transactions(&config, &data, 20, Some("crypto")).is_err());
}

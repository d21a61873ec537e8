//! Shared command utilities: data loading, teardown and the interactive loop

use std::io::Write;

use anyhow::{Context, Result};
use penny_core::{
    drain_replies, synthetic, Category, Config, DataMode, FlowEngine, Playback, PlaybackEnd,
    Submission, Teardown, Transaction,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::render::{print_message, print_options};
use crate::cli::DataArgs;

/// Resolve the dataset: `--seed` and `--random` override the config
pub fn data_mode(config: &Config, data: &DataArgs) -> DataMode {
    match (data.seed, data.random) {
        (Some(seed), _) => DataMode::Random { seed: Some(seed) },
        (None, true) => DataMode::Random {
            seed: config.data.seed,
        },
        (None, false) => config.data_mode(),
    }
}

pub fn load_transactions(config: &Config, data: &DataArgs) -> Vec<Transaction> {
    let mode = data_mode(config, data);
    tracing::debug!(?mode, "Loading transactions");
    synthetic::load(mode, config.range())
}

/// Parse an optional `--category` value
pub fn parse_category(category: Option<&str>) -> Result<Option<Category>> {
    category
        .map(|c| c.parse::<Category>().map_err(anyhow::Error::msg))
        .transpose()
}

/// Teardown fired by Ctrl-C
pub fn ctrl_c_teardown() -> Teardown {
    let (handle, teardown) = Teardown::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.fire();
        }
    });
    teardown
}

/// A line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Leave the screen
    Quit,
    /// Nothing typed; never reaches the engine
    Blank,
    /// An offered option, picked by number or label
    Option(String),
    /// Anything else
    Text(String),
}

/// Interpret a line against the currently offered options
pub fn parse_input(input: &str, options: &[String]) -> Choice {
    let input = input.trim();
    if input.is_empty() {
        return Choice::Blank;
    }
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Choice::Quit;
    }
    if let Ok(n) = input.parse::<usize>() {
        if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
            return Choice::Option(option.clone());
        }
    }
    if let Some(option) = options.iter().find(|o| o.eq_ignore_ascii_case(input)) {
        return Choice::Option(option.clone());
    }
    Choice::Text(input.to_string())
}

/// How typed text that isn't an offered option is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Submitted as an option label (may be ignored)
    Options,
    /// Submitted as free text to the resolver
    FreeText,
}

/// Print messages appended since `printed` and return the new count
pub fn print_new(engine: &FlowEngine, printed: usize) -> usize {
    for message in engine.transcript().since(printed) {
        print_message(message);
    }
    engine.transcript().len()
}

/// Read input and drive the engine until the user quits, input ends, or
/// (in options mode) nothing is left to pick
pub async fn interact(
    engine: &mut FlowEngine,
    playback: &Playback,
    teardown: &mut Teardown,
    mode: InputMode,
    extra_options: &[String],
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printed = engine.transcript().len();

    loop {
        let mut options = engine.current_options().to_vec();
        options.extend(extra_options.iter().cloned());
        if mode == InputMode::Options && options.is_empty() {
            println!();
            println!("   (end of conversation)");
            break;
        }

        print_options(&options);
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read input")?,
            _ = teardown.fired() => None,
        };
        let Some(line) = line else {
            engine.teardown();
            break;
        };

        let submission = match parse_input(&line, &options) {
            Choice::Quit => {
                engine.teardown();
                break;
            }
            Choice::Blank => continue,
            Choice::Option(label) if mode == InputMode::FreeText => engine.submit_free_text(&label),
            Choice::Option(label) => engine.submit_option(&label),
            Choice::Text(text) => match mode {
                InputMode::FreeText => engine.submit_free_text(&text),
                InputMode::Options => engine.submit_option(&text),
            },
        };

        if submission == Submission::Ignored {
            println!("   (Penny has nothing scripted for that, pick one of the options)");
            continue;
        }

        printed = print_new(engine, printed);
        if engine.is_typing() {
            println!("   Penny is typing...");
        }
        let end = drain_replies(engine, playback, teardown, print_message).await;
        printed = engine.transcript().len();
        if end == PlaybackEnd::TornDown {
            break;
        }
    }

    tracing::debug!(messages = printed, "Left interactive screen");
    Ok(())
}

//! Free-text chat commands (ask, chat)

use anyhow::{bail, Result};
use penny_core::resolver::quick_prompts;
use penny_core::{summarize, synthetic, Config, FlowEngine, Playback, Resolver};

use super::common::{ctrl_c_teardown, interact, print_new, InputMode};

/// Answer one question over the configured dataset
pub fn cmd_ask(config: &Config, words: &[String]) -> Result<()> {
    let question = words.join(" ");
    if question.trim().is_empty() {
        bail!("Ask a question, e.g. penny ask \"where can I save money?\"");
    }

    let transactions = synthetic::load(config.data_mode(), config.range());
    let insights = summarize(&transactions);
    println!("{}", Resolver::new().resolve(&question, &insights));
    Ok(())
}

pub async fn cmd_chat(config: &Config, playback: &Playback) -> Result<()> {
    let transactions = synthetic::load(config.data_mode(), config.range());
    let mut engine = FlowEngine::chat(summarize(&transactions), config);

    println!();
    println!("💬 Chat with Penny (type a question, a number for a quick prompt, q to leave)");
    println!("   ─────────────────────────────────────────────────────────────");
    print_new(&engine, 0);

    let prompts: Vec<String> = quick_prompts()
        .iter()
        .map(|(_, text)| text.to_string())
        .collect();
    let mut teardown = ctrl_c_teardown();
    interact(&mut engine, playback, &mut teardown, InputMode::FreeText, &prompts).await
}

//! Option-driven screens (assistant, demos) and screen inspection

use anyhow::{Context, Result};
use penny_core::screens::IntroBlock;
use penny_core::{
    drain_replies, play_intro, Config, FlowEngine, Playback, PlaybackEnd, ScreenCatalog, Sequencer,
};

use super::common::{ctrl_c_teardown, interact, print_new, InputMode};
use super::render::print_message;

const ASSISTANT_SCREEN: &str = "assistant";

pub async fn cmd_assistant(catalog: &ScreenCatalog, config: &Config, playback: &Playback) -> Result<()> {
    let screen = catalog
        .get(ASSISTANT_SCREEN)
        .context("Assistant screen missing from catalogue")?;
    let mut engine = FlowEngine::mount(screen, config);

    println!();
    println!("🤖 {} (pick a number or type an option, q to leave)", screen.title);
    println!("   ─────────────────────────────────────────────────────────────");
    print_new(&engine, 0);

    let mut teardown = ctrl_c_teardown();
    interact(&mut engine, playback, &mut teardown, InputMode::Options, &[]).await
}

pub fn cmd_demos(catalog: &ScreenCatalog) -> Result<()> {
    println!();
    println!("🎬 Demos");
    println!("   ─────────────────────────────────────────────────────────────");
    for screen in catalog.demos() {
        let marker = if screen.highlighted { "⭐" } else { "  " };
        println!("   {} {:<24} {}", marker, screen.id, screen.title);
    }
    println!();
    println!("   Play one with: penny demo <ID>");
    println!();
    Ok(())
}

pub async fn cmd_demo(
    catalog: &ScreenCatalog,
    id: &str,
    config: &Config,
    playback: &Playback,
) -> Result<()> {
    let screen = catalog
        .get(id)
        .with_context(|| format!("Unknown demo '{}' (see `penny demos`)", id))?;
    let mut engine = FlowEngine::mount(screen, config);

    println!();
    println!("🎬 {}", screen.title);
    println!("   ─────────────────────────────────────────────────────────────");
    let mut sequencer = Sequencer::start(screen.intro.clone());
    for block in sequencer.visible() {
        engine.reveal(block);
    }
    print_new(&engine, 0);

    let mut teardown = ctrl_c_teardown();
    let end = play_intro(&mut sequencer, playback, &mut teardown, |block: &IntroBlock| {
        engine.reveal(block);
        if let IntroBlock::Message(_) = block {
            if let Some(message) = engine.transcript().last() {
                print_message(message);
            }
        }
    })
    .await;
    if end == PlaybackEnd::TornDown {
        engine.teardown();
        return Ok(());
    }

    if engine.current_options().is_empty() {
        drain_replies(&mut engine, playback, &mut teardown, print_message).await;
        println!();
        return Ok(());
    }
    interact(&mut engine, playback, &mut teardown, InputMode::Options, &[]).await
}

pub fn cmd_screens_list(catalog: &ScreenCatalog) -> Result<()> {
    println!();
    println!("🗂️  Screens");
    println!("   ─────────────────────────────────────────────────────────────");
    for screen in catalog.all() {
        println!(
            "   {:<24} {:<13} {:>2} intro  {:>2} nodes  {}",
            screen.id,
            screen.kind.as_str(),
            screen.intro.len(),
            screen.script.len(),
            screen.title
        );
    }
    println!();
    Ok(())
}

pub fn cmd_screens_show(catalog: &ScreenCatalog, id: &str) -> Result<()> {
    let screen = catalog.get(id).with_context(|| format!("Unknown screen '{}'", id))?;
    let json = serde_json::to_string_pretty(screen).context("Failed to serialize screen")?;
    println!("{}", json);
    Ok(())
}

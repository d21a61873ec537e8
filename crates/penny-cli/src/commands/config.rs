//! Effective configuration display

use anyhow::Result;
use penny_core::config::{default_config_path, SEED_ENV};
use penny_core::{Config, DataMode};

pub fn cmd_config(config: &Config) -> Result<()> {
    println!();
    println!("⚙️  Penny Configuration");
    println!("   ─────────────────────────────────────────────────────────────");

    match &config.source {
        Some(path) => println!("   Source: {}", path.display()),
        None => println!("   Source: built-in defaults"),
    }
    if let Some(path) = default_config_path() {
        println!("   Override path: {}", path.display());
    }

    println!();
    println!("   Typing delay:  {} ms", config.timing.typing_delay.as_millis());
    println!("   Chat delay:    {} ms", config.timing.chat_delay.as_millis());
    println!("   Tick:          {} ms", config.timing.tick.as_millis());

    println!();
    match config.data_mode() {
        DataMode::Fixture => println!("   Data:          fixture (March 2024)"),
        DataMode::Random { seed: Some(seed) } => {
            println!("   Data:          random (seed {})", seed)
        }
        DataMode::Random { seed: None } => println!("   Data:          random (unseeded)"),
    }
    println!(
        "   Range:         {} to {}",
        config.range().start,
        config.range().end
    );
    if std::env::var(SEED_ENV).is_ok() {
        println!("   ({} is set)", SEED_ENV);
    }

    println!();
    Ok(())
}

//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `common` - Shared utilities (data loading, teardown, input parsing, interactive loop)
//! - `render` - Terminal rendering of messages and attachments
//! - `dashboard` - Account connection sequence and spending dashboard
//! - `transactions` - Transaction listing and export
//! - `chat` - Free-text chat commands (ask, chat)
//! - `screens` - Option-driven screens (assistant, demos, screen inspection)
//! - `config` - Effective configuration display

pub mod chat;
pub mod config;
pub mod common;
pub mod dashboard;
pub mod render;
pub mod screens;
pub mod transactions;

// Re-export command functions for main.rs
pub use chat::*;
pub use config::*;
pub use common::*;
pub use dashboard::*;
pub use render::*;
pub use screens::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

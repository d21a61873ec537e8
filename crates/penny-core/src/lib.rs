//! Penny Core Library
//!
//! Shared functionality for the Penny conversational finance prototype:
//! - Domain models (transactions, chat messages, attachments)
//! - Synthetic transaction data (fixed fixture or seeded random month)
//! - Insight aggregation over a transaction set
//! - Keyword-driven scripted responses for free-text chat
//! - Screen catalogue with embedded script tables
//! - Conversation flow engine (option-driven transcript state machine)
//! - Timed reveal sequencer for non-interactive demos
//! - Tokio playback driver with teardown cancellation

pub mod config;
pub mod currency;
pub mod error;
pub mod export;
pub mod flow;
pub mod insights;
pub mod models;
pub mod player;
pub mod resolver;
pub mod screens;
pub mod sequencer;
pub mod synthetic;

pub use config::{Config, DataConfig, TimingConfig};
pub use currency::{format_inr, format_signed_inr};
pub use error::{Error, Result};
pub use export::{export_transactions, ExportFormat};
pub use flow::{FlowEngine, Submission};
pub use insights::{by_category, summarize, Insights, ShoppingItem};
pub use models::{
    Attachment, Category, Message, MessageDraft, PaymentType, Role, Transaction, Transcript,
};
pub use player::{drain_replies, play_intro, Playback, PlaybackEnd, Teardown, TeardownHandle};
pub use resolver::Resolver;
pub use screens::{IntroBlock, Screen, ScreenCatalog, ScreenKind, ScriptNode, ScriptTable};
pub use sequencer::{RevealSchedule, Sequencer};
pub use synthetic::{DataMode, DateRange};

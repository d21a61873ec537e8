//! Screen catalogue
//!
//! Every screen is described by a TOML file embedded at build time:
//! an optional greeting, a home topic menu, an intro reveal schedule and a
//! script table mapping option labels to replies. Screens are validated on
//! load so that every option a screen can show resolves to exactly one
//! script node, or is explicitly declared a no-op.
//!
//! Script tables are read-only after load.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Attachment, MessageDraft, Role};
use crate::sequencer::RevealSchedule;

/// Embedded screen definitions (compiled into binary)
mod defaults {
    pub const ASSISTANT: &str = include_str!("../screens/assistant.toml");
    pub const ACCOUNT_AGGREGATOR: &str = include_str!("../screens/account_aggregator.toml");
    pub const SPENDING_INSIGHTS: &str = include_str!("../screens/spending_insights.toml");
    pub const GAMIFIED_SAVINGS: &str = include_str!("../screens/gamified_savings.toml");
    pub const ROAST_SPENDING: &str = include_str!("../screens/roast_spending.toml");
    pub const PEER_COMPARISON: &str = include_str!("../screens/peer_comparison.toml");
    pub const FINANCIAL_HEALTH: &str = include_str!("../screens/financial_health.toml");
    pub const SUBSCRIPTION_INSIGHTS: &str = include_str!("../screens/subscription_insights.toml");
    pub const BUDGET_PERSONALITY: &str = include_str!("../screens/budget_personality.toml");
    pub const ROAST_BUDGET: &str = include_str!("../screens/roast_budget.toml");

    /// In display order
    pub const ALL: &[&str] = &[
        ASSISTANT,
        ACCOUNT_AGGREGATOR,
        SPENDING_INSIGHTS,
        GAMIFIED_SAVINGS,
        ROAST_SPENDING,
        PEER_COMPARISON,
        FINANCIAL_HEALTH,
        SUBSCRIPTION_INSIGHTS,
        BUDGET_PERSONALITY,
        ROAST_BUDGET,
    ];
}

/// What a screen is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    /// Option-driven conversation with a home topic menu
    Conversation,
    /// Scripted demo: timed intro, optionally followed by buttons
    Demo,
    /// Loading sequence shown before a dashboard
    Loading,
}

impl ScreenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Demo => "demo",
            Self::Loading => "loading",
        }
    }
}

/// Element revealed by a screen's intro schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum IntroBlock {
    /// A chat bubble
    Message(MessageDraft),
    /// Reply buttons that become clickable
    Prompt { options: Vec<String> },
}

impl IntroBlock {
    /// Option labels this block makes selectable
    pub fn options(&self) -> &[String] {
        match self {
            Self::Message(draft) => &draft.options,
            Self::Prompt { options } => options,
        }
    }
}

/// One reply definition, reachable through one or more option labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptNode {
    /// Canonical label, echoed as the user's message
    pub label: String,
    /// User message text to append instead of the label
    pub echo: Option<String>,
    /// Silent triggers append no user message
    pub silent: bool,
    /// Overrides the table's and the engine's reply delay
    pub delay: Option<Duration>,
    /// Re-open the home topic menu after this transition
    pub show_home: bool,
    pub reply: MessageDraft,
}

impl ScriptNode {
    /// Text of the user message this transition appends, if any
    pub fn echo_text(&self) -> Option<&str> {
        if self.silent {
            None
        } else {
            Some(self.echo.as_deref().unwrap_or(&self.label))
        }
    }
}

/// Normalize a label for lookup: trimmed, inner whitespace collapsed,
/// lower-cased
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Static option-label → reply table for one screen
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScriptTable {
    nodes: Vec<ScriptNode>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    default_delay: Option<Duration>,
    noop: Vec<String>,
}

impl ScriptTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table; every label (after normalization) must be unique
    pub fn new(entries: Vec<(Vec<String>, ScriptNode)>, default_delay: Option<Duration>) -> Result<Self> {
        let mut table = Self {
            default_delay,
            ..Self::default()
        };
        for (labels, node) in entries {
            let position = table.nodes.len();
            for label in labels.iter().chain(std::iter::once(&node.label)) {
                let key = normalize_label(label);
                if key.is_empty() {
                    return Err(Error::InvalidData("script label is empty".to_string()));
                }
                match table.index.get(&key) {
                    Some(existing) if *existing != position => {
                        return Err(Error::InvalidData(format!(
                            "script label '{}' is defined twice",
                            label
                        )));
                    }
                    _ => {
                        table.index.insert(key, position);
                    }
                }
            }
            table.nodes.push(node);
        }
        Ok(table)
    }

    /// Declare labels that may be shown but intentionally do nothing
    pub fn with_noop(mut self, labels: Vec<String>) -> Self {
        self.noop = labels.iter().map(|l| normalize_label(l)).collect();
        self
    }

    pub fn lookup(&self, label: &str) -> Option<&ScriptNode> {
        self.index
            .get(&normalize_label(label))
            .map(|i| &self.nodes[*i])
    }

    pub fn is_noop(&self, label: &str) -> bool {
        self.noop.contains(&normalize_label(label))
    }

    pub fn nodes(&self) -> &[ScriptNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn default_delay(&self) -> Option<Duration> {
        self.default_delay
    }
}

/// A mountable screen
#[derive(Debug, Clone, Serialize)]
pub struct Screen {
    pub id: String,
    pub title: String,
    pub kind: ScreenKind,
    /// Highlighted in the demo menu
    pub highlighted: bool,
    pub greeting: Option<MessageDraft>,
    /// Home topic menu, visible on mount when non-empty
    pub home: Vec<String>,
    pub intro: RevealSchedule<IntroBlock>,
    pub script: Arc<ScriptTable>,
}

impl Screen {
    /// Parse and validate a screen definition
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawScreen = toml::from_str(content)
            .map_err(|e| Error::InvalidData(format!("Invalid screen TOML: {}", e)))?;
        let screen = raw.into_screen()?;
        screen.validate()?;
        Ok(screen)
    }

    /// Every option reachable from this screen
    fn shown_options(&self) -> Vec<&str> {
        let mut shown: Vec<&str> = self.home.iter().map(String::as_str).collect();
        if let Some(greeting) = &self.greeting {
            shown.extend(greeting.options.iter().map(String::as_str));
        }
        for (_, block) in self.intro.entries() {
            shown.extend(block.options().iter().map(String::as_str));
        }
        for node in self.script.nodes() {
            shown.extend(node.reply.options.iter().map(String::as_str));
        }
        shown
    }

    fn validate(&self) -> Result<()> {
        for label in self.shown_options() {
            if self.script.lookup(label).is_none() && !self.script.is_noop(label) {
                return Err(Error::InvalidData(format!(
                    "screen '{}' shows option '{}' with no script node",
                    self.id, label
                )));
            }
        }
        Ok(())
    }
}

/// All built-in screens, in display order
#[derive(Debug, Clone)]
pub struct ScreenCatalog {
    screens: Vec<Screen>,
}

impl ScreenCatalog {
    /// Load the embedded screen definitions
    pub fn builtin() -> Result<Self> {
        let screens = defaults::ALL
            .iter()
            .map(|content| Screen::from_toml(content))
            .collect::<Result<Vec<_>>>()?;
        Self::from_screens(screens)
    }

    pub fn from_screens(screens: Vec<Screen>) -> Result<Self> {
        for (i, screen) in screens.iter().enumerate() {
            if screens[..i].iter().any(|s| s.id == screen.id) {
                return Err(Error::InvalidData(format!(
                    "duplicate screen id '{}'",
                    screen.id
                )));
            }
        }
        Ok(Self { screens })
    }

    pub fn get(&self, id: &str) -> Result<&Screen> {
        self.screens
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(format!("screen '{}'", id)))
    }

    pub fn all(&self) -> &[Screen] {
        &self.screens
    }

    pub fn demos(&self) -> impl Iterator<Item = &Screen> {
        self.screens.iter().filter(|s| s.kind == ScreenKind::Demo)
    }
}

// Raw TOML structures

#[derive(Debug, Deserialize)]
struct RawScreen {
    id: String,
    title: String,
    kind: ScreenKind,
    #[serde(default)]
    highlighted: bool,
    delay_ms: Option<u64>,
    greeting: Option<RawMessage>,
    #[serde(default)]
    home: Vec<String>,
    #[serde(default)]
    intro: Vec<RawIntro>,
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    noop: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    role: Option<Role>,
    text: String,
    attachment: Option<Attachment>,
    #[serde(default)]
    options: Vec<String>,
}

impl RawMessage {
    fn into_draft(self, default_role: Role) -> MessageDraft {
        MessageDraft {
            role: self.role.unwrap_or(default_role),
            text: self.text,
            attachment: self.attachment,
            options: self.options,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawIntro {
    at_ms: u64,
    role: Option<Role>,
    text: Option<String>,
    attachment: Option<Attachment>,
    #[serde(default)]
    options: Vec<String>,
    prompt: Option<Vec<String>>,
}

impl RawIntro {
    fn into_block(self) -> Result<(Duration, IntroBlock)> {
        let at = Duration::from_millis(self.at_ms);
        let block = match (self.text, self.prompt) {
            (Some(text), None) => IntroBlock::Message(MessageDraft {
                role: self.role.unwrap_or(Role::Bot),
                text,
                attachment: self.attachment,
                options: self.options,
            }),
            (None, Some(options)) => IntroBlock::Prompt { options },
            _ => {
                return Err(Error::InvalidData(format!(
                    "intro entry at {}ms needs exactly one of text or prompt",
                    self.at_ms
                )))
            }
        };
        Ok((at, block))
    }
}

#[derive(Debug, Deserialize)]
struct RawNode {
    label: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    echo: Option<String>,
    #[serde(default)]
    silent: bool,
    delay_ms: Option<u64>,
    #[serde(default)]
    show_home: bool,
    reply: RawMessage,
}

impl RawScreen {
    fn into_screen(self) -> Result<Screen> {
        let mut entries = Vec::with_capacity(self.nodes.len());
        for raw in self.nodes {
            let mut labels = raw.labels;
            let label = match raw.label {
                Some(label) => label,
                None if !labels.is_empty() => labels.remove(0),
                None => {
                    return Err(Error::InvalidData(format!(
                        "screen '{}' has a node without a label",
                        self.id
                    )))
                }
            };
            let node = ScriptNode {
                label,
                echo: raw.echo,
                silent: raw.silent,
                delay: raw.delay_ms.map(Duration::from_millis),
                show_home: raw.show_home,
                reply: raw.reply.into_draft(Role::Bot),
            };
            entries.push((labels, node));
        }

        let script = ScriptTable::new(entries, self.delay_ms.map(Duration::from_millis))
            .map_err(|e| Error::InvalidData(format!("screen '{}': {}", self.id, e)))?
            .with_noop(self.noop);

        let intro = self
            .intro
            .into_iter()
            .map(RawIntro::into_block)
            .collect::<Result<Vec<_>>>()?;

        Ok(Screen {
            id: self.id,
            title: self.title,
            kind: self.kind,
            highlighted: self.highlighted,
            greeting: self.greeting.map(|g| g.into_draft(Role::Bot)),
            home: self.home,
            intro: RevealSchedule::new(intro)?,
            script: Arc::new(script),
        })
    }
}

//! Conversation flow engine
//!
//! One engine backs one mounted screen and exclusively owns its transcript.
//! Input arrives as option labels (looked up in the screen's script table)
//! or free text (answered by an attached [`Resolver`]). Accepted input
//! appends the user's message immediately and queues the bot reply, which is
//! appended once its delay has elapsed on the engine's clock.
//!
//! Replies are queued FIFO: a reply is never due before the one queued ahead
//! of it, so the transcript always follows acceptance order regardless of
//! individual delays. The clock only moves through [`FlowEngine::advance`].

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::insights::Insights;
use crate::models::{Message, MessageDraft, Transcript};
use crate::resolver::{opening_messages, Resolver};
use crate::screens::{IntroBlock, Screen, ScriptTable};

/// Outcome of submitting input to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A reply is queued and will be appended after `due_in`
    Accepted { due_in: Duration },
    /// Nothing happened; the engine is unchanged
    Ignored,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[derive(Debug, Clone)]
struct PendingReply {
    due: Duration,
    draft: MessageDraft,
    show_home: bool,
}

/// Free-text answering for the chat screen
#[derive(Debug, Clone)]
struct Responder {
    resolver: Resolver,
    insights: Insights,
    delay: Duration,
}

#[derive(Debug, Clone)]
pub struct FlowEngine {
    script: Arc<ScriptTable>,
    home: Vec<String>,
    transcript: Transcript,
    home_visible: bool,
    offered: Vec<String>,
    pending: VecDeque<PendingReply>,
    clock: Duration,
    default_delay: Duration,
    responder: Option<Responder>,
    torn_down: bool,
}

impl FlowEngine {
    /// Engine over a script table with an empty transcript and no home menu
    pub fn new(script: Arc<ScriptTable>) -> Self {
        Self {
            script,
            home: Vec::new(),
            transcript: Transcript::new(),
            home_visible: false,
            offered: Vec::new(),
            pending: VecDeque::new(),
            clock: Duration::ZERO,
            default_delay: Config::default().timing.typing_delay,
            responder: None,
            torn_down: false,
        }
    }

    /// Mount a screen: greeting appended, home menu visible when the screen
    /// has one
    pub fn mount(screen: &Screen, config: &Config) -> Self {
        let mut engine = Self::new(Arc::clone(&screen.script))
            .with_default_delay(config.timing.typing_delay)
            .with_home(screen.home.clone());
        if let Some(greeting) = &screen.greeting {
            engine.append(greeting.clone());
        }
        if engine.home_visible {
            engine.offered = engine.home.clone();
        }

        tracing::info!(screen = %screen.id, kind = screen.kind.as_str(), "Mounted screen");
        engine
    }

    /// The free-text chat screen over a set of insights
    pub fn chat(insights: Insights, config: &Config) -> Self {
        let opening = opening_messages(&insights);
        Self::new(Arc::new(ScriptTable::empty()))
            .with_default_delay(config.timing.typing_delay)
            .with_opening(opening)
            .with_responder(Resolver::new(), insights, config.timing.chat_delay)
    }

    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn with_home(mut self, home: Vec<String>) -> Self {
        self.home_visible = !home.is_empty();
        self.home = home;
        self
    }

    /// Seed the transcript with opening messages
    pub fn with_opening(mut self, drafts: Vec<MessageDraft>) -> Self {
        for draft in drafts {
            self.append(draft);
        }
        self
    }

    pub fn with_responder(mut self, resolver: Resolver, insights: Insights, delay: Duration) -> Self {
        self.responder = Some(Responder {
            resolver,
            insights,
            delay,
        });
        self
    }

    /// Submit a selected option label
    ///
    /// Unknown labels, declared no-ops and submissions after teardown are
    /// ignored without touching the transcript.
    pub fn submit_option(&mut self, label: &str) -> Submission {
        if self.torn_down {
            return Submission::Ignored;
        }
        let Some(node) = self.script.lookup(label) else {
            tracing::debug!(label, "Ignored unmatched option");
            return Submission::Ignored;
        };
        let node = node.clone();

        if let Some(echo) = node.echo_text() {
            self.append(MessageDraft::user(echo));
        }
        self.home_visible = false;
        self.offered.clear();

        let delay = node
            .delay
            .or(self.script.default_delay())
            .unwrap_or(self.default_delay);
        let due_in = self.enqueue(node.reply, delay, node.show_home);

        tracing::debug!(
            label = %node.label,
            silent = node.silent,
            due_in_ms = due_in.as_millis() as u64,
            "Accepted option"
        );
        self.flush_due();
        Submission::Accepted { due_in }
    }

    /// Submit free text. Blank input, or an engine without a responder,
    /// is ignored.
    pub fn submit_free_text(&mut self, text: &str) -> Submission {
        let text = text.trim();
        if self.torn_down || text.is_empty() {
            return Submission::Ignored;
        }
        let Some(responder) = &self.responder else {
            tracing::debug!("Ignored free text, screen has no responder");
            return Submission::Ignored;
        };

        let reply = MessageDraft::bot(responder.resolver.resolve(text, &responder.insights));
        let delay = responder.delay;

        self.append(MessageDraft::user(text));
        self.offered.clear();
        let due_in = self.enqueue(reply, delay, false);
        tracing::debug!(due_in_ms = due_in.as_millis() as u64, "Accepted free text");
        self.flush_due();
        Submission::Accepted { due_in }
    }

    /// Show an element revealed by the screen's intro schedule
    pub fn reveal(&mut self, block: &IntroBlock) {
        if self.torn_down {
            return;
        }
        match block {
            IntroBlock::Message(draft) => self.append(draft.clone()),
            IntroBlock::Prompt { options } => self.offered = options.clone(),
        }
    }

    /// Advance the clock by `dt`, returning messages appended by this step
    pub fn advance(&mut self, dt: Duration) -> &[Message] {
        if self.torn_down {
            return &[];
        }
        let before = self.transcript.len();
        self.clock += dt;
        self.flush_due();
        self.transcript.since(before)
    }

    fn enqueue(&mut self, draft: MessageDraft, delay: Duration, show_home: bool) -> Duration {
        let mut due = self.clock + delay;
        if let Some(last) = self.pending.back() {
            due = due.max(last.due);
        }
        self.pending.push_back(PendingReply {
            due,
            draft,
            show_home,
        });
        due - self.clock
    }

    fn flush_due(&mut self) {
        while self.pending.front().is_some_and(|p| p.due <= self.clock) {
            let Some(reply) = self.pending.pop_front() else {
                break;
            };
            self.append(reply.draft);
            if reply.show_home {
                self.home_visible = true;
                self.offered = self.home.clone();
            }
        }
    }

    fn append(&mut self, draft: MessageDraft) {
        if !draft.options.is_empty() {
            self.offered = draft.options.clone();
        }
        self.transcript.push(draft);
    }

    /// Time until the next queued reply is due
    pub fn next_due(&self) -> Option<Duration> {
        self.pending
            .front()
            .map(|p| p.due.saturating_sub(self.clock))
    }

    /// True while a reply is queued
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn home_visible(&self) -> bool {
        self.home_visible
    }

    pub fn home(&self) -> &[String] {
        &self.home
    }

    /// Options the user can pick right now, in display order
    pub fn current_options(&self) -> &[String] {
        &self.offered
    }

    pub fn has_responder(&self) -> bool {
        self.responder.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Cancel every queued reply; nothing is appended afterwards.
    /// Returns the number of replies dropped.
    pub fn teardown(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        self.torn_down = true;
        if cancelled > 0 {
            tracing::debug!(cancelled, "Cancelled pending replies");
        }
        cancelled
    }
}

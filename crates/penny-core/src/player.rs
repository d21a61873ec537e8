//! Real-time playback
//!
//! Runs the clock-agnostic state machines ([`Sequencer`], [`FlowEngine`])
//! against tokio time. Each driver sleeps until the next reveal is due and
//! races that sleep against a [`Teardown`] signal, so tearing a view down
//! cancels every pending reveal and nothing is delivered afterwards.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::config::Config;
use crate::flow::FlowEngine;
use crate::models::Message;
use crate::sequencer::Sequencer;

/// Playback settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    /// Longest single sleep between clock advances
    pub tick: Duration,
    /// Skip sleeping entirely (reveals still happen in order)
    pub instant: bool,
}

impl Playback {
    pub fn from_config(config: &Config, instant: bool) -> Self {
        Self {
            tick: config.timing.tick,
            instant,
        }
    }

    pub fn instant() -> Self {
        Self {
            tick: Config::default().timing.tick,
            instant: true,
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::from_config(&Config::default(), false)
    }
}

/// Fires a [`Teardown`]
#[derive(Debug)]
pub struct TeardownHandle {
    tx: watch::Sender<bool>,
}

impl TeardownHandle {
    pub fn fire(&self) {
        // No receivers left means nothing is playing
        let _ = self.tx.send(true);
    }
}

/// Teardown signal observed by playback loops
#[derive(Debug, Clone)]
pub struct Teardown {
    rx: watch::Receiver<bool>,
}

impl Teardown {
    pub fn channel() -> (TeardownHandle, Teardown) {
        let (tx, rx) = watch::channel(false);
        (TeardownHandle { tx }, Teardown { rx })
    }

    pub fn is_fired(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the handle fires. Never resolves if the handle is
    /// dropped without firing.
    pub async fn fired(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// How a playback loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// Everything scheduled was delivered
    Finished,
    /// Teardown fired first; pending reveals were cancelled
    TornDown,
}

/// Sleep for `step`, or return false if teardown fires first
async fn wait(step: Duration, playback: &Playback, teardown: &mut Teardown) -> bool {
    if teardown.is_fired() {
        return false;
    }
    if playback.instant || step.is_zero() {
        return true;
    }
    tokio::select! {
        _ = tokio::time::sleep(step) => true,
        _ = teardown.fired() => false,
    }
}

/// Wall time since the previous advance, capped at `due`. Oversleep and
/// time spent in callbacks count toward the schedule, so it does not drift.
fn elapsed_step(last: &mut Instant, due: Duration, playback: &Playback) -> Duration {
    let now = Instant::now();
    let elapsed = now.saturating_duration_since(*last);
    *last = now;
    // Instant playback jumps straight to the due time
    if playback.instant {
        due
    } else {
        elapsed.min(due)
    }
}

/// Play a reveal sequence to completion, calling `on_reveal` for each
/// element in schedule order
pub async fn play_intro<T, F>(
    sequencer: &mut Sequencer<T>,
    playback: &Playback,
    teardown: &mut Teardown,
    mut on_reveal: F,
) -> PlaybackEnd
where
    F: FnMut(&T),
{
    let mut last = Instant::now();
    while let Some(due) = sequencer.next_due() {
        if !wait(due.min(playback.tick), playback, teardown).await {
            sequencer.cancel();
            return PlaybackEnd::TornDown;
        }
        for element in sequencer.advance(elapsed_step(&mut last, due, playback)) {
            on_reveal(element);
        }
    }
    PlaybackEnd::Finished
}

/// Deliver every queued reply of a flow engine, calling `on_message` for
/// each appended message in transcript order
pub async fn drain_replies<F>(
    engine: &mut FlowEngine,
    playback: &Playback,
    teardown: &mut Teardown,
    mut on_message: F,
) -> PlaybackEnd
where
    F: FnMut(&Message),
{
    let mut last = Instant::now();
    while let Some(due) = engine.next_due() {
        if !wait(due.min(playback.tick), playback, teardown).await {
            engine.teardown();
            return PlaybackEnd::TornDown;
        }
        for message in engine.advance(elapsed_step(&mut last, due, playback)) {
            on_message(message);
        }
    }
    PlaybackEnd::Finished
}

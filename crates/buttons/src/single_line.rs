//! Single-Line adapter: one button on a dedicated digital input.
//!
//! The line is sampled once per [`SingleLine::poll`]. A rising edge must stay
//! stable for `debounce_ms` before the press is confirmed; a falling edge is
//! taken immediately. Each poll yields at most one event.
//!
//! ```text
//!            level, debounce elapsed
//!   Idle ──level──▶ Debouncing ─────────────▶ Pressed
//!    ▲                  │ !level (noise)          │ !level
//!    └──────────────────┴─────────────────────────┘
//! ```
//!
//! With double-click detection on, the first release is reported as
//! `Release` and its click is held back. A second release while the click is
//! still pending becomes `DoubleClick`; otherwise, once `double_click_ms` has
//! passed without a confirmed press, the held-back `Click` is emitted stamped
//! with the original release time.
//!
//! With zero debounce a rising edge confirms on the poll it is seen, unless
//! that poll already emits a deferred click; the press is then reported on
//! the next poll, stamped with the edge time, whatever the level.

use platform::LineDriver;

use crate::classifier::Tracker;
use crate::config::LineConfig;
use crate::event::{ButtonAction, ButtonEvent};

/// Debounce state of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    /// Released, or a rising edge was rejected as noise.
    Idle,
    /// Rising edge seen at `since`; waiting for it to prove stable.
    Debouncing {
        /// Timestamp of the rising edge.
        since: u64,
    },
    /// Press confirmed.
    Pressed,
}

/// A click held back to see whether a second one follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct PendingClick {
    released_at: u64,
    held_ms: u32,
}

/// Gesture adapter for a single digital button line.
pub struct SingleLine {
    source: &'static str,
    config: LineConfig,
    state: LineState,
    tracker: Tracker,
    pending: Option<PendingClick>,
}

impl SingleLine {
    /// Create an idle adapter tagging its events with `source`.
    pub fn new(source: &'static str, config: LineConfig) -> Self {
        Self {
            source,
            config,
            state: LineState::Idle,
            tracker: Tracker::new(),
            pending: None,
        }
    }

    /// Sample `line` once and advance the state machine.
    ///
    /// The line is only borrowed for this call.
    pub fn poll<L: LineDriver + ?Sized>(&mut self, line: &mut L, now_ms: u64) -> Option<ButtonEvent> {
        let level = line.read();
        self.update(level, now_ms)
    }

    /// Advance the state machine with an already-sampled level.
    pub fn update(&mut self, level: bool, now_ms: u64) -> Option<ButtonEvent> {
        match self.state {
            LineState::Idle => {
                let deferred = self.expire_pending(now_ms);
                if level {
                    self.state = LineState::Debouncing { since: now_ms };
                    if deferred.is_none() && self.config.debounce_ms == 0 {
                        return Some(self.confirm_press(now_ms));
                    }
                }
                deferred
            }
            LineState::Debouncing { since } => {
                let instant = self.config.debounce_ms == 0;
                if !level && !instant {
                    #[cfg(feature = "defmt")]
                    defmt::trace!(
                        "{=str} rejected {=u64}ms bounce",
                        self.source,
                        now_ms.saturating_sub(since)
                    );
                    self.state = LineState::Idle;
                    return self.expire_pending(now_ms);
                }
                // A click whose window ran out must not pair with this press;
                // the press confirms on a later poll.
                if let Some(click) = self.expire_pending(now_ms) {
                    return Some(click);
                }
                if instant {
                    // Edge seen on the poll that flushed a click.
                    Some(self.confirm_press(since))
                } else if now_ms.saturating_sub(since) >= u64::from(self.config.debounce_ms) {
                    Some(self.confirm_press(now_ms))
                } else {
                    None
                }
            }
            LineState::Pressed => {
                if level {
                    self.check_long_press(now_ms)
                } else {
                    Some(self.release(now_ms))
                }
            }
        }
    }

    /// `true` while a debounced press is held.
    pub fn is_pressed(&self) -> bool {
        self.state == LineState::Pressed
    }

    /// `true` while a click is held back waiting for a possible double click.
    pub fn has_pending_click(&self) -> bool {
        self.pending.is_some()
    }

    /// Current debounce state.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Tracking record of the button.
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Configuration supplied at construction.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Source tag carried by every event.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Force idle and forget everything, including a pending click.
    ///
    /// Emits nothing.
    pub fn reset(&mut self) {
        self.state = LineState::Idle;
        self.tracker.reset();
        self.pending = None;
    }

    fn event(&self, action: ButtonAction, timestamp_ms: u64) -> ButtonEvent {
        ButtonEvent::new(self.source, None, action, timestamp_ms)
    }

    fn confirm_press(&mut self, now_ms: u64) -> ButtonEvent {
        self.state = LineState::Pressed;
        self.tracker.press(now_ms);
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str} press @{=u64}", self.source, now_ms);
        self.event(ButtonAction::Press, now_ms)
    }

    fn check_long_press(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        let held = self
            .tracker
            .poll_long_press(now_ms, self.config.long_press_ms)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str} long press held={=u32}ms", self.source, held);
        Some(self.event(ButtonAction::LongPress, now_ms).with_duration(held))
    }

    fn release(&mut self, now_ms: u64) -> ButtonEvent {
        self.state = LineState::Idle;
        let held = self.tracker.mark_released(now_ms);
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str} release held={=u32}ms", self.source, held);

        if !self.config.detect_clicks {
            return self.event(ButtonAction::Release, now_ms).with_duration(held);
        }
        if !self.config.detect_double_click {
            return self
                .event(ButtonAction::Click, now_ms)
                .with_clicks(1)
                .with_duration(held);
        }
        if self.pending.take().is_some() {
            return self
                .event(ButtonAction::DoubleClick, now_ms)
                .with_clicks(2)
                .with_duration(held);
        }
        self.pending = Some(PendingClick {
            released_at: now_ms,
            held_ms: held,
        });
        self.event(ButtonAction::Release, now_ms).with_duration(held)
    }

    /// Emit the held-back click once its window has passed.
    fn expire_pending(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        let pending = self.pending?;
        if now_ms.saturating_sub(pending.released_at) <= u64::from(self.config.double_click_ms) {
            return None;
        }
        self.pending = None;
        Some(
            self.event(ButtonAction::Click, pending.released_at)
                .with_clicks(1)
                .with_duration(pending.held_ms),
        )
    }
}

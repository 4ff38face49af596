//! Gesture classification shared by every adapter.
//!
//! [`Tracker`] is the per-button tracking record: pressed flag, edge
//! timestamps, click counter and the long-press latch. It is pure state with
//! no I/O, mutated only from an adapter's `poll`.
//!
//! [`KeyGestures`] holds the press/release/hold rules used by adapters that
//! trust their driver's own cadence (Ladder-Decode and Matrix-Scan):
//!
//! | Edge            | Events                                               |
//! |-----------------|------------------------------------------------------|
//! | up → down       | `Press`                                              |
//! | down → up       | `Click` or `DoubleClick`, then `Release`             |
//! | held, each poll | `LongPress` once when `held ≥ long_press_ms`         |
//!
//! All durations use saturating arithmetic so a timestamp older than a stored
//! one yields zero rather than wrapping.

use crate::config::ClickConfig;
use crate::event::{ButtonAction, ButtonEvent, ButtonId};
use crate::sink::EventSink;

/// Clamp a millisecond span into the `u32` carried by events.
pub(crate) fn clamp_ms(ms: u64) -> u32 {
    u32::try_from(ms).unwrap_or(u32::MAX)
}

/// Outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Released {
    /// How long the button was down.
    pub held_ms: u32,
    /// Consecutive clicks including this one.
    pub clicks: u8,
}

/// Tracking record for one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tracker {
    pressed: bool,
    down_at: u64,
    up_at: u64,
    last_click_at: u64,
    consecutive_clicks: u8,
    long_press_fired: bool,
}

impl Tracker {
    /// Zeroed record.
    pub const fn new() -> Self {
        Self {
            pressed: false,
            down_at: 0,
            up_at: 0,
            last_click_at: 0,
            consecutive_clicks: 0,
            long_press_fired: false,
        }
    }

    /// `true` between a press and its release.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Timestamp of the last press.
    pub fn down_at(&self) -> u64 {
        self.down_at
    }

    /// Timestamp of the last release.
    pub fn up_at(&self) -> u64 {
        self.up_at
    }

    /// Timestamp of the last click.
    pub fn last_click_at(&self) -> u64 {
        self.last_click_at
    }

    /// Running click counter.
    pub fn consecutive_clicks(&self) -> u8 {
        self.consecutive_clicks
    }

    /// `true` once this hold has produced its long press.
    pub fn long_press_fired(&self) -> bool {
        self.long_press_fired
    }

    /// Milliseconds since the last press.
    pub fn held_ms(&self, now_ms: u64) -> u32 {
        clamp_ms(now_ms.saturating_sub(self.down_at))
    }

    /// Record a press and re-arm the long-press latch.
    pub fn press(&mut self, now_ms: u64) {
        self.pressed = true;
        self.down_at = now_ms;
        self.long_press_fired = false;
    }

    /// Record a release without touching the click counter.
    ///
    /// Returns the hold time.
    pub fn mark_released(&mut self, now_ms: u64) -> u32 {
        let held = self.held_ms(now_ms);
        self.pressed = false;
        self.up_at = now_ms;
        held
    }

    /// Record a release and update the click counter.
    ///
    /// The counter increments when the gap since the previous release is
    /// within `click_gap_ms`, otherwise it restarts at 1.
    pub fn release(&mut self, now_ms: u64, click_gap_ms: u32) -> Released {
        let gap = now_ms.saturating_sub(self.up_at);
        self.consecutive_clicks = if gap <= u64::from(click_gap_ms) {
            self.consecutive_clicks.saturating_add(1)
        } else {
            1
        };
        self.last_click_at = now_ms;
        let held_ms = self.mark_released(now_ms);
        Released {
            held_ms,
            clicks: self.consecutive_clicks,
        }
    }

    /// Check the long-press threshold while pressed.
    ///
    /// Returns the hold time the first time `held ≥ long_press_ms` during the
    /// current hold, and `None` on every other call.
    pub fn poll_long_press(&mut self, now_ms: u64, long_press_ms: u32) -> Option<u32> {
        if !self.pressed || self.long_press_fired {
            return None;
        }
        let held = self.held_ms(now_ms);
        if held >= long_press_ms {
            self.long_press_fired = true;
            Some(held)
        } else {
            None
        }
    }

    /// Zero the record.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Press/release/hold rules for cadence-trusting adapters.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyGestures {
    source: &'static str,
    config: ClickConfig,
}

impl KeyGestures {
    /// Rules for events tagged with `source`.
    pub const fn new(source: &'static str, config: ClickConfig) -> Self {
        Self { source, config }
    }

    /// Source tag.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Timing configuration.
    pub fn config(&self) -> &ClickConfig {
        &self.config
    }

    /// Up → down edge: emits `Press`.
    pub fn press<S: EventSink + ?Sized>(
        &self,
        tracker: &mut Tracker,
        button: ButtonId,
        now_ms: u64,
        sink: &mut S,
    ) {
        tracker.press(now_ms);
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str} button {=u8} press @{=u64}", self.source, button, now_ms);
        sink.emit(ButtonEvent::new(
            self.source,
            Some(button),
            ButtonAction::Press,
            now_ms,
        ));
    }

    /// Down → up edge: emits `Click`/`DoubleClick` followed by `Release`.
    ///
    /// `DoubleClick` is used whenever the running count reaches 2 or more;
    /// a third rapid click is reported as `DoubleClick` with `click_count` 3.
    pub fn release<S: EventSink + ?Sized>(
        &self,
        tracker: &mut Tracker,
        button: ButtonId,
        now_ms: u64,
        sink: &mut S,
    ) {
        let released = tracker.release(now_ms, self.config.click_gap_ms);
        let action = if released.clicks >= 2 {
            ButtonAction::DoubleClick
        } else {
            ButtonAction::Click
        };
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{=str} button {=u8} {} held={=u32}ms clicks={=u8}",
            self.source,
            button,
            action,
            released.held_ms,
            released.clicks
        );
        sink.emit(
            ButtonEvent::new(self.source, Some(button), action, now_ms)
                .with_clicks(released.clicks)
                .with_duration(released.held_ms),
        );
        sink.emit(
            ButtonEvent::new(self.source, Some(button), ButtonAction::Release, now_ms)
                .with_duration(released.held_ms),
        );
    }

    /// While down: emits `LongPress` once per hold.
    pub fn hold<S: EventSink + ?Sized>(
        &self,
        tracker: &mut Tracker,
        button: ButtonId,
        now_ms: u64,
        sink: &mut S,
    ) {
        if let Some(held) = tracker.poll_long_press(now_ms, self.config.long_press_ms) {
            #[cfg(feature = "defmt")]
            defmt::debug!("{=str} button {=u8} long press held={=u32}ms", self.source, button, held);
            sink.emit(
                ButtonEvent::new(self.source, Some(button), ButtonAction::LongPress, now_ms)
                    .with_duration(held),
            );
        }
    }
}

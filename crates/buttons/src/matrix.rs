//! Matrix-Scan adapter: `N` independent buttons read as one bitmap per scan.
//!
//! Every poll scans all slots and runs the press/release/hold rules of
//! [`KeyGestures`] for each slot in ascending order, so simultaneous presses
//! are all reported, lowest slot first. The scanner is trusted to debounce.
//!
//! Events go to the installed callback when there is one, otherwise to an
//! internal queue drained with [`MatrixScan::next_event`].

use platform::ScanDriver;

use crate::classifier::{KeyGestures, Tracker};
use crate::config::ClickConfig;
use crate::event::{ButtonEvent, ButtonId};
use crate::queue::{EventQueue, DEFAULT_QUEUE_DEPTH};
use crate::sink::{CallbackSink, EventCallback, EventSink};

/// Gesture adapter for an `N`-slot key matrix.
pub struct MatrixScan<const N: usize, const Q: usize = DEFAULT_QUEUE_DEPTH> {
    rules: KeyGestures,
    trackers: [Tracker; N],
    callback: Option<EventCallback>,
    queue: EventQueue<Q>,
}

impl<const N: usize, const Q: usize> MatrixScan<N, Q> {
    /// Create an adapter with every slot released.
    pub fn new(source: &'static str, config: ClickConfig) -> Self {
        Self {
            rules: KeyGestures::new(source, config),
            trackers: [Tracker::new(); N],
            callback: None,
            queue: EventQueue::new(),
        }
    }

    /// Deliver events to `callback` instead of the internal queue.
    ///
    /// The callback also takes precedence over the sink handed to the
    /// [`run`](crate::run) loops.
    #[must_use]
    pub fn with_callback(mut self, callback: EventCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Scan once and deliver the resulting events.
    pub fn poll<D: ScanDriver<N> + ?Sized>(&mut self, scanner: &mut D, now_ms: u64) {
        let closed = scanner.scan();
        match self.callback {
            Some(callback) => self.update_into(&closed, now_ms, &mut CallbackSink(callback)),
            None => self.update(&closed, now_ms),
        }
    }

    /// Installed callback, if any.
    pub fn callback(&self) -> Option<EventCallback> {
        self.callback
    }

    /// Scan once and deliver events to `sink`, bypassing callback and queue.
    pub fn poll_into<D: ScanDriver<N> + ?Sized, S: EventSink + ?Sized>(
        &mut self,
        scanner: &mut D,
        now_ms: u64,
        sink: &mut S,
    ) {
        let closed = scanner.scan();
        self.update_into(&closed, now_ms, sink);
    }

    /// Feed an already-acquired bitmap, queueing the resulting events.
    pub fn update(&mut self, closed: &[bool; N], now_ms: u64) {
        step(&self.rules, &mut self.trackers, closed, now_ms, &mut self.queue);
    }

    fn update_into<S: EventSink + ?Sized>(&mut self, closed: &[bool; N], now_ms: u64, sink: &mut S) {
        step(&self.rules, &mut self.trackers, closed, now_ms, sink);
    }

    /// Next queued event, oldest first.
    pub fn next_event(&mut self) -> Option<ButtonEvent> {
        self.queue.pop()
    }

    /// `true` if `slot` is held. Out-of-range slots read as released.
    pub fn is_pressed(&self, slot: usize) -> bool {
        self.trackers.get(slot).is_some_and(Tracker::is_pressed)
    }

    /// `true` if any slot is held.
    pub fn is_any_pressed(&self) -> bool {
        self.trackers.iter().any(Tracker::is_pressed)
    }

    /// Held slots as a bitmask, bit `i` for slot `i`. Slots from 64 up are
    /// not represented.
    pub fn pressed_mask(&self) -> u64 {
        self.trackers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_pressed())
            .filter_map(|(slot, _)| u32::try_from(slot).ok().and_then(|s| 1u64.checked_shl(s)))
            .fold(0, |mask, bit| mask | bit)
    }

    /// Tracking record for `slot`.
    pub fn tracker(&self, slot: usize) -> Option<&Tracker> {
        self.trackers.get(slot)
    }

    /// Source tag on every event.
    pub fn source(&self) -> &'static str {
        self.rules.source()
    }

    /// Timing supplied at construction.
    pub fn config(&self) -> &ClickConfig {
        self.rules.config()
    }

    /// Events lost to queue overflow since construction.
    pub fn dropped_events(&self) -> u32 {
        self.queue.dropped()
    }

    /// Release every slot and clear the queue without emitting anything.
    pub fn reset(&mut self) {
        for tracker in &mut self.trackers {
            tracker.reset();
        }
        self.queue.clear();
    }

    /// Zero one slot's record. Out-of-range slots are ignored.
    pub fn reset_button(&mut self, slot: usize) {
        if let Some(tracker) = self.trackers.get_mut(slot) {
            tracker.reset();
        }
    }
}

fn step<const N: usize, S: EventSink + ?Sized>(
    rules: &KeyGestures,
    trackers: &mut [Tracker; N],
    closed: &[bool; N],
    now_ms: u64,
    sink: &mut S,
) {
    for (slot, (tracker, &down)) in trackers.iter_mut().zip(closed).enumerate() {
        let Ok(button) = ButtonId::try_from(slot) else {
            break;
        };
        match (tracker.is_pressed(), down) {
            (false, true) => rules.press(tracker, button, now_ms, sink),
            (true, false) => rules.release(tracker, button, now_ms, sink),
            _ => {}
        }
        if down {
            rules.hold(tracker, button, now_ms, sink);
        }
    }
}

//! Ladder-Decode adapter: several buttons on one resistor-ladder ADC input.
//!
//! Each button pulls the shared channel to a distinct voltage. A sample is
//! decoded against the configured table:
//!
//! 1. within `±tolerance` of the reference value, or above it (saturation):
//!    no button;
//! 2. otherwise the first `{min, max}` range containing the sample, in
//!    declaration order;
//! 3. otherwise unrecognized, and the sample is ignored.
//!
//! Only one button can be read through a single channel, so the adapter
//! tracks at most one active button. Reference → button is a press of the
//! decoded button; button → reference releases it. A poll enqueues 0, 1 or 2
//! events (press, or click/double-click followed by release, plus a possible
//! long press) which the caller drains with [`LadderDecode::next_event`].
//!
//! # Range validation
//!
//! [`LadderConfig::new`] rejects tables that cannot decode unambiguously:
//! inverted, overlapping or duplicate ranges, and ranges hidden inside the
//! reference band.

use heapless::Vec;
use platform::AdcDriver;

use crate::classifier::{KeyGestures, Tracker};
use crate::config::ClickConfig;
use crate::error::ConfigError;
use crate::event::{ButtonEvent, ButtonId};
use crate::queue::{EventQueue, DEFAULT_QUEUE_DEPTH};
use crate::sink::EventSink;

/// Default reference (no button) reading: full scale of a 12-bit ADC.
pub const DEFAULT_REFERENCE: u16 = 4095;
/// Default tolerance around the reference reading, in ADC codes.
pub const DEFAULT_TOLERANCE: u16 = 200;

/// One button's band of ADC codes, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LadderRange {
    /// Button reported when a sample falls in the band.
    pub button: ButtonId,
    /// Lowest code of the band.
    pub min: u16,
    /// Highest code of the band.
    pub max: u16,
}

impl LadderRange {
    /// Band `min..=max` for `button`.
    pub const fn new(button: ButtonId, min: u16, max: u16) -> Self {
        Self { button, min, max }
    }

    /// `true` if `raw` is inside the band.
    pub fn contains(&self, raw: u16) -> bool {
        (self.min..=self.max).contains(&raw)
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// Result of decoding one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded {
    /// No button pressed.
    Reference,
    /// Sample falls in this button's range.
    Button(ButtonId),
    /// Neither reference nor any configured range.
    Unrecognized,
}

/// Validated range table plus timing, for up to `R` buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderConfig<const R: usize> {
    ranges: Vec<LadderRange, R>,
    reference: u16,
    tolerance: u16,
    timing: ClickConfig,
}

impl<const R: usize> LadderConfig<R> {
    /// Validate `ranges` against the default reference and tolerance.
    ///
    /// # Errors
    ///
    /// See [`LadderConfig::with_reference`].
    pub fn new(ranges: &[LadderRange]) -> Result<Self, ConfigError> {
        Self::with_reference(ranges, DEFAULT_REFERENCE, DEFAULT_TOLERANCE)
    }

    /// Validate `ranges` against an explicit reference value and tolerance.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::TooManyRanges`] if more than `R` ranges are given.
    /// - [`ConfigError::InvertedRange`] if a range has `min > max`.
    /// - [`ConfigError::DuplicateButton`] if an id is declared twice.
    /// - [`ConfigError::OverlappingRanges`] if two ranges share a code.
    /// - [`ConfigError::ShadowedByReference`] if a range lies entirely inside
    ///   the reference band, where it could never be decoded.
    pub fn with_reference(
        ranges: &[LadderRange],
        reference: u16,
        tolerance: u16,
    ) -> Result<Self, ConfigError> {
        let mut table: Vec<LadderRange, R> = Vec::new();
        let band_low = reference.saturating_sub(tolerance);
        for range in ranges {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange { button: range.button });
            }
            if range.min >= band_low {
                return Err(ConfigError::ShadowedByReference { button: range.button });
            }
            for earlier in &table {
                if earlier.button == range.button {
                    return Err(ConfigError::DuplicateButton { button: range.button });
                }
                if earlier.overlaps(range) {
                    return Err(ConfigError::OverlappingRanges {
                        first: earlier.button,
                        second: range.button,
                    });
                }
            }
            table
                .push(*range)
                .map_err(|_| ConfigError::TooManyRanges { capacity: R })?;
        }
        Ok(Self {
            ranges: table,
            reference,
            tolerance,
            timing: ClickConfig::default(),
        })
    }

    /// Replace the click/long-press timing.
    #[must_use]
    pub fn timing(mut self, timing: ClickConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Ranges in declaration order.
    pub fn ranges(&self) -> &[LadderRange] {
        &self.ranges
    }

    /// Reference (no button) reading.
    pub fn reference(&self) -> u16 {
        self.reference
    }

    /// Tolerance around the reference, in codes.
    pub fn tolerance(&self) -> u16 {
        self.tolerance
    }

    /// Click and long-press timing.
    pub fn click_config(&self) -> &ClickConfig {
        &self.timing
    }

    /// Classify one raw sample.
    pub fn decode(&self, raw: u16) -> Decoded {
        if raw > self.reference || raw.abs_diff(self.reference) <= self.tolerance {
            return Decoded::Reference;
        }
        self.ranges
            .iter()
            .find(|r| r.contains(raw))
            .map_or(Decoded::Unrecognized, |r| Decoded::Button(r.button))
    }

    fn slot_of(&self, button: ButtonId) -> Option<usize> {
        self.ranges.iter().position(|r| r.button == button)
    }
}

/// Gesture adapter for a resistor-ladder ADC channel.
///
/// `R` bounds the number of configured buttons, `Q` the events queued per
/// poll cycle.
pub struct LadderDecode<const R: usize, const Q: usize = DEFAULT_QUEUE_DEPTH> {
    config: LadderConfig<R>,
    rules: KeyGestures,
    trackers: [Tracker; R],
    active: Option<ButtonId>,
    queue: EventQueue<Q>,
}

impl<const R: usize, const Q: usize> LadderDecode<R, Q> {
    /// Create an adapter with every button released.
    pub fn new(source: &'static str, config: LadderConfig<R>) -> Self {
        let rules = KeyGestures::new(source, config.timing);
        Self {
            config,
            rules,
            trackers: [Tracker::new(); R],
            active: None,
            queue: EventQueue::new(),
        }
    }

    /// Read one sample from `adc` and queue the resulting events.
    pub fn poll<A: AdcDriver + ?Sized>(&mut self, adc: &mut A, now_ms: u64) {
        let raw = adc.read();
        self.update(raw, now_ms);
    }

    /// Read one sample and deliver events straight to `sink`, bypassing the
    /// internal queue.
    pub fn poll_into<A: AdcDriver + ?Sized, S: EventSink + ?Sized>(
        &mut self,
        adc: &mut A,
        now_ms: u64,
        sink: &mut S,
    ) {
        let raw = adc.read();
        step(
            &self.config,
            &self.rules,
            &mut self.trackers,
            &mut self.active,
            raw,
            now_ms,
            sink,
        );
    }

    /// Feed an already-acquired sample.
    pub fn update(&mut self, raw: u16, now_ms: u64) {
        step(
            &self.config,
            &self.rules,
            &mut self.trackers,
            &mut self.active,
            raw,
            now_ms,
            &mut self.queue,
        );
    }

    /// Next queued event, oldest first.
    pub fn next_event(&mut self) -> Option<ButtonEvent> {
        self.queue.pop()
    }

    /// Currently tracked button.
    pub fn active_button(&self) -> Option<ButtonId> {
        self.active
    }

    /// `true` if `button` is the tracked, pressed button.
    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.tracker(button).is_some_and(Tracker::is_pressed)
    }

    /// `true` if any button is down.
    pub fn is_any_pressed(&self) -> bool {
        self.active.is_some()
    }

    /// Tracking record for `button`, if configured.
    pub fn tracker(&self, button: ButtonId) -> Option<&Tracker> {
        self.config
            .slot_of(button)
            .and_then(|slot| self.trackers.get(slot))
    }

    /// Configuration supplied at construction.
    pub fn config(&self) -> &LadderConfig<R> {
        &self.config
    }

    /// Events lost to queue overflow since construction.
    pub fn dropped_events(&self) -> u32 {
        self.queue.dropped()
    }

    /// Release every button and clear the queue without emitting anything.
    pub fn reset(&mut self) {
        for tracker in &mut self.trackers {
            tracker.reset();
        }
        self.active = None;
        self.queue.clear();
    }

    /// Zero one button's record. Unknown ids are ignored.
    pub fn reset_button(&mut self, button: ButtonId) {
        let Some(tracker) = self
            .config
            .slot_of(button)
            .and_then(|slot| self.trackers.get_mut(slot))
        else {
            return;
        };
        tracker.reset();
        if self.active == Some(button) {
            self.active = None;
        }
    }
}

fn step<const R: usize, S: EventSink + ?Sized>(
    config: &LadderConfig<R>,
    rules: &KeyGestures,
    trackers: &mut [Tracker; R],
    active: &mut Option<ButtonId>,
    raw: u16,
    now_ms: u64,
    sink: &mut S,
) {
    match (config.decode(raw), *active) {
        (Decoded::Button(button), None) => {
            if let Some(tracker) = config.slot_of(button).and_then(|s| trackers.get_mut(s)) {
                rules.press(tracker, button, now_ms, sink);
                *active = Some(button);
            }
        }
        (Decoded::Reference, Some(button)) => {
            if let Some(tracker) = config.slot_of(button).and_then(|s| trackers.get_mut(s)) {
                rules.release(tracker, button, now_ms, sink);
            }
            *active = None;
        }
        (Decoded::Unrecognized, _) => {
            #[cfg(feature = "defmt")]
            defmt::trace!("{=str} ignoring unrecognized sample {=u16}", rules.source(), raw);
        }
        // Reference while idle, or a button reading while another is tracked.
        _ => {}
    }

    if let Some(button) = *active {
        if let Some(tracker) = config.slot_of(button).and_then(|s| trackers.get_mut(s)) {
            rules.hold(tracker, button, now_ms, sink);
        }
    }
}

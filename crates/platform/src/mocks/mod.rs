//! Mock implementations for testing
//!
//! Scripted drivers replay a fixed sample sequence, one sample per read, and
//! repeat the last sample once the script is exhausted (a button left in its
//! final state). [`MockClock`] and [`MockDelay`] share a time base so a
//! blocking run loop can be driven without real time passing.

#![cfg(any(test, feature = "std"))]

use core::cell::Cell;

use embedded_hal::delay::DelayNs;

use crate::{AdcDriver, Clock, LineDriver, ScanDriver};

/// Replays a script of line levels.
pub struct ScriptedLine<'a> {
    script: &'a [bool],
    cursor: usize,
    reads: usize,
}

impl<'a> ScriptedLine<'a> {
    /// Create a line that replays `script`.
    pub fn new(script: &'a [bool]) -> Self {
        Self {
            script,
            cursor: 0,
            reads: 0,
        }
    }

    /// Number of reads performed so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl LineDriver for ScriptedLine<'_> {
    fn read(&mut self) -> bool {
        self.reads = self.reads.saturating_add(1);
        next_sample(self.script, &mut self.cursor).unwrap_or(false)
    }
}

/// Replays a script of raw ADC conversions.
pub struct ScriptedAdc<'a> {
    script: &'a [u16],
    cursor: usize,
    idle: u16,
}

impl<'a> ScriptedAdc<'a> {
    /// Create an ADC that replays `script`; an empty script reads `idle`.
    pub fn new(script: &'a [u16], idle: u16) -> Self {
        Self {
            script,
            cursor: 0,
            idle,
        }
    }
}

impl AdcDriver for ScriptedAdc<'_> {
    fn read(&mut self) -> u16 {
        next_sample(self.script, &mut self.cursor).unwrap_or(self.idle)
    }
}

/// Replays a script of matrix bitmaps.
pub struct ScriptedMatrix<'a, const N: usize> {
    script: &'a [[bool; N]],
    cursor: usize,
    scans: usize,
}

impl<'a, const N: usize> ScriptedMatrix<'a, N> {
    /// Create a matrix that replays `script`.
    pub fn new(script: &'a [[bool; N]]) -> Self {
        Self {
            script,
            cursor: 0,
            scans: 0,
        }
    }

    /// Number of scans performed so far.
    pub fn scans(&self) -> usize {
        self.scans
    }
}

impl<const N: usize> ScanDriver<N> for ScriptedMatrix<'_, N> {
    fn scan(&mut self) -> [bool; N] {
        self.scans = self.scans.saturating_add(1);
        next_sample(self.script, &mut self.cursor).unwrap_or([false; N])
    }
}

fn next_sample<T: Copy>(script: &[T], cursor: &mut usize) -> Option<T> {
    let sample = script.get(*cursor).or_else(|| script.last()).copied();
    if *cursor < script.len() {
        *cursor = cursor.saturating_add(1);
    }
    sample
}

/// Manually advanced clock.
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<u64>,
}

impl MockClock {
    /// Create a clock reading `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    /// Move the clock forward.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Delay that advances a [`MockClock`] instead of sleeping.
pub struct MockDelay<'a> {
    clock: &'a MockClock,
    total_ns: u64,
}

impl<'a> MockDelay<'a> {
    /// Create a delay that drives `clock`.
    pub fn new(clock: &'a MockClock) -> Self {
        Self { clock, total_ns: 0 }
    }

    /// Total delayed time in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        let before = self.total_ms();
        self.total_ns = self.total_ns.saturating_add(u64::from(ns));
        self.clock.advance(self.total_ms().saturating_sub(before));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_line_repeats_last_level() {
        let mut line = ScriptedLine::new(&[false, true]);
        assert!(!line.read());
        assert!(line.read());
        assert!(line.read());
        assert_eq!(line.reads(), 3);
    }

    #[test]
    fn empty_scripts_read_idle() {
        let mut line = ScriptedLine::new(&[]);
        assert!(!line.read());

        let mut adc = ScriptedAdc::new(&[], 4095);
        assert_eq!(adc.read(), 4095);

        let mut matrix: ScriptedMatrix<'_, 2> = ScriptedMatrix::new(&[]);
        assert_eq!(matrix.scan(), [false, false]);
    }

    #[test]
    fn scripted_adc_replays_in_order() {
        let mut adc = ScriptedAdc::new(&[300, 4095], 4095);
        assert_eq!(adc.read(), 300);
        assert_eq!(adc.read(), 4095);
        assert_eq!(adc.read(), 4095);
    }

    #[test]
    fn scripted_matrix_counts_scans() {
        let mut matrix = ScriptedMatrix::new(&[[true, false], [true, true]]);
        assert_eq!(matrix.scan(), [true, false]);
        assert_eq!(matrix.scan(), [true, true]);
        assert_eq!(matrix.scans(), 2);
    }

    #[test]
    fn mock_delay_advances_clock() {
        let clock = MockClock::new(100);
        let mut delay = MockDelay::new(&clock);

        delay.delay_ms(10);
        assert_eq!(clock.now_ms(), 110);

        // Sub-millisecond delays accumulate until a full millisecond passes.
        delay.delay_us(600);
        assert_eq!(clock.now_ms(), 110);
        delay.delay_us(600);
        assert_eq!(clock.now_ms(), 111);
        assert_eq!(delay.total_ms(), 11);
    }

    #[test]
    fn mock_clock_set_and_advance() {
        let clock = MockClock::default();
        clock.set(50);
        clock.advance(25);
        assert_eq!(clock.now_ms(), 75);
    }
}

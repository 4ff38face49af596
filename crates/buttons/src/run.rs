//! Fixed-interval poll loops.
//!
//! Every adapter expects to be polled on a steady cadence (10–20 ms is
//! typical). These helpers own that cadence: read the clock, poll once,
//! deliver events to a sink, wait, repeat. A matrix with a callback
//! installed keeps delivering to its callback. The only way out is the `stop`
//! flag, checked once per iteration before polling.
//!
//! [`run_blocking`] waits through an `embedded-hal` [`DelayNs`]; [`run`] is
//! the async variant for an embassy task and awaits an `embassy-time`
//! [`Timer`] between polls.
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn buttons_task(mut matrix: MatrixScan<4>, mut keys: KeyScanner, tx: Sender<'static, M, ButtonEvent, 8>) {
//!     let mut tx = tx;
//!     run(&mut matrix, &mut keys, &EmbassyClock, 10, &STOP, &mut tx).await;
//! }
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_time::Timer;
use embedded_hal::delay::DelayNs;
use platform::{AdcDriver, Clock, LineDriver, ScanDriver};

use crate::ladder::LadderDecode;
use crate::matrix::MatrixScan;
use crate::single_line::SingleLine;
use crate::sink::{CallbackSink, EventSink};

/// An adapter that can be polled against driver `D` into any sink.
pub trait PollAdapter<D: ?Sized> {
    /// Take one sample from `driver` and deliver the resulting events.
    fn poll_into<S: EventSink + ?Sized>(&mut self, driver: &mut D, now_ms: u64, sink: &mut S);
}

impl<L: LineDriver + ?Sized> PollAdapter<L> for SingleLine {
    fn poll_into<S: EventSink + ?Sized>(&mut self, driver: &mut L, now_ms: u64, sink: &mut S) {
        if let Some(event) = self.poll(driver, now_ms) {
            sink.emit(event);
        }
    }
}

impl<A: AdcDriver + ?Sized, const R: usize, const Q: usize> PollAdapter<A> for LadderDecode<R, Q> {
    fn poll_into<S: EventSink + ?Sized>(&mut self, driver: &mut A, now_ms: u64, sink: &mut S) {
        LadderDecode::poll_into(self, driver, now_ms, sink);
    }
}

impl<D: ScanDriver<N> + ?Sized, const N: usize, const Q: usize> PollAdapter<D> for MatrixScan<N, Q> {
    fn poll_into<S: EventSink + ?Sized>(&mut self, driver: &mut D, now_ms: u64, sink: &mut S) {
        match self.callback() {
            Some(callback) => {
                MatrixScan::poll_into(self, driver, now_ms, &mut CallbackSink(callback));
            }
            None => MatrixScan::poll_into(self, driver, now_ms, sink),
        }
    }
}

/// Poll `adapter` every `interval_ms` until `stop` is set, blocking in
/// `delay` between polls.
///
/// Returns the number of completed polls.
pub fn run_blocking<A, D, C, W, S>(
    adapter: &mut A,
    driver: &mut D,
    clock: &C,
    delay: &mut W,
    interval_ms: u32,
    stop: &AtomicBool,
    sink: &mut S,
) -> u32
where
    A: PollAdapter<D>,
    D: ?Sized,
    C: Clock + ?Sized,
    W: DelayNs,
    S: EventSink + ?Sized,
{
    let mut polls: u32 = 0;
    while !stop.load(Ordering::Acquire) {
        adapter.poll_into(driver, clock.now_ms(), sink);
        polls = polls.saturating_add(1);
        delay.delay_ms(interval_ms);
    }
    #[cfg(feature = "defmt")]
    defmt::debug!("poll loop stopped after {=u32} polls", polls);
    polls
}

/// Async [`run_blocking`]: awaits a [`Timer`] between polls.
pub async fn run<A, D, C, S>(
    adapter: &mut A,
    driver: &mut D,
    clock: &C,
    interval_ms: u32,
    stop: &AtomicBool,
    sink: &mut S,
) -> u32
where
    A: PollAdapter<D>,
    D: ?Sized,
    C: Clock + ?Sized,
    S: EventSink + ?Sized,
{
    let mut polls: u32 = 0;
    while !stop.load(Ordering::Acquire) {
        adapter.poll_into(driver, clock.now_ms(), sink);
        polls = polls.saturating_add(1);
        Timer::after_millis(u64::from(interval_ms)).await;
    }
    #[cfg(feature = "defmt")]
    defmt::debug!("poll loop stopped after {=u32} polls", polls);
    polls
}

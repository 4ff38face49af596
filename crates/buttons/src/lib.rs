//! Button gesture front end.
//!
//! Turns raw button samples into semantic events (press, release, click,
//! double click, long press) for three acquisition strategies:
//!
//! - [`SingleLine`] - one button on a dedicated digital line, with software
//!   debounce and deferred double-click detection
//! - [`LadderDecode`] - several buttons on one resistor-ladder ADC channel
//! - [`MatrixScan`] - `N` buttons read as one bitmap per scan
//!
//! All three share [`classifier::Tracker`] for hold timing, click grouping and
//! the once-per-hold long press, and emit the same [`ButtonEvent`] record.
//!
//! # Architecture
//!
//! ```text
//! driver (platform::LineDriver / AdcDriver / ScanDriver)
//!         ↓ raw sample per poll
//! adapter (SingleLine / LadderDecode / MatrixScan)
//!         ↓ ButtonEvent
//! sink (EventQueue, heapless::Vec, embassy Sender, callback)
//! ```
//!
//! Adapters never read the clock or sleep themselves: the caller passes
//! `now_ms` to every `poll`, or hands the cadence to [`run::run`] /
//! [`run::run_blocking`].
//!
//! # Example
//!
//! ```
//! use buttons::{ButtonAction, LadderConfig, LadderDecode, LadderRange};
//! use platform::FnAdc;
//!
//! let config: LadderConfig<2> = LadderConfig::new(&[
//!     LadderRange::new(0, 200, 400),
//!     LadderRange::new(1, 1000, 1400),
//! ])?;
//! let mut ladder: LadderDecode<2> = LadderDecode::new("volume", config);
//!
//! let mut samples = [300_u16, 4095].into_iter();
//! let mut adc = FnAdc(move || samples.next().unwrap_or(4095));
//!
//! ladder.poll(&mut adc, 100);
//! assert_eq!(ladder.next_event().map(|e| e.action), Some(ButtonAction::Press));
//!
//! ladder.poll(&mut adc, 200);
//! assert_eq!(ladder.next_event().map(|e| e.action), Some(ButtonAction::Click));
//! assert_eq!(ladder.next_event().map(|e| e.action), Some(ButtonAction::Release));
//! # Ok::<(), buttons::ConfigError>(())
//! ```
//!
//! # Features
//!
//! - `std`: `std::error::Error` for [`ConfigError`], host mocks in `platform`
//! - `defmt`: `defmt::Format` derives and transition logging

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod classifier;
pub mod config;
pub mod error;
pub mod event;
pub mod ladder;
pub mod matrix;
pub mod queue;
pub mod run;
pub mod single_line;
pub mod sink;

pub use classifier::{KeyGestures, Released, Tracker};
pub use config::{ClickConfig, LineConfig};
pub use error::ConfigError;
pub use event::{ButtonAction, ButtonEvent, ButtonId};
pub use ladder::{Decoded, LadderConfig, LadderDecode, LadderRange};
pub use matrix::MatrixScan;
pub use queue::{EventQueue, DEFAULT_QUEUE_DEPTH};
pub use run::{run, run_blocking, PollAdapter};
pub use single_line::{LineState, SingleLine};
pub use sink::{CallbackSink, EventCallback, EventSink};

//! Driver capabilities for button acquisition.
//!
//! This crate defines the narrow, synchronous interfaces the gesture front end
//! reads raw samples through, plus bridges from the embedded ecosystem onto
//! them. The drivers themselves (pin setup, ADC channel configuration, matrix
//! row strobing) live in the firmware; this crate only names what a driver must
//! be able to do once it is initialised.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (event aggregator)
//!         ↓
//! Gesture Layer (buttons crate: classifier + adapters)
//!         ↓
//! Capability Layer (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (embedded-hal pins, ADC, scan drivers)
//! ```
//!
//! # Capabilities
//!
//! - [`LineDriver`] - one dedicated digital input line
//! - [`AdcDriver`] - one resistor-ladder ADC channel
//! - [`ScanDriver`] - a key matrix scanned into a bitmap
//! - [`Clock`] - monotonic millisecond clock
//!
//! # Features
//!
//! - `std`: expose [`mocks`] outside of unit tests (for host tooling)
//! - `defmt`: derive `defmt::Format` on public types
//!
//! # Example
//!
//! ```no_run
//! use platform::{Clock, LineDriver};
//!
//! fn sample<L: LineDriver, C: Clock>(line: &mut L, clock: &C) -> (u64, bool) {
//!     (clock.now_ms(), line.read())
//! }
//! ```

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
#![allow(clippy::must_use_candidate)] // driver accessors: callers decide
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod gpio;
pub mod input;
pub mod mocks;

pub use clock::{Clock, EmbassyClock};
pub use gpio::{DigitalLine, Polarity};
pub use input::{AdcDriver, FnAdc, FnLine, FnScan, LineDriver, ScanDriver};

//! embedded-hal pin bridge
//!
//! Wraps any initialised [`embedded_hal::digital::InputPin`] as a
//! [`LineDriver`], translating the electrical level into "contact closed".

use embedded_hal::digital::InputPin;

use crate::input::LineDriver;

/// Electrical level that means "button down".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pressed pulls the line low (internal pull-up, switch to ground).
    #[default]
    ActiveLow,
    /// Pressed drives the line high (pull-down, switch to supply).
    ActiveHigh,
}

/// A digital input pin used as a single button line.
///
/// Pin configuration (pull resistors, input mode) is the caller's job; this
/// type only samples.
pub struct DigitalLine<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: InputPin> DigitalLine<P> {
    /// Wrap `pin` with the default active-low polarity.
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, Polarity::ActiveLow)
    }

    /// Wrap `pin` with an explicit polarity.
    pub fn with_polarity(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Configured polarity.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> LineDriver for DigitalLine<P> {
    /// A failed pin read reads as released.
    fn read(&mut self) -> bool {
        let level = match self.polarity {
            Polarity::ActiveLow => self.pin.is_low(),
            Polarity::ActiveHigh => self.pin.is_high(),
        };
        match level {
            Ok(pressed) => pressed,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("button line read failed, treating as released");
                false
            }
        }
    }
}

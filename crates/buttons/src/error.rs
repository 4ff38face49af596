//! Configuration errors.
//!
//! Nothing fails at poll time: malformed samples decode to "no button" and
//! queue overflow drops silently. The only rejectable input is a ladder range
//! table that cannot decode unambiguously, caught when the config is built.

use crate::event::ButtonId;

/// Reasons a ladder range table is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More ranges than the adapter has room for.
    TooManyRanges {
        /// Fixed capacity of the range table.
        capacity: usize,
    },
    /// A range with `min > max`.
    InvertedRange {
        /// Button the range belongs to.
        button: ButtonId,
    },
    /// Two ranges share at least one code.
    OverlappingRanges {
        /// Button declared first.
        first: ButtonId,
        /// Button declared second.
        second: ButtonId,
    },
    /// A range lies inside the reference band and could never decode.
    ShadowedByReference {
        /// Button the range belongs to.
        button: ButtonId,
    },
    /// The same button id appears in two ranges.
    DuplicateButton {
        /// Repeated id.
        button: ButtonId,
    },
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooManyRanges { capacity } => {
                write!(f, "ladder range table holds at most {capacity} ranges")
            }
            Self::InvertedRange { button } => {
                write!(f, "range for button {button} has min above max")
            }
            Self::OverlappingRanges { first, second } => {
                write!(f, "ranges for buttons {first} and {second} overlap")
            }
            Self::ShadowedByReference { button } => {
                write!(f, "range for button {button} falls inside the reference band")
            }
            Self::DuplicateButton { button } => {
                write!(f, "button {button} declared in more than one range")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_buttons() {
        let e = ConfigError::OverlappingRanges { first: 1, second: 2 };
        assert_eq!(e.to_string(), "ranges for buttons 1 and 2 overlap");

        let e = ConfigError::TooManyRanges { capacity: 4 };
        assert_eq!(e.to_string(), "ladder range table holds at most 4 ranges");
    }
}

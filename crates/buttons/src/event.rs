//! Semantic gesture events.
//!
//! Every adapter emits the same [`ButtonEvent`] record so the application's
//! event aggregator can treat all acquisition strategies uniformly.

/// Button identifier within one adapter.
///
/// Ladder-Decode uses the configured range id; Matrix-Scan uses the slot index.
pub type ButtonId = u8;

/// What happened to the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Contact confirmed closed.
    Press,
    /// Contact opened. `duration_ms` is the hold time.
    Release,
    /// A single click. `click_count` is 1 (or the running count on adapters
    /// without double-click grouping).
    Click,
    /// A second (or later) click within the grouping window.
    DoubleClick,
    /// The button has been held for at least the long-press threshold.
    LongPress,
}

impl ButtonAction {
    /// Short lowercase name, stable for logs and trace output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Release => "release",
            Self::Click => "click",
            Self::DoubleClick => "double_click",
            Self::LongPress => "long_press",
        }
    }
}

impl core::fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    /// Name of the adapter instance that produced the event.
    pub source: &'static str,
    /// Button within the adapter; `None` for a Single-Line adapter.
    pub button: Option<ButtonId>,
    /// Event kind.
    pub action: ButtonAction,
    /// Clock reading the event refers to.
    pub timestamp_ms: u64,
    /// Click count; meaningful for click and double click, otherwise 1.
    pub click_count: u8,
    /// Hold time; meaningful for release and long press, otherwise 0.
    pub duration_ms: u32,
}

impl ButtonEvent {
    /// Event with default `click_count` (1) and `duration_ms` (0).
    pub const fn new(
        source: &'static str,
        button: Option<ButtonId>,
        action: ButtonAction,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            source,
            button,
            action,
            timestamp_ms,
            click_count: 1,
            duration_ms: 0,
        }
    }

    /// Set the click count.
    #[must_use]
    pub const fn with_clicks(mut self, click_count: u8) -> Self {
        self.click_count = click_count;
        self
    }

    /// Set the hold duration.
    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// `true` for the click-type actions (`Click`, `DoubleClick`).
    pub const fn is_click(&self) -> bool {
        matches!(self.action, ButtonAction::Click | ButtonAction::DoubleClick)
    }
}

impl core::fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{}ms {}", self.source, self.timestamp_ms, self.action)?;
        if let Some(id) = self.button {
            write!(f, " button={id}")?;
        }
        match self.action {
            ButtonAction::Click | ButtonAction::DoubleClick => {
                write!(f, " clicks={} held={}ms", self.click_count, self.duration_ms)
            }
            ButtonAction::Release | ButtonAction::LongPress => {
                write!(f, " held={}ms", self.duration_ms)
            }
            ButtonAction::Press => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_has_default_count_and_duration() {
        let ev = ButtonEvent::new("line", None, ButtonAction::Press, 15);
        assert_eq!(ev.click_count, 1);
        assert_eq!(ev.duration_ms, 0);
        assert!(!ev.is_click());
    }

    #[test]
    fn builders_override_defaults() {
        let ev = ButtonEvent::new("ladder", Some(3), ButtonAction::DoubleClick, 200)
            .with_clicks(2)
            .with_duration(80);
        assert_eq!(ev.click_count, 2);
        assert_eq!(ev.duration_ms, 80);
        assert!(ev.is_click());
    }

    #[test]
    fn display_includes_button_and_hold() {
        let ev = ButtonEvent::new("matrix", Some(1), ButtonAction::Release, 60).with_duration(10);
        assert_eq!(ev.to_string(), "matrix@60ms release button=1 held=10ms");

        let press = ButtonEvent::new("line", None, ButtonAction::Press, 15);
        assert_eq!(press.to_string(), "line@15ms press");
    }

    #[test]
    fn action_names_are_snake_case() {
        assert_eq!(ButtonAction::DoubleClick.as_str(), "double_click");
        assert_eq!(ButtonAction::LongPress.to_string(), "long_press");
    }
}

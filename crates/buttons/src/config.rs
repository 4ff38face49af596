//! Adapter timing configuration.
//!
//! Configuration is supplied at construction and never changes for the
//! adapter's lifetime. Start from [`Default`] and chain the `#[must_use]`
//! setters.
//!
//! ```
//! use buttons::config::{ClickConfig, LineConfig};
//!
//! let line = LineConfig::default().debounce_ms(10).detect_double_click(false);
//! assert_eq!(line.debounce_ms, 10);
//!
//! let keys = ClickConfig::default().long_press_ms(600);
//! assert_eq!(keys.click_gap_ms, 200);
//! ```

/// Default debounce for a single digital line.
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;
/// Default hold time before a long press fires.
pub const DEFAULT_LONG_PRESS_MS: u32 = 1000;
/// Default double-click window for a single digital line.
pub const DEFAULT_DOUBLE_CLICK_MS: u32 = 300;
/// Default gap between releases that still groups clicks (ladder, matrix).
pub const DEFAULT_CLICK_GAP_MS: u32 = 200;

/// Single-Line adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineConfig {
    /// Time the line must stay closed before a press is confirmed.
    pub debounce_ms: u32,
    /// Hold time before a long press fires.
    pub long_press_ms: u32,
    /// Window after a release during which a second click becomes a double click.
    pub double_click_ms: u32,
    /// Emit click events at all.
    pub detect_clicks: bool,
    /// Hold clicks back to detect double clicks.
    pub detect_double_click: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
            detect_clicks: true,
            detect_double_click: true,
        }
    }
}

impl LineConfig {
    /// Set the debounce time in milliseconds.
    #[must_use]
    pub fn debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the long-press threshold in milliseconds.
    #[must_use]
    pub fn long_press_ms(mut self, ms: u32) -> Self {
        self.long_press_ms = ms;
        self
    }

    /// Set the double-click window in milliseconds.
    #[must_use]
    pub fn double_click_ms(mut self, ms: u32) -> Self {
        self.double_click_ms = ms;
        self
    }

    /// Enable or disable click events.
    #[must_use]
    pub fn detect_clicks(mut self, enabled: bool) -> Self {
        self.detect_clicks = enabled;
        self
    }

    /// Enable or disable double-click grouping.
    #[must_use]
    pub fn detect_double_click(mut self, enabled: bool) -> Self {
        self.detect_double_click = enabled;
        self
    }
}

/// Click grouping and long-press timing for Ladder-Decode and Matrix-Scan.
///
/// These adapters trust the driver's scan cadence, so there is no debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickConfig {
    /// Hold time before a long press fires.
    pub long_press_ms: u32,
    /// Maximum time between releases for clicks to group.
    pub click_gap_ms: u32,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            click_gap_ms: DEFAULT_CLICK_GAP_MS,
        }
    }
}

impl ClickConfig {
    /// Set the long-press threshold in milliseconds.
    #[must_use]
    pub fn long_press_ms(mut self, ms: u32) -> Self {
        self.long_press_ms = ms;
        self
    }

    /// Set the click grouping gap in milliseconds.
    #[must_use]
    pub fn click_gap_ms(mut self, ms: u32) -> Self {
        self.click_gap_ms = ms;
        self
    }
}

//! Replay a recorded sample trace through one of the adapters.
//!
//! Trace format, one sample per line:
//!
//! ```text
//! # t_ms,value[,value…]
//! 0,0
//! 15,1
//! 100,0
//! ```
//!
//! - `line`: one column, non-zero means closed
//! - `ladder`: one column, the raw ADC code
//! - `matrix`: one column per slot (up to [`MATRIX_SLOTS`]), non-zero means closed
//!
//! Blank lines, `#` comments and a leading header row are skipped.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use buttons::config::{
    DEFAULT_CLICK_GAP_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_DOUBLE_CLICK_MS, DEFAULT_LONG_PRESS_MS,
};
use buttons::ladder::{DEFAULT_REFERENCE, DEFAULT_TOLERANCE};
use buttons::{
    ButtonAction, ButtonEvent, ClickConfig, LadderConfig, LadderDecode, LadderRange, LineConfig,
    MatrixScan, SingleLine,
};
use clap::{Args, ValueEnum};
use colored::Colorize;

/// Widest matrix a trace may describe.
pub const MATRIX_SLOTS: usize = 16;
/// Most ladder ranges accepted on the command line.
const LADDER_RANGES: usize = 16;
/// Replay queue depth; generous so a dense trace never drops.
const REPLAY_QUEUE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AdapterKind {
    /// Single digital line with software debounce
    Line,
    /// Resistor ladder on one ADC channel
    Ladder,
    /// Key matrix bitmap
    Matrix,
}

impl AdapterKind {
    fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Ladder => "ladder",
            Self::Matrix => "matrix",
        }
    }
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// CSV trace file
    pub trace: PathBuf,
    /// Adapter to feed the trace through
    #[arg(long, value_enum, default_value_t = AdapterKind::Line)]
    pub adapter: AdapterKind,
    /// Ladder range as `id:min:max` (repeatable)
    #[arg(long = "range", value_parser = parse_range)]
    pub ranges: Vec<LadderRange>,
    /// Ladder reference (no button) reading
    #[arg(long, default_value_t = DEFAULT_REFERENCE)]
    pub reference: u16,
    /// Ladder tolerance around the reference
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u16,
    /// Single-line debounce time
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u32,
    /// Hold time before a long press
    #[arg(long, default_value_t = DEFAULT_LONG_PRESS_MS)]
    pub long_press_ms: u32,
    /// Single-line double-click window
    #[arg(long, default_value_t = DEFAULT_DOUBLE_CLICK_MS)]
    pub double_click_ms: u32,
    /// Ladder/matrix click grouping gap
    #[arg(long, default_value_t = DEFAULT_CLICK_GAP_MS)]
    pub click_gap_ms: u32,
    /// Single line: report plain releases instead of clicks
    #[arg(long)]
    pub no_clicks: bool,
    /// Single line: report every click immediately
    #[arg(long)]
    pub no_double_click: bool,
}

impl ReplayArgs {
    fn line_config(&self) -> LineConfig {
        LineConfig::default()
            .debounce_ms(self.debounce_ms)
            .long_press_ms(self.long_press_ms)
            .double_click_ms(self.double_click_ms)
            .detect_clicks(!self.no_clicks)
            .detect_double_click(!self.no_double_click)
    }

    fn click_config(&self) -> ClickConfig {
        ClickConfig::default()
            .long_press_ms(self.long_press_ms)
            .click_gap_ms(self.click_gap_ms)
    }
}

/// One trace row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub t_ms: u64,
    pub values: Vec<u16>,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let samples = load_trace(&args.trace)?;
    println!();
    println!(
        "{}",
        format!(
            "▶ Replaying {} samples from {} through the {} adapter",
            samples.len(),
            args.trace.display(),
            args.adapter.name()
        )
        .cyan()
        .bold()
    );
    println!();

    let events = replay(args, &samples)?;
    for event in &events {
        println!("  {}", paint(event));
    }

    println!();
    println!("{}", format!("✓ {} events", events.len()).green().bold());
    println!();
    Ok(())
}

fn paint(event: &ButtonEvent) -> colored::ColoredString {
    let text = event.to_string();
    match event.action {
        ButtonAction::Press => text.green(),
        ButtonAction::Release => text.dimmed(),
        ButtonAction::Click => text.cyan(),
        ButtonAction::DoubleClick => text.magenta(),
        ButtonAction::LongPress => text.yellow(),
    }
}

pub fn load_trace(path: &Path) -> Result<Vec<Sample>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    parse_trace(&text).with_context(|| format!("Invalid trace {}", path.display()))
}

pub fn parse_trace(text: &str) -> Result<Vec<Sample>> {
    let mut samples: Vec<Sample> = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index.saturating_add(1);
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if samples.is_empty() && line.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let t_ms = fields
            .next()
            .unwrap_or_default()
            .parse::<u64>()
            .with_context(|| format!("line {line_no}: bad timestamp"))?;
        let values = fields
            .map(|f| f.parse::<u16>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("line {line_no}: bad sample value"))?;
        if values.is_empty() {
            bail!("line {line_no}: no sample values");
        }
        if let Some(prev) = samples.last() {
            if t_ms < prev.t_ms {
                bail!("line {line_no}: timestamp {t_ms} goes backwards (previous {})", prev.t_ms);
            }
        }
        samples.push(Sample { t_ms, values });
    }
    Ok(samples)
}

pub fn parse_range(s: &str) -> Result<LadderRange, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [id, min, max] = parts.as_slice() else {
        return Err(format!("expected id:min:max, got `{s}`"));
    };
    let id = id.parse::<u8>().map_err(|e| format!("bad id `{id}`: {e}"))?;
    let min = min.parse::<u16>().map_err(|e| format!("bad min `{min}`: {e}"))?;
    let max = max.parse::<u16>().map_err(|e| format!("bad max `{max}`: {e}"))?;
    Ok(LadderRange::new(id, min, max))
}

/// Feed every sample through the chosen adapter, collecting its events.
pub fn replay(args: &ReplayArgs, samples: &[Sample]) -> Result<Vec<ButtonEvent>> {
    let mut events = Vec::new();
    match args.adapter {
        AdapterKind::Line => {
            let mut line = SingleLine::new("line", args.line_config());
            let mut last_t = 0;
            for sample in samples {
                let closed = sample.values.first().is_some_and(|&v| v != 0);
                events.extend(line.update(closed, sample.t_ms));
                last_t = sample.t_ms;
            }
            // Flush a click still waiting for its double-click window.
            if line.has_pending_click() && !line.is_pressed() {
                let after = last_t
                    .saturating_add(u64::from(args.double_click_ms))
                    .saturating_add(1);
                events.extend(line.update(false, after));
            }
        }
        AdapterKind::Ladder => {
            if args.ranges.is_empty() {
                bail!("ladder replay needs at least one --range id:min:max");
            }
            let config: LadderConfig<LADDER_RANGES> =
                LadderConfig::with_reference(&args.ranges, args.reference, args.tolerance)?
                    .timing(args.click_config());
            let mut ladder: LadderDecode<LADDER_RANGES, REPLAY_QUEUE> =
                LadderDecode::new("ladder", config);
            for sample in samples {
                let raw = sample.values.first().copied().unwrap_or(args.reference);
                ladder.update(raw, sample.t_ms);
                events.extend(std::iter::from_fn(|| ladder.next_event()));
            }
        }
        AdapterKind::Matrix => {
            let mut matrix: MatrixScan<MATRIX_SLOTS, REPLAY_QUEUE> =
                MatrixScan::new("matrix", args.click_config());
            for sample in samples {
                if sample.values.len() > MATRIX_SLOTS {
                    bail!(
                        "t={}ms: {} columns, matrix replay supports {MATRIX_SLOTS}",
                        sample.t_ms,
                        sample.values.len()
                    );
                }
                let mut closed = [false; MATRIX_SLOTS];
                for (slot, value) in closed.iter_mut().zip(&sample.values) {
                    *slot = *value != 0;
                }
                matrix.update(&closed, sample.t_ms);
                events.extend(std::iter::from_fn(|| matrix.next_event()));
            }
        }
    }
    Ok(events)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ReplayArgs,
    }

    fn args(cli: &[&str]) -> ReplayArgs {
        let argv = std::iter::once("replay").chain(cli.iter().copied());
        Harness::parse_from(argv).args
    }

    fn actions(events: &[ButtonEvent]) -> Vec<(ButtonAction, u64)> {
        events.iter().map(|e| (e.action, e.timestamp_ms)).collect()
    }

    #[test]
    fn parses_header_comments_and_columns() {
        let trace = "t_ms,value\n# warm-up\n\n0,0\n15, 1\n100,0,1\n";
        let samples = parse_trace(trace).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2], Sample { t_ms: 100, values: vec![0, 1] });
    }

    #[test]
    fn rejects_backwards_time_and_bad_values() {
        let err = parse_trace("10,1\n5,0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(parse_trace("0,abc\n").is_err());
        assert!(parse_trace("0\n").is_err());
    }

    #[test]
    fn range_argument_format() {
        assert_eq!(parse_range("2:100:300"), Ok(LadderRange::new(2, 100, 300)));
        assert!(parse_range("2:100").is_err());
        assert!(parse_range("x:1:2").is_err());
    }

    #[test]
    fn line_replay_flushes_pending_click() {
        let args = args(&["trace.csv", "--debounce-ms", "10"]);
        let samples = parse_trace("0,1\n15,1\n100,0\n").unwrap();
        let events = replay(&args, &samples).unwrap();
        assert_eq!(
            actions(&events),
            vec![
                (ButtonAction::Press, 15),
                (ButtonAction::Release, 100),
                (ButtonAction::Click, 100),
            ]
        );
    }

    #[test]
    fn ladder_replay_uses_ranges() {
        let args = args(&["trace.csv", "--adapter", "ladder", "--range", "0:200:400"]);
        let samples = parse_trace("100,300\n200,4095\n").unwrap();
        let events = replay(&args, &samples).unwrap();
        assert_eq!(
            actions(&events),
            vec![
                (ButtonAction::Press, 100),
                (ButtonAction::Click, 200),
                (ButtonAction::Release, 200),
            ]
        );
    }

    #[test]
    fn ladder_replay_needs_ranges_and_valid_table() {
        let samples = parse_trace("0,300\n").unwrap();
        assert!(replay(&args(&["t.csv", "--adapter", "ladder"]), &samples).is_err());

        let overlapping = args(&[
            "t.csv", "--adapter", "ladder", "--range", "0:100:500", "--range", "1:400:900",
        ]);
        let err = replay(&overlapping, &samples).unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn matrix_replay_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "t_ms,k0,k1").unwrap();
        writeln!(file, "0,1,0").unwrap();
        writeln!(file, "50,1,1").unwrap();
        writeln!(file, "60,0,0").unwrap();

        let samples = load_trace(file.path()).unwrap();
        let events = replay(&args(&["t.csv", "--adapter", "matrix"]), &samples).unwrap();
        let summary: Vec<_> = events.iter().map(|e| (e.action, e.button)).collect();
        assert_eq!(
            summary,
            vec![
                (ButtonAction::Press, Some(0)),
                (ButtonAction::Press, Some(1)),
                (ButtonAction::Click, Some(0)),
                (ButtonAction::Release, Some(0)),
                (ButtonAction::Click, Some(1)),
                (ButtonAction::Release, Some(1)),
            ]
        );
    }

    #[test]
    fn matrix_replay_rejects_wide_rows() {
        let row = vec!["1"; MATRIX_SLOTS + 2].join(",");
        let samples = parse_trace(&row).unwrap();
        assert!(replay(&args(&["t.csv", "--adapter", "matrix"]), &samples).is_err());
    }
}

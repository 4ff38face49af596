//! Property-based tests for gesture classification.
//! Verifies the event invariants hold for arbitrary sample streams, not just
//! the hand-written scenarios.
#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::collections::VecDeque;

use buttons::{
    ButtonAction, ButtonEvent, ClickConfig, Decoded, EventQueue, LadderConfig, LadderDecode,
    LadderRange, LineConfig, MatrixScan, SingleLine,
};
use proptest::prelude::*;

fn count(events: &[ButtonEvent], action: ButtonAction) -> usize {
    events.iter().filter(|e| e.action == action).count()
}

fn ladder_config() -> LadderConfig<3> {
    LadderConfig::new(&[
        LadderRange::new(0, 200, 400),
        LadderRange::new(1, 1000, 1400),
        LadderRange::new(2, 2500, 2900),
    ])
    .unwrap()
}

/// Raw level stream: (level, milliseconds until the next sample).
fn level_stream() -> impl Strategy<Value = Vec<(bool, u64)>> {
    proptest::collection::vec((any::<bool>(), 1u64..60), 0..200)
}

proptest! {
    /// Every debounced press ends in exactly one Release or DoubleClick, and
    /// every Release is later either paired into a DoubleClick or flushed as a
    /// deferred Click.
    #[test]
    fn single_line_press_count_matches_terminal_events(
        stream in level_stream(),
        debounce in 0u32..40,
    ) {
        let mut line = SingleLine::new("line", LineConfig::default().debounce_ms(debounce));
        let mut events = Vec::new();
        let mut now = 0u64;
        for (level, dt) in stream {
            events.extend(line.update(level, now));
            now += dt;
        }
        // Let go, then poll well past the double-click window. A zero-debounce
        // edge left behind a flushed click needs one poll to press and one to
        // release before its own click can expire.
        events.extend(line.update(false, now));
        events.extend(line.update(false, now + 1));
        events.extend(line.update(false, now + 10_000));

        prop_assert!(!line.is_pressed());
        prop_assert!(!line.has_pending_click());
        let presses = count(&events, ButtonAction::Press);
        let releases = count(&events, ButtonAction::Release);
        let doubles = count(&events, ButtonAction::DoubleClick);
        prop_assert_eq!(presses, releases + doubles);
        prop_assert_eq!(count(&events, ButtonAction::Click) + doubles, releases);
    }

    /// Without double-click detection every event is stamped with the poll
    /// that produced it.
    #[test]
    fn single_line_events_are_time_ordered(stream in level_stream()) {
        let mut line = SingleLine::new("line", LineConfig::default().detect_double_click(false));
        let mut last = 0u64;
        let mut now = 0u64;
        for (level, dt) in stream {
            if let Some(ev) = line.update(level, now) {
                prop_assert!(ev.timestamp_ms >= last);
                prop_assert_eq!(ev.timestamp_ms, now);
                last = ev.timestamp_ms;
            }
            now += dt;
        }
    }

    /// A hold shorter than the threshold never long-presses; a longer one
    /// long-presses exactly once however long it is held.
    #[test]
    fn matrix_long_press_exactly_once(hold_ms in 0u64..3000, step in 1u64..50) {
        let mut matrix: MatrixScan<1, 8> = MatrixScan::new("m", ClickConfig::default());
        let mut events = Vec::new();
        let mut now = 0;
        let mut last_down = 0;
        while now <= hold_ms {
            matrix.update(&[true], now);
            events.extend(std::iter::from_fn(|| matrix.next_event()));
            last_down = now;
            now += step;
        }
        matrix.update(&[false], now);
        events.extend(std::iter::from_fn(|| matrix.next_event()));

        let expected = usize::from(last_down >= 1000);
        prop_assert_eq!(count(&events, ButtonAction::LongPress), expected);
        prop_assert_eq!(count(&events, ButtonAction::Press), 1);
        prop_assert_eq!(count(&events, ButtonAction::Release), 1);
    }

    /// Two releases within the click gap group; further apart they stay
    /// independent single clicks.
    #[test]
    fn ladder_click_grouping_window(gap in 6u64..400) {
        let mut ladder: LadderDecode<3> = LadderDecode::new("ladder", ladder_config());
        let first_up = 1010;
        let second_up = first_up + gap;
        ladder.update(300, 1000);
        ladder.update(4095, first_up);
        ladder.update(300, second_up - 5);
        ladder.update(4095, second_up);

        let clicks: Vec<ButtonEvent> = std::iter::from_fn(|| ladder.next_event())
            .filter(ButtonEvent::is_click)
            .collect();
        prop_assert_eq!(clicks.len(), 2);
        prop_assert_eq!(clicks[0].action, ButtonAction::Click);
        if gap <= 200 {
            prop_assert_eq!(clicks[1].action, ButtonAction::DoubleClick);
            prop_assert_eq!(clicks[1].click_count, 2);
        } else {
            prop_assert_eq!(clicks[1].action, ButtonAction::Click);
            prop_assert_eq!(clicks[1].click_count, 1);
        }
    }

    /// Decoding is a pure function of the sample and agrees with the table.
    #[test]
    fn ladder_decode_matches_range_table(raw in any::<u16>()) {
        let cfg = ladder_config();
        let decoded = cfg.decode(raw);
        prop_assert_eq!(decoded, cfg.decode(raw));

        let in_band = raw > cfg.reference() || raw.abs_diff(cfg.reference()) <= cfg.tolerance();
        let owner = cfg.ranges().iter().find(|r| r.contains(raw)).map(|r| r.button);
        match decoded {
            Decoded::Reference => prop_assert!(in_band),
            Decoded::Button(id) => {
                prop_assert!(!in_band);
                prop_assert_eq!(owner, Some(id));
            }
            Decoded::Unrecognized => {
                prop_assert!(!in_band);
                prop_assert_eq!(owner, None);
            }
        }
    }

    /// Unrecognized samples never change adapter state.
    #[test]
    fn ladder_ignores_unrecognized(raw in 401u16..1000, t in 0u64..10_000) {
        let mut ladder: LadderDecode<3> = LadderDecode::new("ladder", ladder_config());
        ladder.update(raw, t);
        prop_assert!(!ladder.is_any_pressed());
        prop_assert_eq!(ladder.next_event(), None);
    }

    /// After reset every key reads released and nothing is queued.
    #[test]
    fn matrix_reset_clears_everything(
        scans in proptest::collection::vec(any::<[bool; 4]>(), 0..50),
    ) {
        let mut matrix: MatrixScan<4> = MatrixScan::new("m", ClickConfig::default());
        for (i, closed) in scans.iter().enumerate() {
            matrix.update(closed, i as u64 * 10);
        }
        matrix.reset();
        prop_assert!(!matrix.is_any_pressed());
        prop_assert_eq!(matrix.pressed_mask(), 0);
        prop_assert_eq!(matrix.next_event(), None);
    }

    /// The queue is a FIFO whose slots are reclaimed only once it drains.
    #[test]
    fn queue_matches_fifo_model(ops in proptest::collection::vec(any::<bool>(), 0..100)) {
        let mut queue: EventQueue<8> = EventQueue::new();
        let mut model = VecDeque::new();
        let mut written = 0usize;
        let mut dropped = 0u32;
        for (i, push) in ops.into_iter().enumerate() {
            if push {
                let ev = ButtonEvent::new("q", None, ButtonAction::Press, i as u64);
                let accepted = written < 8;
                if accepted {
                    model.push_back(ev);
                    written += 1;
                } else {
                    dropped += 1;
                }
                prop_assert_eq!(queue.push(ev), accepted);
            } else {
                prop_assert_eq!(queue.pop(), model.pop_front());
                if model.is_empty() {
                    written = 0;
                }
            }
            prop_assert_eq!(queue.len(), model.len());
        }
        prop_assert_eq!(queue.dropped(), dropped);
    }
}

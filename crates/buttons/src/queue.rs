//! Fixed-capacity event queue.
//!
//! `EventQueue<N>` holds up to `N` [`ButtonEvent`]s produced during one poll
//! cycle without heap allocation. It is filled by the adapter and drained by
//! the caller with repeated `pop` calls.
//!
//! # Semantics
//!
//! - Writes append at the write count; reads advance a separate cursor.
//! - Once the cursor catches up with the write count the queue resets itself,
//!   so a fully drained queue starts the next cycle at slot 0.
//! - A push into a full queue drops the event and bumps [`EventQueue::dropped`].
//!   Realistic button interaction produces 2–3 events per tick; with the
//!   default depth of 8 a drop means the caller is not draining.
//! - Not interrupt-safe or `Send`-aware; one queue belongs to one adapter.

use crate::event::ButtonEvent;

/// Default queue depth used by the Ladder-Decode and Matrix-Scan adapters.
pub const DEFAULT_QUEUE_DEPTH: usize = 8;

/// A fixed-capacity FIFO of button events.
pub struct EventQueue<const N: usize = DEFAULT_QUEUE_DEPTH> {
    slots: [Option<ButtonEvent>; N],
    /// Number of slots written this cycle.
    len: usize,
    /// Index of the next slot to read.
    read: usize,
    dropped: u32,
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue.
    ///
    /// `const` so queues may live in `static`s without a runtime initialiser.
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            len: 0,
            read: 0,
            dropped: 0,
        }
    }

    /// Append an event.
    ///
    /// Returns `false` if the queue was full and the event was dropped.
    pub fn push(&mut self, event: ButtonEvent) -> bool {
        match self.slots.get_mut(self.len) {
            Some(slot) => {
                *slot = Some(event);
                self.len = self.len.saturating_add(1);
                true
            }
            None => {
                self.dropped = self.dropped.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("event queue full, dropped {}", event.action);
                false
            }
        }
    }

    /// Remove the oldest event.
    ///
    /// Returns `None` once every event written this cycle has been read; the
    /// queue is then empty and reset.
    pub fn pop(&mut self) -> Option<ButtonEvent> {
        let event = if self.read < self.len {
            let event = self.slots.get_mut(self.read).and_then(Option::take);
            self.read = self.read.saturating_add(1);
            event
        } else {
            None
        };
        if self.read >= self.len {
            self.len = 0;
            self.read = 0;
        }
        event
    }

    /// Discard all queued events. The drop counter is kept.
    pub fn clear(&mut self) {
        self.slots = [None; N];
        self.len = 0;
        self.read = 0;
    }

    /// Number of events waiting to be read.
    pub fn len(&self) -> usize {
        self.len.saturating_sub(self.read)
    }

    /// `true` when nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when the next push would be dropped.
    pub fn is_full(&self) -> bool {
        self.len >= N
    }

    /// Maximum number of events per cycle.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Events dropped on overflow since construction.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ButtonAction;

    fn ev(t: u64) -> ButtonEvent {
        ButtonEvent::new("q", Some(0), ButtonAction::Press, t)
    }

    #[test]
    fn new_queue_is_empty() {
        let mut q: EventQueue = EventQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.capacity(), 8);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn pops_in_fifo_order() {
        let mut q: EventQueue<4> = EventQueue::new();
        assert!(q.push(ev(1)));
        assert!(q.push(ev(2)));
        assert!(q.push(ev(3)));
        assert_eq!(q.len(), 3);

        assert_eq!(q.pop().map(|e| e.timestamp_ms), Some(1));
        assert_eq!(q.pop().map(|e| e.timestamp_ms), Some(2));
        assert_eq!(q.pop().map(|e| e.timestamp_ms), Some(3));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn overflow_drops_newest_and_counts() {
        let mut q: EventQueue<2> = EventQueue::new();
        assert!(q.push(ev(1)));
        assert!(q.push(ev(2)));
        assert!(q.is_full());
        assert!(!q.push(ev(3)));
        assert_eq!(q.dropped(), 1);

        assert_eq!(q.pop().map(|e| e.timestamp_ms), Some(1));
        assert_eq!(q.pop().map(|e| e.timestamp_ms), Some(2));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn drained_queue_resets_to_full_capacity() {
        let mut q: EventQueue<2> = EventQueue::new();
        q.push(ev(1));
        q.push(ev(2));
        q.pop();
        q.pop();

        // Both slots are reusable after a full drain.
        assert!(q.push(ev(3)));
        assert!(q.push(ev(4)));
        assert_eq!(q.dropped(), 0);
    }

    #[test]
    fn partial_drain_keeps_write_position() {
        let mut q: EventQueue<3> = EventQueue::new();
        q.push(ev(1));
        q.push(ev(2));
        assert_eq!(q.pop().map(|e| e.timestamp_ms), Some(1));

        // Slot 0 is not reclaimed until the queue is fully drained.
        assert!(q.push(ev(3)));
        assert!(q.is_full());
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn clear_discards_events_but_keeps_drop_count() {
        let mut q: EventQueue<1> = EventQueue::new();
        q.push(ev(1));
        q.push(ev(2));
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
        assert_eq!(q.dropped(), 1);
    }
}

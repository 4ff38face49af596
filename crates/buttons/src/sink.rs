//! Event sinks.
//!
//! Adapters write events through [`EventSink`] so the same gesture logic can
//! fill the adapter's own [`EventQueue`], a caller-provided buffer, or an
//! embassy channel feeding the application's event aggregator.
//!
//! Every sink is non-blocking: a full sink drops the event and reports it by
//! returning `false`. Blocking here would stall the poll loop and with it
//! every other button on the same adapter.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

use crate::event::ButtonEvent;
use crate::queue::EventQueue;

/// Destination for button events.
pub trait EventSink {
    /// Deliver one event. Returns `false` if it was dropped.
    fn emit(&mut self, event: ButtonEvent) -> bool;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: ButtonEvent) -> bool {
        (**self).emit(event)
    }
}

impl<const N: usize> EventSink for EventQueue<N> {
    fn emit(&mut self, event: ButtonEvent) -> bool {
        self.push(event)
    }
}

impl<const N: usize> EventSink for heapless::Vec<ButtonEvent, N> {
    fn emit(&mut self, event: ButtonEvent) -> bool {
        self.push(event).is_ok()
    }
}

impl<M: RawMutex, const N: usize> EventSink for Sender<'_, M, ButtonEvent, N> {
    fn emit(&mut self, event: ButtonEvent) -> bool {
        match self.try_send(event) {
            Ok(()) => true,
            Err(_) => {
                // Consumer stalled.
                #[cfg(feature = "defmt")]
                defmt::warn!("button channel full, dropped {}", event.action);
                false
            }
        }
    }
}

/// Plain function pointer callback, as installed on a Matrix-Scan adapter.
pub type EventCallback = fn(&ButtonEvent);

/// [`EventSink`] that hands every event to an [`EventCallback`].
#[derive(Clone, Copy)]
pub struct CallbackSink(pub EventCallback);

impl EventSink for CallbackSink {
    fn emit(&mut self, event: ButtonEvent) -> bool {
        (self.0)(&event);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ButtonAction;
    use core::sync::atomic::{AtomicU32, Ordering};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;

    fn ev(t: u64) -> ButtonEvent {
        ButtonEvent::new("sink", Some(0), ButtonAction::Click, t)
    }

    #[test]
    fn heapless_vec_drops_when_full() {
        let mut buf: heapless::Vec<ButtonEvent, 1> = heapless::Vec::new();
        assert!(buf.emit(ev(1)));
        assert!(!buf.emit(ev(2)));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn queue_sink_pushes() {
        let mut q: EventQueue<2> = EventQueue::new();
        assert!(q.emit(ev(5)));
        assert_eq!(q.pop(), Some(ev(5)));
    }

    #[test]
    fn channel_sender_uses_try_send() {
        let channel: Channel<NoopRawMutex, ButtonEvent, 1> = Channel::new();
        let mut tx = channel.sender();
        assert!(tx.emit(ev(1)));
        assert!(!tx.emit(ev(2)), "second send must drop, not block");
        assert_eq!(channel.try_receive().ok(), Some(ev(1)));
    }

    static CALLS: AtomicU32 = AtomicU32::new(0);

    fn count(_: &ButtonEvent) {
        CALLS.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn callback_sink_never_drops() {
        let mut sink = CallbackSink(count);
        let before = CALLS.load(Ordering::Relaxed);
        assert!(sink.emit(ev(1)));
        assert!(sink.emit(ev(2)));
        assert_eq!(CALLS.load(Ordering::Relaxed) - before, 2);
    }
}

//! Single-writer reactive state container used by the pattern designer and
//! shader editor models. Holds one immutable state value that is replaced
//! wholesale on every update (copy-on-write), notifies subscribers with each
//! new value, and carries one-time events through a FIFO channel that exactly
//! one consumer drains.
//!
//! Types:
//!
//! - `Store` pairs the observable state cell with the event channel.
//! - `StoreError` reports misuse of the consumed-once event receiver.
//!
//! Functions:
//!
//! - `Store::update` applies a pure transform and notifies subscribers.
//! - `Store::send` enqueues a one-time event in emission order.
//! - `Store::events` hands the receiver to the single consumer.

use crossbeam_channel::{unbounded, Sender};
pub use crossbeam_channel::Receiver;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("event receiver was already taken; only one consumer may drain events")]
    EventsAlreadyTaken,
}

pub struct Store<S, E> {
    state: S,
    subscribers: Vec<Box<dyn FnMut(&S) + Send>>,
    events_tx: Sender<E>,
    events_rx: Option<Receiver<E>>,
}

impl<S: Clone, E> Store<S, E> {
    pub fn new(initial: S) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            state: initial,
            subscribers: Vec::new(),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn snapshot(&self) -> S {
        self.state.clone()
    }

    /// Replaces the current state with `transform(current)` and notifies
    /// every subscriber with the new value. The transform sees a clone, so
    /// shared references handed out earlier never observe partial updates.
    pub fn update(&mut self, transform: impl FnOnce(S) -> S) {
        let next = transform(self.state.clone());
        self.state = next;
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&S) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Enqueues a one-time event. Events are delivered in send order. A send
    /// after the consumer dropped its receiver is discarded silently; events
    /// are notifications, not state.
    pub fn send(&self, event: E) {
        let _ = self.events_tx.send(event);
    }

    /// Takes the event receiver. The FIFO contract only holds with a single
    /// drainer, so this succeeds exactly once.
    pub fn events(&mut self) -> Result<Receiver<E>, StoreError> {
        self.events_rx.take().ok_or(StoreError::EventsAlreadyTaken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn update_replaces_state_and_notifies() {
        let mut store: Store<u32, ()> = Store::new(1);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |value| sink.lock().unwrap().push(*value));

        store.update(|value| value + 1);
        store.update(|value| value * 10);

        assert_eq!(*store.state(), 20);
        assert_eq!(*seen.lock().unwrap(), vec![2, 20]);
    }

    #[test]
    fn events_arrive_in_send_order() {
        let mut store: Store<(), &'static str> = Store::new(());
        let events = store.events().unwrap();
        store.send("first");
        store.send("second");
        assert_eq!(events.try_recv().unwrap(), "first");
        assert_eq!(events.try_recv().unwrap(), "second");
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn event_receiver_is_consumed_once() {
        let mut store: Store<(), ()> = Store::new(());
        assert!(store.events().is_ok());
        assert!(matches!(
            store.events(),
            Err(StoreError::EventsAlreadyTaken)
        ));
    }

    #[test]
    fn send_after_receiver_dropped_is_ignored() {
        let mut store: Store<(), u8> = Store::new(());
        drop(store.events().unwrap());
        store.send(7);
    }
}

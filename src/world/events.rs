//! Typed fan-out over std channels

use std::sync::mpsc;

/// Sends every event to all live subscribers
pub struct EventBus<T> {
    subscribers: Vec<mpsc::Sender<T>>,
}

pub struct EventReceiver<T> {
    rx: mpsc::Receiver<T>,
}

impl<T: Clone> EventBus<T> {
    pub fn new() -> Self {
        Self { subscribers: Vec::new() }
    }

    pub fn subscribe(&mut self) -> EventReceiver<T> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        EventReceiver { rx }
    }

    /// Deliver to every subscriber, dropping those whose receiver is gone
    pub fn send(&mut self, event: T) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> EventReceiver<T> {
    pub fn try_recv(&self) -> Result<T, mpsc::TryRecvError> {
        self.rx.try_recv()
    }

    /// Everything queued so far, without blocking
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }

    pub fn try_iter(&self) -> mpsc::TryIter<'_, T> {
        self.rx.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_out() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.send(1);
        bus.send(2);
        assert_eq!(a.drain(), vec![1, 2]);
        assert_eq!(b.drain(), vec![1, 2]);
        assert!(a.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.send("hello");
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.drain(), vec!["hello"]);
    }
}

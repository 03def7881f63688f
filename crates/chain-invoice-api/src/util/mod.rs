use crate::constants::STATUS_CHANNEL_CAPACITY;
use async_broadcast::{InactiveReceiver, Receiver, Sender};
use log::trace;

/// Broadcasts every value it's given to all current subscribers.
///
/// Never blocks: on overflow the oldest message is dropped and without subscribers the value is
/// discarded.
pub struct StatusFeed<T: Clone> {
    sender: Sender<T>,
    _receiver: InactiveReceiver<T>, // keep receiver around, so channel doesn't get closed
}

impl<T: Clone> StatusFeed<T> {
    pub fn new() -> Self {
        let (mut tx, rx) = async_broadcast::broadcast::<T>(STATUS_CHANNEL_CAPACITY);
        tx.set_overflow(true);
        tx.set_await_active(false);
        let inactive = rx.deactivate();
        Self {
            sender: tx,
            _receiver: inactive,
        }
    }

    pub fn publish(&self, value: T) {
        if let Err(e) = self.sender.try_broadcast(value) {
            trace!("Status not delivered: {e}");
        }
    }

    pub fn subscribe(&self) -> Receiver<T> {
        self.sender.new_receiver()
    }
}

impl<T: Clone> Default for StatusFeed<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains all messages that are currently queued on the receiver
#[cfg(test)]
pub fn drain<T: Clone>(receiver: &mut Receiver<T>) -> Vec<T> {
    let mut values = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(value) => values.push(value),
            Err(async_broadcast::TryRecvError::Overflowed(_)) => continue,
            Err(_) => break,
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_reaches_subscribers() {
        let feed = StatusFeed::<u32>::new();
        let mut first = feed.subscribe();
        let mut second = feed.subscribe();
        feed.publish(1);
        feed.publish(2);
        assert_eq!(drain(&mut first), vec![1, 2]);
        assert_eq!(drain(&mut second), vec![1, 2]);
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let feed = StatusFeed::<u32>::new();
        feed.publish(1);
        let mut late = feed.subscribe();
        assert!(drain(&mut late).is_empty());
    }

    #[test]
    fn overflow_drops_oldest() {
        let feed = StatusFeed::<usize>::new();
        let mut receiver = feed.subscribe();
        for i in 0..STATUS_CHANNEL_CAPACITY + 2 {
            feed.publish(i);
        }
        let values = drain(&mut receiver);
        assert_eq!(values.len(), STATUS_CHANNEL_CAPACITY);
        assert_eq!(values.last(), Some(&(STATUS_CHANNEL_CAPACITY + 1)));
    }
}

//! Game-wide notifications over crossbeam channels.
//!
//! Each subscriber owns its receiving end. Dropping a [`Subscription`] (or
//! calling [`EventBus::unsubscribe`]) ends delivery; the bus prunes
//! disconnected subscribers the next time it publishes.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryIter};

/// Notifications published by the match.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A cube was picked up. `current` counts pickups so far.
    CubeCollected { current: u32, total: u32 },
    /// Seconds left on the match clock.
    TimerUpdated(f32),
    /// The match ended for `reason`.
    GameOver(String),
}

/// Opaque subscriber id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// The receiving end of one subscription.
pub struct Subscription {
    id: SubscriberId,
    receiver: Receiver<GameEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Drains everything published since the last call.
    pub fn drain(&self) -> TryIter<'_, GameEvent> {
        self.receiver.try_iter()
    }
}

/// Fan-out publisher. Every subscriber gets its own copy of each event.
#[derive(Resource, Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriberId, Sender<GameEvent>)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, sender));
        Subscription { id, receiver }
    }

    /// Stops delivery to `id`. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sub, _)| *sub != id);
    }

    /// Sends `event` to every live subscriber, pruning dropped ones.
    pub fn publish(&mut self, event: GameEvent) {
        self.subscribers
            .retain(|(_, sender)| sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_receives() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.publish(GameEvent::TimerUpdated(12.0));
        assert_eq!(a.drain().collect::<Vec<_>>(), vec![GameEvent::TimerUpdated(12.0)]);
        assert_eq!(b.drain().count(), 1);
        assert_eq!(a.drain().count(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        bus.unsubscribe(a.id());
        bus.publish(GameEvent::GameOver("Time's Up!".into()));
        assert_eq!(a.drain().count(), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let mut bus = EventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());
        bus.publish(GameEvent::CubeCollected { current: 1, total: 4 });
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(
            keep.drain().next(),
            Some(GameEvent::CubeCollected { current: 1, total: 4 })
        );
    }
}

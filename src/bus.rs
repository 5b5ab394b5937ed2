//! Synchronous publish/subscribe fabric connecting the two players of a match.
//!
//! An [`EventBus`] holds four independent channels (moves, hits, misses,
//! losses). Publishing invokes every subscriber of that channel in
//! subscription order before returning, so a move and all the hit/miss/loss
//! traffic it causes run nested inside the original call.
//!
//! The bus is a cheap handle: clones share the same channels.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use log::trace;

use crate::common::{Coord, PlayerId};

/// Event carried on the move channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    /// `attacker` fires at `coord`.
    Attack { coord: Coord, attacker: PlayerId },
    /// `attacker` tried a coordinate it had already used.
    Duplicate { coord: Coord, attacker: PlayerId },
}

/// Event carried on the hit and miss channels, from the victim's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotEvent {
    pub coord: Coord,
    /// Player whose board took the shot.
    pub target: PlayerId,
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// One named topic with an ordered subscriber list.
pub struct Channel<T> {
    name: &'static str,
    subscribers: RefCell<Vec<Subscriber<T>>>,
}

impl<T> Channel<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            subscribers: RefCell::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Append `callback`. Subscribing twice delivers twice.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Deliver `event` to every current subscriber, in order.
    ///
    /// Subscribers added while a publish is in flight see the next event,
    /// not this one.
    pub fn publish(&self, event: &T) {
        let subscribers: Vec<Subscriber<T>> = self.subscribers.borrow().clone();
        trace!("{}: publishing to {} subscribers", self.name, subscribers.len());
        for subscriber in subscribers {
            subscriber(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn reset(&self) {
        self.subscribers.borrow_mut().clear();
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Channel {{ name: {:?}, subscribers: {} }}",
            self.name,
            self.subscriber_count()
        )
    }
}

#[derive(Debug)]
struct Channels {
    moves: Channel<MoveEvent>,
    hits: Channel<ShotEvent>,
    misses: Channel<ShotEvent>,
    losses: Channel<PlayerId>,
}

/// Shared handle to the four channels of a match.
#[derive(Clone, Debug)]
pub struct EventBus {
    channels: Rc<Channels>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            channels: Rc::new(Channels {
                moves: Channel::new("moves"),
                hits: Channel::new("hits"),
                misses: Channel::new("misses"),
                losses: Channel::new("losses"),
            }),
        }
    }

    pub fn moves(&self) -> &Channel<MoveEvent> {
        &self.channels.moves
    }

    pub fn hits(&self) -> &Channel<ShotEvent> {
        &self.channels.hits
    }

    pub fn misses(&self) -> &Channel<ShotEvent> {
        &self.channels.misses
    }

    pub fn losses(&self) -> &Channel<PlayerId> {
        &self.channels.losses
    }

    /// Drop every subscriber on every channel.
    pub fn reset(&self) {
        self.moves().reset();
        self.hits().reset();
        self.misses().reset();
        self.losses().reset();
    }

    /// `true` if both handles share the same channels.
    pub fn same_bus(&self, other: &EventBus) -> bool {
        Rc::ptr_eq(&self.channels, &other.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_added_during_publish_waits_for_next_event() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner_bus = bus.clone();
        let inner_seen = seen.clone();
        bus.losses().subscribe(move |id: &PlayerId| {
            inner_seen.borrow_mut().push(("outer", *id));
            let late_seen = inner_seen.clone();
            inner_bus
                .losses()
                .subscribe(move |id: &PlayerId| late_seen.borrow_mut().push(("late", *id)));
        });
        bus.losses().publish(&PlayerId::ONE);
        assert_eq!(*seen.borrow(), alloc::vec![("outer", PlayerId::ONE)]);
        assert_eq!(bus.losses().subscriber_count(), 2);
    }
}

use std::rc::Rc;

use crate::model::{Item, LayoutMap, Orientation, Position};
use crate::scatter::default_position;

/// Immutable view handed to subscribers after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub orientation: Orientation,
    pub revision: u64,
    pub overrides: Rc<LayoutMap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&LayoutSnapshot)>;

/// Overrides for the active orientation. Items absent from the map use
/// their generated default.
pub struct PositionStore {
    orientation: Orientation,
    overrides: Rc<LayoutMap>,
    revision: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl PositionStore {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            overrides: Rc::new(LayoutMap::new()),
            revision: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn overrides(&self) -> &LayoutMap {
        &self.overrides
    }

    pub fn get(&self, id: &str) -> Option<Position> {
        self.overrides.get(id).copied()
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            orientation: self.orientation,
            revision: self.revision,
            overrides: Rc::clone(&self.overrides),
        }
    }

    pub fn set(&mut self, id: &str, position: Position) -> &LayoutMap {
        Rc::make_mut(&mut self.overrides).insert(id.to_string(), position);
        self.publish();
        &self.overrides
    }

    pub fn reset(&mut self) {
        self.overrides = Rc::new(LayoutMap::new());
        self.publish();
    }

    pub fn replace(&mut self, orientation: Orientation, overrides: LayoutMap) {
        self.orientation = orientation;
        self.overrides = Rc::new(overrides);
        self.publish();
    }

    pub fn clear(&mut self, orientation: Orientation) {
        self.replace(orientation, LayoutMap::new());
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&LayoutSnapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = self.snapshot();
        for (_, subscriber) in &self.subscribers {
            subscriber(&snapshot);
        }
    }
}

/// Every item resolved to its override or its generated default.
pub fn resolve_layout(items: &[Item], overrides: &LayoutMap) -> LayoutMap {
    let count = items.len();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = overrides
                .get(&item.id)
                .copied()
                .unwrap_or_else(|| default_position(index, count));
            (item.id.clone(), position)
        })
        .collect()
}

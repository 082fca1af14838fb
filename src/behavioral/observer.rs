//! Pattern: Observer
//! Example: an event manager with typed subscriptions, and a shop item that tells
//! waiting customers when it is back in stock

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    NewProduct,
    NewOrder,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::NewProduct => f.write_str("newProduct"),
            EventType::NewOrder => f.write_str("newOrder"),
        }
    }
}

pub trait Listener: Send + Sync {
    fn update(&self, event: EventType, message: &str);
}

/// Handle returned by `subscribe`; the only way to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

#[derive(Default)]
pub struct EventManager {
    listeners: HashMap<EventType, Vec<(SubscriptionId, Arc<dyn Listener>)>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, event: EventType, listener: Arc<dyn Listener>) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.listeners.entry(event).or_default().push((id, listener));
        tracing::debug!(%event, "listener subscribed");
        id
    }

    /// Returns `false` when the id was not subscribed to `event`.
    pub fn unsubscribe(&mut self, event: EventType, id: SubscriptionId) -> bool {
        let Some(listeners) = self.listeners.get_mut(&event) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        before != listeners.len()
    }

    /// Delivers `message` to every listener of `event` in subscription order.
    pub fn notify(&self, event: EventType, message: &str) -> usize {
        let listeners = self.listeners.get(&event).map(Vec::as_slice).unwrap_or(&[]);
        for (_, listener) in listeners {
            listener.update(event, message);
        }
        listeners.len()
    }

    pub fn subscribers(&self, event: EventType) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }
}

/// A listener that remembers what it was told.
#[derive(Debug, Default)]
pub struct Customer {
    pub name: String,
    received: Mutex<Vec<String>>,
}

impl Customer {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Listener for Customer {
    fn update(&self, event: EventType, message: &str) {
        tracing::info!(customer = %self.name, %event, message, "customer notified");
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(format!("Customer {} received message: {}", self.name, message));
    }
}

// ============================================
// Item availability
// ============================================

/// Subject: notifies waiting customers when it goes from out of stock to in stock.
pub struct Item {
    name: String,
    in_stock: bool,
    events: EventManager,
}

impl Item {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            in_stock: false,
            events: EventManager::new(),
        }
    }

    pub fn register(&mut self, customer: Arc<dyn Listener>) -> SubscriptionId {
        self.events.subscribe(EventType::NewProduct, customer)
    }

    pub fn deregister(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(EventType::NewProduct, id)
    }

    /// Returns how many customers were told; restocking an in-stock item tells nobody.
    pub fn update_availability(&mut self, in_stock: bool) -> usize {
        let became_available = in_stock && !self.in_stock;
        self.in_stock = in_stock;
        if !became_available {
            return 0;
        }
        self.events
            .notify(EventType::NewProduct, &format!("{} is now in stock", self.name))
    }
}

//! Pattern: Strategy
//! Example: a bounded cache whose eviction policy can be swapped at runtime, and a
//! checkout that pays through whichever payment method is bound

use std::collections::{HashMap, VecDeque};

use crate::config::CacheSettings;
use crate::error::{CatalogError, Result};
use crate::scaffold::{Context, Registry};

/// Names accepted by [`eviction_algo`].
pub const EVICTION_POLICIES: &[&str] = &["fifo", "lfu", "lru"];

// ============================================
// 1. Cache storage
// ============================================

/// Entries plus the bookkeeping every policy may consult.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: HashMap<String, String>,
    inserted: VecDeque<String>,
    last_used: HashMap<String, u64>,
    frequency: HashMap<String, u64>,
    clock: u64,
}

impl CacheStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys from oldest to newest insertion.
    pub fn insertion_order(&self) -> impl Iterator<Item = &str> {
        self.inserted.iter().map(String::as_str)
    }

    pub fn last_used(&self, key: &str) -> Option<u64> {
        self.last_used.get(key).copied()
    }

    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.frequency.get(key).copied()
    }

    fn touch(&mut self, key: &str) {
        self.clock += 1;
        self.last_used.insert(key.to_string(), self.clock);
        *self.frequency.entry(key.to_string()).or_insert(0) += 1;
    }

    fn insert(&mut self, key: String, value: String) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.inserted.push_back(key.clone());
        }
        self.touch(&key);
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let value = self.entries.remove(key)?;
        self.inserted.retain(|k| k != key);
        self.last_used.remove(key);
        self.frequency.remove(key);
        Some(value)
    }
}

// ============================================
// 2. Eviction policies
// ============================================

pub trait EvictionAlgo {
    fn name(&self) -> &'static str;

    /// Removes one entry and returns its key, or `None` if the store is empty.
    fn evict(&mut self, store: &mut CacheStore) -> Option<String>;
}

pub struct Fifo;
pub struct Lru;
pub struct Lfu;

impl EvictionAlgo for Fifo {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn evict(&mut self, store: &mut CacheStore) -> Option<String> {
        let victim = store.insertion_order().next()?.to_string();
        store.remove(&victim);
        Some(victim)
    }
}

impl EvictionAlgo for Lru {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn evict(&mut self, store: &mut CacheStore) -> Option<String> {
        let victim = store
            .insertion_order()
            .min_by_key(|key| store.last_used(key).unwrap_or(0))?
            .to_string();
        store.remove(&victim);
        Some(victim)
    }
}

impl EvictionAlgo for Lfu {
    fn name(&self) -> &'static str {
        "lfu"
    }

    // Ties go to the oldest insertion.
    fn evict(&mut self, store: &mut CacheStore) -> Option<String> {
        let victim = store
            .insertion_order()
            .min_by_key(|key| store.frequency(key).unwrap_or(0))?
            .to_string();
        store.remove(&victim);
        Some(victim)
    }
}

pub fn eviction_registry() -> Registry<Box<dyn EvictionAlgo>> {
    Registry::new("eviction policy")
        .register("fifo", || Box::new(Fifo) as Box<dyn EvictionAlgo>)
        .register("lru", || Box::new(Lru) as Box<dyn EvictionAlgo>)
        .register("lfu", || Box::new(Lfu) as Box<dyn EvictionAlgo>)
}

pub fn eviction_algo(name: &str) -> Result<Box<dyn EvictionAlgo>> {
    eviction_registry().create(name)
}

// ============================================
// 3. Cache context
// ============================================

pub struct Cache {
    store: CacheStore,
    capacity: usize,
    algo: Context<dyn EvictionAlgo>,
    evictions: usize,
}

impl Cache {
    pub fn new(capacity: usize, algo: Box<dyn EvictionAlgo>) -> Result<Self> {
        if capacity == 0 {
            return Err(CatalogError::invalid("capacity", "must be at least 1"));
        }
        Ok(Self {
            store: CacheStore::default(),
            capacity,
            algo: Context::new(algo),
            evictions: 0,
        })
    }

    pub fn from_settings(settings: &CacheSettings) -> Result<Self> {
        Self::new(settings.capacity, eviction_algo(&settings.policy)?)
    }

    /// Binds a new policy and returns the previous one.
    pub fn set_eviction_algo(&mut self, algo: Box<dyn EvictionAlgo>) -> Box<dyn EvictionAlgo> {
        tracing::debug!(from = self.algo.active().name(), to = algo.name(), "eviction policy swapped");
        self.algo.replace(algo)
    }

    pub fn policy(&self) -> &'static str {
        self.algo.active().name()
    }

    /// Stores `key`. When a new key arrives at a full cache the bound policy evicts
    /// exactly one entry first; its key is returned.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let mut evicted = None;

        if !self.store.contains(&key) && self.store.len() >= self.capacity {
            let store = &mut self.store;
            evicted = self.algo.delegate(|algo| algo.evict(store));
            if self.store.len() >= self.capacity {
                tracing::warn!(policy = self.policy(), "policy freed no room, evicting oldest");
                evicted = Fifo.evict(&mut self.store);
            }
            if evicted.is_some() {
                self.evictions += 1;
            }
            tracing::debug!(policy = self.policy(), evicted = ?evicted, "evicted entry");
        }

        self.store.insert(key, value.into());
        evicted
    }

    pub fn get(&mut self, key: &str) -> Option<&str> {
        if !self.store.contains(key) {
            return None;
        }
        self.store.touch(key);
        self.store.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn evictions(&self) -> usize {
        self.evictions
    }
}

// ============================================
// 4. Payments
// ============================================

pub trait PaymentStrategy {
    fn method(&self) -> &'static str;
    fn pay(&self, amount: f64) -> String;
}

pub struct CreditCard {
    pub last_four: String,
}

pub struct PayPal {
    pub email: String,
}

impl PaymentStrategy for CreditCard {
    fn method(&self) -> &'static str {
        "credit card"
    }

    fn pay(&self, amount: f64) -> String {
        format!("Paying {amount:.2} using credit card ending {}", self.last_four)
    }
}

impl PaymentStrategy for PayPal {
    fn method(&self) -> &'static str {
        "paypal"
    }

    fn pay(&self, amount: f64) -> String {
        format!("Paying {amount:.2} using PayPal account {}", self.email)
    }
}

pub struct Checkout {
    payment: Context<dyn PaymentStrategy>,
    receipts: Vec<String>,
}

impl Checkout {
    pub fn new(payment: Box<dyn PaymentStrategy>) -> Self {
        Self {
            payment: Context::new(payment),
            receipts: Vec::new(),
        }
    }

    pub fn set_strategy(&mut self, payment: Box<dyn PaymentStrategy>) {
        self.payment.replace(payment);
    }

    pub fn pay(&mut self, amount: f64) -> Result<&str> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(CatalogError::invalid("amount", format!("{amount} is not a positive amount")));
        }
        let receipt = self.payment.active().pay(amount);
        self.receipts.push(receipt);
        Ok(self.receipts.last().map(String::as_str).unwrap_or_default())
    }

    pub fn receipts(&self) -> &[String] {
        &self.receipts
    }
}

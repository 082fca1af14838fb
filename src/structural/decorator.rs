//! Pattern: Decorator
//! Example: a timing wrapper around any operation, and pizza toppings stacked on a
//! base pizza

use std::time::{Duration, Instant};

use crate::error::Result;

// ============================================
// 1. Timing decorator
// ============================================

pub trait Operation {
    fn name(&self) -> &str;
    fn execute(&mut self) -> Result<String>;
}

/// Plain operation that does its work through a closure.
pub struct NamedOperation<F> {
    name: String,
    work: F,
}

impl<F: FnMut() -> Result<String>> NamedOperation<F> {
    pub fn new(name: impl Into<String>, work: F) -> Self {
        Self {
            name: name.into(),
            work,
        }
    }
}

impl<F: FnMut() -> Result<String>> Operation for NamedOperation<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self) -> Result<String> {
        (self.work)()
    }
}

/// Measures every call of the wrapped operation; the result passes through untouched.
pub struct Timed<O> {
    inner: O,
    last: Option<Duration>,
    calls: usize,
}

impl<O: Operation> Timed<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            last: None,
            calls: 0,
        }
    }

    pub fn last_duration(&self) -> Option<Duration> {
        self.last
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Operation> Operation for Timed<O> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn execute(&mut self) -> Result<String> {
        let start = Instant::now();
        let outcome = self.inner.execute();
        let elapsed = start.elapsed();

        self.last = Some(elapsed);
        self.calls += 1;
        tracing::info!(operation = self.inner.name(), ?elapsed, ok = outcome.is_ok(), "operation timed");
        outcome
    }
}

// ============================================
// 2. Pizza toppings
// ============================================

pub trait Pizza {
    fn price(&self) -> u32;
    fn description(&self) -> String;
}

pub struct VeggieMania;

impl Pizza for VeggieMania {
    fn price(&self) -> u32 {
        15
    }

    fn description(&self) -> String {
        "veggie mania".to_string()
    }
}

pub struct TomatoTopping<P: Pizza> {
    pizza: P,
}

pub struct CheeseTopping<P: Pizza> {
    pizza: P,
}

impl<P: Pizza> TomatoTopping<P> {
    pub fn on(pizza: P) -> Self {
        Self { pizza }
    }
}

impl<P: Pizza> CheeseTopping<P> {
    pub fn on(pizza: P) -> Self {
        Self { pizza }
    }
}

impl<P: Pizza> Pizza for TomatoTopping<P> {
    fn price(&self) -> u32 {
        self.pizza.price() + 7
    }

    fn description(&self) -> String {
        format!("{} + tomato", self.pizza.description())
    }
}

impl<P: Pizza> Pizza for CheeseTopping<P> {
    fn price(&self) -> u32 {
        self.pizza.price() + 10
    }

    fn description(&self) -> String {
        format!("{} + cheese", self.pizza.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn test_timed_passes_result_through() {
        let op = NamedOperation::new("sum", || Ok((1..=10).sum::<u32>().to_string()));
        let mut timed = Timed::new(op);

        assert_eq!(timed.last_duration(), None);
        assert_eq!(timed.execute().unwrap(), "55");
        assert_eq!(timed.calls(), 1);
        assert!(timed.last_duration().is_some());
        assert_eq!(timed.name(), "sum");
        assert_eq!(timed.into_inner().execute().unwrap(), "55");
    }

    #[test]
    fn test_timed_passes_errors_through() {
        let op = NamedOperation::new("fail", || Err(CatalogError::NothingToUndo));
        let mut timed = Timed::new(op);
        assert_eq!(timed.execute(), Err(CatalogError::NothingToUndo));
        assert_eq!(timed.calls(), 1);
    }

    #[test]
    fn test_toppings_stack() {
        let pizza = CheeseTopping::on(TomatoTopping::on(VeggieMania));
        assert_eq!(pizza.price(), 32);
        assert_eq!(pizza.description(), "veggie mania + tomato + cheese");
    }
}

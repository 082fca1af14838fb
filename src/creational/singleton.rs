//! Pattern: Singleton
//!
//! Two ways to guarantee a single construction under concurrent first access:
//! double-checked locking over an `RwLock`, and a run-once gate over `OnceLock`.
//! Process-wide instances are reached through accessor functions, never through a
//! mutable global.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, RwLock};
use std::thread;

use lazy_static::lazy_static;

// ============================================
// 1. Double-checked locking
// ============================================

/// Lazily constructed shared value guarded by check-lock-check-create.
pub struct DoubleChecked<T> {
    slot: RwLock<Option<Arc<T>>>,
    constructions: AtomicUsize,
}

impl<T> Default for DoubleChecked<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoubleChecked<T> {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            constructions: AtomicUsize::new(0),
        }
    }

    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> Arc<T> {
        // First check: shared lock only.
        {
            let guard = self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(existing) = guard.as_ref() {
                tracing::trace!("single instance already created");
                return Arc::clone(existing);
            }
        }

        // Second check under the exclusive lock: another racer may have won.
        let mut guard = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(existing) = guard.as_ref() {
            tracing::trace!("single instance created by another caller");
            return Arc::clone(existing);
        }

        tracing::info!("creating single instance now");
        let created = Arc::new(init());
        self.constructions.fetch_add(1, Ordering::SeqCst);
        *guard = Some(Arc::clone(&created));
        created
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

// ============================================
// 2. Run-once gate
// ============================================

/// Shared value whose initializer is executed exactly once.
pub struct RunOnce<T> {
    cell: OnceLock<Arc<T>>,
    constructions: AtomicUsize,
}

impl<T> Default for RunOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RunOnce<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            constructions: AtomicUsize::new(0),
        }
    }

    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> Arc<T> {
        let value = self.cell.get_or_init(|| {
            tracing::info!("creating run-once instance now");
            self.constructions.fetch_add(1, Ordering::SeqCst);
            Arc::new(init())
        });
        Arc::clone(value)
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

// ============================================
// 3. Racing initializers
// ============================================

/// Launches `racers` threads that all call `access` at once and collects what each got.
pub fn race<T, F>(racers: usize, access: F) -> Vec<Arc<T>>
where
    T: Send + Sync,
    F: Fn() -> Arc<T> + Sync,
{
    let barrier = std::sync::Barrier::new(racers);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..racers)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    access()
                })
            })
            .collect();

        handles
            .into_iter()
            .filter_map(|handle| handle.join().ok())
            .collect()
    })
}

/// True when every handle points at the same allocation.
pub fn all_same<T>(handles: &[Arc<T>]) -> bool {
    handles
        .windows(2)
        .all(|pair| Arc::ptr_eq(&pair[0], &pair[1]))
}

// ============================================
// 4. Process-wide instances
// ============================================

/// The value behind the double-checked global.
#[derive(Debug)]
pub struct Single {
    pub created_by: String,
}

/// The value behind the run-once global.
#[derive(Debug)]
pub struct SingleWithOnce {
    pub created_by: String,
}

/// One logger for the whole process; every caller shares its line buffer.
#[derive(Debug, Default)]
pub struct AppLogger {
    lines: std::sync::Mutex<Vec<String>>,
}

impl AppLogger {
    pub fn log(&self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!(%line, "app logger");
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

static SHARED: DoubleChecked<Single> = DoubleChecked::new();
static ONCE: RunOnce<SingleWithOnce> = RunOnce::new();

lazy_static! {
    static ref LOGGER: AppLogger = AppLogger::default();
}

fn current_thread_label() -> String {
    format!("{:?}", thread::current().id())
}

pub fn shared_instance() -> Arc<Single> {
    SHARED.get_or_init(|| Single {
        created_by: current_thread_label(),
    })
}

pub fn shared_constructions() -> usize {
    SHARED.constructions()
}

pub fn once_instance() -> Arc<SingleWithOnce> {
    ONCE.get_or_init(|| SingleWithOnce {
        created_by: current_thread_label(),
    })
}

pub fn once_constructions() -> usize {
    ONCE.constructions()
}

pub fn logger() -> &'static AppLogger {
    &LOGGER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_checked_single_construction() {
        let cell: DoubleChecked<u64> = DoubleChecked::new();
        let handles = race(16, || cell.get_or_init(|| 42));

        assert_eq!(handles.len(), 16);
        assert_eq!(cell.constructions(), 1);
        assert!(all_same(&handles));
        assert_eq!(*handles[0], 42);
    }

    #[test]
    fn test_run_once_single_construction() {
        let cell: RunOnce<String> = RunOnce::new();
        assert!(cell.get().is_none());

        let handles = race(16, || cell.get_or_init(|| "only".to_string()));
        assert_eq!(cell.constructions(), 1);
        assert!(all_same(&handles));
        assert!(Arc::ptr_eq(&cell.get().unwrap(), &handles[0]));
    }

    #[test]
    fn test_process_wide_accessors() {
        let first = shared_instance();
        let second = shared_instance();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(shared_constructions(), 1);

        let once_a = once_instance();
        let once_b = once_instance();
        assert!(Arc::ptr_eq(&once_a, &once_b));
        assert_eq!(once_constructions(), 1);
    }

    #[test]
    fn test_logger_is_shared() {
        logger().log("from test");
        assert!(std::ptr::eq(logger(), logger()));
        assert!(logger().lines().iter().any(|l| l == "from test"));
    }
}

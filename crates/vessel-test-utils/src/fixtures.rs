//! Reusable element fixtures.

use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::Arc;

/// Run `f`, reporting whether it panicked.
pub fn panics<R>(f: impl FnOnce() -> R) -> bool {
    panic::catch_unwind(AssertUnwindSafe(f)).is_err()
}

/// Shared counters for a family of [`Tracked`] values.
///
/// `live()` going negative means something was dropped twice; staying
/// positive after every owner is gone means something leaked.
#[derive(Clone, Default)]
pub struct LiveTracker {
    live: Arc<AtomicIsize>,
    created: Arc<AtomicUsize>,
}

impl LiveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracked value.
    pub fn track(&self, value: i32) -> Tracked {
        self.on_create();
        Tracked {
            value,
            tracker: self.clone(),
        }
    }

    /// Instances currently alive.
    pub fn live(&self) -> isize {
        self.live.load(Ordering::Relaxed)
    }

    /// Instances ever created, clones included.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    fn on_create(&self) {
        self.live.fetch_add(1, Ordering::Relaxed);
        self.created.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for LiveTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveTracker")
            .field("live", &self.live())
            .field("created", &self.created())
            .finish()
    }
}

/// An `i32` whose construction and destruction are counted by a
/// [`LiveTracker`].
pub struct Tracked {
    pub value: i32,
    tracker: LiveTracker,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.tracker.track(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.tracker.live.fetch_sub(1, Ordering::Relaxed);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// Counts clones across a family of [`CloneBomb`]s and fires on one of them.
#[derive(Debug)]
pub struct CloneFuse {
    clones: AtomicUsize,
    fail_at: AtomicUsize,
}

impl CloneFuse {
    const DISARMED: usize = usize::MAX;

    /// A fuse that never fires until [`arm`](Self::arm)ed.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            clones: AtomicUsize::new(0),
            fail_at: AtomicUsize::new(Self::DISARMED),
        })
    }

    /// Reset the clone count and panic on clone number `index` (zero-based)
    /// from now on.
    pub fn arm(&self, index: usize) {
        self.clones.store(0, Ordering::Relaxed);
        self.fail_at.store(index, Ordering::Relaxed);
    }

    pub fn disarm(&self) {
        self.fail_at.store(Self::DISARMED, Ordering::Relaxed);
    }

    /// Clone attempts since the last `arm`, the failing one included.
    pub fn clones(&self) -> usize {
        self.clones.load(Ordering::Relaxed)
    }
}

/// A [`Tracked`] value whose `Clone` panics when its [`CloneFuse`] says so.
pub struct CloneBomb {
    pub item: Tracked,
    fuse: Arc<CloneFuse>,
}

impl CloneBomb {
    pub fn new(tracker: &LiveTracker, fuse: &Arc<CloneFuse>, value: i32) -> Self {
        Self {
            item: tracker.track(value),
            fuse: Arc::clone(fuse),
        }
    }

    pub fn value(&self) -> i32 {
        self.item.value
    }
}

impl Clone for CloneBomb {
    fn clone(&self) -> Self {
        let n = self.fuse.clones.fetch_add(1, Ordering::Relaxed);
        if n == self.fuse.fail_at.load(Ordering::Relaxed) {
            panic!("CloneBomb: deliberate failure on clone #{n}");
        }
        Self {
            item: self.item.clone(),
            fuse: Arc::clone(&self.fuse),
        }
    }
}

impl fmt::Debug for CloneBomb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CloneBomb({})", self.item.value)
    }
}

thread_local! {
    static DEFAULT_BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
    static DEFAULT_LIVE: Cell<isize> = const { Cell::new(0) };
    static DEFAULT_CREATED: Cell<usize> = const { Cell::new(0) };
}

/// A value whose `Default` panics once the current thread's construction
/// budget is spent.
///
/// Budget and live count are per thread, so parallel tests do not
/// interfere with each other.
#[derive(Debug)]
pub struct DefaultBomb {
    /// Order of construction on this thread, starting at zero.
    pub serial: usize,
}

impl DefaultBomb {
    /// Allow `successes` more default constructions on this thread, then
    /// panic on the next one.
    pub fn arm(successes: usize) {
        DEFAULT_BUDGET.with(|b| b.set(Some(successes)));
    }

    pub fn disarm() {
        DEFAULT_BUDGET.with(|b| b.set(None));
    }

    /// Instances alive on this thread.
    pub fn live() -> isize {
        DEFAULT_LIVE.with(Cell::get)
    }
}

impl Default for DefaultBomb {
    fn default() -> Self {
        let budget = DEFAULT_BUDGET.with(Cell::get);
        match budget {
            Some(0) => panic!("DefaultBomb: construction budget exhausted"),
            Some(n) => DEFAULT_BUDGET.with(|b| b.set(Some(n - 1))),
            None => {}
        }
        DEFAULT_LIVE.with(|live| live.set(live.get() + 1));
        let serial = DEFAULT_CREATED.with(|created| created.replace(created.get() + 1));
        Self { serial }
    }
}

impl Drop for DefaultBomb {
    fn drop(&mut self) {
        DEFAULT_LIVE.with(|live| live.set(live.get() - 1));
    }
}

//! The [`Locker`] capability and its RAII guards.

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A mutual-exclusion capability guarding one container instance.
///
/// Implementations must be safe to call from any thread. `unlock` is only ever
/// called by the thread that completed the matching `lock`.
pub trait Locker: Send + Sync {
    /// Blocks until the calling thread holds the lock.
    fn lock(&self);

    /// Releases a lock previously acquired with [`Locker::lock`].
    fn unlock(&self);
}

/// Shared handle to a [`Locker`], as stored by every container.
///
/// Wrappers built on the same sequence share this handle, so locking the
/// wrapper and locking the sequence are the same operation.
pub type SharedLocker = Arc<dyn Locker>;

/// A locker that does nothing.
///
/// This is the default locker of every container. Individual calls stay
/// memory safe, but a sequence of calls from several threads is not atomic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopLocker;

impl Locker for NoopLocker {
    #[inline]
    fn lock(&self) {}

    #[inline]
    fn unlock(&self) {}
}

pub(crate) fn default_locker() -> SharedLocker {
    Arc::new(NoopLocker)
}

/// Holds a [`Locker`] for as long as the guard is alive.
///
/// # Examples
///
/// ```rust
/// use ordvec::sync::{BlockingLocker, LockGuard};
///
/// let locker = BlockingLocker::new();
/// {
///     let _guard = LockGuard::acquire(&locker);
///     assert!(locker.is_locked());
/// }
/// assert!(!locker.is_locked());
/// ```
#[must_use = "the locker is released as soon as the guard is dropped"]
pub struct LockGuard<'a> {
    locker: &'a dyn Locker,
}

impl<'a> LockGuard<'a> {
    /// Acquires `locker` and returns a guard releasing it on drop.
    pub fn acquire(locker: &'a dyn Locker) -> Self {
        locker.lock();
        Self { locker }
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.locker.unlock();
    }
}

impl fmt::Debug for LockGuard<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("LockGuard").finish_non_exhaustive()
    }
}

/// Guards for several lockers taken in one global order.
///
/// Lockers are acquired by ascending address, whichever operand they belong
/// to, and released in reverse. Two threads running `a.union(&b)` and
/// `b.union(&a)` therefore contend for the same locker first. A locker shared
/// by two operands is acquired once, so `a.merge(&a)` does not deadlock on a
/// non-reentrant locker.
pub(crate) struct OrderedGuards<'a> {
    guards: SmallVec<[LockGuard<'a>; 2]>,
}

impl<'a> OrderedGuards<'a> {
    pub(crate) fn acquire(lockers: &[&'a SharedLocker]) -> Self {
        let mut ordered: SmallVec<[&'a SharedLocker; 2]> = lockers.iter().copied().collect();
        ordered.sort_unstable_by_key(|locker| address(locker));
        ordered.dedup_by_key(|locker| address(locker));
        if ordered.len() < lockers.len() {
            trace!("operands share a locker, acquiring it once");
        }
        let guards = ordered
            .into_iter()
            .map(|locker| LockGuard::acquire(&**locker))
            .collect();
        Self { guards }
    }

    #[cfg(test)]
    fn held(&self) -> usize {
        self.guards.len()
    }
}

fn address(locker: &SharedLocker) -> usize {
    Arc::as_ptr(locker).cast::<()>().addr()
}

impl Drop for OrderedGuards<'_> {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

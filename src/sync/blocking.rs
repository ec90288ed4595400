//! A blocking, non-reentrant [`Locker`].

use super::Locker;
use parking_lot::{Condvar, Mutex};

/// A mutual-exclusion lock that can be held across calls.
///
/// Unlike a scoped mutex guard, `lock` and `unlock` are separate calls, which
/// is what the [`Locker`] capability requires. Waiters block indefinitely; there
/// is no timeout and no reentrancy: locking twice from the same thread
/// deadlocks.
///
/// # Examples
///
/// ```rust
/// use ordvec::sync::{BlockingLocker, Locker};
///
/// let locker = BlockingLocker::new();
/// locker.lock();
/// assert!(locker.is_locked());
/// locker.unlock();
/// assert!(!locker.is_locked());
/// ```
#[derive(Debug, Default)]
pub struct BlockingLocker {
    locked: Mutex<bool>,
    released: Condvar,
}

impl BlockingLocker {
    /// Creates an unlocked locker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            locked: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    /// Returns `true` while some thread holds the lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        *self.locked.lock()
    }
}

impl Locker for BlockingLocker {
    fn lock(&self) {
        let mut locked = self.locked.lock();
        while *locked {
            self.released.wait(&mut locked);
        }
        *locked = true;
    }

    fn unlock(&self) {
        *self.locked.lock() = false;
        self.released.notify_one();
    }
}

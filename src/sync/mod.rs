//! Injectable mutual-exclusion capabilities.
//!
//! Every container owns one [`Locker`] that defines its critical sections.
//! Public operations acquire it for their whole duration through a
//! [`LockGuard`], so the locker is released on every exit path, failures and
//! panics included.
//!
//! - [`NoopLocker`]: the default; does nothing. Suitable for single-threaded
//!   use. Memory safety never depends on the locker, only multi-call
//!   atomicity does.
//! - [`BlockingLocker`]: a real, non-reentrant lock that blocks until the
//!   current holder releases it.
//!
//! Custom lockers only need to implement [`Locker::lock`] and
//! [`Locker::unlock`].
//!
//! # Examples
//!
//! ```rust
//! use ordvec::Sequence;
//! use ordvec::sync::BlockingLocker;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let sequence = Arc::new(Sequence::new().with_locker(BlockingLocker::new()));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let sequence = Arc::clone(&sequence);
//!         thread::spawn(move || sequence.append((0..10).map(|value| worker * 10 + value)))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(sequence.len(), 40);
//! ```

mod blocking;
mod locker;

pub use blocking::BlockingLocker;
pub use locker::{LockGuard, Locker, NoopLocker, SharedLocker};

pub(crate) use locker::{OrderedGuards, default_locker};

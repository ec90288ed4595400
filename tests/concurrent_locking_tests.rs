//! Integration tests for containers shared between threads.
//!
//! These tests inject a `BlockingLocker` and verify that concurrent calls,
//! including symmetric binary operations, complete with consistent results.

use ordvec::sync::{BlockingLocker, Locker, SharedLocker};
use ordvec::{Direction, Order, Sequence, Set};
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

#[rstest]
fn test_concurrent_appends_keep_batches_contiguous() {
    let sequence = Arc::new(Sequence::new().with_locker(BlockingLocker::new()));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let sequence = Arc::clone(&sequence);
            thread::spawn(move || {
                for batch in 0..50 {
                    let base = (worker * 50 + batch) * 4;
                    sequence.append([base, base + 1, base + 2, base + 3]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let contents = sequence.to_vec();
    assert_eq!(contents.len(), 8 * 50 * 4);
    // Each append is atomic: batches never interleave
    for chunk in contents.chunks(4) {
        assert_eq!(chunk[0] % 4, 0);
        assert_eq!(chunk, [chunk[0], chunk[0] + 1, chunk[0] + 2, chunk[0] + 3]);
    }
}

#[rstest]
fn test_concurrent_adds_keep_order_sorted() {
    let order = Arc::new(Order::new(Direction::Descending).with_locker(BlockingLocker::new()));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let order = Arc::clone(&order);
            thread::spawn(move || {
                for value in 0..200 {
                    order.add([value * 4 + worker]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let contents = order.to_vec();
    assert_eq!(contents, (0..800).rev().collect::<Vec<_>>());
}

#[rstest]
fn test_symmetric_unions_complete() {
    let left = Arc::new((1..=500).collect::<Set<i32>>().with_locker(BlockingLocker::new()));
    let right = Arc::new((250..=750).collect::<Set<i32>>().with_locker(BlockingLocker::new()));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let (receiver, argument) = if worker % 2 == 0 {
                (Arc::clone(&left), Arc::clone(&right))
            } else {
                (Arc::clone(&right), Arc::clone(&left))
            };
            thread::spawn(move || {
                (0..25)
                    .map(|_| receiver.union(&argument).len())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let lengths = handle.join().expect("Thread panicked");
        assert!(lengths.iter().all(|len| *len == 750));
    }
}

#[rstest]
fn test_unions_interleaved_with_additions() {
    let left: Arc<Set<i32>> = Arc::new(Set::new().with_locker(BlockingLocker::new()));
    let right: Arc<Set<i32>> = Arc::new(Set::new().with_locker(BlockingLocker::new()));

    let writers: Vec<_> = [Arc::clone(&left), Arc::clone(&right)]
        .into_iter()
        .enumerate()
        .map(|(offset, set)| {
            thread::spawn(move || {
                for value in 0..300 {
                    set.add([value * 2 + i32::try_from(offset).unwrap_or(0)]);
                }
            })
        })
        .collect();

    let reader = {
        let left = Arc::clone(&left);
        let right = Arc::clone(&right);
        thread::spawn(move || {
            for _ in 0..50 {
                let union = right.union(&left);
                let contents = union.to_vec();
                assert!(contents.windows(2).all(|window| window[0] < window[1]));
            }
        })
    };

    for handle in writers {
        handle.join().expect("Thread panicked");
    }
    reader.join().expect("Thread panicked");

    assert_eq!(left.union(&right).to_vec(), (0..600).collect::<Vec<_>>());
}

/// Counts how often it is acquired.
struct CountingLocker {
    inner: BlockingLocker,
    acquisitions: AtomicUsize,
}

impl Locker for CountingLocker {
    fn lock(&self) {
        self.inner.lock();
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    fn unlock(&self) {
        self.inner.unlock();
    }
}

#[rstest]
fn test_shared_locker_is_acquired_once_per_binary_call() {
    let counting = Arc::new(CountingLocker {
        inner: BlockingLocker::new(),
        acquisitions: AtomicUsize::new(0),
    });
    let shared: SharedLocker = counting.clone();

    let left = [1, 3]
        .into_iter()
        .collect::<Order<i32>>()
        .with_shared_locker(Arc::clone(&shared));
    let right = [2].into_iter().collect::<Order<i32>>().with_shared_locker(shared);

    let before = counting.acquisitions.load(Ordering::Relaxed);
    assert_eq!(left.merge(&right).to_vec(), vec![1, 2, 3]);
    assert_eq!(counting.acquisitions.load(Ordering::Relaxed), before + 1);
}

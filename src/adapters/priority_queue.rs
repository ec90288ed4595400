use crate::sequence::{Sequence, unlocked};
use crate::sync::{Locker, SharedLocker};
use crate::ContainerError;
use std::fmt;

/// A value tagged with its priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prioritized<T> {
    /// Priority of the value under the queue's [`PriorityOrder`].
    pub priority: i64,
    /// The queued value.
    pub value: T,
}

/// Decides whether a new priority is dequeued before an existing one.
///
/// # Examples
///
/// ```rust
/// use ordvec::adapters::PriorityOrder;
///
/// assert!(PriorityOrder::DIRECT.precedes(5, 1));
/// assert!(PriorityOrder::REVERSE.precedes(1, 5));
/// assert!(!PriorityOrder::DIRECT.precedes(5, 5));
/// ```
#[derive(Clone, Copy)]
pub struct PriorityOrder(fn(i64, i64) -> bool);

const fn higher_first(new: i64, existing: i64) -> bool {
    new > existing
}

const fn lower_first(new: i64, existing: i64) -> bool {
    new < existing
}

impl PriorityOrder {
    /// Higher priorities are dequeued first.
    pub const DIRECT: Self = Self(higher_first);

    /// Lower priorities are dequeued first.
    pub const REVERSE: Self = Self(lower_first);

    /// Wraps a custom precedence predicate.
    #[must_use]
    pub const fn new(precedes: fn(i64, i64) -> bool) -> Self {
        Self(precedes)
    }

    /// Returns `true` if a value of priority `new` goes before one of
    /// priority `existing`.
    #[inline]
    #[must_use]
    pub fn precedes(self, new: i64, existing: i64) -> bool {
        (self.0)(new, existing)
    }
}

impl Default for PriorityOrder {
    fn default() -> Self {
        Self::DIRECT
    }
}

impl fmt::Debug for PriorityOrder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("PriorityOrder").finish_non_exhaustive()
    }
}

/// A queue dequeuing values by priority, FIFO among equal priorities.
///
/// Enqueueing scans linearly for the insertion point.
pub struct PriorityQueue<T> {
    order: PriorityOrder,
    sequence: Sequence<Prioritized<T>>,
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue dequeuing higher priorities first.
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(PriorityOrder::DIRECT)
    }

    /// Creates an empty queue with the given precedence.
    ///
    /// ```rust
    /// use ordvec::adapters::{PriorityOrder, PriorityQueue};
    ///
    /// let queue = PriorityQueue::with_order(PriorityOrder::REVERSE);
    /// queue.enqueue(3, 'c');
    /// queue.enqueue(1, 'a');
    /// assert_eq!(queue.dequeue(), Ok('a'));
    /// ```
    #[must_use]
    pub fn with_order(order: PriorityOrder) -> Self {
        Self {
            order,
            sequence: Sequence::new(),
        }
    }

    /// Replaces the locker guarding this queue.
    #[must_use]
    pub fn with_locker<L: Locker + 'static>(self, locker: L) -> Self {
        Self {
            sequence: self.sequence.with_locker(locker),
            ..self
        }
    }

    /// Returns a handle to the locker guarding this queue.
    #[must_use]
    pub fn locker(&self) -> SharedLocker {
        self.sequence.locker()
    }

    /// Queues `value` before the first element it precedes.
    pub fn enqueue(&self, priority: i64, value: T) {
        let order = self.order;
        self.sequence.locked(|data| {
            let index = data
                .iter()
                .position(|existing| order.precedes(priority, existing.priority))
                .unwrap_or(data.len());
            data.insert(index, Prioritized { priority, value });
        });
    }

    /// Removes and returns the value with the most urgent priority.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the queue is empty.
    pub fn dequeue(&self) -> Result<T, ContainerError> {
        self.sequence.remove(0).map(|entry| entry.value)
    }

    /// Returns the number of queued values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl<T: Clone> PriorityQueue<T> {
    /// Returns a copy of the next value to be dequeued.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the queue is empty.
    pub fn peek(&self) -> Result<T, ContainerError> {
        self.sequence
            .with_slice(|data| unlocked::first_of(data).map(|entry| entry.value.clone()))
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PriorityQueue")
            .field("elements", &self.sequence)
            .finish_non_exhaustive()
    }
}

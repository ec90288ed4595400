use crate::sequence::{Sequence, unlocked};
use crate::sync::{Locker, SharedLocker};
use crate::ContainerError;
use std::fmt;

/// Which end of a [`Queue`] new values enter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueKind {
    /// First in, first out: values are appended at the back.
    #[default]
    Fifo,
    /// Last in, first out: values are inserted at the front.
    Lifo,
}

/// A queue whose front is index 0 of its sequence.
///
/// # Examples
///
/// ```rust
/// use ordvec::adapters::{Queue, QueueKind};
///
/// let queue = Queue::new(QueueKind::Lifo);
/// queue.enqueue(1);
/// queue.enqueue(2);
/// assert_eq!(queue.peek(), Ok(2));
/// assert_eq!(queue.dequeue(), Ok(2));
/// assert_eq!(queue.dequeue(), Ok(1));
/// assert!(queue.dequeue().is_err());
/// ```
pub struct Queue<T> {
    kind: QueueKind,
    sequence: Sequence<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue of the given kind.
    #[must_use]
    pub fn new(kind: QueueKind) -> Self {
        Self {
            kind,
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

    /// Returns the kind of this queue.
    #[must_use]
    pub const fn kind(&self) -> QueueKind {
        self.kind
    }

    /// Adds a value at the end its kind dictates.
    pub fn enqueue(&self, value: T) {
        match self.kind {
            QueueKind::Fifo => self.sequence.push(value),
            QueueKind::Lifo => self.sequence.locked(|data| data.insert(0, value)),
        }
    }

    /// Removes and returns the front value.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the queue is empty.
    pub fn dequeue(&self) -> Result<T, ContainerError> {
        self.sequence.remove(0)
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

impl<T: Clone> Queue<T> {
    /// Returns a copy of the front value without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the queue is empty.
    pub fn peek(&self) -> Result<T, ContainerError> {
        self.sequence
            .with_slice(|data| unlocked::first_of(data).cloned())
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new(QueueKind::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Queue")
            .field("kind", &self.kind)
            .field("elements", &self.sequence)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(QueueKind::Fifo, vec![1, 2, 3])]
    #[case(QueueKind::Lifo, vec![3, 2, 1])]
    fn test_dequeue_order(#[case] kind: QueueKind, #[case] expected: Vec<i32>) {
        let queue = Queue::new(kind);
        for value in 1..=3 {
            queue.enqueue(value);
        }
        let drained: Vec<i32> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
        assert_eq!(drained, expected);
    }

    #[rstest]
    fn test_empty_queue() {
        let queue: Queue<i32> = Queue::default();
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), Err(ContainerError::EmptyContainer));
        assert_eq!(queue.peek(), Err(ContainerError::EmptyContainer));
    }

    #[rstest]
    fn test_peek_does_not_remove() {
        let queue = Queue::new(QueueKind::Fifo);
        queue.enqueue("a");
        assert_eq!(queue.peek(), Ok("a"));
        assert_eq!(queue.len(), 1);
    }
}

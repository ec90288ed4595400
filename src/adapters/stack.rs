use crate::sequence::{Sequence, unlocked};
use crate::sync::{Locker, SharedLocker};
use crate::ContainerError;
use std::fmt;

/// A last-in, first-out stack whose top is index 0 of its sequence.
///
/// # Examples
///
/// ```rust
/// use ordvec::adapters::Stack;
///
/// let stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
/// assert_eq!(stack.top(), Ok(2));
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.len(), 1);
/// ```
pub struct Stack<T> {
    sequence: Sequence<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sequence: Sequence::new(),
        }
    }

    /// Replaces the locker guarding this stack.
    #[must_use]
    pub fn with_locker<L: Locker + 'static>(self, locker: L) -> Self {
        Self {
            sequence: self.sequence.with_locker(locker),
        }
    }

    /// Returns a handle to the locker guarding this stack.
    #[must_use]
    pub fn locker(&self) -> SharedLocker {
        self.sequence.locker()
    }

    /// Puts a value on top.
    pub fn push(&self, value: T) {
        self.sequence.locked(|data| data.insert(0, value));
    }

    /// Removes and returns the top value.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the stack is empty.
    pub fn pop(&self) -> Result<T, ContainerError> {
        self.sequence.remove(0)
    }

    /// Returns the number of values on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl<T: Clone> Stack<T> {
    /// Returns a copy of the top value.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the stack is empty.
    pub fn top(&self) -> Result<T, ContainerError> {
        self.sequence
            .with_slice(|data| unlocked::first_of(data).cloned())
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Stack")
            .field("elements", &self.sequence)
            .finish()
    }
}

//! Sequence kept sorted under a comparator and a direction.
//!
//! This module provides [`Order`], a [`Sequence`] whose elements are always
//! sorted according to a [`Comparator`] and a [`Direction`].
//!
//! # Overview
//!
//! - [`add`](Order::add) places every value with a binary search, after any
//!   existing equal values, so equal keys keep their insertion order
//! - [`first_index_of`](Order::first_index_of) is a true O(log n) lookup of
//!   the leftmost equal element
//! - [`merge`](Order::merge) and [`combine`](Order::combine) walk two orders
//!   with two pointers in O(n + m) and return a new order
//!
//! # Time Complexity
//!
//! | Operation        | Complexity   |
//! |------------------|--------------|
//! | `add` (k values) | O(k (log n + n)) |
//! | `first_index_of` | O(log n)     |
//! | `remove`         | O(n)         |
//! | `merge`          | O(n + m)     |
//! | `combine`        | O(n + m)     |
//!
//! # Lock Order
//!
//! Binary operations hold both operands' lockers for their whole duration.
//! The lockers are taken in an order that does not depend on which operand is
//! the receiver, so `a.merge(&b)` and `b.merge(&a)` may run concurrently.
//! The argument's locker may therefore be taken before the receiver's.
//!
//! # Examples
//!
//! ```rust
//! use ordvec::{Direction, Order};
//!
//! let order = Order::new(Direction::Ascending);
//! order.add([33, 36, 34, 34, 34, 35]);
//!
//! assert_eq!(order.to_vec(), vec![33, 34, 34, 34, 35, 36]);
//! assert_eq!(order.first_index_of(&34), Some(1));
//! assert_eq!(order.first_index_of(&37), None);
//! ```

use crate::compare::{Comparator, Direction, NaturalOrder};
use crate::sequence::{Sequence, Staged, write_list};
use crate::sync::{Locker, OrderedGuards, SharedLocker};
use crate::ContainerError;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// A [`Sequence`] kept sorted by a comparator in a fixed direction.
///
/// Duplicates are allowed. Among equal keys, earlier insertions stay first.
///
/// # Type Parameters
///
/// * `T` - The element type.
/// * `C` - The comparator. Defaults to [`NaturalOrder`].
///
/// # Examples
///
/// ```rust
/// use ordvec::{Direction, Order};
///
/// let order = Order::new(Direction::Descending);
/// order.add([33, 36, 34, 34, 34, 35]);
///
/// assert_eq!(order.to_vec(), vec![36, 35, 34, 34, 34, 33]);
/// assert_eq!(order.first_index_of(&34), Some(2));
/// ```
pub struct Order<T, C = NaturalOrder> {
    sequence: Sequence<T>,
    comparator: C,
    direction: Direction,
}

static_assertions::assert_impl_all!(Order<i32>: Send, Sync);

impl<T: Ord> Order<T> {
    /// Creates an empty order using the natural ordering of `T`.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self::with_comparator(NaturalOrder, direction)
    }

    /// Creates an empty ascending order using the natural ordering of `T`.
    #[must_use]
    pub fn ascending() -> Self {
        Self::new(Direction::Ascending)
    }

    /// Creates an empty descending order using the natural ordering of `T`.
    #[must_use]
    pub fn descending() -> Self {
        Self::new(Direction::Descending)
    }
}

impl<T, C: Comparator<T>> Order<T, C> {
    /// Creates an empty order with a custom comparator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordvec::{Direction, Order};
    ///
    /// let by_length = |lhs: &String, rhs: &String| lhs.len().cmp(&rhs.len());
    /// let order = Order::with_comparator(by_length, Direction::Ascending);
    /// order.add(["ccc".to_string(), "a".to_string(), "bb".to_string()]);
    ///
    /// assert_eq!(order.to_vec(), vec!["a", "bb", "ccc"]);
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C, direction: Direction) -> Self {
        Self::from_sorted_vec(Vec::new(), comparator, direction)
    }

    /// Wraps a vector already sorted for `comparator` and `direction`.
    pub(crate) fn from_sorted_vec(data: Vec<T>, comparator: C, direction: Direction) -> Self {
        debug_assert!(
            Ranker::new(&comparator, direction).is_sorted(&data),
            "an order must be built from elements sorted for its comparator and direction"
        );
        Self {
            sequence: Sequence::from_vec(data),
            comparator,
            direction,
        }
    }

    /// Replaces the locker guarding this order.
    #[must_use]
    pub fn with_locker<L: Locker + 'static>(self, locker: L) -> Self {
        Self {
            sequence: self.sequence.with_locker(locker),
            ..self
        }
    }

    /// Replaces the locker with a handle that may be shared with other
    /// containers.
    #[must_use]
    pub fn with_shared_locker(self, locker: SharedLocker) -> Self {
        Self {
            sequence: self.sequence.with_shared_locker(locker),
            ..self
        }
    }

    /// Returns a handle to the locker guarding this order.
    #[must_use]
    pub fn locker(&self) -> SharedLocker {
        self.sequence.locker()
    }

    /// Returns the direction of this order.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the comparator of this order.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    pub(crate) const fn sequence(&self) -> &Sequence<T> {
        &self.sequence
    }

    pub(crate) const fn ranker(&self) -> Ranker<'_, C> {
        Ranker::new(&self.comparator, self.direction)
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the order holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Adds every value at its sorted position and returns how many values
    /// were added (always the number of values given).
    ///
    /// A value equal to existing elements is placed after all of them.
    pub fn add<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let values: Staged<T> = values.into_iter().collect();
        let ranker = self.ranker();
        self.sequence.locked(|data| {
            let count = values.len();
            for value in values {
                let index = ranker.insertion_point(data, &value);
                data.insert(index, value);
            }
            count
        })
    }

    /// Returns the index of the leftmost element equal to `value`, or `None`.
    ///
    /// # Complexity
    ///
    /// O(log n).
    #[must_use]
    pub fn first_index_of(&self, value: &T) -> Option<usize> {
        let ranker = self.ranker();
        self.sequence
            .with_slice(|data| ranker.search(data, value).ok())
    }

    /// Returns `true` if some element compares equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.first_index_of(value).is_some()
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] on an empty order and
    /// [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove(&self, index: usize) -> Result<T, ContainerError> {
        self.sequence.remove(index)
    }

    /// Visits every `(index, value)` pair in sorted order; see
    /// [`Sequence::try_for_each`].
    ///
    /// # Errors
    ///
    /// Propagates the first error produced by `visitor`.
    pub fn try_for_each<E, F>(&self, visitor: F) -> Result<(), E>
    where
        F: FnMut(usize, &T) -> Result<(), E>,
    {
        self.sequence.try_for_each(visitor)
    }

    /// Runs `reader` on the sorted elements inside a critical section.
    pub fn with_slice<R>(&self, reader: impl FnOnce(&[T]) -> R) -> R {
        self.sequence.with_slice(reader)
    }
}

impl<T: Clone, C: Comparator<T>> Order<T, C> {
    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<T, ContainerError> {
        self.sequence.get(index)
    }

    /// Returns a copy of the first element in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the order is empty.
    pub fn first(&self) -> Result<T, ContainerError> {
        self.sequence.first()
    }

    /// Returns a copy of the last element in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the order is empty.
    pub fn last(&self) -> Result<T, ContainerError> {
        self.sequence.last()
    }

    /// Returns a snapshot of the sorted elements.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.sequence.to_vec()
    }
}

impl<T: Clone, C: Comparator<T> + Clone> Order<T, C> {
    /// Merges two orders into a new one, keeping duplicates.
    ///
    /// Both orders must share a direction and a compatible comparator. On
    /// ties the receiver's element comes first. Neither operand is modified
    /// and the result has its own default locker.
    ///
    /// # Complexity
    ///
    /// O(n + m).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordvec::Order;
    ///
    /// let left: Order<i32> = [1, 3, 5].into_iter().collect();
    /// let right: Order<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// assert_eq!(left.merge(&right).to_vec(), vec![1, 2, 3, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn merge(&self, rhs: &Self) -> Self {
        let ranker = self.ranker();
        self.binary(rhs, "merged orders", |left, right| ranker.merge(left, right))
    }

    /// Merges two orders into a new one, emitting each distinct key once.
    ///
    /// Walks like [`merge`](Self::merge) but skips any value equal to the
    /// value emitted just before it, so the result is the sorted union without
    /// duplicates.
    ///
    /// # Complexity
    ///
    /// O(n + m).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordvec::Order;
    ///
    /// let left: Order<i32> = [1, 1, 3, 5].into_iter().collect();
    /// let right: Order<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// assert_eq!(left.combine(&right).to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn combine(&self, rhs: &Self) -> Self {
        let ranker = self.ranker();
        self.binary(rhs, "combined orders", |left, right| ranker.combine(left, right))
    }

    fn binary(
        &self,
        rhs: &Self,
        message: &'static str,
        walk: impl FnOnce(&[T], &[T]) -> Vec<T>,
    ) -> Self {
        debug_assert_eq!(
            self.direction, rhs.direction,
            "operands of a binary order operation must share a direction"
        );
        let _guards =
            OrderedGuards::acquire(&[self.sequence.locker_ref(), rhs.sequence.locker_ref()]);
        let left = self.sequence.buffer();
        let right = rhs.sequence.buffer();
        let result = walk(&left, &right);
        trace!(
            lhs_len = left.len(),
            rhs_len = right.len(),
            result_len = result.len(),
            "{message}"
        );
        Self::from_sorted_vec(result, self.comparator.clone(), self.direction)
    }
}

// =============================================================================
// Ranker
// =============================================================================

/// A comparator paired with a direction.
///
/// `rank(a, b) == Less` means `a` belongs before `b`. Every method works on
/// a raw slice and must be called inside the owning critical section.
pub(crate) struct Ranker<'a, C> {
    comparator: &'a C,
    direction: Direction,
}

impl<C> Clone for Ranker<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Ranker<'_, C> {}

impl<'a, C> Ranker<'a, C> {
    pub(crate) const fn new(comparator: &'a C, direction: Direction) -> Self {
        Self {
            comparator,
            direction,
        }
    }

    #[inline]
    pub(crate) fn rank<T>(&self, lhs: &T, rhs: &T) -> Ordering
    where
        C: Comparator<T>,
    {
        self.direction.orient(self.comparator.compare(lhs, rhs))
    }

    #[inline]
    pub(crate) fn equal<T>(&self, lhs: &T, rhs: &T) -> bool
    where
        C: Comparator<T>,
    {
        self.comparator.compare(lhs, rhs) == Ordering::Equal
    }

    /// Index after every element that does not rank after `value`.
    pub(crate) fn insertion_point<T>(&self, data: &[T], value: &T) -> usize
    where
        C: Comparator<T>,
    {
        data.partition_point(|existing| self.rank(existing, value) != Ordering::Greater)
    }

    /// `Ok` with the leftmost index equal to `value`, or `Err` with the index
    /// where `value` would be inserted before any greater element.
    pub(crate) fn search<T>(&self, data: &[T], value: &T) -> Result<usize, usize>
    where
        C: Comparator<T>,
    {
        let index = data.partition_point(|existing| self.rank(existing, value) == Ordering::Less);
        match data.get(index) {
            Some(existing) if self.equal(existing, value) => Ok(index),
            _ => Err(index),
        }
    }

    pub(crate) fn is_sorted<T>(&self, data: &[T]) -> bool
    where
        C: Comparator<T>,
    {
        data.windows(2)
            .all(|window| self.rank(&window[0], &window[1]) != Ordering::Greater)
    }

    /// Two-pointer merge keeping duplicates; ties take `left` first.
    pub(crate) fn merge<T: Clone>(&self, left: &[T], right: &[T]) -> Vec<T>
    where
        C: Comparator<T>,
    {
        let mut result = Vec::with_capacity(left.len() + right.len());
        let mut left_index = 0;
        let mut right_index = 0;

        while left_index < left.len() && right_index < right.len() {
            if self.rank(&left[left_index], &right[right_index]) == Ordering::Greater {
                result.push(right[right_index].clone());
                right_index += 1;
            } else {
                result.push(left[left_index].clone());
                left_index += 1;
            }
        }

        // Tail: at most one side has elements left
        result.extend_from_slice(&left[left_index..]);
        result.extend_from_slice(&right[right_index..]);
        result
    }

    /// Two-pointer merge that never emits a value equal to the previous one.
    pub(crate) fn combine<T: Clone>(&self, left: &[T], right: &[T]) -> Vec<T>
    where
        C: Comparator<T>,
    {
        let mut result: Vec<T> = Vec::with_capacity(left.len() + right.len());
        let mut left_index = 0;
        let mut right_index = 0;

        while left_index < left.len() && right_index < right.len() {
            let next = if self.rank(&left[left_index], &right[right_index]) == Ordering::Greater {
                right_index += 1;
                &right[right_index - 1]
            } else {
                left_index += 1;
                &left[left_index - 1]
            };
            self.push_distinct(&mut result, next);
        }

        for value in left[left_index..].iter().chain(&right[right_index..]) {
            self.push_distinct(&mut result, value);
        }
        result
    }

    fn push_distinct<T: Clone>(&self, result: &mut Vec<T>, value: &T)
    where
        C: Comparator<T>,
    {
        if result
            .last()
            .is_none_or(|previous| !self.equal(previous, value))
        {
            result.push(value.clone());
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Ord> Default for Order<T> {
    #[inline]
    fn default() -> Self {
        Self::ascending()
    }
}

/// Collects into an ascending, naturally ordered `Order`.
///
/// Equal values keep the order in which the iterator produced them.
impl<T: Ord> FromIterator<T> for Order<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut data: Vec<T> = iter.into_iter().collect();
        data.sort();
        Self::from_sorted_vec(data, NaturalOrder, Direction::Ascending)
    }
}

impl<T, C: Comparator<T>> Extend<T> for Order<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<T: PartialEq, C> PartialEq for Order<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.direction == other.direction && self.sequence == other.sequence
    }
}

impl<T: Eq, C> Eq for Order<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for Order<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Order")
            .field("direction", &self.direction)
            .field("elements", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl<T: fmt::Display, C> fmt::Display for Order<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.sequence
            .with_slice(|data| write_list(formatter, data, ("[", "]")))
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for Order<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.sequence, serializer)
    }
}

// =============================================================================
// Tests
// =============================================================================

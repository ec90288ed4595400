//! Sorted collection of unique keys.
//!
//! [`Set`] is an ascending [`Order`] in which no two elements compare equal.
//! Membership is a binary search. The set algebra (union, intersection and
//! both differences) builds a new set and leaves the operands untouched.
//!
//! # Examples
//!
//! ```rust
//! use ordvec::Set;
//!
//! let left: Set<i32> = [1, 2, 3, 4, 5].into_iter().collect();
//! let right: Set<i32> = [4, 5, 6, 7, 8].into_iter().collect();
//!
//! assert_eq!(left.union(&right).to_vec(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
//! assert_eq!(left.intersection(&right).to_vec(), vec![4, 5]);
//! assert_eq!(left.left_difference(&right).to_vec(), vec![1, 2, 3]);
//! assert_eq!(left.right_difference(&right).to_vec(), vec![6, 7, 8]);
//! ```

use crate::compare::{Comparator, Direction, NaturalOrder};
use crate::order::{Order, Ranker};
use crate::sequence::{Staged, write_list};
use crate::sync::{Locker, OrderedGuards, SharedLocker};
use crate::ContainerError;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// An ascending collection of keys, each present at most once.
///
/// # Type Parameters
///
/// * `T` - The element type.
/// * `C` - The comparator deciding key equality. Defaults to [`NaturalOrder`].
///
/// # Examples
///
/// ```rust
/// use ordvec::Set;
///
/// let set = Set::new();
/// assert_eq!(set.add([3, 1, 3, 2]), 3);
/// assert!(set.contains(&2));
/// assert_eq!(set.to_vec(), vec![1, 2, 3]);
/// ```
pub struct Set<T, C = NaturalOrder> {
    order: Order<T, C>,
}

static_assertions::assert_impl_all!(Set<String>: Send, Sync);

impl<T: Ord> Set<T> {
    /// Creates an empty set using the natural ordering of `T`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl Set<String> {
    /// Builds a string set, ordered lexicographically by bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordvec::Set;
    ///
    /// let set = Set::from_strings(["pear", "apple", "pear"]);
    /// assert_eq!(set.to_vec(), vec!["apple", "pear"]);
    /// ```
    #[must_use]
    pub fn from_strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Into::into).collect()
    }
}

impl<T, C: Comparator<T>> Set<T, C> {
    /// Creates an empty set with a custom comparator.
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            order: Order::with_comparator(comparator, Direction::Ascending),
        }
    }

    fn from_sorted_unique(data: Vec<T>, comparator: C) -> Self {
        debug_assert!(
            data.windows(2)
                .all(|window| comparator.compare(&window[0], &window[1]) == Ordering::Less),
            "a set must be built from strictly ascending elements"
        );
        Self {
            order: Order::from_sorted_vec(data, comparator, Direction::Ascending),
        }
    }

    /// Replaces the locker guarding this set.
    #[must_use]
    pub fn with_locker<L: Locker + 'static>(self, locker: L) -> Self {
        Self {
            order: self.order.with_locker(locker),
        }
    }

    /// Replaces the locker with a handle that may be shared with other
    /// containers.
    #[must_use]
    pub fn with_shared_locker(self, locker: SharedLocker) -> Self {
        Self {
            order: self.order.with_shared_locker(locker),
        }
    }

    /// Returns a handle to the locker guarding this set.
    #[must_use]
    pub fn locker(&self) -> SharedLocker {
        self.order.locker()
    }

    /// Returns the comparator of this set.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.order.comparator()
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Adds every value not already present and returns how many were added.
    ///
    /// Values are checked one at a time, so a duplicate within `values` counts
    /// once.
    pub fn add<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let values: Staged<T> = values.into_iter().collect();
        let ranker = self.order.ranker();
        self.order.sequence().locked(|data| {
            let mut added = 0;
            for value in values {
                if let Err(index) = ranker.search(data, &value) {
                    data.insert(index, value);
                    added += 1;
                }
            }
            added
        })
    }

    /// Removes every value that is present and returns how many were removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordvec::Set;
    ///
    /// let set: Set<i32> = (1..=5).collect();
    /// assert_eq!(set.remove(&[2, 4, 9]), 2);
    /// assert_eq!(set.to_vec(), vec![1, 3, 5]);
    /// ```
    pub fn remove<I>(&self, values: I) -> usize
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let values: Staged<I::Item> = values.into_iter().collect();
        let ranker = self.order.ranker();
        self.order.sequence().locked(|data| {
            let mut removed = 0;
            for value in &values {
                if let Ok(index) = ranker.search(data, Borrow::<T>::borrow(value)) {
                    data.remove(index);
                    removed += 1;
                }
            }
            removed
        })
    }

    /// Returns `true` if `value` is in the set.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.order.contains(value)
    }

    /// Returns `true` if at least one of `values` is in the set.
    ///
    /// Stops at the first hit. An empty `values` yields `false`.
    pub fn has_any<I>(&self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.probe(values, |ranker, data, staged| {
            staged
                .iter()
                .any(|value| ranker.search(data, Borrow::<T>::borrow(value)).is_ok())
        })
    }

    /// Returns `true` if every one of `values` is in the set.
    ///
    /// Stops at the first miss. An empty `values` yields `true`.
    pub fn has_all<I>(&self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.probe(values, |ranker, data, staged| {
            staged
                .iter()
                .all(|value| ranker.search(data, Borrow::<T>::borrow(value)).is_ok())
        })
    }

    fn probe<I>(
        &self,
        values: I,
        check: impl FnOnce(Ranker<'_, C>, &[T], &[I::Item]) -> bool,
    ) -> bool
    where
        I: IntoIterator,
    {
        let staged: Staged<I::Item> = values.into_iter().collect();
        let ranker = self.order.ranker();
        self.order
            .with_slice(|data| check(ranker, data, &staged))
    }

    /// Visits every `(index, key)` pair in ascending order.
    ///
    /// # Errors
    ///
    /// Propagates the first error produced by `visitor`.
    pub fn try_for_each<E, F>(&self, visitor: F) -> Result<(), E>
    where
        F: FnMut(usize, &T) -> Result<(), E>,
    {
        self.order.try_for_each(visitor)
    }

    /// Runs `reader` on the ascending keys inside a critical section.
    pub fn with_slice<R>(&self, reader: impl FnOnce(&[T]) -> R) -> R {
        self.order.with_slice(reader)
    }
}

impl<T: Clone, C: Comparator<T>> Set<T, C> {
    /// Returns a copy of the key at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<T, ContainerError> {
        self.order.get(index)
    }

    /// Returns a copy of the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the set is empty.
    pub fn first(&self) -> Result<T, ContainerError> {
        self.order.first()
    }

    /// Returns a copy of the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the set is empty.
    pub fn last(&self) -> Result<T, ContainerError> {
        self.order.last()
    }

    /// Returns the keys in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.order.to_vec()
    }
}

impl<T: Clone, C: Comparator<T> + Clone> Set<T, C> {
    /// Returns the keys present in either set.
    ///
    /// # Complexity
    ///
    /// O(n + m).
    #[must_use]
    pub fn union(&self, rhs: &Self) -> Self {
        Self {
            order: self.order.combine(&rhs.order),
        }
    }

    /// Returns the keys present in both sets.
    ///
    /// # Complexity
    ///
    /// O(n + m).
    #[must_use]
    pub fn intersection(&self, rhs: &Self) -> Self {
        self.binary(rhs, "intersected sets", |comparator, left, right| {
            intersection_slices(left, right, comparator)
        })
    }

    /// Returns the keys of `self` that are not in `rhs`.
    ///
    /// # Complexity
    ///
    /// O(n log m).
    #[must_use]
    pub fn left_difference(&self, rhs: &Self) -> Self {
        self.binary(rhs, "left difference of sets", |comparator, left, right| {
            difference_slices(left, right, comparator)
        })
    }

    /// Returns the keys of `rhs` that are not in `self`.
    ///
    /// # Complexity
    ///
    /// O(m log n).
    #[must_use]
    pub fn right_difference(&self, rhs: &Self) -> Self {
        self.binary(rhs, "right difference of sets", |comparator, left, right| {
            difference_slices(right, left, comparator)
        })
    }

    fn binary(
        &self,
        rhs: &Self,
        message: &'static str,
        walk: impl FnOnce(&C, &[T], &[T]) -> Vec<T>,
    ) -> Self {
        let comparator = self.order.comparator();
        let _guards = OrderedGuards::acquire(&[
            self.order.sequence().locker_ref(),
            rhs.order.sequence().locker_ref(),
        ]);
        let left = self.order.sequence().buffer();
        let right = rhs.order.sequence().buffer();
        let result = walk(comparator, &left, &right);
        trace!(
            lhs_len = left.len(),
            rhs_len = right.len(),
            result_len = result.len(),
            "{message}"
        );
        Self::from_sorted_unique(result, comparator.clone())
    }
}

/// Co-scan of two strictly ascending slices keeping the common keys.
fn intersection_slices<T: Clone, C: Comparator<T>>(
    left: &[T],
    right: &[T],
    comparator: &C,
) -> Vec<T> {
    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match comparator.compare(&left[left_index], &right[right_index]) {
            Ordering::Less => left_index += 1,
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result
}

/// Keys of `source` absent from `excluded`, found by binary search.
fn difference_slices<T: Clone, C: Comparator<T>>(
    source: &[T],
    excluded: &[T],
    comparator: &C,
) -> Vec<T> {
    let ranker = Ranker::new(comparator, Direction::Ascending);
    source
        .iter()
        .filter(|value| ranker.search(excluded, value).is_err())
        .cloned()
        .collect()
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Ord> Default for Set<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Collects into a naturally ordered set; the first of several equal values
/// is the one kept.
impl<T: Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut data: Vec<T> = iter.into_iter().collect();
        data.sort();
        data.dedup();
        Self::from_sorted_unique(data, NaturalOrder)
    }
}

impl<T, C: Comparator<T>> Extend<T> for Set<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<T: PartialEq, C> PartialEq for Set<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<T: Eq, C> Eq for Set<T, C> {}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for Set<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.order
            .with_slice(|data| formatter.debug_set().entries(data.iter()).finish())
    }
}

impl<T: fmt::Display, C: Comparator<T>> fmt::Display for Set<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.order
            .with_slice(|data| write_list(formatter, data, ("{", "}")))
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for Set<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.order, serializer)
    }
}

/// Duplicates in the input collapse to one key, matching [`FromIterator`].
#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Set<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer
            .deserialize_seq(crate::sequence::ElementsVisitor::new())
            .map(|elements: Vec<T>| elements.into_iter().collect())
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Mutable, lock-guarded sequence.
//!
//! This module provides [`Sequence`], a growable random-access list whose
//! every public operation runs inside a critical section of the instance's
//! [`Locker`].
//!
//! # Overview
//!
//! - O(1) amortized [`append`](Sequence::append) and [`push`](Sequence::push)
//! - O(n) [`insert`](Sequence::insert) and [`remove`](Sequence::remove) at
//!   arbitrary positions (elements are shifted in place)
//! - Bounds-checked [`get`](Sequence::get) and [`set`](Sequence::set)
//!
//! Mutating methods take `&self`: the backing buffer lives in a
//! [`parking_lot::RwLock`], so a `Sequence` can be shared between threads
//! (for example behind an `Arc`). Use a [`BlockingLocker`](crate::sync::BlockingLocker)
//! when several calls must not interleave.
//!
//! # Examples
//!
//! ```rust
//! use ordvec::{ContainerError, Sequence};
//!
//! let sequence = Sequence::new();
//! sequence.append([1, 2, 4]);
//! sequence.insert(2, [3]).unwrap();
//!
//! assert_eq!(sequence.to_vec(), vec![1, 2, 3, 4]);
//! assert_eq!(sequence.remove(0), Ok(1));
//! assert_eq!(
//!     sequence.insert(9, [0]),
//!     Err(ContainerError::IndexOutOfRange { index: 9, len: 3 })
//! );
//! ```

use crate::ContainerError;
use crate::sync::{LockGuard, Locker, OrderedGuards, SharedLocker, default_locker};
use parking_lot::{RwLock, RwLockReadGuard};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Values staged before a critical section; small batches stay inline.
pub(crate) type Staged<T> = SmallVec<[T; 8]>;

/// A growable random-access list guarded by an injectable [`Locker`].
///
/// # Examples
///
/// ```rust
/// use ordvec::Sequence;
///
/// let sequence: Sequence<i32> = (1..=3).collect();
/// assert_eq!(sequence.first(), Ok(1));
/// assert_eq!(sequence.last(), Ok(3));
/// assert_eq!(sequence.reversed().to_vec(), vec![3, 2, 1]);
/// ```
pub struct Sequence<T> {
    locker: SharedLocker,
    data: RwLock<Vec<T>>,
}

static_assertions::assert_impl_all!(Sequence<i32>: Send, Sync);

impl<T> Sequence<T> {
    /// Creates an empty sequence with the default no-op locker.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Creates an empty sequence able to hold `capacity` elements without
    /// reallocating.
    ///
    /// ```rust
    /// use ordvec::Sequence;
    ///
    /// let sequence: Sequence<u8> = Sequence::with_capacity(16);
    /// assert!(sequence.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    pub(crate) fn from_vec(data: Vec<T>) -> Self {
        Self {
            locker: default_locker(),
            data: RwLock::new(data),
        }
    }

    /// Replaces the locker guarding this sequence.
    #[must_use]
    pub fn with_locker<L: Locker + 'static>(self, locker: L) -> Self {
        self.with_shared_locker(Arc::new(locker))
    }

    /// Replaces the locker with a handle that may be shared with other
    /// containers.
    #[must_use]
    pub fn with_shared_locker(mut self, locker: SharedLocker) -> Self {
        self.locker = locker;
        self
    }

    /// Returns a handle to the locker guarding this sequence.
    #[must_use]
    pub fn locker(&self) -> SharedLocker {
        Arc::clone(&self.locker)
    }

    pub(crate) const fn locker_ref(&self) -> &SharedLocker {
        &self.locker
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.with_slice(<[T]>::len)
    }

    /// Returns `true` if the sequence holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.with_slice(<[T]>::is_empty)
    }

    /// Appends every value to the end of the sequence, in order.
    ///
    /// # Complexity
    ///
    /// O(k) amortized for k values.
    pub fn append<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values: Staged<T> = values.into_iter().collect();
        self.locked(|data| data.extend(values));
    }

    /// Appends a single value.
    pub fn push(&self, value: T) {
        self.locked(|data| data.push(value));
    }

    /// Inserts the values starting at `index`, shifting successors right.
    ///
    /// `index` may equal `len()`, which appends.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index > len()`. The
    /// index is validated before any element moves, so a failed insert leaves
    /// the sequence untouched.
    pub fn insert<I>(&self, index: usize, values: I) -> Result<(), ContainerError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Staged<T> = values.into_iter().collect();
        self.locked(|data| unlocked::insert_at(data, index, values))
    }

    /// Removes and returns the element at `index`, shifting successors left.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] on an empty sequence and
    /// [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove(&self, index: usize) -> Result<T, ContainerError> {
        self.locked(|data| unlocked::remove_at(data, index))
    }

    /// Overwrites the element at `index` and returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&self, index: usize, value: T) -> Result<T, ContainerError> {
        self.locked(|data| {
            let len = data.len();
            data.get_mut(index)
                .map(|slot| std::mem::replace(slot, value))
                .ok_or(ContainerError::IndexOutOfRange { index, len })
        })
    }

    /// Visits every `(index, value)` pair in order.
    ///
    /// Iteration stops at the first `Err` returned by `visitor`, and that
    /// error is returned. The locker is held throughout, so `visitor` must not
    /// call back into this sequence.
    ///
    /// # Errors
    ///
    /// Propagates the first error produced by `visitor`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordvec::Sequence;
    ///
    /// let sequence: Sequence<i32> = (1..=5).collect();
    /// let mut seen = Vec::new();
    /// let result = sequence.try_for_each(|index, value| {
    ///     if *value > 3 {
    ///         return Err(index);
    ///     }
    ///     seen.push(*value);
    ///     Ok(())
    /// });
    ///
    /// assert_eq!(result, Err(3));
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// ```
    pub fn try_for_each<E, F>(&self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(usize, &T) -> Result<(), E>,
    {
        self.with_slice(|data| {
            data.iter()
                .enumerate()
                .try_for_each(|(index, value)| visitor(index, value))
        })
    }

    /// Runs `reader` on a borrowed view of the elements inside a critical
    /// section.
    pub fn with_slice<R>(&self, reader: impl FnOnce(&[T]) -> R) -> R {
        let _guard = LockGuard::acquire(self.locker.as_ref());
        reader(&self.data.read())
    }

    /// Runs `mutator` on the backing buffer inside a critical section.
    ///
    /// Layers built on a sequence call the [`unlocked`] helpers from inside
    /// `mutator`, so the locker is never entered twice.
    pub(crate) fn locked<R>(&self, mutator: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let _guard = LockGuard::acquire(self.locker.as_ref());
        mutator(&mut self.data.write())
    }

    /// Read access for operations that already hold this sequence's locker
    /// through [`OrderedGuards`].
    pub(crate) fn buffer(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.data.read_recursive()
    }
}

impl<T: Clone> Sequence<T> {
    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<T, ContainerError> {
        self.with_slice(|data| unlocked::element_at(data, index).cloned())
    }

    /// Returns a copy of the first element.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the sequence is empty.
    pub fn first(&self) -> Result<T, ContainerError> {
        self.with_slice(|data| unlocked::first_of(data).cloned())
    }

    /// Returns a copy of the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::EmptyContainer`] if the sequence is empty.
    pub fn last(&self) -> Result<T, ContainerError> {
        self.with_slice(|data| unlocked::last_of(data).cloned())
    }

    /// Returns a snapshot of the elements.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.with_slice(<[T]>::to_vec)
    }

    /// Returns a new, independent sequence holding the elements in reverse
    /// positional order. The receiver is unchanged.
    #[must_use]
    pub fn reversed(&self) -> Self {
        self.with_slice(|data| data.iter().rev().cloned().collect())
    }
}

/// Lock-free variants of the positional operations.
///
/// Callers must already be inside the owning sequence's critical section.
pub(crate) mod unlocked {
    use super::ContainerError;

    pub(crate) fn element_at<T>(data: &[T], index: usize) -> Result<&T, ContainerError> {
        data.get(index).ok_or(ContainerError::IndexOutOfRange {
            index,
            len: data.len(),
        })
    }

    pub(crate) fn first_of<T>(data: &[T]) -> Result<&T, ContainerError> {
        data.first().ok_or(ContainerError::EmptyContainer)
    }

    pub(crate) fn last_of<T>(data: &[T]) -> Result<&T, ContainerError> {
        data.last().ok_or(ContainerError::EmptyContainer)
    }

    pub(crate) fn insert_at<T, I>(
        data: &mut Vec<T>,
        index: usize,
        values: I,
    ) -> Result<(), ContainerError>
    where
        I: IntoIterator<Item = T>,
    {
        if index > data.len() {
            return Err(ContainerError::IndexOutOfRange {
                index,
                len: data.len(),
            });
        }
        data.splice(index..index, values);
        Ok(())
    }

    pub(crate) fn remove_at<T>(data: &mut Vec<T>, index: usize) -> Result<T, ContainerError> {
        if data.is_empty() {
            return Err(ContainerError::EmptyContainer);
        }
        if index >= data.len() {
            return Err(ContainerError::IndexOutOfRange {
                index,
                len: data.len(),
            });
        }
        Ok(data.remove(index))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Sequence<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.append(iter);
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        let _guards = OrderedGuards::acquire(&[&self.locker, &other.locker]);
        *self.buffer() == *other.buffer()
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_slice(|data| formatter.debug_list().entries(data.iter()).finish())
    }
}

impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_slice(|data| write_list(formatter, data, ("[", "]")))
    }
}

/// Writes `open a, b, c close`; shared by every container's `Display`.
pub(crate) fn write_list<T: fmt::Display>(
    formatter: &mut fmt::Formatter<'_>,
    data: &[T],
    (open, close): (&str, &str),
) -> fmt::Result {
    formatter.write_str(open)?;
    let mut first = true;
    for element in data {
        if first {
            first = false;
        } else {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{element}")?;
    }
    formatter.write_str(close)
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Sequence<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.with_slice(|data| serialize_elements(serializer, data))
    }
}

#[cfg(feature = "serde")]
pub(crate) fn serialize_elements<S, T>(serializer: S, data: &[T]) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: serde::Serialize,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(data.len()))?;
    for element in data {
        seq.serialize_element(element)?;
    }
    seq.end()
}

#[cfg(feature = "serde")]
pub(crate) struct ElementsVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> ElementsVisitor<T> {
    pub(crate) const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for ElementsVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(elements)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Sequence<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer
            .deserialize_seq(ElementsVisitor::new())
            .map(Self::from_vec)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::BlockingLocker;
    use rstest::rstest;

    fn sequence_of(values: &[i32]) -> Sequence<i32> {
        values.iter().copied().collect()
    }

    #[rstest]
    fn test_new_creates_empty() {
        let sequence: Sequence<i32> = Sequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.len(), 0);
    }

    #[rstest]
    fn test_first_last() {
        let sequence = sequence_of(&[123, 2346, 678, 85]);
        assert_eq!(sequence.first(), Ok(123));
        assert_eq!(sequence.last(), Ok(85));
    }

    #[rstest]
    fn test_get_each_index() {
        let sequence = sequence_of(&[123, 2346, 678, 85]);
        for (index, expected) in [123, 2346, 678, 85].into_iter().enumerate() {
            assert_eq!(sequence.get(index), Ok(expected));
        }
    }

    #[rstest]
    #[case::single_at_start(0, vec![5], vec![5, 1, 2, 3, 4])]
    #[case::many_at_start(0, vec![5, 6], vec![5, 6, 1, 2, 3, 4])]
    #[case::single_in_middle(2, vec![5], vec![1, 2, 5, 3, 4])]
    #[case::many_in_middle(2, vec![5, 6], vec![1, 2, 5, 6, 3, 4])]
    #[case::single_before_last(3, vec![5], vec![1, 2, 3, 5, 4])]
    #[case::many_before_last(3, vec![5, 6], vec![1, 2, 3, 5, 6, 4])]
    #[case::single_at_end(4, vec![5], vec![1, 2, 3, 4, 5])]
    #[case::many_at_end(4, vec![5, 6], vec![1, 2, 3, 4, 5, 6])]
    fn test_insert(#[case] index: usize, #[case] values: Vec<i32>, #[case] expected: Vec<i32>) {
        let sequence = sequence_of(&[1, 2, 3, 4]);
        assert_eq!(sequence.insert(index, values), Ok(()));
        assert_eq!(sequence.to_vec(), expected);
    }

    #[rstest]
    fn test_insert_past_end_leaves_sequence_untouched() {
        let sequence = sequence_of(&[1, 2, 3, 4]);
        assert_eq!(
            sequence.insert(5, [1234, 5678]),
            Err(ContainerError::IndexOutOfRange { index: 5, len: 4 })
        );
        assert_eq!(sequence.to_vec(), vec![1, 2, 3, 4]);
    }

    #[rstest]
    #[case::first(0, 1, vec![2, 3, 4])]
    #[case::middle(2, 3, vec![1, 2, 4])]
    #[case::last(3, 4, vec![1, 2, 3])]
    fn test_remove(#[case] index: usize, #[case] removed: i32, #[case] remaining: Vec<i32>) {
        let sequence = sequence_of(&[1, 2, 3, 4]);
        assert_eq!(sequence.remove(index), Ok(removed));
        assert_eq!(sequence.to_vec(), remaining);
    }

    #[rstest]
    fn test_remove_out_of_range() {
        let sequence = sequence_of(&[1, 2]);
        assert_eq!(
            sequence.remove(2),
            Err(ContainerError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[rstest]
    fn test_empty_sequence_errors() {
        let sequence: Sequence<i32> = Sequence::new();
        assert_eq!(sequence.first(), Err(ContainerError::EmptyContainer));
        assert_eq!(sequence.last(), Err(ContainerError::EmptyContainer));
        assert_eq!(sequence.remove(0), Err(ContainerError::EmptyContainer));
        assert_eq!(
            sequence.get(0),
            Err(ContainerError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[rstest]
    fn test_set_returns_previous_value() {
        let sequence = sequence_of(&[1, 2, 3]);
        assert_eq!(sequence.set(1, 20), Ok(2));
        assert_eq!(sequence.to_vec(), vec![1, 20, 3]);
        assert_eq!(
            sequence.set(3, 0),
            Err(ContainerError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[rstest]
    fn test_try_for_each_visits_in_order() {
        let sequence = sequence_of(&[10, 20, 30]);
        let mut visited = Vec::new();
        let result: Result<(), ()> = sequence.try_for_each(|index, value| {
            visited.push((index, *value));
            Ok(())
        });
        assert_eq!(result, Ok(()));
        assert_eq!(visited, vec![(0, 10), (1, 20), (2, 30)]);
    }

    #[rstest]
    fn test_try_for_each_stops_on_error() {
        let sequence = sequence_of(&[10, 20, 30]);
        let mut visits = 0;
        let result = sequence.try_for_each(|index, _| {
            visits += 1;
            if index == 1 { Err("abort") } else { Ok(()) }
        });
        assert_eq!(result, Err("abort"));
        assert_eq!(visits, 2);
    }

    #[rstest]
    fn test_reversed_is_independent() {
        let sequence = sequence_of(&[1, 2, 3]);
        let reversed = sequence.reversed();
        reversed.push(0);
        assert_eq!(reversed.to_vec(), vec![3, 2, 1, 0]);
        assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_with_capacity_starts_empty_and_grows() {
        let sequence: Sequence<i32> = Sequence::with_capacity(2);
        assert!(sequence.is_empty());
        sequence.append([1, 2, 3]);
        assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_with_locker_is_shared_handle() {
        let sequence: Sequence<i32> = Sequence::new().with_locker(BlockingLocker::new());
        let first = sequence.locker();
        let second = sequence.locker();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[rstest]
    fn test_operations_release_blocking_locker_on_failure() {
        let sequence: Sequence<i32> = Sequence::new().with_locker(BlockingLocker::new());
        assert!(sequence.remove(0).is_err());
        assert!(sequence.insert(3, [1]).is_err());
        // Would deadlock if a failed call had kept the locker.
        sequence.push(1);
        assert_eq!(sequence.to_vec(), vec![1]);
    }

    #[rstest]
    fn test_equality_with_itself_does_not_deadlock() {
        let sequence: Sequence<i32> = Sequence::new().with_locker(BlockingLocker::new());
        sequence.append([1, 2]);
        assert_eq!(sequence, sequence);
    }

    #[rstest]
    fn test_display_and_debug() {
        let sequence = sequence_of(&[1, 2, 3]);
        assert_eq!(format!("{sequence}"), "[1, 2, 3]");
        assert_eq!(format!("{sequence:?}"), "[1, 2, 3]");
        assert_eq!(format!("{}", Sequence::<i32>::new()), "[]");
    }

    #[rstest]
    fn test_extend_appends() {
        let mut sequence = sequence_of(&[1]);
        sequence.extend([2, 3]);
        assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
    }
}

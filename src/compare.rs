//! Comparators and sort directions.
//!
//! Containers never assume a built-in ordering for their elements. They are
//! parameterized by a [`Comparator`], which must be a consistent total order
//! for the whole lifetime of the container. Any closure or function of shape
//! `Fn(&T, &T) -> Ordering` is a comparator.
//!
//! # Examples
//!
//! ```rust
//! use ordvec::compare::{Comparator, NaturalOrder, PartialOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(PartialOrder.compare(&2.5, &1.0), Ordering::Greater);
//!
//! let by_length = |lhs: &&str, rhs: &&str| lhs.len().cmp(&rhs.len());
//! assert_eq!(by_length.compare(&"abc", &"xy"), Ordering::Greater);
//! ```

use crate::ContainerError;
use std::cmp::Ordering;

/// A total order over values of type `T`.
pub trait Comparator<T: ?Sized> {
    /// Compares `lhs` with `rhs`; `Equal` means the two values are the same key.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

/// Orders values by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Orders values by their [`PartialOrd`] implementation.
///
/// Incomparable pairs (such as a float `NaN`) compare `Equal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PartialOrder;

impl<T: PartialOrd + ?Sized> Comparator<T> for PartialOrder {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        compare_numbers(lhs, rhs)
    }
}

/// Compares two numbers, treating incomparable values as equal.
///
/// # Examples
///
/// ```rust
/// use ordvec::compare::compare_numbers;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_numbers(&1.5, &2.0), Ordering::Less);
/// assert_eq!(compare_numbers(&f64::NAN, &2.0), Ordering::Equal);
/// ```
#[inline]
pub fn compare_numbers<N: PartialOrd + ?Sized>(lhs: &N, rhs: &N) -> Ordering {
    lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal)
}

/// Compares two strings lexicographically by bytes.
///
/// # Examples
///
/// ```rust
/// use ordvec::compare::compare_strings;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_strings(&"apple", &"banana"), Ordering::Less);
/// assert_eq!(compare_strings(&String::from("b"), &String::from("b")), Ordering::Equal);
/// ```
#[inline]
pub fn compare_strings<S: AsRef<str> + ?Sized>(lhs: &S, rhs: &S) -> Ordering {
    lhs.as_ref().cmp(rhs.as_ref())
}

/// The polarity applied to comparator results by an [`Order`](crate::Order).
///
/// Raw polarity values convert with [`TryFrom<i32>`]: `1` is ascending, `-1`
/// is descending and every other value is rejected.
///
/// ```rust
/// use ordvec::{ContainerError, Direction};
///
/// assert_eq!(Direction::try_from(-1), Ok(Direction::Descending));
/// assert_eq!(
///     Direction::try_from(0),
///     Err(ContainerError::MisconfiguredOrder { polarity: 0 })
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Smallest element first.
    #[default]
    Ascending,
    /// Largest element first.
    Descending,
}

impl Direction {
    /// Returns the raw polarity: `1` for ascending, `-1` for descending.
    #[must_use]
    pub const fn polarity(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }

    /// Maps a comparator result onto this direction's positional order.
    ///
    /// `Less` means "belongs before" regardless of direction.
    #[inline]
    #[must_use]
    pub const fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = ContainerError;

    fn try_from(polarity: i32) -> Result<Self, Self::Error> {
        match polarity {
            1 => Ok(Self::Ascending),
            -1 => Ok(Self::Descending),
            _ => Err(ContainerError::MisconfiguredOrder { polarity }),
        }
    }
}

//! # ordvec
//!
//! Mutable in-memory containers kept in order by a caller-supplied comparator,
//! each guarded by an injectable lock.
//!
//! ## Overview
//!
//! - **Sequence**: growable random-access list with bounds-checked
//!   positional operations
//! - **Order**: a sequence kept sorted ascending or descending, with
//!   first-occurrence lookup, merge and duplicate-free combine
//! - **Set**: an ascending order of unique keys with membership tests and
//!   set algebra
//! - **Adapters**: FIFO/LIFO queue, stack and priority queue
//! - **Lockers**: every container owns a [`Locker`](sync::Locker) defining
//!   its critical sections; binary operations lock both operands in one
//!   global order
//!
//! ## Feature Flags
//!
//! - `adapters` (default): `Queue`, `Stack` and `PriorityQueue`
//! - `serde`: `Serialize` for `Sequence`, `Order` and `Set`; `Deserialize` for `Sequence`
//!   and naturally ordered `Set`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use ordvec::prelude::*;
//!
//! let order = Order::new(Direction::Descending);
//! order.add([33, 36, 34, 34, 34, 35]);
//! assert_eq!(order.to_vec(), vec![36, 35, 34, 34, 34, 33]);
//! assert_eq!(order.first_index_of(&34), Some(2));
//!
//! let left = Set::from_strings(["a", "b", "c"]);
//! let right = Set::from_strings(["b", "c", "d"]);
//! assert_eq!(left.intersection(&right).to_vec(), vec!["b", "c"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ordvec::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{Comparator, Direction, NaturalOrder, PartialOrder};
    pub use crate::sync::{BlockingLocker, Locker, NoopLocker};
    pub use crate::{ContainerError, Order, Sequence, Set};

    #[cfg(feature = "adapters")]
    pub use crate::adapters::*;
}

pub mod compare;
mod error;
pub mod order;
pub mod sequence;
pub mod set;
pub mod sync;

#[cfg(feature = "adapters")]
pub mod adapters;

pub use compare::{Comparator, Direction, NaturalOrder};
pub use error::ContainerError;
pub use order::Order;
pub use sequence::Sequence;
pub use set::Set;

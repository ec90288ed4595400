//! Queue, stack and priority queue built on [`Sequence`](crate::Sequence).
//!
//! Each adapter owns one sequence and forwards its locker to it, so every
//! adapter operation is a single critical section of that sequence.
//!
//! # Examples
//!
//! ```rust
//! use ordvec::adapters::{PriorityQueue, Queue, QueueKind, Stack};
//!
//! let queue = Queue::new(QueueKind::Fifo);
//! queue.enqueue(1);
//! queue.enqueue(2);
//! assert_eq!(queue.dequeue(), Ok(1));
//!
//! let stack = Stack::new();
//! stack.push("a");
//! stack.push("b");
//! assert_eq!(stack.pop(), Ok("b"));
//!
//! let tasks = PriorityQueue::new();
//! tasks.enqueue(1, "low");
//! tasks.enqueue(9, "high");
//! assert_eq!(tasks.dequeue(), Ok("high"));
//! ```

mod priority_queue;
mod queue;
mod stack;

pub use priority_queue::{PriorityOrder, PriorityQueue, Prioritized};
pub use queue::{Queue, QueueKind};
pub use stack::Stack;

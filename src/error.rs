//! Error types shared by every container in this crate.
//!
//! All fallible operations return [`ContainerError`]. Errors are raised at the
//! point of violation and handed straight back to the caller; no container
//! retries or recovers internally.

/// Represents the ways a container operation can fail.
///
/// # Examples
///
/// ```rust
/// use ordvec::{ContainerError, Sequence};
///
/// let sequence: Sequence<i32> = Sequence::new();
/// assert_eq!(sequence.first(), Err(ContainerError::EmptyContainer));
/// assert_eq!(
///     sequence.get(0),
///     Err(ContainerError::IndexOutOfRange { index: 0, len: 0 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerError {
    /// The operation requires at least one element but the container is empty.
    EmptyContainer,
    /// A positional access fell outside the valid bounds.
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The length of the container at the time of the request.
        len: usize,
    },
    /// A raw direction value other than `1` or `-1` was supplied.
    MisconfiguredOrder {
        /// The rejected polarity value.
        polarity: i32,
    },
}

impl std::fmt::Display for ContainerError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContainer => write!(formatter, "empty container"),
            Self::IndexOutOfRange { index, len } => {
                write!(formatter, "index {index} out of range for length {len}")
            }
            Self::MisconfiguredOrder { polarity } => write!(
                formatter,
                "misconfigured order: unsupported direction value {polarity}"
            ),
        }
    }
}

impl std::error::Error for ContainerError {}

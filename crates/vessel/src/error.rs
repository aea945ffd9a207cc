//! Recoverable error types for storage and vector operations.
//!
//! Element failures (a panicking `Default`, `Clone`, or constructor closure)
//! are not represented here: they unwind through the container, which
//! restores its own invariants before the panic continues.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors reported by the fallible (`try_*`) and bounds-checked operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VectorError {
    /// The requested element count cannot be expressed as an allocation
    /// size (byte count overflows `isize::MAX`).
    CapacityOverflow {
        /// Number of element slots requested.
        requested: usize,
    },
    /// The global allocator could not supply a block of the requested layout.
    AllocationFailure {
        /// Layout of the failed request.
        layout: Layout,
    },
    /// An index passed to a bounds-checked accessor was not below the
    /// current length.
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the vector at the time of the call.
        len: usize,
    },
}

impl VectorError {
    /// Escalate an allocation error the way the infallible operations do:
    /// overflow panics, allocator failure aborts through
    /// [`std::alloc::handle_alloc_error`].
    ///
    /// Only allocation errors reach this; bounds errors are always returned
    /// to the caller.
    pub(crate) fn escalate(self) -> ! {
        match self {
            Self::AllocationFailure { layout } => std::alloc::handle_alloc_error(layout),
            Self::CapacityOverflow { .. } => panic!("capacity overflow"),
            Self::OutOfRange { .. } => unreachable!("bounds errors are returned, never escalated"),
        }
    }
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: cannot reserve {requested} slots")
            }
            Self::AllocationFailure { layout } => {
                write!(
                    f,
                    "allocation failed: {} bytes with alignment {}",
                    layout.size(),
                    layout.align()
                )
            }
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl Error for VectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_capacity_overflow() {
        let err = VectorError::CapacityOverflow { requested: 7 };
        assert_eq!(err.to_string(), "capacity overflow: cannot reserve 7 slots");
    }

    #[test]
    fn display_allocation_failure_reports_layout() {
        let layout = Layout::from_size_align(32, 8).unwrap();
        let err = VectorError::AllocationFailure { layout };
        assert_eq!(err.to_string(), "allocation failed: 32 bytes with alignment 8");
    }

    #[test]
    fn display_out_of_range() {
        let err = VectorError::OutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "index 5 out of range for length 3");
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn escalate_overflow_panics() {
        VectorError::CapacityOverflow { requested: usize::MAX }.escalate();
    }

    #[test]
    #[should_panic(expected = "never escalated")]
    fn escalate_rejects_bounds_errors() {
        VectorError::OutOfRange { index: 1, len: 0 }.escalate();
    }
}

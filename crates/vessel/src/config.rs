//! Growth policy parameters.

use crate::error::VectorError;

/// Compile-time growth policy for implicit reallocation.
///
/// Appends and inserts that find the vector full grow it to
/// `max(MIN_NON_ZERO_CAPACITY, len * GROWTH_FACTOR)`. Explicit
/// [`reserve`](crate::Vector::reserve) and [`resize`](crate::Vector::resize)
/// bypass the policy and allocate exactly what was asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthPolicy;

impl GrowthPolicy {
    /// Multiplier applied to the current length on implicit growth.
    pub const GROWTH_FACTOR: usize = 2;

    /// Capacity of the first allocation made by an empty vector.
    pub const MIN_NON_ZERO_CAPACITY: usize = 1;

    /// Capacity to grow to when a vector holding `len` elements is full.
    ///
    /// Returns [`VectorError::CapacityOverflow`] if the doubled length does
    /// not fit in `usize`.
    pub const fn next_capacity(len: usize) -> Result<usize, VectorError> {
        if len == 0 {
            return Ok(Self::MIN_NON_ZERO_CAPACITY);
        }
        match len.checked_mul(Self::GROWTH_FACTOR) {
            Some(cap) => Ok(cap),
            None => Err(VectorError::CapacityOverflow { requested: len }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grows_to_one() {
        assert_eq!(GrowthPolicy::next_capacity(0), Ok(1));
    }

    #[test]
    fn non_empty_doubles() {
        assert_eq!(GrowthPolicy::next_capacity(1), Ok(2));
        assert_eq!(GrowthPolicy::next_capacity(4), Ok(8));
        assert_eq!(GrowthPolicy::next_capacity(1000), Ok(2000));
    }

    #[test]
    fn doubling_overflow_is_reported() {
        let len = usize::MAX / 2 + 1;
        assert_eq!(
            GrowthPolicy::next_capacity(len),
            Err(VectorError::CapacityOverflow { requested: len })
        );
    }
}

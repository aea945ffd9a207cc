//! Owning iteration over a consumed [`Vector`](crate::Vector).

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::slice;

use crate::raw::RawMemory;

/// Yields the elements of a vector by value, front to back.
///
/// Elements not yet yielded are dropped with the iterator; the storage is
/// released afterwards.
pub struct IntoIter<T> {
    data: RawMemory<T>,
    /// Live elements are exactly `[start, end)`.
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Take over `data`, whose slots `[0, len)` are live.
    pub(crate) fn new(data: RawMemory<T>, len: usize) -> Self {
        debug_assert!(len <= data.capacity());
        Self {
            data,
            start: 0,
            end: len,
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` is live and within capacity.
        unsafe { slice::from_raw_parts(self.data.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let slot = self.data.slot(self.start);
        self.start += 1;
        // SAFETY: the slot was live and has just left the live range.
        Some(unsafe { slot.read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot was live and has just left the live range.
        Some(unsafe { self.data.slot(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(self.data.slot(self.start), self.end - self.start);
        self.start = self.end;
        // SAFETY: `rest` covers the elements that were never yielded.
        unsafe { ptr::drop_in_place(rest) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

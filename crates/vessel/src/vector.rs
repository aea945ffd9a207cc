//! The growable array.
//!
//! [`Vector`] pairs one [`RawMemory`] block with a live-element count.
//! Slots `[0, len)` hold initialised values in sequence order; slots
//! `[len, capacity)` are uninitialised. Every operation below keeps that
//! split exact, including when a user `Default`, `Clone`, or constructor
//! closure panics part-way through.
//!
//! # Relocation
//!
//! Growing moves the live elements into a fresh block. A Rust move is a
//! bitwise copy that cannot fail, so the "move when moving cannot fail,
//! otherwise copy" rule always resolves to a move here, and every growth
//! path gives the strong guarantee: a failure leaves the vector untouched.
//!
//! # Failure safety summary
//!
//! | Operation | On panic or allocation failure |
//! |---|---|
//! | [`Vector::with_size`], [`Clone::clone`] | nothing leaked, nothing returned |
//! | [`Vector::reserve`], [`Vector::emplace_back`], [`Vector::emplace`] | vector unchanged |
//! | [`Vector::resize`], [`Clone::clone_from`] | new slots rolled back, length unchanged |
//! | [`Vector::pop_back`], [`Vector::erase`], [`Vector::swap_with`] | cannot fail |

#![allow(unsafe_code)]

use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice::{self, SliceIndex};

use crate::config::GrowthPolicy;
use crate::error::VectorError;
use crate::iter::IntoIter;
use crate::raw::RawMemory;

/// A contiguous, growable sequence of `T` with explicitly managed storage.
///
/// Out-of-range positions passed to indexing, [`emplace`](Self::emplace),
/// [`insert`](Self::insert), [`erase`](Self::erase) or
/// [`remove`](Self::remove) are contract violations and panic. Use
/// [`at`](Self::at) or the slice `get` to receive an error or `None`
/// instead, and [`get_unchecked`](Self::get_unchecked) to skip the check.
pub struct Vector<T> {
    data: RawMemory<T>,
    len: usize,
}

/// Values written past the live range but not yet counted by `len`.
///
/// Dropping the guard destroys them, so an unwinding bulk construction
/// rolls back to the length it started from. A completed construction
/// forgets the guard and publishes the new length itself.
struct PendingTail<T> {
    first: *mut T,
    built: usize,
}

impl<T> Drop for PendingTail<T> {
    fn drop(&mut self) {
        let built = ptr::slice_from_raw_parts_mut(self.first, self.built);
        // SAFETY: exactly `built` consecutive slots from `first` were
        // written and none of them is counted by the vector's length.
        unsafe { ptr::drop_in_place(built) };
    }
}

/// Move `count` live values from `src` into uninitialised `dst`.
///
/// # Safety
///
/// `src` must hold `count` initialised values, `dst` must have room for
/// `count` values, and the ranges must not overlap. Afterwards the source
/// slots are logically uninitialised and must not be dropped.
unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::copy_nonoverlapping(src, dst, count) };
}

impl<T> Vector<T> {
    /// An empty vector. Does not allocate.
    pub const fn new() -> Self {
        Self {
            data: RawMemory::new(),
            len: 0,
        }
    }

    /// An empty vector with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RawMemory::allocate(capacity),
            len: 0,
        }
    }

    /// A vector of `size` elements, element `i` built by `f(i)`.
    ///
    /// Capacity is exactly `size`. If `f` panics, the elements built so far
    /// are dropped and the storage released before the panic continues.
    pub fn with_size_with<F>(size: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let mut vector = Self::with_capacity(size);
        vector.extend_in_place(size, f);
        vector
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots reserved.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialised and the pointer is non-null and
        // aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, with unique access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.data.as_mut_ptr(), self.len) }
    }

    /// Start of the storage (the begin position).
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Start of the storage, for writing.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Bounds-checked access reporting [`VectorError::OutOfRange`].
    pub fn at(&self, index: usize) -> Result<&T, VectorError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(VectorError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access reporting [`VectorError::OutOfRange`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VectorError::OutOfRange { index, len })
    }

    /// Unchecked access.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {index} out of range for length {}", self.len);
        // SAFETY: the caller guarantees `index < len`, so the slot is live.
        unsafe { &*self.data.slot(index) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {index} out of range for length {}", self.len);
        // SAFETY: the caller guarantees `index < len`; `&mut self` is unique.
        unsafe { &mut *self.data.slot(index) }
    }

    /// Grow capacity to exactly `new_capacity` if it is currently smaller.
    ///
    /// Unlike `Vec::reserve` the argument is the total capacity, not
    /// additional room. Live elements are moved; their order is kept.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocator failure is routed to
    /// [`std::alloc::handle_alloc_error`].
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            err.escalate();
        }
    }

    /// Fallible [`reserve`](Self::reserve). On error the vector is unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let mut new_data: RawMemory<T> = RawMemory::try_allocate(new_capacity)?;
        // SAFETY: `[0, len)` is live in the old block and `len < new_capacity`.
        // The blocks are distinct allocations.
        unsafe { relocate(self.data.as_ptr(), new_data.as_mut_ptr(), self.len) };
        self.data.swap(&mut new_data);
        // `new_data` now owns the old block, whose slots were all moved out.
        Ok(())
    }

    /// Append `value`, growing by the [`GrowthPolicy`] when full.
    pub fn push_back(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Append the value produced by `make` and return a reference to it.
    ///
    /// When the vector is full, the new element is constructed directly at
    /// its final slot in the new block before any existing element moves.
    /// If `make` panics (or allocation fails) the vector is left exactly as
    /// it was.
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let index = self.len;
        if self.len == self.capacity() {
            let mut new_data: RawMemory<T> = RawMemory::allocate(self.grown_capacity());
            // SAFETY: `index == len < grown capacity`; the slot is fresh.
            unsafe { new_data.slot(index).write(make()) };
            // SAFETY: `[0, len)` is live in the old block and fits before
            // `index` in the new one.
            unsafe { relocate(self.data.as_ptr(), new_data.as_mut_ptr(), self.len) };
            self.data.swap(&mut new_data);
        } else {
            let value = make();
            // SAFETY: `index < capacity` and the slot is uninitialised.
            unsafe { self.data.slot(index).write(value) };
        }
        self.len += 1;
        // SAFETY: slot `index` was initialised above and is below `len`.
        unsafe { &mut *self.data.slot(index) }
    }

    /// Insert the value produced by `make` at `index`, shifting everything
    /// from `index` onward one slot to the right. Returns `index`.
    ///
    /// Positions run over `[0, len]`: besides every live element, the
    /// one-past-the-end position is accepted and appends, which also makes
    /// insertion into an empty vector well defined. The value is produced
    /// before any element is touched, so a panicking `make` leaves the
    /// vector unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace<F>(&mut self, index: usize, make: F) -> usize
    where
        F: FnOnce() -> T,
    {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {}); index == len appends",
            self.len
        );
        if self.len == self.capacity() {
            let mut new_data: RawMemory<T> = RawMemory::allocate(self.grown_capacity());
            // SAFETY: `index <= len < grown capacity`; the slot is fresh.
            unsafe { new_data.slot(index).write(make()) };
            let src = self.data.as_ptr();
            // SAFETY: the prefix `[0, index)` and suffix `[index, len)` are
            // live in the old block; in the new block they land at
            // `[0, index)` and `[index + 1, len + 1)`, around the new value.
            unsafe {
                relocate(src, new_data.slot(0), index);
                relocate(src.add(index), new_data.slot(index + 1), self.len - index);
            }
            self.data.swap(&mut new_data);
        } else {
            let value = make();
            let at = self.data.slot(index);
            // SAFETY: `len < capacity`, so `[index + 1, len + 1)` is in
            // bounds; `ptr::copy` handles the overlap. Slot `index` is then
            // logically uninitialised and receives the new value.
            unsafe {
                ptr::copy(at, at.add(1), self.len - index);
                at.write(value);
            }
        }
        self.len += 1;
        index
    }

    /// Insert `value` at `index`. Returns `index`. `index == len` appends.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.emplace(index, || value)
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is no longer counted.
        Some(unsafe { self.data.slot(self.len).read() })
    }

    /// Remove and return the element at `index`, closing the gap.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index (is {index}) should be < len (is {})",
            self.len
        );
        let at = self.data.slot(index);
        // SAFETY: slot `index` is live; after reading it out the suffix
        // `[index + 1, len)` shifts left over it and the trailing slot is
        // dropped from the count without being destroyed.
        unsafe {
            let value = at.read();
            ptr::copy(at.add(1), at, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Destroy the element at `index`, closing the gap.
    ///
    /// Length drops by exactly one. Returns `index`, which now names the
    /// element that followed the erased one, or the end position.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Drop every element past `new_len`. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(self.data.slot(new_len), self.len - new_len);
        // Shorten first: if an element's `Drop` panics the rest of the tail
        // is leaked rather than dropped twice.
        self.len = new_len;
        // SAFETY: `tail` covers the formerly live `[new_len, old_len)`.
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drop every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Set the length to `new_len`, dropping surplus elements or filling new
    /// slots with values from `fill`.
    ///
    /// Growing reserves exactly `new_len` first. If `fill` panics, the
    /// values filled so far are dropped and the length is unchanged; the
    /// reserved capacity is kept.
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
        } else {
            self.reserve(new_len);
            self.extend_in_place(new_len, |_| fill());
        }
    }

    /// Exchange contents with `other`. Never allocates, never fails.
    ///
    /// This is also the move-assignment: `a.swap_with(&mut b)` hands `b`'s
    /// elements to `a` and `a`'s to `b`.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.data.swap(&mut other.data);
        mem::swap(&mut self.len, &mut other.len);
    }

    fn grown_capacity(&self) -> usize {
        GrowthPolicy::next_capacity(self.len).unwrap_or_else(|err| err.escalate())
    }

    /// Construct `make(i)` into each slot `i` in `[len, target)`.
    ///
    /// `target` must not exceed capacity. The length moves to `target` only
    /// once every slot is built; on unwind the new slots are dropped and the
    /// length is left where it was.
    fn extend_in_place<F>(&mut self, target: usize, mut make: F)
    where
        F: FnMut(usize) -> T,
    {
        debug_assert!(target <= self.capacity());
        let start = self.len;
        let mut pending = PendingTail {
            first: self.data.slot(start),
            built: 0,
        };
        while start + pending.built < target {
            let value = make(start + pending.built);
            // SAFETY: `start + built < target <= capacity` and the slot is
            // past the live range, so it is uninitialised.
            unsafe { pending.first.add(pending.built).write(value) };
            pending.built += 1;
        }
        mem::forget(pending);
        self.len = target;
    }
}

impl<T: Default> Vector<T> {
    /// A vector of `size` default-constructed elements, capacity exactly
    /// `size`.
    ///
    /// If a `T::default()` call panics, the elements built so far are
    /// dropped and the storage released before the panic continues.
    pub fn with_size(size: usize) -> Self {
        Self::with_size_with(size, |_| T::default())
    }

    /// Set the length to `new_len`, dropping surplus elements or
    /// default-constructing new ones.
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `[0, len)` is live; `data` frees the block after.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) };
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Copy into storage of exactly `self.len()` slots. All or nothing.
    fn clone(&self) -> Self {
        let src = self.as_slice();
        Self::with_size_with(src.len(), |i| src[i].clone())
    }

    /// Copy-assign from `source`, reusing storage when it is large enough.
    ///
    /// - `source` longer than our capacity: clone into fresh storage and
    ///   swap it in; on panic `self` is unchanged.
    /// - `source` no longer than `self`: assign the prefix in place, drop
    ///   the surplus tail.
    /// - otherwise: assign the overlapping prefix, then clone the rest into
    ///   uninitialised slots. If a tail clone panics, the tail built so far
    ///   is dropped and the length stays at its old value; the prefix keeps
    ///   whatever it was assigned.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut fresh = source.clone();
            self.swap_with(&mut fresh);
            return;
        }
        let shared = self.len.min(source.len);
        self.as_mut_slice()[..shared].clone_from_slice(&source.as_slice()[..shared]);
        if source.len <= self.len {
            self.truncate(source.len);
        } else {
            let src = source.as_slice();
            self.extend_in_place(src.len(), |i| src[i].clone());
        }
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut me = ManuallyDrop::new(self);
        let len = me.len;
        IntoIter::new(me.data.take(), len)
    }
}

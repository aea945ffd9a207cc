//! Owned, uninitialised element storage.
//!
//! [`RawMemory`] is the only place in the crate that talks to the global
//! allocator. It tracks how many slots it reserved and nothing else: which
//! slots hold live values is the owner's business, and dropping a
//! `RawMemory` never runs element destructors.
//!
//! Every `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::error::VectorError;

/// A block of uninitialised memory with room for `capacity` values of `T`.
///
/// Zero capacity and zero-sized `T` never allocate; the handle then holds a
/// dangling, well-aligned pointer. The block is move-only: there is no
/// meaningful way to copy possibly-uninitialised bytes.
pub struct RawMemory<T> {
    ptr: NonNull<T>,
    capacity: usize,
    /// Marks logical ownership of `T` values for variance and drop check.
    _owns: PhantomData<T>,
}

// SAFETY: `RawMemory` uniquely owns its block, like `Box<[MaybeUninit<T>]>`;
// sending or sharing it is exactly as safe as sending or sharing `T`.
unsafe impl<T: Send> Send for RawMemory<T> {}
// SAFETY: see the `Send` impl above.
unsafe impl<T: Sync> Sync for RawMemory<T> {}

impl<T> RawMemory<T> {
    /// An empty handle: zero capacity, no allocation.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Reserve room for `capacity` values without constructing any.
    ///
    /// Returns [`VectorError::CapacityOverflow`] if the byte size of the
    /// block cannot be represented, or [`VectorError::AllocationFailure`]
    /// if the allocator refuses the request. Nothing is retained on failure.
    pub fn try_allocate(capacity: usize) -> Result<Self, VectorError> {
        let layout = Self::layout_for(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            });
        }
        // SAFETY: `layout` has a non-zero size, checked above.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(VectorError::AllocationFailure { layout })?;
        Ok(Self {
            ptr,
            capacity,
            _owns: PhantomData,
        })
    }

    /// Infallible form of [`try_allocate`](Self::try_allocate).
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow. Allocator failure is routed to
    /// [`std::alloc::handle_alloc_error`].
    pub fn allocate(capacity: usize) -> Self {
        Self::try_allocate(capacity).unwrap_or_else(|err| err.escalate())
    }

    fn layout_for(capacity: usize) -> Result<Layout, VectorError> {
        Layout::array::<T>(capacity).map_err(|_| VectorError::CapacityOverflow {
            requested: capacity,
        })
    }

    /// Number of slots reserved.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this handle owns an allocation (false for zero capacity and
    /// zero-sized `T`).
    pub fn is_allocated(&self) -> bool {
        self.capacity != 0 && mem::size_of::<T>() != 0
    }

    /// Address of slot `offset`.
    ///
    /// `offset == capacity` yields the one-past-the-end address, which may
    /// be compared against but not dereferenced. Larger offsets are a
    /// contract violation, caught only in debug builds.
    pub fn slot(&self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.capacity,
            "slot offset {offset} past capacity {}",
            self.capacity
        );
        self.ptr.as_ptr().wrapping_add(offset)
    }

    /// Start of the block.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Start of the block, for writing.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Exchange blocks and capacities with `other`. Never allocates.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the block out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }
}

impl<T> Default for RawMemory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawMemory<T> {
    fn drop(&mut self) {
        if !self.is_allocated() {
            return;
        }
        if let Ok(layout) = Self::layout_for(self.capacity) {
            // SAFETY: the block was obtained from `alloc::alloc` with this
            // exact layout in `try_allocate`, and is released only here.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl<T> fmt::Debug for RawMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMemory")
            .field("capacity", &self.capacity)
            .field("allocated", &self.is_allocated())
            .finish()
    }
}

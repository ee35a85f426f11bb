//! Raw storage management for `Vector`.
//!
//! This module owns blocks of uninitialized memory, similar to how `RawVec`
//! works for `Vec` in the standard library. It never constructs or drops
//! elements; which slots are live is entirely the owner's business.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::ptr::NonNull;

use allocator_api2::alloc::{Allocator, Global};

use crate::TryReserveError;

/// Exclusive owner of `capacity` contiguous, uninitialized slots of `T`.
///
/// Capacity 0 holds no block and uses a dangling, well-aligned pointer.
/// Zero-sized types never allocate but still report the requested capacity.
pub(crate) struct RawBuffer<T> {
    /// First slot, or dangling when no block is held
    ptr: NonNull<T>,
    /// Number of slots
    cap: usize,
    /// Marker for type ownership
    _marker: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    /// Whether T is a zero-sized type
    const IS_ZST: bool = std::mem::size_of::<T>() == 0;

    /// Creates an empty buffer without allocating.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates storage for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if the
    /// allocator fails.
    pub(crate) fn allocate(capacity: usize) -> Self {
        match Self::try_allocate(capacity) {
            Ok(buf) => buf,
            Err(err) => err.handle(),
        }
    }

    /// Tries to allocate storage for exactly `capacity` elements.
    pub(crate) fn try_allocate(capacity: usize) -> Result<Self, TryReserveError> {
        if capacity == 0 {
            return Ok(Self::new());
        }

        if Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _marker: PhantomData,
            });
        }

        let layout =
            Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)?;
        let block = Global
            .allocate(layout)
            .map_err(|_| TryReserveError::AllocError { layout })?;

        Ok(Self {
            ptr: block.cast(),
            cap: capacity,
            _marker: PhantomData,
        })
    }

    /// Returns the number of slots.
    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns a pointer to the first slot.
    #[inline]
    pub(crate) const fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns a pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index` must be at most `capacity`. The one-past-end slot may be
    /// addressed but never read as a live element.
    #[inline]
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap);
        self.ptr.as_ptr().add(index)
    }

    /// Exchanges the blocks owned by `self` and `other`.
    #[inline]
    pub(crate) fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Moves the block out, leaving `self` empty.
    #[inline]
    pub(crate) fn take(&mut self) -> Self {
        std::mem::replace(self, Self::new())
    }

    fn layout(&self) -> Layout {
        // The same layout was validated by `try_allocate`.
        unsafe {
            Layout::from_size_align_unchecked(
                std::mem::size_of::<T>() * self.cap,
                std::mem::align_of::<T>(),
            )
        }
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        // Only frees memory. Vector drops its elements before this runs.
        if self.cap == 0 || Self::IS_ZST {
            return;
        }
        unsafe {
            Global.deallocate(self.ptr.cast(), self.layout());
        }
    }
}

// Safety: RawBuffer owns its allocation and T determines thread safety
unsafe impl<T: Send> Send for RawBuffer<T> {}
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let raw: RawBuffer<i32> = RawBuffer::new();
        assert_eq!(raw.capacity(), 0);
        assert_eq!(raw.as_ptr(), NonNull::dangling().as_ptr());
    }

    #[test]
    fn test_allocate_zero_holds_no_block() {
        let raw: RawBuffer<String> = RawBuffer::allocate(0);
        assert_eq!(raw.capacity(), 0);
        assert_eq!(raw.as_ptr(), NonNull::dangling().as_ptr());
    }

    #[test]
    fn test_allocate_exact() {
        let raw: RawBuffer<u64> = RawBuffer::allocate(7);
        assert_eq!(raw.capacity(), 7);
        assert_eq!(raw.as_ptr() as usize % std::mem::align_of::<u64>(), 0);
    }

    #[test]
    fn test_slot_addresses() {
        let raw: RawBuffer<u32> = RawBuffer::allocate(4);
        unsafe {
            assert_eq!(raw.slot(0), raw.as_ptr());
            assert_eq!(raw.slot(3) as usize - raw.as_ptr() as usize, 12);
            // one past the end is addressable
            assert_eq!(raw.slot(4) as usize - raw.as_ptr() as usize, 16);
        }
    }

    #[test]
    fn test_slots_are_writable() {
        let raw: RawBuffer<u8> = RawBuffer::allocate(16);
        unsafe {
            for i in 0..16 {
                raw.slot(i).write(i as u8);
            }
            for i in 0..16 {
                assert_eq!(raw.slot(i).read(), i as u8);
            }
        }
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut raw: RawBuffer<i32> = RawBuffer::allocate(8);
        let ptr = raw.as_ptr();

        let taken = raw.take();
        assert_eq!(taken.capacity(), 8);
        assert_eq!(taken.as_ptr(), ptr);
        assert_eq!(raw.capacity(), 0);
    }

    #[test]
    fn test_swap() {
        let mut a: RawBuffer<i32> = RawBuffer::allocate(2);
        let mut b: RawBuffer<i32> = RawBuffer::allocate(5);
        let (pa, pb) = (a.as_ptr(), b.as_ptr());

        a.swap(&mut b);
        assert_eq!(a.capacity(), 5);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.as_ptr(), pb);
        assert_eq!(b.as_ptr(), pa);
    }

    #[test]
    fn test_capacity_overflow() {
        let result = RawBuffer::<u64>::try_allocate(usize::MAX);
        assert_eq!(result.err(), Some(TryReserveError::CapacityOverflow));
    }

    #[test]
    fn test_zst() {
        let raw: RawBuffer<()> = RawBuffer::allocate(usize::MAX);
        assert_eq!(raw.capacity(), usize::MAX);
    }
}

//! A contiguous growable vector built on a separate raw-storage layer.
//!
//! `Vector<T>` splits memory ownership from element lifetime: a `RawBuffer`
//! owns a block of uninitialized slots and knows nothing about which of them
//! are live, while `Vector` pairs it with a length and performs every
//! construction, relocation and destruction itself.
//!
//! Growth doubles the capacity (starting from 1), migrations move elements
//! into the new block, and every fallible step happens before the vector is
//! modified, so a panicking or failing element constructor leaves the vector
//! exactly as it was.
//!
//! # Example
//!
//! ```
//! use advanced_vector::Vector;
//!
//! let mut vec: Vector<i32> = Vector::new();
//! vec.push(1);
//! vec.push(3);
//! vec.insert(1, 2);
//!
//! assert_eq!(vec.as_slice(), &[1, 2, 3]);
//! assert_eq!(vec.capacity(), 4);
//! ```
//!
//! # Raw addresses
//!
//! References returned by the API are tied to the borrow of the vector. Raw
//! pointers obtained through [`Vector::as_ptr`] or the slice API are not: any
//! operation that reallocates invalidates all of them, and any operation that
//! shifts elements (insert, erase, remove) invalidates those at or after the
//! affected index.

mod error;
mod into_iter;
mod raw_vec;

pub use error::TryReserveError;
pub use into_iter::IntoIter;

use raw_vec::RawBuffer;
use std::cmp::Ordering;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice::SliceIndex;

/// A contiguous growable array with manual storage and lifetime management.
///
/// # Memory Layout
///
/// Slots `[0, len)` of the owned buffer hold live elements and slots
/// `[len, capacity)` are uninitialized. Capacity only grows; it is never
/// released until the vector is dropped.
pub struct Vector<T> {
    /// Raw slot storage
    buf: RawBuffer<T>,
    /// Number of initialized elements
    len: usize,
}

/// Drops a run of freshly constructed elements if construction unwinds.
///
/// Construction loops bump `end` after every written slot and `forget` the
/// guard once the run is complete.
struct PartialRun<T> {
    base: *mut T,
    start: usize,
    end: usize,
}

impl<T> Drop for PartialRun<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.base.add(self.start),
                self.end - self.start,
            ));
        }
    }
}

/// Clones `src` into the uninitialized slots starting at `dst`.
///
/// If a clone panics, the clones written so far are dropped.
///
/// # Safety
///
/// `dst` must be valid for `src.len()` writes and must not overlap `src`.
unsafe fn clone_into_uninit<T: Clone>(src: &[T], dst: *mut T) {
    let mut run = PartialRun {
        base: dst,
        start: 0,
        end: 0,
    };
    for item in src {
        ptr::write(dst.add(run.end), item.clone());
        run.end += 1;
    }
    std::mem::forget(run);
}

// Core implementation
impl<T> Vector<T> {
    /// Creates a new empty `Vector`.
    ///
    /// Does not allocate until elements are pushed.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let vec: Vector<i32> = Vector::new();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Creates an empty `Vector` with room for exactly `capacity` elements.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let vec: Vector<i32> = Vector::with_capacity(100);
    /// assert_eq!(vec.capacity(), 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuffer::allocate(capacity),
            len: 0,
        }
    }

    /// Creates a `Vector` holding `len` default-valued elements.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let vec: Vector<u8> = Vector::with_len(3);
    /// assert_eq!(vec.as_slice(), &[0, 0, 0]);
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut vec = Self::with_capacity(len);
        vec.resize(len);
        vec
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots currently reserved.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns a raw pointer to the first slot.
    ///
    /// The pointer is invalidated by any reallocation.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Returns a raw mutable pointer to the first slot.
    ///
    /// The pointer is invalidated by any reallocation.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Reserves exactly `new_capacity` slots in total.
    ///
    /// Does nothing if the capacity is already large enough. Otherwise the
    /// elements migrate into a new buffer and all raw pointers are
    /// invalidated.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts if the allocator fails.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let mut vec: Vector<i32> = Vector::new();
    /// vec.push(1);
    /// vec.reserve(10);
    /// assert_eq!(vec.capacity(), 10);
    /// vec.reserve(5);
    /// assert_eq!(vec.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            err.handle();
        }
    }

    /// Tries to reserve exactly `new_capacity` slots in total.
    ///
    /// On error the vector is unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let new_buf = RawBuffer::try_allocate(new_capacity).map_err(log_reserve_error)?;
        self.adopt(new_buf);
        Ok(())
    }

    /// Moves every live element into `new_buf` and releases the old block.
    fn adopt(&mut self, mut new_buf: RawBuffer<T>) {
        debug_assert!(new_buf.capacity() >= self.len);
        log::trace!(
            "reallocating vector storage: {} -> {} slots ({} live)",
            self.capacity(),
            new_buf.capacity(),
            self.len
        );
        unsafe {
            relocate(self.buf.as_ptr(), new_buf.as_ptr(), self.len);
        }
        self.buf.swap(&mut new_buf);
        // new_buf now holds the old block, whose elements were all moved out
    }

    /// Makes room for `additional` more elements using the growth policy.
    ///
    /// Grows to the larger of the needed capacity and the doubled capacity,
    /// so repeated small appends stay amortized.
    fn try_reserve_for_append(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(TryReserveError::CapacityOverflow)
            .map_err(log_reserve_error)?;
        if needed <= self.capacity() {
            return Ok(());
        }
        let target = self
            .grown_capacity()
            .map_or(needed, |grown| grown.max(needed));
        self.try_reserve(target)
    }

    /// Capacity of the buffer allocated when inserting into a full vector.
    fn grown_capacity(&self) -> Result<usize, TryReserveError> {
        if self.len == 0 {
            Ok(1)
        } else {
            self.len
                .checked_mul(2)
                .ok_or(TryReserveError::CapacityOverflow)
        }
    }

    /// Resizes the vector to `new_len`, filling new slots with `T::default()`.
    ///
    /// Growing reserves exactly `new_len` slots.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let mut vec: Vector<i32> = Vector::from([1, 2, 3]);
    /// vec.resize(5);
    /// assert_eq!(vec.as_slice(), &[1, 2, 3, 0, 0]);
    /// vec.resize(1);
    /// assert_eq!(vec.as_slice(), &[1]);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Fallible version of [`resize`](Self::resize).
    pub fn try_resize(&mut self, new_len: usize) -> Result<(), TryReserveError>
    where
        T: Default,
    {
        self.try_resize_with(new_len, T::default)
    }

    /// Resizes the vector to `new_len`, producing new elements with `f`.
    ///
    /// If `f` panics, the elements it already produced are dropped and the
    /// length is left unchanged.
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        if let Err(err) = self.try_resize_with(new_len, f) {
            err.handle();
        }
    }

    /// Fallible version of [`resize_with`](Self::resize_with).
    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), TryReserveError>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.try_reserve(new_len)?;

        let mut run = PartialRun {
            base: self.buf.as_ptr(),
            start: self.len,
            end: self.len,
        };
        while run.end < new_len {
            unsafe {
                ptr::write(self.buf.slot(run.end), f());
            }
            run.end += 1;
        }
        std::mem::forget(run);

        self.len = new_len;
        Ok(())
    }

    /// Shortens the vector, keeping the first `len` elements and dropping the rest.
    ///
    /// Has no effect if `len` is not smaller than the current length. The
    /// capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail = unsafe { ptr::slice_from_raw_parts_mut(self.buf.slot(len), self.len - len) };

        // Update len BEFORE dropping so a panicking drop cannot double-free
        self.len = len;
        unsafe {
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element, keeping the allocated memory.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts if the allocator fails.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let mut vec: Vector<i32> = Vector::new();
    /// vec.push(1);
    /// vec.push(2);
    /// vec.push(3);
    /// assert_eq!(vec.len(), 3);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Fallible version of [`push`](Self::push).
    ///
    /// On error `value` is dropped and the vector is unchanged.
    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        self.try_emplace_back(|| Ok(value)).map(|_| ())
    }

    /// Constructs an element with `f` at the back and returns a reference to it.
    #[inline]
    pub fn emplace_back<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.emplace(self.len, f)
    }

    /// Fallible version of [`emplace_back`](Self::emplace_back).
    pub fn try_emplace_back<F, E>(&mut self, f: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<TryReserveError>,
    {
        self.try_emplace(self.len, f)
    }

    /// Removes the last element from the vector and returns it, or `None` if empty.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let mut vec = Vector::from([1, 2]);
    /// assert_eq!(vec.pop(), Some(2));
    /// assert_eq!(vec.pop(), Some(1));
    /// assert_eq!(vec.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { ptr::read(self.buf.slot(self.len)) })
    }

    /// Drops the last element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    pub fn pop_back(&mut self) {
        assert!(self.len > 0, "pop_back on an empty vector (len is 0)");
        self.truncate(self.len - 1);
    }

    /// Inserts `value` at `index`, shifting all elements after it to the right.
    ///
    /// Returns a reference to the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, on capacity overflow, or aborts if the
    /// allocator fails.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let mut vec = Vector::from([1, 2, 3]);
    /// *vec.insert(1, 99) += 1;
    /// assert_eq!(vec.as_slice(), &[1, 100, 2, 3]);
    /// ```
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace(index, || value)
    }

    /// Fallible version of [`insert`](Self::insert).
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<&mut T, TryReserveError> {
        self.try_emplace(index, || Ok(value))
    }

    /// Constructs an element with `f` at `index` and returns a reference to it.
    ///
    /// If `f` panics, the vector is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, on capacity overflow, or aborts if the
    /// allocator fails.
    pub fn emplace<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace(index, || Ok::<T, TryReserveError>(f())) {
            Ok(element) => element,
            Err(err) => err.handle(),
        }
    }

    /// Constructs an element with the fallible `f` at `index`.
    ///
    /// Allocation failures are converted into the caller's error type. If
    /// allocation fails, `f` returns `Err`, or `f` panics, the vector is left
    /// unchanged and the failure reaches the caller.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::{TryReserveError, Vector};
    ///
    /// #[derive(Debug)]
    /// enum ParseFailed {
    ///     Reserve(TryReserveError),
    ///     Parse(std::num::ParseIntError),
    /// }
    ///
    /// impl From<TryReserveError> for ParseFailed {
    ///     fn from(err: TryReserveError) -> Self {
    ///         ParseFailed::Reserve(err)
    ///     }
    /// }
    ///
    /// let mut vec = Vector::from([1, 3]);
    /// vec.try_emplace(1, || "2".parse().map_err(ParseFailed::Parse)).unwrap();
    /// assert!(vec.try_emplace(0, || "x".parse().map_err(ParseFailed::Parse)).is_err());
    /// assert_eq!(vec.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn try_emplace<F, E>(&mut self, index: usize, f: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<TryReserveError>,
    {
        let len = self.len;
        if index > len {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        if len < self.capacity() {
            let value = f()?;
            unsafe {
                self.insert_in_place(index, value);
            }
        } else {
            self.insert_with_reallocation(index, f)?;
        }

        self.len = len + 1;
        Ok(unsafe { &mut *self.buf.slot(index) })
    }

    /// Places an already-built `value` at `index` inside the current buffer.
    ///
    /// # Safety
    ///
    /// `index <= len < capacity`. The caller bumps `len` afterwards.
    unsafe fn insert_in_place(&mut self, index: usize, value: T) {
        let len = self.len;
        debug_assert!(index <= len && len < self.capacity());

        // Open the gap right-to-left: the first step relocates the last
        // element into the one-past-end slot, so no slot is ever written
        // before its element has moved on.
        let mut i = len;
        while i > index {
            ptr::copy_nonoverlapping(self.buf.slot(i - 1), self.buf.slot(i), 1);
            i -= 1;
        }
        ptr::write(self.buf.slot(index), value);
    }

    /// Inserts into a full vector by migrating into a grown buffer.
    ///
    /// The new element is constructed before anything is migrated; a failed
    /// constructor drops the new buffer and leaves `self` untouched. The caller
    /// bumps `len` afterwards.
    fn insert_with_reallocation<F, E>(&mut self, index: usize, f: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<TryReserveError>,
    {
        let len = self.len;
        let new_capacity = self.grown_capacity().map_err(log_reserve_error)?;
        let mut new_buf = RawBuffer::try_allocate(new_capacity).map_err(log_reserve_error)?;

        let value = f()?;
        unsafe {
            ptr::write(new_buf.slot(index), value);
        }

        log::trace!(
            "reallocating vector storage for insert at {}: {} -> {} slots",
            index,
            self.capacity(),
            new_capacity
        );
        unsafe {
            relocate(self.buf.as_ptr(), new_buf.as_ptr(), index);
            relocate(
                self.buf.slot(index),
                new_buf.slot(index + 1),
                len - index,
            );
        }
        self.buf.swap(&mut new_buf);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let mut vec = Vector::from([1, 2, 3]);
    /// assert_eq!(vec.remove(1), 2);
    /// assert_eq!(vec.as_slice(), &[1, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("removal index (is {index}) should be < len (is {len})");
        }

        unsafe {
            let removed = ptr::read(self.buf.slot(index));

            // Close the gap left-to-right
            for i in index + 1..len {
                ptr::copy_nonoverlapping(self.buf.slot(i), self.buf.slot(i - 1), 1);
            }

            self.len = len - 1;
            removed
        }
    }

    /// Drops the element at `index`, shifting later elements left.
    ///
    /// Returns the index of the element that followed the erased one, which
    /// equals `len` when the last element was erased. The capacity is
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let mut vec = Vector::from([1, 2, 3]);
    /// let next = vec.erase(1);
    /// assert_eq!(vec[next], 3);
    /// assert_eq!(vec.erase(1), vec.len());
    /// ```
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Exchanges the contents of two vectors without touching any element.
    ///
    /// # Example
    ///
    /// ```
    /// use advanced_vector::Vector;
    /// let mut a = Vector::from([1, 2]);
    /// let mut b = Vector::from([3]);
    /// a.swap_with(&mut b);
    /// assert_eq!(a.as_slice(), &[3]);
    /// assert_eq!(b.as_slice(), &[1, 2]);
    /// ```
    pub fn swap_with(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        std::mem::swap(&mut self.len, &mut other.len);
    }

    /// Appends clones of every element of `other`.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        if let Err(err) = self.try_reserve_for_append(other.len()) {
            err.handle();
        }
        unsafe {
            clone_into_uninit(other, self.buf.slot(self.len));
        }
        self.len += other.len();
    }
}

/// Moves `count` live elements from `src` into the uninitialized slots at `dst`.
///
/// Moving a Rust value is a bitwise relocation that cannot fail, so migration
/// always transfers elements and never needs to fall back to cloning them.
/// Afterwards the source slots are logically uninitialized.
///
/// # Safety
///
/// `src` must hold `count` live elements, `dst` must be valid for `count`
/// writes, and the ranges must not overlap.
#[inline]
unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    ptr::copy_nonoverlapping(src, dst, count);
}

fn log_reserve_error(err: TryReserveError) -> TryReserveError {
    log::debug!("vector reservation failed: {err}");
    err
}

// Trait implementations
impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
        // RawBuffer is dropped afterwards and frees the memory
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Copies the elements into a buffer of exactly `len` slots.
    fn clone(&self) -> Self {
        let buf = RawBuffer::allocate(self.len);
        unsafe {
            clone_into_uninit(self.as_slice(), buf.as_ptr());
        }
        Self { buf, len: self.len }
    }

    /// Copy assignment.
    ///
    /// If `source` does not fit in the current capacity, a full copy is built
    /// first and swapped in, so a panicking clone leaves `self` unchanged.
    /// Otherwise the shared prefix is clone-assigned in place and the tail is
    /// either dropped or cloned into spare capacity.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap_with(&mut copy);
            return;
        }

        let common = self.len.min(source.len);
        self.as_mut_slice()[..common].clone_from_slice(&source.as_slice()[..common]);

        if source.len < self.len {
            self.truncate(source.len);
        } else {
            unsafe {
                clone_into_uninit(&source.as_slice()[common..], self.buf.slot(self.len));
            }
            self.len = source.len;
        }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<[T]> for Vector<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Vector<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: std::hash::Hash> std::hash::Hash for Vector<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            if let Err(err) = self.try_reserve_for_append(lower) {
                err.handle();
            }
        }
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for Vector<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(slice: &[T]) -> Self {
        let mut vec = Self::new();
        vec.extend_from_slice(slice);
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(array: [T; N]) -> Self {
        let mut vec = Self::with_capacity(N);
        let array = std::mem::ManuallyDrop::new(array);
        unsafe {
            relocate(array.as_ptr(), vec.buf.as_ptr(), N);
        }
        vec.len = N;
        vec
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts live instances through a shared counter.
    struct Tracked {
        value: i32,
        live: Rc<Cell<usize>>,
    }

    impl Tracked {
        fn new(value: i32, live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Self {
                value,
                live: live.clone(),
            }
        }
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            Tracked::new(self.value, &self.live)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn values(vec: &Vector<Tracked>) -> Vec<i32> {
        vec.iter().map(|t| t.value).collect()
    }

    #[test]
    fn test_new_empty() {
        let vec: Vector<i32> = Vector::new();
        assert!(vec.is_empty());
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn test_push_doubles_capacity() {
        let mut vec: Vector<i32> = Vector::new();
        let mut capacities = Vec::new();
        for i in 1..=3 {
            vec.push(i);
            capacities.push(vec.capacity());
        }
        assert_eq!(capacities, vec![1, 2, 4]);
        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn test_push_pop() {
        let mut vec: Vector<i32> = Vector::new();
        vec.push(1);
        vec.push(2);
        vec.push(3);
        assert_eq!(vec.pop(), Some(3));
        assert_eq!(vec.pop(), Some(2));
        assert_eq!(vec.pop(), Some(1));
        assert_eq!(vec.pop(), None);
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn test_pop_back() {
        let live = Rc::new(Cell::new(0));
        let mut vec: Vector<Tracked> = Vector::new();
        vec.push(Tracked::new(1, &live));
        vec.push(Tracked::new(2, &live));

        vec.pop_back();
        assert_eq!(values(&vec), vec![1]);
        assert_eq!(live.get(), 1);
    }

    #[test]
    #[should_panic(expected = "pop_back on an empty vector (len is 0)")]
    fn test_pop_back_empty_panics() {
        let mut vec: Vector<i32> = Vector::new();
        vec.pop_back();
    }

    #[test]
    fn test_index() {
        let mut vec = Vector::from([10, 20, 30]);
        assert_eq!(vec[0], 10);
        assert_eq!(vec[1..], [20, 30]);
        vec[0] = 100;
        assert_eq!(vec[0], 100);
        assert_eq!(vec.get(3), None);
    }

    #[test]
    fn test_insert_with_spare_capacity() {
        let mut vec: Vector<i32> = Vector::with_capacity(4);
        vec.extend([1, 2, 3]);
        let ptr = vec.as_ptr();

        vec.insert(1, 99);
        assert_eq!(vec, [1, 99, 2, 3]);
        assert_eq!(vec.capacity(), 4);
        assert_eq!(vec.as_ptr(), ptr);
    }

    #[test]
    fn test_insert_into_full_vector() {
        let mut vec: Vector<i32> = Vector::with_capacity(3);
        vec.extend([1, 2, 3]);
        assert_eq!(vec.capacity(), 3);

        vec.insert(1, 99);
        assert_eq!(vec, [1, 99, 2, 3]);
        assert_eq!(vec.capacity(), 6);
    }

    #[test]
    fn test_insert_at_ends() {
        let mut vec = Vector::from([2, 3]);
        vec.insert(0, 1);
        vec.insert(3, 4);
        assert_eq!(vec, [1, 2, 3, 4]);
    }

    #[test]
    fn test_insert_returns_new_element() {
        let mut vec = Vector::from([1, 3]);
        let inserted = vec.insert(1, 2);
        assert_eq!(*inserted, 2);
        *inserted = 20;
        assert_eq!(vec, [1, 20, 3]);
    }

    #[test]
    #[should_panic(expected = "insertion index (is 3) should be <= len (is 2)")]
    fn test_insert_out_of_range_panics() {
        let mut vec = Vector::from([1, 2]);
        vec.insert(3, 0);
    }

    #[test]
    fn test_emplace_back_returns_element() {
        let mut vec: Vector<String> = Vector::new();
        vec.emplace_back(|| "hello".to_string()).push_str(" world");
        assert_eq!(vec[0], "hello world");
    }

    #[test]
    fn test_erase() {
        let mut vec: Vector<i32> = Vector::from([1, 2, 3]);
        let capacity = vec.capacity();
        assert_eq!(vec.erase(1), 1);
        assert_eq!(vec, [1, 3]);
        assert_eq!(vec.capacity(), capacity);
    }

    #[test]
    fn test_erase_returns_following_index() {
        let mut vec = Vector::from([10, 20, 30, 40]);
        assert_eq!(vec.erase(0), 0);
        assert_eq!(vec[0], 20);
        assert_eq!(vec.erase(2), 2);
        assert_eq!(vec.erase(1), vec.len());
        assert_eq!(vec, [20]);
    }

    #[test]
    fn test_erase_drops_exactly_one() {
        let live = Rc::new(Cell::new(0));
        let mut vec: Vector<Tracked> = (0..5).map(|i| Tracked::new(i, &live)).collect();

        vec.erase(0);
        vec.erase(3);
        assert_eq!(values(&vec), vec![1, 2, 3]);
        assert_eq!(live.get(), 3);
    }

    #[test]
    #[should_panic(expected = "removal index (is 0) should be < len (is 0)")]
    fn test_erase_empty_panics() {
        let mut vec: Vector<i32> = Vector::new();
        vec.erase(0);
    }

    #[test]
    fn test_resize_grow_with_default() {
        let mut vec = Vector::from([1, 2, 3]);
        vec.resize(5);
        assert_eq!(vec, [1, 2, 3, 0, 0]);
        assert_eq!(vec.len(), 5);
        assert_eq!(vec.capacity(), 5);
    }

    #[test]
    fn test_resize_shrink_keeps_capacity() {
        let live = Rc::new(Cell::new(0));
        let mut vec: Vector<Tracked> = (0..6).map(|i| Tracked::new(i, &live)).collect();
        let capacity = vec.capacity();

        vec.resize_with(2, || unreachable!());
        assert_eq!(values(&vec), vec![0, 1]);
        assert_eq!(live.get(), 2);
        assert_eq!(vec.capacity(), capacity);
    }

    #[test]
    fn test_with_len() {
        let vec: Vector<String> = Vector::with_len(3);
        assert_eq!(vec.len(), 3);
        assert!(vec.iter().all(String::is_empty));
    }

    #[test]
    fn test_reserve_is_exact_and_never_shrinks() {
        let mut vec = Vector::from([1, 2, 3]);
        vec.reserve(10);
        assert_eq!(vec.capacity(), 10);
        vec.reserve(2);
        assert_eq!(vec.capacity(), 10);
        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn test_try_reserve_overflow_leaves_vector_intact() {
        let mut vec = Vector::from([1u64, 2, 3]);
        let err = vec.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(err, TryReserveError::CapacityOverflow);
        assert_eq!(vec, [1, 2, 3]);
        assert_eq!(vec.capacity(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Vector::from([1, 2, 3]);
        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_ne!(copy.as_ptr(), original.as_ptr());

        copy[0] = 100;
        copy.push(4);
        assert_eq!(original, [1, 2, 3]);
    }

    #[test]
    fn test_clone_from_larger_source() {
        let source: Vector<i32> = (1..=10).collect();
        let mut dest: Vector<i32> = Vector::with_capacity(3);
        dest.extend([7, 8]);

        dest.clone_from(&source);
        assert_eq!(dest, source);
        assert!(dest.capacity() >= 10);
        assert_ne!(dest.as_ptr(), source.as_ptr());
    }

    #[test]
    fn test_clone_from_smaller_source_keeps_buffer() {
        let live = Rc::new(Cell::new(0));
        let source: Vector<Tracked> = (0..2).map(|i| Tracked::new(i, &live)).collect();
        let mut dest: Vector<Tracked> = (10..15).map(|i| Tracked::new(i, &live)).collect();
        let ptr = dest.as_ptr();

        dest.clone_from(&source);
        assert_eq!(values(&dest), vec![0, 1]);
        assert_eq!(dest.as_ptr(), ptr);
        assert_eq!(live.get(), 4);
    }

    #[test]
    fn test_clone_from_into_spare_capacity() {
        let source = Vector::from([1, 2, 3, 4]);
        let mut dest: Vector<i32> = Vector::with_capacity(8);
        dest.push(9);
        let ptr = dest.as_ptr();

        dest.clone_from(&source);
        assert_eq!(dest, [1, 2, 3, 4]);
        assert_eq!(dest.as_ptr(), ptr);
        assert_eq!(dest.capacity(), 8);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut source = Vector::from([1, 2, 3]);
        let target = std::mem::take(&mut source);

        assert_eq!(target, [1, 2, 3]);
        assert_eq!(source.len(), 0);
        assert_eq!(source.capacity(), 0);
    }

    #[test]
    fn test_move_assign_drops_previous_elements() {
        let live = Rc::new(Cell::new(0));
        let mut dest: Vector<Tracked> = (0..4).map(|i| Tracked::new(i, &live)).collect();
        let source: Vector<Tracked> = (10..12).map(|i| Tracked::new(i, &live)).collect();
        assert_eq!(values(&dest), vec![0, 1, 2, 3]);
        assert_eq!(live.get(), 6);

        dest = source;
        assert_eq!(values(&dest), vec![10, 11]);
        assert_eq!(live.get(), 2);
    }

    #[test]
    fn test_swap_with() {
        let mut a = Vector::from([1, 2, 3]);
        let mut b: Vector<i32> = Vector::with_capacity(10);
        a.swap_with(&mut b);
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 10);
        assert_eq!(b, [1, 2, 3]);
    }

    #[test]
    fn test_drop_elements() {
        let live = Rc::new(Cell::new(0));
        {
            let mut vec: Vector<Tracked> = Vector::new();
            for i in 0..10 {
                vec.push(Tracked::new(i, &live));
            }
            vec.insert(3, Tracked::new(-1, &live));
            assert_eq!(live.get(), 11);
        }
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_extend_from_slice() {
        let mut vec = Vector::from([1]);
        vec.extend_from_slice(&[2, 3, 4]);
        assert_eq!(vec, [1, 2, 3, 4]);
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn test_small_appends_double_capacity() {
        let mut vec = Vector::from([1, 2, 3, 4]);
        vec.extend_from_slice(&[5]);
        assert_eq!(vec.capacity(), 8);
        vec.extend(std::iter::once(6));
        assert_eq!(vec.capacity(), 8);

        // A large append still gets exactly what it needs
        vec.extend_from_slice(&[0; 20]);
        assert_eq!(vec.len(), 26);
        assert_eq!(vec.capacity(), 26);
    }

    #[test]
    fn test_from_iter_and_extend_refs() {
        let mut vec: Vector<i32> = (0..3).collect();
        vec.extend(&[3, 4]);
        assert_eq!(vec, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_debug_and_ordering() {
        let a = Vector::from([1, 2]);
        let b = Vector::from([1, 3]);
        assert_eq!(format!("{a:?}"), "[1, 2]");
        assert!(a < b);
    }

    #[test]
    fn test_zst() {
        let mut vec: Vector<()> = Vector::new();
        for _ in 0..5 {
            vec.push(());
        }
        assert_eq!(vec.len(), 5);
        assert_eq!(vec.capacity(), 8);
        vec.insert(2, ());
        vec.erase(0);
        assert_eq!(vec.len(), 5);
    }
}

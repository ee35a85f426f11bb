//! Owning iterator for `Vector`.

use std::iter::FusedIterator;
use std::ptr;

use crate::raw_vec::RawBuffer;
use crate::Vector;

/// An owning iterator over the elements of a `Vector`.
///
/// This struct is created by the `into_iter` method on `Vector`
/// (provided by the [`IntoIterator`] trait). It takes over the vector's
/// buffer; slots `[head, tail)` are the elements not yet yielded.
pub struct IntoIter<T> {
    buf: RawBuffer<T>,
    head: usize,
    tail: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(mut vec: Vector<T>) -> Self {
        let tail = vec.len;
        // The elements now belong to the iterator; the emptied vector only
        // drops an empty buffer.
        vec.len = 0;
        Self {
            buf: vec.buf.take(),
            head: 0,
            tail,
        }
    }

    /// Returns the remaining items as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.buf.slot(self.head), self.tail - self.head) }
    }

    /// Returns the remaining items as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.buf.slot(self.head), self.tail - self.head) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        // Safety: head < tail, so the slot holds a live element
        let value = unsafe { ptr::read(self.buf.slot(self.head)) };
        self.head += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tail - self.head;
        (remaining, Some(remaining))
    }

    #[inline]
    fn count(self) -> usize {
        self.tail - self.head
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        Some(unsafe { ptr::read(self.buf.slot(self.tail)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining: *mut [T] = self.as_mut_slice();
        // Mark everything consumed first so a panicking drop cannot double-free
        self.head = self.tail;
        unsafe {
            ptr::drop_in_place(remaining);
        }
        // RawBuffer frees the memory afterwards
    }
}

impl<T: Clone> Clone for IntoIter<T> {
    fn clone(&self) -> Self {
        Vector::from(self.as_slice()).into_iter()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

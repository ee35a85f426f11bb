//! Error types for fallible reservations.

use std::alloc::Layout;

use thiserror::Error;

/// The error type for `try_*` operations that may need to allocate.
///
/// A failed operation leaves the vector exactly as it was before the call.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TryReserveError {
    /// The requested capacity does not fit in `isize::MAX` bytes, or the
    /// grown capacity overflowed `usize`.
    #[error("memory allocation failed due to capacity overflow")]
    CapacityOverflow,

    /// The global allocator could not satisfy the request.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// Layout of the request that failed.
        layout: Layout,
    },
}

impl TryReserveError {
    /// Turns the error into the behaviour of the infallible API.
    #[cold]
    pub(crate) fn handle(self) -> ! {
        match self {
            TryReserveError::CapacityOverflow => panic!("capacity overflow"),
            TryReserveError::AllocError { layout } => std::alloc::handle_alloc_error(layout),
        }
    }
}

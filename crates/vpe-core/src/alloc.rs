//! Fallible allocation.
//!
//! Every cached structure in the pipeline (matrices, curves, lattices) is
//! obtained through an [`Allocator`]. Allocation failure is an ordinary
//! error value: callers build into locals and only publish a structure
//! once every allocation it needs has succeeded.
//!
//! # Usage
//!
//! ```rust
//! use vpe_core::{Allocator, SystemAllocator};
//!
//! let v: Vec<u16> = SystemAllocator.try_alloc(729, 0).unwrap();
//! assert_eq!(v.len(), 729);
//! ```

use thiserror::Error;

/// Allocation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to allocate {bytes} bytes")]
pub struct AllocError {
    /// Size of the failed request.
    pub bytes: usize,
}

/// Source of cache memory.
pub trait Allocator {
    /// Allocates a vector of `len` copies of `fill`.
    fn try_alloc<T: Clone>(&self, len: usize, fill: T) -> Result<Vec<T>, AllocError>;

    /// Moves `value` to the heap.
    fn try_box<T>(&self, value: T) -> Result<Box<T>, AllocError> {
        Ok(Box::new(value))
    }
}

/// Global-heap allocator using `try_reserve_exact`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn try_alloc<T: Clone>(&self, len: usize, fill: T) -> Result<Vec<T>, AllocError> {
        let mut v = Vec::new();
        v.try_reserve_exact(len).map_err(|_| AllocError {
            bytes: len.saturating_mul(size_of::<T>()),
        })?;
        v.resize(len, fill);
        Ok(v)
    }
}

impl<A: Allocator> Allocator for &A {
    fn try_alloc<T: Clone>(&self, len: usize, fill: T) -> Result<Vec<T>, AllocError> {
        (**self).try_alloc(len, fill)
    }

    fn try_box<T>(&self, value: T) -> Result<Box<T>, AllocError> {
        (**self).try_box(value)
    }
}

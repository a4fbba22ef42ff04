//! Allocation accounting for build reports.

use std::cell::Cell;

use vpe_core::{AllocError, Allocator};

/// Forwards to an inner allocator and counts successful requests.
#[derive(Debug)]
pub(crate) struct Tracked<'a, A: Allocator> {
    inner: &'a A,
    count: Cell<usize>,
}

impl<'a, A: Allocator> Tracked<'a, A> {
    pub(crate) fn new(inner: &'a A) -> Self {
        Self {
            inner,
            count: Cell::new(0),
        }
    }

    /// Successful allocations so far.
    pub(crate) fn count(&self) -> usize {
        self.count.get()
    }

    fn bump(&self) {
        self.count.set(self.count.get() + 1);
    }
}

impl<A: Allocator> Allocator for Tracked<'_, A> {
    fn try_alloc<T: Clone>(&self, len: usize, fill: T) -> Result<Vec<T>, AllocError> {
        let v = self.inner.try_alloc(len, fill)?;
        self.bump();
        Ok(v)
    }

    fn try_box<T>(&self, value: T) -> Result<Box<T>, AllocError> {
        let b = self.inner.try_box(value)?;
        self.bump();
        Ok(b)
    }
}

/// Shared handle to the output buffer of C.
///
/// Worker threads write C concurrently, but every task covers a disjoint
/// rectangle of it, so no element is ever written by two threads. That
/// disjointness is what makes sharing a raw pointer across the pool sound;
/// the partitioner is responsible for upholding it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutPtr {
    ptr: *mut f64,
    len: usize,
}

// Safety: see the type-level comment. The pointee outlives the multiplication
// call, and all concurrent writes target disjoint indices.
unsafe impl Send for OutPtr {}
unsafe impl Sync for OutPtr {}

impl OutPtr {
    pub(crate) fn new(slice: &mut [f64]) -> Self {
        OutPtr {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
        }
    }

    /// Read the element at `idx`.
    ///
    /// # Safety
    /// `idx` must be in bounds and no other thread may be writing it.
    pub(crate) unsafe fn read(self, idx: usize) -> f64 {
        debug_assert!(idx < self.len);
        *self.ptr.add(idx)
    }

    /// Write the element at `idx`.
    ///
    /// # Safety
    /// `idx` must be in bounds and owned exclusively by the calling task.
    pub(crate) unsafe fn write(self, idx: usize, value: f64) {
        debug_assert!(idx < self.len);
        *self.ptr.add(idx) = value;
    }
}

/// One unit of work: a rectangle of C to compute, `[row_start, row_end)` by
/// `[col_start, col_end)`, both half-open.
///
/// Tasks are immutable once created and borrow the operand buffers; they
/// never outlive the multiplication call that partitioned them. For the
/// vectorized kernel, `b` holds the pre-transposed operand.
#[derive(Debug, Clone, Copy)]
pub struct Task<'a> {
    pub(crate) a: &'a [f64],
    pub(crate) b: &'a [f64],
    pub(crate) c: OutPtr,
    /// The shared dimension `m` (columns of A, rows of B).
    pub(crate) shared_dim: usize,
    /// The row stride of C (its column count, `p`).
    pub(crate) out_cols: usize,
    pub(crate) block_size: usize,
    pub(crate) row_start: usize,
    pub(crate) col_start: usize,
    pub(crate) row_end: usize,
    pub(crate) col_end: usize,
}

impl<'a> Task<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        a: &'a [f64],
        b: &'a [f64],
        c: OutPtr,
        shared_dim: usize,
        out_cols: usize,
        block_size: usize,
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    ) -> Self {
        Task {
            a,
            b,
            c,
            shared_dim,
            out_cols,
            block_size,
            row_start,
            col_start,
            row_end,
            col_end,
        }
    }

    /// Number of C cells this task covers.
    pub fn cells(&self) -> usize {
        (self.row_end - self.row_start) * (self.col_end - self.col_start)
    }

    /// The task's rectangle as `(row_start, col_start, row_end, col_end)`.
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (self.row_start, self.col_start, self.row_end, self.col_end)
    }
}


#[cfg(test)]
mod tests {
    use super::test_util::dummy_task;
    use super::*;

    #[test]
    fn test_cells_and_bounds() {
        let mut buf = vec![0.0; 12];
        let t = Task::new(&[], &[], OutPtr::new(&mut buf), 4, 4, 2, 1, 0, 3, 4);
        assert_eq!(t.cells(), 8);
        assert_eq!(t.bounds(), (1, 0, 3, 4));
    }

    #[test]
    fn test_dummy_task_identity() {
        assert_eq!(dummy_task(5).row_start, 5);
    }
}

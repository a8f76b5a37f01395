//! `mp-gemm` - Blocked, multithreaded dense matrix multiplication.
//!
//! This crate provides several competing strategies for computing
//! `C += A * B` over row-major f64 matrices:
//! - A naive triple-loop reference
//! - A sequential cache-blocked variant
//! - A multithreaded blocked variant: the output is partitioned into
//!   rectangular blocks, one task per block, handed out through a bounded
//!   FIFO work queue behind a single mutex to a pool of worker threads
//! - A multithreaded blocked + vectorized variant that pre-transposes B
//!   and runs the inner loop four f64 lanes at a time with FMA
//!
//! All variants expect C pre-allocated and zero-initialized by the caller
//! and produce results that agree within floating-point reassociation
//! error; on any `Err` return, C's contents are unspecified and must be
//! discarded.

use std::sync::Mutex;

pub mod error;
mod kernel;
mod naive;
mod partition;
mod pool;
pub mod queue;
mod single;
pub mod task;

pub use error::{GemmError, Result};
pub use mp_matrix::{FillPattern, Matrix, MatrixError};
pub use naive::multiply_naive;
pub use queue::WorkQueue;
pub use single::multiply_blocked;
pub use task::Task;

use crate::task::OutPtr;

/// Validate operand shapes for `A[n x m] * B[m x p] = C[n x p]` and return
/// `(n, m, p)`. Dimensions are non-zero by `Matrix` construction.
pub(crate) fn check_shapes(
    a: &Matrix<'_>,
    b: &Matrix<'_>,
    c: &Matrix<'_>,
) -> Result<(usize, usize, usize)> {
    let (n, m) = (a.rows(), a.cols());
    let (m2, p) = (b.rows(), b.cols());
    if m != m2 || c.rows() != n || c.cols() != p {
        return Err(GemmError::DimensionMismatch {
            n,
            m,
            m2,
            p,
            c_rows: c.rows(),
            c_cols: c.cols(),
        });
    }
    Ok((n, m, p))
}

fn check_tuning(block_size: usize, num_threads: usize) -> Result<()> {
    if block_size == 0 {
        return Err(GemmError::ZeroBlockSize);
    }
    if num_threads == 0 {
        return Err(GemmError::ZeroThreadCount);
    }
    Ok(())
}

/// Multithreaded blocked multiply: `C += A * B`.
///
/// The output is tiled into `block_size`-sided rectangles (with partial
/// edge blocks when the dimensions do not divide evenly), each becoming one
/// task in a queue sized exactly to the block count. `num_threads` workers
/// drain the queue, each writing only its own disjoint rectangle of C, and
/// are all joined before this returns. An oversized `block_size` is clamped
/// to the smallest of the three dimensions.
///
/// # Errors
/// Rejects mismatched shapes, a zero block size, a zero thread count, and a
/// C that is a borrowed view, all before any allocation. Thread spawn
/// failure cancels the already-running workers cooperatively and is
/// reported; C must then be discarded.
pub fn multiply_blocked_threaded(
    a: &Matrix<'_>,
    b: &Matrix<'_>,
    c: &mut Matrix<'_>,
    block_size: usize,
    num_threads: usize,
) -> Result<()> {
    let (n, m, p) = check_shapes(a, b, c)?;
    check_tuning(block_size, num_threads)?;
    let bs = partition::clamp_block_size(block_size, n, m, p);

    let out = OutPtr::new(c.as_mut_slice()?);
    let queue = partition::build_queue(a.as_slice(), b.as_slice(), out, n, m, p, bs)?;
    pool::run_workers(Mutex::new(queue), num_threads, kernel::compute_block)
}

/// Multithreaded blocked multiply with the vectorized kernel: `C += A * B`.
///
/// Identical partitioning and pool behavior to
/// [`multiply_blocked_threaded`], but B is transposed once up front so both
/// operands stream with unit stride, and the inner loop runs four f64 lanes
/// at a time with fused multiply-add (AVX2 when the CPU has it, a portable
/// equivalent otherwise). The transposed buffer lives until all workers
/// have joined. Results match the scalar variant within bounded
/// floating-point error, not bit-exactly.
pub fn multiply_blocked_threaded_simd(
    a: &Matrix<'_>,
    b: &Matrix<'_>,
    c: &mut Matrix<'_>,
    block_size: usize,
    num_threads: usize,
) -> Result<()> {
    let (n, m, p) = check_shapes(a, b, c)?;
    check_tuning(block_size, num_threads)?;
    let bs = partition::clamp_block_size(block_size, n, m, p);

    let b_trans = b.transposed();
    let out = OutPtr::new(c.as_mut_slice()?);
    let queue = partition::build_queue(a.as_slice(), b_trans.as_slice(), out, n, m, p, bs)?;
    pool::run_workers(
        Mutex::new(queue),
        num_threads,
        kernel::simd::compute_block_vectorized,
    )
}

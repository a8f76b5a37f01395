//! Vectorized block kernel.
//!
//! Algorithmically identical to the scalar kernel, but the inner `k` loop
//! runs four f64 lanes at a time with fused multiply-add. It expects B
//! pre-transposed so the lane loaded from B is contiguous, matching the
//! contiguous lane loaded from A. On x86_64 with AVX2+FMA (detected at
//! runtime) the lanes map to 256-bit registers; elsewhere a portable
//! `f64::mul_add` rendition of the same four-lane loop is used. Both paths
//! finish each chunk with a scalar remainder loop, so results agree with
//! the scalar kernel within the usual floating-point reassociation error.

use crate::task::Task;

/// Number of f64 elements processed per vector step.
const LANES: usize = 4;

/// Compute one block of C with the vectorized kernel. `task.b` must hold
/// the transposed operand (row `j` of it is column `j` of B).
pub(crate) fn compute_block_vectorized(task: &Task<'_>) {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            // Safety: the required target features were just detected
            unsafe { compute_block_avx2(task) };
            return;
        }
    }
    compute_block_mul_add(task);
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn compute_block_avx2(task: &Task<'_>) {
    use std::arch::x86_64::*;

    let a = task.a;
    let bt = task.b;
    let m = task.shared_dim;
    let p = task.out_cols;

    for k_start in (0..m).step_by(task.block_size) {
        let k_end = (k_start + task.block_size).min(m);
        for i in task.row_start..task.row_end {
            let a_row = i * m;
            for j in task.col_start..task.col_end {
                let b_row = j * m;
                let mut acc = _mm256_setzero_pd();
                let mut k = k_start;
                while k + LANES <= k_end {
                    let a_vec = _mm256_loadu_pd(a.as_ptr().add(a_row + k));
                    let b_vec = _mm256_loadu_pd(bt.as_ptr().add(b_row + k));
                    acc = _mm256_fmadd_pd(a_vec, b_vec, acc);
                    k += LANES;
                }

                // horizontal reduce, then the scalar tail
                let mut lanes = [0.0f64; LANES];
                _mm256_storeu_pd(lanes.as_mut_ptr(), acc);
                let mut sum = lanes[0] + lanes[1] + lanes[2] + lanes[3];
                while k < k_end {
                    sum += a[a_row + k] * bt[b_row + k];
                    k += 1;
                }

                let c_index = i * p + j;
                task.c.write(c_index, task.c.read(c_index) + sum);
            }
        }
    }
}

/// Portable four-lane FMA path for targets without AVX2.
fn compute_block_mul_add(task: &Task<'_>) {
    let a = task.a;
    let bt = task.b;
    let m = task.shared_dim;
    let p = task.out_cols;

    for k_start in (0..m).step_by(task.block_size) {
        let k_end = (k_start + task.block_size).min(m);
        for i in task.row_start..task.row_end {
            let a_row = i * m;
            for j in task.col_start..task.col_end {
                let b_row = j * m;
                let mut lanes = [0.0f64; LANES];
                let mut k = k_start;
                while k + LANES <= k_end {
                    for l in 0..LANES {
                        lanes[l] = a[a_row + k + l].mul_add(bt[b_row + k + l], lanes[l]);
                    }
                    k += LANES;
                }

                let mut sum = lanes[0] + lanes[1] + lanes[2] + lanes[3];
                while k < k_end {
                    sum += a[a_row + k] * bt[b_row + k];
                    k += 1;
                }

                let c_index = i * p + j;
                // Safety: this task owns the rectangle containing (i, j)
                unsafe { task.c.write(c_index, task.c.read(c_index) + sum) };
            }
        }
    }
}

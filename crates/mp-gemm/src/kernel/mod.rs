pub(crate) mod simd;

use crate::task::Task;

/// Compute one block of C: `C[i,j] += sum_k A[i,k] * B[k,j]` over the task's
/// rectangle, with B in its original row-major layout.
///
/// The shared dimension is walked in chunks of `block_size` (a second level
/// of tiling, orthogonal to the output-block tiling) so the operand lines
/// touched for this block stay cache-resident across the chunk. Each cell's
/// partial sum is kept in a local accumulator and written back once per
/// chunk, not per multiply-add.
///
/// Bounds are trusted to come from a valid task built by the partitioner;
/// the hot loop performs no validation of its own.
pub(crate) fn compute_block(task: &Task<'_>) {
    let a = task.a;
    let b = task.b;
    let m = task.shared_dim;
    let p = task.out_cols;

    for k_start in (0..m).step_by(task.block_size) {
        let k_end = (k_start + task.block_size).min(m);
        for i in task.row_start..task.row_end {
            let a_row = i * m;
            for j in task.col_start..task.col_end {
                let c_index = i * p + j;
                // Safety: this task owns the rectangle containing (i, j)
                let mut acc = unsafe { task.c.read(c_index) };
                let mut k = k_start;
                while k + 4 <= k_end {
                    acc += a[a_row + k] * b[k * p + j];
                    acc += a[a_row + k + 1] * b[(k + 1) * p + j];
                    acc += a[a_row + k + 2] * b[(k + 2) * p + j];
                    acc += a[a_row + k + 3] * b[(k + 3) * p + j];
                    k += 4;
                }
                while k < k_end {
                    acc += a[a_row + k] * b[k * p + j];
                    k += 1;
                }
                unsafe { task.c.write(c_index, acc) };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::OutPtr;

    fn reference(a: &[f64], b: &[f64], n: usize, m: usize, p: usize) -> Vec<f64> {
        let mut c = vec![0.0; n * p];
        for i in 0..n {
            for j in 0..p {
                for k in 0..m {
                    c[i * p + j] += a[i * m + k] * b[k * p + j];
                }
            }
        }
        c
    }

    #[test]
    fn test_single_task_covering_whole_output() {
        let (n, m, p) = (3, 5, 4);
        let a: Vec<f64> = (0..n * m).map(|x| x as f64 * 0.5).collect();
        let b: Vec<f64> = (0..m * p).map(|x| (x as f64 - 7.0) * 0.25).collect();
        let mut c = vec![0.0; n * p];

        let task = Task::new(&a, &b, OutPtr::new(&mut c), m, p, 2, 0, 0, n, p);
        compute_block(&task);

        let expected = reference(&a, &b, n, m, p);
        for (got, want) in c.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[test]
    fn test_partial_rectangle_leaves_rest_untouched() {
        let (n, m, p) = (4, 3, 4);
        let a = vec![1.0; n * m];
        let b = vec![2.0; m * p];
        let mut c = vec![0.0; n * p];

        // only the top-left 2x2 corner of C
        let task = Task::new(&a, &b, OutPtr::new(&mut c), m, p, 3, 0, 0, 2, 2);
        compute_block(&task);

        for i in 0..n {
            for j in 0..p {
                let expected = if i < 2 && j < 2 { 6.0 } else { 0.0 };
                assert_eq!(c[i * p + j], expected);
            }
        }
    }

    #[test]
    fn test_accumulates_into_existing_values() {
        let a = vec![1.0, 2.0];
        let b = vec![3.0, 4.0];
        let mut c = vec![10.0];

        // 1x2 * 2x1 with C pre-seeded: 10 + (1*3 + 2*4) = 21
        let task = Task::new(&a, &b, OutPtr::new(&mut c), 2, 1, 2, 0, 0, 1, 1);
        compute_block(&task);
        assert_eq!(c[0], 21.0);
    }
}

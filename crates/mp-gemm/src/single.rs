use mp_matrix::Matrix;

use crate::check_shapes;
use crate::error::{GemmError, Result};
use crate::partition::clamp_block_size;

/// Sequential blocked multiply: `C += A * B` with all three loop dimensions
/// tiled by `block_size`, on a single thread.
///
/// The inner dot product is 4-way unrolled with a scalar remainder, and each
/// cell's partial sum stays in a local accumulator for the duration of a
/// `k` chunk. An oversized `block_size` is clamped to the smallest of the
/// three dimensions; zero is rejected.
pub fn multiply_blocked(
    a: &Matrix<'_>,
    b: &Matrix<'_>,
    c: &mut Matrix<'_>,
    block_size: usize,
) -> Result<()> {
    let (n, m, p) = check_shapes(a, b, c)?;
    if block_size == 0 {
        return Err(GemmError::ZeroBlockSize);
    }
    let bs = clamp_block_size(block_size, n, m, p);

    let av = a.as_slice();
    let bv = b.as_slice();
    let cv = c.as_mut_slice()?;

    for i0 in (0..n).step_by(bs) {
        let i_max = (i0 + bs).min(n);
        for j0 in (0..p).step_by(bs) {
            let j_max = (j0 + bs).min(p);
            for k0 in (0..m).step_by(bs) {
                let k_max = (k0 + bs).min(m);
                for i in i0..i_max {
                    let a_row = i * m;
                    for j in j0..j_max {
                        let c_index = i * p + j;
                        let mut acc = cv[c_index];
                        let mut k = k0;
                        while k + 4 <= k_max {
                            acc += av[a_row + k] * bv[k * p + j];
                            acc += av[a_row + k + 1] * bv[(k + 1) * p + j];
                            acc += av[a_row + k + 2] * bv[(k + 2) * p + j];
                            acc += av[a_row + k + 3] * bv[(k + 3) * p + j];
                            k += 4;
                        }
                        while k < k_max {
                            acc += av[a_row + k] * bv[k * p + j];
                            k += 1;
                        }
                        cv[c_index] = acc;
                    }
                }
            }
        }
    }
    Ok(())
}

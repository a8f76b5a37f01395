use mp_matrix::Matrix;

use crate::check_shapes;
use crate::error::Result;

/// Triple-loop reference multiply: `C += A * B`.
///
/// Straightforward i-j-k order with no tiling; used as the correctness
/// baseline the optimized variants are compared against.
pub fn multiply_naive(a: &Matrix<'_>, b: &Matrix<'_>, c: &mut Matrix<'_>) -> Result<()> {
    let (n, m, p) = check_shapes(a, b, c)?;
    let av = a.as_slice();
    let bv = b.as_slice();
    let cv = c.as_mut_slice()?;

    for i in 0..n {
        for j in 0..p {
            let mut sum = 0.0;
            for k in 0..m {
                sum += av[i * m + k] * bv[k * p + j];
            }
            cv[i * p + j] += sum;
        }
    }
    Ok(())
}

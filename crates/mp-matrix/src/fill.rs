use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MatrixError, Result};

/// Named strategies for populating a freshly allocated matrix.
///
/// This is a closed set on purpose: the callers only ever need zeroed
/// buffers and bounded random inputs for reproducible benchmark runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillPattern {
    /// Every element is 0.0.
    Zero,
    /// Elements drawn uniformly from `[min, max]` with a fixed seed, so the
    /// same pattern always produces the same matrix.
    Uniform { min: f64, max: f64, seed: u64 },
}

impl FillPattern {
    /// Produce `n` elements according to this pattern.
    ///
    /// # Errors
    /// Returns `InvalidRange` if a uniform pattern has `min > max`.
    pub(crate) fn generate(&self, n: usize) -> Result<Vec<f64>> {
        match *self {
            FillPattern::Zero => Ok(vec![0.0; n]),
            FillPattern::Uniform { min, max, seed } => {
                if min > max {
                    return Err(MatrixError::InvalidRange { min, max });
                }
                let mut rng = StdRng::seed_from_u64(seed);
                Ok((0..n).map(|_| rng.gen_range(min..=max)).collect())
            }
        }
    }
}

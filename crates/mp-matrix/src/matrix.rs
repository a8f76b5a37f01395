use std::borrow::Cow;

use crate::error::{MatrixError, Result};
use crate::fill::FillPattern;

/// A dense matrix of f64 values in contiguous row-major storage.
///
/// The buffer is either owned or a borrowed view over memory owned by
/// someone else. Views are read-only: mutable access and (implicitly)
/// freeing are reserved for owned matrices, so wrapping an existing buffer
/// never risks a double free or an aliased write.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<'a> {
    values: Cow<'a, [f64]>,
    rows: usize,
    cols: usize,
}

fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::ZeroDimension { rows, cols });
    }
    Ok(())
}

impl Matrix<'static> {
    /// Create an owned matrix from a vector of row-major values.
    ///
    /// # Errors
    /// Returns an error if either dimension is zero or the vector length
    /// does not equal `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        check_dims(rows, cols)?;
        if values.len() != rows * cols {
            return Err(MatrixError::LengthMismatch {
                rows,
                cols,
                len: values.len(),
                expected: rows * cols,
            });
        }
        Ok(Matrix {
            values: Cow::Owned(values),
            rows,
            cols,
        })
    }

    /// Create an owned, zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::with_pattern(rows, cols, FillPattern::Zero)
    }

    /// Create an owned matrix populated by the given fill pattern.
    pub fn with_pattern(rows: usize, cols: usize, pattern: FillPattern) -> Result<Self> {
        check_dims(rows, cols)?;
        let values = pattern.generate(rows * cols)?;
        Ok(Matrix {
            values: Cow::Owned(values),
            rows,
            cols,
        })
    }
}

impl<'a> Matrix<'a> {
    /// Create a read-only view over an existing row-major buffer.
    ///
    /// The view borrows the buffer and never frees it.
    pub fn from_slice(rows: usize, cols: usize, values: &'a [f64]) -> Result<Matrix<'a>> {
        check_dims(rows, cols)?;
        if values.len() != rows * cols {
            return Err(MatrixError::LengthMismatch {
                rows,
                cols,
                len: values.len(),
                expected: rows * cols,
            });
        }
        Ok(Matrix {
            values: Cow::Borrowed(values),
            rows,
            cols,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements (`rows * cols`).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a matrix has at least one element by construction.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if this matrix borrows its buffer rather than owning it.
    pub fn is_view(&self) -> bool {
        matches!(self.values, Cow::Borrowed(_))
    }

    /// The underlying row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access to the underlying values.
    ///
    /// # Errors
    /// Returns `ViewNotWritable` if this matrix is a borrowed view.
    pub fn as_mut_slice(&mut self) -> Result<&mut [f64]> {
        match &mut self.values {
            Cow::Owned(v) => Ok(v.as_mut_slice()),
            Cow::Borrowed(_) => Err(MatrixError::ViewNotWritable),
        }
    }

    /// The element at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols);
        self.values[row * self.cols + col]
    }

    /// An owned transposed copy of this matrix.
    ///
    /// Row `j` of the result is column `j` of self, so a dot product against
    /// the transpose walks both operands with unit stride.
    pub fn transposed(&self) -> Matrix<'static> {
        let mut out = vec![0.0; self.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                out[j * self.rows + i] = self.values[i * self.cols + j];
            }
        }
        Matrix {
            values: Cow::Owned(out),
            rows: self.cols,
            cols: self.rows,
        }
    }
}

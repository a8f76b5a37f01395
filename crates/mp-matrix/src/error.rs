use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("matrix dimensions must be non-zero, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },
    #[error("buffer of {len} elements does not match {rows}x{cols} matrix ({expected} elements)")]
    LengthMismatch {
        rows: usize,
        cols: usize,
        len: usize,
        expected: usize,
    },
    #[error("cannot mutably borrow a matrix view")]
    ViewNotWritable,
    #[error("empty fill range: min {min} exceeds max {max}")]
    InvalidRange { min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, MatrixError>;

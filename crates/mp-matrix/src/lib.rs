//! `mp-matrix` - Row-major f64 matrix storage and factories for matpool.
//!
//! This crate provides:
//! - A `Matrix` type over contiguous row-major storage, either owned or a
//!   borrowed read-only view
//! - Fill patterns for zeroed and seeded-random matrices
//! - Transposition, used by the vectorized multiply to stream both operands
//!   with unit stride

pub mod error;
pub mod fill;
pub mod matrix;

// Re-export primary types at the crate root for convenience.
pub use error::{MatrixError, Result};
pub use fill::FillPattern;
pub use matrix::Matrix;

//! # mat-core
//!
//! Dense `f64` matrices with exact, textbook algorithms.
//!
//! This crate provides:
//! - Row-major dense storage with elementwise maps and transposition
//! - Addition, multiplication and scalar division
//! - Gaussian elimination with rank
//! - Determinant, adjugate and inverse by cofactor expansion
//! - A compact binary format with pluggable storage backends
//!
//! ## Quick Start
//!
//! ```
//! use mat_core::Matrix;
//!
//! let a = Matrix::identity(2)?;
//! let b = Matrix::from_rows(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]])?;
//! let sum = a.multiply(&b)?.add(&b)?;
//! assert_eq!(sum[(1, 1)], 2.0);
//!
//! let restored = Matrix::from_bytes(&sum.to_bytes()?)?;
//! assert_eq!(restored, sum);
//! # Ok::<(), mat_core::MatError>(())
//! ```
//!
//! ## Limits
//!
//! Determinants and inverses use cofactor expansion, which is O(n!).
//! Elimination picks the first nonzero pivot without regard to magnitude.
//! Neither is suitable for large or ill-conditioned matrices.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod dense_matrix;
pub mod error;

mod arithmetic;
mod determinant;
mod elimination;
mod submatrix;

pub use codec::{
    deserialize, deserialize_with, serialize, CodecConfig, FsStore, MatrixCodec, MatrixStore,
    MemoryStore,
};
pub use dense_matrix::{Matrix, MatrixDisplay, PrintConfig};
pub use elimination::GaussTuple;
pub use error::{MatError, Result};

#[cfg(test)]
mod proptests;

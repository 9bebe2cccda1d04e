//! Matrix addition, multiplication and scalar division.

use crate::dense_matrix::Matrix;
use crate::error::{MatError, Result};

impl Matrix {
    /// Elementwise sum `self + other`.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] unless both operands have the same shape.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(MatError::shape(
                "add",
                format!("{}x{}", self.num_rows(), self.num_cols()),
                format!("{}x{}", other.num_rows(), other.num_cols()),
            ));
        }
        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self::from_parts(self.num_rows(), self.num_cols(), data))
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] unless `self.num_cols() == other.num_rows()`.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.num_cols() != other.num_rows() {
            return Err(MatError::shape(
                "multiply",
                format!("{} rows on the right", self.num_cols()),
                format!("{} rows", other.num_rows()),
            ));
        }

        let mut result = Self::allocate(self.num_rows(), other.num_cols())?;
        for j in 0..other.num_cols() {
            for i in 0..self.num_rows() {
                let mut sum = 0.0;
                for k in 0..self.num_cols() {
                    sum += self[(i, k)] * other[(k, j)];
                }
                result[(i, j)] = sum;
            }
        }
        Ok(result)
    }

    /// Divides every entry by `scalar`.
    ///
    /// Division by zero follows IEEE 754 and yields infinities or NaN.
    #[must_use]
    pub fn divide_by_scalar(&self, scalar: f64) -> Self {
        self.map(|v| v / scalar)
    }
}

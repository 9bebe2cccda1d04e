//! Determinants by cofactor expansion, adjugate and inverse.
//!
//! Expansion is O(n!) and meant for small matrices only.

use log::warn;

use crate::dense_matrix::Matrix;
use crate::error::{MatError, Result};

/// `(-1)^k` as a float.
fn sign(k: usize) -> f64 {
    if k % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

impl Matrix {
    fn require_square(&self, op: &'static str) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatError::shape(
                op,
                "square matrix",
                format!("{}x{}", self.num_rows(), self.num_cols()),
            ))
        }
    }

    /// Computes the determinant by expansion along the first row.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] if the matrix is not square.
    pub fn determinant(&self) -> Result<f64> {
        self.require_square("determinant")?;
        self.expand()
    }

    fn expand(&self) -> Result<f64> {
        match self.num_rows() {
            1 => Ok(self[(0, 0)]),
            2 => Ok(self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]),
            n => {
                let mut det = 0.0;
                // zero entries are not skipped: 0 * inf must stay NaN
                for i in 0..n {
                    det += self[(0, i)] * self.minor_det(0, i)? * sign(i);
                }
                Ok(det)
            }
        }
    }

    /// Determinant of the minor at `(row, col)`; the minor is dropped on return.
    fn minor_det(&self, row: usize, col: usize) -> Result<f64> {
        self.decrease_dimension(row, col)?.expand()
    }

    /// Matrix of signed minors: entry `(i, j)` is `(-1)^(i+j) * det(minor(i, j))`.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] if the matrix is not square.
    pub fn cofactor_matrix(&self) -> Result<Self> {
        self.require_square("cofactor_matrix")?;
        let n = self.num_rows();
        let mut cofactors = Self::allocate(n, n)?;
        if n == 1 {
            cofactors[(0, 0)] = 1.0;
            return Ok(cofactors);
        }
        for i in 0..n {
            for j in 0..n {
                cofactors[(i, j)] = sign(i + j) * self.minor_det(i, j)?;
            }
        }
        Ok(cofactors)
    }

    /// Classical adjugate: the transpose of [`Matrix::cofactor_matrix`].
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] if the matrix is not square.
    pub fn adjugate(&self) -> Result<Self> {
        Ok(self.cofactor_matrix()?.transpose())
    }

    /// Inverse as `adjugate / determinant`.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] if the matrix is not square,
    /// [`MatError::SingularMatrix`] if the determinant is exactly zero.
    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant()?;
        if det == 0.0 {
            warn!(
                "inverse of singular {}x{} matrix requested",
                self.num_rows(),
                self.num_cols()
            );
            return Err(MatError::SingularMatrix { det });
        }
        Ok(self.adjugate()?.divide_by_scalar(det))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix, b: &Matrix) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() < 1e-9, "{a}\n!=\n{b}");
        }
    }

    #[test]
    fn test_det_2x2() {
        let m = Matrix::from_rows(vec![vec![3.0, 8.0], vec![4.0, 6.0]]).unwrap();
        // 3*6 - 8*4 = 18 - 32 = -14
        assert_eq!(m.determinant().unwrap(), -14.0);
    }

    #[test]
    fn test_det_1x1() {
        let m = Matrix::from_rows(vec![vec![-7.5]]).unwrap();
        assert_eq!(m.determinant().unwrap(), -7.5);
    }

    #[test]
    fn test_det_3x3() {
        let m = Matrix::from_rows(vec![
            vec![6.0, 1.0, 1.0],
            vec![4.0, -2.0, 5.0],
            vec![2.0, 8.0, 7.0],
        ])
        .unwrap();
        assert_eq!(m.determinant().unwrap(), -306.0);
    }

    #[test]
    fn test_det_zero_entry_times_infinite_minor() {
        let m = Matrix::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, f64::INFINITY, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();
        assert!(m.determinant().unwrap().is_nan());
    }

    #[test]
    fn test_det_identity() {
        for n in 1..7 {
            assert_eq!(Matrix::identity(n).unwrap().determinant().unwrap(), 1.0);
        }
    }

    #[test]
    fn test_det_non_square() {
        let m = Matrix::allocate(2, 3).unwrap();
        assert!(m.determinant().unwrap_err().is_shape_mismatch());
        assert!(m.adjugate().unwrap_err().is_shape_mismatch());
        assert!(m.inverse().unwrap_err().is_shape_mismatch());
    }

    #[test]
    fn test_cofactor_and_adjugate() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let cof = m.cofactor_matrix().unwrap();
        assert_eq!(cof.as_slice(), &[4.0, -3.0, -2.0, 1.0]);
        let adj = m.adjugate().unwrap();
        assert_eq!(adj.as_slice(), &[4.0, -2.0, -3.0, 1.0]);
    }

    #[test]
    fn test_adjugate_1x1() {
        let m = Matrix::from_rows(vec![vec![5.0]]).unwrap();
        assert_eq!(m.adjugate().unwrap().as_slice(), &[1.0]);
        assert_eq!(m.inverse().unwrap().as_slice(), &[0.2]);
    }

    #[test]
    fn test_inverse_2x2() {
        let m = Matrix::from_rows(vec![vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
        let inv = m.inverse().unwrap();
        let expected = Matrix::from_rows(vec![vec![0.6, -0.7], vec![-0.2, 0.4]]).unwrap();
        assert_close(&inv, &expected);
        assert_close(&m.multiply(&inv).unwrap(), &Matrix::identity(2).unwrap());
    }

    #[test]
    fn test_inverse_3x3_non_symmetric() {
        let m = Matrix::from_rows(vec![
            vec![2.0, 0.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 1.0, 2.0],
        ])
        .unwrap();
        let inv = m.inverse().unwrap();
        let id = Matrix::identity(3).unwrap();
        assert_close(&m.multiply(&inv).unwrap(), &id);
        assert_close(&inv.multiply(&m).unwrap(), &id);
    }

    #[test]
    fn test_inverse_singular() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert!(matches!(
            m.inverse(),
            Err(MatError::SingularMatrix { det }) if det == 0.0
        ));
    }
}

//! Gaussian elimination.
//!
//! Pivots are taken in row order as they are found: for each column the
//! first unused row with a nonzero entry becomes that column's pivot row.
//! Rows are never swapped, so the echelon structure is up to a row
//! permutation. There is no magnitude-based pivot selection.

use log::trace;

use crate::dense_matrix::Matrix;

/// Result of an elimination: the reduced matrix and the number of pivot columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussTuple {
    /// The eliminated matrix.
    pub matrix: Matrix,
    /// Number of columns that received a pivot.
    pub rank: usize,
}

impl Matrix {
    /// Row-reduces a copy of the matrix.
    ///
    /// For each column, the first row that is not yet a pivot row and has a
    /// nonzero entry there is normalized so that entry becomes 1, and that
    /// column is cleared from every other non-pivot row. Columns without a
    /// pivot lower the rank, which starts at the column count.
    #[must_use]
    pub fn gaussian_eliminate(&self) -> GaussTuple {
        let mut m = self.clone();
        let num_rows = m.num_rows();
        let mut is_pivot_row = vec![false; num_rows];
        let mut rank = m.num_cols();

        for col in 0..m.num_cols() {
            let Some(pivot_row) =
                (0..num_rows).find(|&row| !is_pivot_row[row] && m[(row, col)] != 0.0)
            else {
                trace!("column {col}: no pivot");
                rank -= 1;
                continue;
            };
            trace!("column {col}: pivot row {pivot_row}");
            is_pivot_row[pivot_row] = true;

            let pivot = m[(pivot_row, col)];
            m.scale_row_from(pivot_row, col, pivot);

            for row in 0..num_rows {
                if is_pivot_row[row] {
                    continue;
                }
                let factor = m[(row, col)];
                if factor != 0.0 {
                    m.sub_scaled_row(row, pivot_row, factor);
                }
            }
        }

        GaussTuple { matrix: m, rank }
    }

    /// Runs [`Matrix::gaussian_eliminate`] followed by one upward sweep.
    ///
    /// Going from the second-to-last row to the first, each row has the row
    /// below it subtracted, scaled by the row's own last-column entry. The
    /// last column is always the scale source regardless of where the row's
    /// pivot sits; the rank is carried over from the forward pass.
    #[must_use]
    pub fn reduced_gaussian_eliminate(&self) -> GaussTuple {
        let GaussTuple { matrix: mut m, rank } = self.gaussian_eliminate();
        let last_col = m.num_cols() - 1;

        for row in (0..m.num_rows().saturating_sub(1)).rev() {
            let factor = m[(row, last_col)];
            if factor != 0.0 {
                m.sub_scaled_row(row, row + 1, factor);
            }
        }

        GaussTuple { matrix: m, rank }
    }

    /// Number of pivot columns found by [`Matrix::gaussian_eliminate`].
    #[must_use]
    pub fn rank(&self) -> usize {
        self.gaussian_eliminate().rank
    }
}

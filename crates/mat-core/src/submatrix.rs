//! Region copies and minors.

use crate::dense_matrix::Matrix;
use crate::error::{MatError, Result};

impl Matrix {
    /// Copies the `num_rows x num_cols` block starting at `(row_start, col_start)`.
    ///
    /// The end of the block must lie strictly inside the matrix:
    /// `row_start + num_rows < self.num_rows()` and likewise for columns, so
    /// a block can never reach the last row or column.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] for an empty block,
    /// [`MatError::IndexOutOfRange`] when the block end is out of bounds.
    pub fn get_submatrix(
        &self,
        row_start: usize,
        col_start: usize,
        num_rows: usize,
        num_cols: usize,
    ) -> Result<Self> {
        if num_rows == 0 || num_cols == 0 {
            return Err(MatError::shape(
                "get_submatrix",
                "non-empty block",
                format!("{num_rows}x{num_cols}"),
            ));
        }
        let row_end = row_start.saturating_add(num_rows);
        if row_end >= self.num_rows() {
            return Err(MatError::index("get_submatrix", row_end, self.num_rows()));
        }
        let col_end = col_start.saturating_add(num_cols);
        if col_end >= self.num_cols() {
            return Err(MatError::index("get_submatrix", col_end, self.num_cols()));
        }

        let mut data = Vec::with_capacity(num_rows * num_cols);
        for row in row_start..row_end {
            data.extend_from_slice(&self.row(row)[col_start..col_end]);
        }
        Ok(Self::from_parts(num_rows, num_cols, data))
    }

    /// Returns the minor obtained by deleting `delete_row` and `delete_col`.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] if the matrix has a single row or column,
    /// [`MatError::IndexOutOfRange`] if either index is out of bounds.
    pub fn decrease_dimension(&self, delete_row: usize, delete_col: usize) -> Result<Self> {
        if self.num_rows() < 2 || self.num_cols() < 2 {
            return Err(MatError::shape(
                "decrease_dimension",
                "at least 2x2",
                format!("{}x{}", self.num_rows(), self.num_cols()),
            ));
        }
        if delete_row >= self.num_rows() {
            return Err(MatError::index(
                "decrease_dimension",
                delete_row,
                self.num_rows(),
            ));
        }
        if delete_col >= self.num_cols() {
            return Err(MatError::index(
                "decrease_dimension",
                delete_col,
                self.num_cols(),
            ));
        }

        let mut data = Vec::with_capacity((self.num_rows() - 1) * (self.num_cols() - 1));
        for row in (0..self.num_rows()).filter(|&r| r != delete_row) {
            data.extend(
                self.row(row)
                    .iter()
                    .enumerate()
                    .filter(|&(c, _)| c != delete_col)
                    .map(|(_, &v)| v),
            );
        }
        Ok(Self::from_parts(
            self.num_rows() - 1,
            self.num_cols() - 1,
            data,
        ))
    }
}

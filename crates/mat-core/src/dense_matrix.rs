//! Dense `f64` matrix storage and elementwise operations.
//!
//! Every matrix owns a flat buffer in row-major order: entry `(r, c)` lives
//! at offset `r * num_cols + c`. All higher-level operations go through
//! that rule, either via [`Index`] or the row slices.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{MatError, Result};

/// Dense matrix of `f64` stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Matrix entries in row-major order.
    data: Vec<f64>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

/// Zeroed buffer of `rows * cols` entries, reporting exhaustion instead of aborting.
fn zeroed_buffer(rows: usize, cols: usize) -> Result<Vec<f64>> {
    let len = rows
        .checked_mul(cols)
        .ok_or(MatError::Allocation { rows, cols })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| MatError::Allocation { rows, cols })?;
    data.resize(len, 0.0);
    Ok(data)
}

impl Matrix {
    /// Allocates a `rows x cols` matrix filled with zeros.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] if either dimension is zero,
    /// [`MatError::Allocation`] if the buffer cannot be reserved.
    pub fn allocate(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatError::shape(
                "allocate",
                "positive dimensions",
                format!("{rows}x{cols}"),
            ));
        }
        Ok(Self {
            data: zeroed_buffer(rows, cols)?,
            num_rows: rows,
            num_cols: cols,
        })
    }

    /// Creates a matrix from a list of equally long rows.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] for empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if num_rows == 0 || num_cols == 0 {
            return Err(MatError::shape(
                "from_rows",
                "at least one non-empty row",
                format!("{num_rows}x{num_cols}"),
            ));
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != num_cols) {
            return Err(MatError::shape(
                "from_rows",
                format!("rows of length {num_cols}"),
                format!("row of length {}", bad.len()),
            ));
        }
        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        })
    }

    /// Wraps an already validated buffer.
    pub(crate) fn from_parts(num_rows: usize, num_cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates an `n x n` identity matrix.
    ///
    /// # Errors
    ///
    /// Same as [`Matrix::allocate`].
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::allocate(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows, self.num_cols)
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns the entries in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the entry at (row, col), if in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.num_rows && col < self.num_cols {
            Some(self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the entry at (row, col).
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row < self.num_rows && col < self.num_cols {
            Some(&mut self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    ///
    /// # Panics
    ///
    /// If `row >= num_rows`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Overwrites every entry from a flat row-major slice.
    ///
    /// # Errors
    ///
    /// [`MatError::ShapeMismatch`] unless `values.len() == rows * cols`.
    pub fn fill(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.data.len() {
            return Err(MatError::shape(
                "fill",
                format!("{} values", self.data.len()),
                format!("{} values", values.len()),
            ));
        }
        self.data.copy_from_slice(values);
        Ok(())
    }

    /// Overwrites one column.
    ///
    /// # Errors
    ///
    /// [`MatError::IndexOutOfRange`] if `col >= num_cols`,
    /// [`MatError::ShapeMismatch`] unless `values.len() == num_rows`.
    pub fn set_column(&mut self, values: &[f64], col: usize) -> Result<()> {
        if col >= self.num_cols {
            return Err(MatError::index("set_column", col, self.num_cols));
        }
        if values.len() != self.num_rows {
            return Err(MatError::shape(
                "set_column",
                format!("{} values", self.num_rows),
                format!("{} values", values.len()),
            ));
        }
        for (row, &val) in values.iter().enumerate() {
            self[(row, col)] = val;
        }
        Ok(())
    }

    /// Deep copy into freshly allocated storage.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns a new matrix with `f` applied to every entry.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Applies `f` to every entry in place.
    pub fn map_in_place(&mut self, f: impl Fn(f64) -> f64) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Elementwise negation.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.map(|v| -v)
    }

    /// Elementwise absolute value.
    #[must_use]
    pub fn absolute(&self) -> Self {
        self.map(f64::abs)
    }

    /// Elementwise floor.
    #[must_use]
    pub fn floor(&self) -> Self {
        self.map(f64::floor)
    }

    /// Elementwise ceiling.
    #[must_use]
    pub fn ceiling(&self) -> Self {
        self.map(f64::ceil)
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.data.len()];
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                data[j * self.num_rows + i] = self[(i, j)];
            }
        }
        Self {
            data,
            num_rows: self.num_cols,
            num_cols: self.num_rows,
        }
    }

    /// Divides `row` by `divisor` from column `from` onward.
    pub(crate) fn scale_row_from(&mut self, row: usize, from: usize, divisor: f64) {
        for v in &mut self.row_mut(row)[from..] {
            *v /= divisor;
        }
    }

    /// row[target] -= factor * row[source].
    pub(crate) fn sub_scaled_row(&mut self, target: usize, source: usize, factor: f64) {
        for k in 0..self.num_cols {
            let val = self[(source, k)] * factor;
            self[(target, k)] -= val;
        }
    }

    /// Display adapter with a custom element precision.
    #[must_use]
    pub fn display_with(&self, config: &PrintConfig) -> MatrixDisplay<'_> {
        MatrixDisplay {
            matrix: self,
            config: *config,
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

/// Formatting options for printed matrices.
#[derive(Clone, Copy, Debug)]
pub struct PrintConfig {
    /// Digits after the decimal point for each entry.
    pub precision: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

/// Printable view of a [`Matrix`], see [`Matrix::display_with`].
#[derive(Debug)]
pub struct MatrixDisplay<'a> {
    matrix: &'a Matrix,
    config: PrintConfig,
}

impl fmt::Display for MatrixDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix;
        writeln!(f, "Mat ({}x{}):", m.num_rows, m.num_cols)?;
        for row in 0..m.num_rows {
            for v in m.row(row) {
                write!(f, "{v:.prec$} ", prec = self.config.precision)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with(&PrintConfig::default()), f)
    }
}

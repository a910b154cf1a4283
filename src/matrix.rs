use core::ops::Index;
use rayon::prelude::*;

/// Store a dense matrix in a row-major way.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMajorMatrix<A> {
    /// Number of rows in the matrix
    n_rows: usize,
    /// Number of columns in the matrix
    n_cols: usize,
    /// Values, one row after the other
    values: Vec<A>,
}

impl<A> RowMajorMatrix<A> {
    pub fn from_flat(n_rows: usize, n_cols: usize, values: Vec<A>) -> Self {
        assert_eq!(n_rows * n_cols, values.len());
        Self {
            n_rows,
            n_cols,
            values,
        }
    }

    /// All the rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<A>>) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |row| row.len());
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            assert_eq!(row.len(), n_cols, "ragged rows");
            values.extend(row);
        }
        Self::from_flat(n_rows, n_cols, values)
    }

    pub fn from_function(n_rows: usize, n_cols: usize, f: impl Fn(usize, usize) -> A) -> Self {
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for row in 0..n_rows {
            for col in 0..n_cols {
                values.push(f(row, col));
            }
        }
        Self::from_flat(n_rows, n_cols, values)
    }

    pub fn row(&self, row: usize) -> &[A] {
        let start = row * self.n_cols;
        &self.values[start..start + self.n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[A]> + '_ {
        // chunks(0) panics, and a matrix without columns has no values anyway
        self.values.chunks(self.n_cols.max(1))
    }

    pub fn flat(&self) -> &Vec<A> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }
}

impl<A: Sync> RowMajorMatrix<A> {
    pub fn par_rows(&self) -> impl IndexedParallelIterator<Item = &[A]> + '_ {
        self.values.par_chunks(self.n_cols.max(1))
    }
}

impl<A> Index<(usize, usize)> for RowMajorMatrix<A> {
    type Output = A;
    fn index(&self, (row, col): (usize, usize)) -> &A {
        // No need to check for row because it will be out of the buffer
        assert!(col < self.n_cols);
        &self.values[row * self.n_cols + col]
    }
}

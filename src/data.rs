use crate::{FitError, FitResult, RowMajorMatrix};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Numeric table loaded from a delimited file with a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// One label per column, in header order
    pub labels: Vec<String>,
    pub matrix: RowMajorMatrix<f64>,
}

/// Util for parsing a CSV with a header into a table.
///
/// The header gives the number of columns. Every other non-empty line must have as many cells,
/// each of them a number.
pub fn parse_csv(data: &str, delimiter: u8) -> FitResult<Table> {
    read_table(data.as_bytes(), delimiter)
}

pub fn read_csv<P: AsRef<Path>>(path: P, delimiter: u8) -> FitResult<Table> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_table(file, delimiter)?;
    debug!(
        "loaded {} rows x {} columns from {}",
        table.matrix.n_rows(),
        table.matrix.n_cols(),
        path.display()
    );
    Ok(table)
}

fn read_table<R: Read>(input: R, delimiter: u8) -> FitResult<Table> {
    // We check the number of cells ourselves so the error can tell which row is wrong
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let labels: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if labels.is_empty() {
        return Err(FitError::Empty);
    }
    let n_cols = labels.len();

    let mut values = Vec::new();
    let mut n_rows = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != n_cols {
            return Err(FitError::Ragged {
                row,
                expected: n_cols,
                got: record.len(),
            });
        }
        for (col, cell) in record.iter().enumerate() {
            let value = cell.parse::<f64>().map_err(|_| FitError::Parse {
                row,
                col,
                value: cell.to_string(),
            })?;
            values.push(value);
        }
        n_rows += 1;
    }

    Ok(Table {
        labels,
        matrix: RowMajorMatrix::from_flat(n_rows, n_cols, values),
    })
}

/// Features and target extracted from a matrix, used for the training.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainDataset {
    /// Every column but the target one, in the original order
    pub features: RowMajorMatrix<f64>,
    pub target: Vec<f64>,
    /// Original column of each feature
    pub feature_cols: Vec<usize>,
    pub target_col: usize,
}

impl TrainDataset {
    /// Split the matrix between the target column and the features.
    ///
    /// The target column is not part of the features: the i-th feature is the i-th column
    /// once the target has been removed.
    pub fn split(matrix: &RowMajorMatrix<f64>, target_col: usize) -> FitResult<TrainDataset> {
        let n_cols = matrix.n_cols();
        if n_cols < 2 {
            return Err(FitError::invalid(format!(
                "at least 2 columns are needed, got {}",
                n_cols
            )));
        }
        if target_col >= n_cols {
            return Err(FitError::invalid(format!(
                "target column {} is out of bounds for {} columns",
                target_col, n_cols
            )));
        }
        if matrix.n_rows() == 0 {
            return Err(FitError::invalid("no rows to fit on"));
        }

        let feature_cols: Vec<usize> = (0..n_cols).filter(|&col| col != target_col).collect();
        let mut target = Vec::with_capacity(matrix.n_rows());
        let mut values = Vec::with_capacity(matrix.n_rows() * feature_cols.len());
        for row in matrix.rows() {
            target.push(row[target_col]);
            values.extend(feature_cols.iter().map(|&col| row[col]));
        }

        Ok(TrainDataset {
            features: RowMajorMatrix::from_flat(matrix.n_rows(), feature_cols.len(), values),
            target,
            feature_cols,
            target_col,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.target.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.n_cols()
    }
}

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use lingrad::{
    feature_labels, read_csv, to_json, write_equation, GDParams, LinearModel, TrainDataset,
    VariableNames, DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_STEP,
};

/// Fit a linear model on a CSV file with gradient descent and print its equation.
#[derive(Debug, Parser)]
#[command(name = "lingrad", version)]
struct Cli {
    /// CSV file with a header row
    csv: PathBuf,

    /// Column to predict, starting at 1
    target_column: usize,

    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    /// Stop once every update is smaller than this
    #[arg(long, default_value_t = DEFAULT_MAX_STEP)]
    max_step: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Sum the gradients on all the cores
    #[arg(long)]
    parallel: bool,

    /// Name the variables after the header instead of x0, x1...
    #[arg(long)]
    labels: bool,

    /// Print the whole fit as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn params(&self) -> GDParams {
        GDParams {
            learning_rate: self.learning_rate,
            max_step: self.max_step,
            max_iterations: self.max_iterations,
            parallel: self.parallel,
        }
    }
}

/// Convert the 1-based target column of the command line to a matrix index.
fn target_index(target_column: usize, n_cols: usize) -> Result<usize> {
    if target_column == 0 {
        bail!("the target column starts at 1");
    }
    if target_column > n_cols {
        bail!(
            "target column {} is out of bounds for {} columns",
            target_column,
            n_cols
        );
    }
    Ok(target_column - 1)
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("the delimiter must be an ASCII character, got {:?}", delimiter);
    }
    Ok(delimiter as u8)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let table = read_csv(&cli.csv, delimiter_byte(cli.delimiter)?)
        .with_context(|| format!("cannot load {}", cli.csv.display()))?;
    let target_col = target_index(cli.target_column, table.matrix.n_cols())?;
    info!(
        "Fitting column {:?} against {} other columns",
        table.labels[target_col],
        table.labels.len() - 1
    );

    let train = TrainDataset::split(&table.matrix, target_col)?;
    let fit = LinearModel::build(&train, &cli.params())?;
    if !fit.is_reliable() {
        eprintln!("Operation reached the maximum iteration. The result might be bad.");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        writeln!(out, "{}", to_json(&fit)?)?;
    } else if cli.labels {
        let names = feature_labels(&fit, &table.labels);
        write_equation(&mut out, &fit.model, VariableNames::Labels(&names))?;
    } else {
        write_equation(&mut out, &fit.model, VariableNames::Indexed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_library() {
        let cli = Cli::try_parse_from(&["lingrad", "data.csv", "2"]).unwrap();
        assert_eq!(cli.params(), GDParams::default());
        assert_eq!(cli.delimiter, ',');
    }

    #[test]
    fn test_params_overrides() {
        let cli = Cli::try_parse_from(&[
            "lingrad",
            "data.csv",
            "1",
            "--learning-rate",
            "0.01",
            "--max-step",
            "1e-8",
            "--max-iterations",
            "50",
            "--parallel",
        ])
        .unwrap();
        let params = cli.params();
        assert_eq!(params.learning_rate, 0.01);
        assert_eq!(params.max_step, 1e-8);
        assert_eq!(params.max_iterations, 50);
        assert!(params.parallel);
    }

    #[test]
    fn test_target_index_is_one_based() {
        assert_eq!(target_index(1, 2).unwrap(), 0);
        assert_eq!(target_index(2, 2).unwrap(), 1);

        let err = target_index(0, 2).unwrap_err();
        assert!(err.to_string().contains("starts at 1"), "{}", err);

        // The error reports the column as typed on the command line
        let err = target_index(3, 2).unwrap_err();
        assert_eq!(err.to_string(), "target column 3 is out of bounds for 2 columns");
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(',').unwrap(), b',');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('é').is_err());
    }
}

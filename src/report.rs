use std::io::{self, Write};

use crate::{Fit, LinearModel};
use itertools::Itertools;

/// How the variables of the equation are named.
#[derive(Debug, Clone, Copy)]
pub enum VariableNames<'a> {
    /// `x` for a single variable, `x0`, `x1`... otherwise.
    Indexed,
    /// One label per slope.
    Labels(&'a [String]),
}

impl<'a> VariableNames<'a> {
    fn names(&self, n_slopes: usize) -> Vec<String> {
        match *self {
            VariableNames::Indexed if n_slopes == 1 => vec!["x".to_string()],
            VariableNames::Indexed => (0..n_slopes).map(|i| format!("x{}", i)).collect(),
            VariableNames::Labels(labels) => {
                assert_eq!(labels.len(), n_slopes, "one label is needed per slope");
                labels.to_vec()
            }
        }
    }
}

/// Render the model in algebra notation, eg `0.500000 + 2.000000x`.
pub fn equation(model: &LinearModel, names: VariableNames) -> String {
    let terms = model
        .slope
        .iter()
        .zip(names.names(model.slope.len()))
        .map(|(slope, name)| format!("{:.6}{}", slope, name));
    std::iter::once(format!("{:.6}", model.intercept))
        .chain(terms)
        .join(" + ")
}

/// Write the equation of the model followed by a new line.
pub fn write_equation(
    out: &mut impl Write,
    model: &LinearModel,
    names: VariableNames,
) -> io::Result<()> {
    writeln!(out, "{}", equation(model, names))
}

/// Labels of the columns the slopes of the fit were trained on.
pub fn feature_labels(fit: &Fit, labels: &[String]) -> Vec<String> {
    fit.feature_cols
        .iter()
        .map(|&col| labels[col].clone())
        .collect()
}

pub fn to_json(fit: &Fit) -> serde_json::Result<String> {
    serde_json::to_string_pretty(fit)
}

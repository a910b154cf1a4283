use std::time::Instant;

use crate::{
    dot, rmse, FitError, FitResult, Loss, RowMajorMatrix, SquaredResidual, TrainDataset,
    DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_STEP,
};
use log::{debug, info, warn};
use rayon::prelude::*;

/// Log the training loss every this number of iterations.
static LOG_EVERY: usize = 100_000;

/// Hyper-parameters of the gradient descent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GDParams {
    /// Scale of each step. The gradients are summed over the rows, not averaged, so it has to
    /// be smaller for a bigger dataset.
    pub learning_rate: f64,
    /// The descent stops once every update of the parameters is strictly smaller than it.
    pub max_step: f64,
    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
    /// Sum the gradients of the rows with Rayon.
    pub parallel: bool,
}

impl GDParams {
    pub fn new() -> Self {
        GDParams {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_step: DEFAULT_MAX_STEP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            parallel: false,
        }
    }

    pub fn validate(&self) -> FitResult<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.) {
            return Err(FitError::invalid(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        // NaN fails the comparison. An infinite max step is fine: we stop after one iteration.
        if !(self.max_step > 0.) {
            return Err(FitError::invalid(format!(
                "max step must be positive, got {}",
                self.max_step
            )));
        }
        if self.max_iterations == 0 {
            return Err(FitError::invalid("max iterations must be at least 1"));
        }
        Ok(())
    }

    /// Evaluate if the absolute step is below the maximum step.
    fn is_step_small(&self, step: f64) -> bool {
        step < self.max_step && step > -self.max_step
    }
}

impl Default for GDParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear model `intercept + slope . features`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub slope: Vec<f64>,
}

/// Result of a training.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Fit {
    pub model: LinearModel,
    /// Original column of each slope
    pub feature_cols: Vec<usize>,
    pub n_iterations: usize,
    /// False if the descent stopped because of `max_iterations`. The model is then the last
    /// one computed, and may be far from the optimum.
    pub converged: bool,
}

impl Fit {
    pub fn is_reliable(&self) -> bool {
        self.converged
    }
}

/// Sum over the rows of the partial derivatives of the loss.
struct Gradient {
    intercept: f64,
    slope: Vec<f64>,
}

impl Gradient {
    fn zeros(n_features: usize) -> Gradient {
        Gradient {
            intercept: 0.,
            slope: vec![0.; n_features],
        }
    }

    fn add_row(mut self, model: &LinearModel, loss: &impl Loss, row: &[f64], target: f64) -> Self {
        let outer = loss.outer_derivative(target, model.predict(row));

        // derivative with respect to the intercept is always 1
        self.intercept += loss.partial(outer, 1.);
        // derivative with respect to a slope is always its `x` variable
        for (sum, &x) in self.slope.iter_mut().zip(row) {
            *sum += loss.partial(outer, x);
        }
        self
    }

    fn merge(mut self, other: Gradient) -> Self {
        self.intercept += other.intercept;
        for (a, b) in self.slope.iter_mut().zip(other.slope) {
            *a += b;
        }
        self
    }
}

impl LinearModel {
    /// Initial model before the descent: the intercept is 0 and the i-th slope is `i + 1`.
    ///
    /// The seed is deterministic so two trainings on the same data give the same model, and
    /// non-zero so the first gradient is not degenerate.
    pub fn new(n_features: usize) -> Self {
        LinearModel {
            intercept: 0.,
            slope: (0..n_features).map(|i| (i + 1) as f64).collect(),
        }
    }

    pub fn n_features(&self) -> usize {
        self.slope.len()
    }

    pub fn predict(&self, features: &[f64]) -> f64 {
        self.intercept + dot(&self.slope, features)
    }

    pub fn predict_all(&self, features: &RowMajorMatrix<f64>) -> Vec<f64> {
        features.rows().map(|row| self.predict(row)).collect()
    }

    /// Sum of the squared residuals on the dataset.
    pub fn loss(&self, train: &TrainDataset) -> f64 {
        SquaredResidual::default().calc_loss(&train.target, &self.predict_all(&train.features))
    }

    /// Train a model with the squared residual loss.
    pub fn build(train: &TrainDataset, params: &GDParams) -> FitResult<Fit> {
        Self::build_with_loss(train, params, &SquaredResidual::default())
    }

    pub fn build_with_loss(
        train: &TrainDataset,
        params: &GDParams,
        loss: &impl Loss,
    ) -> FitResult<Fit> {
        params.validate()?;
        if train.features.n_rows() != train.target.len() {
            return Err(FitError::invalid(format!(
                "{} feature rows for {} targets",
                train.features.n_rows(),
                train.target.len()
            )));
        }
        if train.target.is_empty() {
            return Err(FitError::invalid("no rows to fit on"));
        }

        let mut model = LinearModel::new(train.n_features());
        let train_start_time = Instant::now();
        debug!(
            "Training on {} rows x {} features with {:?}",
            train.n_rows(),
            train.n_features(),
            params
        );

        let mut n_iterations = 0;
        let mut converged = false;
        while n_iterations < params.max_iterations {
            let grad = if params.parallel {
                model.par_gradient(train, loss)
            } else {
                model.gradient(train, loss)
            };
            n_iterations += 1;

            if model.descend(&grad, params) {
                converged = true;
                break;
            }
            if n_iterations % LOG_EVERY == 0 {
                debug!(
                    "Iter {}, loss {:.10}",
                    n_iterations,
                    loss.calc_loss(&train.target, &model.predict_all(&train.features))
                );
            }
        }

        if !converged {
            warn!(
                "Operation reached the maximum iteration ({}). The result might be bad.",
                params.max_iterations
            );
        }
        info!(
            "Training finished after {} iterations, RMSE {:.6}. Elapsed: {:.2} secs",
            n_iterations,
            rmse(&train.target, &model.predict_all(&train.features)),
            train_start_time.elapsed().as_secs_f64()
        );

        Ok(Fit {
            model,
            feature_cols: train.feature_cols.clone(),
            n_iterations,
            converged,
        })
    }

    fn gradient(&self, train: &TrainDataset, loss: &impl Loss) -> Gradient {
        train
            .features
            .rows()
            .zip(train.target.iter())
            .fold(Gradient::zeros(self.n_features()), |grad, (row, &y)| {
                grad.add_row(self, loss, row, y)
            })
    }

    /// Same as `gradient`, with the rows split between the Rayon threads. The summation order
    /// changes, so the result can differ by a rounding error.
    fn par_gradient(&self, train: &TrainDataset, loss: &impl Loss) -> Gradient {
        let n_features = self.n_features();
        train
            .features
            .par_rows()
            .zip(train.target.par_iter())
            .fold(
                || Gradient::zeros(n_features),
                |grad, (row, &y)| grad.add_row(self, loss, row, y),
            )
            .reduce(|| Gradient::zeros(n_features), Gradient::merge)
    }

    /// Update the intercept and slope, and check if all steps are small.
    fn descend(&mut self, grad: &Gradient, params: &GDParams) -> bool {
        let step = grad.intercept * params.learning_rate;
        self.intercept -= step;
        let mut is_step_small = params.is_step_small(step);

        for (slope, &sum) in self.slope.iter_mut().zip(grad.slope.iter()) {
            let step = sum * params.learning_rate;
            *slope -= step;
            is_step_small &= params.is_step_small(step);
        }
        is_step_small
    }
}

/// Split the matrix on `target_col` and train a model on it.
pub fn fit(matrix: &RowMajorMatrix<f64>, target_col: usize, params: &GDParams) -> FitResult<Fit> {
    let train = TrainDataset::split(matrix, target_col)?;
    LinearModel::build(&train, params)
}

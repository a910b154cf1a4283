use crate::sum;

/// General interface for a loss on the residual `target - prediction`.
pub trait Loss: std::marker::Sync {
    /// First term of the chain rule: derivative of the loss with respect to the residual.
    fn outer_derivative(&self, target: f64, prediction: f64) -> f64;

    /// Partial derivative of the loss with respect to a parameter whose factor in the
    /// prediction is `respect_to`: `1` for the intercept, the feature value for a slope.
    ///
    /// The residual is `y - (a*x + b)`, so its derivative with respect to the parameter is
    /// `-respect_to`.
    fn partial(&self, outer: f64, respect_to: f64) -> f64 {
        outer * -respect_to
    }

    fn calc_loss(&self, target: &[f64], predictions: &[f64]) -> f64;
}

/// Squared residual `(y - y_pred)^2`, ie the usual loss for a regression.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SquaredResidual {
    // Nothing inside
}

impl Default for SquaredResidual {
    fn default() -> Self {
        SquaredResidual {}
    }
}

impl Loss for SquaredResidual {
    fn outer_derivative(&self, target: f64, prediction: f64) -> f64 {
        2. * (target - prediction)
    }

    fn calc_loss(&self, target: &[f64], predictions: &[f64]) -> f64 {
        let mut errors = Vec::with_capacity(target.len());
        for (n_row, &target) in target.iter().enumerate() {
            let diff = target - predictions[n_row];
            errors.push(diff.powi(2));
        }
        sum(&errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_close {
        ($a : expr, $b: expr, $delta: expr) => {{
            let (a, b, delta) = ($a, $b, $delta);
            assert!(
                (a - b).abs() <= delta,
                "Difference = {:.6} > {:.6} too important between {:.6} and {:.6}",
                a - b,
                delta,
                a,
                b
            );
        }};
    }

    #[test]
    fn test_squared_residual_loss() {
        let loss = SquaredResidual::default();
        let target = vec![0.1, 0.4, 1.3, 0.2];
        let predictions = vec![0.1, 0.4, 1.0, 0.0];
        assert_close!(loss.calc_loss(&target, &predictions), 0.09 + 0.04, 1e-12);
    }

    #[test]
    fn test_partials_match_finite_differences() {
        // One row, prediction = intercept + slope * x
        let loss = SquaredResidual::default();
        let (target, x) = (1.3, 0.7);
        let (intercept, slope) = (0.2, 0.5);
        let eps = 1e-6;
        let loss_at = |intercept: f64, slope: f64| {
            loss.calc_loss(&[target], &[intercept + slope * x])
        };

        let outer = loss.outer_derivative(target, intercept + slope * x);

        // f'(x) = (f(x+eps) - f(x-eps)) / (2*eps)
        let d_intercept =
            (loss_at(intercept + eps, slope) - loss_at(intercept - eps, slope)) / (2. * eps);
        assert_close!(loss.partial(outer, 1.), d_intercept, 1e-6);

        let d_slope =
            (loss_at(intercept, slope + eps) - loss_at(intercept, slope - eps)) / (2. * eps);
        assert_close!(loss.partial(outer, x), d_slope, 1e-6);
    }

    #[test]
    fn test_outer_derivative_sign() {
        let loss = SquaredResidual::default();
        // Under-prediction pulls the parameters up, hence a negative partial
        assert_close!(loss.outer_derivative(2., 1.), 2., 1e-12);
        assert!(loss.partial(loss.outer_derivative(2., 1.), 1.) < 0.);
        assert_close!(loss.outer_derivative(1., 1.), 0., 1e-12);
    }
}

pub fn sum(v: &[f64]) -> f64 {
    let mut o = 0.;
    for e in v.iter() {
        o += *e;
    }
    o
}

/// Both slices must have the same length.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&a, &b)| a * b).sum()
}

pub fn rmse(target: &[f64], yhat: &[f64]) -> f64 {
    let rmse: f64 = yhat
        .iter()
        .zip(target.iter())
        .map(|(&a, &b)| (a - b).powi(2))
        .sum();
    (rmse / target.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use crate::*;

    macro_rules! assert_almost_eq {
        ($a : expr, $b:expr) => {
            let (a, b) = ($a, $b);
            let eps = 1e-5;
            let diff = (a - b).abs();
            if diff > eps {
                panic!("{} != {} at +-{}", a, b, eps)
            }
        };
    }

    #[test]
    fn test_sum() {
        assert_almost_eq!(sum(&[1., 2., 3.5]), 6.5);
        assert_almost_eq!(sum(&[]), 0.);
    }

    #[test]
    fn test_dot() {
        assert_almost_eq!(dot(&[1., 2., 3.], &[4., -5., 6.]), 12.);
        assert_almost_eq!(dot(&[], &[]), 0.);
    }

    #[test]
    fn test_rmse() {
        assert_almost_eq!(rmse(&[1., 2., 3.], &[1., 2., 3.]), 0.);
        assert_almost_eq!(rmse(&[0., 0.], &[3., 4.]), (12.5f64).sqrt());
    }
}

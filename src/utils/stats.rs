//! Scalar statistics helpers.

use faer::Col;

/// Arithmetic mean of a vector.
pub fn mean(values: &Col<f64>) -> f64 {
    values.iter().sum::<f64>() / values.nrows() as f64
}

/// Sample standard deviation (n - 1 denominator).
///
/// Returns NaN for vectors with fewer than two elements.
pub fn sample_std_dev(values: &Col<f64>) -> f64 {
    let n = values.nrows();
    if n < 2 {
        return f64::NAN;
    }

    let m = mean(values);
    let ss: f64 = values.iter().map(|&v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        let v = Col::from_fn(4, |i| (i + 1) as f64);
        assert!((mean(&v) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_dev_known_value() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, sample variance 32/7
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let v = Col::from_fn(8, |i| data[i]);

        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((sample_std_dev(&v) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_dev_needs_two_elements() {
        let v = Col::from_fn(1, |_| 3.0);
        assert!(sample_std_dev(&v).is_nan());
    }

    #[test]
    fn test_sample_std_dev_constant_vector_is_zero() {
        let v = Col::from_fn(5, |_| 2.0);
        assert!(sample_std_dev(&v).abs() < 1e-15);
    }
}

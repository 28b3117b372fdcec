use super::stable_sum_iter;
use crate::domain::MotionError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrationError {
    #[error("integration requires at least 2 points, got {actual}")]
    InsufficientPoints { actual: usize },
    #[error("integration input length mismatch: x={x}, y={y}")]
    LengthMismatch { x: usize, y: usize },
    #[error(
        "integration abscissa must be strictly increasing, index {index} has {current} after {previous}"
    )]
    NonIncreasingAbscissa {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("simpson integration requires a positive even interval count, got {intervals}")]
    InvalidIntervalCount { intervals: usize },
    #[error("integration bounds must be finite with lower < upper, got [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },
}

impl From<IntegrationError> for MotionError {
    fn from(error: IntegrationError) -> Self {
        MotionError::computation("COMPUTE.INTEGRATION", error.to_string())
    }
}

/// Trapezoidal rule on a non-uniform abscissa.
///
/// Each panel is weighted by its own width, so log-spaced grids integrate
/// correctly without resampling.
pub fn integrate_trapezoid(x: &[f64], y: &[f64]) -> Result<f64, IntegrationError> {
    if x.len() != y.len() {
        return Err(IntegrationError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(IntegrationError::InsufficientPoints { actual: x.len() });
    }

    for index in 1..x.len() {
        if x[index] <= x[index - 1] {
            return Err(IntegrationError::NonIncreasingAbscissa {
                index,
                previous: x[index - 1],
                current: x[index],
            });
        }
    }

    let panels = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]));

    Ok(stable_sum_iter(panels))
}

/// Composite Simpson rule for a closure on `[lower, upper]`.
pub fn integrate_simpson<F>(
    integrand: F,
    lower: f64,
    upper: f64,
    intervals: usize,
) -> Result<f64, IntegrationError>
where
    F: Fn(f64) -> f64,
{
    if intervals == 0 || intervals % 2 != 0 {
        return Err(IntegrationError::InvalidIntervalCount { intervals });
    }
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(IntegrationError::InvalidBounds { lower, upper });
    }

    let step = (upper - lower) / intervals as f64;
    let interior = (1..intervals).map(|index| {
        let weight = if index % 2 == 1 { 4.0 } else { 2.0 };
        weight * integrand(lower + step * index as f64)
    });
    let sum = integrand(lower) + integrand(upper) + stable_sum_iter(interior);

    Ok(sum * step / 3.0)
}

#[cfg(test)]
mod tests {
    use super::{IntegrationError, integrate_simpson, integrate_trapezoid};
    use crate::numerics::log_grid;

    #[test]
    fn trapezoid_is_exact_for_linear_functions_on_uneven_grids() {
        let x = [0.0, 0.1, 0.5, 2.0, 2.2];
        let y: Vec<f64> = x.iter().map(|value| 3.0 * value + 1.0).collect();
        let integral = integrate_trapezoid(&x, &y).expect("integral");
        let expected = 1.5 * 2.2 * 2.2 + 2.2;
        assert!((integral - expected).abs() < 1.0e-12);
    }

    #[test]
    fn trapezoid_converges_on_log_spaced_grids() {
        let x = log_grid(0.01, 100.0, 2048).expect("grid");
        let y: Vec<f64> = x.iter().map(|value| 1.0 / value).collect();
        let integral = integrate_trapezoid(&x, &y).expect("integral");
        let expected = (100.0f64 / 0.01).ln();
        assert!((integral - expected).abs() / expected < 1.0e-5);
    }

    #[test]
    fn trapezoid_rejects_invalid_shapes() {
        assert_eq!(
            integrate_trapezoid(&[0.0], &[1.0]),
            Err(IntegrationError::InsufficientPoints { actual: 1 })
        );
        assert_eq!(
            integrate_trapezoid(&[0.0, 1.0], &[1.0]),
            Err(IntegrationError::LengthMismatch { x: 2, y: 1 })
        );
        assert!(matches!(
            integrate_trapezoid(&[0.0, 1.0, 1.0], &[1.0, 1.0, 1.0]),
            Err(IntegrationError::NonIncreasingAbscissa { index: 2, .. })
        ));
    }

    #[test]
    fn simpson_integrates_gaussian_tail() {
        let integral =
            integrate_simpson(|z| (-z * z).exp(), 0.0, 10.0, 2000).expect("integral");
        let expected = std::f64::consts::PI.sqrt() / 2.0;
        assert!((integral - expected).abs() < 1.0e-10);
    }

    #[test]
    fn simpson_rejects_odd_interval_counts_and_bad_bounds() {
        assert_eq!(
            integrate_simpson(|z| z, 0.0, 1.0, 3),
            Err(IntegrationError::InvalidIntervalCount { intervals: 3 })
        );
        assert!(matches!(
            integrate_simpson(|z| z, 1.0, 1.0, 2),
            Err(IntegrationError::InvalidBounds { .. })
        ));
    }
}

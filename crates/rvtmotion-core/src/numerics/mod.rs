pub mod integration;

pub use integration::{IntegrationError, integrate_simpson, integrate_trapezoid};

fn kahan_add(sum: &mut f64, correction: &mut f64, value: f64) {
    let corrected = value - *correction;
    let next = *sum + corrected;
    *correction = (next - *sum) - corrected;
    *sum = next;
}

pub(crate) fn stable_sum_iter(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut correction = 0.0;

    for value in values {
        kahan_add(&mut sum, &mut correction, value);
    }

    sum
}

pub fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|window| window[0] < window[1])
}

pub fn linear_grid(start: f64, end: f64, count: usize) -> Option<Vec<f64>> {
    if count < 2 {
        return None;
    }

    let step = (end - start) / ((count - 1) as f64);
    let mut grid = Vec::with_capacity(count);
    for index in 0..count {
        grid.push(start + step * (index as f64));
    }

    if let Some(last) = grid.last_mut() {
        *last = end;
    }

    Some(grid)
}

/// Geometric grid from `start` to `end`; both bounds must be positive.
pub fn log_grid(start: f64, end: f64, count: usize) -> Option<Vec<f64>> {
    if start <= 0.0 || end <= 0.0 {
        return None;
    }

    let exponents = linear_grid(start.log10(), end.log10(), count)?;
    let mut grid: Vec<f64> = exponents
        .into_iter()
        .map(|exponent| 10f64.powf(exponent))
        .collect();

    grid[0] = start;
    if let Some(last) = grid.last_mut() {
        *last = end;
    }

    Some(grid)
}

fn bracket(x: f64, x_grid: &[f64]) -> Option<usize> {
    x_grid
        .windows(2)
        .position(|window| x <= window[1])
        .map(|index| index + 1)
}

/// Linear interpolation in log(x)-log(y) space with boundary-value hold.
///
/// Both grids must be strictly positive. A single-point grid returns its only
/// ordinate for every `x`.
pub fn interpolate_log_log(x: f64, x_grid: &[f64], y_grid: &[f64]) -> Option<f64> {
    if x_grid.is_empty() || x_grid.len() != y_grid.len() {
        return None;
    }

    if x_grid.iter().chain(y_grid).any(|value| *value <= 0.0) {
        return None;
    }

    if !is_strictly_increasing(x_grid) {
        return None;
    }

    if x.is_nan() {
        return None;
    }

    if x <= x_grid[0] {
        return Some(y_grid[0]);
    }

    let last_index = x_grid.len() - 1;
    if x >= x_grid[last_index] {
        return Some(y_grid[last_index]);
    }

    let upper = bracket(x, x_grid)?;
    let lower = upper - 1;
    let (lx0, lx1) = (x_grid[lower].ln(), x_grid[upper].ln());
    let (ly0, ly1) = (y_grid[lower].ln(), y_grid[upper].ln());
    let interpolation = (x.ln() - lx0) / (lx1 - lx0);

    Some((ly0 + interpolation * (ly1 - ly0)).exp())
}

pub fn relative_difference(lhs: f64, rhs: f64, relative_floor: f64) -> f64 {
    let scale = lhs.abs().max(rhs.abs()).max(relative_floor);
    (lhs - rhs).abs() / scale
}

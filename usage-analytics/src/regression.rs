//! Ordinary least squares on `(x, y)` pairs.

use energy_model::RegressionFit;

/// Fits `y = slope * x + intercept`.
///
/// Returns `None` for an empty sample. When every `x` is the same the slope is
/// zero and the line passes through the mean of `y`. `r_squared` is `None`
/// when `y` has no variance.
///
/// - Time: `O(n)`
pub fn linear_fit(points: &[(f64, f64)]) -> Option<RegressionFit> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let x_bar = points.iter().map(|p| p.0).sum::<f64>() / n;
    let y_bar = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in points {
        sxx += (x - x_bar).powi(2);
        sxy += (x - x_bar) * (y - y_bar);
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_bar - slope * x_bar;

    Some(RegressionFit {
        slope,
        intercept,
        r_squared: r_squared(points, slope, intercept),
    })
}

/// Coefficient of determination of a line against the data it was fitted to.
pub fn r_squared(points: &[(f64, f64)], slope: f64, intercept: f64) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let y_bar = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for &(x, y) in points {
        ss_res += (y - (slope * x + intercept)).powi(2);
        ss_tot += (y - y_bar).powi(2);
    }

    if ss_tot > 0.0 {
        Some(1.0 - ss_res / ss_tot)
    } else {
        None
    }
}

// Ordinary least-squares trend line for scatter-plot overlays
// (e.g. spin rate vs. release speed).

use serde::Serialize;

/// Threshold below which the OLS denominator is treated as zero.
const DENOM_EPSILON: f64 = 1e-9;

/// Fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Evaluate the line at `x`, for computing overlay endpoints.
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Closed-form OLS regression over two equal-length series.
///
/// Returns `None` for degenerate inputs: mismatched lengths, fewer than two
/// points, or zero variance in `xs` (vertical line). Total, never NaN.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<TrendLine> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() < DENOM_EPSILON {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Some(TrendLine { slope, intercept })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

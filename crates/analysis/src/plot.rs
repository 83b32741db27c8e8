//! Sampling helpers for drawing `f(x)` next to the roots an analysis found.
//!
//! [`plot_window`] picks axis ranges around the roots, [`sample`] tabulates
//! the function, and [`sample_curve`] adds a retry over fixed ranges for
//! functions that are undefined on most of the chosen window.

use rootscope_core::Expression;

use crate::AnalysisResult;

/// Samples with `|y|` at or above this are dropped.
pub const VALUE_LIMIT: f64 = 1e10;

/// Number of intervals [`sample_curve`] divides a range into.
pub const CURVE_INTERVALS: usize = 400;

const WINDOW_SAMPLES: usize = 100;
const MIN_ROOT_SPAN: f64 = 4.0;
const Y_MARGIN: f64 = 0.15;

/// Below this many points the window is considered unusable.
const SPARSE_POINTS: usize = 20;

/// An alternative range is accepted once it yields this many points.
const ACCEPTED_POINTS: usize = 50;

const ALTERNATIVE_RANGES: [(f64, f64); 7] = [
    (-5.0, 5.0),
    (-20.0, 20.0),
    (-2.0, 2.0),
    (-50.0, 50.0),
    (-1.0, 1.0),
    (0.0, 10.0),
    (-100.0, 100.0),
];

/// Axis ranges of a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Window {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Window {
    /// Used whenever no sensible window can be computed.
    pub const FALLBACK: Window = Window {
        x_min: -12.0,
        x_max: 12.0,
        y_min: -6.0,
        y_max: 6.0,
    };

    fn is_finite(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// A sampled point of the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Chooses axis ranges for plotting `expression` alongside `result`.
///
/// The x range spans the finite roots of every successful method, widened to
/// at least 4 units and padded by half that span on each side, or `[-10, 10]`
/// without roots. The y range covers 100 samples over the x range plus 15 %,
/// reaches out to ±1 when it ends just short of zero, and is rounded outward
/// to whole numbers.
#[must_use]
pub fn plot_window(expression: &Expression, result: &AnalysisResult) -> Window {
    let roots: Vec<f64> = result.successes().filter_map(|r| r.root).collect();

    let (x_min, x_max) = if roots.is_empty() {
        (-10.0, 10.0)
    } else {
        let lo = roots.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = roots.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = (hi - lo).abs().max(MIN_ROOT_SPAN);
        (lo - 0.5 * span, hi + 0.5 * span)
    };

    let ys: Vec<f64> = sample(expression, x_min, x_max, WINDOW_SAMPLES)
        .into_iter()
        .map(|p| p.y)
        .collect();

    let (y_min, y_max) = if ys.is_empty() {
        (-6.0, 6.0)
    } else {
        let lo = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let margin = (hi - lo) * Y_MARGIN;

        let mut y_min = lo - margin;
        let mut y_max = hi + margin;
        if y_min > -1.0 && y_min < 0.0 {
            y_min = -1.0;
        }
        if y_max > 0.0 && y_max < 1.0 {
            y_max = 1.0;
        }
        (y_min, y_max)
    };

    let window = Window {
        x_min: x_min.floor(),
        x_max: x_max.ceil(),
        y_min: y_min.floor(),
        y_max: y_max.ceil(),
    };

    if window.is_finite() {
        window
    } else {
        Window::FALLBACK
    }
}

/// Evaluates `expression` at `intervals + 1` evenly spaced points.
///
/// Points where the value is not finite or `|y| >= 1e10` are skipped.
#[must_use]
pub fn sample(expression: &Expression, x_min: f64, x_max: f64, intervals: usize) -> Vec<Point> {
    let step = (x_max - x_min) / intervals as f64;

    (0..=intervals)
        .filter_map(|i| {
            let x = x_min + i as f64 * step;
            let y = expression.eval(x);
            (y.is_finite() && y.abs() < VALUE_LIMIT).then_some(Point { x, y })
        })
        .collect()
}

/// Samples the curve over the window's x range for display.
///
/// When fewer than 20 points survive, a fixed list of alternative ranges is
/// tried in order and the first yielding at least 50 points wins. If none
/// does, the sparse window samples are returned.
#[must_use]
pub fn sample_curve(expression: &Expression, window: &Window) -> Vec<Point> {
    let points = sample(expression, window.x_min, window.x_max, CURVE_INTERVALS);
    if points.len() >= SPARSE_POINTS {
        return points;
    }

    ALTERNATIVE_RANGES
        .iter()
        .map(|&(lo, hi)| sample(expression, lo, hi, CURVE_INTERVALS))
        .find(|alt| alt.len() >= ACCEPTED_POINTS)
        .unwrap_or(points)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use approx::assert_relative_eq;

    use super::*;
    use crate::{Method, MethodResult};

    fn with_roots(roots: &[(Method, f64)]) -> AnalysisResult {
        let outcomes: BTreeMap<_, _> = roots
            .iter()
            .map(|&(method, root)| {
                let result = MethodResult {
                    method,
                    root: Some(root),
                    iterations: Vec::new(),
                    converged: false,
                };
                (method, Ok(result))
            })
            .collect();
        AnalysisResult::new(outcomes)
    }

    #[test]
    fn centers_on_roots() {
        let f = Expression::parse("x^2 - 4").unwrap();
        let result = with_roots(&[(Method::Bisection, 2.0)]);

        let window = plot_window(&f, &result);

        // x in [0, 4], f spans [-4, 12], padded by 2.4.
        assert_eq!(
            window,
            Window {
                x_min: 0.0,
                x_max: 4.0,
                y_min: -7.0,
                y_max: 15.0,
            }
        );
    }

    #[test]
    fn wide_root_spread_sets_span() {
        let f = Expression::parse("x").unwrap();
        let result = with_roots(&[(Method::Bisection, -3.0), (Method::Secant, 7.0)]);

        let window = plot_window(&f, &result);

        assert_relative_eq!(window.x_min, -8.0);
        assert_relative_eq!(window.x_max, 12.0);
    }

    #[test]
    fn defaults_without_roots() {
        let f = Expression::parse("0.5").unwrap();

        let window = plot_window(&f, &AnalysisResult::default());

        assert_relative_eq!(window.x_min, -10.0);
        assert_relative_eq!(window.x_max, 10.0);
        // A flat 0.5 gets pulled up to 1 and floored down to 0.
        assert_relative_eq!(window.y_min, 0.0);
        assert_relative_eq!(window.y_max, 1.0);
    }

    #[test]
    fn undefined_everywhere_keeps_default_y() {
        let f = Expression::parse("sqrt(-1 - x^2)").unwrap();

        let window = plot_window(&f, &AnalysisResult::default());

        assert_relative_eq!(window.y_min, -6.0);
        assert_relative_eq!(window.y_max, 6.0);
    }

    #[test]
    fn sample_skips_invalid_points() {
        let f = Expression::parse("log(x)").unwrap();

        let points = sample(&f, -1.0, 1.0, 4);

        // x = -1, -0.5 are NaN and x = 0 is -inf.
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0].x, 0.5);
        assert_relative_eq!(points[1].y, 0.0);
    }

    #[test]
    fn sample_drops_huge_values() {
        let f = Expression::parse("exp(x)").unwrap();

        let points = sample(&f, 0.0, 40.0, 4);

        // exp(30) and exp(40) exceed the limit.
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn curve_uses_window_when_dense() {
        let f = Expression::parse("sin(x)").unwrap();

        let points = sample_curve(&f, &Window::FALLBACK);

        assert_eq!(points.len(), CURVE_INTERVALS + 1);
        assert_relative_eq!(points[0].x, -12.0);
    }

    #[test]
    fn curve_falls_back_to_alternative_range() {
        let f = Expression::parse("sqrt(x)").unwrap();
        let window = Window {
            x_min: -100.0,
            x_max: -50.0,
            y_min: -1.0,
            y_max: 1.0,
        };

        let points = sample_curve(&f, &window);

        // The first alternative, [-5, 5], is defined on its right half.
        assert!(points.len() >= ACCEPTED_POINTS);
        assert!(points.iter().all(|p| (-5.0..=5.0).contains(&p.x)));
    }

    #[test]
    fn curve_returns_sparse_samples_when_nothing_helps() {
        let f = Expression::parse("sqrt(-1 - x^2)").unwrap();

        assert!(sample_curve(&f, &Window::FALLBACK).is_empty());
    }
}

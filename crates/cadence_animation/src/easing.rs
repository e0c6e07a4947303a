//! Interpolators for reshaping normalized time
//!
//! An interpolator maps `[0, 1]` onto `[0, 1]` (back curves may overshoot
//! slightly). The choreographer runs normalized time offsets through one
//! before converting them back to delays, and tweens run their progress
//! through one every frame.

use std::fmt;
use std::sync::Arc;

/// Interpolation curve
#[derive(Clone, Default)]
pub enum Easing {
    /// Identity mapping
    #[default]
    Linear,
    /// CSS-style cubic bezier with implicit end points `(0,0)` and `(1,1)`
    CubicBezier(f64, f64, f64, f64),
    /// Any host supplied pure function
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Easing {
    pub const EASE: Easing = Easing::CubicBezier(0.250, 0.100, 0.250, 1.000);
    pub const EASE_IN: Easing = Easing::CubicBezier(0.420, 0.000, 1.000, 1.000);
    pub const EASE_OUT: Easing = Easing::CubicBezier(0.000, 0.000, 0.580, 1.000);
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier(0.420, 0.000, 0.580, 1.000);

    // Penner equations, approximated as cubic beziers

    pub const EASE_IN_QUAD: Easing = Easing::CubicBezier(0.550, 0.085, 0.680, 0.530);
    pub const EASE_IN_CUBIC: Easing = Easing::CubicBezier(0.550, 0.055, 0.675, 0.190);
    pub const EASE_IN_QUART: Easing = Easing::CubicBezier(0.895, 0.030, 0.685, 0.220);
    pub const EASE_IN_QUINT: Easing = Easing::CubicBezier(0.755, 0.050, 0.855, 0.060);
    pub const EASE_IN_SINE: Easing = Easing::CubicBezier(0.470, 0.000, 0.745, 0.715);
    pub const EASE_IN_EXPO: Easing = Easing::CubicBezier(0.950, 0.050, 0.795, 0.035);
    pub const EASE_IN_CIRC: Easing = Easing::CubicBezier(0.600, 0.040, 0.980, 0.335);
    pub const EASE_IN_BACK: Easing = Easing::CubicBezier(0.600, -0.280, 0.735, 0.045);

    pub const EASE_OUT_QUAD: Easing = Easing::CubicBezier(0.250, 0.460, 0.450, 0.940);
    pub const EASE_OUT_CUBIC: Easing = Easing::CubicBezier(0.215, 0.610, 0.355, 1.000);
    pub const EASE_OUT_QUART: Easing = Easing::CubicBezier(0.165, 0.840, 0.440, 1.000);
    pub const EASE_OUT_QUINT: Easing = Easing::CubicBezier(0.230, 1.000, 0.320, 1.000);
    pub const EASE_OUT_SINE: Easing = Easing::CubicBezier(0.390, 0.575, 0.565, 1.000);
    pub const EASE_OUT_EXPO: Easing = Easing::CubicBezier(0.190, 1.000, 0.220, 1.000);
    pub const EASE_OUT_CIRC: Easing = Easing::CubicBezier(0.075, 0.820, 0.165, 1.000);
    pub const EASE_OUT_BACK: Easing = Easing::CubicBezier(0.175, 0.885, 0.320, 1.275);

    pub const EASE_IN_OUT_QUAD: Easing = Easing::CubicBezier(0.455, 0.030, 0.515, 0.955);
    pub const EASE_IN_OUT_CUBIC: Easing = Easing::CubicBezier(0.645, 0.045, 0.355, 1.000);
    pub const EASE_IN_OUT_QUART: Easing = Easing::CubicBezier(0.770, 0.000, 0.175, 1.000);
    pub const EASE_IN_OUT_QUINT: Easing = Easing::CubicBezier(0.860, 0.000, 0.070, 1.000);
    pub const EASE_IN_OUT_SINE: Easing = Easing::CubicBezier(0.445, 0.050, 0.550, 0.950);
    pub const EASE_IN_OUT_EXPO: Easing = Easing::CubicBezier(1.000, 0.000, 0.000, 1.000);
    pub const EASE_IN_OUT_CIRC: Easing = Easing::CubicBezier(0.785, 0.135, 0.150, 0.860);
    pub const EASE_IN_OUT_BACK: Easing = Easing::CubicBezier(0.680, -0.550, 0.265, 1.550);

    /// Wrap a host function as an interpolator
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Easing::Custom(Arc::new(f))
    }

    /// Apply the curve to a progress value in `[0, 1]`
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            Easing::Custom(f) => f(t),
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Easing::Linear)
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "Linear"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({x1}, {y1}, {x2}, {y2})")
            }
            Easing::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Solve `bezier_x(p) == t` for `p`, then sample `bezier_y(p)`.
///
/// Newton-Raphson first, bisection when the slope flattens out.
fn cubic_bezier(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    const EPSILON: f64 = 1e-7;

    let mut p = t;
    for _ in 0..8 {
        let err = sample(p, x1, x2) - t;
        if err.abs() < EPSILON {
            return sample(p, y1, y2);
        }
        let dx = slope(p, x1, x2);
        if dx.abs() < EPSILON {
            break;
        }
        p -= err / dx;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = t;
    for _ in 0..32 {
        let x = sample(p, x1, x2);
        if (x - t).abs() < EPSILON {
            break;
        }
        if x < t {
            lo = p;
        } else {
            hi = p;
        }
        p = 0.5 * (lo + hi);
    }

    sample(p, y1, y2)
}

/// B(p) = 3(1-p)²p·c1 + 3(1-p)p²·c2 + p³, in Horner form
#[inline]
fn sample(p: f64, c1: f64, c2: f64) -> f64 {
    let a = 1.0 - 3.0 * c2 + 3.0 * c1;
    let b = 3.0 * c2 - 6.0 * c1;
    let c = 3.0 * c1;
    ((a * p + b) * p + c) * p
}

#[inline]
fn slope(p: f64, c1: f64, c2: f64) -> f64 {
    let a = 1.0 - 3.0 * c2 + 3.0 * c1;
    let b = 3.0 * c2 - 6.0 * c1;
    let c = 3.0 * c1;
    (3.0 * a * p + 2.0 * b) * p + c
}

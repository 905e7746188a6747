//! Easing curves for tweens

use serde::{Deserialize, Serialize};

/// Easing curve applied to tween progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve, cubic-bezier(0.4, 0.0, 0.2, 1.0)
    #[default]
    FastOutSlowIn,
    /// Material deceleration curve, cubic-bezier(0.0, 0.0, 0.2, 1.0)
    LinearOutSlowIn,
    /// Material acceleration curve, cubic-bezier(0.4, 0.0, 1.0, 1.0)
    FastOutLinearIn,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress (0.0 to 1.0) to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::FastOutSlowIn => CubicCurve::new(0.4, 0.0, 0.2, 1.0).solve(t),
            Easing::LinearOutSlowIn => CubicCurve::new(0.0, 0.0, 0.2, 1.0).solve(t),
            Easing::FastOutLinearIn => CubicCurve::new(0.4, 0.0, 1.0, 1.0).solve(t),
            Easing::CubicBezier(x1, y1, x2, y2) => CubicCurve::new(x1, y1, x2, y2).solve(t),
        }
    }
}

/// Unit cubic bezier through (0,0) and (1,1) with two control points
struct CubicCurve {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicCurve {
    const EPSILON: f64 = 1e-6;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1 as f64,
            y1: y1 as f64,
            x2: x2 as f64,
            y2: y2 as f64,
        }
    }

    /// Coordinate along one axis at curve parameter `s`
    fn sample(s: f64, c1: f64, c2: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * c1 + 3.0 * inv * s * s * c2 + s * s * s
    }

    fn derivative(s: f64, c1: f64, c2: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * c1 + 6.0 * inv * s * (c2 - c1) + 3.0 * s * s * (1.0 - c2)
    }

    /// Find the curve parameter whose x equals `x`, then return its y
    fn solve(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let x = x as f64;

        // Newton steps converge quickly away from flat regions
        let mut s = x;
        for _ in 0..8 {
            let error = Self::sample(s, self.x1, self.x2) - x;
            if error.abs() < Self::EPSILON {
                return Self::sample(s, self.y1, self.y2) as f32;
            }
            let slope = Self::derivative(s, self.x1, self.x2);
            if slope.abs() < Self::EPSILON {
                break;
            }
            s = (s - error / slope).clamp(0.0, 1.0);
        }

        // Bisection always converges since x(s) is monotonic on [0, 1]
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = x;
        for _ in 0..32 {
            let value = Self::sample(s, self.x1, self.x2);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }

        Self::sample(s, self.y1, self.y2) as f32
    }
}

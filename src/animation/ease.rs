/// Time curves used by proxies, section fades and smooth scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    /// Slow-fast-slow; the default curve for proxy motion.
    #[default]
    InOutCubic,
    /// The CSS `ease` keyword, `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Css,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Css => CubicBezier::CSS_EASE.solve(t),
        }
    }
}

/// Unit cubic bezier with fixed endpoints (0,0) and (1,1).
#[derive(Clone, Copy, Debug)]
struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    const CSS_EASE: Self = Self {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    fn coord(p1: f64, p2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    fn coord_derivative(p1: f64, p2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    }

    /// Maps progress `x` to eased output by inverting the x polynomial.
    fn solve(self, x: f64) -> f64 {
        if x <= 0.0 || x >= 1.0 {
            return x;
        }

        let mut s = x;
        for _ in 0..8 {
            let err = Self::coord(self.x1, self.x2, s) - x;
            if err.abs() < 1e-7 {
                return Self::coord(self.y1, self.y2, s);
            }
            let d = Self::coord_derivative(self.x1, self.x2, s);
            if d.abs() < 1e-6 {
                break;
            }
            s -= err / d;
        }

        // Newton stalled; fall back to bisection on [0, 1].
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..48 {
            let v = Self::coord(self.x1, self.x2, s);
            if (v - x).abs() < 1e-7 {
                break;
            }
            if v < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        Self::coord(self.y1, self.y2, s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

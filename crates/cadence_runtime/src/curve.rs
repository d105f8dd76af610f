//! Easing curves

use cadence_timeline::Transition;

/// Seconds used for [`Transition::Default`], where the step leaves timing to the host
pub const DEFAULT_ANIMATION_SECS: f64 = 0.35;

/// An easing curve mapping progress `0.0..=1.0` onto eased progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    Linear,
    /// `t^n`
    PowIn(i32),
    /// `1 - (1 - t)^n`
    PowOut(i32),
    /// `PowIn` for the first half, `PowOut` for the second
    PowInOut(i32),
    /// CSS `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Curve {
    /// CSS `ease`
    pub const EASE: Curve = Curve::CubicBezier(0.25, 0.1, 0.25, 1.0);
    /// CSS `ease-in`
    pub const EASE_IN: Curve = Curve::CubicBezier(0.42, 0.0, 1.0, 1.0);
    /// CSS `ease-out`
    pub const EASE_OUT: Curve = Curve::CubicBezier(0.0, 0.0, 0.58, 1.0);
    /// CSS `ease-in-out`
    pub const EASE_IN_OUT: Curve = Curve::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// Apply the curve to a progress value, clamped to `0.0..=1.0`
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Curve::Linear => t,
            Curve::PowIn(n) => t.powi(n),
            Curve::PowOut(n) => 1.0 - (1.0 - t).powi(n),
            Curve::PowInOut(n) => {
                if t < 0.5 {
                    2f32.powi(n - 1) * t.powi(n)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
                }
            }
            Curve::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }

    /// Concrete curve and duration (seconds) for a step transition
    pub fn for_transition(transition: &Transition<Curve>) -> (Curve, f64) {
        match transition {
            Transition::Default => (Curve::EASE, DEFAULT_ANIMATION_SECS),
            Transition::EaseIn(d) => (Curve::EASE_IN, *d),
            Transition::EaseOut(d) => (Curve::EASE_OUT, *d),
            Transition::EaseInOut(d) => (Curve::EASE_IN_OUT, *d),
            Transition::Linear(d) => (Curve::Linear, *d),
            Transition::Custom { curve, duration } => (*curve, *duration),
        }
    }
}

impl Default for Curve {
    fn default() -> Self {
        Curve::EASE
    }
}

fn cubic_bezier(progress: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let (xs, ys) = (BezierAxis::new(x1, x2), BezierAxis::new(y1, y2));
    ys.at(xs.solve(f64::from(progress))) as f32
}

/// One coordinate of a CSS cubic bezier (endpoints pinned to 0 and 1), in
/// polynomial form `((a*t + b)*t + c)*t`
#[derive(Clone, Copy, Debug)]
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    const EPSILON: f64 = 1e-7;

    fn new(p1: f32, p2: f32) -> Self {
        let (p1, p2) = (f64::from(p1), f64::from(p2));
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    #[inline]
    fn at(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    #[inline]
    fn derivative(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Parameter `t` in `0.0..=1.0` where this axis reaches `value`
    ///
    /// Newton steps converge in a few iterations on most curves. Flat spots
    /// fall back to bisection over the full range.
    fn solve(&self, value: f64) -> f64 {
        let mut t = value;
        for _ in 0..8 {
            let error = self.at(t) - value;
            if error.abs() < Self::EPSILON {
                return t;
            }
            let slope = self.derivative(t);
            if slope.abs() < Self::EPSILON {
                break;
            }
            t -= error / slope;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        t = value;
        while hi - lo > Self::EPSILON {
            let x = self.at(t);
            if (x - value).abs() < Self::EPSILON {
                break;
            }
            if x < value {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Curve; 8] = [
        Curve::Linear,
        Curve::PowIn(3),
        Curve::PowOut(2),
        Curve::PowInOut(4),
        Curve::EASE,
        Curve::EASE_IN,
        Curve::EASE_OUT,
        Curve::EASE_IN_OUT,
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for curve in ALL {
            assert_eq!(curve.apply(0.0), 0.0, "{curve:?}");
            assert_eq!(curve.apply(1.0), 1.0, "{curve:?}");
            assert_eq!(curve.apply(-0.5), 0.0, "{curve:?}");
            assert_eq!(curve.apply(1.5), 1.0, "{curve:?}");
        }
    }

    #[test]
    fn test_monotonic() {
        for curve in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = curve.apply(i as f32 / 100.0);
                assert!(v + 1e-5 >= prev, "{curve:?} decreased at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_symmetric_curves_hit_midpoint() {
        assert!((Curve::Linear.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Curve::PowInOut(3).apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Curve::EASE_IN_OUT.apply(0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_ease_in_starts_slow_ease_out_starts_fast() {
        assert!(Curve::EASE_IN.apply(0.25) < 0.25);
        assert!(Curve::EASE_OUT.apply(0.25) > 0.25);
        assert!(Curve::PowIn(2).apply(0.5) < 0.5);
        assert!(Curve::PowOut(2).apply(0.5) > 0.5);
    }

    #[test]
    fn test_bezier_matches_linear_control_points() {
        let linearish = Curve::CubicBezier(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((linearish.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_solve_handles_flat_start() {
        // x(t) = t^3: Newton overshoots from a flat start, bisection recovers
        let axis = BezierAxis::new(0.0, 0.0);
        assert!((axis.solve(0.125) - 0.5).abs() < 1e-4);
        assert!((axis.solve(0.001) - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_for_transition() {
        assert_eq!(
            Curve::for_transition(&Transition::Default),
            (Curve::EASE, DEFAULT_ANIMATION_SECS)
        );
        assert_eq!(
            Curve::for_transition(&Transition::EaseIn(0.4)),
            (Curve::EASE_IN, 0.4)
        );
        assert_eq!(
            Curve::for_transition(&Transition::Linear(2.0)),
            (Curve::Linear, 2.0)
        );
        assert_eq!(
            Curve::for_transition(&Transition::Custom {
                curve: Curve::PowOut(5),
                duration: 0.7
            }),
            (Curve::PowOut(5), 0.7)
        );
    }
}

//! Cosmetic pulse feedback.
//!
//! A pulse scales its target from 1 to a peak and back within a fixed duration.
//! Pulses are fire-and-forget: nothing in the calendar waits on them, and an
//! [`Animator`] may drop them entirely.

use std::time::Duration;

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// Overshooting ease used for every pulse of the calendar.
    pub const OVERSHOOT: CubicBezier = CubicBezier::new(0.34, 1.56, 0.64, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        CubicBezier { x1, y1, x2, y2 }
    }

    fn component(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn derivative(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let error = Self::component(t, self.x1, self.x2) - x;
            if error.abs() < 1e-7 {
                return t;
            }
            let slope = Self::derivative(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= error / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while hi - lo > 1e-7 {
            if Self::component(t, self.x1, self.x2) < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// Eased progress for linear progress `x` in `0..=1`.
    pub fn apply(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else if x >= 1.0 {
            1.0
        } else {
            Self::component(self.solve_t(x), self.y1, self.y2)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub duration: Duration,
    pub peak: f64,
    pub easing: CubicBezier,
}

impl Pulse {
    /// Feedback on pressing a day cell.
    pub const CELL_POP: Pulse = Pulse {
        duration: Duration::from_millis(280),
        peak: 1.25,
        easing: CubicBezier::OVERSHOOT,
    };

    /// Feedback on pressing a navigation trigger.
    pub const NAV_PRESS: Pulse = Pulse {
        duration: Duration::from_millis(220),
        peak: 0.88,
        easing: CubicBezier::OVERSHOOT,
    };

    /// Scale after `elapsed`, or `None` once the pulse has finished.
    ///
    /// Keyframes 1, `peak`, 1 sit at eased offsets 0, 0.5 and 1; overshoot of
    /// the easing extrapolates the outer segment.
    pub fn scale_at(&self, elapsed: Duration) -> Option<f64> {
        if elapsed >= self.duration {
            return None;
        }

        let progress = self
            .easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64());

        Some(if progress <= 0.5 {
            1.0 + (self.peak - 1.0) * (progress / 0.5)
        } else {
            self.peak + (1.0 - self.peak) * ((progress - 0.5) / 0.5)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulseTarget {
    Day(u32),
    PrevTrigger,
    NextTrigger,
}

pub trait Animator {
    fn pulse(&mut self, target: PulseTarget, pulse: Pulse);
}

/// Animator for contexts without visual feedback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnimator;

impl Animator for NoopAnimator {
    fn pulse(&mut self, _target: PulseTarget, _pulse: Pulse) {}
}

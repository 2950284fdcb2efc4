use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Duration of one full animation cycle, in the same time unit as [`AnimationClock`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Deref, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(f64);

impl Period {
    pub fn new(time_units: f64) -> Self {
        Self(time_units)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Normalized progress through the current cycle, in `[0, 1)`.
    pub fn cycle(&self, elapsed: f64) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        let c = (elapsed / self.0).rem_euclid(1.0);
        if c >= 1.0 { 0.0 } else { c }
    }

    /// Linear rotation over the cycle, in degrees `[0, 360)`.
    pub fn degrees(&self, elapsed: f64) -> f64 {
        self.cycle(elapsed) * 360.0
    }
}

/// Triangular wave: 0 at the start of a cycle, 1 halfway, back to 0 at the end.
pub fn triangle(cycle: f64) -> f64 {
    1.0 - (2.0 * cycle.clamp(0.0, 1.0) - 1.0).abs()
}

/// Single source of time for every animation loop. Geometry is computed from
/// its readings, so nothing in the layout depends on a real timer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Moves the clock forward. Time never runs backwards, so negative or
    /// non-finite deltas are dropped.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt >= 0.0 {
            self.elapsed += dt;
        } else {
            log::warn!("Ignoring invalid clock delta {}", dt);
        }
        self.elapsed
    }

    /// Time elapsed since an earlier reading of [`Self::elapsed`].
    pub fn since(&self, mark: f64) -> f64 {
        (self.elapsed - mark).max(0.0)
    }
}

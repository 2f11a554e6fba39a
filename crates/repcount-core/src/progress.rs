//! Progress normalisation against calibration bounds

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw metric values that count as 0 % (`low`) and 100 % (`high`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalibrationBounds", into = "CalibrationBounds")]
pub struct Calibration {
    low: f32,
    high: f32,
}

#[derive(Serialize, Deserialize)]
struct CalibrationBounds {
    low: f32,
    high: f32,
}

impl TryFrom<CalibrationBounds> for Calibration {
    type Error = Error;

    fn try_from(bounds: CalibrationBounds) -> Result<Self> {
        Calibration::new(bounds.low, bounds.high)
    }
}

impl From<Calibration> for CalibrationBounds {
    fn from(calibration: Calibration) -> Self {
        Self {
            low: calibration.low,
            high: calibration.high,
        }
    }
}

impl Calibration {
    pub fn new(low: f32, high: f32) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(Error::InvalidCalibration { low, high });
        }
        Ok(Self { low, high })
    }

    /// Bounds known to be valid at compile time
    pub(crate) const fn preset(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn low(&self) -> f32 {
        self.low
    }

    pub fn high(&self) -> f32 {
        self.high
    }

    /// Map a raw metric onto [0, 100].
    ///
    /// Anything at or past a bound reports that bound exactly, which is what
    /// the repetition counter compares against.
    pub fn percentage(&self, metric: f32) -> f32 {
        self.interpolate(metric, 0.0, 100.0)
    }

    /// Vertical pixel position of the bar fill edge for a raw metric
    pub fn bar_position(&self, metric: f32, bar: BarSpan) -> f32 {
        self.interpolate(metric, bar.empty, bar.full)
    }

    /// Linear map of `metric` from `[low, high]` onto `[from, to]`, clamped at both ends
    pub fn interpolate(&self, metric: f32, from: f32, to: f32) -> f32 {
        if metric <= self.low {
            return from;
        }
        if metric >= self.high {
            return to;
        }
        let t = (metric - self.low) / (self.high - self.low);
        let value = from + (to - from) * t;
        value.clamp(from.min(to), from.max(to))
    }
}

/// Pixel rows of the progress bar: `empty` at 0 %, `full` at 100 %
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSpan {
    pub empty: f32,
    pub full: f32,
}

impl Default for BarSpan {
    fn default() -> Self {
        Self {
            empty: 650.0,
            full: 100.0,
        }
    }
}

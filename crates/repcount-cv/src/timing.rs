//! Frame rate measurement

use std::time::Instant;

/// Instantaneous frame rate from the wall-clock gap between ticks.
///
/// Purely diagnostic; it never feeds back into counting.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    previous: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    /// Frames per second since the previous tick.
    ///
    /// `None` on the first tick and whenever no time has elapsed.
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        let previous = self.previous.replace(now)?;
        let elapsed = now.checked_duration_since(previous)?.as_secs_f64();
        if elapsed > 0.0 { Some(1.0 / elapsed) } else { None }
    }
}

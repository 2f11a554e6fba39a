//! Repetition counting core
//!
//! Turns a per-frame stream of 2-D body landmarks into a repetition count.
//! Geometry, normalisation and counting are synchronous and frame-at-a-time:
//! nothing is buffered and no frame looks ahead.

pub mod counter;
pub mod error;
pub mod exercise;
pub mod geometry;
pub mod landmarks;
pub mod progress;
pub mod provider;

// Re-export commonly used types
pub use counter::{Direction, DualThreshold, JumpSignals, RepCounter, RepetitionPolicy};
pub use error::{Error, Result};
pub use exercise::{
    ExerciseConfig, ExerciseKind, ExerciseSession, FrameReport, SessionStats, SessionSummary,
    Status,
};
pub use geometry::{JointTriple, Metric};
pub use landmarks::{Landmark, LandmarkSet};
pub use progress::{BarSpan, Calibration};
pub use provider::{LandmarkProvider, RecordedFrame, Recording, ReplayProvider};

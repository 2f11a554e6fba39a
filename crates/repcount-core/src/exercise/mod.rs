//! Exercise variants and the per-session counting pipeline

pub mod config;
pub mod session;

pub use config::{ExerciseConfig, ExerciseKind};
pub use session::{ExerciseSession, FrameReport, SessionStats, SessionSummary, Status};

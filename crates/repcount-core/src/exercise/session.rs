//! One exercise session: geometry, normalisation and counting per frame

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::{ExerciseConfig, ExerciseKind};
use crate::counter::{Direction, JumpSignals, RepCounter, RepetitionPolicy};
use crate::error::Result;
use crate::geometry::pair_distance;
use crate::landmarks::LandmarkSet;

/// Coaching text shown for sessions counted on raw signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    KeepGoing,
    Jump,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::KeepGoing => "Keep Going!",
            Status::Jump => "Jump!",
        }
    }
}

/// What one processed frame produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub exercise: ExerciseKind,
    /// Raw metric in degrees or pixels
    pub metric: f32,
    pub percentage: f32,
    pub bar_position: f32,
    pub repetitions: f32,
    pub direction: Direction,
    /// True when this frame moved the count
    pub counted: bool,
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames_processed: u64,
    /// Frames without a detected body
    pub frames_skipped: u64,
    /// Frames whose landmark set lacked a required landmark
    pub frames_rejected: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub exercise: ExerciseKind,
    pub repetitions: f32,
    pub direction: Direction,
    #[serde(flatten)]
    pub stats: SessionStats,
}

/// Owns the counter for a single exercise session.
///
/// Construct one per session start and drop it on stop; there is no way to
/// reset or share the count.
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    config: ExerciseConfig,
    counter: RepCounter,
    stats: SessionStats,
}

impl ExerciseSession {
    pub fn new(config: ExerciseConfig) -> Self {
        info!(exercise = %config.kind, "starting exercise session");
        Self {
            config,
            counter: RepCounter::new(),
            stats: SessionStats::default(),
        }
    }

    /// Session using the built-in configuration of `kind`
    pub fn for_exercise(kind: ExerciseKind) -> Self {
        Self::new(kind.config())
    }

    /// Process one frame's landmarks.
    ///
    /// Returns `Ok(None)` when no body was detected. A set missing one of the
    /// required landmarks is rejected with an error. In both cases the
    /// counter is left untouched.
    pub fn process(&mut self, landmarks: &LandmarkSet) -> Result<Option<FrameReport>> {
        if landmarks.is_empty() {
            self.stats.frames_skipped += 1;
            debug!(exercise = %self.config.kind, "no detection, frame skipped");
            return Ok(None);
        }

        let (metric, signals) = match self.measure(landmarks) {
            Ok(measured) => measured,
            Err(e) => {
                self.stats.frames_rejected += 1;
                warn!(exercise = %self.config.kind, error = %e, "frame rejected");
                return Err(e);
            }
        };

        let calibration = self.config.calibration;
        let percentage = calibration.percentage(metric);
        let bar_position = calibration.bar_position(metric, self.config.bar);

        let counted = match (&self.config.counting, &signals) {
            (RepetitionPolicy::DualThreshold(thresholds), Some(signals)) => {
                self.counter.observe_signals(thresholds, signals)
            }
            _ => self.counter.observe_percentage(percentage),
        };
        self.stats.frames_processed += 1;

        if counted {
            info!(
                exercise = %self.config.kind,
                repetitions = self.counter.repetitions(),
                "repetition progress"
            );
        }
        debug!(metric, percentage, direction = ?self.counter.direction(), "frame processed");

        let status = signals.map(|_| match self.counter.direction() {
            Direction::AwaitingEmpty => Status::KeepGoing,
            Direction::AwaitingFull => Status::Jump,
        });

        Ok(Some(FrameReport {
            exercise: self.config.kind,
            metric,
            percentage,
            bar_position,
            repetitions: self.counter.repetitions(),
            direction: self.counter.direction(),
            counted,
            status,
        }))
    }

    /// Read every input the frame needs before anything is mutated
    fn measure(&self, landmarks: &LandmarkSet) -> Result<(f32, Option<JumpSignals>)> {
        let metric = self.config.metric.evaluate(landmarks)?;
        let signals = match &self.config.counting {
            RepetitionPolicy::Boundary => None,
            RepetitionPolicy::DualThreshold(thresholds) => Some(JumpSignals {
                separation: pair_distance(
                    landmarks.require(thresholds.left_ankle)?,
                    landmarks.require(thresholds.right_ankle)?,
                ),
                left_wrist_y: landmarks.require(thresholds.left_wrist)?.y,
                right_wrist_y: landmarks.require(thresholds.right_wrist)?.y,
            }),
        };
        Ok((metric, signals))
    }

    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    pub fn counter(&self) -> &RepCounter {
        &self.counter
    }

    pub fn repetitions(&self) -> f32 {
        self.counter.repetitions()
    }

    pub fn direction(&self) -> Direction {
        self.counter.direction()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            exercise: self.config.kind,
            repetitions: self.counter.repetitions(),
            direction: self.counter.direction(),
            stats: self.stats,
        }
    }
}

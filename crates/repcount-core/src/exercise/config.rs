//! Exercise configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::counter::{DualThreshold, RepetitionPolicy};
use crate::error::{Error, Result};
use crate::geometry::{JointTriple, Metric};
use crate::landmarks::indices::*;
use crate::progress::{BarSpan, Calibration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    BicepCurl,
    JumpingJack,
    Squat,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::BicepCurl,
        ExerciseKind::JumpingJack,
        ExerciseKind::Squat,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::BicepCurl => "bicep-curl",
            ExerciseKind::JumpingJack => "jumping-jack",
            ExerciseKind::Squat => "squat",
        }
    }

    /// Built-in configuration for this variant
    pub fn config(&self) -> ExerciseConfig {
        match self {
            ExerciseKind::BicepCurl => ExerciseConfig::bicep_curl(),
            ExerciseKind::JumpingJack => ExerciseConfig::jumping_jack(),
            ExerciseKind::Squat => ExerciseConfig::squat(),
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        ExerciseKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| Error::UnknownExercise(s.to_string()))
    }
}

/// Everything that distinguishes one exercise from another.
///
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    pub kind: ExerciseKind,
    pub metric: Metric,
    pub calibration: Calibration,
    #[serde(default)]
    pub bar: BarSpan,
    pub counting: RepetitionPolicy,
}

impl ExerciseConfig {
    /// Right elbow flexion, 50° flexed to 160° extended
    pub fn bicep_curl() -> Self {
        Self {
            kind: ExerciseKind::BicepCurl,
            metric: Metric::joint_angle(JointTriple::new(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST)),
            calibration: Calibration::preset(50.0, 160.0),
            bar: BarSpan::default(),
            counting: RepetitionPolicy::Boundary,
        }
    }

    /// Ankle separation drives the bar; wrists and ankles together drive the count
    pub fn jumping_jack() -> Self {
        Self {
            kind: ExerciseKind::JumpingJack,
            metric: Metric::pair_distance(LEFT_ANKLE, RIGHT_ANKLE),
            calibration: Calibration::preset(50.0, 300.0),
            bar: BarSpan::default(),
            counting: RepetitionPolicy::DualThreshold(DualThreshold::default()),
        }
    }

    /// Mean knee angle of both legs, averaging out the camera's view of either side
    pub fn squat() -> Self {
        Self {
            kind: ExerciseKind::Squat,
            metric: Metric::mean_joint_angle([
                JointTriple::new(RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE),
                JointTriple::new(LEFT_HIP, LEFT_KNEE, LEFT_ANKLE),
            ]),
            calibration: Calibration::preset(190.0, 240.0),
            bar: BarSpan::default(),
            counting: RepetitionPolicy::Boundary,
        }
    }

    pub fn with_calibration(mut self, low: f32, high: f32) -> Result<Self> {
        self.calibration = Calibration::new(low, high)?;
        Ok(self)
    }

    pub fn with_counting(mut self, counting: RepetitionPolicy) -> Self {
        self.counting = counting;
        self
    }
}

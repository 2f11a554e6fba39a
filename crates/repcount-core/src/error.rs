//! Error types for the counting core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("no body detected in the current frame")]
    NoDetection,

    #[error("landmark {id} is not present in the current frame")]
    MissingLandmark { id: usize },

    #[error("invalid calibration bounds ({low}, {high}): expected finite values with low < high")]
    InvalidCalibration { low: f32, high: f32 },

    #[error("joint angle metric needs at least one joint triple")]
    EmptyMetric,

    #[error("unknown exercise '{0}' (expected bicep-curl, jumping-jack or squat)")]
    UnknownExercise(String),
}

pub type Result<T> = std::result::Result<T, Error>;

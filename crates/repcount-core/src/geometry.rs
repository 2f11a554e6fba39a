//! Progress metrics computed from landmark geometry

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::landmarks::{Landmark, LandmarkSet};

/// Angle at `b` between the rays towards `a` and `c`, in degrees within [0, 360).
///
/// The angle is the difference of the two `atan2` bearings, so it keeps the
/// winding direction: mirrored limbs measure `360 - θ`.
pub fn joint_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    let to_c = (c.y - b.y).atan2(c.x - b.x);
    let to_a = (a.y - b.y).atan2(a.x - b.x);
    let mut angle = (to_c - to_a).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    // a tiny negative difference rounds up to exactly 360 in f32
    if angle >= 360.0 { 0.0 } else { angle }
}

/// Euclidean distance between two landmarks in pixels
pub fn pair_distance(a: &Landmark, b: &Landmark) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Three landmark ids describing a joint: end point, vertex, end point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub a: usize,
    pub vertex: usize,
    pub c: usize,
}

impl JointTriple {
    pub const fn new(a: usize, vertex: usize, c: usize) -> Self {
        Self { a, vertex, c }
    }

    pub fn angle(&self, landmarks: &LandmarkSet) -> Result<f32> {
        let a = landmarks.require(self.a)?;
        let vertex = landmarks.require(self.vertex)?;
        let c = landmarks.require(self.c)?;
        Ok(joint_angle(a, vertex, c))
    }
}

/// Scalar that characterises how far an exercise has progressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metric {
    /// Mean joint angle over one or more joints (degrees)
    JointAngle { joints: Vec<JointTriple> },
    /// Distance between two landmarks (pixels)
    PairDistance { a: usize, b: usize },
}

impl Metric {
    pub fn joint_angle(joint: JointTriple) -> Self {
        Metric::JointAngle { joints: vec![joint] }
    }

    pub fn mean_joint_angle(joints: impl IntoIterator<Item = JointTriple>) -> Self {
        Metric::JointAngle {
            joints: joints.into_iter().collect(),
        }
    }

    pub fn pair_distance(a: usize, b: usize) -> Self {
        Metric::PairDistance { a, b }
    }

    /// Evaluate the metric; fails when a required landmark is absent
    pub fn evaluate(&self, landmarks: &LandmarkSet) -> Result<f32> {
        match self {
            Metric::JointAngle { joints } => {
                if joints.is_empty() {
                    return Err(Error::EmptyMetric);
                }
                let mut sum = 0.0;
                for joint in joints {
                    sum += joint.angle(landmarks)?;
                }
                Ok(sum / joints.len() as f32)
            }
            Metric::PairDistance { a, b } => {
                let a = landmarks.require(*a)?;
                let b = landmarks.require(*b)?;
                Ok(pair_distance(a, b))
            }
        }
    }

    /// Joints whose angles feed the metric, for drawing
    pub fn joints(&self) -> &[JointTriple] {
        match self {
            Metric::JointAngle { joints } => joints,
            Metric::PairDistance { .. } => &[],
        }
    }
}

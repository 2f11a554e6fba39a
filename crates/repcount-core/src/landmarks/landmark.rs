use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// A single 2-D body keypoint in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    #[serde(default = "full_visibility", deserialize_with = "clamped_visibility")]
    pub visibility: f32,
}

fn full_visibility() -> f32 {
    1.0
}

/// Visibility lives in [0, 1]; NaN reads as not visible
fn unit_visibility(visibility: f32) -> f32 {
    if visibility.is_nan() {
        0.0
    } else {
        visibility.clamp(0.0, 1.0)
    }
}

fn clamped_visibility<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f32, D::Error> {
    f32::deserialize(deserializer).map(unit_visibility)
}

impl Landmark {
    pub fn new(id: usize, x: f32, y: f32, visibility: f32) -> Self {
        Self {
            id,
            x,
            y,
            visibility: unit_visibility(visibility),
        }
    }

    pub fn point(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// All landmarks detected in one frame, or nothing when no body was found.
///
/// Providers emit landmarks in id order, so lookups hit the fast path; sets
/// built in any other order still resolve through a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    /// The "no detection" set
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_vec(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build a fully visible set from points, assigning ids in order
    pub fn from_points(points: &[(f32, f32)]) -> Self {
        let landmarks = points
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Landmark::new(id, x, y, 1.0))
            .collect();
        Self { landmarks }
    }

    pub fn get(&self, id: usize) -> Option<&Landmark> {
        match self.landmarks.get(id) {
            Some(landmark) if landmark.id == id => Some(landmark),
            _ => self.landmarks.iter().find(|landmark| landmark.id == id),
        }
    }

    /// Look up a landmark the caller cannot do without
    pub fn require(&self, id: usize) -> Result<&Landmark> {
        if self.landmarks.is_empty() {
            return Err(Error::NoDetection);
        }
        self.get(id).ok_or(Error::MissingLandmark { id })
    }

    /// Move an existing landmark or append a new one
    pub fn set(&mut self, id: usize, x: f32, y: f32) {
        match self.landmarks.iter_mut().find(|landmark| landmark.id == id) {
            Some(landmark) => {
                landmark.x = x;
                landmark.y = y;
            }
            None => self.landmarks.push(Landmark::new(id, x, y, 1.0)),
        }
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.landmarks
    }
}

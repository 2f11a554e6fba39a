//! Landmark types and the pose model's landmark indices

pub mod indices;
pub mod landmark;

pub use landmark::{Landmark, LandmarkSet};

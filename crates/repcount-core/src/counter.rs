//! Repetition counting state machine
//!
//! A [`RepCounter`] is owned by exactly one exercise session and mutated at
//! most once per frame. It has no reset: start a new session to count again.

use serde::{Deserialize, Serialize};

use crate::landmarks::indices::{LEFT_ANKLE, LEFT_WRIST, RIGHT_ANKLE, RIGHT_WRIST};

/// Which calibration extreme the counter is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    AwaitingFull,
    AwaitingEmpty,
}

/// Raw thresholds for the jumping-jack detector.
///
/// The open pose has the ankles far apart with both wrists raised above
/// `raised_wrist_y`; the closed pose has the ankles together with both wrists
/// lowered below `lowered_wrist_y`. Image y grows downwards. The separation
/// is always the distance between the two ankle landmarks, whatever metric
/// drives the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualThreshold {
    pub left_ankle: usize,
    pub right_ankle: usize,
    pub left_wrist: usize,
    pub right_wrist: usize,
    pub open_separation: f32,
    pub closed_separation: f32,
    pub raised_wrist_y: f32,
    pub lowered_wrist_y: f32,
}

impl Default for DualThreshold {
    fn default() -> Self {
        Self {
            left_ankle: LEFT_ANKLE,
            right_ankle: RIGHT_ANKLE,
            left_wrist: LEFT_WRIST,
            right_wrist: RIGHT_WRIST,
            open_separation: 150.0,
            closed_separation: 100.0,
            raised_wrist_y: 300.0,
            lowered_wrist_y: 400.0,
        }
    }
}

/// Raw per-frame inputs of the jumping-jack detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpSignals {
    pub separation: f32,
    pub left_wrist_y: f32,
    pub right_wrist_y: f32,
}

impl DualThreshold {
    pub fn is_open(&self, signals: &JumpSignals) -> bool {
        signals.separation > self.open_separation
            && signals.left_wrist_y < self.raised_wrist_y
            && signals.right_wrist_y < self.raised_wrist_y
    }

    pub fn is_closed(&self, signals: &JumpSignals) -> bool {
        signals.separation < self.closed_separation
            && signals.left_wrist_y > self.lowered_wrist_y
            && signals.right_wrist_y > self.lowered_wrist_y
    }
}

/// The single detector allowed to advance a session's counter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RepetitionPolicy {
    /// Half a repetition each time the percentage hits 100 then 0
    Boundary,
    /// A whole repetition per open-then-closed cycle of raw signals
    DualThreshold(DualThreshold),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepCounter {
    direction: Direction,
    half_repetitions: u32,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Completed repetitions, always a multiple of 0.5
    pub fn repetitions(&self) -> f32 {
        self.half_repetitions as f32 / 2.0
    }

    pub fn half_repetitions(&self) -> u32 {
        self.half_repetitions
    }

    /// Feed a normalised percentage; returns true when the count moved.
    ///
    /// Only the exact bounds 0 and 100 register. Motion that stops short of
    /// either extreme is never counted.
    pub fn observe_percentage(&mut self, percentage: f32) -> bool {
        match self.direction {
            Direction::AwaitingFull if percentage == 100.0 => {
                self.half_repetitions += 1;
                self.direction = Direction::AwaitingEmpty;
                true
            }
            Direction::AwaitingEmpty if percentage == 0.0 => {
                self.half_repetitions += 1;
                self.direction = Direction::AwaitingFull;
                true
            }
            _ => false,
        }
    }

    /// Feed raw jumping-jack signals; returns true when the count moved.
    ///
    /// Reaching the open pose only arms the counter; the whole repetition is
    /// credited on the return to the closed pose.
    pub fn observe_signals(&mut self, thresholds: &DualThreshold, signals: &JumpSignals) -> bool {
        match self.direction {
            Direction::AwaitingFull if thresholds.is_open(signals) => {
                self.direction = Direction::AwaitingEmpty;
                false
            }
            Direction::AwaitingEmpty if thresholds.is_closed(signals) => {
                self.half_repetitions += 2;
                self.direction = Direction::AwaitingFull;
                true
            }
            _ => false,
        }
    }
}

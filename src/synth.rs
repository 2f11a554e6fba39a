//! Synthetic landmark recordings
//!
//! Generates a standing figure that performs a given number of repetitions,
//! with per-landmark jitter and occasional frames where detection drops out.

use anyhow::{Result, ensure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use repcount_core::landmarks::indices::*;
use repcount_core::{ExerciseKind, Landmark, LandmarkSet, RecordedFrame, Recording};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthOptions {
    pub exercise: ExerciseKind,
    pub repetitions: u32,
    /// Frames spent moving between the rest and peak poses
    pub frames_per_phase: u32,
    /// Frames held at each extreme
    pub hold_frames: u32,
    /// Maximum per-axis landmark noise in pixels
    pub jitter: f32,
    /// Probability that a frame has no detection
    pub dropout: f64,
    pub seed: u64,
}

impl SynthOptions {
    pub fn new(exercise: ExerciseKind, repetitions: u32) -> Self {
        Self {
            exercise,
            repetitions,
            frames_per_phase: 12,
            hold_frames: 3,
            jitter: 2.0,
            dropout: 0.02,
            seed: 7,
        }
    }
}

/// Rough standing figure facing the camera in a 1280x720 frame
const BASE_POSE: [(f32, f32); POSE_LANDMARK_COUNT] = [
    (640.0, 150.0), // nose
    (630.0, 140.0),
    (625.0, 140.0),
    (620.0, 140.0),
    (650.0, 140.0),
    (655.0, 140.0),
    (660.0, 140.0),
    (610.0, 150.0),
    (670.0, 150.0),
    (630.0, 165.0),
    (650.0, 165.0),
    (700.0, 250.0), // left shoulder
    (580.0, 250.0), // right shoulder
    (710.0, 330.0),
    (570.0, 330.0),
    (715.0, 400.0), // left wrist
    (565.0, 400.0), // right wrist
    (720.0, 415.0),
    (560.0, 415.0),
    (718.0, 418.0),
    (562.0, 418.0),
    (714.0, 410.0),
    (566.0, 410.0),
    (675.0, 420.0), // left hip
    (605.0, 420.0), // right hip
    (680.0, 540.0), // left knee
    (600.0, 540.0), // right knee
    (680.0, 660.0), // left ankle
    (600.0, 660.0), // right ankle
    (685.0, 675.0),
    (595.0, 675.0),
    (700.0, 680.0),
    (580.0, 680.0),
];

/// Raw metric (or open fraction for jumping jacks) at rest and at the peak
fn extremes(exercise: ExerciseKind) -> (f32, f32) {
    match exercise {
        ExerciseKind::BicepCurl => (170.0, 40.0),
        ExerciseKind::Squat => (180.0, 250.0),
        ExerciseKind::JumpingJack => (0.0, 1.0),
    }
}

/// Place `c` so that the angle at `vertex` measures `degrees`
fn bend(set: &mut LandmarkSet, a: usize, vertex: usize, c: usize, degrees: f32, length: f32) {
    let (Some(a), Some(v)) = (set.get(a).copied(), set.get(vertex).copied()) else {
        return;
    };
    let bearing = (a.y - v.y).atan2(a.x - v.x) + degrees.to_radians();
    set.set(c, v.x + length * bearing.cos(), v.y + length * bearing.sin());
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Noise-free pose for a metric value
fn pose(exercise: ExerciseKind, value: f32) -> LandmarkSet {
    let mut set = LandmarkSet::from_points(&BASE_POSE);
    match exercise {
        ExerciseKind::BicepCurl => {
            set.set(RIGHT_ELBOW, 580.0, 400.0);
            bend(&mut set, RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST, value, 140.0);
        }
        ExerciseKind::Squat => {
            // slightly uneven legs; their mean is `value`
            bend(&mut set, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE, value - 5.0, 120.0);
            bend(&mut set, LEFT_HIP, LEFT_KNEE, LEFT_ANKLE, value + 5.0, 120.0);
        }
        ExerciseKind::JumpingJack => {
            let half_stance = lerp(80.0, 280.0, value) / 2.0;
            set.set(LEFT_ANKLE, 640.0 + half_stance, 660.0);
            set.set(RIGHT_ANKLE, 640.0 - half_stance, 660.0);
            let wrist_y = lerp(500.0, 180.0, value);
            let wrist_reach = lerp(80.0, 200.0, value);
            set.set(LEFT_WRIST, 640.0 + wrist_reach, wrist_y);
            set.set(RIGHT_WRIST, 640.0 - wrist_reach, wrist_y);
        }
    }
    set
}

/// Metric values of the whole recording, starting and ending at rest
fn trajectory(options: &SynthOptions) -> Vec<f32> {
    let (rest, peak) = extremes(options.exercise);
    let phase = options.frames_per_phase.max(1);
    let mut values = vec![rest; options.hold_frames as usize];

    for _ in 0..options.repetitions {
        for step in 1..=phase {
            let t = step as f32 / phase as f32;
            let eased = (1.0 - (t * std::f32::consts::PI).cos()) / 2.0;
            values.push(lerp(rest, peak, eased));
        }
        values.extend(std::iter::repeat(peak).take(options.hold_frames as usize));
        for step in 1..=phase {
            let t = step as f32 / phase as f32;
            let eased = (1.0 - (t * std::f32::consts::PI).cos()) / 2.0;
            values.push(lerp(peak, rest, eased));
        }
        values.extend(std::iter::repeat(rest).take(options.hold_frames as usize));
    }
    values
}

/// Generate a recording; fails on non-finite jitter or dropout
pub fn synthesize(options: &SynthOptions) -> Result<Recording> {
    ensure!(options.jitter.is_finite(), "Jitter must be finite, got {}", options.jitter);
    ensure!(options.dropout.is_finite(), "Dropout must be finite, got {}", options.dropout);

    let mut rng = StdRng::seed_from_u64(options.seed);
    let jitter = options.jitter.abs();
    let dropout = options.dropout.clamp(0.0, 1.0);

    let frames: Vec<RecordedFrame> = trajectory(options)
        .into_iter()
        .map(|value| {
            if rng.gen_bool(dropout) {
                return RecordedFrame::default();
            }
            let landmarks = pose(options.exercise, value)
                .iter()
                .map(|l| {
                    Landmark::new(
                        l.id,
                        l.x + rng.gen_range(-jitter..=jitter),
                        l.y + rng.gen_range(-jitter..=jitter),
                        rng.gen_range(0.85..=1.0),
                    )
                })
                .collect();
            RecordedFrame {
                landmarks: LandmarkSet::from_vec(landmarks),
            }
        })
        .collect();

    info!(
        exercise = %options.exercise,
        repetitions = options.repetitions,
        frames = frames.len(),
        "synthesized recording"
    );
    Ok(Recording::new(frames))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_hits_requested_metric() {
        for kind in [ExerciseKind::BicepCurl, ExerciseKind::Squat] {
            let metric = kind.config().metric;
            for value in [40.0, 120.0, 170.0, 180.0, 250.0] {
                let measured = metric.evaluate(&pose(kind, value)).unwrap();
                assert!((measured - value).abs() < 0.05, "{kind}: {measured} != {value}");
            }
        }
    }

    #[test]
    fn test_jumping_jack_extremes() {
        let metric = ExerciseKind::JumpingJack.config().metric;
        let closed = pose(ExerciseKind::JumpingJack, 0.0);
        let open = pose(ExerciseKind::JumpingJack, 1.0);
        assert!((metric.evaluate(&closed).unwrap() - 80.0).abs() < 1e-3);
        assert!((metric.evaluate(&open).unwrap() - 280.0).abs() < 1e-3);
        assert_eq!(open.get(LEFT_WRIST).unwrap().y, 180.0);
    }

    #[test]
    fn test_recording_shape() {
        let mut options = SynthOptions::new(ExerciseKind::Squat, 2);
        options.dropout = 0.0;
        let recording = synthesize(&options).unwrap();
        // leading hold, then per rep: two phases and two holds
        assert_eq!(recording.len(), 3 + 2 * (12 + 3 + 12 + 3));
        assert!(recording.frames.iter().all(|f| f.landmarks.len() == POSE_LANDMARK_COUNT));
    }

    #[test]
    fn test_seed_is_deterministic() {
        let options = SynthOptions::new(ExerciseKind::JumpingJack, 3);
        assert_eq!(synthesize(&options).unwrap(), synthesize(&options).unwrap());
    }

    #[test]
    fn test_non_finite_noise_is_rejected() {
        let base = SynthOptions::new(ExerciseKind::BicepCurl, 1);
        for jitter in [f32::NAN, f32::INFINITY] {
            assert!(synthesize(&SynthOptions { jitter, ..base.clone() }).is_err());
        }
        assert!(synthesize(&SynthOptions { dropout: f64::NAN, ..base.clone() }).is_err());
        assert!(synthesize(&SynthOptions { dropout: 1.5, ..base }).is_ok());
    }
}

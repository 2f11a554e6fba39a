// tests/counting_tests.rs
use repcount_core::landmarks::indices::*;
use repcount_core::{
    Direction, ExerciseKind, ExerciseSession, FrameReport, LandmarkSet, RepCounter, Status,
};
use repcount_cv::{ImageCanvas, OverlayRenderer};

fn standing() -> LandmarkSet {
    LandmarkSet::from_points(&[(640.0, 360.0); POSE_LANDMARK_COUNT])
}

/// Place `c` so the angle at `vertex` is `degrees`
fn bend(set: &mut LandmarkSet, a: (f32, f32), vertex: (f32, f32), ids: (usize, usize, usize), degrees: f32) {
    set.set(ids.0, a.0, a.1);
    set.set(ids.1, vertex.0, vertex.1);
    let bearing = (a.1 - vertex.1).atan2(a.0 - vertex.0) + degrees.to_radians();
    set.set(ids.2, vertex.0 + 150.0 * bearing.cos(), vertex.1 + 150.0 * bearing.sin());
}

fn right_arm(degrees: f32) -> LandmarkSet {
    let mut set = standing();
    bend(
        &mut set,
        (600.0, 200.0),
        (600.0, 350.0),
        (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
        degrees,
    );
    set
}

fn legs(right: f32, left: f32) -> LandmarkSet {
    let mut set = standing();
    bend(&mut set, (600.0, 400.0), (600.0, 520.0), (RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE), right);
    bend(&mut set, (680.0, 400.0), (680.0, 520.0), (LEFT_HIP, LEFT_KNEE, LEFT_ANKLE), left);
    set
}

fn jump(separation: f32, wrist_y: f32) -> LandmarkSet {
    let mut set = standing();
    set.set(LEFT_ANKLE, 640.0 + separation / 2.0, 660.0);
    set.set(RIGHT_ANKLE, 640.0 - separation / 2.0, 660.0);
    set.set(LEFT_WRIST, 760.0, wrist_y);
    set.set(RIGHT_WRIST, 520.0, wrist_y);
    set
}

fn run(session: &mut ExerciseSession, frames: &[LandmarkSet]) -> Vec<FrameReport> {
    frames
        .iter()
        .filter_map(|frame| session.process(frame).expect("frame should be measurable"))
        .collect()
}

#[test]
fn test_bicep_curl_cycle_counts_one_repetition() {
    let mut session = ExerciseSession::for_exercise(ExerciseKind::BicepCurl);
    // arm extends fully, flexes fully, then comes back down part way
    let angles = [105.0, 135.0, 162.0, 130.0, 90.0, 48.0, 80.0, 105.0];
    let frames: Vec<_> = angles.iter().map(|&a| right_arm(a)).collect();
    run(&mut session, &frames);

    assert_eq!(session.repetitions(), 1.0);
    assert_eq!(session.direction(), Direction::AwaitingFull);
}

#[test]
fn test_bicep_curl_from_full_extension_counts_each_half_cycle() {
    let mut session = ExerciseSession::for_exercise(ExerciseKind::BicepCurl);
    let frames: Vec<_> = [161.0, 49.0, 161.0].iter().map(|&a| right_arm(a)).collect();
    let reports = run(&mut session, &frames);

    // every frame sits on a bound, so each one completes a half cycle
    assert!(reports.iter().all(|r| r.counted));
    assert_eq!(session.repetitions(), 1.5);
    assert_eq!(session.direction(), Direction::AwaitingEmpty);
}

#[test]
fn test_range_short_of_bounds_never_counts() {
    let mut session = ExerciseSession::for_exercise(ExerciseKind::BicepCurl);
    for _ in 0..20 {
        for angle in [70.0, 110.0, 150.0, 110.0] {
            session.process(&right_arm(angle)).unwrap();
        }
    }
    assert_eq!(session.repetitions(), 0.0);
    assert_eq!(session.stats().frames_processed, 80);
}

#[test]
fn test_squat_bounds_count_one_repetition() {
    let config = ExerciseKind::Squat.config();
    let mut counter = RepCounter::new();

    let mean = (230.0 + 250.0) / 2.0;
    assert_eq!(config.calibration.percentage(mean), 100.0);
    assert!(counter.observe_percentage(config.calibration.percentage(mean)));
    assert!(counter.observe_percentage(config.calibration.percentage(190.0)));
    assert_eq!(counter.repetitions(), 1.0);
}

#[test]
fn test_squat_uses_mean_of_both_legs() {
    let mut session = ExerciseSession::for_exercise(ExerciseKind::Squat);

    let down = session.process(&legs(230.0, 250.0)).unwrap().unwrap();
    assert!((down.metric - 240.0).abs() < 1e-3);
    assert_eq!(down.percentage, 100.0);

    let up = session.process(&legs(190.0, 190.0)).unwrap().unwrap();
    assert!((up.metric - 190.0).abs() < 1e-3);
    assert_eq!(up.percentage, 0.0);

    assert_eq!(session.repetitions(), 1.0);
}

#[test]
fn test_jumping_jack_counts_with_a_single_policy() {
    let mut session = ExerciseSession::for_exercise(ExerciseKind::JumpingJack);
    // closed and open poses also sit beyond the bar's calibration bounds
    let closed = jump(40.0, 500.0);
    let open = jump(320.0, 200.0);

    let first_open = run(&mut session, &[closed.clone(), open.clone()]);
    assert_eq!(first_open[1].percentage, 100.0);
    // the bar is full, but only the return to the closed pose counts
    assert!(!first_open[1].counted);
    assert_eq!(session.repetitions(), 0.0);

    let rest = run(&mut session, &[closed.clone(), open, closed]);
    assert_eq!(rest.iter().filter(|r| r.counted).count(), 2);
    assert!(rest.iter().filter(|r| r.counted).all(|r| r.percentage == 0.0));
    assert_eq!(session.repetitions(), 2.0);
    assert_eq!(rest.last().and_then(|r| r.status), Some(Status::Jump));
}

#[test]
fn test_empty_frames_leave_counter_alone() {
    let mut session = ExerciseSession::for_exercise(ExerciseKind::Squat);
    session.process(&legs(245.0, 245.0)).unwrap();
    let before = session.counter().clone();

    for _ in 0..5 {
        assert!(session.process(&LandmarkSet::empty()).unwrap().is_none());
    }
    assert_eq!(session.counter(), &before);
    assert_eq!(session.stats().frames_skipped, 5);
}

#[test]
fn test_rendering_does_not_touch_the_count() -> anyhow::Result<()> {
    let mut session = ExerciseSession::for_exercise(ExerciseKind::BicepCurl);
    let report = session.process(&right_arm(165.0))?.expect("landmarks present");
    assert_eq!(session.repetitions(), 0.5);

    let renderer = OverlayRenderer::default();
    let mut frame = image::RgbImage::new(1280, 720);
    let first = renderer.compose_report(&report);
    for _ in 0..10 {
        let ops = renderer.compose_report(&report);
        assert_eq!(ops, first);
        renderer.render(&mut ImageCanvas::new(&mut frame), &ops)?;
    }

    assert_eq!(session.repetitions(), 0.5);
    assert_eq!(session.direction(), Direction::AwaitingEmpty);
    Ok(())
}

#[test]
fn test_sessions_are_independent() {
    let mut first = ExerciseSession::for_exercise(ExerciseKind::Squat);
    let mut second = ExerciseSession::for_exercise(ExerciseKind::Squat);
    first.process(&legs(245.0, 245.0)).unwrap();
    first.process(&legs(185.0, 185.0)).unwrap();

    assert_eq!(first.repetitions(), 1.0);
    assert_eq!(second.repetitions(), 0.0);
    second.process(&legs(185.0, 185.0)).unwrap();
    assert_eq!(second.repetitions(), 0.0);
}

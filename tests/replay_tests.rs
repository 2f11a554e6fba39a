// tests/replay_tests.rs
use anyhow::Result;
use repcount::{AppConfig, SynthOptions, replay_file, replay_files, replay_recording, synthesize, write_summaries};
use repcount_core::{ExerciseKind, LandmarkSet, RecordedFrame, Recording, SessionSummary};

fn small_config() -> AppConfig {
    AppConfig {
        frame_width: 320,
        frame_height: 180,
        ..AppConfig::default()
    }
}

#[test]
fn test_synthetic_sessions_count_every_repetition() -> Result<()> {
    let config = AppConfig::default();
    for kind in ExerciseKind::ALL {
        let recording = synthesize(&SynthOptions::new(kind, 4))?;
        let summary = replay_recording(recording, config.exercise(kind), &config, None)?;

        assert_eq!(summary.exercise, kind);
        assert_eq!(summary.stats.frames_rejected, 0);
        match kind {
            // the curl starts fully extended, which already completes half a cycle
            ExerciseKind::BicepCurl => assert_eq!(summary.repetitions, 4.5),
            _ => assert_eq!(summary.repetitions, 4.0, "{kind}"),
        }
    }
    Ok(())
}

#[test]
fn test_dropouts_are_skipped_not_counted() -> Result<()> {
    let mut options = SynthOptions::new(ExerciseKind::Squat, 3);
    options.dropout = 0.3;
    options.seed = 11;
    let recording = synthesize(&options)?;
    let dropped = recording.frames.iter().filter(|f| f.landmarks.is_empty()).count() as u64;

    let config = AppConfig::default();
    let summary = replay_recording(recording, config.exercise(ExerciseKind::Squat), &config, None)?;
    assert_eq!(summary.stats.frames_skipped, dropped);
    assert!(summary.repetitions <= 3.0);
    Ok(())
}

#[test]
fn test_partial_landmark_sets_are_rejected() -> Result<()> {
    let mut frames = synthesize(&SynthOptions {
        dropout: 0.0,
        ..SynthOptions::new(ExerciseKind::JumpingJack, 1)
    })?
    .frames;
    frames.insert(
        2,
        RecordedFrame {
            landmarks: LandmarkSet::from_points(&[(10.0, 10.0); 20]),
        },
    );

    let config = AppConfig::default();
    let summary = replay_recording(
        Recording::new(frames),
        config.exercise(ExerciseKind::JumpingJack),
        &config,
        None,
    )?;
    assert_eq!(summary.stats.frames_rejected, 1);
    assert_eq!(summary.repetitions, 1.0);
    Ok(())
}

#[test]
fn test_replay_file_renders_frames() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("curl.jsonl");
    let options = SynthOptions {
        frames_per_phase: 4,
        hold_frames: 1,
        dropout: 0.0,
        ..SynthOptions::new(ExerciseKind::BicepCurl, 1)
    };
    let recording = synthesize(&options)?;
    recording.save(&input)?;

    let render_dir = dir.path().join("frames");
    let summary = replay_file(&input, ExerciseKind::BicepCurl, &small_config(), Some(&render_dir))?;
    assert_eq!(summary.stats.frames_processed, recording.len() as u64);

    let rendered = std::fs::read_dir(&render_dir)?.count();
    assert_eq!(rendered, recording.len());
    assert!(render_dir.join("frame_00000.png").exists());
    Ok(())
}

#[test]
fn test_replay_files_keeps_sessions_apart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut inputs = Vec::new();
    for (name, reps) in [("one", 1), ("three", 3)] {
        let path = dir.path().join(format!("{name}.jsonl"));
        synthesize(&SynthOptions::new(ExerciseKind::JumpingJack, reps))?.save(&path)?;
        inputs.push(path);
    }
    inputs.push(dir.path().join("missing.jsonl"));

    let results = replay_files(&inputs, ExerciseKind::JumpingJack, &AppConfig::default(), None);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().map(|s| s.repetitions).ok(), Some(1.0));
    assert_eq!(results[1].as_ref().map(|s| s.repetitions).ok(), Some(3.0));
    assert!(results[2].is_err());
    Ok(())
}

#[test]
fn test_summaries_written_as_json() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("summary.json");
    let config = AppConfig::default();
    let summary = replay_recording(
        synthesize(&SynthOptions::new(ExerciseKind::Squat, 2))?,
        config.exercise(ExerciseKind::Squat),
        &config,
        None,
    )?;
    write_summaries(&path, std::slice::from_ref(&summary))?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.contains("\"frames_processed\""));
    let back: Vec<SessionSummary> = serde_json::from_str(&text)?;
    assert_eq!(back, vec![summary]);
    Ok(())
}

//! Replay recorded landmark streams through exercise sessions

use anyhow::{Context, Result};
use repcount_core::{
    ExerciseConfig, ExerciseKind, ExerciseSession, LandmarkProvider, Recording, ReplayProvider,
    SessionSummary,
};
use repcount_cv::{FrameClock, ImageCanvas, ImageUtils, OverlayRenderer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Run a recording through a fresh session.
///
/// With `render_dir` set, every frame is drawn onto a blank canvas and saved
/// as `frame_NNNNN.png`.
pub fn replay_recording(
    recording: Recording,
    exercise: ExerciseConfig,
    config: &AppConfig,
    render_dir: Option<&Path>,
) -> Result<SessionSummary> {
    let font = config
        .font_path
        .as_ref()
        .map(ImageUtils::load_font)
        .transpose()?;
    let renderer = OverlayRenderer::new(config.overlay.clone());
    let mut session = ExerciseSession::new(exercise);
    let mut provider = ReplayProvider::new(recording);
    let mut clock = FrameClock::new();
    let mut index = 0usize;

    while !provider.is_exhausted() {
        let mut frame = match render_dir {
            Some(_) => Some(ImageUtils::blank_frame(
                config.frame_width,
                config.frame_height,
                config.background,
            )?),
            None => None,
        };
        let landmarks = provider.detect(&frame)?;

        let mut ops = Vec::new();
        match session.process(&landmarks) {
            Ok(Some(report)) => {
                ops = renderer.compose_frame(&report, &session.config().metric, &landmarks);
            }
            Ok(None) => {}
            Err(e) => debug!(frame = index, error = %e, "frame not counted"),
        }
        ops.extend(renderer.compose_fps(clock.tick()));

        if let (Some(dir), Some(frame)) = (render_dir, frame.as_mut()) {
            let mut canvas = ImageCanvas::new(frame).with_font(font.as_ref());
            renderer.render(&mut canvas, &ops)?;
            ImageUtils::save_image(frame, dir.join(format!("frame_{index:05}.png")))?;
        }
        index += 1;
    }

    let summary = session.summary();
    info!(
        exercise = %summary.exercise,
        repetitions = summary.repetitions,
        processed = summary.stats.frames_processed,
        skipped = summary.stats.frames_skipped,
        rejected = summary.stats.frames_rejected,
        "session finished"
    );
    Ok(summary)
}

pub fn replay_file(
    path: &Path,
    kind: ExerciseKind,
    config: &AppConfig,
    render_dir: Option<&Path>,
) -> Result<SessionSummary> {
    let recording = Recording::load(path)?;
    replay_recording(recording, config.exercise(kind), config, render_dir)
        .with_context(|| format!("Failed to replay {:?}", path))
}

/// Replay several recordings, each in its own session.
///
/// Frames of recording `foo.jsonl` go to `<render_dir>/foo/` when more than
/// one recording is given.
pub fn replay_files(
    paths: &[PathBuf],
    kind: ExerciseKind,
    config: &AppConfig,
    render_dir: Option<&Path>,
) -> Vec<Result<SessionSummary>> {
    let target = |path: &PathBuf| -> Option<PathBuf> {
        let dir = render_dir?;
        if paths.len() == 1 {
            return Some(dir.to_path_buf());
        }
        let stem = path.file_stem().map(|s| s.to_os_string()).unwrap_or_default();
        Some(dir.join(stem))
    };
    let run = |path: &PathBuf| replay_file(path, kind, config, target(path).as_deref());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        paths.par_iter().map(run).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        paths.iter().map(run).collect()
    }
}

pub fn write_summaries<P: AsRef<Path>>(path: P, summaries: &[SessionSummary]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(summaries).context("Failed to serialize session summaries")?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON to: {:?}", path))?;
    Ok(())
}

//! Landmark providers and recorded landmark streams
//!
//! The pose model is an outside collaborator: anything that turns a frame
//! into a [`LandmarkSet`] can drive a session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::landmarks::LandmarkSet;

/// Frame -> landmarks capability, or an empty set when nobody is in view
pub trait LandmarkProvider<F: ?Sized> {
    fn detect(&mut self, frame: &F) -> Result<LandmarkSet>;
}

/// One line of a recorded landmark stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub landmarks: LandmarkSet,
}

/// A landmark stream stored as JSON Lines, one frame per line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self { frames }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open recording: {:?}", path))?;
        let recording = Self::read(BufReader::new(file))
            .with_context(|| format!("Failed to parse recording: {:?}", path))?;
        info!(frames = recording.frames.len(), path = ?path, "loaded recording");
        Ok(recording)
    }

    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut frames = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: RecordedFrame = serde_json::from_str(&line)
                .with_context(|| format!("Invalid frame at line {}", line_num + 1))?;
            frames.push(frame);
        }

        if frames.is_empty() {
            warn!("recording contains no frames");
        }
        Ok(Self { frames })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("Failed to create recording: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush().with_context(|| format!("Failed to write recording: {:?}", path))?;
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        for frame in &self.frames {
            serde_json::to_writer(&mut *writer, frame).context("Failed to serialize frame")?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Plays a recording back one frame per `detect` call, ignoring frame content.
///
/// Once exhausted it keeps answering with "no detection".
#[derive(Debug, Clone, Default)]
pub struct ReplayProvider {
    pending: VecDeque<RecordedFrame>,
}

impl ReplayProvider {
    pub fn new(recording: Recording) -> Self {
        Self {
            pending: recording.frames.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<F: ?Sized> LandmarkProvider<F> for ReplayProvider {
    fn detect(&mut self, _frame: &F) -> Result<LandmarkSet> {
        Ok(self
            .pending
            .pop_front()
            .map(|frame| frame.landmarks)
            .unwrap_or_default())
    }
}

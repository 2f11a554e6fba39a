//! Repcount
//!
//! Glue around the counting core: configuration files, replay of recorded
//! landmark streams and synthetic recordings for demos and tests.

pub mod config;
pub mod replay;
pub mod synth;

pub use config::AppConfig;
pub use replay::{replay_file, replay_files, replay_recording, write_summaries};
pub use synth::{SynthOptions, synthesize};

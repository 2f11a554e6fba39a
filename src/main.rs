use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use repcount::{AppConfig, SynthOptions, replay_files, synthesize, write_summaries};
use repcount_core::ExerciseKind;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Count exercise repetitions from body landmarks", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded landmark streams, one session per recording
    Replay {
        /// bicep-curl, jumping-jack or squat
        #[arg(short, long)]
        exercise: ExerciseKind,
        /// JSON Lines recordings
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Write rendered frames here
        #[arg(long)]
        render_dir: Option<PathBuf>,
        /// Write session summaries as JSON
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Write a synthetic recording of an exercise
    Synth {
        #[arg(short, long)]
        exercise: ExerciseKind,
        #[arg(long, default_value_t = 5)]
        reps: u32,
        /// Maximum landmark noise in pixels
        #[arg(long, default_value_t = 2.0)]
        jitter: f32,
        /// Probability of a frame without detection
        #[arg(long, default_value_t = 0.02)]
        dropout: f64,
        #[arg(long, default_value_t = 7)]
        seed: u64,
        /// Output recording
        output: PathBuf,
    },

    /// Print the effective configuration
    ShowConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match args.command {
        Commands::Replay {
            exercise,
            inputs,
            render_dir,
            summary,
        } => {
            let mut summaries = Vec::new();
            let mut failures = 0;
            for (path, result) in inputs
                .iter()
                .zip(replay_files(&inputs, exercise, &config, render_dir.as_deref()))
            {
                match result {
                    Ok(session) => {
                        println!("{}: {} repetitions", path.display(), session.repetitions);
                        summaries.push(session);
                    }
                    Err(e) => {
                        error!(path = ?path, error = ?e, "replay failed");
                        failures += 1;
                    }
                }
            }
            if let Some(summary) = summary {
                write_summaries(&summary, &summaries)?;
                info!(path = ?summary, "wrote session summaries");
            }
            if failures > 0 {
                bail!("{failures} of {} recordings failed", inputs.len());
            }
        }
        Commands::Synth {
            exercise,
            reps,
            jitter,
            dropout,
            seed,
            output,
        } => {
            let options = SynthOptions {
                jitter,
                dropout,
                seed,
                ..SynthOptions::new(exercise, reps)
            };
            synthesize(&options)?
                .save(&output)
                .with_context(|| format!("Failed to write synthetic recording {:?}", output))?;
            info!(path = ?output, "wrote synthetic recording");
        }
        Commands::ShowConfig => {
            let mut shown = config.clone();
            if shown.exercises.is_empty() {
                shown.exercises = ExerciseKind::ALL.iter().map(|kind| config.exercise(*kind)).collect();
            }
            print!("{}", shown.to_toml()?);
        }
    }

    Ok(())
}

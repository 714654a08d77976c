//! Tonetime - an interval timing experiment.
//!
//! A participant hears a short run of evenly spaced tones and presses Enter
//! when they think the next tone would have sounded. The response latency is
//! compared against the inter-tone delay and appended to a CSV file.

pub mod audio;
pub mod config;
pub mod core;
pub mod error;
pub mod experiment;
pub mod participant;
pub mod storage;
pub mod synthesis;

// Re-export commonly used types at the crate root
pub use audio::TonePlayer;
#[cfg(feature = "playback")]
pub use audio::CpalPlayer;
pub use config::ExperimentConfig;
pub use crate::core::{Pitched, Signal};
pub use error::{ConfigError, ExperimentError, PlaybackError, ToneError};
pub use experiment::{
    Clock, DelaySchedule, ManualClock, Sequence, SessionSummary, SystemClock, TrialOutcome,
    TrialRecord, TrialRunner, TrialState, run_trial,
};
pub use participant::{ConsoleParticipant, InputMode, Participant};
pub use storage::{CsvLog, ResultSink};
pub use synthesis::{SineOscillator, Tone, ToneBuffer};

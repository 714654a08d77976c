//! A single prediction trial.
//!
//! The participant hears a sequence, then signals when they think the next tone
//! would have sounded. The trial is a small state machine:
//!
//! ```text
//! Start -> Playing -> AwaitingInput -> Measured -> Accepted
//!   ^                                     |
//!   +--------------- Retry <--------------+   (measured == 0)
//! ```

use super::clock::Clock;
use super::sequence::Sequence;
use crate::audio::TonePlayer;
use crate::error::ExperimentError;
use crate::participant::Participant;
use crate::storage::ResultSink;
use std::time::Duration;
use tracing::{debug, warn};

pub const RESPONSE_PROMPT: &str = "Press Enter when you think the next tone would play...";
pub const RETRY_NOTICE: &str =
    "\nIt appears that you pressed enter before the final tone. \n\nPlease try again.";
pub const RETRY_PROMPT: &str = "Press enter to try again.";

/// Phase of a prediction trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    Start,
    Playing,
    AwaitingInput,
    Measured,
    Retry,
    Accepted,
}

/// Expected and measured delay of one completed trial, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialRecord {
    pub expected_delay: f64,
    pub measured_delay: f64,
}

impl TrialRecord {
    /// Signed prediction error: positive when the participant responded late.
    pub fn error(&self) -> f64 {
        self.measured_delay - self.expected_delay
    }
}

/// Result of [`run_trial`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub record: TrialRecord,
    /// Number of times the sequence was played, including retries
    pub attempts: usize,
}

/// Runs one prediction trial to completion.
///
/// The sequence is replayed until the measured response time is nonzero. Only
/// the accepted measurement is written to `sink`.
pub fn run_trial<P, C, U>(
    sequence: &Sequence,
    player: &mut P,
    clock: &C,
    participant: &mut U,
    sink: Option<&mut dyn ResultSink>,
) -> Result<TrialOutcome, ExperimentError>
where
    P: TonePlayer + ?Sized,
    C: Clock + ?Sized,
    U: Participant + ?Sized,
{
    let mut state = TrialState::Start;
    let mut attempts = 0;
    let mut measured = Duration::ZERO;

    while state != TrialState::Accepted {
        debug!(?state, delay = sequence.delay, attempts, "prediction trial");
        state = match state {
            TrialState::Start => {
                attempts += 1;
                TrialState::Playing
            }
            TrialState::Playing => {
                sequence.play(player, clock)?;
                TrialState::AwaitingInput
            }
            TrialState::AwaitingInput => {
                let started = clock.now();
                participant.confirm(RESPONSE_PROMPT)?;
                measured = clock.now().saturating_duration_since(started);
                TrialState::Measured
            }
            TrialState::Measured if measured.is_zero() => TrialState::Retry,
            TrialState::Measured => TrialState::Accepted,
            TrialState::Retry => {
                warn!(attempts, "zero response time, replaying sequence");
                participant.show(RETRY_NOTICE)?;
                participant.acknowledge(RETRY_PROMPT)?;
                TrialState::Start
            }
            TrialState::Accepted => TrialState::Accepted,
        };
    }

    let record = TrialRecord {
        expected_delay: sequence.delay,
        measured_delay: measured.as_secs_f64(),
    };
    debug!(
        expected = record.expected_delay,
        measured = record.measured_delay,
        "trial accepted"
    );
    if let Some(sink) = sink {
        sink.record(&record)?;
    }

    Ok(TrialOutcome { record, attempts })
}

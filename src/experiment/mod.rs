//! The interval prediction experiment.
//!
//! - `Sequence` plays evenly spaced tones
//! - `run_trial` times one prediction, retrying on a zero measurement
//! - `DelaySchedule` orders the expected delays of the test phase
//! - `TrialRunner` drives the practice and test phases

mod clock;
mod runner;
mod schedule;
mod sequence;
mod trial;

pub use clock::{Clock, ManualClock, SystemClock};
pub use runner::{SessionSummary, TrialRunner};
pub use schedule::DelaySchedule;
pub use sequence::Sequence;
pub use trial::{
    RESPONSE_PROMPT, RETRY_NOTICE, RETRY_PROMPT, TrialOutcome, TrialRecord, TrialState, run_trial,
};

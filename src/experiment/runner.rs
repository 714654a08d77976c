//! Practice and test phases of a session.

use super::clock::Clock;
use super::schedule::DelaySchedule;
use super::trial::{TrialOutcome, TrialRecord, run_trial};
use crate::audio::TonePlayer;
use crate::config::ExperimentConfig;
use crate::error::ExperimentError;
use crate::participant::Participant;
use crate::storage::{CsvLog, ResultSink};
use rand::Rng;
use tracing::info;

/// Aggregate of the recorded trials of one session, for the operator's log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub trials: usize,
    /// Sequence replays caused by zero-length responses
    pub retries: usize,
    /// Mean of |measured − expected| in seconds, if any trial was recorded
    pub mean_absolute_error: Option<f64>,
}

impl SessionSummary {
    fn from_outcomes(outcomes: &[TrialOutcome]) -> Self {
        let trials = outcomes.len();
        let retries = outcomes.iter().map(|o| o.attempts.saturating_sub(1)).sum();
        let mean_absolute_error = (trials > 0).then(|| {
            outcomes
                .iter()
                .map(|o| o.record.error().abs())
                .sum::<f64>()
                / trials as f64
        });
        Self {
            trials,
            retries,
            mean_absolute_error,
        }
    }
}

/// Drives a full session against an audio player, a clock and a participant.
pub struct TrialRunner<P, C, U> {
    config: ExperimentConfig,
    player: P,
    clock: C,
    participant: U,
}

impl<P, C, U> TrialRunner<P, C, U>
where
    P: TonePlayer,
    C: Clock,
    U: Participant,
{
    pub fn new(config: ExperimentConfig, player: P, clock: C, participant: U) -> Self {
        Self {
            config,
            player,
            clock,
            participant,
        }
    }

    pub fn participant(&self) -> &U {
        &self.participant
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Runs the whole session: welcome, practice, then the recorded test phase.
    ///
    /// The results file is opened (and its header written, if new) before the
    /// first test trial.
    pub fn run_session<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<SessionSummary, ExperimentError> {
        self.participant
            .show("Thank you for participating in my study!")?;

        if self.config.practice_trials > 0 {
            self.run_practice()?;
        }

        let schedule =
            DelaySchedule::shuffled(&self.config.test_delays, self.config.repetitions, rng);
        info!(delays = ?schedule.as_slice(), "test schedule");

        let mut log = CsvLog::open(&self.config.output)?;
        let outcomes = self.run_test(schedule, &mut log)?;

        let summary = SessionSummary::from_outcomes(&outcomes);
        info!(
            trials = summary.trials,
            retries = summary.retries,
            mean_absolute_error = summary.mean_absolute_error,
            output = %self.config.output.display(),
            "session complete"
        );
        Ok(summary)
    }

    /// Runs the practice trials at the practice delay. Nothing is persisted.
    pub fn run_practice(&mut self) -> Result<Vec<TrialRecord>, ExperimentError> {
        let count = self.config.practice_trials;
        let delay = self.config.practice_delay;
        let sequence = self.config.sequence(delay);
        info!(trials = count, delay, "starting practice phase");

        self.participant.show(&format!(
            "\nYou will now perform {count} practice trials with a delay of {delay} seconds between tones."
        ))?;

        let mut records = Vec::with_capacity(count);
        for trial in 1..=count {
            self.participant
                .show(&format!("\nPractice Trial {trial}/{count}:"))?;
            self.participant
                .acknowledge("\nPress Enter to start the practice trial.")?;

            let outcome = run_trial(
                &sequence,
                &mut self.player,
                &self.clock,
                &mut self.participant,
                None,
            )?;
            records.push(outcome.record);

            self.participant
                .show("\nGood job! Practice trial completed.\n")?;
        }
        Ok(records)
    }

    /// Runs one recorded trial per scheduled delay, in schedule order.
    pub fn run_test(
        &mut self,
        schedule: DelaySchedule,
        sink: &mut dyn ResultSink,
    ) -> Result<Vec<TrialOutcome>, ExperimentError> {
        let total = schedule.len();
        let num_tones = self.config.num_tones;
        info!(trials = total, "starting test phase");

        self.participant.show(
            "\nNow that you have completed the practice trials, you will begin the actual activity.",
        )?;
        self.participant.show(&format!(
            "You will try to predict when the next tone would sound in a sequence of {num_tones} regularly-spaced tones."
        ))?;
        self.participant.show(&format!(
            "After hearing {num_tones} tones, you will press the enter key when you think the next tone would sound."
        ))?;
        self.participant.show(&format!(
            "You will perform this activity {total} times. Your results will be recorded."
        ))?;
        self.participant
            .acknowledge("\nPress enter to begin the actual activity.")?;

        let mut outcomes = Vec::with_capacity(total);
        for (index, delay) in schedule.into_iter().enumerate() {
            let trial = index + 1;
            self.participant.show(&format!("\nTrial {trial}/{total}:"))?;

            let outcome = run_trial(
                &self.config.sequence(delay),
                &mut self.player,
                &self.clock,
                &mut self.participant,
                Some(&mut *sink),
            )?;
            info!(
                trial,
                expected = outcome.record.expected_delay,
                measured = outcome.record.measured_delay,
                "trial recorded"
            );
            outcomes.push(outcome);

            if trial < total {
                self.participant
                    .acknowledge("\nGood job! Press enter to continue to the next trial.")?;
            }
        }

        self.participant
            .show("\nThank you so much for participating in the study!")?;
        self.participant.show(
            "Please let the researcher know that you are done with the Time Interval Estimation Assessment.",
        )?;
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(expected_delay: f64, measured_delay: f64, attempts: usize) -> TrialOutcome {
        TrialOutcome {
            record: TrialRecord {
                expected_delay,
                measured_delay,
            },
            attempts,
        }
    }

    #[test]
    fn test_summary_of_outcomes() {
        let summary = SessionSummary::from_outcomes(&[
            outcome(0.5, 0.75, 1),
            outcome(1.0, 0.5, 3),
            outcome(1.5, 1.5, 1),
        ]);
        assert_eq!(summary.trials, 3);
        assert_eq!(summary.retries, 2);
        let mae = summary.mean_absolute_error.unwrap();
        assert!((mae - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = SessionSummary::from_outcomes(&[]);
        assert_eq!(summary.trials, 0);
        assert_eq!(summary.mean_absolute_error, None);
    }
}

//! Evenly spaced tone sequences.

use super::clock::Clock;
use crate::audio::TonePlayer;
use crate::error::ExperimentError;
use crate::synthesis::Tone;
use std::time::Duration;
use tracing::debug;

/// A run of identical tones separated by a fixed silent delay.
///
/// The sequence ends abruptly after the last tone; no delay follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// The tone repeated throughout the sequence
    pub tone: Tone,
    /// Synthesis sample rate in Hz
    pub sample_rate: u32,
    /// Number of tones (must be >= 1)
    pub num_tones: usize,
    /// Silence between consecutive tones, in seconds
    pub delay: f64,
}

impl Sequence {
    /// Expected wall-clock length: `num_tones × tone + (num_tones − 1) × delay`.
    ///
    /// Saturates at [`Duration::MAX`]; negative or NaN totals count as zero.
    pub fn expected_duration(&self) -> Duration {
        let gaps = self.num_tones.saturating_sub(1) as f64;
        let seconds = (self.num_tones as f64 * self.tone.duration + gaps * self.delay).max(0.0);
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }

    /// Plays the sequence, blocking until the final tone has finished.
    ///
    /// The tone is synthesized once and replayed for every position.
    pub fn play<P, C>(&self, player: &mut P, clock: &C) -> Result<(), ExperimentError>
    where
        P: TonePlayer + ?Sized,
        C: Clock + ?Sized,
    {
        if self.num_tones == 0 {
            return Err(ExperimentError::InvalidArgument(
                "a sequence needs at least one tone".to_string(),
            ));
        }
        let gap = Duration::try_from_secs_f64(self.delay).map_err(|_| {
            ExperimentError::InvalidArgument(format!(
                "inter-tone delay must be a non-negative number of seconds, got {}",
                self.delay
            ))
        })?;

        let buffer = self.tone.synthesize(self.sample_rate)?;
        for index in 0..self.num_tones {
            debug!(tone = index + 1, of = self.num_tones, "playing tone");
            player.play(&buffer)?;
            if index + 1 < self.num_tones {
                clock.sleep(gap);
            }
        }
        Ok(())
    }
}

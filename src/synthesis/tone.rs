//! Pure tone synthesis into 16-bit sample buffers.
//!
//! A [`Tone`] describes a short sine stimulus. [`Tone::synthesize`] renders it
//! at a given sample rate, normalizes the waveform so its largest magnitude
//! maps to `i16::MAX × volume`, and truncates every sample to `i16`.

use super::SineOscillator;
use crate::core::Signal;
use crate::error::ToneError;
use std::time::Duration;

/// Sample rate used for stimulus synthesis unless configured otherwise.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Duration of every tone in a sequence, in seconds.
pub const DEFAULT_TONE_DURATION: f64 = 0.1;

/// Largest buffer `synthesize` will allocate (about three minutes at 96 kHz).
pub const MAX_TONE_SAMPLES: usize = 1 << 24;

/// Parameters of a single pure tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz (must be > 0)
    pub frequency: f64,
    /// Duration in seconds (must be > 0)
    pub duration: f64,
    /// Peak level relative to full scale, in (0, 1]
    pub volume: f64,
}

impl Tone {
    /// Creates a full-volume tone.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonetime::Tone;
    ///
    /// let tone = Tone::new(440.0, 0.1);
    /// assert_eq!(tone.volume, 1.0);
    /// ```
    pub fn new(frequency: f64, duration: f64) -> Self {
        Self {
            frequency,
            duration,
            volume: 1.0,
        }
    }

    /// Sets the volume, returning the modified tone.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Checks that the parameters describe a synthesizable tone.
    pub fn validate(&self) -> Result<(), ToneError> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(ToneError::InvalidParameter(format!(
                "frequency must be a positive number of Hz, got {}",
                self.frequency
            )));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ToneError::InvalidParameter(format!(
                "duration must be a positive number of seconds, got {}",
                self.duration
            )));
        }
        if !(self.volume > 0.0 && self.volume <= 1.0) {
            return Err(ToneError::InvalidParameter(format!(
                "volume must be in (0, 1], got {}",
                self.volume
            )));
        }
        Ok(())
    }

    /// Number of samples the tone occupies at `sample_rate`.
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (sample_rate as f64 * self.duration).round() as usize
    }

    /// Renders the tone to a normalized 16-bit buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ToneError::InvalidParameter`] for out-of-range parameters or a
    /// zero sample rate, and [`ToneError::Silent`] when the rendered waveform has
    /// no content to normalize (for example a frequency that is a multiple of
    /// the sample rate).
    ///
    /// # Examples
    ///
    /// ```
    /// use tonetime::Tone;
    ///
    /// let buffer = Tone::new(440.0, 0.1).synthesize(44100).unwrap();
    /// assert_eq!(buffer.len(), 4410);
    /// assert!(buffer.peak() >= i16::MAX - 1);
    /// ```
    pub fn synthesize(&self, sample_rate: u32) -> Result<ToneBuffer, ToneError> {
        self.validate()?;
        if sample_rate == 0 {
            return Err(ToneError::InvalidParameter(
                "sample rate must be greater than zero".to_string(),
            ));
        }

        let count = sample_rate as f64 * self.duration;
        if count.round() > MAX_TONE_SAMPLES as f64 {
            return Err(ToneError::InvalidParameter(format!(
                "{} s at {sample_rate} Hz exceeds the {MAX_TONE_SAMPLES} sample limit",
                self.duration
            )));
        }

        let mut waveform = vec![0.0; self.sample_count(sample_rate)];
        SineOscillator::new(self.frequency, sample_rate).process(&mut waveform);

        let peak = waveform.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        if peak <= f64::EPSILON {
            return Err(ToneError::Silent);
        }

        let scale = self.volume * i16::MAX as f64 / peak;
        // `as` truncates toward zero and saturates at the i16 bounds
        let samples = waveform.iter().map(|s| (s * scale) as i16).collect();

        Ok(ToneBuffer {
            samples,
            sample_rate,
        })
    }
}

/// Mono 16-bit audio produced by [`Tone::synthesize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl ToneBuffer {
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length of the buffer.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> i16 {
        self.samples
            .iter()
            .map(|s| s.saturating_abs())
            .max()
            .unwrap_or(0)
    }

    /// Converts the samples to floating point in [-1.0, 1.0].
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples
            .iter()
            .map(|&s| s as f32 / i16::MAX as f32)
            .collect()
    }
}

//! Sine wave oscillator implementation.

use crate::core::{Pitched, Signal};
use std::f64::consts::PI;

/// A simple sine wave oscillator.
///
/// This oscillator generates a continuous sine wave at a specified frequency.
/// It maintains phase continuity across calls to `next_sample()` and starts at
/// phase zero, so the first sample is always `0.0`.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl SineOscillator {
    /// Creates a new sine oscillator.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    /// * `sample_rate` - Sample rate in Hz (must be > 0)
    ///
    /// # Examples
    ///
    /// ```
    /// use tonetime::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::new(440.0, 44100);
    /// assert_eq!(osc.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64, sample_rate: u32) -> Self {
        Self {
            phase: 0.0,
            phase_increment: frequency / sample_rate as f64,
            sample_rate,
        }
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Resets the oscillator to phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample = (self.phase * 2.0 * PI).sin();

        // Wrap to [0.0, 1.0)
        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        sample
    }
}

impl Pitched for SineOscillator {
    fn set_frequency(&mut self, frequency: f64) {
        self.phase_increment = frequency / self.sample_rate as f64;
    }

    fn frequency(&self) -> f64 {
        self.phase_increment * self.sample_rate as f64
    }
}

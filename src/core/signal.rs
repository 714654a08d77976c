//! Core signal trait and pitch control.
//!
//! This module provides the fundamental `Signal` trait that represents
//! any audio signal source that can generate samples one at a time.

/// Common interface for all signal sources.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Minimal trait for anything with a controllable pitch.
///
/// # Examples
///
/// ```
/// use tonetime::{Pitched, SineOscillator};
///
/// let mut osc = SineOscillator::new(440.0, 44100);
/// assert_eq!(osc.frequency(), 440.0);
///
/// osc.set_frequency(880.0);
/// assert_eq!(osc.frequency(), 880.0);
/// ```
pub trait Pitched {
    /// Sets the frequency of the signal in Hz.
    fn set_frequency(&mut self, freq: f64);

    /// Gets the current frequency of the signal in Hz.
    fn frequency(&self) -> f64;
}

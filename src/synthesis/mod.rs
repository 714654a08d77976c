//! Stimulus synthesis.
//!
//! This module provides:
//! - `SineOscillator`, a phase-accumulating sine generator
//! - `Tone` and `ToneBuffer`, the normalized 16-bit stimulus renderer

mod sine;
mod tone;

pub use sine::SineOscillator;
pub use tone::{DEFAULT_SAMPLE_RATE, DEFAULT_TONE_DURATION, MAX_TONE_SAMPLES, Tone, ToneBuffer};

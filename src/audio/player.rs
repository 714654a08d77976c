use crate::error::PlaybackError;
use crate::synthesis::ToneBuffer;

/// Blocking playback of synthesized tones.
pub trait TonePlayer {
    /// Plays `buffer` and returns once it has been fully rendered.
    fn play(&mut self, buffer: &ToneBuffer) -> Result<(), PlaybackError>;
}

/// Resamples mono audio with linear interpolation.
///
/// Used when the output device refuses the synthesis rate. The output length is
/// `round(len × to_rate / from_rate)`, so playback duration is preserved.
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == 0 || to_rate == 0 || samples.is_empty() {
        return Vec::new();
    }
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let out_len = (samples.len() as f64 * to_rate as f64 / from_rate as f64).round() as usize;
    let step = from_rate as f64 / to_rate as f64;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let position = i as f64 * step;
            let index = (position.floor() as usize).min(last);
            let frac = (position - index as f64) as f32;
            let a = samples[index];
            let b = samples[(index + 1).min(last)];
            a + (b - a) * frac
        })
        .collect()
}

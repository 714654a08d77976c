//! Stimulus export to WAV files.

use crate::synthesis::ToneBuffer;
use std::path::Path;

/// Writes `buffer` as a 16-bit mono PCM WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &ToneBuffer) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

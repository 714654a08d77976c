//! Host audio output through cpal.

use super::player::{TonePlayer, resample_linear};
use crate::error::PlaybackError;
use crate::synthesis::ToneBuffer;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample, StreamConfig};
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use tracing::{debug, error, info, warn};

/// Samples waiting for the audio callback, plus any fatal stream error.
#[derive(Default)]
struct Pending {
    queue: VecDeque<f32>,
    failure: Option<String>,
}

#[derive(Default)]
struct Shared {
    pending: Mutex<Pending>,
    drained: Condvar,
}

/// Plays tones on the default output device.
///
/// The stream is opened once and kept running; idle periods render silence.
/// [`TonePlayer::play`] queues a buffer and waits on a condition variable until
/// the audio callback has consumed every sample of it.
pub struct CpalPlayer {
    _stream: cpal::Stream,
    shared: Arc<Shared>,
    device_rate: u32,
}

impl CpalPlayer {
    /// Opens the default output device, preferring `sample_rate`.
    ///
    /// If the device does not support `sample_rate`, its default configuration
    /// is used and buffers are resampled before playback.
    pub fn open_default(sample_rate: u32) -> Result<Self, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PlaybackError::NoDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let supported = choose_config(&device, sample_rate)?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();
        info!(
            device = %device_name,
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            format = %sample_format,
            "opened audio output"
        );

        let shared = Arc::new(Shared::default());
        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, shared.clone())?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, shared.clone())?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, shared.clone())?,
            other => return Err(PlaybackError::UnsupportedFormat(other.to_string())),
        };
        stream
            .play()
            .map_err(|e| PlaybackError::Stream(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            shared,
            device_rate: config.sample_rate.0,
        })
    }
}

impl TonePlayer for CpalPlayer {
    fn play(&mut self, buffer: &ToneBuffer) -> Result<(), PlaybackError> {
        let samples = resample_linear(&buffer.to_f32(), buffer.sample_rate(), self.device_rate);
        debug!(samples = samples.len(), "queueing tone");

        let mut pending = self.shared.pending.lock().map_err(poisoned)?;
        pending.queue.extend(samples);
        loop {
            if let Some(failure) = pending.failure.take() {
                pending.queue.clear();
                return Err(PlaybackError::Stream(failure));
            }
            if pending.queue.is_empty() {
                return Ok(());
            }
            pending = self.shared.drained.wait(pending).map_err(poisoned)?;
        }
    }
}

fn poisoned<T>(_: T) -> PlaybackError {
    PlaybackError::Stream("playback state poisoned".to_string())
}

/// Picks a mono-first configuration that supports `sample_rate`, falling back
/// to the device default.
fn choose_config(
    device: &cpal::Device,
    sample_rate: u32,
) -> Result<cpal::SupportedStreamConfig, PlaybackError> {
    let configs = device
        .supported_output_configs()
        .map_err(|e| PlaybackError::Config(e.to_string()))?;

    let matching = configs
        .filter(|range| {
            range.min_sample_rate().0 <= sample_rate && sample_rate <= range.max_sample_rate().0
        })
        .filter(|range| {
            matches!(
                range.sample_format(),
                SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16
            )
        })
        .min_by_key(|range| range.channels());

    match matching {
        Some(range) => Ok(range.with_sample_rate(cpal::SampleRate(sample_rate))),
        None => {
            warn!(
                sample_rate,
                "output device does not support the synthesis rate, resampling"
            );
            device
                .default_output_config()
                .map_err(|e| PlaybackError::Config(e.to_string()))
        }
    }
}

/// Creates an output stream that drains the shared queue, duplicating each
/// mono sample across all device channels.
fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    shared: Arc<Shared>,
) -> Result<cpal::Stream, PlaybackError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let callback_shared = shared.clone();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let Ok(mut pending) = callback_shared.pending.lock() else {
                    data.fill(T::EQUILIBRIUM);
                    return;
                };
                let had_samples = !pending.queue.is_empty();
                for frame in data.chunks_mut(channels) {
                    let value = T::from_sample(pending.queue.pop_front().unwrap_or(0.0));
                    for sample in frame.iter_mut() {
                        *sample = value;
                    }
                }
                if had_samples && pending.queue.is_empty() {
                    callback_shared.drained.notify_all();
                }
            },
            move |err| {
                error!("audio stream error: {}", err);
                if let cpal::StreamError::DeviceNotAvailable = err
                    && let Ok(mut pending) = shared.pending.lock()
                {
                    pending.failure = Some(err.to_string());
                    shared.drained.notify_all();
                }
            },
            None,
        )
        .map_err(|e| PlaybackError::Stream(e.to_string()))
}

//! Test doubles for driving sessions without audio hardware or a person.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;
use tonetime::{ExperimentError, ManualClock, Participant, PlaybackError, ToneBuffer, TonePlayer};

/// A player that "plays" by advancing the shared clock by the buffer length.
pub struct ClockedPlayer<'a> {
    clock: &'a ManualClock,
    pub plays: usize,
}

impl<'a> ClockedPlayer<'a> {
    pub fn new(clock: &'a ManualClock) -> Self {
        Self { clock, plays: 0 }
    }
}

impl TonePlayer for ClockedPlayer<'_> {
    fn play(&mut self, buffer: &ToneBuffer) -> Result<(), PlaybackError> {
        self.plays += 1;
        self.clock.advance(buffer.duration());
        Ok(())
    }
}

/// A player with no device behind it.
pub struct UnpluggedPlayer;

impl TonePlayer for UnpluggedPlayer {
    fn play(&mut self, _: &ToneBuffer) -> Result<(), PlaybackError> {
        Err(PlaybackError::NoDevice)
    }
}

/// A participant who answers after scripted latencies.
///
/// Once the script runs out every response takes `default_latency`.
pub struct ScriptedParticipant<'a> {
    clock: &'a ManualClock,
    latencies: VecDeque<Duration>,
    default_latency: Duration,
    pub shown: Vec<String>,
    pub acknowledgements: Vec<String>,
    pub confirmations: usize,
}

impl<'a> ScriptedParticipant<'a> {
    pub fn new(clock: &'a ManualClock) -> Self {
        Self {
            clock,
            latencies: VecDeque::new(),
            default_latency: Duration::from_millis(900),
            shown: Vec::new(),
            acknowledgements: Vec::new(),
            confirmations: 0,
        }
    }

    pub fn with_latencies(mut self, latencies: impl IntoIterator<Item = Duration>) -> Self {
        self.latencies.extend(latencies);
        self
    }
}

impl Participant for ScriptedParticipant<'_> {
    fn show(&mut self, message: &str) -> Result<(), ExperimentError> {
        self.shown.push(message.to_string());
        Ok(())
    }

    fn acknowledge(&mut self, prompt: &str) -> Result<(), ExperimentError> {
        self.acknowledgements.push(prompt.to_string());
        Ok(())
    }

    fn confirm(&mut self, _prompt: &str) -> Result<(), ExperimentError> {
        self.confirmations += 1;
        let latency = self.latencies.pop_front().unwrap_or(self.default_latency);
        self.clock.advance(latency);
        Ok(())
    }
}

/// Parses a results file into its header and (expected, measured) rows.
pub fn read_results(path: &std::path::Path) -> (Vec<String>, Vec<(f64, f64)>) {
    let text = std::fs::read_to_string(path).unwrap();
    let mut headers = Vec::new();
    let mut rows = Vec::new();
    for line in text.lines() {
        let (left, right) = line.split_once(',').unwrap();
        match (left.parse::<f64>(), right.parse::<f64>()) {
            (Ok(expected), Ok(measured)) => rows.push((expected, measured)),
            _ => headers.push(line.to_string()),
        }
    }
    (headers, rows)
}

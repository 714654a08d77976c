//! Experiment parameters.
//!
//! Every field defaults to the reference experiment, so an empty TOML file (or
//! no file at all) reproduces it exactly.

use crate::error::ConfigError;
use crate::experiment::Sequence;
use crate::participant::InputMode;
use crate::storage::DEFAULT_RESULTS_PATH;
use crate::synthesis::{DEFAULT_SAMPLE_RATE, DEFAULT_TONE_DURATION, Tone};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file read from the working directory when present.
pub const DEFAULT_CONFIG_PATH: &str = "tonetime.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Tones per sequence
    pub num_tones: usize,
    /// Tone frequency in Hz
    pub frequency: f64,
    /// Tone level in (0, 1]
    pub volume: f64,
    /// Length of each tone in seconds
    pub tone_duration: f64,
    /// Synthesis sample rate in Hz
    pub sample_rate: u32,
    /// Number of practice trials; zero skips the practice phase
    pub practice_trials: usize,
    /// Inter-tone delay used in practice, in seconds
    pub practice_delay: f64,
    /// Distinct inter-tone delays of the test phase, in seconds
    pub test_delays: Vec<f64>,
    /// How many times each test delay is presented
    pub repetitions: usize,
    /// Results file
    pub output: PathBuf,
    /// Seed for the schedule shuffle; `None` draws from the OS
    pub seed: Option<u64>,
    pub input_mode: InputMode,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_tones: 5,
            frequency: 440.0,
            volume: 1.0,
            tone_duration: DEFAULT_TONE_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE,
            practice_trials: 2,
            practice_delay: 0.75,
            test_delays: vec![0.5, 1.0, 1.5],
            repetitions: 4,
            output: PathBuf::from(DEFAULT_RESULTS_PATH),
            seed: None,
            input_mode: InputMode::Line,
        }
    }
}

impl ExperimentConfig {
    /// Reads and validates a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a runnable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_tones == 0 {
            return Err(ConfigError::Invalid(
                "num_tones must be at least 1".to_string(),
            ));
        }
        if self.test_delays.is_empty() {
            return Err(ConfigError::Invalid(
                "test_delays must not be empty".to_string(),
            ));
        }
        if self.repetitions == 0 {
            return Err(ConfigError::Invalid(
                "repetitions must be at least 1".to_string(),
            ));
        }
        let delays = std::iter::once(&self.practice_delay).chain(&self.test_delays);
        for &delay in delays {
            if Duration::try_from_secs_f64(delay).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "delays must be non-negative seconds, got {delay}"
                )));
            }
        }
        self.tone()
            .synthesize(self.sample_rate)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    /// The stimulus tone.
    pub fn tone(&self) -> Tone {
        Tone::new(self.frequency, self.tone_duration).with_volume(self.volume)
    }

    /// The sequence presented with inter-tone `delay`.
    pub fn sequence(&self, delay: f64) -> Sequence {
        Sequence {
            tone: self.tone(),
            sample_rate: self.sample_rate,
            num_tones: self.num_tones,
            delay,
        }
    }

    /// Number of test trials in one session.
    pub fn test_trial_count(&self) -> usize {
        self.test_delays.len() * self.repetitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_reference_experiment() {
        let config = ExperimentConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExperimentConfig::default());
        assert_eq!(config.num_tones, 5);
        assert_eq!(config.frequency, 440.0);
        assert_eq!(config.practice_trials, 2);
        assert_eq!(config.practice_delay, 0.75);
        assert_eq!(config.test_delays, vec![0.5, 1.0, 1.5]);
        assert_eq!(config.test_trial_count(), 12);
        assert_eq!(config.output, PathBuf::from("tone_data.csv"));
    }

    #[test]
    fn test_partial_override() {
        let config = ExperimentConfig::from_toml_str(
            r#"
            frequency = 660.0
            test_delays = [0.4, 0.8]
            repetitions = 3
            output = "session.csv"
            seed = 99
            input_mode = "key"
            "#,
        )
        .unwrap();
        assert_eq!(config.frequency, 660.0);
        assert_eq!(config.test_trial_count(), 6);
        assert_eq!(config.output, PathBuf::from("session.csv"));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.input_mode, InputMode::Key);
        assert_eq!(config.num_tones, 5);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            ExperimentConfig::from_toml_str("tempo = 120"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "num_tones = 0",
            "test_delays = []",
            "repetitions = 0",
            "practice_delay = -1.0",
            "test_delays = [0.5, -0.5]",
            "practice_delay = 1e20",
            "test_delays = [0.5, 1e20]",
            "tone_duration = 1e30",
            "volume = 0.0",
            "frequency = 44100.0",
            "sample_rate = 0",
        ];
        for case in cases {
            assert!(
                matches!(
                    ExperimentConfig::from_toml_str(case),
                    Err(ConfigError::Invalid(_))
                ),
                "{case} should be rejected"
            );
        }
    }

    #[test]
    fn test_sequence_uses_config_tone() {
        let config = ExperimentConfig::default();
        let sequence = config.sequence(1.5);
        assert_eq!(sequence.num_tones, 5);
        assert_eq!(sequence.delay, 1.5);
        assert_eq!(sequence.tone, Tone::new(440.0, 0.1));
        assert_eq!(sequence.sample_rate, 44_100);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tonetime.toml");
        fs::write(&path, "num_tones = 7\n").unwrap();
        assert_eq!(ExperimentConfig::load(&path).unwrap().num_tones, 7);
    }
}

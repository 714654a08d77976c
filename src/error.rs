use thiserror::Error;

/// Errors produced while synthesizing a tone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToneError {
    #[error("Invalid tone parameter: {0}")]
    InvalidParameter(String),
    #[error("Tone is silent: the waveform has no non-zero samples to normalize")]
    Silent,
}

/// Errors produced by an audio output backend.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("No audio output device available")]
    NoDevice,
    #[error("Audio device configuration failed: {0}")]
    Config(String),
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
    #[error("Audio stream error: {0}")]
    Stream(String),
}

/// Errors produced while loading or validating the experiment configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that abort an experiment session.
#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("Tone error: {0}")]
    Tone(#[from] ToneError),
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Session interrupted by the participant")]
    Interrupted,
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

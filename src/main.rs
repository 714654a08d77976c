//! Tonetime CLI - runs one interval timing session at the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tonetime::config::DEFAULT_CONFIG_PATH;
use tonetime::{ExperimentConfig, InputMode};
use tracing::{Level, debug};

#[derive(Parser, Debug)]
#[command(name = "tonetime")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config (defaults to ./tonetime.toml when it exists)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Results CSV file (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the test schedule shuffle (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// How to read the participant's responses (overrides config)
    #[arg(long, value_enum)]
    input_mode: Option<InputMode>,

    /// Go straight to the recorded test phase
    #[arg(long, default_value_t = false)]
    skip_practice: bool,

    /// Write the stimulus tone to a WAV file and exit (needs the `wav-export` feature)
    #[arg(long, value_name = "WAV_PATH")]
    export_tone: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    // Logs go to stderr so they never interleave with participant prompts
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    let config = load_config(&args)?;
    debug!(?config, "configuration");

    if export_tone(&args, &config)? {
        return Ok(());
    }

    run(config)
}

/// Handles `--export-tone`, returning whether the session should be skipped.
#[cfg(feature = "wav-export")]
fn export_tone(args: &Args, config: &ExperimentConfig) -> Result<bool> {
    let Some(path) = &args.export_tone else {
        return Ok(false);
    };
    let buffer = config.tone().synthesize(config.sample_rate)?;
    tonetime::audio::write_wav(path, &buffer)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} samples to {}", buffer.len(), path.display());
    Ok(true)
}

#[cfg(not(feature = "wav-export"))]
fn export_tone(args: &Args, _config: &ExperimentConfig) -> Result<bool> {
    if args.export_tone.is_some() {
        anyhow::bail!("tonetime was built without the `wav-export` feature");
    }
    Ok(false)
}

fn load_config(args: &Args) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            ExperimentConfig::load(DEFAULT_CONFIG_PATH)
                .with_context(|| format!("Failed to load config {DEFAULT_CONFIG_PATH}"))?
        }
        None => ExperimentConfig::default(),
    };

    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(mode) = args.input_mode {
        config.input_mode = mode;
    }
    if args.skip_practice {
        config.practice_trials = 0;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(feature = "playback")]
fn run(config: ExperimentConfig) -> Result<()> {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tonetime::{ConsoleParticipant, CpalPlayer, SystemClock, TrialRunner};

    let player = CpalPlayer::open_default(config.sample_rate)
        .context("Failed to open audio output")?;
    let participant = ConsoleParticipant::stdio(config.input_mode);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut runner = TrialRunner::new(config, player, SystemClock, participant);
    runner.run_session(&mut rng).context("Session aborted")?;
    Ok(())
}

#[cfg(not(feature = "playback"))]
fn run(_config: ExperimentConfig) -> Result<()> {
    anyhow::bail!("tonetime was built without the `playback` feature; no audio output is available")
}

//! Audio output.
//!
//! The experiment only ever needs one operation from an audio backend: play a
//! buffer and block until it has finished. [`TonePlayer`] is that seam;
//! [`CpalPlayer`] implements it on the host's default output device.

mod player;

#[cfg(feature = "playback")]
mod output;
#[cfg(feature = "wav-export")]
mod wav;

pub use player::{TonePlayer, resample_linear};

#[cfg(feature = "playback")]
pub use output::CpalPlayer;
#[cfg(feature = "wav-export")]
pub use wav::write_wav;

//! Core signal processing traits.
//!
//! This module provides the abstractions the synthesis code is built on:
//! - `Signal` trait for anything that produces samples
//! - `Pitched` trait for signals with a controllable frequency

mod signal;

pub use signal::{Pitched, Signal};

//! Playback: the controller state machine and the rodio-backed player
//! thread that drives the single shared audio output.

mod controller;
mod output;
mod types;

pub use controller::{AudioOutput, Controller};
pub use output::Player;
pub use types::{PlaybackError, PlaybackHandle, PlaybackInfo, PlayerCmd};

#[cfg(test)]
mod tests;

//! Player-related small types and handles.
//!
//! This module defines the command enum, playback info published to the
//! UI, and the error type raised by the audio output.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

/// Failures raised by the audio output resource.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
    #[error("play requested with no source loaded")]
    NoSource,
}

#[derive(Debug)]
pub enum PlayerCmd {
    /// Select the track at the given sequence position: toggles pause when
    /// it is the current one, jumps and plays otherwise.
    Select(usize),
    /// Stop playback and return to idle.
    Stop,
    /// Replace the active track sequence. Resets to idle.
    SetTracks(Vec<PathBuf>),
    /// Quit the player thread.
    Quit,
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Position of the current track in the active sequence (if any).
    pub index: Option<usize>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Last playback failure, shown in the status line until the next
    /// successful transition.
    pub error: Option<String>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            index: None,
            elapsed: Duration::ZERO,
            playing: false,
            error: None,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

//! The playback controller: a small state machine that keeps "which track
//! is current" and "is it playing" consistent with user intent and with
//! end-of-track notifications from the audio output.
//!
//! The controller is pure over the [`AudioOutput`] capability so the
//! transition rules can be unit-tested with a fake output.

use std::path::{Path, PathBuf};

use super::types::PlaybackError;

/// The single shared audio output resource, reduced to what the
/// controller needs. Exactly one source can be loaded at a time; a
/// `set_source` supersedes whatever was playing before it.
pub trait AudioOutput {
    fn set_source(&mut self, source: &Path) -> Result<(), PlaybackError>;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn stop(&mut self);
}

/// States: idle (`current == None`), playing(i), paused(i).
///
/// Invariant: `playing == true` implies `current` holds a valid index
/// into the sequence.
pub struct Controller {
    sequence: Vec<PathBuf>,
    current: Option<usize>,
    playing: bool,
}

impl Controller {
    pub fn new(sequence: Vec<PathBuf>) -> Self {
        Self {
            sequence,
            current: None,
            playing: false,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Replace the active sequence. Playback stops and the controller
    /// returns to idle; indices from the old sequence mean nothing here.
    pub fn set_sequence(&mut self, sequence: Vec<PathBuf>, out: &mut impl AudioOutput) {
        self.sequence = sequence;
        self.stop(out);
    }

    /// Selecting the current track toggles pause; selecting any other
    /// track is an unconditional jump-and-play. The new source is fully
    /// assigned before the play request is issued.
    pub fn select_and_toggle(
        &mut self,
        pos: usize,
        out: &mut impl AudioOutput,
    ) -> Result<(), PlaybackError> {
        if pos >= self.sequence.len() {
            // Stale index from a superseded sequence.
            return Ok(());
        }

        if self.current == Some(pos) {
            if self.playing {
                out.pause();
                self.playing = false;
            } else {
                if let Err(e) = out.play() {
                    self.force_idle(out);
                    return Err(e);
                }
                self.playing = true;
            }
            return Ok(());
        }

        self.start(pos, out)
    }

    /// Move to the next track, auto-continuing playback. At the end of
    /// the sequence the controller goes idle; there is no wraparound.
    pub fn advance(&mut self, out: &mut impl AudioOutput) -> Result<(), PlaybackError> {
        let Some(i) = self.current else {
            return Ok(());
        };

        let next = i + 1;
        if next >= self.sequence.len() {
            self.stop(out);
            return Ok(());
        }

        self.start(next, out)
    }

    /// Hook for the output's "current item finished naturally"
    /// notification. The sole automatic transition.
    pub fn on_ended(&mut self, out: &mut impl AudioOutput) -> Result<(), PlaybackError> {
        self.advance(out)
    }

    /// Explicit transition to idle.
    pub fn stop(&mut self, out: &mut impl AudioOutput) {
        out.stop();
        self.current = None;
        self.playing = false;
    }

    fn start(&mut self, pos: usize, out: &mut impl AudioOutput) -> Result<(), PlaybackError> {
        if let Err(e) = out.set_source(&self.sequence[pos]) {
            self.force_idle(out);
            return Err(e);
        }
        if let Err(e) = out.play() {
            self.force_idle(out);
            return Err(e);
        }
        self.current = Some(pos);
        self.playing = true;
        Ok(())
    }

    // A failed output never leaves the controller claiming playback: the
    // displayed controls must not drift from actual audio state.
    fn force_idle(&mut self, out: &mut impl AudioOutput) {
        out.stop();
        self.current = None;
        self.playing = false;
    }
}

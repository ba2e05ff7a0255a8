//! The real audio output: a `rodio` sink on a dedicated player thread.
//!
//! The thread owns the output stream and the controller, receives
//! [`PlayerCmd`]s over a channel, and publishes [`PlaybackInfo`] through a
//! shared handle. End of track is detected by observing an empty sink on
//! the receive timeout, which triggers the controller's auto-advance.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::controller::{AudioOutput, Controller};
use super::types::{PlaybackError, PlaybackHandle, PlaybackInfo, PlayerCmd};

/// Handle owned by the main thread; commands in, shared playback info out.
pub struct Player {
    tx: Sender<PlayerCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn new(sequence: Vec<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let join = spawn_player_thread(sequence, rx, playback.clone());

        Self {
            tx,
            playback,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), mpsc::SendError<PlayerCmd>> {
        self.tx.send(cmd)
    }

    /// Ask the player thread to quit and wait for it.
    pub fn shutdown(&self) {
        let _ = self.send(PlayerCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

/// `rodio`-backed implementation of the output capability. One sink at a
/// time; reassigning the source stops whatever the old sink was playing.
struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
}

impl RodioOutput {
    fn new(stream: OutputStream) -> Self {
        Self { stream, sink: None }
    }

    /// True when a source was playing and has drained naturally.
    fn finished(&self) -> bool {
        self.sink.as_ref().map(|s| s.empty()).unwrap_or(false)
    }
}

impl AudioOutput for RodioOutput {
    fn set_source(&mut self, source: &Path) -> Result<(), PlaybackError> {
        if let Some(s) = self.sink.take() {
            s.stop();
        }

        let file = File::open(source).map_err(|e| PlaybackError::Open {
            path: source.to_path_buf(),
            source: e,
        })?;
        let decoded = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
            path: source.to_path_buf(),
            source: e,
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(decoded);
        sink.pause();
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        match self.sink.as_ref() {
            Some(s) => {
                s.play();
                Ok(())
            }
            None => Err(PlaybackError::NoSource),
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }
}

/// Wall-clock elapsed time for the current track, accumulated across
/// pause spans.
struct Clock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Clock {
    fn new() -> Self {
        Self {
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    fn start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started_at = Some(Instant::now());
    }

    fn pause(&mut self) {
        if let Some(at) = self.started_at.take() {
            self.accumulated += at.elapsed();
        }
    }

    fn resume(&mut self) {
        self.started_at = Some(Instant::now());
    }

    fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(at) => self.accumulated + at.elapsed(),
            None => self.accumulated,
        }
    }
}

type Snapshot = (Option<usize>, bool);

fn snapshot(ctl: &Controller) -> Snapshot {
    (ctl.current(), ctl.is_playing())
}

/// Derive the clock transition from a controller transition: track change
/// restarts the clock, play/pause with an unchanged track resumes/pauses it.
fn sync_clock(clock: &mut Clock, before: Snapshot, after: Snapshot) {
    if after.0 != before.0 {
        if after.0.is_some() {
            clock.start();
        } else {
            clock.reset();
        }
    } else if after.1 && !before.1 {
        clock.resume();
    } else if !after.1 && before.1 {
        clock.pause();
    }
}

fn publish(
    info: &PlaybackHandle,
    ctl: &Controller,
    clock: &Clock,
    error: Option<&PlaybackError>,
) {
    if let Ok(mut i) = info.lock() {
        i.index = ctl.current();
        i.playing = ctl.is_playing();
        i.elapsed = clock.elapsed();
        i.error = error.map(|e| e.to_string());
    }
}

fn spawn_player_thread(
    sequence: Vec<PathBuf>,
    rx: Receiver<PlayerCmd>,
    info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut out = RodioOutput::new(stream);
        let mut ctl = Controller::new(sequence);
        let mut clock = Clock::new();

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(PlayerCmd::Select(pos)) => {
                    let before = snapshot(&ctl);
                    let result = ctl.select_and_toggle(pos, &mut out);
                    sync_clock(&mut clock, before, snapshot(&ctl));
                    if let Err(ref e) = result {
                        tracing::warn!(error = %e, "playback failed to start");
                    }
                    publish(&info, &ctl, &clock, result.as_ref().err());
                }
                Ok(PlayerCmd::Stop) => {
                    ctl.stop(&mut out);
                    clock.reset();
                    publish(&info, &ctl, &clock, None);
                }
                Ok(PlayerCmd::SetTracks(tracks)) => {
                    ctl.set_sequence(tracks, &mut out);
                    clock.reset();
                    publish(&info, &ctl, &clock, None);
                }
                Ok(PlayerCmd::Quit) => {
                    out.stop();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    if ctl.is_playing() && out.finished() {
                        // Natural end of the current item: auto-advance,
                        // ending idle after the last track.
                        let before = snapshot(&ctl);
                        let result = ctl.on_ended(&mut out);
                        sync_clock(&mut clock, before, snapshot(&ctl));
                        if let Err(ref e) = result {
                            tracing::warn!(error = %e, "auto-advance failed");
                        }
                        publish(&info, &ctl, &clock, result.as_ref().err());
                    } else if let Ok(mut i) = info.lock() {
                        i.elapsed = clock.elapsed();
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

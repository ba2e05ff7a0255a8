use std::path::{Path, PathBuf};

use super::controller::{AudioOutput, Controller};
use super::types::PlaybackError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    SetSource(PathBuf),
    Play,
    Pause,
    Stop,
}

/// Fake output that records every call and can be told to fail.
#[derive(Default)]
struct FakeOutput {
    ops: Vec<Op>,
    fail_set_source: bool,
    fail_play: bool,
}

impl AudioOutput for FakeOutput {
    fn set_source(&mut self, source: &Path) -> Result<(), PlaybackError> {
        if self.fail_set_source {
            return Err(PlaybackError::Open {
                path: source.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            });
        }
        self.ops.push(Op::SetSource(source.to_path_buf()));
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.fail_play {
            return Err(PlaybackError::NoSource);
        }
        self.ops.push(Op::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.ops.push(Op::Pause);
    }

    fn stop(&mut self) {
        self.ops.push(Op::Stop);
    }
}

fn seq(n: usize) -> Vec<PathBuf> {
    (0..n).map(|i| PathBuf::from(format!("/t/{i}.mp3"))).collect()
}

fn assert_invariant(ctl: &Controller, len: usize) {
    if ctl.is_playing() {
        let i = ctl.current().expect("playing without a current track");
        assert!(i < len, "playing with dangling index {i}");
    }
}

#[test]
fn playing_always_implies_a_valid_index() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(3));

    for pos in [0usize, 2, 2, 1, 1, 1, 0, 2] {
        ctl.select_and_toggle(pos, &mut out).unwrap();
        assert_invariant(&ctl, 3);
    }
}

#[test]
fn double_select_toggles_pause_and_keeps_the_index() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(3));

    ctl.select_and_toggle(1, &mut out).unwrap();
    assert_eq!(ctl.current(), Some(1));
    assert!(ctl.is_playing());

    ctl.select_and_toggle(1, &mut out).unwrap();
    assert_eq!(ctl.current(), Some(1));
    assert!(!ctl.is_playing());

    ctl.select_and_toggle(1, &mut out).unwrap();
    assert_eq!(ctl.current(), Some(1));
    assert!(ctl.is_playing());

    // Resume must not reassign the source: only the first select loads it.
    let loads = out
        .ops
        .iter()
        .filter(|o| matches!(o, Op::SetSource(_)))
        .count();
    assert_eq!(loads, 1);
}

#[test]
fn selecting_another_track_always_ends_playing() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(3));

    // From playing.
    ctl.select_and_toggle(0, &mut out).unwrap();
    ctl.select_and_toggle(2, &mut out).unwrap();
    assert_eq!(ctl.current(), Some(2));
    assert!(ctl.is_playing());

    // From paused: a different selection jumps and plays, never pauses.
    ctl.select_and_toggle(2, &mut out).unwrap();
    assert!(!ctl.is_playing());
    ctl.select_and_toggle(1, &mut out).unwrap();
    assert_eq!(ctl.current(), Some(1));
    assert!(ctl.is_playing());
}

#[test]
fn jump_assigns_the_source_before_playing() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(2));

    ctl.select_and_toggle(1, &mut out).unwrap();
    assert_eq!(
        out.ops,
        vec![Op::SetSource(PathBuf::from("/t/1.mp3")), Op::Play]
    );
}

#[test]
fn three_track_walkthrough_ends_idle_without_wrap() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(3));

    ctl.select_and_toggle(0, &mut out).unwrap();
    assert_eq!(ctl.current(), Some(0));

    ctl.on_ended(&mut out).unwrap();
    assert_eq!(ctl.current(), Some(1));
    assert!(ctl.is_playing());

    ctl.on_ended(&mut out).unwrap();
    assert_eq!(ctl.current(), Some(2));
    assert!(ctl.is_playing());

    ctl.on_ended(&mut out).unwrap();
    assert_eq!(ctl.current(), None);
    assert!(!ctl.is_playing());

    // Idle stays idle: no wraparound to index 0.
    ctl.on_ended(&mut out).unwrap();
    assert_eq!(ctl.current(), None);
    assert!(!ctl.is_playing());

    let sources: Vec<&Op> = out
        .ops
        .iter()
        .filter(|o| matches!(o, Op::SetSource(_)))
        .collect();
    assert_eq!(
        sources,
        vec![
            &Op::SetSource(PathBuf::from("/t/0.mp3")),
            &Op::SetSource(PathBuf::from("/t/1.mp3")),
            &Op::SetSource(PathBuf::from("/t/2.mp3")),
        ]
    );
}

#[test]
fn advance_while_idle_is_a_no_op() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(3));

    ctl.advance(&mut out).unwrap();
    assert_eq!(ctl.current(), None);
    assert!(out.ops.is_empty());
}

#[test]
fn ended_while_paused_still_advances() {
    // The "ended" notification only fires for natural completion, which
    // cannot race a pause in the single-writer model; the controller
    // nevertheless handles it by advancing from the current index.
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(2));

    ctl.select_and_toggle(0, &mut out).unwrap();
    ctl.select_and_toggle(0, &mut out).unwrap(); // paused
    ctl.on_ended(&mut out).unwrap();
    assert_eq!(ctl.current(), Some(1));
    assert!(ctl.is_playing());
}

#[test]
fn play_failure_forces_idle() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(2));

    out.fail_play = true;
    assert!(ctl.select_and_toggle(0, &mut out).is_err());
    assert_eq!(ctl.current(), None);
    assert!(!ctl.is_playing());
    assert_invariant(&ctl, 2);
}

#[test]
fn source_failure_forces_idle_even_mid_playback() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(3));

    ctl.select_and_toggle(0, &mut out).unwrap();
    out.fail_set_source = true;
    assert!(ctl.select_and_toggle(1, &mut out).is_err());
    assert_eq!(ctl.current(), None);
    assert!(!ctl.is_playing());
}

#[test]
fn stop_returns_to_idle() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(3));

    ctl.select_and_toggle(2, &mut out).unwrap();
    ctl.stop(&mut out);
    assert_eq!(ctl.current(), None);
    assert!(!ctl.is_playing());
    assert_eq!(out.ops.last(), Some(&Op::Stop));
}

#[test]
fn set_sequence_supersedes_playback_and_old_indices() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(seq(3));

    ctl.select_and_toggle(2, &mut out).unwrap();
    ctl.set_sequence(seq(1), &mut out);
    assert_eq!(ctl.current(), None);
    assert!(!ctl.is_playing());

    // Index 2 is stale against the one-track sequence: ignored.
    ctl.select_and_toggle(2, &mut out).unwrap();
    assert_eq!(ctl.current(), None);

    ctl.select_and_toggle(0, &mut out).unwrap();
    assert_eq!(ctl.current(), Some(0));
    assert!(ctl.is_playing());
}

#[test]
fn empty_sequence_never_plays() {
    let mut out = FakeOutput::default();
    let mut ctl = Controller::new(Vec::new());

    ctl.select_and_toggle(0, &mut out).unwrap();
    assert_eq!(ctl.current(), None);
    assert!(!ctl.is_playing());
    assert!(out.ops.is_empty());
}

use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState, Route, Screen};
use crate::catalog;
use crate::config;
use crate::player::{Player, PlayerCmd};
use crate::storage::{UploadEvent, UploadJob, Uploader};
use crate::ui;

/// Main terminal event loop: handles input, UI drawing and sync with the
/// player and upload worker threads. Returns `Ok(())` on quit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    uploader: &Uploader,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Fold finished uploads into the upload screen if it is still
        // mounted; otherwise just surface the outcome in the status box.
        while let Some(ev) = uploader.poll_event() {
            match &mut app.screen {
                Screen::Upload(state) => {
                    let msg = state.apply_event(ev);
                    app.set_status(msg);
                    app.mark_sequence_dirty();
                }
                _ => match ev {
                    UploadEvent::Completed(track) => {
                        app.set_status(format!(
                            "{} has been uploaded to the {} section",
                            track.title,
                            track.section.name()
                        ));
                    }
                    UploadEvent::Failed { title, error, .. } => {
                        app.set_status(format!("Failed to upload {title}: {error}"));
                    }
                },
            }
        }

        // Keep the player thread's sequence in sync with the mounted screen.
        if app.sequence_dirty {
            let _ = player.send(PlayerCmd::SetTracks(app.current_sequence()));
            app.clear_sequence_dirty();
        }

        // Mirror playback state from the player thread.
        if let Some(handle) = app.playback_handle.as_ref().cloned() {
            if let Ok(info) = handle.lock() {
                app.playback = match (info.index, info.playing) {
                    (None, _) => PlaybackState::Stopped,
                    (Some(_), true) => PlaybackState::Playing,
                    (Some(_), false) => PlaybackState::Paused,
                };
            }
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, uploader)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Navigate and run any per-screen entry work.
fn goto(app: &mut App, route: Route, settings: &config::Settings) {
    app.navigate(route);
    if route == Route::Upload {
        rescan_staging(app, settings);
    }
}

fn rescan_staging(app: &mut App, settings: &config::Settings) {
    let (staged, rejected) = catalog::scan_staging(
        Path::new(&settings.upload.staging_dir),
        &settings.upload,
    );
    if let Screen::Upload(state) = &mut app.screen {
        state.set_staging(staged, rejected);
    }
}

/// Persist the chosen language and continue to the playlist.
fn choose_language(app: &mut App, code: &str, settings: &config::Settings) {
    if let Err(e) = crate::prefs::store_language(code) {
        tracing::warn!(error = %e, "failed to persist language");
    }
    app.set_language(code);
    goto(app, Route::Playlist, settings);
    app.set_status(format!("Language set to {code}"));
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    uploader: &Uploader,
) -> Result<bool, Box<dyn std::error::Error>> {
    if key.code == KeyCode::Char('q') {
        return Ok(true);
    }

    match &mut app.screen {
        Screen::Welcome(state) => match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.next(),
            KeyCode::Char('k') | KeyCode::Up => state.prev(),
            KeyCode::Enter => {
                let code = state.chosen().code;
                choose_language(app, code, settings);
            }
            KeyCode::Char('l') => goto(app, Route::Language, settings),
            KeyCode::Char('t') => goto(app, Route::Quiz, settings),
            KeyCode::Char('u') => goto(app, Route::Upload, settings),
            _ => {}
        },
        Screen::Language(state) => match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.next(),
            KeyCode::Char('k') | KeyCode::Up => state.prev(),
            KeyCode::Enter => {
                let code = state.chosen().code;
                choose_language(app, code, settings);
            }
            KeyCode::Esc => goto(app, Route::Welcome, settings),
            _ => {}
        },
        Screen::Playlist(state) => match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.next(app.catalog.len()),
            KeyCode::Char('k') | KeyCode::Up => state.prev(app.catalog.len()),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if !app.catalog.is_empty() {
                    let _ = player.send(PlayerCmd::Select(state.selected));
                }
            }
            KeyCode::Char('f') => {
                if let Some(track) = app.catalog.get(state.selected) {
                    state.toggle_favorite(track.id);
                }
            }
            KeyCode::Char('s') => {
                let _ = player.send(PlayerCmd::Stop);
            }
            KeyCode::Char('t') => goto(app, Route::Quiz, settings),
            KeyCode::Char('u') => goto(app, Route::Upload, settings),
            KeyCode::Esc => goto(app, Route::Welcome, settings),
            _ => {}
        },
        Screen::Quiz(state) => {
            if state.show_results {
                match key.code {
                    KeyCode::Char('r') => state.retake(),
                    KeyCode::Enter => goto(app, Route::Playlist, settings),
                    KeyCode::Esc => goto(app, Route::Welcome, settings),
                    _ => {}
                }
            } else {
                match key.code {
                    KeyCode::Char('j') | KeyCode::Down => state.next_option(),
                    KeyCode::Char('k') | KeyCode::Up => state.prev_option(),
                    KeyCode::Enter => state.answer(),
                    KeyCode::Esc => goto(app, Route::Welcome, settings),
                    _ => {}
                }
            }
        }
        Screen::Upload(state) => {
            use crate::screens::UploadFocus;
            match key.code {
                KeyCode::Tab => state.cycle_focus(),
                KeyCode::Char('j') | KeyCode::Down => state.next(),
                KeyCode::Char('k') | KeyCode::Up => state.prev(),
                KeyCode::Enter => match state.focus {
                    UploadFocus::Sections => {
                        let section = state.section();
                        app.set_status(format!("Uploads will go to the {} section", section.name()));
                    }
                    UploadFocus::Staged => {
                        if let Some(f) = state.selected_staged() {
                            match catalog::validate_upload(&f.path, &settings.upload) {
                                Ok(()) => {
                                    let title = f.title.clone();
                                    let _ = uploader.submit(UploadJob {
                                        file: f.path.clone(),
                                        title: title.clone(),
                                        section: state.section(),
                                    });
                                    state.in_flight += 1;
                                    app.set_status(format!("Uploading {title}…"));
                                }
                                Err(e) => app.set_status(format!("Cannot upload: {e}")),
                            }
                        }
                    }
                    UploadFocus::Uploaded => {
                        // Preview the uploaded track from its local copy.
                        if state.selected_uploaded().is_some() {
                            let _ = player.send(PlayerCmd::Select(state.uploaded_idx));
                        }
                    }
                },
                KeyCode::Char('a') => {
                    let section = state.section();
                    let mut sent = 0usize;
                    for f in &state.staged {
                        if catalog::validate_upload(&f.path, &settings.upload).is_ok() {
                            let _ = uploader.submit(UploadJob {
                                file: f.path.clone(),
                                title: f.title.clone(),
                                section,
                            });
                            sent += 1;
                        }
                    }
                    state.in_flight += sent;
                    app.set_status(format!("Uploading {sent} file(s)…"));
                }
                KeyCode::Char('r') => {
                    rescan_staging(app, settings);
                    app.set_status("Staging folder rescanned");
                }
                KeyCode::Char('d') => {
                    if state.focus == UploadFocus::Uploaded {
                        if app.playback != PlaybackState::Stopped {
                            let _ = player.send(PlayerCmd::Stop);
                        }
                        if let Some(removed) = state.remove_selected_uploaded() {
                            app.set_status(format!("Removed {}", removed.title));
                            app.mark_sequence_dirty();
                        }
                    }
                }
                KeyCode::Esc => goto(app, Route::Playlist, settings),
                _ => {}
            }
        }
    }

    Ok(false)
}

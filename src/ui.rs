//! UI rendering helpers for the terminal user interface.
//!
//! Each route gets its own body renderer; header, status box and the
//! controls footer are shared chrome.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackState, Route, Screen};
use crate::config::UiSettings;
use crate::lang::LANGUAGES;
use crate::screens::{
    LanguageState, PlaylistState, QuizState, UploadFocus, UploadState, WelcomeState,
};

/// Render the controls help text for the current route.
fn controls_text(route: Route) -> &'static str {
    match route {
        Route::Welcome => "[j/k] language | [enter] continue | [l] languages | [t] quiz | [u] upload | [q] quit",
        Route::Language => "[j/k] move | [enter] choose | [esc] back | [q] quit",
        Route::Playlist => {
            "[j/k] move | [enter/space] play/pause | [f] favorite | [s] stop | [t] quiz | [u] upload | [esc] welcome | [q] quit"
        }
        Route::Quiz => "[j/k] option | [enter] answer | [r] retake | [esc] welcome | [q] quit",
        Route::Upload => {
            "[tab] pane | [j/k] move | [enter] select/upload/preview | [a] upload all | [r] rescan | [d] delete | [esc] playlist | [q] quit"
        }
    }
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.0} KB", bytes as f64 / 1024.0)
    }
}

/// Build the status box contents: playback first, then the transient
/// notification, then the chosen language.
fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(ref h) = app.playback_handle {
        if let Ok(info) = h.lock() {
            match (info.index, app.playback) {
                (Some(idx), PlaybackState::Playing) | (Some(idx), PlaybackState::Paused) => {
                    let title = match &app.screen {
                        Screen::Upload(state) => state
                            .uploaded
                            .get(idx)
                            .map(|t| t.title.clone())
                            .unwrap_or_default(),
                        _ => app
                            .catalog
                            .get(idx)
                            .map(|t| t.title.clone())
                            .unwrap_or_default(),
                    };
                    let state = if app.playback == PlaybackState::Playing {
                        "Playing"
                    } else {
                        "Paused"
                    };
                    parts.push(format!(
                        "{state}: {title} [{}]",
                        format_mmss(info.elapsed)
                    ));
                }
                _ => parts.push("Stopped".to_string()),
            }
            if let Some(err) = &info.error {
                parts.push(format!("Playback error: {err}"));
            }
        }
    }

    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    if let Some(code) = &app.language {
        let label = crate::lang::by_code(code)
            .map(|l| l.native)
            .unwrap_or(code.as_str());
        parts.push(format!("Language: {label}"));
    }

    parts.join(" • ")
}

fn bordered(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.route.title())
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = Paragraph::new(status_text(app))
        .block(bordered(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    match &app.screen {
        Screen::Welcome(state) => draw_welcome(frame, chunks[2], state),
        Screen::Language(state) => draw_language(frame, chunks[2], state),
        Screen::Playlist(state) => draw_playlist(frame, chunks[2], app, state, ui_settings),
        Screen::Quiz(state) => draw_quiz(frame, chunks[2], state),
        Screen::Upload(state) => draw_upload(frame, chunks[2], state),
    }

    let footer = Paragraph::new(controls_text(app.route))
        .block(bordered(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_welcome(frame: &mut Frame, area: Rect, state: &WelcomeState) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(1)])
        .split(area);

    let hero = Paragraph::new(
        "Find your inner peace through sacred sounds\n\n\
         Curated meditation, chanting and healing frequencies.\n\
         Pick a language to begin.",
    )
    .alignment(Alignment::Center)
    .block(bordered(" welcome "));
    frame.render_widget(hero, halves[0]);

    render_language_list(frame, halves[1], " choose your language ", state.selected);
}

fn draw_language(frame: &mut Frame, area: Rect, state: &LanguageState) {
    render_language_list(frame, area, " languages ", state.selected);
}

fn render_language_list(frame: &mut Frame, area: Rect, title: &'static str, selected: usize) {
    let items: Vec<ListItem> = LANGUAGES
        .iter()
        .map(|l| ListItem::new(format!("{}  ({})", l.native, l.name)))
        .collect();

    let list = List::new(items)
        .block(bordered(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ratatui::widgets::ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_playlist(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    state: &PlaylistState,
    ui_settings: &UiSettings,
) {
    let items: Vec<ListItem> = app
        .catalog
        .iter()
        .map(|t| {
            let heart = if state.is_favorite(t.id) { "♥" } else { " " };
            let mut line = format!(
                "{heart} {} — {}  [{}]  ({})",
                t.title,
                t.artist,
                t.duration_label,
                t.category.name()
            );
            if ui_settings.show_descriptions {
                line.push_str("\n    ");
                line.push_str(&t.description);
            }
            ListItem::new(line)
        })
        .collect();

    let title = if state.favorite_count() > 0 {
        " tracks (♥ favorites) "
    } else {
        " tracks "
    };
    let list = List::new(items)
        .block(bordered(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ratatui::widgets::ListState::default();
    if !app.catalog.is_empty() {
        list_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_quiz(frame: &mut Frame, area: Rect, state: &QuizState) {
    if state.show_results {
        let profile = state.result();
        let text = format!(
            "{}\n\n{}\n\nRecommended: {}\n\n[r] retake • [enter] open the playlist",
            profile.title, profile.description, profile.recommendation
        );
        let card = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(bordered(" your path "))
            .wrap(Wrap { trim: true });
        frame.render_widget(card, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let gauge = Gauge::default()
        .block(bordered(" progress "))
        .percent(state.progress_percent());
    frame.render_widget(gauge, rows[0]);

    let question = Paragraph::new(state.question().prompt)
        .block(bordered(" question "))
        .wrap(Wrap { trim: true });
    frame.render_widget(question, rows[1]);

    let items: Vec<ListItem> = state
        .question()
        .options
        .iter()
        .map(|o| ListItem::new(o.label))
        .collect();
    let list = List::new(items)
        .block(bordered(" options "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ratatui::widgets::ListState::default();
    list_state.select(Some(state.selected_option));
    frame.render_stateful_widget(list, rows[2], &mut list_state);
}

fn draw_upload(frame: &mut Frame, area: Rect, state: &UploadState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(39),
            Constraint::Percentage(39),
        ])
        .split(area);

    let focus_style = Style::default().add_modifier(Modifier::REVERSED);
    let blur_style = Style::default().add_modifier(Modifier::DIM);

    // Section picker
    {
        let items: Vec<ListItem> = crate::catalog::Category::ALL
            .iter()
            .map(|c| ListItem::new(format!("{}\n  {}", c.name(), c.description())))
            .collect();
        let list = List::new(items)
            .block(bordered(" section "))
            .highlight_style(if state.focus == UploadFocus::Sections {
                focus_style
            } else {
                blur_style
            })
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        list_state.select(Some(state.section_idx));
        frame.render_stateful_widget(list, cols[0], &mut list_state);
    }

    // Staged files
    {
        let mut items: Vec<ListItem> = state
            .staged
            .iter()
            .map(|f| {
                let dur = f
                    .duration
                    .map(format_mmss)
                    .unwrap_or_else(|| "--:--".to_string());
                ListItem::new(format!(
                    "{}  [{} | {}]",
                    f.title,
                    dur,
                    format_size(f.size)
                ))
            })
            .collect();
        for rejected in &state.rejected {
            items.push(
                ListItem::new(format!("✗ {}", rejected.display())).dim(),
            );
        }

        let title = if state.in_flight > 0 {
            " staged (uploading…) "
        } else {
            " staged "
        };
        let list = List::new(items)
            .block(bordered(title))
            .highlight_style(if state.focus == UploadFocus::Staged {
                focus_style
            } else {
                blur_style
            })
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        if !state.staged.is_empty() {
            list_state.select(Some(state.staged_idx));
        }
        frame.render_stateful_widget(list, cols[1], &mut list_state);
    }

    // Uploaded this session, grouped by section
    {
        let selected_id = state.selected_uploaded().map(|t| t.id);
        let mut items: Vec<ListItem> = Vec::new();
        let mut selected_row: Option<usize> = None;
        for (section, tracks) in state.grouped() {
            items.push(ListItem::new(format!("── {} ──", section.name())).dim());
            for track in tracks {
                if Some(track.id) == selected_id {
                    selected_row = Some(items.len());
                }
                items.push(ListItem::new(format!("{}\n  {}", track.title, track.url)));
            }
        }

        let list = List::new(items)
            .block(bordered(" uploaded "))
            .highlight_style(if state.focus == UploadFocus::Uploaded {
                focus_style
            } else {
                blur_style
            })
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        list_state.select(selected_row);
        frame.render_stateful_widget(list, cols[2], &mut list_state);
    }
}

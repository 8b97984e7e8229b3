//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. It is
//! a pure projection of the `App` model: nothing here mutates state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackState};
use crate::audio::PlaybackInfo;
use crate::config::{ControlsSettings, TimeField, UiSettings};

/// Render the controls help text, incorporating the configured seek step.
fn controls_text(seek_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play/stop preview".to_string(),
        "[space/p] pause/resume".to_string(),
        format!("[H/L] seek -/+{}s", seek_seconds),
        "[0-9] jump to 0%-90%".to_string(),
        "[x/esc] close player".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the time text next to the progress bar (elapsed/total/remaining)
/// per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    if ui.now_playing_time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    let rem = t.saturating_sub(elapsed);
                    parts.push(format!("-{}", format_mmss(rem)));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

/// Render the entire UI into the provided `frame` using `app` state,
/// the latest playback snapshot and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    info: &PlaybackInfo,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reprise ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        match app.playback {
            PlaybackState::Stopped => parts.push("Stopped".to_string()),
            PlaybackState::Playing => parts.push("Playing".to_string()),
            PlaybackState::Paused => parts.push("Paused".to_string()),
        }

        if let Some(track) = app.active_track.and_then(|i| app.tracks.get(i)) {
            let time = now_playing_time_text(info.elapsed, info.duration, ui_settings);
            if let Some(time) = time {
                parts.push(format!("Track: {} [{}]", track.title, time));
            } else {
                parts.push(format!("Track: {}", track.title));
            }
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track list
    {
        let items: Vec<ListItem> = app
            .tracks
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let marker = if app.active_track == Some(i) {
                    "▶ "
                } else {
                    "  "
                };
                let text = if track.description.trim().is_empty() {
                    format!("{marker}{}", track.title)
                } else {
                    format!("{marker}{} - {}", track.title, track.description)
                };
                ListItem::new(text)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" singles "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if app.has_tracks() {
            state.select(Some(app.selected.min(app.tracks.len() - 1)));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Current lyric line
    if ui_settings.show_lyrics {
        let lyric = match app.active_track.and_then(|i| app.tracks.get(i)) {
            Some(track) if track.lyrics.is_empty() => "(no synced lyrics)",
            _ => app.active_lyric().unwrap_or(""),
        };
        let lyric_par = Paragraph::new(lyric)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" lyrics "));
        frame.render_widget(lyric_par, chunks[3]);
    }

    // Progress bar. Without a known duration the gauge stays empty and
    // fraction jumps are inert, so only the elapsed clock is shown.
    {
        let ratio = info.progress().unwrap_or(0.0);
        let label = now_playing_time_text(info.elapsed, info.duration, ui_settings)
            .unwrap_or_else(|| format_mmss(info.elapsed));
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" progress "))
            .ratio(ratio)
            .label(label);
        frame.render_widget(gauge, chunks[4]);
    }

    let footer_text = controls_text(controls_settings.seek_seconds);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[5]);
}

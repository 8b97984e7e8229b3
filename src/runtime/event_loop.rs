use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioCmd, AudioPlayer, PlaybackInfo};
use crate::config;
use crate::ui;

/// Main terminal event loop: handles input, UI drawing and sync with the
/// audio thread. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Project the audio thread's latest snapshot into the model. The
        // snapshot is copied out so the lock is not held across drawing.
        let snapshot: PlaybackInfo = match app.playback_handle.as_ref() {
            Some(handle) => match handle.lock() {
                Ok(info) => info.clone(),
                Err(_) => PlaybackInfo::default(),
            },
            None => PlaybackInfo::default(),
        };
        app.sync_from(&snapshot);

        terminal.draw(|f| ui::draw(f, app, &snapshot, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio_player)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.prev();
        }
        KeyCode::Enter => {
            // The audio thread applies toggle-to-stop when the selected
            // track is already active.
            if app.has_tracks() {
                let _ = audio_player.send(AudioCmd::Select(app.selected));
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = audio_player.send(AudioCmd::Toggle);
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.seek_seconds.min(i64::MAX as u64) as i64;
            let _ = audio_player.send(AudioCmd::SeekBy(secs));
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.seek_seconds.min(i64::MAX as u64) as i64;
            let _ = audio_player.send(AudioCmd::SeekBy(-secs));
        }
        KeyCode::Char('x') | KeyCode::Esc => {
            let _ = audio_player.send(AudioCmd::Close);
        }
        KeyCode::Char(c @ '0'..='9') => {
            // Jump to a tenth of the track, progress-bar style.
            let digit = c as u32 - '0' as u32;
            let _ = audio_player.send(AudioCmd::SeekTo(f64::from(digit) / 10.0));
        }
        _ => {}
    }

    Ok(false)
}

use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_reprise_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", "/tmp/reprise-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/reprise-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("reprise")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("reprise")
            .join("config.toml")
    );
}

#[test]
fn settings_load_catalog_and_lyric_tables_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
autoplay = false
quit_fade_out_ms = 123

[controls]
seek_seconds = 5

[ui]
header_text = "hello"
show_lyrics = false
now_playing_time_fields = ["elapsed", "remaining"]
now_playing_time_separator = " | "

[[tracks]]
title = "otilo"
description = "first single"
audio = "previews/otilo.mp3"
lyrics = "otilo"

[[tracks]]
id = "gbadun-preview"
title = "gbadun"
description = "second single"
audio = "previews/gbadun.mp3"
lyrics = "gbadun"

[[lyrics.otilo]]
time = 0.0
text = "first line"

[[lyrics.otilo]]
time = 2.5
text = "second line"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("REPRISE__CONTROLS__SEEK_SECONDS");

    let s = Settings::load().unwrap();
    assert!(!s.audio.autoplay);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.controls.seek_seconds, 5);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_lyrics);
    assert_eq!(s.ui.now_playing_time_fields.len(), 2);
    assert!(matches!(s.ui.now_playing_time_fields[0], TimeField::Elapsed));
    assert!(matches!(
        s.ui.now_playing_time_fields[1],
        TimeField::Remaining
    ));
    assert_eq!(s.ui.now_playing_time_separator, " | ");

    assert_eq!(s.tracks.len(), 2);
    assert_eq!(s.tracks[0].resolved_id(), "otilo");
    assert_eq!(s.tracks[1].resolved_id(), "gbadun-preview");
    assert_eq!(
        s.tracks[0].audio,
        std::path::PathBuf::from("previews/otilo.mp3")
    );

    let otilo = &s.lyrics["otilo"];
    assert_eq!(otilo.len(), 2);
    assert_eq!(otilo[0].text, "first line");
    assert!((otilo[1].time - 2.5).abs() < f64::EPSILON);

    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
seek_seconds = 5
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("REPRISE__CONTROLS__SEEK_SECONDS", "30");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.seek_seconds, 30);
}

#[test]
fn validate_rejects_zero_seek_step() {
    let mut s = Settings::default();
    s.controls.seek_seconds = 0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_duplicate_track_ids() {
    let mut s = Settings::default();
    s.tracks = vec![
        TrackSettings {
            title: "otilo".into(),
            ..TrackSettings::default()
        },
        TrackSettings {
            id: "otilo".into(),
            title: "something else".into(),
            ..TrackSettings::default()
        },
    ];
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_bad_lyric_timestamps() {
    let mut s = Settings::default();
    s.lyrics.insert(
        "broken".into(),
        vec![LyricEntry {
            time: -1.0,
            text: "before the beginning".into(),
        }],
    );
    assert!(s.validate().is_err());

    s.lyrics.insert(
        "broken".into(),
        vec![LyricEntry {
            time: f64::NAN,
            text: "nowhere".into(),
        }],
    );
    assert!(s.validate().is_err());
}

use super::load::{default_config_path, default_data_dir, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
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
fn resolve_config_path_prefers_songbox_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SONGBOX_CONFIG_PATH", "/tmp/songbox-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/songbox-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("songbox")
            .join("config.toml")
    );
}

#[test]
fn default_data_dir_falls_back_to_home_local_share() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_DATA_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_data_dir().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/share").join("songbox")
    );
}

#[test]
fn storage_dir_setting_overrides_data_dir_and_log_file_follows_it() {
    let settings = Settings {
        storage: StorageSettings {
            dir: Some(PathBuf::from("/tmp/songbox-data")),
            ..StorageSettings::default()
        },
        ..Settings::default()
    };
    assert_eq!(settings.data_dir(), PathBuf::from("/tmp/songbox-data"));
    assert_eq!(
        settings.log_file(),
        PathBuf::from("/tmp/songbox-data/songbox.log")
    );
}

#[test]
fn defaults_recognize_mp3_and_audio_mpeg() {
    let s = Settings::default();
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert_eq!(s.library.mime_types, vec!["audio/mpeg".to_string()]);
    assert_eq!(s.storage.playlist_file, "playlist.json");
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_playlist_file_with_path_separator() {
    let mut s = Settings::default();
    s.storage.playlist_file = "nested/playlist.json".into();
    assert!(s.validate().is_err());

    s.storage.playlist_file = "   ".into();
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_zero_scrub_and_empty_filters() {
    let mut s = Settings::default();
    s.controls.scrub_seconds = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions.clear();
    s.library.mime_types.clear();
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
extensions = ["mp3", "flac"]
mime_types = ["audio/mpeg", "audio/flac"]
recursive = false
include_hidden = true

[storage]
dir = "/tmp/songbox-store"
playlist_file = "mix.json"

[ui]
header_text = "hello"
start_view = "now-playing"
now_playing_time_fields = ["elapsed", "remaining"]
now_playing_time_separator = " | "
notice_seconds = 9

[controls]
scrub_seconds = 15

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SONGBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SONGBOX__CONTROLS__SCRUB_SECONDS");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "flac".to_string()]);
    assert_eq!(s.library.mime_types.len(), 2);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert_eq!(s.storage.dir, Some(PathBuf::from("/tmp/songbox-store")));
    assert_eq!(s.storage.playlist_file, "mix.json");
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.start_view, StartView::NowPlaying);
    assert_eq!(s.ui.now_playing_time_fields.len(), 2);
    assert!(matches!(s.ui.now_playing_time_fields[1], TimeField::Remaining));
    assert_eq!(s.ui.now_playing_time_separator, " | ");
    assert_eq!(s.ui.notice_seconds, 9);
    assert_eq!(s.controls.scrub_seconds, 15);
    assert_eq!(s.logging.level, "debug");
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
scrub_seconds = 5
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SONGBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SONGBOX__CONTROLS__SCRUB_SECONDS", "30");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.scrub_seconds, 30);
}

//! Session state: the playlist, the playback controller and everything the
//! views need to render (current view, cursor, prompt, status notice).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::audio::AudioBackend;
use crate::config::{LibrarySettings, Settings, StartView};
use crate::library::{AudioFilter, FileRef};
use crate::persist::PendingEntry;
use crate::player::PlaybackController;
use crate::playlist::{Playlist, TrackId};

/// Which screen is shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    Playlist,
    NowPlaying,
}

impl View {
    pub fn toggled(self) -> Self {
        match self {
            Self::Playlist => Self::NowPlaying,
            Self::NowPlaying => Self::Playlist,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Playlist => "Playlist",
            Self::NowPlaying => "Now Playing",
        }
    }
}

impl From<StartView> for View {
    fn from(v: StartView) -> Self {
        match v {
            StartView::Playlist => Self::Playlist,
            StartView::NowPlaying => Self::NowPlaying,
        }
    }
}

/// Keyboard focus: normal commands, or typing a path to import.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Import(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A short message in the status line.
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }
}

/// Everything a running player owns.
pub struct Session<B: AudioBackend> {
    pub playlist: Playlist,
    pub player: PlaybackController<B>,
    pub view: View,
    /// Cursor in the playlist view.
    pub selected: usize,
    pub input: InputMode,
    pub notice: Option<Notice>,
    /// Entries from a loaded document still waiting for their files.
    pub pending: Vec<PendingEntry>,
    /// Document position of every relinked track still in the playlist.
    pub(super) slots: HashMap<TrackId, usize>,
    pub(super) playlist_file: String,
    library: LibrarySettings,
    pub(super) scrub_seconds: u64,
    notice_ttl: Duration,
    last_current: Option<usize>,
    quit: bool,
}

impl<B: AudioBackend> Session<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            playlist: Playlist::with_filter(AudioFilter::from_settings(&settings.library)),
            player: PlaybackController::new(backend),
            view: settings.ui.start_view.into(),
            selected: 0,
            input: InputMode::Normal,
            notice: None,
            pending: Vec::new(),
            slots: HashMap::new(),
            playlist_file: settings.storage.playlist_file.trim().to_string(),
            library: settings.library.clone(),
            scrub_seconds: settings.controls.scrub_seconds,
            notice_ttl: Duration::from_secs(settings.ui.notice_seconds),
            last_current: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub(super) fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn scrub_seconds(&self) -> u64 {
        self.scrub_seconds
    }

    pub fn library_settings(&self) -> &LibrarySettings {
        &self.library
    }

    pub fn set_notice(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => log::info!("{}", notice.text),
            NoticeKind::Error => log::warn!("{}", notice.text),
        }
        self.notice = Some(notice);
    }

    /// Drop the notice once it has been shown for long enough.
    pub fn expire_notice(&mut self, now: Instant) {
        if let Some(n) = &self.notice {
            if now.saturating_duration_since(n.shown_at) >= self.notice_ttl {
                self.notice = None;
            }
        }
    }

    pub fn select(&mut self, idx: usize) {
        self.selected = idx.min(self.playlist.len().saturating_sub(1));
    }

    pub fn cursor_down(&mut self) {
        if self.selected + 1 < self.playlist.len() {
            self.selected += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Put a relinked entry back into the playlist ahead of the first
    /// restored track that came later in the same document. Tracks imported
    /// without a saved entry keep their place.
    pub(super) fn restore(&mut self, pending: &PendingEntry, file: &FileRef) {
        let at = self
            .playlist
            .iter()
            .position(|t| self.slots.get(&t.id).is_some_and(|&slot| slot > pending.slot))
            .unwrap_or(self.playlist.len());

        let had_tracks = !self.playlist.is_empty();
        let id = self
            .playlist
            .insert_named(at, file, &pending.entry.display_name)
            .id
            .clone();
        self.slots.insert(id, pending.slot);

        self.player.on_track_inserted(at);
        if had_tracks && at <= self.selected {
            self.selected += 1;
        }
        if let Some(c) = self.last_current.as_mut() {
            if at <= *c {
                *c += 1;
            }
        }
    }

    pub(super) fn clamp_cursor(&mut self) {
        self.select(self.selected);
    }

    /// Move the cursor onto the playing track whenever playback moved to a
    /// different one.
    pub(super) fn follow_playback(&mut self) {
        let current = self.player.current_index();
        if current != self.last_current {
            if let Some(i) = current {
                self.select(i);
            }
            self.last_current = current;
        }
    }
}

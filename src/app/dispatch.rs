use std::fmt::Display;
use std::mem;
use std::path::PathBuf;
use std::time::Instant;

use crate::audio::AudioBackend;
use crate::error::PersistError;
use crate::library::FileRef;
use crate::persist::{self, PendingEntry, relink};

use super::model::{InputMode, Notice, Session};

/// Everything the user (or a completed background job) can ask of a session.
#[derive(Debug)]
pub enum Action {
    /// Import already-resolved files, relinking pending entries first.
    AddFiles(Vec<FileRef>),
    /// Resolve a path (file or directory) on the scanner and import what it
    /// holds once `ScanFinished` comes back.
    ImportPath(PathBuf),
    ScanFinished { path: PathBuf, files: Vec<FileRef> },
    Remove(usize),
    RemoveSelected,
    Select(usize),
    PlaySelected,
    TogglePlayPause,
    Stop,
    Next,
    Previous,
    SeekFraction(f64),
    SeekBy(i64),
    Save,
    Load,
    SaveFinished(Result<(), PersistError>),
    LoadFinished(Result<String, PersistError>),
    SwitchView,
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    OpenImport,
    ImportInput(char),
    ImportBackspace,
    ImportSubmit,
    ImportCancel,
    /// Per-loop housekeeping: audio events and notice expiry.
    Tick,
    Quit,
}

/// Slow work the runtime must carry out on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    WriteDocument { path: String, content: String },
    ReadDocument { path: String },
    ScanPath { path: PathBuf },
}

impl<B: AudioBackend> Session<B> {
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::AddFiles(files) => self.add_files(files),
            Action::ImportPath(path) => {
                self.set_notice(Notice::info(format!("Scanning {}", path.display())));
                return Some(Effect::ScanPath { path });
            }
            Action::ScanFinished { path, files } => {
                if files.is_empty() {
                    self.set_notice(Notice::error(format!("Nothing to import at {}", path.display())));
                } else {
                    self.add_files(files);
                }
            }
            Action::Remove(idx) => self.remove(idx),
            Action::RemoveSelected => {
                if !self.playlist.is_empty() {
                    self.remove(self.selected);
                }
            }
            Action::Select(idx) => {
                let r = self.player.select_track(&self.playlist, idx);
                self.report(r);
            }
            Action::PlaySelected => {
                if self.player.current_index() == Some(self.selected) {
                    // Same track: resume where it paused instead of restarting.
                    if !self.player.is_playing() {
                        self.player.toggle_play_pause();
                    }
                } else if !self.playlist.is_empty() {
                    let r = self.player.select_track(&self.playlist, self.selected);
                    self.report(r);
                }
            }
            Action::TogglePlayPause => self.player.toggle_play_pause(),
            Action::Stop => self.player.stop(),
            Action::Next => {
                let r = self.player.next(&self.playlist);
                self.report(r);
            }
            Action::Previous => {
                let r = self.player.previous(&self.playlist);
                self.report(r);
            }
            Action::SeekFraction(f) => {
                let r = self.player.seek(f);
                self.report(r);
            }
            Action::SeekBy(secs) => {
                let r = self.player.seek_by(secs);
                self.report(r);
            }
            Action::Save => return self.save(),
            Action::Load => {
                return Some(Effect::ReadDocument {
                    path: self.playlist_file.clone(),
                });
            }
            Action::SaveFinished(Ok(())) => {
                self.set_notice(Notice::info(format!("Playlist saved to {}", self.playlist_file)));
            }
            Action::SaveFinished(Err(e)) => self.set_notice(Notice::error(format!("Save failed: {e}"))),
            Action::LoadFinished(result) => self.load_finished(result),
            Action::SwitchView => self.view = self.view.toggled(),
            Action::CursorUp => self.cursor_up(),
            Action::CursorDown => self.cursor_down(),
            Action::CursorTop => self.select(0),
            Action::CursorBottom => self.select(usize::MAX),
            Action::OpenImport => self.input = InputMode::Import(String::new()),
            Action::ImportInput(c) => {
                if let InputMode::Import(buf) = &mut self.input {
                    buf.push(c);
                }
            }
            Action::ImportBackspace => {
                if let InputMode::Import(buf) = &mut self.input {
                    buf.pop();
                }
            }
            Action::ImportSubmit => {
                if let InputMode::Import(buf) = mem::take(&mut self.input) {
                    let path = buf.trim();
                    if !path.is_empty() {
                        return self.dispatch(Action::ImportPath(PathBuf::from(path)));
                    }
                }
            }
            Action::ImportCancel => self.input = InputMode::Normal,
            Action::Tick => {
                let r = self.player.pump(&self.playlist);
                self.report(r);
                self.follow_playback();
                self.expire_notice(Instant::now());
            }
            Action::Quit => self.request_quit(),
        }
        None
    }

    fn report<T, E: Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.set_notice(Notice::error(e.to_string()));
                None
            }
        }
    }

    fn add_files(&mut self, files: Vec<FileRef>) {
        let offered = files.len();
        let mut added = 0;

        let leftover: Vec<&FileRef> = if self.pending.is_empty() {
            files.iter().collect()
        } else {
            let r = relink(mem::take(&mut self.pending), &files);
            for (pending, file) in &r.matched {
                self.restore(pending, file);
            }
            added += r.matched.len();
            self.pending = r.unmatched;
            r.leftover
        };
        let considered = leftover.len();
        let fresh = self.playlist.add(leftover);
        added += fresh;

        if considered > fresh {
            log::debug!("import: skipped {} non-audio files", considered - fresh);
        }
        self.clamp_cursor();

        let notice = match (added, self.pending.len()) {
            (0, _) => Notice::error(format!("No audio files among {offered} selected")),
            (n, 0) => Notice::info(format!("Added {n} track(s)")),
            (n, waiting) => Notice::info(format!("Added {n} track(s), {waiting} saved entries still unlinked")),
        };
        self.set_notice(notice);
    }

    fn remove(&mut self, idx: usize) {
        match self.playlist.remove(idx) {
            Ok(track) => {
                self.slots.remove(&track.id);
                self.player.on_track_removed(idx);
                self.clamp_cursor();
                self.set_notice(Notice::info(format!("Removed {}", track.display_name)));
            }
            Err(e) => self.set_notice(Notice::error(e.to_string())),
        }
    }

    fn save(&mut self) -> Option<Effect> {
        let content = self.report(persist::serialize(&self.playlist))?;
        Some(Effect::WriteDocument {
            path: self.playlist_file.clone(),
            content,
        })
    }

    fn load_finished(&mut self, result: Result<String, PersistError>) {
        let entries = match result.and_then(|doc| persist::deserialize(&doc)) {
            Ok(entries) => entries,
            Err(e) => {
                self.set_notice(Notice::error(format!("Load failed: {e}")));
                return;
            }
        };

        // A loaded document replaces the session playlist. Its entries carry
        // no audio until files with the same names are imported again.
        self.player.reset();
        self.playlist.clear();
        self.slots.clear();
        self.selected = 0;
        let n = entries.len();
        self.pending = PendingEntry::from_document(entries);
        self.set_notice(Notice::info(format!(
            "Loaded {n} saved entries; import their files to play them"
        )));
    }
}

//! Error types shared across the player.
//!
//! Every failure here is local and non-fatal: the runtime turns them into a
//! status-line notice and keeps going.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the playlist store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("no track at index {index} (playlist has {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors raised by the background file scanner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("file scanner is not running")]
    ScannerGone,
}

/// Errors raised by an audio backend while opening or driving a track.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("seek to {0:?} not supported by this source")]
    Seek(Duration),
}

/// Errors raised by the playback controller.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no track at index {index} (playlist has {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("track duration is not known yet")]
    DurationUnknown,

    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Errors raised while saving or loading the playlist document.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Validation: nothing to save.
    #[error("Playlist is empty, cannot save.")]
    EmptyPlaylist,

    #[error("{0} not found")]
    NotFound(String),

    #[error("storage error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed playlist document: {0}")]
    Format(#[from] serde_json::Error),

    #[error("storage worker is not running")]
    WorkerGone,
}

impl PersistError {
    /// Map an I/O failure on `path`, folding `NotFound` into its own variant.
    pub fn from_io(path: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_string())
        } else {
            Self::Io {
                path: path.to_string(),
                source,
            }
        }
    }
}

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::library::{FileRef, SourceHandle};

/// Stable identifier of a track record. Never reused within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(String);

impl TrackId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out track ids: millisecond timestamp, a per-generator sequence
/// number and a random tie-break. The sequence number alone keeps ids unique
/// inside one playlist; the other parts keep them distinct across sessions.
#[derive(Debug, Default)]
pub struct IdGenerator {
    seq: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> TrackId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.seq;
        self.seq += 1;
        let salt: u16 = rand::random();
        TrackId(format!("{millis:x}-{seq}-{salt:04x}"))
    }
}

/// One song in the playlist.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub display_name: String,
    pub original_file_name: String,
    pub source: SourceHandle,
}

impl Track {
    pub(super) fn from_file(id: TrackId, file: &FileRef, display_name: Option<&str>) -> Self {
        Self {
            id,
            display_name: display_name.unwrap_or_else(|| file.stem()).to_string(),
            original_file_name: file.name.clone(),
            source: file.open_source(),
        }
    }
}

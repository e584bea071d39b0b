use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::playlist::{Playlist, Track};

/// One track as stored on disk: display metadata only, never the audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEntry {
    pub id: String,
    pub display_name: String,
    pub original_file_name: String,
}

impl From<&Track> for PersistedEntry {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.as_str().to_string(),
            display_name: track.display_name.clone(),
            original_file_name: track.original_file_name.clone(),
        }
    }
}

/// Encode the playlist as a pretty-printed JSON array.
pub fn serialize(playlist: &Playlist) -> Result<String, PersistError> {
    if playlist.is_empty() {
        return Err(PersistError::EmptyPlaylist);
    }
    let entries: Vec<PersistedEntry> = playlist.iter().map(PersistedEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Decode a playlist document. All or nothing: any malformed entry fails
/// the whole document.
pub fn deserialize(document: &str) -> Result<Vec<PersistedEntry>, PersistError> {
    Ok(serde_json::from_str(document)?)
}

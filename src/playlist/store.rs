use crate::error::PlaylistError;
use crate::library::{AudioFilter, FileRef};

use super::model::{IdGenerator, Track, TrackId};

/// Ordered, in-memory list of tracks for the current session.
///
/// Mutations never touch storage and never block.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    ids: IdGenerator,
    filter: AudioFilter,
}

impl Playlist {
    /// An empty playlist accepting `audio/mpeg` / `.mp3` files.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty playlist using `filter` to recognize audio files.
    pub fn with_filter(filter: AudioFilter) -> Self {
        Self {
            tracks: Vec::new(),
            ids: IdGenerator::new(),
            filter,
        }
    }

    /// Append one track per audio file, in order. Files the filter does not
    /// recognize are skipped. Returns how many tracks were added.
    pub fn add<'a, I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = &'a FileRef>,
    {
        let before = self.tracks.len();
        for file in files {
            if !self.filter.accepts(file) {
                log::debug!("playlist: skipping non-audio file {}", file.name);
                continue;
            }
            let id = self.ids.next_id();
            self.tracks.push(Track::from_file(id, file, None));
        }
        self.tracks.len() - before
    }

    /// Insert `file` at `index` (clamped to the end) under an explicit
    /// display name, bypassing the type filter. Used when restoring entries
    /// from a saved playlist.
    pub fn insert_named(&mut self, index: usize, file: &FileRef, display_name: &str) -> &Track {
        let index = index.min(self.tracks.len());
        let id = self.ids.next_id();
        self.tracks
            .insert(index, Track::from_file(id, file, Some(display_name)));
        &self.tracks[index]
    }

    /// Remove the track at `index`, shifting later tracks down by one.
    pub fn remove(&mut self, index: usize) -> Result<Track, PlaylistError> {
        if index >= self.tracks.len() {
            return Err(PlaylistError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        Ok(self.tracks.remove(index))
    }

    /// Drop every track. Ids handed out so far are still never reused.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == *id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

//! Playlist store: the ordered list of tracks, independent of playback.

mod model;
mod store;

pub use model::{Track, TrackId};
pub use store::Playlist;

#[cfg(test)]
mod tests;

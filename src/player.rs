//! Playback controller: the selection cursor, play/pause state and the
//! audio handle bound to the selected track.

mod controller;
mod state;

pub use controller::PlaybackController;
pub use state::PlaybackState;

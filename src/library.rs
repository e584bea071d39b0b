//! File selection side of the player.
//!
//! Turns user-supplied paths into `FileRef`s and decides which of them are
//! audio. Walks started from the UI run on a worker thread. Track records
//! themselves live in the playlist.

mod model;
mod scan;
mod worker;

pub use model::{AudioFilter, FileRef, SourceHandle};
pub use scan::{scan, scan_all};
pub use worker::{ScanReply, ScanWorker};

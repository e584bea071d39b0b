//! Playlist persistence: the JSON document, the storage it lives in, the
//! worker thread doing the I/O, and relinking loaded entries to files.

mod document;
mod relink;
mod storage;
mod worker;

pub use document::{PersistedEntry, deserialize, serialize};
pub use relink::{PendingEntry, relink};
pub use storage::{DirStorage, Storage};
pub use worker::{PersistReply, PersistRequest, PersistWorker};

#[cfg(test)]
mod tests;

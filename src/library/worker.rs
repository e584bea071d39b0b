//! Background thread for directory walks. A large import folder can take a
//! while to walk and sniff, so the event loop only sends paths and collects
//! the results later.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::config::LibrarySettings;
use crate::error::LibraryError;

use super::model::FileRef;
use super::scan::scan;

/// Files found under one requested path, in scan order.
#[derive(Debug)]
pub struct ScanReply {
    pub path: PathBuf,
    pub files: Vec<FileRef>,
}

pub struct ScanWorker {
    tx: Option<Sender<PathBuf>>,
    rx: Receiver<ScanReply>,
    join: Option<JoinHandle<()>>,
}

impl ScanWorker {
    pub fn spawn(settings: LibrarySettings) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<PathBuf>();
        let (reply_tx, reply_rx) = mpsc::channel::<ScanReply>();

        let join = thread::spawn(move || {
            for path in req_rx {
                let files = scan(&path, &settings);
                log::debug!("scan: {} file(s) under {}", files.len(), path.display());
                if reply_tx.send(ScanReply { path, files }).is_err() {
                    break;
                }
            }
        });

        Self {
            tx: Some(req_tx),
            rx: reply_rx,
            join: Some(join),
        }
    }

    pub fn submit(&self, path: PathBuf) -> Result<(), LibraryError> {
        self.tx
            .as_ref()
            .ok_or(LibraryError::ScannerGone)?
            .send(path)
            .map_err(|_| LibraryError::ScannerGone)
    }

    /// A finished scan, if one is waiting.
    pub fn try_recv(&self) -> Option<ScanReply> {
        self.rx.try_recv().ok()
    }

    /// Block until the next scan finishes.
    #[cfg(test)]
    pub fn recv(&self) -> Result<ScanReply, LibraryError> {
        self.rx.recv().map_err(|_| LibraryError::ScannerGone)
    }
}

impl Drop for ScanWorker {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

//! Background thread that owns the storage so file I/O never stalls the
//! event loop. Requests go in over one channel, replies come back on another.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::error::PersistError;

use super::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistRequest {
    Write { path: String, content: String },
    Read { path: String },
}

#[derive(Debug)]
pub enum PersistReply {
    Written {
        path: String,
        result: Result<(), PersistError>,
    },
    Read {
        path: String,
        result: Result<String, PersistError>,
    },
}

pub struct PersistWorker {
    tx: Option<Sender<PersistRequest>>,
    rx: Receiver<PersistReply>,
    join: Option<JoinHandle<()>>,
}

impl PersistWorker {
    pub fn spawn<S: Storage>(storage: S) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<PersistRequest>();
        let (reply_tx, reply_rx) = mpsc::channel::<PersistReply>();

        let join = thread::spawn(move || {
            for req in req_rx {
                let reply = match req {
                    PersistRequest::Write { path, content } => {
                        let result = storage.write(&path, &content);
                        log::debug!("persist: wrote {path}: {:?}", result.as_ref().err());
                        PersistReply::Written { path, result }
                    }
                    PersistRequest::Read { path } => {
                        let result = storage.read(&path);
                        log::debug!("persist: read {path}: {:?}", result.as_ref().err());
                        PersistReply::Read { path, result }
                    }
                };
                if reply_tx.send(reply).is_err() {
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

    pub fn submit(&self, req: PersistRequest) -> Result<(), PersistError> {
        self.tx
            .as_ref()
            .ok_or(PersistError::WorkerGone)?
            .send(req)
            .map_err(|_| PersistError::WorkerGone)
    }

    /// A finished request, if one is waiting.
    pub fn try_recv(&self) -> Option<PersistReply> {
        self.rx.try_recv().ok()
    }

    /// Block until the next reply arrives.
    #[cfg(test)]
    pub fn recv(&self) -> Result<PersistReply, PersistError> {
        self.rx.recv().map_err(|_| PersistError::WorkerGone)
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the thread once pending writes land.
        self.tx.take();
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

//! Scripted backend for controller tests. Records every call and keeps the
//! event sink of each attach so tests can play the part of the audio thread.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::error::AudioError;
use crate::library::SourceHandle;

use super::backend::{AudioBackend, AudioHandle};
use super::types::{AudioEvent, EventSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load(PathBuf),
    Play(usize),
    Pause(usize),
    Seek(usize, Duration),
    Attach(usize),
    Detach(usize),
}

#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    sinks: Vec<EventSink>,
    handles: usize,
    broken: Vec<PathBuf>,
    unseekable: bool,
}

/// Cheap to clone; clones share the same script.
#[derive(Clone, Default)]
pub struct FakeBackend {
    script: Rc<RefCell<Script>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `load` fail for `path`.
    pub fn break_path(&self, path: impl Into<PathBuf>) {
        self.script.borrow_mut().broken.push(path.into());
    }

    pub fn set_unseekable(&self, unseekable: bool) {
        self.script.borrow_mut().unseekable = unseekable;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.script.borrow_mut().calls.clear();
    }

    /// Number of handles opened so far.
    pub fn loads(&self) -> usize {
        self.script.borrow().handles
    }

    /// The sink given to the most recent attach.
    pub fn last_sink(&self) -> EventSink {
        self.script
            .borrow()
            .sinks
            .last()
            .cloned()
            .expect("nothing attached yet")
    }

    /// Emit through the most recently attached sink.
    pub fn emit(&self, event: AudioEvent) {
        self.last_sink().emit(event);
    }

    fn record(&self, call: Call) {
        self.script.borrow_mut().calls.push(call);
    }
}

impl AudioBackend for FakeBackend {
    type Handle = FakeHandle;

    fn load(&mut self, source: &SourceHandle) -> Result<FakeHandle, AudioError> {
        let path = source.path();
        self.record(Call::Load(path.to_path_buf()));
        if self.script.borrow().broken.iter().any(|p| p == path) {
            return Err(AudioError::Decode {
                path: path.to_path_buf(),
                reason: "scripted failure".into(),
            });
        }
        let mut script = self.script.borrow_mut();
        let number = script.handles;
        script.handles += 1;
        Ok(FakeHandle {
            number,
            backend: self.clone(),
        })
    }
}

pub struct FakeHandle {
    number: usize,
    backend: FakeBackend,
}

impl AudioHandle for FakeHandle {
    fn play(&mut self) {
        self.backend.record(Call::Play(self.number));
    }

    fn pause(&mut self) {
        self.backend.record(Call::Pause(self.number));
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        if self.backend.script.borrow().unseekable {
            return Err(AudioError::Seek(position));
        }
        self.backend.record(Call::Seek(self.number, position));
        Ok(())
    }

    fn attach(&mut self, sink: EventSink) {
        self.backend.record(Call::Attach(self.number));
        self.backend.script.borrow_mut().sinks.push(sink);
    }

    fn detach(&mut self) {
        self.backend.record(Call::Detach(self.number));
    }

    fn poll(&mut self) {}
}

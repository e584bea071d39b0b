use std::time::Duration;

use crate::error::AudioError;
use crate::library::SourceHandle;

use super::types::EventSink;

/// One opened track. Created paused.
pub trait AudioHandle {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration) -> Result<(), AudioError>;

    /// Start reporting events into `sink`.
    fn attach(&mut self, sink: EventSink);

    /// Stop reporting events. Nothing is emitted after this returns.
    fn detach(&mut self);

    /// Give the handle a chance to emit pending events. Called once per
    /// event-loop tick.
    fn poll(&mut self);
}

/// Opens audio handles for track sources.
pub trait AudioBackend {
    type Handle: AudioHandle;

    fn load(&mut self, source: &SourceHandle) -> Result<Self::Handle, AudioError>;
}

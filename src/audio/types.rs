//! Events and plumbing shared by every audio backend.
//!
//! A handle never talks to the controller directly: it is given an
//! [`EventSink`] on attach and pushes [`AudioEvent`]s into it. Every event is
//! stamped with the [`BindingId`] of the attachment that produced it, so the
//! receiver can drop anything coming from a handle it has since replaced.

use std::sync::mpsc::Sender;
use std::time::Duration;

/// Identifies one attach of a handle to the controller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct BindingId(u64);

impl BindingId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// Playback position changed.
    TimeUpdate(Duration),
    /// Total duration became known.
    MetadataLoaded(Duration),
    /// The source ran out.
    Ended,
}

/// An event tagged with the binding it came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoundEvent {
    pub binding: BindingId,
    pub event: AudioEvent,
}

/// Where a handle reports its events while attached.
#[derive(Debug, Clone)]
pub struct EventSink {
    binding: BindingId,
    tx: Sender<BoundEvent>,
}

impl EventSink {
    pub fn new(binding: BindingId, tx: Sender<BoundEvent>) -> Self {
        Self { binding, tx }
    }

    /// Push `event`. Returns false once the receiving side is gone.
    pub fn emit(&self, event: AudioEvent) -> bool {
        self.tx
            .send(BoundEvent {
                binding: self.binding,
                event,
            })
            .is_ok()
    }
}

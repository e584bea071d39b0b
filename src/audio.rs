//! Audio rendering.
//!
//! The controller drives exactly one [`AudioHandle`] at a time, opened by an
//! [`AudioBackend`]. [`RodioBackend`] is the real output; tests use the
//! scripted backend in `fake`.

mod backend;
mod rodio_backend;
mod types;

pub use backend::{AudioBackend, AudioHandle};
pub use rodio_backend::RodioBackend;
pub use types::{AudioEvent, BindingId, BoundEvent, EventSink};

#[cfg(test)]
pub(crate) mod fake;

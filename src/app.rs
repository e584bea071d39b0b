//! The running session and the dispatcher mapping user actions onto it.
//!
//! Views never mutate state; they render a `Session`. Keys become
//! `Action`s, and storage work comes back out as `Effect`s.

mod dispatch;
mod model;

pub use dispatch::{Action, Effect};
pub use model::*;

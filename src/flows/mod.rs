//! Built-in flows
//!
//! Flows are organized into three groups:
//! - `source`: leaf flows that emit messages or consume time
//! - `combinator`: sequence, parallel, repetition and gating of other flows
//! - `lift`: adapting a flow's input and message types to a larger system

pub mod source;
pub mod combinator;
mod lift;

// Re-export everything at the top level for convenience
pub use source::{fire, emit, delay, wait};
pub use combinator::{track, fork, looping, repeat, genloop, gate};
pub use lift::lift;

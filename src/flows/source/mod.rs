//! Leaf flows: emitting messages and consuming time

mod fire;
mod delay;

pub use fire::{fire, emit};
pub use delay::{delay, wait};

//! Flows built from other flows

mod track;
mod fork;
mod looping;
mod gate;

pub use track::track;
pub use fork::fork;
pub use looping::{looping, repeat, genloop};
pub use gate::gate;

//! # Takt
//!
//! Deterministic scheduling of timestamped effects from discrete clock ticks.
//!
//! Takt turns a tree of composed processes into a replayable stream of
//! `(timestamp, message)` events. What the messages mean (notes, animation
//! cues, light changes) and when they are finally performed is up to the
//! host; takt only works out *when* they happen.
//!
//! ## Pieces
//!
//! - [`Clock`] - one interval of absolute time and the matching interval of
//!   rate-integrated virtual time
//! - [`Flow`] - a process stepped by the host; either running or stopped
//! - Leaf flows: [`fire`] emits messages, [`delay`] and [`wait`] consume time
//! - Combinators: [`track`] (sequence), [`fork`] (parallel), [`looping`] /
//!   [`repeat`] / [`genloop`] (repetition), [`gate`] (run while another runs)
//! - [`lift`] - adapt a flow to a larger system's input and message types
//! - [`Conductor`] - optional host-side driver that feeds an [`EventSink`]
//!
//! ## Quick Start
//!
//! ```
//! use takt::{clock, emit, fork, repeat, track, wait, Flow};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Cue { Kick, Hat }
//!
//! // four kicks on the beat, hats on the off-beats
//! let kicks: Flow<(), Cue> = repeat(4, track(vec![emit(vec![Cue::Kick]), wait(1.0)]));
//! let hats: Flow<(), Cue> = track(vec![wait(0.5), repeat(4, track(vec![emit(vec![Cue::Hat]), wait(1.0)]))]);
//! let pattern = fork(vec![kicks, hats]);
//!
//! // one tick per eighth note
//! let step = pattern.run(2.0, clock(1.0, 0.5, 0.0), ());
//! let kicks_played = step.events.iter().filter(|(_, cue)| *cue == Cue::Kick).count();
//! assert_eq!(kicks_played, 2);
//! ```
//!
//! ## Driving
//!
//! Nothing runs on its own. Call [`Flow::step`] once per scheduling pass (a
//! display frame, an audio block) or [`Flow::run`] to cover several ticks at
//! once, and hand the returned events to whatever performs them. The core
//! spawns no threads, keeps no global state and performs no I/O.

mod clock;
mod flow;
mod conductor;
mod sink;
pub mod flows;

pub use clock::{clock, Clock, Rate, TimeInterval, TimeStamp};
pub use flow::{flow, stopped, Event, Flow, Process, Step, Transition};
pub use conductor::Conductor;
pub use sink::EventSink;
pub use flows::{delay, emit, fire, fork, gate, genloop, lift, looping, repeat, track, wait};

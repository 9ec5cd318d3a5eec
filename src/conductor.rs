//! Host-side driver that owns a clock and a root flow

use delegate::delegate;
use tracing::{debug, trace_span, warn};

use crate::clock::{Clock, Rate, TimeInterval, TimeStamp};
use crate::flow::{Event, Flow};
use crate::sink::EventSink;

/// Drives a root [`Flow`] from a host loop and forwards its events.
///
/// The conductor keeps the clock the flow hands back after every step, so
/// the host only supplies input and a sink. Two ways to drive it:
///
/// 1. [`process`](Self::process) - one step per call, e.g. once per frame
/// 2. [`render`](Self::render) - step until the clock is `lookahead` ahead,
///    e.g. once per audio callback that needs events slightly early
///
/// ```
/// use takt::{clock, emit, repeat, track, wait, Conductor, Flow};
///
/// let beat: Flow<(), &str> = repeat(4, track(vec![emit(vec!["tick"]), wait(1.0)]));
/// let mut conductor = Conductor::new(beat, clock(1.0, 0.25, 0.0)).with_lookahead(2.0);
///
/// let mut events = Vec::new();
/// conductor.render((), &mut events);
/// assert_eq!(events, vec![(0.0, "tick"), (1.0, "tick")]);
/// assert_eq!(conductor.now(), 2.0);
/// ```
pub struct Conductor<I, M> {
    flow: Flow<I, M>,
    clock: Clock,
    lookahead: TimeInterval,
    dispatched: u64,
    dropped: u64,
}

impl<I, M> Conductor<I, M> {
    /// Create a conductor; the lookahead defaults to one clock interval.
    pub fn new(flow: Flow<I, M>, clock: Clock) -> Self {
        Self {
            flow,
            clock,
            lookahead: clock.dt,
            dispatched: 0,
            dropped: 0,
        }
    }

    /// How far ahead of the clock [`render`](Self::render) steps the flow.
    pub fn with_lookahead(mut self, lookahead: TimeInterval) -> Self {
        self.lookahead = lookahead;
        self
    }

    #[inline]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[inline]
    pub fn lookahead(&self) -> TimeInterval {
        self.lookahead
    }

    delegate! {
        to self.clock {
            /// Absolute start of the current interval.
            pub fn now(&self) -> TimeStamp;
            /// Virtual start of the current interval.
            pub fn now_rel(&self) -> TimeStamp;
            pub fn rel2abs(&self, rel: TimeStamp) -> TimeStamp;
            pub fn abs2rel(&self, t: TimeStamp) -> TimeStamp;
        }
    }

    /// Whether the root flow has stopped.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.flow.is_stopped()
    }

    /// Events handed to a sink so far.
    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Events a full sink refused so far.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Step the flow once with the current clock.
    ///
    /// Returns how many events reached the sink.
    pub fn process<S: EventSink<M>>(&mut self, input: I, sink: &mut S) -> usize {
        let step = core::mem::take(&mut self.flow).step(self.clock, input);
        self.clock = step.clock;
        self.flow = step.next;
        self.dispatch(step.events, sink)
    }

    /// Step until the clock is `lookahead` past where it is now, or the flow stops.
    pub fn render<S: EventSink<M>>(&mut self, input: I, sink: &mut S) -> usize
    where
        I: Clone,
    {
        let target = self.clock.t1 + self.lookahead;
        self.render_until(target, input, sink)
    }

    /// Step until the clock reaches absolute time `target`, or the flow stops.
    ///
    /// Events reach the sink in the order their steps ran.
    pub fn render_until<S: EventSink<M>>(&mut self, target: TimeStamp, input: I, sink: &mut S) -> usize
    where
        I: Clone,
    {
        let _span = trace_span!("render", from = self.clock.t1, target).entered();
        let step = core::mem::take(&mut self.flow).run(target, self.clock, input);
        self.clock = step.clock;
        self.flow = step.next;
        self.dispatch(step.events, sink)
    }

    /// Align the clock with a reference clock (e.g. the audio device's).
    pub fn sync_to(&mut self, reference: &Clock) {
        debug!(from = self.clock.t1, to = reference.t1, "sync");
        self.clock = self.clock.sync(reference);
    }

    /// Seek to absolute time `t`, continuing at `rate`.
    pub fn jump_to(&mut self, rate: Rate, t: TimeStamp) {
        debug!(from = self.clock.t1, to = t, rate, "jump");
        self.clock = self.clock.jump_to(rate, t);
    }

    /// Change the rate of the current interval without moving in time.
    pub fn set_rate(&mut self, rate: Rate) {
        self.clock = self.clock.jump_to(rate, self.clock.t1);
    }

    /// Give back the flow and the clock.
    pub fn into_parts(self) -> (Flow<I, M>, Clock) {
        (self.flow, self.clock)
    }

    fn dispatch<S: EventSink<M>>(&mut self, events: Vec<Event<M>>, sink: &mut S) -> usize {
        let mut sent = 0;
        let mut refused = 0;
        for event in events {
            match sink.dispatch(event) {
                Ok(()) => sent += 1,
                Err(_) => refused += 1,
            }
        }

        self.dispatched += sent as u64;
        if refused > 0 {
            self.dropped += refused;
            warn!(refused, total = self.dropped, "event sink full, events dropped");
        }
        sent
    }
}

//! Core process type and the stepping contract.

use std::sync::Arc;

use crate::clock::{Clock, TimeStamp};

/// A timestamped message emitted by a flow.
pub type Event<M> = (TimeStamp, M);

/// The outcome of one call to a transition function: the advanced clock,
/// the emitted events and the next state (`None` stops the flow).
pub type Transition<S, M> = (Clock, Vec<Event<M>>, Option<S>);

/// The running half of a [`Flow`].
///
/// A process is consumed by [`step`](Process::step) and hands back its
/// continuation inside the returned [`Step`]. Most code never implements
/// this directly: [`flow`] builds a process from a state value and a
/// transition function, and every built-in flow is made that way.
pub trait Process<I, M>: Send {
    /// Advance the process by one step.
    fn step(self: Box<Self>, clock: Clock, input: I) -> Step<I, M>;

    /// Clone the process, hidden state included.
    fn box_clone(&self) -> Box<dyn Process<I, M>>;
}

/// A steppable process producing timestamped messages.
///
/// A flow is either [`Stopped`](Flow::Stopped), which is terminal and
/// absorbing, or [`Flowing`](Flow::Flowing). Stepping consumes the flow and
/// returns its continuation, so one instance is only ever driven once.
///
/// ```
/// use takt::{clock, fire, Flow};
///
/// let f: Flow<(), &str> = fire(|_| vec!["hit"]);
/// let step = f.step(clock(1.0, 1.0, 5.0), ());
/// assert_eq!(step.events, vec![(5.0, "hit")]);
/// assert!(step.next.is_stopped());
/// ```
pub enum Flow<I, M> {
    /// Finished. Every further step keeps the clock and emits nothing.
    Stopped,
    /// Still running; stepping hands the clock and input to the process.
    Flowing(Box<dyn Process<I, M>>),
}

/// Result of stepping a [`Flow`].
pub struct Step<I, M> {
    /// Clock after the step
    pub clock: Clock,
    /// Events emitted during the step, in no particular order
    pub events: Vec<Event<M>>,
    /// Continuation
    pub next: Flow<I, M>,
}

impl<I, M> Step<I, M> {
    /// The step as a `(clock, events, next)` triple.
    pub fn into_parts(self) -> (Clock, Vec<Event<M>>, Flow<I, M>) {
        (self.clock, self.events, self.next)
    }
}

impl<I, M> Flow<I, M> {
    /// The terminal flow.
    #[inline]
    pub fn stopped() -> Self {
        Flow::Stopped
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self, Flow::Stopped)
    }

    #[inline]
    pub fn is_flowing(&self) -> bool {
        !self.is_stopped()
    }

    /// `Some(self)` while running, `None` once stopped.
    ///
    /// Handy as the next state of a transition that wraps another flow.
    #[inline]
    pub fn flowing(self) -> Option<Self> {
        match self {
            Flow::Stopped => None,
            running => Some(running),
        }
    }

    /// Advance the flow by one step.
    ///
    /// A stopped flow returns `clock` untouched, no events, and stays
    /// stopped.
    pub fn step(self, clock: Clock, input: I) -> Step<I, M> {
        match self {
            Flow::Stopped => Step { clock, events: Vec::new(), next: Flow::Stopped },
            Flow::Flowing(process) => process.step(clock, input),
        }
    }

    /// Step repeatedly until the clock reaches `target` or the flow stops.
    ///
    /// Every step receives the same `input`. Events come back in the order
    /// their steps ran. A flow that neither advances the clock nor stops
    /// never reaches the target, so this only terminates for flows that do
    /// one or the other.
    pub fn run(self, target: TimeStamp, clock: Clock, input: I) -> Step<I, M>
    where
        I: Clone,
    {
        let mut clock = clock;
        let mut flow = self;
        let mut events = Vec::new();

        while flow.is_flowing() && clock.t1 < target {
            let step = flow.step(clock, input.clone());
            clock = step.clock;
            events.extend(step.events);
            flow = step.next;
        }

        Step { clock, events, next: flow }
    }
}

impl<I, M> Clone for Flow<I, M> {
    fn clone(&self) -> Self {
        match self {
            Flow::Stopped => Flow::Stopped,
            Flow::Flowing(process) => Flow::Flowing(process.box_clone()),
        }
    }
}

impl<I, M> Default for Flow<I, M> {
    fn default() -> Self {
        Flow::Stopped
    }
}

impl<I, M> core::fmt::Debug for Flow<I, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Flow::Stopped => f.write_str("Stopped"),
            Flow::Flowing(_) => f.write_str("Flowing(..)"),
        }
    }
}

/// The terminal flow.
#[inline]
pub fn stopped<I, M>() -> Flow<I, M> {
    Flow::Stopped
}

// Process built by `flow()`: an explicit state plus a shared transition function
struct StateMachine<S, F> {
    state: S,
    transition: Arc<F>,
}

impl<I, M, S, F> Process<I, M> for StateMachine<S, F>
where
    I: 'static,
    M: 'static,
    S: Clone + Send + 'static,
    F: Fn(Clock, I, S) -> Transition<S, M> + Send + Sync + 'static,
{
    fn step(self: Box<Self>, clock: Clock, input: I) -> Step<I, M> {
        let StateMachine { state, transition } = *self;
        let (clock, events, state) = transition(clock, input, state);
        let next = match state {
            Some(state) => Flow::Flowing(Box::new(StateMachine { state, transition })),
            None => Flow::Stopped,
        };
        Step { clock, events, next }
    }

    fn box_clone(&self) -> Box<dyn Process<I, M>> {
        Box::new(StateMachine {
            state: self.state.clone(),
            transition: Arc::clone(&self.transition),
        })
    }
}

/// Build a running flow from an initial state and a transition function.
///
/// Each step calls `transition(clock, input, state)`. Returning
/// `Some(state)` keeps the flow running with the new state, `None` stops it.
///
/// ```
/// use takt::{clock, flow, Flow};
///
/// // Counts up once per tick and stops after three.
/// let counter: Flow<(), u32> = flow(0u32, |c, _, n| {
///     let events = vec![(c.t1, n)];
///     (c.tick(), events, if n < 2 { Some(n + 1) } else { None })
/// });
///
/// let step = counter.run(100.0, clock(1.0, 1.0, 0.0), ());
/// assert_eq!(step.events, vec![(0.0, 0), (1.0, 1), (2.0, 2)]);
/// assert!(step.next.is_stopped());
/// ```
pub fn flow<I, M, S, F>(state: S, transition: F) -> Flow<I, M>
where
    I: 'static,
    M: 'static,
    S: Clone + Send + 'static,
    F: Fn(Clock, I, S) -> Transition<S, M> + Send + Sync + 'static,
{
    Flow::Flowing(Box::new(StateMachine {
        state,
        transition: Arc::new(transition),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::clock;

    fn ticker(limit: u32) -> Flow<u32, (u32, u32)> {
        flow(0u32, move |c: Clock, input: u32, n: u32| {
            let events = vec![(c.t1, (n, input))];
            let next = if n + 1 < limit { Some(n + 1) } else { None };
            (c.tick(), events, next)
        })
    }

    #[test]
    fn stopped_is_absorbing() {
        let c = clock(2.0, 3.0, 7.0);
        let step = stopped::<u32, u32>().step(c, 9);
        assert_eq!(step.clock, c);
        assert!(step.events.is_empty());
        assert!(step.next.is_stopped());
    }

    #[test]
    fn predicates_are_exclusive() {
        let f = ticker(1);
        assert!(f.is_flowing() && !f.is_stopped());
        let s: Flow<u32, u32> = Flow::stopped();
        assert!(s.is_stopped() && !s.is_flowing());
    }

    #[test]
    fn state_machine_stops_on_none() {
        let (c, events, next) = ticker(2).step(clock(1.0, 1.0, 0.0), 4).into_parts();
        assert_eq!(events, vec![(0.0, (0, 4))]);
        assert_eq!(c.t1, 1.0);
        let (_, events, next) = next.step(c, 5).into_parts();
        assert_eq!(events, vec![(1.0, (1, 5))]);
        assert!(next.is_stopped());
    }

    #[test]
    fn clone_duplicates_hidden_state() {
        let c = clock(1.0, 1.0, 0.0);
        let advanced = ticker(5).step(c, 0).next;
        let copy = advanced.clone();
        let a = advanced.step(c, 0).events;
        let b = copy.step(c, 0).events;
        assert_eq!(a, b);
        assert_eq!(a, vec![(0.0, (1, 0))]);
    }

    #[test]
    fn run_reuses_input_and_keeps_tick_order() {
        let step = ticker(10).run(3.0, clock(1.0, 1.0, 0.0), 7);
        assert_eq!(step.events, vec![(0.0, (0, 7)), (1.0, (1, 7)), (2.0, (2, 7))]);
        assert_eq!(step.clock.t1, 3.0);
        assert!(step.next.is_flowing());
    }

    #[test]
    fn run_stops_with_flow() {
        let step = ticker(2).run(100.0, clock(1.0, 1.0, 0.0), 0);
        assert_eq!(step.events.len(), 2);
        assert_eq!(step.clock.t1, 2.0);
        assert!(step.next.is_stopped());
    }

    #[test]
    fn run_past_target_does_nothing() {
        let c = clock(1.0, 1.0, 5.0);
        let step = ticker(3).run(5.0, c, 0);
        assert_eq!(step.clock, c);
        assert!(step.events.is_empty());
        assert!(step.next.is_flowing());
    }
}

//! Repetition: `looping`, `repeat` and `genloop`

use tracing::trace;

use crate::clock::Clock;
use crate::flow::{flow, Event, Flow, Step};

/// A body that restarts from its template each time it stops.
struct Body<I, M> {
    template: Flow<I, M>,
    current: Flow<I, M>,
    iteration: usize,
}

impl<I, M> Clone for Body<I, M> {
    fn clone(&self) -> Self {
        Self {
            template: self.template.clone(),
            current: self.current.clone(),
            iteration: self.iteration,
        }
    }
}

impl<I, M> Body<I, M> {
    fn new(body: Flow<I, M>) -> Self {
        Self { template: body.clone(), current: body, iteration: 0 }
    }

    /// Step the current iteration, rewinding to the template when it stops.
    fn advance(self, c: Clock, input: I) -> (Clock, Vec<Event<M>>, Self) {
        let Body { template, current, iteration } = self;
        let Step { clock, events, next } = current.step(c, input);

        let body = match next.flowing() {
            Some(current) => Body { template, current, iteration },
            None => Body { current: template.clone(), template, iteration: iteration + 1 },
        };
        (clock, events, body)
    }
}

/// Repeat `body` while `condition(iteration, &input)` holds.
///
/// The condition is checked before every step. When it fails the loop stops
/// on that call without emitting anything and hands back the clock it was
/// given. Each time the body stops it is restarted from its initial state
/// and the iteration count goes up by one. A stopped body gives a stopped
/// loop.
#[doc(alias = "loop")]
pub fn looping<I, M, C>(condition: C, body: Flow<I, M>) -> Flow<I, M>
where
    I: 'static,
    M: 'static,
    C: Fn(usize, &I) -> bool + Send + Sync + 'static,
{
    if body.is_stopped() {
        return Flow::Stopped;
    }

    flow(Body::new(body), move |c: Clock, input: I, body: Body<I, M>| {
        if !condition(body.iteration, &input) {
            trace!(iterations = body.iteration, "loop condition failed");
            return (c, Vec::new(), None);
        }
        let (clock, events, body) = body.advance(c, input);
        (clock, events, Some(body))
    })
}

/// Run `body` to completion `n` times.
///
/// ```
/// use takt::{clock, emit, repeat, Flow};
///
/// let f: Flow<(), &str> = repeat(2, emit(vec!["X"]));
/// let step = f.run(1.0, clock(1.0, 1.0, 0.0), ());
/// // emit takes no time, so the run ends when the loop does
/// assert_eq!(step.events, vec![(0.0, "X"), (0.0, "X")]);
/// assert!(step.next.is_stopped());
/// ```
pub fn repeat<I, M>(n: usize, body: Flow<I, M>) -> Flow<I, M>
where
    I: 'static,
    M: 'static,
{
    looping(move |i, _: &I| i < n, body)
}

struct GenLoop<I, M, CM> {
    condition: Flow<(usize, I), CM>,
    body: Body<I, M>,
}

impl<I, M, CM> Clone for GenLoop<I, M, CM> {
    fn clone(&self) -> Self {
        Self { condition: self.condition.clone(), body: self.body.clone() }
    }
}

/// Repeat `body` for as long as the `condition` flow keeps running.
///
/// Every step first steps `condition` with `(iteration, input)`. If it
/// stops, the whole loop stops on that call and returns the clock it was
/// given. Otherwise the body is stepped as in [`looping`]. Messages from the
/// condition are never forwarded: it only decides whether to go on.
pub fn genloop<I, M, CM>(condition: Flow<(usize, I), CM>, body: Flow<I, M>) -> Flow<I, M>
where
    I: Clone + 'static,
    M: 'static,
    CM: 'static,
{
    if condition.is_stopped() || body.is_stopped() {
        return Flow::Stopped;
    }

    let state = GenLoop { condition, body: Body::new(body) };
    flow(state, |c: Clock, input: I, state: GenLoop<I, M, CM>| {
        let GenLoop { condition, body } = state;
        let condition = match condition.step(c, (body.iteration, input.clone())).next.flowing() {
            Some(condition) => condition,
            None => {
                trace!(iterations = body.iteration, "genloop condition stopped");
                return (c, Vec::new(), None);
            }
        };
        let (clock, events, body) = body.advance(c, input);
        (clock, events, Some(GenLoop { condition, body }))
    })
}

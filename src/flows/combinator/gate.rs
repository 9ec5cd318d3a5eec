//! Control-coupled execution

use tracing::trace;

use crate::clock::Clock;
use crate::flow::{flow, Flow};

struct Gate<I, M, CM> {
    control: Flow<I, CM>,
    body: Flow<I, M>,
}

impl<I, M, CM> Clone for Gate<I, M, CM> {
    fn clone(&self) -> Self {
        Self { control: self.control.clone(), body: self.body.clone() }
    }
}

/// Run `body` only for as long as `control` runs.
///
/// Each step steps `control` first. If it stops, the gate stops on that
/// call, returns the clock it was given and leaves `body` wherever it got
/// to; a stopped gate never resumes it. Otherwise `body` is stepped once
/// with the same clock and input and its events are passed on. Messages
/// from `control` are dropped.
///
/// Only `control` ends a running gate. A body that finishes early just sits
/// stopped until then, so `gate` also works as "do this, then hold".
///
/// ```
/// use takt::{clock, emit, gate, track, wait, Flow};
///
/// let hold: Flow<(), &str> = gate(wait::<(), ()>(3.0), emit(vec!["A"]));
/// let mut f = track(vec![hold, emit(vec!["B"])]);
///
/// let mut c = clock(1.0, 1.0, 0.0);
/// let mut seen = Vec::new();
/// while f.is_flowing() {
///     let step = f.step(c, ());
///     seen.push(step.events.iter().map(|(_, m)| *m).collect::<Vec<_>>());
///     c = step.clock;
///     f = step.next;
/// }
/// assert_eq!(seen, vec![vec!["A"], vec![], vec![], vec!["B"]]);
/// ```
pub fn gate<I, M, CM>(control: Flow<I, CM>, body: Flow<I, M>) -> Flow<I, M>
where
    I: Clone + 'static,
    M: 'static,
    CM: 'static,
{
    if control.is_stopped() || body.is_stopped() {
        return Flow::Stopped;
    }

    flow(Gate { control, body }, |c: Clock, input: I, gate: Gate<I, M, CM>| {
        let Gate { control, body } = gate;
        let control = match control.step(c, input.clone()).next.flowing() {
            Some(control) => control,
            None => {
                trace!("gate closed");
                return (c, Vec::new(), None);
            }
        };

        // a finished body keeps absorbing steps until control ends
        let step = body.step(c, input);
        (step.clock, step.events, Some(Gate { control, body: step.next }))
    })
}

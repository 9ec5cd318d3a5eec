//! Sequential composition

use std::collections::VecDeque;

use crate::clock::Clock;
use crate::flow::{flow, Flow};

/// Run flows one after another.
///
/// Only the head is stepped. When the head stops it is dropped, and the
/// next flow gets its first step on the following call, not the same one.
/// An empty track is stopped from the start, and a track of one flow steps
/// exactly like that flow.
///
/// ```
/// use takt::{clock, fire, track, Flow};
///
/// let f: Flow<(), char> = track(vec![fire(|_| vec!['A']), fire(|_| vec!['B'])]);
/// let c = clock(1.0, 1.0, 0.0);
///
/// let (c, events, f) = f.step(c, ()).into_parts();
/// assert_eq!(events, vec![(0.0, 'A')]);
/// let (_, events, f) = f.step(c, ()).into_parts();
/// assert_eq!(events, vec![(0.0, 'B')]);
/// assert!(f.is_stopped());
/// ```
pub fn track<I, M>(flows: impl IntoIterator<Item = Flow<I, M>>) -> Flow<I, M>
where
    I: 'static,
    M: 'static,
{
    let flows: VecDeque<Flow<I, M>> = flows.into_iter().collect();
    if flows.is_empty() {
        return Flow::Stopped;
    }

    flow(flows, |c: Clock, input: I, mut rest: VecDeque<Flow<I, M>>| {
        let head = rest.pop_front().unwrap_or_default();
        let step = head.step(c, input);

        if let Some(head) = step.next.flowing() {
            rest.push_front(head);
        }

        let next = if rest.is_empty() { None } else { Some(rest) };
        (step.clock, step.events, next)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::clock;
    use crate::flows::{emit, wait};

    #[test]
    fn empty_track_is_stopped() {
        let f: Flow<(), ()> = track(Vec::new());
        assert!(f.is_stopped());
    }

    #[test]
    fn next_flow_starts_on_the_following_step() {
        let f: Flow<(), u8> = track(vec![wait(2.0), emit(vec![1])]);
        let mut c = clock(1.0, 1.0, 0.0);
        let mut f = f;
        let mut trace = Vec::new();
        while f.is_flowing() {
            let step = f.step(c, ());
            trace.push((step.clock.t1, step.events));
            c = step.clock;
            f = step.next;
        }
        assert_eq!(trace, vec![(1.0, vec![]), (2.0, vec![]), (2.0, vec![(2.0, 1)])]);
    }

    #[test]
    fn stopped_members_take_a_step_each() {
        let f: Flow<(), u8> = track(vec![Flow::stopped(), emit(vec![7])]);
        let c = clock(1.0, 1.0, 0.0);
        let (c2, events, f) = f.step(c, ()).into_parts();
        assert_eq!(c2, c);
        assert!(events.is_empty());
        let (_, events, f) = f.step(c2, ()).into_parts();
        assert_eq!(events, vec![(0.0, 7)]);
        assert!(f.is_stopped());
    }
}

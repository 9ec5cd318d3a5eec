//! Adapting flows to a host's input and message types

use crate::clock::Clock;
use crate::flow::{flow, Flow};

/// Embed a `Flow<II, IM>` in a system whose inputs are `OI` and messages `OM`.
///
/// Every step converts the outer input with `unwrap` before handing it to
/// the inner flow, and wraps every emitted message with `wrap`. The
/// continuation stays lifted for the rest of the flow's life. Lifting a
/// stopped flow gives a stopped flow.
///
/// ```
/// use takt::{clock, fire, lift, Flow};
///
/// #[derive(Debug, PartialEq)]
/// enum Cue { Audio(u8) }
///
/// let note: Flow<u8, u8> = fire(|pitch| vec![pitch]);
/// let lifted: Flow<(u8, bool), Cue> = lift(|(pitch, _)| pitch, Cue::Audio, note);
///
/// let step = lifted.step(clock(1.0, 1.0, 0.0), (60, true));
/// assert_eq!(step.events, vec![(0.0, Cue::Audio(60))]);
/// ```
pub fn lift<OI, OM, II, IM, U, W>(unwrap: U, wrap: W, inner: Flow<II, IM>) -> Flow<OI, OM>
where
    OI: 'static,
    OM: 'static,
    II: 'static,
    IM: 'static,
    U: Fn(OI) -> II + Send + Sync + 'static,
    W: Fn(IM) -> OM + Send + Sync + 'static,
{
    if inner.is_stopped() {
        return Flow::Stopped;
    }

    flow(inner, move |c: Clock, input: OI, inner: Flow<II, IM>| {
        let step = inner.step(c, unwrap(input));
        let events = step
            .events
            .into_iter()
            .map(|(t, msg)| (t, wrap(msg)))
            .collect();
        (step.clock, events, step.next.flowing())
    })
}

impl<I, M> Flow<I, M>
where
    I: 'static,
    M: 'static,
{
    /// Wrap every message this flow emits.
    pub fn map_msg<N, W>(self, wrap: W) -> Flow<I, N>
    where
        N: 'static,
        W: Fn(M) -> N + Send + Sync + 'static,
    {
        lift(|input: I| input, wrap, self)
    }

    /// Feed this flow from a different input type.
    pub fn map_input<J, U>(self, unwrap: U) -> Flow<J, M>
    where
        J: 'static,
        U: Fn(J) -> I + Send + Sync + 'static,
    {
        lift(unwrap, |msg: M| msg, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::clock;
    use crate::flows::{delay, fire, track};

    #[test]
    fn lifted_stopped_is_stopped() {
        let f: Flow<u8, u8> = Flow::stopped();
        assert!(lift(|x: u16| x as u8, |m: u8| m as u16, f).is_stopped());
    }

    #[test]
    fn mapping_applies_to_continuations() {
        let inner: Flow<u32, u32> = track(vec![
            fire(|x: u32| vec![x]),
            fire(|x: u32| vec![x * 10]),
        ]);
        let lifted = lift(|s: &'static str| s.len() as u32, |m: u32| format!("#{}", m), inner);

        let c = clock(1.0, 1.0, 0.0);
        let (c, first, next) = lifted.step(c, "abc").into_parts();
        assert_eq!(first, vec![(0.0, "#3".to_string())]);
        assert!(next.is_flowing());

        let (_, second, next) = next.step(c, "abcd").into_parts();
        assert_eq!(second, vec![(0.0, "#40".to_string())]);
        assert!(next.is_stopped());
    }

    #[test]
    fn lift_passes_the_clock_through() {
        let d: Flow<f64, ()> = delay(2.0);
        let lifted = d.map_input(|bpm: f64| bpm / 60.0).map_msg(|m: ()| m);
        let step = lifted.run(f64::INFINITY, clock(2.0, 0.5, 0.0), 120.0);
        assert!(step.next.is_stopped());
        assert_eq!(step.clock.t1r, 2.0);
        assert_eq!(step.clock.t1, 1.0);
    }
}

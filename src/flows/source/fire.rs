//! Instantaneous message emission

use crate::clock::Clock;
use crate::flow::{flow, Flow};

/// Emit `command(input)` once, stamped at the current `clock.t1`, then stop.
///
/// The clock is returned as-is, so a `fire` takes no time.
///
/// ```
/// use takt::{clock, fire};
///
/// let step = fire(|velocity: u8| vec![("kick", velocity)]).step(clock(1.0, 1.0, 5.0), 100);
/// assert_eq!(step.events, vec![(5.0, ("kick", 100))]);
/// assert!(step.next.is_stopped());
/// ```
pub fn fire<I, M, F>(command: F) -> Flow<I, M>
where
    I: 'static,
    M: 'static,
    F: Fn(I) -> Vec<M> + Send + Sync + 'static,
{
    flow((), move |c: Clock, input: I, ()| {
        let events = command(input).into_iter().map(|msg| (c.t1, msg)).collect();
        (c, events, None)
    })
}

/// [`fire`] with a fixed list of messages, ignoring the input.
pub fn emit<I, M>(msgs: Vec<M>) -> Flow<I, M>
where
    I: 'static,
    M: Clone + Send + Sync + 'static,
{
    fire(move |_: I| msgs.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::clock;

    #[test]
    fn fires_at_interval_start() {
        let c = clock(1.0, 2.0, 5.0);
        let (c2, events, next) = fire(|_: ()| vec!['A']).step(c, ()).into_parts();
        assert_eq!(events, vec![(5.0, 'A')]);
        assert_eq!(c2, c);
        assert!(next.is_stopped());
    }

    #[test]
    fn all_messages_share_the_timestamp() {
        let c = clock(1.0, 1.0, 3.0).tick();
        let events = emit::<(), _>(vec![1, 2, 3]).step(c, ()).events;
        assert_eq!(events, vec![(4.0, 1), (4.0, 2), (4.0, 3)]);
    }

    #[test]
    fn empty_command_still_stops() {
        let step = fire(|_: ()| Vec::<u8>::new()).step(clock(1.0, 1.0, 0.0), ());
        assert!(step.events.is_empty());
        assert!(step.next.is_stopped());
    }
}

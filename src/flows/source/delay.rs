//! Pure time consumption

use tracing::trace;

use crate::clock::{Clock, Rate, TimeInterval};
use crate::flow::{flow, Flow, Transition};

/// Consume exactly `duration` of virtual time, emitting nothing.
///
/// The input of each step is the rate to tick the clock at, so the caller
/// can bend the tempo while the delay runs. Each step counts `rate * dt`
/// toward `duration`, using the rate it was given for that step, and ticks
/// the clock at that same rate. The step that would reach or pass `duration`
/// instead jumps the clock to the exact boundary and stops.
///
/// With a constant rate of 1 and interval `dt` this takes `ceil(duration / dt)`
/// steps. The rate must be non-zero.
///
/// ```
/// use takt::{clock, delay, Flow};
///
/// let d: Flow<f64, ()> = delay(2.5);
/// let step = d.run(f64::INFINITY, clock(1.0, 1.0, 0.0), 1.0);
/// assert!(step.next.is_stopped());
/// assert_eq!(step.clock.t1r, 2.5);
/// ```
pub fn delay<M>(duration: TimeInterval) -> Flow<Rate, M>
where
    M: 'static,
{
    flow(0.0, move |c: Clock, rate: Rate, elapsed: TimeInterval| {
        consume(c, rate, elapsed, duration)
    })
}

/// Like [`delay`], but ticks at the clock's own `rate` and ignores the input.
///
/// Use this inside flows whose input is not a rate.
pub fn wait<I, M>(duration: TimeInterval) -> Flow<I, M>
where
    I: 'static,
    M: 'static,
{
    flow(0.0, move |c: Clock, _: I, elapsed: TimeInterval| {
        consume(c, c.rate, elapsed, duration)
    })
}

fn consume<M>(
    c: Clock,
    rate: Rate,
    elapsed: TimeInterval,
    duration: TimeInterval,
) -> Transition<TimeInterval, M> {
    let elapsed_after = elapsed + rate * c.dt;

    if elapsed_after < duration {
        (c.step(rate), Vec::new(), Some(elapsed_after))
    } else {
        let boundary = c.t1r + (duration - elapsed);
        trace!(duration, boundary, "delay reached its end");
        (c.jump_to_rel(rate, boundary), Vec::new(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::clock;
    use proptest::prelude::*;

    fn drive(d: Flow<Rate, ()>, mut c: Clock, rate: Rate) -> (usize, Clock, usize) {
        let mut flow = d;
        let mut steps = 0;
        let mut events = 0;
        while flow.is_flowing() {
            let step = flow.step(c, rate);
            c = step.clock;
            events += step.events.len();
            flow = step.next;
            steps += 1;
        }
        (steps, c, events)
    }

    #[test]
    fn exact_multiple() {
        let (steps, c, events) = drive(delay(9.0), clock(1.0, 3.0, 0.0), 1.0);
        assert_eq!(steps, 3);
        assert_eq!(c.t1r, 9.0);
        assert_eq!(c.t1, 9.0);
        assert_eq!(events, 0);
    }

    #[test]
    fn clamps_partial_interval() {
        let (steps, c, _) = drive(delay(10.0), clock(1.0, 3.0, 0.0), 1.0);
        assert_eq!(steps, 4);
        assert_eq!(c.t1r, 10.0);
        assert_eq!(c.t1, 10.0);
        assert_eq!(c.t2, 13.0);
    }

    #[test]
    fn faster_rate_consumes_less_absolute_time() {
        let (steps, c, _) = drive(delay(4.0), clock(2.0, 1.0, 0.0), 2.0);
        assert_eq!(steps, 2);
        assert_eq!(c.t1r, 4.0);
        assert_eq!(c.t1, 2.0);
    }

    #[test]
    fn input_rate_counts_even_when_the_clock_disagrees() {
        // clock built at rate 1, delay driven at rate 2
        let (steps, c, _) = drive(delay(4.0), clock(1.0, 1.0, 0.0), 2.0);
        assert_eq!(steps, 2);
        assert_eq!(c.t1, 2.0);
        assert_eq!(c.rate, 2.0);
    }

    #[test]
    fn wait_uses_the_clock_rate() {
        let mut f: Flow<&str, ()> = wait(3.0);
        let mut c = clock(0.5, 2.0, 0.0);
        let mut steps = 0;
        while f.is_flowing() {
            let step = f.step(c, "ignored");
            c = step.clock;
            f = step.next;
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(c.t1r, 3.0);
        assert_eq!(c.t1, 6.0);
    }

    #[test]
    fn zero_duration_stops_in_place() {
        let c = clock(1.0, 1.0, 4.0);
        let step = delay::<()>(0.0).step(c, 1.0);
        assert!(step.next.is_stopped());
        assert_eq!(step.clock, c);
    }

    proptest! {
        #[test]
        fn takes_ceil_steps_and_lands_on_duration(
            duration in 0.01f64..500.0,
            dt in 0.05f64..50.0,
        ) {
            let (steps, c, events) = drive(delay(duration), clock(1.0, dt, 0.0), 1.0);
            let expected = (duration / dt).ceil() as usize;
            // float rounding near an exact multiple may settle either side
            prop_assert!(steps == expected || steps == expected + 1 || steps + 1 == expected);
            prop_assert!((c.t1r - duration).abs() < 1e-9 * duration.max(1.0));
            prop_assert_eq!(events, 0);
        }
    }
}

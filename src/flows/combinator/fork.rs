//! Parallel composition

use itertools::Itertools;
use tracing::trace;

use crate::clock::Clock;
use crate::flow::{flow, Flow};

/// Branches of a fork, before and after the first step.
enum Branches<I, M> {
    /// Not stepped yet; branches get a copy of the clock on first activation
    Pending(Vec<Flow<I, M>>),
    /// Each branch with its own private clock
    Running(Vec<(Clock, Flow<I, M>)>),
}

impl<I, M> Clone for Branches<I, M> {
    fn clone(&self) -> Self {
        match self {
            Branches::Pending(flows) => Branches::Pending(flows.clone()),
            Branches::Running(branches) => Branches::Running(branches.clone()),
        }
    }
}

/// Run flows side by side.
///
/// On its first step the fork copies the current clock into every branch;
/// from then on each branch advances its own copy, so a branch that jumps
/// or syncs does not affect its siblings. Every step steps each remaining
/// branch with the same input, merges their events and drops the branches
/// that stopped.
///
/// The fork's own clock ticks once per step regardless of the branches.
/// When the last branch stops the fork stops and returns the clock it was
/// given. An empty fork is stopped from the start.
pub fn fork<I, M>(flows: impl IntoIterator<Item = Flow<I, M>>) -> Flow<I, M>
where
    I: Clone + 'static,
    M: 'static,
{
    let flows = flows.into_iter().collect_vec();
    if flows.is_empty() {
        return Flow::Stopped;
    }

    flow(Branches::Pending(flows), |c: Clock, input: I, branches: Branches<I, M>| {
        let branches = match branches {
            Branches::Pending(flows) => flows.into_iter().map(|f| (c, f)).collect_vec(),
            Branches::Running(branches) => branches,
        };

        let mut events = Vec::new();
        let remaining = branches
            .into_iter()
            .filter_map(|(branch_clock, f)| {
                let step = f.step(branch_clock, input.clone());
                events.extend(step.events);
                step.next.flowing().map(|next| (step.clock, next))
            })
            .collect_vec();

        if remaining.is_empty() {
            trace!("fork: all branches stopped");
            (c, events, None)
        } else {
            (c.tick(), events, Some(Branches::Running(remaining)))
        }
    })
}

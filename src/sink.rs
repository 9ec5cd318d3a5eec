//! Destinations for dispatched events

use crate::flow::Event;

/// Somewhere to hand events to once a flow has produced them.
///
/// A sink that cannot take an event right now gives it back as `Err(event)`.
pub trait EventSink<M> {
    fn dispatch(&mut self, event: Event<M>) -> Result<(), Event<M>>;
}

/// Collects everything; never full.
impl<M> EventSink<M> for Vec<Event<M>> {
    #[inline]
    fn dispatch(&mut self, event: Event<M>) -> Result<(), Event<M>> {
        self.push(event);
        Ok(())
    }
}

/// Hands events to another thread (e.g. an audio callback) without locking.
#[cfg(feature = "rtrb_sink")]
impl<M> EventSink<M> for rtrb::Producer<Event<M>> {
    #[inline]
    fn dispatch(&mut self, event: Event<M>) -> Result<(), Event<M>> {
        self.push(event).map_err(|rtrb::PushError::Full(e)| e)
    }
}

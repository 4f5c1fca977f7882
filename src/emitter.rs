//! Event emitter handed to effects and input sources.

use flume::Sender;

use crate::Event;

/// Handle for feeding events back into the runtime.
///
/// Effects receive an `Emitter` when they execute, and input pumps such as
/// [`terminal::spawn_input`](crate::terminal::spawn_input) hold one for the
/// lifetime of the program.
///
/// `Emitter` wraps a channel sender, making it cheap to clone and safe to
/// use from any thread.
///
/// # Example
///
/// ```rust
/// use oxide_polymer::{Effect, Event};
///
/// #[derive(Debug)]
/// enum Msg { Loaded(u32) }
///
/// let effect: Effect<Msg> = Effect::from_fn(|emitter| {
///     emitter.send(Msg::Loaded(7));
/// });
///
/// let events = effect.into_events();
/// assert!(matches!(events[0], Event::Message(Msg::Loaded(7))));
/// ```
pub struct Emitter<M>(pub(crate) Sender<Event<M>>);

impl<M> Clone for Emitter<M> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<M> Emitter<M> {
    /// Create a new emitter from a channel sender.
    pub(crate) fn new(sender: Sender<Event<M>>) -> Self {
        Self(sender)
    }

    /// Emit an event.
    ///
    /// Returns `false` once the receiving runtime has gone away.
    pub fn emit(&self, event: Event<M>) -> bool {
        self.0.send(event).is_ok()
    }

    /// Emit an application message.
    pub fn send(&self, message: M) -> bool {
        self.emit(Event::Message(message))
    }
}

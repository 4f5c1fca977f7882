//! Declarative effect system for describing deferred event delivery.

use std::any::Any;

use tracing::Level;

use crate::{Component, Context, Emitter, Error, Event, Nav, Signal};

/// Deferred unit of work that yields events when the runtime executes it.
///
/// Effects are returned from [`Component::update`] and [`Component::init`]
/// alongside the state transition. The runtime hands each effect to its
/// [`Spawner`](crate::Spawner); once returned an effect cannot be retracted.
///
/// # Example
///
/// ```rust
/// use oxide_polymer::{Effect, Event};
///
/// #[derive(Debug)]
/// enum Msg { Load, Loaded(String) }
///
/// // Trigger a follow-up message
/// let effect = Effect::message(Msg::Load);
///
/// // Combine multiple effects
/// let effect = Effect::batch(vec![
///     Effect::message(Msg::Load),
///     Effect::perform(|| Event::Message(Msg::Loaded("cached".to_string()))),
/// ]);
/// assert_eq!(effect.into_events().len(), 2);
///
/// // No side effects
/// let effect: Effect<Msg> = Effect::none();
/// assert!(effect.is_none());
/// ```
#[allow(clippy::type_complexity)]
pub struct Effect<M>(Option<Box<dyn FnOnce(&Emitter<M>) + Send + 'static>>);

impl<M> Effect<M> {
    /// Create an empty effect.
    ///
    /// Prefer this when semantically indicating "no side effects".
    pub fn none() -> Self {
        Self(None)
    }

    /// Whether this effect does nothing when executed.
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Run the effect, feeding whatever it produces into `emitter`.
    pub fn execute(self, emitter: &Emitter<M>) {
        if let Some(work) = self.0 {
            work(emitter);
        }
    }

    /// Execute the effect synchronously and collect the events it emits.
    ///
    /// Useful when a caller needs to inspect a diagnostic before deciding
    /// whether to forward it.
    pub fn into_events(self) -> Vec<Event<M>> {
        let (sender, receiver) = flume::unbounded();
        self.execute(&Emitter::new(sender));
        receiver.drain().collect()
    }
}

impl<M: Send + 'static> Effect<M> {
    /// Create an effect from arbitrary work against the emitter.
    pub fn from_fn<F>(work: F) -> Self
    where
        F: FnOnce(&Emitter<M>) + Send + 'static,
    {
        Self(Some(Box::new(work)))
    }

    /// Create an effect delivering a single event.
    pub fn just(event: Event<M>) -> Self {
        Self::from_fn(move |emitter| {
            emitter.emit(event);
        })
    }

    /// Create an effect delivering an application message.
    pub fn message(message: M) -> Self {
        Self::just(Event::Message(message))
    }

    /// Run a computation when the effect executes and deliver its result.
    pub fn perform<F>(work: F) -> Self
    where
        F: FnOnce() -> Event<M> + Send + 'static,
    {
        Self::from_fn(move |emitter| {
            emitter.emit(work());
        })
    }

    /// Combine multiple effects into a single effect.
    ///
    /// Empty effects are dropped; the survivors execute in order.
    pub fn batch(effects: Vec<Effect<M>>) -> Self {
        let mut effects: Vec<_> = effects.into_iter().filter(|e| !e.is_none()).collect();
        match effects.len() {
            0 => Self::none(),
            1 => effects.remove(0),
            _ => Self::from_fn(move |emitter| {
                for effect in effects {
                    effect.execute(emitter);
                }
            }),
        }
    }

    /// Deliver an [`Event::Error`].
    pub fn error(error: Error) -> Self {
        Self::just(Event::Error(error))
    }

    /// Deliver an [`Event::Trace`] diagnostic.
    pub fn trace(level: Level, message: impl Into<String>) -> Self {
        Self::just(Event::Trace(Signal::new(level, message)))
    }

    /// Ask the runtime to stop.
    pub fn quit() -> Self {
        Self::just(Event::Quit)
    }

    /// Push `component` onto the nearest navigation stack.
    pub fn push<C>(component: C) -> Self
    where
        C: Component<M> + 'static,
    {
        Self::just(Event::Nav(Nav::Push(Box::new(component))))
    }

    /// Pop the top of the nearest navigation stack.
    pub fn pop() -> Self {
        Self::just(Event::Nav(Nav::Pop))
    }

    /// Replace the top of the nearest navigation stack.
    pub fn replace<C>(component: C) -> Self
    where
        C: Component<M> + 'static,
    {
        Self::just(Event::Nav(Nav::Replace(Box::new(component))))
    }

    /// Truncate the nearest navigation stack to `component`, or to its seed when `None`.
    pub fn reset(component: Option<Box<dyn Component<M>>>) -> Self {
        Self::just(Event::Nav(Nav::Reset(component)))
    }

    /// Deliver a context value to the active subtree.
    pub fn context<X>(value: X) -> Self
    where
        X: Any + Send + Sync,
    {
        Self::just(Event::Context(Context::new(value)))
    }
}

impl<M> Default for Effect<M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<M> std::fmt::Debug for Effect<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            f.write_str("Effect::none")
        } else {
            f.write_str("Effect(..)")
        }
    }
}

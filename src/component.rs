//! The component contract every piece of UI state implements.

use crate::{AtomId, ContextAware, Effect, Event};

/// What a component wants to happen to itself after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Stay installed.
    Keep,
    /// The component is finished and asks its owner to drop it.
    ///
    /// Routers clear the slot, the [`Host`](crate::Host) quits when its root
    /// is done, and a [`Lens`](crate::Lens) passes the signal through.
    /// A [`Chain`](crate::Chain) ignores it: leaves leave a chain by
    /// returning [`Effect::pop`].
    Done,
}

/// Component contract.
///
/// Implementations provide two required operations:
/// - [`update`](Self::update): react to an [`Event`], mutating in place and
///   returning a [`Next`] plus a follow-up [`Effect`]
/// - [`render`](Self::render): draw the current state as a string
///
/// The remaining methods are optional capabilities with inert defaults.
/// Containers query them directly instead of inspecting types at runtime.
///
/// # Example
///
/// ```rust
/// use oxide_polymer::{Component, Effect, Event, Next};
///
/// enum Msg { Increment }
///
/// #[derive(Default)]
/// struct Counter { count: i32 }
///
/// impl Component<Msg> for Counter {
///     fn update(&mut self, event: Event<Msg>) -> (Next, Effect<Msg>) {
///         if let Event::Message(Msg::Increment) = event {
///             self.count += 1;
///         }
///         (Next::Keep, Effect::none())
///     }
///
///     fn render(&self) -> String {
///         format!("count: {}", self.count)
///     }
/// }
/// ```
pub trait Component<M>: Send {
    /// Reduce an event into new state and a follow-up effect.
    ///
    /// Must accept every event, returning [`Next::Keep`] and
    /// [`Effect::none`] for events it does not care about.
    fn update(&mut self, event: Event<M>) -> (Next, Effect<M>);

    /// Render the current state.
    ///
    /// Never fails; inconsistent state renders as an empty or diagnostic string.
    fn render(&self) -> String;

    /// Startup effect, requested when the component becomes reachable.
    fn init(&mut self) -> Effect<M> {
        Effect::none()
    }

    /// Human-readable name for diagnostics.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn id(&self) -> Option<AtomId> {
        None
    }

    /// The component this one wraps or currently shows, if it is scaffolding.
    ///
    /// Used by [`resolve`] to reach the leaf behind lenses and containers.
    fn inner(&self) -> Option<&dyn Component<M>> {
        None
    }

    /// Context capability; `None` means context is not accepted.
    fn context_sink(&mut self) -> Option<&mut dyn ContextAware> {
        None
    }
}

impl<M, C> Component<M> for Box<C>
where
    C: Component<M> + ?Sized,
{
    fn update(&mut self, event: Event<M>) -> (Next, Effect<M>) {
        (**self).update(event)
    }

    fn render(&self) -> String {
        (**self).render()
    }

    fn init(&mut self) -> Effect<M> {
        (**self).init()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn id(&self) -> Option<AtomId> {
        (**self).id()
    }

    fn inner(&self) -> Option<&dyn Component<M>> {
        (**self).inner()
    }

    fn context_sink(&mut self) -> Option<&mut dyn ContextAware> {
        (**self).context_sink()
    }
}

/// Unwrap lenses and containers down to the leaf the user actually wrote.
///
/// Follows [`Component::inner`] until a component reports none, so
/// `resolve(resolve(x))` is always `resolve(x)`.
pub fn resolve<'a, M>(component: &'a dyn Component<M>) -> &'a dyn Component<M> {
    let mut current = component;
    while let Some(inner) = current.inner() {
        current = inner;
    }
    current
}

/// Whether two component references point at the same value.
pub fn same_component<M>(a: &dyn Component<M>, b: &dyn Component<M>) -> bool {
    std::ptr::addr_eq(a, b)
}

/// `"a::b::Name<c::D>"` -> `"Name"`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    head.rsplit("::").next().unwrap_or(head)
}

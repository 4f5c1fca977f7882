//! Typed side-channel for pushing values into the active subtree.
//!
//! A parent delivers a [`Context`] either as an ordinary [`Event::Context`]
//! (reaching whatever the event reaches) or through [`deliver_context`],
//! which checks the receiver's [`ContextAware`] capability first and skips
//! receivers that lack it.
//!
//! Containers do not implement the capability themselves. [`Chain`],
//! [`Dual`], [`Tri`] and [`Auto`] each expose `forward_context`, which hands
//! the value to their children one level down. When an [`Event::Context`]
//! reaches a container's `update`, the active child gets it through its
//! capability; a child without one receives the raw event, which is how a
//! nested container passes it further down.
//!
//! [`Event::Context`]: crate::Event::Context
//! [`Chain`]: crate::Chain
//! [`Dual`]: crate::Dual
//! [`Tri`]: crate::Tri
//! [`Auto`]: crate::Auto

use std::any::Any;
use std::sync::Arc;

use tracing::trace;

use crate::Component;

/// A single value of any type, shared cheaply between events.
#[derive(Clone)]
pub struct Context(Arc<dyn Any + Send + Sync>);

impl Context {
    pub fn new<X: Any + Send + Sync>(value: X) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the payload if it has type `X`.
    pub fn get<X: Any>(&self) -> Option<&X> {
        self.0.downcast_ref::<X>()
    }

    pub fn is<X: Any>(&self) -> bool {
        self.0.is::<X>()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Context(..)")
    }
}

/// Capability of components that accept context values.
///
/// Expose it through [`Component::context_sink`].
///
/// # Example
///
/// ```rust
/// use oxide_polymer::{Component, Context, ContextAware, Effect, Event, Next};
///
/// #[derive(Default)]
/// struct Greeting { name: String }
///
/// impl ContextAware for Greeting {
///     fn set_context(&mut self, ctx: &Context) {
///         if let Some(name) = ctx.get::<String>() {
///             self.name = name.clone();
///         }
///     }
/// }
///
/// impl Component<()> for Greeting {
///     fn update(&mut self, _event: Event<()>) -> (Next, Effect<()>) {
///         (Next::Keep, Effect::none())
///     }
///     fn render(&self) -> String { format!("Hello, {}!", self.name) }
///     fn context_sink(&mut self) -> Option<&mut dyn ContextAware> { Some(self) }
/// }
///
/// let mut greeting = Greeting::default();
/// assert!(oxide_polymer::deliver_context::<(), _>(&mut greeting, &Context::new("Ada".to_string())));
/// assert_eq!(greeting.render(), "Hello, Ada!");
/// ```
pub trait ContextAware {
    fn set_context(&mut self, ctx: &Context);
}

/// Hand `ctx` to `target` if it accepts context.
///
/// Returns whether the value was delivered. Receivers without the capability
/// are skipped silently; that is the common case, not an error.
pub fn deliver_context<M, C>(target: &mut C, ctx: &Context) -> bool
where
    C: Component<M> + ?Sized,
{
    match target.context_sink() {
        Some(sink) => {
            sink.set_context(ctx);
            true
        }
        None => {
            trace!(component = target.name(), "context not accepted");
            false
        }
    }
}

//! Navigation stack with back/forward semantics.

use tracing::{debug, trace};

use crate::{resolve, Component, Context, Effect, Error, Event, Nav, Next};

/// A push/pop/replace/reset stack of components.
///
/// The top of the stack is active: it receives every event that is not a
/// [`Nav`] request and is the only element rendered. The stack is seeded
/// with one component and never drops below one element; popping the seed
/// is refused with an [`Error::StackEmpty`] diagnostic.
///
/// Whenever a structural change alters the top, the new top's
/// [`init`](Component::init) effect is returned so newly visible screens
/// start themselves.
///
/// An [`Event::Context`] goes through the top's
/// [`context_sink`](Component::context_sink) when it has one; a top without
/// the capability receives the raw event instead.
///
/// A top that returns [`Next::Done`] stays on the stack. Leaves leave a
/// chain by returning [`Effect::pop`].
///
/// # Example
///
/// ```rust
/// use oxide_polymer::{Chain, Component, Effect, Event, Nav, Next};
///
/// struct Screen(&'static str);
///
/// impl Component<()> for Screen {
///     fn update(&mut self, _event: Event<()>) -> (Next, Effect<()>) {
///         (Next::Keep, Effect::none())
///     }
///     fn render(&self) -> String { self.0.to_string() }
/// }
///
/// let mut chain = Chain::new(Screen("menu"));
/// chain.update(Event::Nav(Nav::Push(Box::new(Screen("detail")))));
/// assert_eq!(chain.depth(), 2);
/// assert_eq!(chain.render(), "detail");
///
/// chain.update(Event::Nav(Nav::Pop));
/// assert_eq!(chain.render(), "menu");
/// ```
pub struct Chain<M> {
    stack: Vec<Box<dyn Component<M>>>,
    name: String,
}

impl<M: Send + 'static> Chain<M> {
    /// Create a chain seeded with `seed`.
    pub fn new<C>(seed: C) -> Self
    where
        C: Component<M> + 'static,
    {
        Self::from_box(Box::new(seed))
    }

    /// Create a chain seeded with an already boxed component.
    pub fn from_box(seed: Box<dyn Component<M>>) -> Self {
        Self {
            stack: vec![seed],
            name: "chain".to_string(),
        }
    }

    /// Create a chain from a prepared stack, bottom first.
    ///
    /// # Panics
    ///
    /// Panics if `stack` is empty; a chain always needs a seed.
    pub fn from_stack(stack: Vec<Box<dyn Component<M>>>) -> Self {
        assert!(!stack.is_empty(), "chain requires an initial component");
        Self {
            stack,
            name: "chain".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The component at the top of the stack.
    pub fn active(&self) -> Option<&dyn Component<M>> {
        self.stack.last().map(|c| c.as_ref())
    }

    pub fn active_mut(&mut self) -> Option<&mut Box<dyn Component<M>>> {
        self.stack.last_mut()
    }

    /// The component `n` positions below the top; `peek(0)` is the top.
    pub fn peek(&self, n: usize) -> Option<&dyn Component<M>> {
        let depth = self.stack.len();
        if n >= depth {
            return None;
        }
        Some(self.stack[depth - 1 - n].as_ref())
    }

    /// The bottom of the stack, restored by a `Reset(None)`.
    pub fn seed(&self) -> Option<&dyn Component<M>> {
        self.stack.first().map(|c| c.as_ref())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Add `component` on top. Does not initialize it.
    pub fn push(&mut self, component: Box<dyn Component<M>>) {
        trace!(chain = %self.name, pushed = component.name(), "push");
        self.stack.push(component);
    }

    /// Remove and return the top, refusing to remove the seed.
    pub fn pop(&mut self) -> Option<Box<dyn Component<M>>> {
        if self.stack.len() <= 1 {
            debug!(chain = %self.name, "refusing to pop the last component");
            return None;
        }
        let popped = self.stack.pop();
        trace!(chain = %self.name, depth = self.stack.len(), "pop");
        popped
    }

    /// Overwrite the top, returning what was there.
    pub fn replace(&mut self, component: Box<dyn Component<M>>) -> Option<Box<dyn Component<M>>> {
        trace!(chain = %self.name, replacement = component.name(), "replace");
        match self.stack.last_mut() {
            Some(top) => Some(std::mem::replace(top, component)),
            None => {
                self.stack.push(component);
                None
            }
        }
    }

    /// Truncate to `[component]`, or to `[seed]` when `None`.
    pub fn reset(&mut self, component: Option<Box<dyn Component<M>>>) {
        trace!(chain = %self.name, "reset");
        match component {
            Some(component) => {
                self.stack.clear();
                self.stack.push(component);
            }
            None => self.stack.truncate(1),
        }
    }

    /// The startup effect of the current top.
    pub fn init_active(&mut self) -> Effect<M> {
        match self.stack.last_mut() {
            Some(top) => top.init(),
            None => Effect::none(),
        }
    }

    /// Hand `ctx` to the top if it accepts context.
    pub fn forward_context(&mut self, ctx: &Context) -> bool {
        match self.stack.last_mut() {
            Some(top) => crate::deliver_context::<M, _>(top, ctx),
            None => false,
        }
    }

    /// The leaf behind the top, looking through nested wrappers.
    pub fn resolved(&self) -> Option<&dyn Component<M>> {
        self.active().map(resolve)
    }

    fn navigate(&mut self, nav: Nav<M>) -> Effect<M> {
        match nav {
            Nav::Push(component) => {
                self.push(component);
                self.init_active()
            }
            Nav::Pop => match self.pop() {
                Some(_) => self.init_active(),
                None => Effect::error(Error::StackEmpty),
            },
            Nav::Replace(component) => {
                self.replace(component);
                self.init_active()
            }
            Nav::Reset(component) => {
                self.reset(component);
                self.init_active()
            }
        }
    }
}

impl<M: Send + 'static> Component<M> for Chain<M> {
    fn update(&mut self, event: Event<M>) -> (Next, Effect<M>) {
        let event = match event {
            Event::Nav(nav) => return (Next::Keep, self.navigate(nav)),
            event => event,
        };

        let Some(top) = self.stack.last_mut() else {
            if event.is_diagnostic() {
                return (Next::Keep, Effect::none());
            }
            return (Next::Keep, Effect::error(Error::StackEmpty));
        };

        if let Event::Context(ctx) = &event {
            if crate::deliver_context::<M, _>(top, ctx) {
                return (Next::Keep, Effect::none());
            }
        }

        let (next, effect) = top.update(event);
        if next == Next::Done {
            debug!(chain = %self.name, top = top.name(), "top is done; it stays until popped");
        }
        (Next::Keep, effect)
    }

    fn render(&self) -> String {
        self.active().map(|top| top.render()).unwrap_or_default()
    }

    fn init(&mut self) -> Effect<M> {
        self.init_active()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn inner(&self) -> Option<&dyn Component<M>> {
        self.active()
    }
}

//! Lifecycle lens: observation hooks around any component.

use tracing::trace;

use crate::{resolve, AtomId, Component, ContextAware, Effect, Error, Event, Next, Signal};

type InitHook<M> = Box<dyn Fn(&dyn Component<M>, &Effect<M>) + Send>;
type BeforeUpdateHook<M> = Box<dyn Fn(&dyn Component<M>, &Event<M>) + Send>;
type AfterUpdateHook<M> = Box<dyn Fn(&dyn Component<M>, Next, &Effect<M>) + Send>;
type RenderHook<M> = Box<dyn Fn(&dyn Component<M>, &str) + Send>;
type ErrorHook<M> = Box<dyn Fn(&dyn Component<M>, &Error) + Send>;
type TraceHook<M> = Box<dyn Fn(&dyn Component<M>, &Signal) + Send>;

/// The optional callbacks a [`Lens`] invokes.
///
/// Every hook receives the resolved leaf (see [`resolve`]) rather than the
/// wrapper scaffolding around it.
pub struct Hooks<M> {
    pub on_init: Option<InitHook<M>>,
    pub before_update: Option<BeforeUpdateHook<M>>,
    pub after_update: Option<AfterUpdateHook<M>>,
    pub on_render: Option<RenderHook<M>>,
    pub on_error: Option<ErrorHook<M>>,
    pub on_trace: Option<TraceHook<M>>,
}

impl<M> Default for Hooks<M> {
    fn default() -> Self {
        Self {
            on_init: None,
            before_update: None,
            after_update: None,
            on_render: None,
            on_error: None,
            on_trace: None,
        }
    }
}

/// Transparent decorator that reports lifecycle events to [`Hooks`].
///
/// A lens owns exactly one component and proxies every operation to it.
/// Hooks only observe: the wrapped component's render output, effects and
/// [`Next`] signal come back out unchanged, and the lens forwards the
/// context capability of whatever it wraps.
///
/// For an [`Event::Error`] the `on_error` hook fires first, for an
/// [`Event::Trace`] the `on_trace` hook; then `before_update`, the wrapped
/// update, and `after_update`.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use oxide_polymer::{Component, Effect, Event, Lens, Next};
///
/// #[derive(Default)]
/// struct Counter(u32);
///
/// impl Component<()> for Counter {
///     fn update(&mut self, _event: Event<()>) -> (Next, Effect<()>) {
///         self.0 += 1;
///         (Next::Keep, Effect::none())
///     }
///     fn render(&self) -> String { self.0.to_string() }
/// }
///
/// let updates = Arc::new(Mutex::new(0));
/// let seen = updates.clone();
/// let mut lens: Lens<(), Counter> = Lens::new(Counter::default())
///     .after_update(move |_leaf, _next, _effect| *seen.lock().unwrap() += 1);
///
/// lens.update(Event::Message(()));
/// assert_eq!(lens.render(), "1");
/// assert_eq!(*updates.lock().unwrap(), 1);
/// ```
pub struct Lens<M, C = Box<dyn Component<M>>> {
    inner: C,
    hooks: Hooks<M>,
}

impl<M, C> Lens<M, C>
where
    M: Send + 'static,
    C: Component<M>,
{
    pub fn new(inner: C) -> Self {
        Self::with_hooks(inner, Hooks::default())
    }

    pub fn with_hooks(inner: C, hooks: Hooks<M>) -> Self {
        Self { inner, hooks }
    }

    pub fn on_init<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Component<M>, &Effect<M>) + Send + 'static,
    {
        self.hooks.on_init = Some(Box::new(hook));
        self
    }

    pub fn before_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Component<M>, &Event<M>) + Send + 'static,
    {
        self.hooks.before_update = Some(Box::new(hook));
        self
    }

    pub fn after_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Component<M>, Next, &Effect<M>) + Send + 'static,
    {
        self.hooks.after_update = Some(Box::new(hook));
        self
    }

    pub fn on_render<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Component<M>, &str) + Send + 'static,
    {
        self.hooks.on_render = Some(Box::new(hook));
        self
    }

    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Component<M>, &Error) + Send + 'static,
    {
        self.hooks.on_error = Some(Box::new(hook));
        self
    }

    pub fn on_trace<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Component<M>, &Signal) + Send + 'static,
    {
        self.hooks.on_trace = Some(Box::new(hook));
        self
    }

    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    /// The leaf component hooks report against.
    pub fn leaf(&self) -> &dyn Component<M> {
        resolve::<M>(&self.inner)
    }
}

impl<M, C> Component<M> for Lens<M, C>
where
    M: Send + 'static,
    C: Component<M>,
{
    fn update(&mut self, event: Event<M>) -> (Next, Effect<M>) {
        {
            let leaf = self.leaf();
            match &event {
                Event::Error(err) => {
                    if let Some(hook) = &self.hooks.on_error {
                        hook(leaf, err);
                    }
                }
                Event::Trace(signal) => {
                    if let Some(hook) = &self.hooks.on_trace {
                        hook(leaf, signal);
                    }
                }
                _ => {}
            }
            if let Some(hook) = &self.hooks.before_update {
                hook(leaf, &event);
            }
        }

        let (next, effect) = self.inner.update(event);

        if let Some(hook) = &self.hooks.after_update {
            hook(self.leaf(), next, &effect);
        }
        if next == Next::Done {
            trace!(component = self.inner.name(), "wrapped component is done");
        }
        (next, effect)
    }

    fn render(&self) -> String {
        let rendered = self.inner.render();
        if let Some(hook) = &self.hooks.on_render {
            hook(self.leaf(), &rendered);
        }
        rendered
    }

    fn init(&mut self) -> Effect<M> {
        let effect = self.inner.init();
        if let Some(hook) = &self.hooks.on_init {
            hook(self.leaf(), &effect);
        }
        effect
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn id(&self) -> Option<AtomId> {
        self.inner.id()
    }

    fn inner(&self) -> Option<&dyn Component<M>> {
        Some(&self.inner as &dyn Component<M>)
    }

    fn context_sink(&mut self) -> Option<&mut dyn ContextAware> {
        self.inner.context_sink()
    }
}

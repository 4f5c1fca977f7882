use std::marker::PhantomData;

use crate::router::{
    as_dyn, configure_slot, deliver_slot, init_slot, install_slot, render_slot, route_slot,
    unroutable,
};
use crate::{Component, Context, Effect, Event, Next};

/// Which slot of a [`Dual`] receives events and renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DualSlot {
    /// Neither slot; every event answers with a no-active-slot diagnostic.
    #[default]
    Skip,
    A,
    B,
}

/// Two-slot multiplexer with an explicit target.
///
/// Each slot holds its own concrete component type, so a parent can reach
/// into a child (for example to push new geometry into a list) without any
/// downcasting. Changing the target is a plain assignment and never
/// initializes the newly addressed child.
///
/// # Example
///
/// ```rust
/// use oxide_polymer::{Component, Dual, DualSlot, Effect, Event, Next};
///
/// #[derive(Default)]
/// struct Label(String);
///
/// impl Component<()> for Label {
///     fn update(&mut self, _event: Event<()>) -> (Next, Effect<()>) {
///         (Next::Keep, Effect::none())
///     }
///     fn render(&self) -> String { self.0.clone() }
/// }
///
/// let mut router: Dual<(), Label, Label> = Dual::new(DualSlot::A)
///     .with_a(Label("left".into()))
///     .with_b(Label("right".into()));
/// assert_eq!(router.render(), "left");
///
/// router.set_target(DualSlot::B);
/// assert_eq!(router.render(), "right");
/// ```
pub struct Dual<M, A, B> {
    a: Option<A>,
    b: Option<B>,
    target: DualSlot,
    name: String,
    _msg: PhantomData<fn() -> M>,
}

impl<M, A, B> Dual<M, A, B>
where
    M: Send + 'static,
    A: Component<M>,
    B: Component<M>,
{
    /// An empty router addressing `target`.
    pub fn new(target: DualSlot) -> Self {
        Self {
            a: None,
            b: None,
            target,
            name: "dual".to_string(),
            _msg: PhantomData,
        }
    }

    /// Seed slot A without initializing it.
    pub fn with_a(mut self, a: A) -> Self {
        self.a = Some(a);
        self
    }

    /// Seed slot B without initializing it.
    pub fn with_b(mut self, b: B) -> Self {
        self.b = Some(b);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn target(&self) -> DualSlot {
        self.target
    }

    pub fn set_target(&mut self, target: DualSlot) {
        self.target = target;
    }

    pub fn a(&self) -> Option<&A> {
        self.a.as_ref()
    }

    pub fn a_mut(&mut self) -> Option<&mut A> {
        self.a.as_mut()
    }

    pub fn b(&self) -> Option<&B> {
        self.b.as_ref()
    }

    pub fn b_mut(&mut self) -> Option<&mut B> {
        self.b.as_mut()
    }

    /// Install (or clear) slot A, returning the new child's startup effect.
    pub fn set_a(&mut self, a: Option<A>) -> Effect<M> {
        install_slot(&mut self.a, a)
    }

    /// Install (or clear) slot B, returning the new child's startup effect.
    pub fn set_b(&mut self, b: Option<B>) -> Effect<M> {
        install_slot(&mut self.b, b)
    }

    pub fn take_a(&mut self) -> Option<A> {
        self.a.take()
    }

    pub fn take_b(&mut self) -> Option<B> {
        self.b.take()
    }

    /// Mutate slot A directly, creating a default child if it is empty.
    pub fn configure_a<F>(&mut self, f: F)
    where
        A: Default,
        F: FnOnce(&mut A),
    {
        configure_slot(&mut self.a, f);
    }

    /// Mutate slot B directly, creating a default child if it is empty.
    pub fn configure_b<F>(&mut self, f: F)
    where
        B: Default,
        F: FnOnce(&mut B),
    {
        configure_slot(&mut self.b, f);
    }

    /// Deliver `event` to the targeted slot.
    pub fn route(&mut self, event: Event<M>) -> Effect<M> {
        match self.target {
            DualSlot::A => route_slot(&self.name, &mut self.a, event),
            DualSlot::B => route_slot(&self.name, &mut self.b, event),
            DualSlot::Skip => unroutable(&self.name, &event),
        }
    }

    /// Hand `ctx` to the targeted child if it accepts context.
    pub fn forward_context(&mut self, ctx: &Context) -> bool {
        match self.target {
            DualSlot::A => deliver_slot::<M, A>(&mut self.a, ctx),
            DualSlot::B => deliver_slot::<M, B>(&mut self.b, ctx),
            DualSlot::Skip => false,
        }
    }

    /// The targeted child, if present.
    pub fn active(&self) -> Option<&dyn Component<M>> {
        match self.target {
            DualSlot::A => as_dyn(&self.a),
            DualSlot::B => as_dyn(&self.b),
            DualSlot::Skip => None,
        }
    }
}

impl<M, A, B> Component<M> for Dual<M, A, B>
where
    M: Send + 'static,
    A: Component<M>,
    B: Component<M>,
{
    fn update(&mut self, event: Event<M>) -> (Next, Effect<M>) {
        (Next::Keep, self.route(event))
    }

    fn render(&self) -> String {
        match self.target {
            DualSlot::A => render_slot::<M, A>(&self.a),
            DualSlot::B => render_slot::<M, B>(&self.b),
            DualSlot::Skip => String::new(),
        }
    }

    fn init(&mut self) -> Effect<M> {
        match self.target {
            DualSlot::A => init_slot(&mut self.a),
            DualSlot::B => init_slot(&mut self.b),
            DualSlot::Skip => Effect::none(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn inner(&self) -> Option<&dyn Component<M>> {
        self.active()
    }
}

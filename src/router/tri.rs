use std::marker::PhantomData;

use crate::router::{
    as_dyn, configure_slot, deliver_slot, init_slot, install_slot, render_slot, route_slot,
    unroutable,
};
use crate::{Component, Context, Effect, Event, Next};

/// Which slot of a [`Tri`] receives events and renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriSlot {
    #[default]
    Skip,
    A,
    B,
    C,
}

/// Three-slot variant of [`Dual`](crate::Dual), with the same slot policy.
pub struct Tri<M, A, B, C> {
    a: Option<A>,
    b: Option<B>,
    c: Option<C>,
    target: TriSlot,
    name: String,
    _msg: PhantomData<fn() -> M>,
}

impl<M, A, B, C> Tri<M, A, B, C>
where
    M: Send + 'static,
    A: Component<M>,
    B: Component<M>,
    C: Component<M>,
{
    pub fn new(target: TriSlot) -> Self {
        Self {
            a: None,
            b: None,
            c: None,
            target,
            name: "tri".to_string(),
            _msg: PhantomData,
        }
    }

    pub fn with_a(mut self, a: A) -> Self {
        self.a = Some(a);
        self
    }

    pub fn with_b(mut self, b: B) -> Self {
        self.b = Some(b);
        self
    }

    pub fn with_c(mut self, c: C) -> Self {
        self.c = Some(c);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn target(&self) -> TriSlot {
        self.target
    }

    /// Readdress the router. Never initializes the addressed child.
    pub fn set_target(&mut self, target: TriSlot) {
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

    pub fn c(&self) -> Option<&C> {
        self.c.as_ref()
    }

    pub fn c_mut(&mut self) -> Option<&mut C> {
        self.c.as_mut()
    }

    pub fn set_a(&mut self, a: Option<A>) -> Effect<M> {
        install_slot(&mut self.a, a)
    }

    pub fn set_b(&mut self, b: Option<B>) -> Effect<M> {
        install_slot(&mut self.b, b)
    }

    pub fn set_c(&mut self, c: Option<C>) -> Effect<M> {
        install_slot(&mut self.c, c)
    }

    pub fn configure_a<F>(&mut self, f: F)
    where
        A: Default,
        F: FnOnce(&mut A),
    {
        configure_slot(&mut self.a, f);
    }

    pub fn configure_b<F>(&mut self, f: F)
    where
        B: Default,
        F: FnOnce(&mut B),
    {
        configure_slot(&mut self.b, f);
    }

    pub fn configure_c<F>(&mut self, f: F)
    where
        C: Default,
        F: FnOnce(&mut C),
    {
        configure_slot(&mut self.c, f);
    }

    pub fn route(&mut self, event: Event<M>) -> Effect<M> {
        match self.target {
            TriSlot::A => route_slot(&self.name, &mut self.a, event),
            TriSlot::B => route_slot(&self.name, &mut self.b, event),
            TriSlot::C => route_slot(&self.name, &mut self.c, event),
            TriSlot::Skip => unroutable(&self.name, &event),
        }
    }

    pub fn forward_context(&mut self, ctx: &Context) -> bool {
        match self.target {
            TriSlot::A => deliver_slot::<M, A>(&mut self.a, ctx),
            TriSlot::B => deliver_slot::<M, B>(&mut self.b, ctx),
            TriSlot::C => deliver_slot::<M, C>(&mut self.c, ctx),
            TriSlot::Skip => false,
        }
    }

    pub fn active(&self) -> Option<&dyn Component<M>> {
        match self.target {
            TriSlot::A => as_dyn(&self.a),
            TriSlot::B => as_dyn(&self.b),
            TriSlot::C => as_dyn(&self.c),
            TriSlot::Skip => None,
        }
    }
}

impl<M, A, B, C> Component<M> for Tri<M, A, B, C>
where
    M: Send + 'static,
    A: Component<M>,
    B: Component<M>,
    C: Component<M>,
{
    fn update(&mut self, event: Event<M>) -> (Next, Effect<M>) {
        (Next::Keep, self.route(event))
    }

    fn render(&self) -> String {
        match self.target {
            TriSlot::A => render_slot::<M, A>(&self.a),
            TriSlot::B => render_slot::<M, B>(&self.b),
            TriSlot::C => render_slot::<M, C>(&self.c),
            TriSlot::Skip => String::new(),
        }
    }

    fn init(&mut self) -> Effect<M> {
        match self.target {
            TriSlot::A => init_slot(&mut self.a),
            TriSlot::B => init_slot(&mut self.b),
            TriSlot::C => init_slot(&mut self.c),
            TriSlot::Skip => Effect::none(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn inner(&self) -> Option<&dyn Component<M>> {
        self.active()
    }
}

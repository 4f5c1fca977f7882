use std::marker::PhantomData;

use tracing::{trace, warn};

use crate::router::{configure_slot, deliver_slot, install_slot, render_slot, route_slot};
use crate::{Component, Context, Effect, Event, Next};

/// Storage locations of an [`Auto`] router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSlot {
    Primary,
    Override,
}

/// Which child an [`Auto`] currently shows, derived from presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Active {
    Primary,
    Override,
    /// Both slots are empty.
    Invalid,
}

/// Primary/override router.
///
/// Shows the primary child unless an override is set, in which case the
/// override receives every event and renders in its place. Installing and
/// clearing the override are plain assignments: the primary keeps its state
/// untouched while eclipsed, which makes `Auto` a good fit for full-screen
/// popups over a menu.
///
/// An override that returns [`Next::Done`] is cleared, revealing the primary.
///
/// # Example
///
/// ```rust
/// use oxide_polymer::{Active, Auto, AutoSlot, Component, Effect, Event, Next};
///
/// struct View(&'static str);
///
/// impl Component<()> for View {
///     fn update(&mut self, _event: Event<()>) -> (Next, Effect<()>) {
///         (Next::Keep, Effect::none())
///     }
///     fn render(&self) -> String { self.0.to_string() }
/// }
///
/// let mut auto: Auto<(), View> = Auto::new(View("menu"));
/// assert_eq!(auto.active(), Active::Primary);
///
/// let _ = auto.set(AutoSlot::Override, Some(View("popup")));
/// assert_eq!(auto.render(), "popup");
///
/// let _ = auto.set(AutoSlot::Override, None);
/// assert_eq!(auto.render(), "menu");
/// ```
pub struct Auto<M, T> {
    primary: Option<T>,
    overlay: Option<T>,
    name: String,
    _msg: PhantomData<fn() -> M>,
}

impl<M, T> Auto<M, T>
where
    M: Send + 'static,
    T: Component<M>,
{
    /// A router showing `primary`. The primary is not initialized.
    pub fn new(primary: T) -> Self {
        Self {
            primary: Some(primary),
            overlay: None,
            name: "auto".to_string(),
            _msg: PhantomData,
        }
    }

    /// A router with both slots empty.
    pub fn empty() -> Self {
        Self {
            primary: None,
            overlay: None,
            name: "auto".to_string(),
            _msg: PhantomData,
        }
    }

    pub fn with_override(mut self, overlay: T) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override wins if present, else primary, else invalid.
    pub fn active(&self) -> Active {
        if self.overlay.is_some() {
            Active::Override
        } else if self.primary.is_some() {
            Active::Primary
        } else {
            Active::Invalid
        }
    }

    pub fn is_set(&self, slot: AutoSlot) -> bool {
        self.slot(slot).is_some()
    }

    /// Install (or clear, with `None`) a slot, returning the new child's startup effect.
    pub fn set(&mut self, slot: AutoSlot, component: Option<T>) -> Effect<M> {
        trace!(router = %self.name, ?slot, present = component.is_some(), "set slot");
        install_slot(self.slot_mut(slot), component)
    }

    /// Install `component` only when the slot is empty.
    ///
    /// Returns the startup effect if it was installed, otherwise nothing.
    pub fn set_if_absent(&mut self, slot: AutoSlot, component: T) -> Effect<M> {
        if self.is_set(slot) {
            return Effect::none();
        }
        self.set(slot, Some(component))
    }

    pub fn get(&self, slot: AutoSlot) -> Option<&T> {
        self.slot(slot).as_ref()
    }

    pub fn get_mut(&mut self, slot: AutoSlot) -> Option<&mut T> {
        self.slot_mut(slot).as_mut()
    }

    /// Remove and return a slot's child.
    pub fn take(&mut self, slot: AutoSlot) -> Option<T> {
        self.slot_mut(slot).take()
    }

    /// Mutate a slot directly, creating a default child if it is empty.
    pub fn configure<F>(&mut self, slot: AutoSlot, f: F)
    where
        T: Default,
        F: FnOnce(&mut T),
    {
        configure_slot(self.slot_mut(slot), f);
    }

    /// Run `f` against a slot's child (or `None`) and return its result.
    pub fn apply<U, F>(&mut self, slot: AutoSlot, f: F) -> U
    where
        F: FnOnce(Option<&mut T>) -> U,
    {
        f(self.slot_mut(slot).as_mut())
    }

    /// Deliver `event` to the active child.
    ///
    /// Context reaches both present slots, like [`forward_context`](Self::forward_context).
    /// With both slots empty the event is dropped and a warning is logged.
    pub fn route(&mut self, event: Event<M>) -> Effect<M> {
        match self.active() {
            Active::Override => {
                // The eclipsed primary keeps its context current too.
                if let Event::Context(ctx) = &event {
                    deliver_slot::<M, T>(&mut self.primary, ctx);
                }
                route_slot(&self.name, &mut self.overlay, event)
            }
            Active::Primary => route_slot(&self.name, &mut self.primary, event),
            Active::Invalid => {
                warn!(router = %self.name, kind = event.kind(), "no active component to route to");
                Effect::none()
            }
        }
    }

    /// Hand `ctx` to every present child that accepts context.
    ///
    /// Both slots receive it so the primary is current again once the
    /// override is cleared.
    pub fn forward_context(&mut self, ctx: &Context) -> bool {
        let primary = deliver_slot::<M, T>(&mut self.primary, ctx);
        let overlay = deliver_slot::<M, T>(&mut self.overlay, ctx);
        primary || overlay
    }

    fn slot(&self, slot: AutoSlot) -> &Option<T> {
        match slot {
            AutoSlot::Primary => &self.primary,
            AutoSlot::Override => &self.overlay,
        }
    }

    fn slot_mut(&mut self, slot: AutoSlot) -> &mut Option<T> {
        match slot {
            AutoSlot::Primary => &mut self.primary,
            AutoSlot::Override => &mut self.overlay,
        }
    }

    fn active_slot(&self) -> Option<&T> {
        self.overlay.as_ref().or(self.primary.as_ref())
    }
}

impl<M, T> Component<M> for Auto<M, T>
where
    M: Send + 'static,
    T: Component<M>,
{
    fn update(&mut self, event: Event<M>) -> (Next, Effect<M>) {
        (Next::Keep, self.route(event))
    }

    fn render(&self) -> String {
        match self.active() {
            Active::Override => render_slot::<M, T>(&self.overlay),
            Active::Primary => render_slot::<M, T>(&self.primary),
            Active::Invalid => {
                trace!(router = %self.name, "no active component to render");
                String::new()
            }
        }
    }

    fn init(&mut self) -> Effect<M> {
        let primary = self.primary.as_mut().map(|c| c.init()).unwrap_or_default();
        let overlay = self.overlay.as_mut().map(|c| c.init()).unwrap_or_default();
        Effect::batch(vec![primary, overlay])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn inner(&self) -> Option<&dyn Component<M>> {
        self.active_slot().map(|c| c as &dyn Component<M>)
    }
}

//! Slot routers: several independently typed children behind one dispatcher.
//!
//! [`Dual`] and [`Tri`] address a slot through an explicit target that the
//! parent assigns. [`Auto`] derives the active slot from presence instead:
//! an override, when set, eclipses the primary.
//!
//! All routers share the same slot policy:
//! - only the addressed slot is updated or rendered
//! - routing to an empty or skipped slot leaves state unchanged and answers
//!   with an [`Error::NoActiveSlot`] diagnostic (diagnostic events are
//!   dropped instead, so they cannot bounce forever)
//! - a child returning [`Next::Done`] is removed from its slot
//! - an [`Event::Context`] is handed to the addressed child's context
//!   capability, or delivered as a plain event when it has none
//! - `configure_*` builds a default child when the slot is empty

mod auto;
mod dual;
mod tri;

pub use auto::{Active, Auto, AutoSlot};
pub use dual::{Dual, DualSlot};
pub use tri::{Tri, TriSlot};

use tracing::{debug, trace};

use crate::{Component, Context, Effect, Error, Event, Next};

/// Forward `event` to the child in `slot`, clearing the slot when it is done.
///
/// Context goes through the child's capability; a child without it gets the
/// raw event.
pub(crate) fn route_slot<M, C>(router: &str, slot: &mut Option<C>, event: Event<M>) -> Effect<M>
where
    M: Send + 'static,
    C: Component<M>,
{
    let Some(child) = slot.as_mut() else {
        return unroutable(router, &event);
    };

    if let Event::Context(ctx) = &event {
        if crate::deliver_context::<M, C>(child, ctx) {
            return Effect::none();
        }
    }

    let (next, effect) = child.update(event);
    if next == Next::Done {
        debug!(router, child = child.name(), "child done; clearing slot");
        *slot = None;
    }
    effect
}

/// Answer for an event that has nowhere to go.
pub(crate) fn unroutable<M>(router: &str, event: &Event<M>) -> Effect<M>
where
    M: Send + 'static,
{
    if event.is_diagnostic() {
        trace!(router, kind = event.kind(), "dropping unroutable diagnostic");
        return Effect::none();
    }
    debug!(router, kind = event.kind(), "no active slot");
    Effect::error(Error::NoActiveSlot)
}

pub(crate) fn render_slot<M, C>(slot: &Option<C>) -> String
where
    C: Component<M>,
{
    slot.as_ref().map(|child| child.render()).unwrap_or_default()
}

/// Store `component` in `slot` and return its startup effect.
pub(crate) fn install_slot<M, C>(slot: &mut Option<C>, component: Option<C>) -> Effect<M>
where
    C: Component<M>,
{
    *slot = component;
    match slot.as_mut() {
        Some(child) => child.init(),
        None => Effect::none(),
    }
}

pub(crate) fn init_slot<M, C>(slot: &mut Option<C>) -> Effect<M>
where
    C: Component<M>,
{
    match slot.as_mut() {
        Some(child) => child.init(),
        None => Effect::none(),
    }
}

/// Apply `f` to the child in `slot`, building a default one first if needed.
pub(crate) fn configure_slot<C, F>(slot: &mut Option<C>, f: F)
where
    C: Default,
    F: FnOnce(&mut C),
{
    f(slot.get_or_insert_with(C::default));
}

pub(crate) fn deliver_slot<M, C>(slot: &mut Option<C>, ctx: &Context) -> bool
where
    C: Component<M>,
{
    match slot.as_mut() {
        Some(child) => crate::deliver_context::<M, C>(child, ctx),
        None => false,
    }
}

pub(crate) fn as_dyn<M, C>(slot: &Option<C>) -> Option<&dyn Component<M>>
where
    C: Component<M>,
{
    slot.as_ref().map(|child| child as &dyn Component<M>)
}

//! Application logic trait defining the runtime's model contract.

use crate::{Effect, Event};

/// The model interface the [`MvuRuntime`](crate::MvuRuntime) drives.
///
/// Implementations provide three operations:
/// - [`init`](Self::init): produce the startup effect
/// - [`update`](Self::update): reduce one event into new state and an effect
/// - [`view`](Self::view): draw the current state as a frame
///
/// [`Host`](crate::Host) is the implementation that bridges a component
/// tree to the runtime; implement this directly only for custom loops.
pub trait MvuLogic<M: Send> {
    /// Called once when the runtime starts, before the first frame.
    fn init(&mut self) -> Effect<M>;

    /// Reduce an event to updated state and follow-up work.
    ///
    /// All state changes must happen through this function. The runtime
    /// handles [`Event::Quit`] itself and never passes it here.
    fn update(&mut self, event: Event<M>) -> Effect<M>;

    /// Render the current state into a frame for the [`Renderer`](crate::Renderer).
    fn view(&self) -> String;
}

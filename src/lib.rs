//! Composable terminal UI components on a Model-View-Update runtime.
//!
//! Every piece of UI state implements [`Component`]: it reduces an [`Event`]
//! into new state plus a follow-up [`Effect`], and renders itself to a
//! string. Components compose through a small set of containers that all
//! implement the same contract:
//!
//! - [`Chain`]: a navigation stack driven by [`Nav`] requests
//! - [`Dual`] and [`Tri`]: slot routers with an explicit target
//! - [`Auto`]: a primary component that an override can eclipse
//! - [`Lens`]: a transparent decorator with lifecycle [`Hooks`]
//!
//! A [`Host`] adapts the root component to the [`MvuRuntime`], which owns
//! the event channel, runs effects through a [`Spawner`] and draws frames
//! with a [`Renderer`].
//!
//! ## Example
//!
//! ```rust
//! use oxide_polymer::{Chain, Component, Effect, Event, KeyCode, Next};
//!
//! struct Menu;
//! struct Detail;
//!
//! impl Component<()> for Menu {
//!     fn update(&mut self, event: Event<()>) -> (Next, Effect<()>) {
//!         match event {
//!             Event::Key(key) if key.code == KeyCode::Enter => (Next::Keep, Effect::push(Detail)),
//!             _ => (Next::Keep, Effect::none()),
//!         }
//!     }
//!     fn render(&self) -> String { "menu".into() }
//! }
//!
//! impl Component<()> for Detail {
//!     fn update(&mut self, event: Event<()>) -> (Next, Effect<()>) {
//!         match event {
//!             Event::Key(key) if key.code == KeyCode::Esc => (Next::Keep, Effect::pop()),
//!             _ => (Next::Keep, Effect::none()),
//!         }
//!     }
//!     fn render(&self) -> String { "detail".into() }
//! }
//!
//! let mut chain = Chain::new(Menu);
//!
//! // Enter asks for a push; feeding the effect's events back in applies it.
//! let (_, effect) = chain.update(Event::key(KeyCode::Enter));
//! for event in effect.into_events() {
//!     chain.update(event);
//! }
//! assert_eq!(chain.render(), "detail");
//! ```
//!
//! ## Tracing
//!
//! Containers log through `tracing` under `oxide_polymer::*` targets; see
//! [`TraceConfig`] and [`logging::init`]. Structured per-component traces
//! are available from [`observe`].

// Module declarations
mod chain;
mod component;
mod config;
mod context;
mod effect;
mod emitter;
mod error;
mod event;
mod host;
mod identity;
mod lens;
mod logic;
mod renderer;
mod router;
mod runtime;

pub mod logging;
pub mod observe;
pub mod terminal;

// Public re-exports
pub use chain::Chain;
pub use component::{resolve, same_component, Component, Next};
pub use config::{Category, TraceConfig, TRACE_ENV, TRACE_LEVEL_ENV};
pub use context::{deliver_context, Context, ContextAware};
pub use effect::Effect;
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use event::{Event, Nav, Signal};
pub use host::Host;
pub use identity::{AtomId, IdRegistry, Identity};
pub use lens::{Hooks, Lens};
pub use logic::MvuLogic;
pub use renderer::Renderer;
pub use router::{Active, Auto, AutoSlot, Dual, DualSlot, Tri, TriSlot};
pub use runtime::{MvuRuntime, Spawner};

pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::{create_test_spawner, TestMvuDriver, TestMvuRuntime};

//! Events delivered to components by the host runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::Level;

use crate::component::short_type_name;
use crate::{Component, Context, Error};

/// Everything a component can receive in [`Component::update`].
///
/// `M` is the application's own message type. Terminal input, diagnostics,
/// context values and navigation requests share the same channel so that
/// strict delivery order holds across all of them.
pub enum Event<M> {
    /// A key press from the terminal.
    Key(KeyEvent),
    /// The terminal window changed size.
    Resize { width: u16, height: u16 },
    /// An application-defined payload.
    Message(M),
    /// A structural or application error travelling back through the loop.
    Error(Error),
    /// A diagnostic trace emitted by a component.
    Trace(Signal),
    /// A context value pushed down by a parent.
    Context(Context),
    /// A navigation stack request.
    Nav(Nav<M>),
    /// Stop the runtime.
    Quit,
}

/// Structural messages intercepted by [`Chain`](crate::Chain).
pub enum Nav<M> {
    /// Push a component, making it active.
    Push(Box<dyn Component<M>>),
    /// Pop the active component, revealing the one beneath.
    Pop,
    /// Replace the active component without changing depth.
    Replace(Box<dyn Component<M>>),
    /// Truncate to a single component, or to the seed when `None`.
    Reset(Option<Box<dyn Component<M>>>),
}

/// Payload of [`Event::Trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub level: Level,
    pub message: String,
}

impl Signal {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl<M> Event<M> {
    /// A plain key press with no modifiers.
    pub fn key(code: KeyCode) -> Self {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// A key press of `c` with the control modifier held.
    pub fn ctrl(c: char) -> Self {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    /// Translate a crossterm event; returns `None` for input the framework ignores.
    pub fn from_terminal(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key) if key.kind != KeyEventKind::Release => {
                Some(Event::Key(key))
            }
            crossterm::event::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Key(_) => "key",
            Event::Resize { .. } => "resize",
            Event::Message(_) => short_type_name(std::any::type_name::<M>()),
            Event::Error(_) => "error",
            Event::Trace(_) => "trace",
            Event::Context(_) => "context",
            Event::Nav(Nav::Push(_)) => "push",
            Event::Nav(Nav::Pop) => "pop",
            Event::Nav(Nav::Replace(_)) => "replace",
            Event::Nav(Nav::Reset(_)) => "reset",
            Event::Quit => "quit",
        }
    }

    /// Whether this event is itself a diagnostic (error or trace).
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Event::Error(_) | Event::Trace(_))
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Event<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Event::Resize { width, height } => f
                .debug_struct("Resize")
                .field("width", width)
                .field("height", height)
                .finish(),
            Event::Message(m) => f.debug_tuple("Message").field(m).finish(),
            Event::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Event::Trace(s) => f.debug_tuple("Trace").field(s).finish(),
            Event::Context(c) => f.debug_tuple("Context").field(c).finish(),
            Event::Nav(nav) => f.debug_tuple("Nav").field(nav).finish(),
            Event::Quit => f.write_str("Quit"),
        }
    }
}

impl<M> std::fmt::Debug for Nav<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nav::Push(c) => write!(f, "Push({})", c.name()),
            Nav::Pop => f.write_str("Pop"),
            Nav::Replace(c) => write!(f, "Replace({})", c.name()),
            Nav::Reset(Some(c)) => write!(f, "Reset({})", c.name()),
            Nav::Reset(None) => f.write_str("Reset(seed)"),
        }
    }
}

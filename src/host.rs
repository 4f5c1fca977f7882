//! Bridges a component tree to the runtime's [`MvuLogic`] contract.

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::{deliver_context, Component, Context, Effect, Event, MvuLogic, Next};

/// Runs a root [`Component`] inside an [`MvuRuntime`](crate::MvuRuntime).
///
/// The host:
/// - answers the quit keys (ctrl+c by default) with [`Effect::quit`]
/// - quits when the root returns [`Next::Done`] or when there is no root
/// - logs [`Event::Error`]s at warn level, then forwards them to the root
/// - delivers [`Event::Context`] through the root's context capability,
///   falling back to an ordinary update when the root lacks it
/// - remembers the last window size it saw
///
/// A context value set with [`with_context`](Self::with_context) is handed
/// to the root on [`init`](MvuLogic::init), before the root's own startup.
/// Roots without the capability receive it as the first [`Event::Context`]
/// instead.
pub struct Host<M> {
    root: Option<Box<dyn Component<M>>>,
    quit_keys: Vec<KeyEvent>,
    context: Option<Context>,
    size: Option<(u16, u16)>,
}

impl<M: Send + 'static> Host<M> {
    pub fn new<C>(root: C) -> Self
    where
        C: Component<M> + 'static,
    {
        Self::from_box(Box::new(root))
    }

    pub fn from_box(root: Box<dyn Component<M>>) -> Self {
        Self {
            root: Some(root),
            quit_keys: vec![KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)],
            context: None,
            size: None,
        }
    }

    /// A host with nothing to run; it quits as soon as it starts.
    pub fn empty() -> Self {
        Self {
            root: None,
            quit_keys: Vec::new(),
            context: None,
            size: None,
        }
    }

    /// Replace the keys that stop the program.
    pub fn with_quit_keys(mut self, keys: Vec<KeyEvent>) -> Self {
        self.quit_keys = keys;
        self
    }

    /// Deliver `value` to the root when the host starts.
    pub fn with_context<X>(mut self, value: X) -> Self
    where
        X: Any + Send + Sync,
    {
        self.context = Some(Context::new(value));
        self
    }

    pub fn root(&self) -> Option<&dyn Component<M>> {
        self.root.as_deref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Box<dyn Component<M>>> {
        self.root.as_mut()
    }

    /// The last context value seen, either configured or received.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// The last window size reported by the terminal.
    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    fn is_quit_key(&self, key: &KeyEvent) -> bool {
        self.quit_keys
            .iter()
            .any(|quit| quit.code == key.code && quit.modifiers == key.modifiers)
    }
}

impl<M: Send + 'static> MvuLogic<M> for Host<M> {
    fn init(&mut self) -> Effect<M> {
        let Some(root) = self.root.as_mut() else {
            warn!("host started without a root component");
            return Effect::quit();
        };

        // A root without the capability sees the value as an ordinary event.
        let replay = match &self.context {
            Some(ctx) if !deliver_context::<M, _>(root, ctx) => Effect::just(Event::Context(ctx.clone())),
            _ => Effect::none(),
        };
        debug!(root = root.name(), "initializing root");
        Effect::batch(vec![root.init(), replay])
    }

    fn update(&mut self, event: Event<M>) -> Effect<M> {
        if let Event::Key(key) = &event {
            if self.is_quit_key(key) {
                info!(?key, "quit key pressed");
                return Effect::quit();
            }
        }
        if let Event::Resize { width, height } = &event {
            self.size = Some((*width, *height));
        }

        let Some(root) = self.root.as_mut() else {
            return Effect::quit();
        };

        let event = match event {
            Event::Error(err) => {
                warn!(%err, root = root.name(), "error reached the host");
                Event::Error(err)
            }
            Event::Context(ctx) => {
                self.context = Some(ctx.clone());
                if deliver_context::<M, _>(root, &ctx) {
                    return Effect::none();
                }
                Event::Context(ctx)
            }
            event => event,
        };

        let (next, effect) = root.update(event);
        if next == Next::Done {
            info!(root = root.name(), "root is done; quitting");
            return Effect::batch(vec![effect, Effect::quit()]);
        }
        effect
    }

    fn view(&self) -> String {
        self.root.as_ref().map(|root| root.render()).unwrap_or_default()
    }
}

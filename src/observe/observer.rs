use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use portable_atomic_util::Arc;
use spin::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::observe::{
    event_type, CompositeTracer, Format, LogTracer, MemoryTracer, NullTracer, SharedTracer,
    TraceContext, TraceEvent, Tracer, WriterTracer,
};
use crate::{Component, Lens, Result};

/// A tracer bound to a [`TraceContext`].
///
/// An observer wraps components in lenses whose hooks turn lifecycle
/// callbacks into [`TraceEvent`]s: `atom.init` at info, `atom.update.start`,
/// `atom.update` (with the measured duration) and `atom.view` at debug,
/// `atom.error` at error and `atom.trace` at the signal's own level.
#[derive(Clone)]
pub struct Observer {
    tracer: SharedTracer,
    ctx: TraceContext,
}

impl Observer {
    pub fn new(tracer: SharedTracer, level: LevelFilter) -> Self {
        Self {
            tracer,
            ctx: TraceContext::new(level),
        }
    }

    pub fn context(&self) -> &TraceContext {
        &self.ctx
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.ctx.set_metadata(key, value);
    }

    pub fn tracer(&self) -> &SharedTracer {
        &self.tracer
    }

    /// Whether both the context and the sink accept `level`.
    pub fn is_enabled(&self, level: Level) -> bool {
        self.ctx.allows(level) && self.tracer.is_enabled(level)
    }

    /// Emit an event built by `build`, but only when `level` is enabled.
    pub fn emit_with<F>(&self, level: Level, build: F)
    where
        F: FnOnce(&TraceContext) -> TraceEvent,
    {
        if self.is_enabled(level) {
            self.tracer.emit(&build(&self.ctx));
        }
    }

    /// Emit an application-defined event.
    pub fn emit_custom(
        &self,
        event_type: &str,
        level: Level,
        message: &str,
        metadata: BTreeMap<String, serde_json::Value>,
    ) {
        self.emit_with(level, |ctx| {
            let mut event = TraceEvent::new(ctx, event_type, level, message);
            event.metadata.extend(metadata);
            event
        });
    }

    /// An observer for a nested component, in a child span of this one.
    pub fn child(&self) -> Self {
        Self {
            tracer: self.tracer.clone(),
            ctx: self.ctx.child(),
        }
    }

    pub fn close(&self) -> Result<()> {
        self.tracer.close()
    }

    /// Wrap `component` in a lens reporting to this observer.
    pub fn lens<M, C>(&self, component: C) -> Lens<M, C>
    where
        M: Send + 'static,
        C: Component<M>,
    {
        let started: Arc<Mutex<Option<Instant>>> = Arc::new(Mutex::new(None));

        let on_init = self.clone();
        let before = self.clone();
        let before_started = started.clone();
        let after = self.clone();
        let on_render = self.clone();
        let on_error = self.clone();
        let on_trace = self.clone();

        Lens::new(component)
            .on_init(move |leaf, effect| {
                on_init.emit_with(Level::INFO, |ctx| {
                    TraceEvent::new(ctx, event_type::INIT, Level::INFO, "component initialized")
                        .with_atom(leaf.name())
                        .with_effect(!effect.is_none())
                });
            })
            .before_update(move |leaf, event| {
                *before_started.lock() = Some(Instant::now());
                before.emit_with(Level::DEBUG, |ctx| {
                    TraceEvent::new(ctx, event_type::UPDATE_START, Level::DEBUG, "update started")
                        .with_atom(leaf.name())
                        .with_event_kind(event.kind())
                });
            })
            .after_update(move |leaf, next, effect| {
                let elapsed = started.lock().take().map(|at| at.elapsed());
                after.emit_with(Level::DEBUG, |ctx| {
                    let mut event =
                        TraceEvent::new(ctx, event_type::UPDATE, Level::DEBUG, "component updated")
                            .with_atom(leaf.name())
                            .with_effect(!effect.is_none())
                            .with_metadata("done", next == crate::Next::Done);
                    if let Some(elapsed) = elapsed {
                        event = event.with_duration(elapsed);
                    }
                    event
                });
            })
            .on_render(move |leaf, rendered| {
                on_render.emit_with(Level::DEBUG, |ctx| {
                    TraceEvent::new(ctx, event_type::VIEW, Level::DEBUG, "component rendered")
                        .with_atom(leaf.name())
                        .with_metadata("view_length", rendered.len())
                });
            })
            .on_error(move |leaf, err| {
                on_error.emit_with(Level::ERROR, |ctx| {
                    TraceEvent::new(ctx, event_type::ERROR, Level::ERROR, "error received")
                        .with_atom(leaf.name())
                        .with_error(err)
                });
            })
            .on_trace(move |leaf, signal| {
                on_trace.emit_with(signal.level, |ctx| {
                    TraceEvent::new(ctx, event_type::TRACE, signal.level, signal.message.clone())
                        .with_atom(leaf.name())
                });
            })
    }
}

impl std::fmt::Debug for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer").field("ctx", &self.ctx).finish_non_exhaustive()
    }
}

/// Fluent assembly of an [`Observer`].
///
/// # Example
///
/// ```rust
/// use oxide_polymer::observe::{event_type, Builder};
/// use oxide_polymer::{Component, Effect, Event, Lens, Next};
///
/// struct Menu;
///
/// impl Component<()> for Menu {
///     fn update(&mut self, _event: Event<()>) -> (Next, Effect<()>) {
///         (Next::Keep, Effect::none())
///     }
///     fn render(&self) -> String { "menu".into() }
/// }
///
/// let (builder, memory) = Builder::testing();
/// let mut traced: Lens<(), Menu> = builder.wrap(Menu);
///
/// traced.update(Event::Message(()));
/// assert_eq!(memory.events_of_type(event_type::UPDATE).len(), 1);
/// ```
pub struct Builder {
    level: LevelFilter,
    tracers: Vec<SharedTracer>,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// An empty builder; tracing is off until a level is set.
    pub fn new() -> Self {
        Self {
            level: LevelFilter::OFF,
            tracers: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Debug level, forwarding to the `tracing` subscriber.
    pub fn development() -> Self {
        Self::new()
            .with_level(LevelFilter::DEBUG)
            .with_log_tracer(LevelFilter::DEBUG)
            .with_metadata("environment", "development")
    }

    /// Info level, appending JSON lines to `path`.
    pub fn production(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new()
            .with_level(LevelFilter::INFO)
            .with_file_tracer(path, LevelFilter::INFO, Format::Json)?
            .with_metadata("environment", "production"))
    }

    /// Trace level into a [`MemoryTracer`] the caller keeps a handle to.
    pub fn testing() -> (Self, MemoryTracer) {
        Self::new()
            .with_level(LevelFilter::TRACE)
            .with_metadata("environment", "test")
            .with_memory_tracer(LevelFilter::TRACE)
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_tracer<T: Tracer + 'static>(mut self, tracer: T) -> Self {
        self.tracers.push(std::sync::Arc::new(tracer));
        self
    }

    pub fn with_log_tracer(self, level: LevelFilter) -> Self {
        self.with_tracer(LogTracer::new(level))
    }

    pub fn with_writer_tracer<W>(self, writer: W, level: LevelFilter, format: Format) -> Self
    where
        W: std::io::Write + Send + 'static,
    {
        self.with_tracer(WriterTracer::new(writer, level, format))
    }

    pub fn with_file_tracer(
        self,
        path: impl AsRef<Path>,
        level: LevelFilter,
        format: Format,
    ) -> Result<Self> {
        Ok(self.with_tracer(WriterTracer::create(path, level, format)?))
    }

    /// Add a memory sink and return a handle sharing its buffer.
    pub fn with_memory_tracer(self, level: LevelFilter) -> (Self, MemoryTracer) {
        let memory = MemoryTracer::new(level);
        (self.with_tracer(memory.clone()), memory)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn build(self) -> Observer {
        let mut tracers = self.tracers;
        let tracer: SharedTracer = match tracers.len() {
            0 => std::sync::Arc::new(NullTracer),
            1 => tracers.swap_remove(0),
            _ => std::sync::Arc::new(CompositeTracer::new(tracers)),
        };
        let mut observer = Observer::new(tracer, self.level);
        for (key, value) in self.metadata {
            observer.set_metadata(key, value);
        }
        observer
    }

    /// Build an observer and wrap `component` with it.
    pub fn wrap<M, C>(self, component: C) -> Lens<M, C>
    where
        M: Send + 'static,
        C: Component<M>,
    {
        self.build().lens(component)
    }
}

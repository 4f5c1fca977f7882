use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use portable_atomic_util::Arc;
use serde::{Deserialize, Serialize};
use spin::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::observe::{SharedTracer, TraceEvent, Tracer};
use crate::{Error, Result};

/// Line format used by [`WriterTracer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Accepts nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn is_enabled(&self, _level: Level) -> bool {
        false
    }

    fn emit(&self, _event: &TraceEvent) {}
}

/// Keeps events in memory for inspection.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// observer owns another.
#[derive(Clone)]
pub struct MemoryTracer {
    events: Arc<Mutex<Vec<TraceEvent>>>,
    level: LevelFilter,
}

impl MemoryTracer {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            level,
        }
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<TraceEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn events_at(&self, level: Level) -> Vec<TraceEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Tracer for MemoryTracer {
    fn is_enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    fn emit(&self, event: &TraceEvent) {
        if self.is_enabled(event.level) {
            self.events.lock().push(event.clone());
        }
    }
}

/// Forwards trace events to the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy)]
pub struct LogTracer {
    level: LevelFilter,
}

impl LogTracer {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

macro_rules! forward {
    ($level:expr, $event:expr) => {{
        let event = $event;
        tracing::event!(
            target: "oxide_polymer::observe",
            $level,
            event_type = %event.event_type,
            atom = event.atom_name.as_deref().unwrap_or("-"),
            event_kind = event.event_kind.as_deref(),
            duration = ?event.duration,
            error = event.error.as_deref(),
            trace_id = %event.trace_id,
            span_id = %event.span_id,
            "{}",
            event.message
        )
    }};
}

impl Tracer for LogTracer {
    fn is_enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    fn emit(&self, event: &TraceEvent) {
        if !self.is_enabled(event.level) {
            return;
        }
        match event.level {
            Level::ERROR => forward!(Level::ERROR, event),
            Level::WARN => forward!(Level::WARN, event),
            Level::INFO => forward!(Level::INFO, event),
            Level::DEBUG => forward!(Level::DEBUG, event),
            _ => forward!(Level::TRACE, event),
        }
    }
}

/// Writes one line per event to any writer, as text or JSON.
pub struct WriterTracer<W> {
    writer: Mutex<W>,
    level: LevelFilter,
    format: Format,
}

impl<W: Write + Send> WriterTracer<W> {
    pub fn new(writer: W, level: LevelFilter, format: Format) -> Self {
        Self {
            writer: Mutex::new(writer),
            level,
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn line(&self, event: &TraceEvent) -> Option<String> {
        match self.format {
            Format::Text => Some(event.to_text()),
            Format::Json => match serde_json::to_string(event) {
                Ok(line) => Some(line),
                Err(err) => {
                    tracing::warn!(%err, "failed to serialize trace event");
                    None
                }
            },
        }
    }
}

impl WriterTracer<File> {
    /// Append to the file at `path`, creating it if needed.
    pub fn create(path: impl AsRef<Path>, level: LevelFilter, format: Format) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(file, level, format))
    }
}

impl<W: Write + Send> Tracer for WriterTracer<W> {
    fn is_enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    fn emit(&self, event: &TraceEvent) {
        if !self.is_enabled(event.level) {
            return;
        }
        let Some(line) = self.line(event) else {
            return;
        };
        let mut writer = self.writer.lock();
        if let Err(err) = writeln!(writer, "{line}") {
            tracing::warn!(%err, "failed to write trace event");
        }
    }

    fn close(&self) -> Result<()> {
        self.writer.lock().flush().map_err(Error::from)
    }
}

/// Fans events out to every sink enabled for their level.
#[derive(Clone, Default)]
pub struct CompositeTracer {
    tracers: Vec<SharedTracer>,
}

impl CompositeTracer {
    pub fn new(tracers: Vec<SharedTracer>) -> Self {
        Self { tracers }
    }

    pub fn push(&mut self, tracer: SharedTracer) {
        self.tracers.push(tracer);
    }

    pub fn len(&self) -> usize {
        self.tracers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracers.is_empty()
    }
}

impl Tracer for CompositeTracer {
    fn is_enabled(&self, level: Level) -> bool {
        self.tracers.iter().any(|t| t.is_enabled(level))
    }

    fn emit(&self, event: &TraceEvent) {
        for tracer in &self.tracers {
            if tracer.is_enabled(event.level) {
                tracer.emit(event);
            }
        }
    }

    /// Closes every sink, reporting the last failure.
    fn close(&self) -> Result<()> {
        let mut outcome = Ok(());
        for tracer in &self.tracers {
            if let Err(err) = tracer.close() {
                outcome = Err(err);
            }
        }
        outcome
    }
}

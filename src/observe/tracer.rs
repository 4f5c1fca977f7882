use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use uuid::Uuid;

use crate::Result;

/// Event types emitted by [`Observer`](crate::observe::Observer) lenses.
pub mod event_type {
    pub const INIT: &str = "atom.init";
    pub const UPDATE_START: &str = "atom.update.start";
    pub const UPDATE: &str = "atom.update";
    pub const VIEW: &str = "atom.view";
    pub const ERROR: &str = "atom.error";
    pub const TRACE: &str = "atom.trace";
}

/// A sink for structured [`TraceEvent`]s.
///
/// Implementations must be cheap to query with [`is_enabled`](Self::is_enabled),
/// since observers ask before building each event.
pub trait Tracer: Send + Sync {
    fn is_enabled(&self, level: Level) -> bool;

    fn emit(&self, event: &TraceEvent);

    /// Flush and release resources. Further events may be dropped.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// How observers and composites hold their sinks.
pub type SharedTracer = std::sync::Arc<dyn Tracer>;

/// One structured observation of a component's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub trace_id: Uuid,
    pub span_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<Uuid>,

    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    #[serde(with = "level_name")]
    pub level: Level,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atom_name: Option<String>,
    /// [`Event::kind`](crate::Event::kind) of the event being processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_kind: Option<String>,
    /// Whether the observed operation produced a follow-up effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_effect: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TraceEvent {
    /// A new event in a fresh span under `ctx`, carrying a copy of its metadata.
    pub fn new(
        ctx: &TraceContext,
        event_type: impl Into<String>,
        level: Level,
        message: impl Into<String>,
    ) -> Self {
        Self {
            trace_id: ctx.trace_id,
            span_id: Uuid::new_v4(),
            parent_span_id: Some(ctx.span_id),
            timestamp: Utc::now(),
            event_type: event_type.into(),
            level,
            message: message.into(),
            atom_name: None,
            event_kind: None,
            has_effect: None,
            duration: None,
            metadata: ctx.metadata.clone(),
            error: None,
        }
    }

    pub fn with_atom(mut self, name: impl Into<String>) -> Self {
        self.atom_name = Some(name.into());
        self
    }

    pub fn with_event_kind(mut self, kind: impl Into<String>) -> Self {
        self.event_kind = Some(kind.into());
        self
    }

    pub fn with_effect(mut self, has_effect: bool) -> Self {
        self.has_effect = Some(has_effect);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Single-line human readable rendering.
    pub fn to_text(&self) -> String {
        let mut line = format!(
            "{} [{}] {} | {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.level,
            self.event_type,
            self.atom_name.as_deref().unwrap_or("-"),
        );
        if let Some(kind) = &self.event_kind {
            line.push_str(&format!(" | event:{kind}"));
        }
        if let Some(duration) = self.duration {
            line.push_str(&format!(" | duration:{duration:?}"));
        }
        if let Some(error) = &self.error {
            line.push_str(&format!(" | error:{error}"));
        }
        line.push_str(&format!(" | {}", self.message));
        line
    }
}

/// Correlation state shared by the events of one observed component.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: Uuid,
    pub span_id: Uuid,
    pub parent_span_id: Option<Uuid>,
    pub level: LevelFilter,
    pub started_at: DateTime<Utc>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl TraceContext {
    /// A root context with fresh trace and span ids.
    pub fn new(level: LevelFilter) -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            span_id: Uuid::new_v4(),
            parent_span_id: None,
            level,
            started_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    /// A context in the same trace whose parent is this span.
    ///
    /// Metadata is not inherited.
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: Uuid::new_v4(),
            parent_span_id: Some(self.span_id),
            level: self.level,
            started_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn allows(&self, level: Level) -> bool {
        level <= self.level
    }
}

/// Serializes [`Level`] as its upper-case name.
mod level_name {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::Level;

    pub fn serialize<S: Serializer>(level: &Level, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(level.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Level::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

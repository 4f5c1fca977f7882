//! Structured lifecycle tracing.
//!
//! Core containers only log through `tracing`. This module adds an opt-in
//! layer for applications that want machine-readable records of what their
//! components did: an [`Observer`] wraps a component in a [`Lens`](crate::Lens)
//! whose hooks produce [`TraceEvent`]s for one or more [`Tracer`] sinks.
//!
//! Sinks:
//! - [`NullTracer`] discards everything
//! - [`MemoryTracer`] keeps events for tests
//! - [`LogTracer`] forwards to the `tracing` subscriber
//! - [`WriterTracer`] writes text or JSON lines to a writer or file
//! - [`CompositeTracer`] fans out to several sinks
//!
//! There is no global configuration: build an [`Observer`] with a
//! [`Builder`] (or from [`TraceConfig::observer`](crate::TraceConfig::observer))
//! and pass it to whatever assembles the component tree.

mod observer;
mod tracer;
mod tracers;

pub use observer::{Builder, Observer};
pub use tracer::{event_type, SharedTracer, TraceContext, TraceEvent, Tracer};
pub use tracers::{CompositeTracer, Format, LogTracer, MemoryTracer, NullTracer, WriterTracer};

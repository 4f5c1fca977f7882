use std::collections::BTreeMap;
use std::sync::Arc;

use oxide_polymer::observe::{
    event_type, Builder, CompositeTracer, Format, MemoryTracer, NullTracer, Observer, SharedTracer,
    TraceContext, TraceEvent, Tracer, WriterTracer,
};
use oxide_polymer::{Component, Error, Event, Lens, Signal};
use tracing::level_filters::LevelFilter;
use tracing::Level;

use super::{Counter, TestMsg};

fn given_a_traced_counter() -> (Lens<TestMsg, Counter>, MemoryTracer) {
    let (builder, memory) = Builder::testing();
    (builder.wrap(Counter::default()), memory)
}

#[test]
fn given_a_traced_component_when_updated_should_record_start_and_finish_with_duration() {
    let (mut traced, memory) = given_a_traced_counter();

    traced.update(Event::Message(TestMsg::Increment));

    let started = memory.events_of_type(event_type::UPDATE_START);
    let finished = memory.events_of_type(event_type::UPDATE);
    assert_eq!(started.len(), 1);
    assert_eq!(finished.len(), 1);
    assert_eq!(started[0].atom_name.as_deref(), Some("Counter"));
    assert_eq!(started[0].event_kind.as_deref(), Some("TestMsg"));
    assert!(finished[0].duration.is_some());
    assert_eq!(finished[0].has_effect, Some(false));
    assert_eq!(finished[0].metadata.get("done"), Some(&serde_json::Value::Bool(false)));
}

#[test]
fn given_a_traced_component_when_rendered_should_record_the_view_length() {
    let (traced, memory) = given_a_traced_counter();

    let rendered = traced.render();

    let views = memory.events_of_type(event_type::VIEW);
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].metadata.get("view_length"), Some(&serde_json::json!(rendered.len())));
}

#[test]
fn given_a_traced_component_when_initialized_should_record_an_info_event() {
    let (mut traced, memory) = given_a_traced_counter();

    let _ = traced.init();

    let inits = memory.events_at(Level::INFO);
    assert_eq!(inits.len(), 1);
    assert_eq!(inits[0].event_type, event_type::INIT);
    assert_eq!(inits[0].metadata.get("environment"), Some(&serde_json::json!("test")));
}

#[test]
fn given_an_error_event_should_record_it_at_error_level() {
    let (mut traced, memory) = given_a_traced_counter();

    traced.update(Event::Error(Error::NoActiveSlot));

    let errors = memory.events_of_type(event_type::ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, Level::ERROR);
    assert_eq!(errors[0].error.as_deref(), Some("no active slot to route to"));
}

#[test]
fn given_an_observer_at_info_should_drop_debug_traces() {
    let (builder, memory) = Builder::new().with_memory_tracer(LevelFilter::TRACE);
    let mut traced: Lens<TestMsg, Counter> =
        builder.with_level(LevelFilter::INFO).wrap(Counter::default());

    traced.update(Event::Trace(Signal::new(Level::DEBUG, "chatty")));
    traced.update(Event::Trace(Signal::new(Level::WARN, "important")));

    let traces = memory.events_of_type(event_type::TRACE);
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].message, "important");
    assert!(memory.events_of_type(event_type::UPDATE).is_empty());
}

#[test]
fn given_a_memory_tracer_when_cleared_should_forget_everything() {
    let (mut traced, memory) = given_a_traced_counter();
    traced.update(Event::Message(TestMsg::Increment));
    assert!(memory.count() > 0);

    memory.clear();

    assert_eq!(memory.count(), 0);
}

#[test]
fn given_a_json_writer_should_write_one_parseable_line_per_event() {
    let ctx = TraceContext::new(LevelFilter::TRACE);
    let tracer = WriterTracer::new(Vec::new(), LevelFilter::INFO, Format::Json);

    tracer.emit(&TraceEvent::new(&ctx, "custom.saved", Level::INFO, "saved").with_atom("Editor"));
    tracer.emit(&TraceEvent::new(&ctx, "custom.noise", Level::DEBUG, "ignored"));
    tracer.close().unwrap();

    let output = String::from_utf8(tracer.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    let event: TraceEvent = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(event.event_type, "custom.saved");
    assert_eq!(event.level, Level::INFO);
    assert_eq!(event.atom_name.as_deref(), Some("Editor"));
    assert_eq!(event.trace_id, ctx.trace_id);
    assert_eq!(event.parent_span_id, Some(ctx.span_id));
}

#[test]
fn given_a_text_writer_should_write_a_readable_line() {
    let ctx = TraceContext::new(LevelFilter::TRACE);
    let tracer = WriterTracer::new(Vec::new(), LevelFilter::TRACE, Format::Text);

    tracer.emit(&TraceEvent::new(&ctx, event_type::ERROR, Level::ERROR, "boom").with_error("disk full"));

    let output = String::from_utf8(tracer.into_inner()).unwrap();
    assert!(output.contains("atom.error"));
    assert!(output.contains("error:disk full"));
    assert!(output.trim_end().ends_with("| boom"));
}

#[test]
fn given_a_composite_should_fan_out_only_to_enabled_sinks() {
    let verbose = MemoryTracer::new(LevelFilter::TRACE);
    let quiet = MemoryTracer::new(LevelFilter::WARN);
    let sinks: Vec<SharedTracer> = vec![
        Arc::new(verbose.clone()),
        Arc::new(quiet.clone()),
        Arc::new(NullTracer),
    ];
    let composite = CompositeTracer::new(sinks);
    let ctx = TraceContext::new(LevelFilter::TRACE);

    composite.emit(&TraceEvent::new(&ctx, "custom", Level::DEBUG, "detail"));
    composite.emit(&TraceEvent::new(&ctx, "custom", Level::ERROR, "failure"));

    assert_eq!(composite.len(), 3);
    assert!(composite.is_enabled(Level::TRACE));
    assert_eq!(verbose.count(), 2);
    assert_eq!(quiet.count(), 1);
    assert_eq!(quiet.events()[0].message, "failure");
}

#[test]
fn given_a_child_observer_should_share_the_trace_and_link_to_its_parent_span() {
    let memory = MemoryTracer::new(LevelFilter::TRACE);
    let parent = Observer::new(Arc::new(memory.clone()), LevelFilter::TRACE);

    let child = parent.child();
    child.emit_custom("custom.child", Level::INFO, "hello", BTreeMap::new());

    let events = memory.events_of_type("custom.child");
    assert_eq!(events.len(), 1);
    assert_eq!(child.context().trace_id, parent.context().trace_id);
    assert_eq!(child.context().parent_span_id, Some(parent.context().span_id));
    assert_eq!(events[0].parent_span_id, Some(child.context().span_id));
}

#[test]
fn given_custom_metadata_should_be_merged_into_the_event() {
    let (builder, memory) = Builder::testing();
    let observer = builder.with_metadata("screen", "menu").build();
    let mut extra = BTreeMap::new();
    extra.insert("items".to_string(), serde_json::json!(3));

    observer.emit_custom("menu.loaded", Level::INFO, "loaded", extra);

    let event = &memory.events_of_type("menu.loaded")[0];
    assert_eq!(event.metadata.get("screen"), Some(&serde_json::json!("menu")));
    assert_eq!(event.metadata.get("items"), Some(&serde_json::json!(3)));
}

#[test]
fn given_a_builder_without_sinks_should_observe_nothing() {
    let observer = Builder::new().with_level(LevelFilter::TRACE).build();

    assert!(!observer.is_enabled(Level::ERROR));
    assert!(observer.close().is_ok());
}

#[test]
fn given_the_production_preset_should_append_json_lines_to_the_file() {
    let path = std::env::temp_dir().join(format!("polymer-{}.jsonl", uuid::Uuid::new_v4()));
    let observer = Builder::production(&path).unwrap().build();
    let mut traced: Lens<TestMsg, Counter> = observer.lens(Counter::default());

    let _ = traced.init();
    traced.update(Event::Message(TestMsg::Increment));
    observer.close().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let events: Vec<TraceEvent> = written.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, event_type::INIT);
    assert_eq!(events[0].metadata.get("environment"), Some(&serde_json::json!("production")));
}

#[test]
fn given_the_development_preset_should_accept_debug_but_not_trace() {
    let observer = Builder::development().build();

    assert!(observer.is_enabled(Level::DEBUG));
    assert!(!observer.is_enabled(Level::TRACE));
}

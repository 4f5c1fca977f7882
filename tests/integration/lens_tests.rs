use std::sync::{Arc, Mutex};

use oxide_polymer::{
    resolve, same_component, AtomId, Chain, Component, Context, Effect, Error, Event, IdRegistry,
    Identity, Lens, Next, Signal,
};
use tracing::Level;

use super::{Counter, Greeting, MockProbe, Probed, Screen, TestMsg};

type Log = Arc<Mutex<Vec<String>>>;

fn recording(log: &Log, entry: &'static str) -> impl Fn() + Send + 'static {
    let log = log.clone();
    move || log.lock().unwrap().push(entry.to_string())
}

#[test]
fn given_a_lens_over_a_counter_when_incremented_three_times_should_log_each_update() {
    let log: Log = Arc::default();
    let seen = log.clone();
    let mut lens: Lens<TestMsg, Counter> = Lens::new(Counter::at(0))
        .after_update(move |leaf, _next, _effect| seen.lock().unwrap().push(leaf.render()));

    for _ in 0..3 {
        lens.update(Event::Message(TestMsg::Increment));
    }

    assert_eq!(lens.get_ref(), &Counter::at(3));
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[test]
fn given_any_wrapped_state_should_render_exactly_like_the_wrapped_component() {
    let mut lens: Lens<TestMsg, Counter> =
        Lens::new(Counter::default()).on_render(|_leaf, _rendered| {});

    for _ in 0..5 {
        assert_eq!(lens.render(), lens.get_ref().render());
        lens.update(Event::Message(TestMsg::Increment));
    }
    assert_eq!(lens.render(), "count: 5");
}

#[test]
fn given_nested_lenses_should_resolve_to_the_leaf_idempotently() {
    let mut current: Box<dyn Component<TestMsg>> = Box::new(Screen::new("leaf"));
    for depth in 0..4 {
        let once = addr_of(resolve(current.as_ref()));
        let twice = addr_of(resolve(resolve(current.as_ref())));
        assert_eq!(once, twice, "depth {depth}");
        assert_eq!(resolve(current.as_ref()).name(), "leaf");

        current = Box::new(Lens::<TestMsg>::new(current));
    }
}

fn addr_of(component: &dyn Component<TestMsg>) -> *const () {
    super::addr(component)
}

#[test]
fn given_a_lens_over_a_chain_should_report_the_chain_top_to_hooks() {
    let names: Arc<Mutex<Vec<String>>> = Arc::default();
    let seen = names.clone();
    let mut chain: Chain<TestMsg> = Chain::new(Screen::new("menu"));
    chain.push(Box::new(Screen::new("detail")));
    let mut lens: Lens<TestMsg, Chain<TestMsg>> =
        Lens::new(chain).before_update(move |leaf, _event| seen.lock().unwrap().push(leaf.name().to_string()));

    lens.update(Event::Message(TestMsg::Increment));

    assert_eq!(*names.lock().unwrap(), vec!["detail".to_string()]);
    assert!(same_component(lens.leaf(), lens.get_ref().active().expect("top")));
}

#[test]
fn given_an_error_event_should_call_on_error_before_the_update_hooks() {
    let log: Log = Arc::default();
    let error_log = recording(&log, "error");
    let before_log = recording(&log, "before");
    let after_log = recording(&log, "after");
    let trace_log = recording(&log, "trace");
    let mut lens: Lens<TestMsg, Counter> = Lens::new(Counter::default())
        .on_error(move |_leaf, _err| error_log())
        .on_trace(move |_leaf, _signal| trace_log())
        .before_update(move |_leaf, _event| before_log())
        .after_update(move |_leaf, _next, _effect| after_log());

    lens.update(Event::Error(Error::StackEmpty));

    assert_eq!(*log.lock().unwrap(), vec!["error", "before", "after"]);
}

#[test]
fn given_a_trace_event_should_call_on_trace_before_the_update_hooks() {
    let log: Log = Arc::default();
    let trace_log = recording(&log, "trace");
    let before_log = recording(&log, "before");
    let messages: Arc<Mutex<Vec<String>>> = Arc::default();
    let seen = messages.clone();
    let mut lens: Lens<TestMsg, Counter> = Lens::new(Counter::default())
        .on_trace(move |_leaf, signal| {
            trace_log();
            seen.lock().unwrap().push(signal.message.clone());
        })
        .before_update(move |_leaf, _event| before_log());

    lens.update(Event::Trace(Signal::new(Level::INFO, "loaded")));

    assert_eq!(*log.lock().unwrap(), vec!["trace", "before"]);
    assert_eq!(*messages.lock().unwrap(), vec!["loaded".to_string()]);
}

#[test]
fn given_a_wrapped_init_should_pass_its_effect_through_to_the_hook_and_caller() {
    let mut probe = MockProbe::new();
    probe
        .expect_on_init()
        .times(1)
        .returning(|| oxide_polymer::Effect::message(TestMsg::Increment));
    let saw_effect = Arc::new(Mutex::new(None));
    let seen = saw_effect.clone();
    let mut lens: Lens<TestMsg, Probed> = Lens::new(Probed::new("probe", probe))
        .on_init(move |leaf, effect| *seen.lock().unwrap() = Some((leaf.name().to_string(), !effect.is_none())));

    let events = lens.init().into_events();

    assert!(matches!(events.as_slice(), [Event::Message(TestMsg::Increment)]));
    assert_eq!(*saw_effect.lock().unwrap(), Some(("probe".to_string(), true)));
}

#[test]
fn given_a_wrapped_component_reporting_done_should_pass_it_through() {
    let mut lens: Lens<TestMsg, Counter> = Lens::new(Counter::at(2));

    let (next, _) = lens.update(Event::Message(TestMsg::Finish));

    assert_eq!(next, Next::Done);
}

#[test]
fn given_a_context_aware_component_should_expose_its_capability_through_the_lens() {
    let mut lens: Lens<TestMsg, Greeting> = Lens::new(Greeting::default());

    let delivered = oxide_polymer::deliver_context::<TestMsg, _>(&mut lens, &Context::new("Lin".to_string()));

    assert!(delivered);
    assert_eq!(lens.render(), "Hello, Lin!");
    assert_eq!(lens.name(), "Greeting");
}

struct Tagged {
    identity: Identity,
}

impl Component<TestMsg> for Tagged {
    fn update(&mut self, _event: Event<TestMsg>) -> (Next, Effect<TestMsg>) {
        (Next::Keep, Effect::none())
    }

    fn render(&self) -> String {
        self.identity.name().to_string()
    }

    fn name(&self) -> &str {
        self.identity.name()
    }

    fn id(&self) -> Option<AtomId> {
        Some(self.identity.id())
    }
}

#[test]
fn given_a_component_with_an_identity_should_report_it_through_nested_lenses() {
    let registry = IdRegistry::new();
    let tagged = Tagged {
        identity: registry.identity(registry.unique_name("detail")),
    };
    let lens: Lens<TestMsg, Lens<TestMsg, Tagged>> = Lens::new(Lens::new(tagged));

    assert_eq!(lens.name(), "detail#1");
    assert_eq!(lens.id().map(AtomId::get), Some(2));
    assert_eq!(lens.leaf().id(), lens.id());
}

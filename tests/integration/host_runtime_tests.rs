use std::sync::{Arc, Mutex};

use oxide_polymer::{
    create_test_spawner, Chain, Context, Dual, DualSlot, Error, Event, Host, KeyCode, KeyEvent,
    KeyModifiers, Lens, MvuRuntime, TestRenderer,
};

use super::{given_a_host, given_a_root, Counter, Greeting, Screen, TestMsg};

#[test]
fn given_a_root_when_started_should_render_the_initial_frame() {
    let (_driver, renderer) = given_a_root(Counter::default());

    assert_eq!(renderer.count(), 1);
    renderer.with_renders(|renders| {
        assert_eq!(renders[0], "count: 0");
    });
}

#[test]
fn given_a_message_when_processed_should_render_again() {
    let (mut driver, renderer) = given_a_root(Counter::default());

    driver.send(TestMsg::Increment);
    driver.send(TestMsg::Increment);
    driver.process_events();

    assert_eq!(renderer.count(), 3);
    assert_eq!(renderer.last().as_deref(), Some("count: 2"));
}

#[test]
fn given_a_chain_root_when_a_screen_is_opened_should_render_it_after_the_push() {
    let (mut driver, renderer) = given_a_root(Chain::<TestMsg>::new(Screen::new("menu")));

    driver.send(TestMsg::Open("detail"));
    driver.process_events();

    renderer.with_renders(|renders| {
        assert_eq!(renders.first().map(String::as_str), Some("menu (0)"));
        assert_eq!(renders.last().map(String::as_str), Some("detail (0)"));
    });

    driver.emit(Event::key(KeyCode::Esc));
    driver.process_events();

    assert_eq!(renderer.last().as_deref(), Some("menu (0)"));
}

#[test]
fn given_ctrl_c_should_stop_the_runtime() {
    let (mut driver, renderer) = given_a_root(Counter::default());

    driver.emit(Event::ctrl('c'));
    driver.process_events();
    driver.send(TestMsg::Increment);
    driver.process_events();

    assert!(driver.is_stopped());
    assert_eq!(renderer.last().as_deref(), Some("count: 0"));
}

#[test]
fn given_custom_quit_keys_should_replace_ctrl_c() {
    let host = Host::new(Counter::default())
        .with_quit_keys(vec![KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)]);
    let (mut driver, _renderer) = given_a_host(host);

    driver.emit(Event::ctrl('c'));
    driver.process_events();
    assert!(!driver.is_stopped());

    driver.emit(Event::key(KeyCode::Char('q')));
    driver.process_events();
    assert!(driver.is_stopped());
}

#[test]
fn given_a_root_reporting_done_should_quit() {
    let (mut driver, _renderer) = given_a_root(Counter::default());

    driver.send(TestMsg::Finish);
    driver.process_events();

    assert!(driver.is_stopped());
}

#[test]
fn given_no_root_should_quit_right_away() {
    let (mut driver, renderer) = given_a_host(Host::empty());

    driver.process_events();

    assert!(driver.is_stopped());
    assert_eq!(renderer.last().as_deref(), Some(""));
}

#[test]
fn given_a_configured_context_should_reach_the_root_before_the_first_frame() {
    let host = Host::new(Greeting::default()).with_context("Ada".to_string());

    let (_driver, renderer) = given_a_host(host);

    assert_eq!(renderer.last().as_deref(), Some("Hello, Ada!"));
}

#[test]
fn given_a_configured_context_and_a_root_without_the_capability_should_replay_it_as_an_event() {
    let host = Host::new(Chain::<TestMsg>::new(Greeting::default())).with_context("Ada".to_string());

    let (mut driver, renderer) = given_a_host(host);
    assert_eq!(renderer.last().as_deref(), Some("Hello?"));
    driver.process_events();

    assert_eq!(renderer.last().as_deref(), Some("Hello, Ada!"));
}

#[test]
fn given_a_context_event_should_be_stored_and_delivered_to_the_root() {
    let (mut driver, renderer) = given_a_root(Greeting::default());

    driver.emit(Event::Context(Context::new("Bo".to_string())));
    driver.process_events();

    assert_eq!(renderer.last().as_deref(), Some("Hello, Bo!"));
    let stored = driver.logic().context().and_then(|ctx| ctx.get::<String>().cloned());
    assert_eq!(stored.as_deref(), Some("Bo"));
}

#[test]
fn given_a_resize_should_remember_the_window_size() {
    let (mut driver, _renderer) = given_a_root(Counter::default());

    driver.emit(Event::Resize { width: 80, height: 24 });
    driver.process_events();

    assert_eq!(driver.logic().size(), Some((80, 24)));
}

#[test]
fn given_a_pop_on_the_last_screen_should_deliver_the_empty_stack_error_back_to_the_root() {
    let errors: Arc<Mutex<Vec<String>>> = Arc::default();
    let seen = errors.clone();
    let root: Lens<TestMsg, Chain<TestMsg>> = Lens::new(Chain::new(Screen::new("menu")))
        .on_error(move |_leaf, err| seen.lock().unwrap().push(err.to_string()));
    let (mut driver, renderer) = given_a_root(root);

    driver.send(TestMsg::Close);
    driver.process_events();

    assert!(!driver.is_stopped());
    assert_eq!(*errors.lock().unwrap(), vec![Error::StackEmpty.to_string()]);
    assert_eq!(renderer.last().as_deref(), Some("menu (0)"));
}

#[test]
fn given_a_component_error_should_reach_the_root_through_the_loop() {
    let errors: Arc<Mutex<usize>> = Arc::default();
    let seen = errors.clone();
    let root: Lens<TestMsg, Counter> =
        Lens::new(Counter::default()).on_error(move |_leaf, _err| *seen.lock().unwrap() += 1);
    let (mut driver, _renderer) = given_a_root(root);

    driver.send(TestMsg::Fail);
    driver.process_events();

    assert_eq!(*errors.lock().unwrap(), 1);
}

#[test]
fn given_queued_events_when_the_async_loop_runs_should_process_them_in_order_until_quit() {
    let renderer = TestRenderer::new();
    let mut runtime = MvuRuntime::new(
        Host::<TestMsg>::new(Counter::default()),
        renderer.clone(),
        create_test_spawner(),
    );
    let emitter = runtime.emitter();
    emitter.send(TestMsg::Increment);
    emitter.send(TestMsg::Increment);
    emitter.emit(Event::Quit);
    emitter.send(TestMsg::Increment);

    futures::executor::block_on(runtime.run());

    renderer.with_renders(|renders| {
        assert_eq!(renders, &vec!["count: 0", "count: 1", "count: 2"]);
    });
}

#[test]
fn given_a_configured_context_and_a_dual_root_should_reach_the_targeted_child() {
    let root: Dual<TestMsg, Greeting, Counter> =
        Dual::new(DualSlot::A).with_a(Greeting::default()).with_b(Counter::default());
    let host = Host::new(root).with_context("Ada".to_string());

    let (mut driver, renderer) = given_a_host(host);
    driver.process_events();

    assert_eq!(renderer.last().as_deref(), Some("Hello, Ada!"));
}

use oxide_polymer::{resolve, same_component, Chain, Component, Effect, Error, Event, KeyCode, Nav, Next};

use super::{addr, is_error, quiet_probe, settle, Counter, MockProbe, Probed, Screen, TestMsg};

fn given_a_menu_chain() -> Chain<TestMsg> {
    Chain::new(Screen::new("menu"))
}

#[test]
fn given_a_seeded_chain_when_detail_pushed_then_popped_should_return_to_menu() {
    let mut chain = given_a_menu_chain();

    chain.update(Event::Nav(Nav::Push(Box::new(Screen::new("detail")))));

    assert_eq!(chain.active().map(|c| c.name()), Some("detail"));
    assert_eq!(chain.depth(), 2);

    chain.update(Event::Nav(Nav::Pop));

    assert_eq!(chain.active().map(|c| c.name()), Some("menu"));
    assert_eq!(chain.depth(), 1);
}

#[test]
fn given_a_single_element_chain_when_popped_should_keep_seed_and_report_empty_stack() {
    let mut chain = given_a_menu_chain();

    let (next, effect) = chain.update(Event::Nav(Nav::Pop));
    let events = effect.into_events();

    assert_eq!(next, Next::Keep);
    assert_eq!(chain.depth(), 1);
    assert_eq!(chain.render(), "menu (0)");
    assert_eq!(events.len(), 1);
    assert!(is_error(&events[0], |err| matches!(err, Error::StackEmpty)));
}

#[test]
fn given_any_push_pop_sequence_should_never_drop_below_one_element() {
    let mut chain = given_a_menu_chain();
    let script = [true, false, false, true, true, false, false, false, false, true];

    for push in script {
        let nav = if push {
            Nav::Push(Box::new(Screen::new("extra")))
        } else {
            Nav::Pop
        };
        chain.update(Event::Nav(nav));
        assert!(chain.depth() >= 1);
    }
    assert_eq!(chain.depth(), 2);
}

#[test]
fn given_a_chain_when_pushed_then_popped_should_return_the_pushed_component() {
    let mut chain = given_a_menu_chain();
    chain.push(Box::new(Screen::new("middle")));
    let below: Vec<String> = (0..chain.depth())
        .filter_map(|n| chain.peek(n).map(|c| c.name().to_string()))
        .collect();

    chain.push(Box::new(Screen::new("detail")));
    let pushed_addr = chain.active().map(addr);
    let popped = chain.pop();

    let after: Vec<String> = (0..chain.depth())
        .filter_map(|n| chain.peek(n).map(|c| c.name().to_string()))
        .collect();
    assert_eq!(after, below);

    let popped = popped.expect("pushed component");
    assert_eq!(popped.name(), "detail");
    assert_eq!(Some(addr(&*popped)), pushed_addr);
}

#[test]
fn given_stacks_of_any_depth_when_replaced_should_keep_depth_and_show_replacement() {
    for depth in 1..=4 {
        let mut chain = given_a_menu_chain();
        for _ in 1..depth {
            chain.push(Box::new(Screen::new("filler")));
        }

        chain.update(Event::Nav(Nav::Replace(Box::new(Screen::new("replacement")))));

        assert_eq!(chain.depth(), depth);
        assert_eq!(chain.active().map(|c| c.name()), Some("replacement"));
    }
}

#[test]
fn given_stacks_of_any_depth_when_reset_to_nothing_should_restore_the_seed() {
    for depth in 1..=4 {
        let mut chain = given_a_menu_chain();
        let seed_addr = chain.seed().map(addr);
        for _ in 1..depth {
            chain.push(Box::new(Screen::new("filler")));
        }

        chain.update(Event::Nav(Nav::Reset(None)));

        assert_eq!(chain.depth(), 1);
        let top = chain.active().expect("seed");
        assert_eq!(top.name(), "menu");
        assert_eq!(Some(addr(top)), seed_addr);
    }
}

#[test]
fn given_a_deep_chain_when_reset_to_a_component_should_hold_only_that_component() {
    let mut chain = given_a_menu_chain();
    chain.push(Box::new(Screen::new("detail")));

    chain.update(Event::Nav(Nav::Reset(Some(Box::new(Screen::new("home"))))));

    assert_eq!(chain.depth(), 1);
    assert_eq!(chain.render(), "home (0)");
}

#[test]
fn given_a_chain_when_non_structural_event_arrives_should_update_only_the_top() {
    let mut chain = given_a_menu_chain();
    chain.push(Box::new(Screen::new("detail")));

    chain.update(Event::Message(TestMsg::Increment));
    chain.update(Event::Message(TestMsg::Increment));

    assert_eq!(chain.render(), "detail (2)");
    chain.pop();
    assert_eq!(chain.render(), "menu (0)");
}

#[test]
fn given_a_top_that_reports_done_should_stay_on_the_stack() {
    let mut chain: Chain<TestMsg> = Chain::new(Counter::default());
    chain.push(Box::new(Counter::at(5)));

    let (next, effect) = chain.update(Event::Message(TestMsg::Finish));

    assert_eq!(next, Next::Keep);
    assert!(effect.is_none());
    assert_eq!(chain.depth(), 2);
    assert_eq!(chain.render(), "count: 5");
}

#[test]
fn given_a_leaf_asking_to_open_and_close_should_navigate_through_effects() {
    let mut chain = given_a_menu_chain();

    let (_, effect) = chain.update(Event::Message(TestMsg::Open("detail")));
    settle(&mut chain, effect);
    assert_eq!(chain.render(), "detail (0)");

    let (_, effect) = chain.update(Event::key(KeyCode::Esc));
    let leftovers = settle(&mut chain, effect);
    assert!(leftovers.is_empty());
    assert_eq!(chain.render(), "menu (0)");
}

#[test]
fn given_a_push_should_initialize_the_new_top() {
    let mut chain = given_a_menu_chain();
    let mut probe = MockProbe::new();
    probe
        .expect_on_init()
        .times(1)
        .returning(|| Effect::message(TestMsg::Increment));
    probe.expect_on_update().return_const(());

    let (_, effect) = chain.update(Event::Nav(Nav::Push(Box::new(Probed::new("probe", probe)))));
    let events = effect.into_events();

    assert!(matches!(events.as_slice(), [Event::Message(TestMsg::Increment)]));
}

#[test]
fn given_a_pop_should_initialize_the_revealed_top() {
    let mut probe = MockProbe::new();
    probe.expect_on_init().times(1).returning(Effect::none);
    probe.expect_on_update().return_const(());
    let mut chain: Chain<TestMsg> = Chain::new(Probed::new("bottom", probe));
    chain.push(Box::new(Probed::new("top", quiet_probe())));

    chain.update(Event::Nav(Nav::Pop));

    assert_eq!(chain.render(), "bottom");
}

fn initializing_once(label: &'static str) -> Probed {
    let mut probe = MockProbe::new();
    probe
        .expect_on_init()
        .times(1)
        .returning(|| Effect::message(TestMsg::Increment));
    probe.expect_on_update().return_const(());
    Probed::new(label, probe)
}

#[test]
fn given_a_replace_should_initialize_the_replacement() {
    let mut chain = given_a_menu_chain();
    chain.push(Box::new(Screen::new("detail")));

    let (_, effect) = chain.update(Event::Nav(Nav::Replace(Box::new(initializing_once("swap")))));
    let events = effect.into_events();

    assert!(matches!(events.as_slice(), [Event::Message(TestMsg::Increment)]));
    assert_eq!(chain.depth(), 2);
    assert_eq!(chain.render(), "swap");
}

#[test]
fn given_a_reset_to_a_component_should_initialize_it() {
    let mut chain = given_a_menu_chain();
    chain.push(Box::new(Screen::new("detail")));
    chain.push(Box::new(Screen::new("settings")));

    let (_, effect) = chain.update(Event::Nav(Nav::Reset(Some(Box::new(initializing_once("home"))))));
    let events = effect.into_events();

    assert!(matches!(events.as_slice(), [Event::Message(TestMsg::Increment)]));
    assert_eq!(chain.depth(), 1);
    assert_eq!(chain.render(), "home");
}

#[test]
fn given_a_reset_to_nothing_should_initialize_the_seed_again() {
    let mut chain: Chain<TestMsg> = Chain::new(initializing_once("seed"));
    chain.push(Box::new(Screen::new("detail")));
    chain.push(Box::new(Screen::new("settings")));

    let (_, effect) = chain.update(Event::Nav(Nav::Reset(None)));
    let events = effect.into_events();

    assert!(matches!(events.as_slice(), [Event::Message(TestMsg::Increment)]));
    assert_eq!(chain.depth(), 1);
    assert_eq!(chain.render(), "seed");
}

#[test]
fn given_a_chain_should_resolve_through_to_its_top() {
    let mut chain = given_a_menu_chain();
    chain.push(Box::new(Screen::new("detail")));

    let leaf = chain.resolved().expect("top");
    let active = chain.active().expect("top");

    assert!(same_component(leaf, active));
    assert_eq!(resolve::<TestMsg>(&chain).name(), "detail");
}

#[test]
#[should_panic(expected = "chain requires an initial component")]
fn given_no_components_when_constructing_from_stack_should_panic() {
    let _chain: Chain<TestMsg> = Chain::from_stack(Vec::new());
}

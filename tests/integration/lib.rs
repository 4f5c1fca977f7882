
use std::future::Future;
use std::pin::Pin;

use oxide_polymer::{create_test_spawner, Component, Host, TestMvuDriver, TestMvuRuntime, TestRenderer};
pub(crate) use components::*;

mod chain_tests;
mod host_runtime_tests;
mod lens_tests;
mod observe_tests;

pub(crate) type TestSpawner = fn(Pin<Box<dyn Future<Output = ()> + Send>>);

pub(crate) type TestDriver = TestMvuDriver<TestMsg, Host<TestMsg>, TestRenderer, TestSpawner>;

pub(crate) fn given_a_root<C>(root: C) -> (TestDriver, TestRenderer)
where
    C: Component<TestMsg> + 'static,
{
    given_a_host(Host::new(root))
}

pub(crate) fn given_a_host(host: Host<TestMsg>) -> (TestDriver, TestRenderer) {
    let renderer = TestRenderer::new();

    let runtime = TestMvuRuntime::new(host, renderer.clone(), create_test_spawner());
    let driver = runtime.run();

    (driver, renderer)
}

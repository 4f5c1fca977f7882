//! The MVU runtime that orchestrates the event loop.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use flume::Receiver;
use tracing::{debug, info, trace};

use crate::{Effect, Emitter, Event, MvuLogic, Renderer};

/// A spawner trait for executing futures on an async runtime.
///
/// This abstraction allows you to use whatever concurrency model you want (tokio, async-std, a thread per effect, etc.).
///
/// Function pointers and closures automatically implement this trait via the blanket implementation.
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>);
}

/// Implement Spawner for any callable type that matches the signature.
///
/// This includes function pointers, closures, and function items.
impl<F> Spawner for F
where
    F: Fn(Pin<Box<dyn Future<Output = ()> + Send>>),
{
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self(future)
    }
}

/// The MVU runtime that orchestrates the event loop.
///
/// This is the core of the host side. It:
/// 1. Requests the startup effect via [`MvuLogic::init`]
/// 2. Processes events through [`MvuLogic::update`], one at a time
/// 3. Draws the result of [`MvuLogic::view`] with the [`Renderer`]
/// 4. Hands every effect to the [`Spawner`]
///
/// The runtime creates a single [`Emitter`] that can send events from any thread.
/// Events are queued on a channel and processed strictly in arrival order on the
/// task that awaits [`MvuRuntime::run`]. The loop ends on [`Event::Quit`].
///
/// For testing with manual control, use [`TestMvuRuntime`] with a [`crate::TestRenderer`].
///
/// # Type Parameters
///
/// * `M` - The application message type
/// * `Logic` - The logic implementation type (implements [`MvuLogic`])
/// * `Render` - The renderer implementation type (implements [`Renderer`])
/// * `Spawn` - The spawner implementation type (implements [`Spawner`])
pub struct MvuRuntime<M, Logic, Render, Spawn>
where
    M: Send,
    Logic: MvuLogic<M>,
    Render: Renderer,
    Spawn: Spawner,
{
    logic: Logic,
    renderer: Render,
    event_receiver: Receiver<Event<M>>,
    emitter: Emitter<M>,
    spawner: Spawn,
    _msg: PhantomData<fn() -> M>,
}

impl<M, Logic, Render, Spawn> MvuRuntime<M, Logic, Render, Spawn>
where
    M: Send + 'static,
    Logic: MvuLogic<M>,
    Render: Renderer,
    Spawn: Spawner,
{
    /// Create a new runtime.
    ///
    /// The runtime will not be started until [`MvuRuntime::run`] is called.
    ///
    /// # Arguments
    ///
    /// * `logic` - Application logic implementing MvuLogic, usually a [`Host`](crate::Host)
    /// * `renderer` - Platform rendering implementation
    /// * `spawner` - Spawner to execute effects on your chosen runtime
    pub fn new(logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        let (event_sender, event_receiver) = flume::unbounded();

        MvuRuntime {
            logic,
            renderer,
            event_receiver,
            emitter: Emitter::new(event_sender),
            spawner,
            _msg: PhantomData,
        }
    }

    /// A handle for feeding events in from outside, such as a terminal input pump.
    pub fn emitter(&self) -> Emitter<M> {
        self.emitter.clone()
    }

    pub fn logic(&self) -> &Logic {
        &self.logic
    }

    /// Initialize the runtime and run the event processing loop.
    ///
    /// - Uses [`MvuLogic::init`] to create and spawn the startup effect.
    /// - Renders the initial frame.
    /// - Processes events from the channel until [`Event::Quit`].
    pub async fn run(&mut self) {
        self.start();

        while let Ok(event) = self.event_receiver.recv_async().await {
            if !self.step(event) {
                break;
            }
        }
        info!("runtime stopped");
    }

    fn start(&mut self) {
        let init_effect = self.logic.init();
        self.renderer.render(self.logic.view());
        self.spawn(init_effect);
    }

    /// Process one event; returns `false` once the runtime should stop.
    fn step(&mut self, event: Event<M>) -> bool {
        if let Event::Quit = event {
            debug!("quit requested");
            return false;
        }

        trace!(kind = event.kind(), "processing event");
        let effect = self.logic.update(event);
        self.renderer.render(self.logic.view());
        self.spawn(effect);
        true
    }

    fn spawn(&self, effect: Effect<M>) {
        if effect.is_none() {
            return;
        }
        let emitter = self.emitter.clone();
        self.spawner.spawn(Box::pin(async move {
            effect.execute(&emitter);
        }));
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test spawner function that executes futures synchronously.
///
/// This blocks on the future immediately rather than spawning it on an async runtime.
pub fn test_spawner_fn(fut: Pin<Box<dyn Future<Output = ()> + Send>>) {
    // Execute the future synchronously for deterministic testing
    futures::executor::block_on(fut);
}

#[cfg(any(test, feature = "testing"))]
/// Creates a test spawner that executes futures synchronously.
///
/// Use this with [`TestMvuRuntime`] or [`MvuRuntime`] in test scenarios.
/// Returns a function pointer that can be passed directly to runtime
/// constructors without heap allocation.
pub fn create_test_spawner() -> fn(Pin<Box<dyn Future<Output = ()> + Send>>) {
    test_spawner_fn
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime driver for manual event processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Returned by [`TestMvuRuntime::run`]. Provides methods to manually
/// emit events and process the event queue for precise control in tests.
pub struct TestMvuDriver<M, Logic, Render, Spawn>
where
    M: Send + 'static,
    Logic: MvuLogic<M>,
    Render: Renderer,
    Spawn: Spawner,
{
    runtime: MvuRuntime<M, Logic, Render, Spawn>,
    stopped: bool,
}

#[cfg(any(test, feature = "testing"))]
impl<M, Logic, Render, Spawn> TestMvuDriver<M, Logic, Render, Spawn>
where
    M: Send + 'static,
    Logic: MvuLogic<M>,
    Render: Renderer,
    Spawn: Spawner,
{
    /// Queue an event without processing it.
    pub fn emit(&self, event: Event<M>) {
        self.runtime.emitter.emit(event);
    }

    /// Queue an application message without processing it.
    pub fn send(&self, message: M) {
        self.runtime.emitter.send(message);
    }

    pub fn emitter(&self) -> Emitter<M> {
        self.runtime.emitter()
    }

    /// Process all queued events.
    ///
    /// This processes events until the queue is empty or [`Event::Quit`]
    /// arrives. Once stopped, further calls do nothing.
    pub fn process_events(&mut self) {
        while !self.stopped {
            let Ok(event) = self.runtime.event_receiver.try_recv() else {
                break;
            };
            if !self.runtime.step(event) {
                self.stopped = true;
            }
        }
    }

    /// Whether an [`Event::Quit`] has been processed.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn logic(&self) -> &Logic {
        &self.runtime.logic
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime for MVU with manual event processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`MvuRuntime`], this runtime does not automatically
/// process events when they are emitted. Instead, tests must manually call
/// [`process_events`](TestMvuDriver::process_events) on the returned driver
/// to process the event queue.
///
/// ```rust
/// use oxide_polymer::{create_test_spawner, Component, Effect, Event, Host, Next, TestMvuRuntime, TestRenderer};
///
/// #[derive(Default)]
/// struct Clicks(u32);
///
/// impl Component<()> for Clicks {
///     fn update(&mut self, event: Event<()>) -> (Next, Effect<()>) {
///         if let Event::Message(()) = event {
///             self.0 += 1;
///         }
///         (Next::Keep, Effect::none())
///     }
///     fn render(&self) -> String { format!("clicks: {}", self.0) }
/// }
///
/// let renderer = TestRenderer::new();
/// let runtime = TestMvuRuntime::new(Host::<()>::new(Clicks::default()), renderer.clone(), create_test_spawner());
/// let mut driver = runtime.run();
///
/// driver.send(());
/// driver.process_events(); // Manually process events
///
/// assert_eq!(renderer.last().as_deref(), Some("clicks: 1"));
/// ```
pub struct TestMvuRuntime<M, Logic, Render, Spawn>
where
    M: Send + 'static,
    Logic: MvuLogic<M>,
    Render: Renderer,
    Spawn: Spawner,
{
    runtime: MvuRuntime<M, Logic, Render, Spawn>,
}

#[cfg(any(test, feature = "testing"))]
impl<M, Logic, Render, Spawn> TestMvuRuntime<M, Logic, Render, Spawn>
where
    M: Send + 'static,
    Logic: MvuLogic<M>,
    Render: Renderer,
    Spawn: Spawner,
{
    /// Create a new test runtime.
    ///
    /// Creates an emitter that enqueues events without automatically processing them.
    pub fn new(logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        TestMvuRuntime {
            runtime: MvuRuntime::new(logic, renderer, spawner),
        }
    }

    /// Initializes the runtime and returns a driver for manual event processing.
    ///
    /// This spawns the startup effect and renders the initial frame, then returns
    /// a [`TestMvuDriver`] that provides manual control over event processing.
    pub fn run(mut self) -> TestMvuDriver<M, Logic, Render, Spawn> {
        self.runtime.start();

        TestMvuDriver {
            runtime: self.runtime,
            stopped: false,
        }
    }
}

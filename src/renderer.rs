//! Renderer abstraction for rendering frames.

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// Renderer abstraction for drawing frames.
///
/// Implement this trait to send the frames produced by
/// [`MvuLogic::view`](crate::MvuLogic::view) to a terminal, a log, or a test
/// capture. [`TerminalRenderer`](crate::terminal::TerminalRenderer) is the
/// crossterm implementation.
///
/// # Example
///
/// ```rust
/// use oxide_polymer::Renderer;
///
/// struct ConsoleRenderer;
///
/// impl Renderer for ConsoleRenderer {
///     fn render(&mut self, frame: String) {
///         println!("{frame}");
///     }
/// }
/// ```
pub trait Renderer {
    /// Render one complete frame.
    fn render(&mut self, frame: String);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: String) {
        (**self).render(frame)
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test renderer that captures all rendered frames for assertions.
///
/// Only available with the `testing` feature.
///
/// Clones share the same capture buffer, so hand one clone to
/// [`TestMvuRuntime`](crate::TestMvuRuntime) and keep another for assertions.
///
/// # Example
///
/// ```rust
/// use oxide_polymer::{create_test_spawner, Component, Effect, Event, Host, Next, TestMvuRuntime, TestRenderer};
///
/// struct Hello;
///
/// impl Component<()> for Hello {
///     fn update(&mut self, _event: Event<()>) -> (Next, Effect<()>) {
///         (Next::Keep, Effect::none())
///     }
///     fn render(&self) -> String { "hello".into() }
/// }
///
/// let renderer = TestRenderer::new();
/// let runtime = TestMvuRuntime::new(Host::<()>::new(Hello), renderer.clone(), create_test_spawner());
/// let _driver = runtime.run();
///
/// renderer.with_renders(|renders| {
///     assert_eq!(renders[0], "hello");
/// });
/// ```
pub struct TestRenderer {
    renders: Arc<Mutex<Vec<String>>>,
}

#[cfg(any(test, feature = "testing"))]
impl Clone for TestRenderer {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for TestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Renderer for TestRenderer {
    fn render(&mut self, frame: String) {
        self.renders.lock().push(frame);
    }
}

#[cfg(any(test, feature = "testing"))]
impl TestRenderer {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a boxed renderer sharing this renderer's capture storage.
    pub fn boxed(&self) -> Box<dyn Renderer + Send> {
        Box::new(self.clone())
    }

    /// Get the number of frames rendered so far.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// The most recent frame, if any.
    pub fn last(&self) -> Option<String> {
        self.renders.lock().last().cloned()
    }

    /// Access the captured frames with a closure.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<String>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }
}

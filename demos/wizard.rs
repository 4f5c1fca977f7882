//! A small terminal wizard: pick "Say hello" from the menu, type a name,
//! and get greeted. "About" opens a screen on a navigation stack.
//!
//! ```sh
//! POLYMER_TRACE=router,chain POLYMER_TRACE_LEVEL=debug cargo run --example wizard
//! ```
//!
//! Logs go to `wizard.log` so they do not tear the frame.

use std::future::Future;
use std::pin::Pin;
use std::thread;

use oxide_polymer::terminal::{spawn_input, window_size, TerminalRenderer};
use oxide_polymer::{
    logging, Auto, AutoSlot, Chain, Component, Context, ContextAware, Effect, Event, Host,
    KeyCode, Lens, MvuRuntime, Next, Result, TraceConfig,
};
use tracing::info;

#[derive(Debug, Clone)]
enum Msg {
    Start,
    Submitted(String),
}

/// The name of whoever launched the wizard.
#[derive(Debug, Clone)]
struct Operator(String);

const ITEMS: [&str; 3] = ["Say hello", "About", "Quit"];

#[derive(Default)]
struct Menu {
    selected: usize,
    operator: Option<String>,
}

impl ContextAware for Menu {
    fn set_context(&mut self, ctx: &Context) {
        if let Some(Operator(name)) = ctx.get::<Operator>() {
            self.operator = Some(name.clone());
        }
    }
}

impl Component<Msg> for Menu {
    fn update(&mut self, event: Event<Msg>) -> (Next, Effect<Msg>) {
        let Event::Key(key) = event else {
            return (Next::Keep, Effect::none());
        };
        let effect = match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Effect::none()
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(ITEMS.len() - 1);
                Effect::none()
            }
            KeyCode::Enter => match self.selected {
                0 => Effect::message(Msg::Start),
                1 => Effect::push(About),
                _ => Effect::quit(),
            },
            _ => Effect::none(),
        };
        (Next::Keep, effect)
    }

    fn render(&self) -> String {
        let mut out = String::from("Wizard\n\n");
        for (i, item) in ITEMS.iter().enumerate() {
            let marker = if i == self.selected { '>' } else { ' ' };
            out.push_str(&format!("{marker} {item}\n"));
        }
        if let Some(operator) = &self.operator {
            out.push_str(&format!("\nsigned in as {operator}"));
        }
        out
    }

    fn context_sink(&mut self) -> Option<&mut dyn ContextAware> {
        Some(self)
    }
}

#[derive(Default)]
struct Prompt {
    input: String,
}

impl Component<Msg> for Prompt {
    fn update(&mut self, event: Event<Msg>) -> (Next, Effect<Msg>) {
        let Event::Key(key) = event else {
            return (Next::Keep, Effect::none());
        };
        match key.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter if !self.input.is_empty() => {
                let name = std::mem::take(&mut self.input);
                return (Next::Done, Effect::message(Msg::Submitted(name)));
            }
            KeyCode::Esc => return (Next::Done, Effect::none()),
            _ => {}
        }
        (Next::Keep, Effect::none())
    }

    fn render(&self) -> String {
        format!("What is your name?\n\n> {}_\n\n(enter to confirm, esc to cancel)", self.input)
    }
}

struct Greeting {
    name: String,
}

impl Component<Msg> for Greeting {
    fn update(&mut self, event: Event<Msg>) -> (Next, Effect<Msg>) {
        match event {
            Event::Key(_) => (Next::Done, Effect::none()),
            _ => (Next::Keep, Effect::none()),
        }
    }

    fn render(&self) -> String {
        format!("Hello, {}!\n\n(press any key)", self.name)
    }
}

struct About;

impl Component<Msg> for About {
    fn update(&mut self, event: Event<Msg>) -> (Next, Effect<Msg>) {
        match event {
            Event::Key(key) if key.code == KeyCode::Esc => (Next::Keep, Effect::pop()),
            _ => (Next::Keep, Effect::none()),
        }
    }

    fn render(&self) -> String {
        "oxide-polymer wizard demo\n\n(esc to go back)".to_string()
    }
}

/// Everything the home screen can show.
enum Page {
    Menu(Menu),
    Prompt(Prompt),
    Greeting(Greeting),
}

impl Page {
    fn as_component(&self) -> &dyn Component<Msg> {
        match self {
            Page::Menu(menu) => menu,
            Page::Prompt(prompt) => prompt,
            Page::Greeting(greeting) => greeting,
        }
    }

    fn as_component_mut(&mut self) -> &mut dyn Component<Msg> {
        match self {
            Page::Menu(menu) => menu,
            Page::Prompt(prompt) => prompt,
            Page::Greeting(greeting) => greeting,
        }
    }
}

impl Component<Msg> for Page {
    fn update(&mut self, event: Event<Msg>) -> (Next, Effect<Msg>) {
        self.as_component_mut().update(event)
    }

    fn render(&self) -> String {
        self.as_component().render()
    }

    fn name(&self) -> &str {
        self.as_component().name()
    }

    fn context_sink(&mut self) -> Option<&mut dyn ContextAware> {
        self.as_component_mut().context_sink()
    }
}

/// The menu, eclipsed by the prompt or the greeting while they are open.
struct Home {
    pages: Auto<Msg, Page>,
}

impl Home {
    fn new() -> Self {
        Self {
            pages: Auto::new(Page::Menu(Menu::default())).with_name("home"),
        }
    }
}

impl Component<Msg> for Home {
    fn update(&mut self, event: Event<Msg>) -> (Next, Effect<Msg>) {
        let effect = match event {
            Event::Message(Msg::Start) => {
                self.pages.set(AutoSlot::Override, Some(Page::Prompt(Prompt::default())))
            }
            Event::Message(Msg::Submitted(name)) => {
                info!(%name, "greeting");
                self.pages
                    .set(AutoSlot::Override, Some(Page::Greeting(Greeting { name })))
            }
            event => self.pages.route(event),
        };
        (Next::Keep, effect)
    }

    fn render(&self) -> String {
        self.pages.render()
    }

    fn init(&mut self) -> Effect<Msg> {
        self.pages.init()
    }

    fn inner(&self) -> Option<&dyn Component<Msg>> {
        Some(&self.pages as &dyn Component<Msg>)
    }
}

fn thread_spawner(future: Pin<Box<dyn Future<Output = ()> + Send>>) {
    thread::spawn(move || futures::executor::block_on(future));
}

fn main() -> Result<()> {
    let mut config = TraceConfig::default().with_env_overrides();
    if config.file.is_none() {
        config.file = Some("wizard.log".into());
    }
    logging::init(&config)?;

    let observer = config.observer()?;
    let root: Lens<Msg, Chain<Msg>> = observer.lens(Chain::new(Home::new()).with_name("wizard"));
    let operator = std::env::var("USER").unwrap_or_else(|_| "guest".to_string());
    let host = Host::new(root).with_context(Operator(operator));

    let renderer = TerminalRenderer::new()?;
    let mut runtime = MvuRuntime::new(host, renderer, thread_spawner);
    let emitter = runtime.emitter();
    window_size::<Msg>().execute(&emitter);
    let _input = spawn_input(emitter);

    futures::executor::block_on(runtime.run());
    observer.close()
}

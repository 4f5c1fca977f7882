//! Installs a `tracing` subscriber from a [`TraceConfig`].
//!
//! Terminal applications own stdout for frames, so log output goes to
//! stderr or, when `file` is configured, is appended to that file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::observe::Format;
use crate::{Error, Result, TraceConfig};

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init(config: &TraceConfig) -> Result<()> {
    let filter = config.env_filter()?;
    let layer = fmt_layer(config)?;

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

/// [`init`] with the default configuration adjusted by `POLYMER_TRACE` and
/// `POLYMER_TRACE_LEVEL`.
pub fn init_from_env() -> Result<()> {
    init(&TraceConfig::default().with_env_overrides())
}

fn fmt_layer<S>(config: &TraceConfig) -> Result<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = match &config.file {
        None => match config.format {
            Format::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
            Format::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        },
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            match config.format {
                Format::Text => fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .boxed(),
                Format::Json => fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .boxed(),
            }
        }
    };
    Ok(layer)
}

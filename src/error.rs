//! Error values surfaced by containers, configuration and logging setup.

use std::path::PathBuf;
use std::sync::Arc;

/// Errors produced by the crate.
///
/// Structural misuse at runtime ([`Error::StackEmpty`], [`Error::NoActiveSlot`])
/// never aborts: it travels back through the event loop as an
/// [`Event::Error`](crate::Event::Error) delivered by an [`Effect`](crate::Effect).
/// Application components report their own failures the same way through
/// [`Error::component`].
///
/// The type is cheap to clone so it can ride inside events.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A navigation stack had nothing left to pop or dispatch to.
    #[error("navigation stack is empty")]
    StackEmpty,

    /// A router was asked to route while its target was skipped or unset.
    #[error("no active slot to route to")]
    NoActiveSlot,

    /// An application-level failure raised by a component.
    #[error("component error: {0}")]
    Component(Arc<dyn std::error::Error + Send + Sync>),

    /// A trace level string could not be parsed.
    #[error("invalid trace level `{0}`")]
    InvalidLevel(String),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    /// The configuration file was not valid TOML for [`TraceConfig`](crate::TraceConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(Arc<std::io::Error>),

    /// A global tracing subscriber could not be installed.
    #[error("failed to install logging: {0}")]
    Logging(String),
}

impl Error {
    /// Wrap an application error so it can travel as an [`Event::Error`](crate::Event::Error).
    pub fn component<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Component(Arc::new(err))
    }

    /// Whether this error reports structural misuse of a container.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::StackEmpty | Error::NoActiveSlot)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

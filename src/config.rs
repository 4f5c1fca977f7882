//! Trace configuration loaded from TOML and the environment.
//!
//! ```toml
//! level = "debug"
//! format = "json"
//! file = "polymer.log"
//! categories = ["router", "chain"]
//!
//! [metadata]
//! service = "wizard"
//! ```
//!
//! `POLYMER_TRACE` (comma or space separated categories, `*` for all) and
//! `POLYMER_TRACE_LEVEL` override the file when set.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::observe::{Builder, Format, Observer};
use crate::{Error, Result};

pub const TRACE_ENV: &str = "POLYMER_TRACE";
pub const TRACE_LEVEL_ENV: &str = "POLYMER_TRACE_LEVEL";

/// Crate subsystems that can be traced independently.
///
/// Each maps onto a `tracing` target, so a category can also be enabled
/// with a plain `RUST_LOG`-style directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Host,
    Router,
    Chain,
    Lens,
    Runtime,
    Observe,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Host,
        Category::Router,
        Category::Chain,
        Category::Lens,
        Category::Runtime,
        Category::Observe,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Host => "host",
            Category::Router => "router",
            Category::Chain => "chain",
            Category::Lens => "lens",
            Category::Runtime => "runtime",
            Category::Observe => "observe",
        }
    }

    /// The `tracing` target prefix for this category.
    pub fn target(self) -> &'static str {
        match self {
            Category::Host => "oxide_polymer::host",
            Category::Router => "oxide_polymer::router",
            Category::Chain => "oxide_polymer::chain",
            Category::Lens => "oxide_polymer::lens",
            Category::Runtime => "oxide_polymer::runtime",
            Category::Observe => "oxide_polymer::observe",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = normalize(s);
        Category::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or(())
    }
}

/// How, where and what to trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    pub format: Format,
    /// Append to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
    /// Enabled categories; `"*"` enables all. Empty disables crate tracing.
    pub categories: Vec<String>,
    /// Attached to every structured trace event.
    pub metadata: BTreeMap<String, String>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Text,
            file: None,
            categories: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

impl TraceConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source: Arc::new(source),
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.level_filter()?;
        Ok(config)
    }

    /// Apply `POLYMER_TRACE` and `POLYMER_TRACE_LEVEL` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        let trace = std::env::var(TRACE_ENV).ok();
        let level = std::env::var(TRACE_LEVEL_ENV).ok();
        self.with_overrides(trace.as_deref(), level.as_deref())
    }

    /// Apply override values as they would appear in the environment.
    pub fn with_overrides(mut self, trace: Option<&str>, level: Option<&str>) -> Self {
        if let Some(trace) = trace.filter(|t| !t.trim().is_empty()) {
            self.categories = trace
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(normalize)
                .filter(|c| !c.is_empty())
                .collect();
        }
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.level = level.trim().to_ascii_lowercase();
        }
        self
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(self.level.trim()).map_err(|_| Error::InvalidLevel(self.level.clone()))
    }

    pub fn all_categories(&self) -> bool {
        self.categories.iter().any(|c| c.trim() == "*")
    }

    pub fn is_category_enabled(&self, category: Category) -> bool {
        self.all_categories()
            || self
                .categories
                .iter()
                .any(|c| normalize(c) == category.name())
    }

    /// Directives for an `EnvFilter`: the configured level everywhere, with
    /// crate targets limited to the enabled categories.
    pub fn directives(&self) -> Result<String> {
        let level = self.level_filter()?;
        let mut directives = vec![level.to_string().to_ascii_lowercase()];
        if !self.all_categories() {
            directives.push("oxide_polymer=off".to_string());
            for category in Category::ALL {
                if self.is_category_enabled(category) {
                    directives.push(format!("{}={}", category.target(), level).to_ascii_lowercase());
                }
            }
        }
        Ok(directives.join(","))
    }

    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(self.directives()?).map_err(|e| Error::Logging(e.to_string()))
    }

    /// An observability builder with sinks matching this configuration.
    pub fn builder(&self) -> Result<Builder> {
        let level = self.level_filter()?;
        let mut builder = Builder::new().with_level(level);
        builder = match &self.file {
            Some(path) => builder.with_file_tracer(path, level, self.format)?,
            None => builder.with_log_tracer(level),
        };
        for (key, value) in &self.metadata {
            builder = builder.with_metadata(key.clone(), value.clone());
        }
        Ok(builder)
    }

    pub fn observer(&self) -> Result<Observer> {
        Ok(self.builder()?.build())
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(' ', "_")
}

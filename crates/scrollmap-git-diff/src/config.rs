//! Provider configuration
//!
//! Configuration loaded from a scrollmap.toml file, plus a shared handle the
//! host can mutate at runtime. The only setting is the marker threshold.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{Emitter, Subscription};

/// Errors that can occur while loading configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be parsed as TOML.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Provider configuration loaded from scrollmap.toml
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollmapConfig {
    /// Maximum number of per-line markers to render. When a change set
    /// expands to more items than this, the provider returns no items and the
    /// host falls back to a coarser indicator. `0` means unlimited.
    #[serde(default)]
    pub threshold: usize,
}

impl Default for ScrollmapConfig {
    fn default() -> Self {
        Self { threshold: 0 }
    }
}

impl ScrollmapConfig {
    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse config from `path`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from `path`, or fall back to defaults.
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => {
                log::info!("Loaded scrollmap config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default scrollmap config");
                Self::default()
            }
        }
    }
}

struct ConfigInner {
    threshold: Cell<usize>,
    changed: Emitter<usize>,
}

/// Shared, live-observable configuration handle.
///
/// The host mutates it (e.g. from its settings UI); the provider reads the
/// current threshold on every pull and re-notifies subscribed editors when it
/// changes.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Rc<ConfigInner>,
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(ScrollmapConfig::default())
    }
}

impl ConfigHandle {
    /// Create a handle seeded with `config`.
    pub fn new(config: ScrollmapConfig) -> Self {
        Self {
            inner: Rc::new(ConfigInner {
                threshold: Cell::new(config.threshold),
                changed: Emitter::new(),
            }),
        }
    }

    /// Current threshold value.
    pub fn threshold(&self) -> usize {
        self.inner.threshold.get()
    }

    /// Update the threshold, notifying observers when the value changes.
    pub fn set_threshold(&self, threshold: usize) {
        if self.inner.threshold.get() == threshold {
            return;
        }
        self.inner.threshold.set(threshold);
        log::debug!("scrollmap threshold set to {threshold}");
        self.inner.changed.emit(&threshold);
    }

    /// Invoke `callback` with the current value immediately, then on every
    /// subsequent change.
    pub fn observe(&self, callback: impl Fn(usize) + 'static) -> Subscription {
        callback(self.threshold());
        self.on_did_change(callback)
    }

    /// Invoke `callback` on every change.
    pub fn on_did_change(&self, callback: impl Fn(usize) + 'static) -> Subscription {
        self.inner.changed.subscribe(move |value| callback(*value))
    }
}

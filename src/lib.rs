//! SkillSearch: a headless incremental search widget for a skills marketplace.
//!
//! SkillSearch coordinates everything between the search box and the results:
//! - Debounced free-text search with a minimum-length gate
//! - Facet filters (location, category, rate, delivery) edited in a modal
//! - Generation-tagged requests so a stale response never overwrites a newer one
//! - Results panel visibility with click-outside detection
//! - Details and images for the selected skill, fetched concurrently

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (main.rs terminal host, or any embedder)      │  ← Input, rendering
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← tokio event loop
//! │  - Timers, worker tasks, alerts, teardown           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and action dispatching            │
//! │  - Debounce, coordinator, visibility, modal         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ API Layer     │
//! │ (ui/)         │   │ (worker/)     │   │ (api/)        │
//! │ - View models │   │ - Messages    │   │ - SkillApi    │
//! │ - Text render │   │ - Execution   │   │ - reqwest     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Filters, queries, skills, errors (domain/)       │
//! │  - Platform paths (infrastructure/)                 │
//! │  - OpenTelemetry file export (observability/)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Hosts pass configuration either as a string map ([`Config::from_map`]) or
//! as a TOML file ([`Config::from_file`]):
//!
//! ```toml
//! base_url = "https://us-central1-skillair-1.cloudfunctions.net"
//! debounce_ms = 500
//! min_query_len = 3
//! request_timeout_ms = 5000
//! auto_commit = true
//! reveal_step = 10
//! reveal_delay_ms = 800
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use skillsearch::{handle_event, initialize, Action, Config, Event, NoRegions};
//! use std::sync::Arc;
//!
//! let mut state = initialize(&Config::default(), Arc::new(NoRegions));
//!
//! let (_, actions) = handle_event(&mut state, &Event::TextChanged("plumb".into()))?;
//! assert!(matches!(actions[0], Action::StartTimer { .. }));
//! # Ok::<(), skillsearch::SkillSearchError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod ui;
pub mod worker;

pub mod observability;

pub use api::{HttpSkillApi, SkillApi};
pub use app::{handle_event, Action, Event, HitTest, NoRegions, Point, Region, WidgetState};
pub use domain::{FetchErrorKind, Result, SkillSearchError};
pub use runtime::{AlertSink, Widget};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Widget configuration.
///
/// Every field has a default, so both the string map and the TOML file may
/// name any subset of keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the search service; endpoint paths are appended to it.
    pub base_url: String,

    /// Quiet interval of the search box in milliseconds. Default: 500
    pub debounce_ms: u64,

    /// Minimum trimmed length before typed text searches. Default: 3
    pub min_query_len: usize,

    /// Ceiling for each remote call in milliseconds. Must be non-zero.
    /// Default: 5000
    pub request_timeout_ms: u64,

    /// Whether picking a facet option also commits the modal. Default: true
    pub auto_commit: bool,

    /// Items revealed per step of the results window. Must be non-zero.
    /// Default: 10
    pub reveal_step: usize,

    /// Delay before a reveal step lands, in milliseconds. Default: 800
    pub reveal_delay_ms: u64,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory for trace output. `~` is expanded. Default: platform data
    /// dir + `skillsearch`
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://us-central1-skillair-1.cloudfunctions.net".to_string(),
            debounce_ms: 500,
            min_query_len: 3,
            request_timeout_ms: 5000,
            auto_commit: true,
            reveal_step: 10,
            reveal_delay_ms: 800,
            trace_level: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Parses configuration from a host-supplied string map.
    ///
    /// Unknown keys are ignored; a key whose value does not parse, or is zero
    /// where zero is meaningless, keeps its default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use skillsearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    /// map.insert("auto_commit".to_string(), "false".to_string());
    /// map.insert("reveal_step".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 250);
    /// assert!(!config.auto_commit);
    /// assert_eq!(config.reveal_step, 10);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        fn parsed<T: std::str::FromStr>(map: &BTreeMap<String, String>, key: &str, default: T) -> T {
            map.get(key)
                .and_then(|s| s.trim().parse::<T>().ok())
                .unwrap_or(default)
        }

        let defaults = Self::default();
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let config = Self {
            base_url: non_empty("base_url").unwrap_or(defaults.base_url),
            debounce_ms: parsed(config, "debounce_ms", defaults.debounce_ms),
            min_query_len: parsed(config, "min_query_len", defaults.min_query_len),
            request_timeout_ms: parsed(config, "request_timeout_ms", defaults.request_timeout_ms),
            auto_commit: parsed(config, "auto_commit", defaults.auto_commit),
            reveal_step: parsed(config, "reveal_step", defaults.reveal_step),
            reveal_delay_ms: parsed(config, "reveal_delay_ms", defaults.reveal_delay_ms),
            trace_level: non_empty("trace_level"),
            data_dir: non_empty("data_dir"),
        };
        config.with_nonzero_limits()
    }

    /// Replaces a zero `reveal_step` or `request_timeout_ms` with its
    /// default. Zero would hide every result or fail every call.
    fn with_nonzero_limits(mut self) -> Self {
        let defaults = Self::default();
        if self.reveal_step == 0 {
            tracing::warn!(default = defaults.reveal_step, "reveal_step must be non-zero, using default");
            self.reveal_step = defaults.reveal_step;
        }
        if self.request_timeout_ms == 0 {
            tracing::warn!(
                default = defaults.request_timeout_ms,
                "request_timeout_ms must be non-zero, using default"
            );
            self.request_timeout_ms = defaults.request_timeout_ms;
        }
        self
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSearchError::Config`] if the document is not valid TOML
    /// or a key has the wrong type.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str::<Self>(contents)
            .map(Self::with_nonzero_limits)
            .map_err(|e| SkillSearchError::Config(e.to_string()))
    }

    /// Loads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSearchError::Io`] if the file cannot be read, or
    /// [`SkillSearchError::Config`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Directory that trace output is written to.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.as_deref().map_or_else(
            infrastructure::get_data_dir,
            infrastructure::expand_tilde,
        )
    }
}

/// Creates widget state from configuration.
///
/// `hit_test` resolves pointer positions for click-outside detection; pass
/// [`NoRegions`] when the host has no pointer.
#[must_use]
pub fn initialize(config: &Config, hit_test: Arc<dyn HitTest>) -> WidgetState {
    tracing::debug!(
        base_url = %config.base_url,
        debounce_ms = config.debounce_ms,
        auto_commit = config.auto_commit,
        "initializing skill search widget"
    );
    WidgetState::new(config, hit_test)
}

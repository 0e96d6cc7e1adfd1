//! Spinner style table loaded from JSON.
//!
//! A style source is a JSON object mapping a style name to its animation:
//!
//! ```json
//! {
//!   "line": { "interval": 130, "frames": ["-", "\\", "|", "/"] },
//!   "pulse": { "frames": ["◯", "◎", "●", "◎"] }
//! }
//! ```
//!
//! `interval` is optional and defaults to [`DEFAULT_INTERVAL_MS`]. `frames`
//! is required and must not be empty. The table is loaded once at startup
//! and is read-only afterwards; spinners hold their style through an `Arc`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Interval used when a style entry does not specify one.
pub const DEFAULT_INTERVAL_MS: u64 = 80;

/// Environment variable naming a style file to use instead of the built-in table.
pub const STYLES_ENV: &str = "TWIRL_STYLES";

/// Built-in style table compiled into the binary.
const EMBEDDED_STYLES: &str = include_str!("spinners.json");

/// Error type for style table operations.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// The style source could not be loaded.
    #[error(transparent)]
    ConfigLoad(#[from] ConfigLoadError),
    /// The requested style is not in the table.
    #[error("Unknown spinner style: {0}")]
    UnknownStyle(String),
    /// A style entry cannot be animated.
    #[error("Invalid spinner style '{name}': {reason}")]
    InvalidStyle {
        /// Name of the offending style.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Error type for reading and parsing a style source.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// Error reading the style file from disk.
    #[error("Failed to read style file {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The source is not a JSON object.
    #[error("Failed to parse style JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A single entry has the wrong shape.
    #[error("Malformed style entry '{name}': {source}")]
    Entry {
        /// Name of the malformed entry.
        name: String,
        /// Underlying deserialisation error.
        source: serde_json::Error,
    },
    /// The source parsed but defines nothing.
    #[error("No spinner styles found")]
    NoStyles,
}

/// A named animation: the frames to cycle through and the delay between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    name: String,
    interval_ms: u64,
    frames: Vec<String>,
}

impl Style {
    /// Create a style, rejecting ones that cannot be animated.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidStyle`] if `frames` is empty or
    /// `interval_ms` is zero.
    pub fn new(
        name: impl Into<String>,
        interval_ms: u64,
        frames: Vec<String>,
    ) -> Result<Self, StyleError> {
        let name = name.into();
        if frames.is_empty() {
            return Err(StyleError::InvalidStyle {
                name,
                reason: "frames must not be empty".to_string(),
            });
        }
        if interval_ms == 0 {
            return Err(StyleError::InvalidStyle {
                name,
                reason: "interval must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            name,
            interval_ms,
            frames,
        })
    }

    /// Style name as it appears in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Milliseconds between frames.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Animation frames in display order. Never empty.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Frame shown on the given tick; wraps around the frame list.
    pub fn frame(&self, tick: usize) -> &str {
        &self.frames[tick % self.frames.len()]
    }
}

/// Shape of one entry in the JSON source.
#[derive(Debug, Deserialize)]
struct RawStyle {
    #[serde(default)]
    interval: Option<u64>,
    #[serde(default)]
    frames: Option<Vec<String>>,
}

/// Immutable mapping from style name to [`Style`].
#[derive(Debug, Clone)]
pub struct StyleTable {
    order: Vec<String>,
    styles: HashMap<String, Arc<Style>>,
}

impl StyleTable {
    /// Build a table from already constructed styles.
    ///
    /// A later style with the same name replaces an earlier one but keeps
    /// its position.
    pub fn from_styles(styles: impl IntoIterator<Item = Style>) -> Result<Self, StyleError> {
        let mut table = Self {
            order: Vec::new(),
            styles: HashMap::new(),
        };
        for style in styles {
            let name = style.name().to_string();
            if table.styles.insert(name.clone(), Arc::new(style)).is_none() {
                table.order.push(name);
            }
        }
        if table.is_empty() {
            return Err(ConfigLoadError::NoStyles.into());
        }
        Ok(table)
    }

    /// Parse a style table from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, StyleError> {
        let root: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(ConfigLoadError::Parse)?;

        let mut styles = Vec::with_capacity(root.len());
        for (name, value) in root {
            let raw: RawStyle = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(source) => return Err(ConfigLoadError::Entry { name, source }.into()),
            };
            let frames = raw.frames.unwrap_or_default();
            let interval = raw.interval.unwrap_or(DEFAULT_INTERVAL_MS);
            styles.push(Style::new(name, interval, frames)?);
        }

        Self::from_styles(styles)
    }

    /// Load a style table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, StyleError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), styles = table.len(), "loaded style file");
        Ok(table)
    }

    /// The built-in style table.
    pub fn embedded() -> Result<Self, StyleError> {
        Self::from_json_str(EMBEDDED_STYLES)
    }

    /// Load from `path` if given, otherwise use the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self, StyleError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// Look up a style by name.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownStyle`] if no style has that name.
    pub fn get(&self, name: &str) -> Result<Arc<Style>, StyleError> {
        self.styles
            .get(name)
            .cloned()
            .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))
    }

    /// Whether a style with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Style names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Styles in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Style>> {
        self.order.iter().filter_map(|name| self.styles.get(name))
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table has no styles. Loaded tables never are.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

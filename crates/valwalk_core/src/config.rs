//! Walker configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::WalkError;

/// Which values the callback is invoked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    /// Leaves and nodes.
    #[default]
    All,
    /// Records, maps and sequences only. Leaves are never replaced.
    NodesOnly,
    /// Leaves only. Nodes are still descended into.
    LeavesOnly,
}

impl Filter {
    #[inline]
    pub(crate) const fn visits_leaves(self) -> bool {
        !matches!(self, Filter::NodesOnly)
    }

    #[inline]
    pub(crate) const fn visits_nodes(self) -> bool {
        !matches!(self, Filter::LeavesOnly)
    }
}

/// Configuration for a traversal and the stock print callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalkConfig {
    /// Which values the callback sees.
    #[serde(default)]
    pub filter: Filter,

    /// Marker repeated once per nesting level by the print callbacks.
    #[serde(default = "default_indent_marker")]
    pub indent_marker: String,
}

fn default_indent_marker() -> String {
    ">>>>".to_string()
}

impl WalkConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            filter: Filter::All,
            indent_marker: default_indent_marker(),
        }
    }

    /// Sets the filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the indent marker.
    pub fn indent_marker(mut self, marker: impl Into<String>) -> Self {
        self.indent_marker = marker.into();
        self
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WalkError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, WalkError> {
        serde_json::from_str(json).map_err(|e| WalkError::config(format!("Invalid config: {}", e)))
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new()
    }
}

//! View configuration loading and parsing
//!
//! A parent collection describes its bookmark views in TOML:
//!
//! ```toml
//! [[view]]
//! index = "default"
//! label = "Default View"
//! editable = false
//!
//! [view.data.paging]
//! pageSize = 20
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::{ExportedView, Items, ViewIndex};
use crate::error::{GridmarksError, Result};

/// Template used to render a bookmark view unless overridden
pub const DEFAULT_TEMPLATE: &str = "ui/grid/controls/bookmarks/view";

/// Construction settings for a single bookmark view
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Identifier within the parent collection
    pub index: ViewIndex,
    /// Initial label
    pub label: String,
    /// Start as the active view
    pub active: bool,
    /// Whether `set_data` may replace the payload
    pub editable: bool,
    /// Start with the label editor open
    pub editing: bool,
    /// Created by the parent but not saved yet
    pub is_new: bool,
    /// Template name for the rendering layer
    pub template: String,
    /// Initial payload (empty when absent)
    pub data: Option<Items>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            index: ViewIndex::default(),
            label: String::new(),
            active: false,
            editable: true,
            editing: false,
            is_new: false,
            template: DEFAULT_TEMPLATE.to_string(),
            data: None,
        }
    }
}

impl ViewConfig {
    /// Create a config with defaults for the given index
    pub fn new(index: impl Into<ViewIndex>) -> Self {
        Self {
            index: index.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_items(mut self, items: Items) -> Self {
        self.data = Some(items);
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn is_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    /// Rebuild a config from a previously exported view
    pub fn restore(exported: &ExportedView) -> Self {
        Self {
            index: exported.index.clone(),
            label: exported.label.clone(),
            data: Some((*exported.data).clone()),
            ..Self::default()
        }
    }
}

/// A file of view definitions
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    #[serde(rename = "view")]
    pub views: Vec<ViewConfig>,
}

impl ConfigFile {
    /// Parse view definitions from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load view definitions from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)
            .map_err(|e| GridmarksError::config(path, e.to_string()))?;
        tracing::debug!(path = %path.display(), views = config.views.len(), "loaded view config");
        Ok(config)
    }
}

//! Bookmark data: the stored label and the opaque grid payload

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::ViewIndex;
use crate::error::Result;

/// Opaque grid configuration payload carried by a bookmark
pub type Items = serde_json::Map<String, serde_json::Value>;

/// Internal store of a view
///
/// `items` is shared immutably: replacing the payload swaps the `Rc`, so a
/// handed-out reference can never observe or cause a mutation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewData {
    /// Last committed label
    pub label: String,
    /// Grid configuration payload
    pub items: Rc<Items>,
}

impl ViewData {
    pub fn new(label: impl Into<String>, items: Items) -> Self {
        Self {
            label: label.into(),
            items: Rc::new(items),
        }
    }
}

/// Snapshot of a view handed to the parent collection for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedView {
    pub index: ViewIndex,
    pub label: String,
    pub data: Rc<Items>,
}

impl ExportedView {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
